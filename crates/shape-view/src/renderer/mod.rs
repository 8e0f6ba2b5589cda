pub mod instance;
pub mod traits;

pub use instance::{RenderBuffer, SpriteInstance};
pub use traits::SceneGraph;
