pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::options::{
    Computed, Constant, DrawOptions, DrawStyle, FillConfig, RandomLightColor, Resolver, ViewerConfig,
};
pub use api::types::{BodyId, NodeId};
pub use api::viewer::Viewer;
pub use components::color::{Color, ColorParseError};
pub use components::sprite::{Bitmap, Rgba8, Sprite};
pub use components::visual::Visual;
pub use core::body::{Body, Simulation};
pub use core::events::{BodyEvents, Subscription};
pub use core::scene::Scene;
pub use core::shape::Shape;
pub use core::world::KinematicWorld;
pub use renderer::instance::{RenderBuffer, SpriteInstance};
pub use renderer::traits::SceneGraph;
pub use input::drag::{DragController, DragState};
pub use input::queue::{InputEvent, InputQueue};
pub use systems::binding::VisualBinding;
pub use systems::raster::{PolygonLayout, ShapeRasterizer};
pub use systems::render::build_render_buffer;
pub use systems::sync::sync_visuals;

#[cfg(feature = "physics")]
pub use core::physics::{BodyDesc, BodyType, ColliderMaterial, PhysicsBody, PhysicsWorld};
