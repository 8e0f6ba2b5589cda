pub mod body;
pub mod events;
#[cfg(feature = "physics")]
pub mod physics;
pub mod scene;
pub mod shape;
pub mod world;
