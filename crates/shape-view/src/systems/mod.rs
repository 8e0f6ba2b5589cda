pub mod binding;
pub mod raster;
pub mod render;
pub mod rng;
pub mod sync;
