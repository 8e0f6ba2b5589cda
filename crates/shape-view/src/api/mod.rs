pub mod options;
pub mod types;
pub mod viewer;
