pub mod loader;
pub mod result_model;
