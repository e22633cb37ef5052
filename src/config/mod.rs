pub mod env;
mod loader;

pub use env::{ApiConfig, AppConfig, DirectoryConfig, HealthConfig};
pub use loader::load_config;
