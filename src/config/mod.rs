//! Configuration loading and management.

mod file;
mod types;
mod validate;

pub use file::{default_config_path, load_config_file, save_config};
pub use types::{Config, FeatureKind, WindowKind};
pub use validate::validate_config;
