//! Configuration loading

pub mod loader;

pub use loader::{default_config_path, load_config, DEFAULT_CONFIG_FILENAME};
