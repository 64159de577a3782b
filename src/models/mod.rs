pub mod config;

pub use config::{resolve_config_path, AppConfig, Overrides, CONFIG_ENV};
