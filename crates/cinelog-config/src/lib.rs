pub mod config;
pub mod paths;

pub use config::{BackendConfig, Config, DisplayConfig, LoggingConfig, BACKEND_URL_ENV};
pub use paths::{PathManager, CONFIG_DIR_ENV};
