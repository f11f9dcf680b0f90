//! 配置模块

pub mod config;
pub mod loader;

pub use config::{ActionConfig, AppConfig, HostConfig, LoggingConfig};
pub use loader::{ConfigLoader, ConfigValidationError};
