//! Configuration loading

pub mod app_config;

// Re-export common types for convenience
pub use app_config::{AppConfig, LoggingConfig, ScreenConfig, ThemeConfig};
