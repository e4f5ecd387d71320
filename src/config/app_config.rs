//! Application-level configuration
//!
//! Defines the screen options forwarded to the backend, the theme preset and
//! overrides handed to widgets, and logging.

use crate::style::Color;
use crate::theme::{Theme, ThemeSlot};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Embedded default configuration file
const DEFAULT_CONFIG: &str = include_str!("../../cellview.toml");

/// Configuration file name
const CONFIG_FILE_NAME: &str = "cellview.toml";

/// Environment variable naming an explicit configuration file
const CONFIG_ENV_VAR: &str = "CELLVIEW_CONFIG";

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Backend options, forwarded verbatim to the screen factory
    #[serde(default)]
    pub screen: ScreenConfig,
    /// Theme preset and per-slot overrides
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the first place that has one
    ///
    /// Looks at `CELLVIEW_CONFIG`, then `cellview.toml` in the current
    /// directory, then the platform config directory, and falls back to the
    /// built-in defaults.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::read(Path::new(&path));
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::read(&local);
        }

        if let Some(dirs) = ProjectDirs::from("", "", "cellview") {
            let user = dirs.config_dir().join(CONFIG_FILE_NAME);
            if user.is_file() {
                return Self::read(&user);
            }
        }

        toml::from_str(DEFAULT_CONFIG).context("Failed to parse embedded default config")
    }

    /// Load configuration from a specific file path
    /// If the file doesn't exist, creates it with default settings
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            eprintln!(
                "Configuration file not found at {}. Creating with default settings...",
                path.display()
            );
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
            std::fs::write(path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to create config file at {}", path.display()))?;
        }
        Self::read(path)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(anyhow::anyhow!("Invalid log level: {}", self.logging.level)),
        }

        if self.screen.poll_interval_ms == 0 {
            return Err(anyhow::anyhow!("screen.poll_interval_ms must be greater than 0"));
        }

        self.theme().map(|_| ())
    }

    /// Apply environment variable overrides to the configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("CELLVIEW_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(preset) = std::env::var("CELLVIEW_THEME") {
            self.theme.preset = preset;
        }
        if let Some(mouse) = std::env::var("CELLVIEW_MOUSE").ok().and_then(|v| parse_flag(&v)) {
            self.screen.mouse = mouse;
        }
    }

    /// Build the theme described by the `[theme]` section
    pub fn theme(&self) -> Result<Theme> {
        let mut theme = Theme::preset(&self.theme.preset)
            .ok_or_else(|| anyhow::anyhow!("Unknown theme preset: {}", self.theme.preset))?;

        for (name, value) in &self.theme.overrides {
            let slot: ThemeSlot = name.parse().map_err(anyhow::Error::msg)?;
            let color = Color::parse(value)
                .ok_or_else(|| anyhow::anyhow!("Invalid color '{}' for theme slot {}", value, slot))?;
            theme.set(slot, color);
        }

        Ok(theme)
    }

    /// Get a summary of the configuration
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Configuration loaded:\n");
        summary.push_str(&format!("Mouse: {}\n", self.screen.mouse));
        summary.push_str(&format!("Poll interval: {}ms\n", self.screen.poll_interval_ms));
        summary.push_str(&format!(
            "Theme: {} ({} overrides)\n",
            self.theme.preset,
            self.theme.overrides.len()
        ));
        summary.push_str(&format!("Logging Level: {}\n", self.logging.level));
        if let Some(file) = &self.logging.file {
            summary.push_str(&format!("Log File: {}\n", file.display()));
        }
        summary
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Backend options
///
/// Opaque to the application: it stores the value and hands it to the screen
/// factory when `run` starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Capture mouse events
    pub mouse: bool,
    /// Deliver pastes as character events
    pub bracketed_paste: bool,
    /// Ask the terminal to report key releases (kitty keyboard protocol)
    pub report_key_releases: bool,
    /// How long one terminal poll blocks before re-checking for shutdown
    pub poll_interval_ms: u64,
    /// Terminal window title
    pub title: Option<String>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            mouse: true,
            bracketed_paste: true,
            report_key_releases: false,
            poll_interval_ms: 50,
            title: None,
        }
    }
}

/// Theme configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Base preset (`dark` or `light`)
    pub preset: String,
    /// Slot name to color (`"yellow"`, `"darkcyan"`, `"#rrggbb"`)
    pub overrides: BTreeMap<String, String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            preset: "dark".to_string(),
            overrides: BTreeMap::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log file; stdout belongs to the UI, so nothing is logged without one
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
