//! Application configuration.
//!
//! Loaded from `$XDG_CONFIG_HOME/barmode/config.json`.  Every section is
//! optional; a minimal `{}` file is valid and all sections fall back to
//! their compiled-in defaults.
//!
//! # Example
//!
//! ```json
//! {
//!   "bar": { "default_visible": true },
//!   "modes": ["normal", "focus"],
//!   "battery": { "low": 15 },
//!   "close_everything": {
//!     "per_monitor": ["cheatsheet", "session"],
//!     "singletons": ["sideleft", "sideright", "overview"]
//!   },
//!   "window_commands": {
//!     "open": ["eww", "open", "{id}"],
//!     "close": ["eww", "close", "{id}"],
//!     "toggle": ["eww", "open", "--toggle", "{id}"]
//!   }
//! }
//! ```

use crate::command::ShellMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bar: BarConfig,

    /// Starting shell mode per monitor index.  Monitors past the end of the
    /// list start in `normal`.
    #[serde(default)]
    pub modes: Vec<ShellMode>,

    #[serde(default)]
    pub battery: BatteryConfig,

    #[serde(default)]
    pub close_everything: CloseEverythingConfig,

    /// Run these commands to manage windows.  When absent, window requests
    /// are published on the status stream instead.
    #[serde(default)]
    pub window_commands: Option<WindowCommands>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Whether the bar is shown by default at startup.
    pub default_visible: bool,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            default_visible: true,
        }
    }
}

/// Forwarded to renderers; barmode itself does not read the battery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryConfig {
    /// Percentage at or below which the battery counts as low.
    pub low: u8,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self { low: 20 }
    }
}

/// Windows closed by `CloseEverything`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloseEverythingConfig {
    /// Names that exist once per monitor (`<name><index>`).
    pub per_monitor: Vec<String>,
    /// Names that exist once in total.
    pub singletons: Vec<String>,
}

impl Default for CloseEverythingConfig {
    fn default() -> Self {
        Self {
            per_monitor: vec!["cheatsheet".into(), "session".into()],
            singletons: vec!["sideleft".into(), "sideright".into(), "overview".into()],
        }
    }
}

/// Argv templates for the exec window backend.  `{id}` in any argument is
/// replaced with the window id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCommands {
    pub open: Vec<String>,
    pub close: Vec<String>,
    pub toggle: Vec<String>,
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        if let Some(cmds) = &config.window_commands {
            cmds.validate()
                .map_err(|e| ConfigError(format!("{}: {}", path.display(), e)))?;
        }
        Ok(config)
    }
}

impl WindowCommands {
    fn validate(&self) -> Result<(), String> {
        for (name, argv) in [("open", &self.open), ("close", &self.close), ("toggle", &self.toggle)] {
            if argv.is_empty() {
                return Err(format!("window_commands.{} must not be empty", name));
            }
        }
        Ok(())
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
