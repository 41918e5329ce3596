//! Configuration file loading and environment variable handling.
//!
//! Precedence: CLI args > Environment vars > Config file > Defaults

use datefinder_core::DEFAULT_PIVOT_LOOKAHEAD;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file content for `--config-init`.
pub const DEFAULT_CONFIG: &str = r#"# datefind configuration
# See: datefind --help for all options

# Years past the reference year a two-digit year may land in (0-99).
# With 15 and a reference year of 2025, "40" means 2040 and "41" means 1941.
pivot_lookahead = 15

# Fixed reference date (YYYY-MM-DD) instead of today's date
# reference_date = "2025-06-01"

# Disable colored output
no_color = false
"#;

/// Overrides the config file location (used by tests and packaging).
pub const CONFIG_PATH_ENV: &str = "DATEFIND_CONFIG";

/// Configuration loaded from file and environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pivot_lookahead: Option<i32>,
    pub reference_date: Option<String>,
    pub no_color: Option<bool>,
}

impl Config {
    /// Get the config file path.
    ///
    /// - `$DATEFIND_CONFIG` when set
    /// - Linux/macOS: `~/.config/datefind/config.toml`
    /// - Windows: `%APPDATA%\datefind\config.toml`
    pub fn path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|p| p.join("datefind").join("config.toml"))
    }

    /// Load config from file. Returns default if file doesn't exist.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };

        toml::from_str(&contents).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Read value from environment variable.
    fn env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
        std::env::var(name).ok()?.parse().ok()
    }

    /// Get pivot_lookahead with precedence: env > config > default.
    pub fn pivot_lookahead(&self) -> i32 {
        Self::env_var("DATEFIND_PIVOT_LOOKAHEAD")
            .or(self.pivot_lookahead)
            .unwrap_or(DEFAULT_PIVOT_LOOKAHEAD)
    }

    /// Get reference_date with precedence: env > config. `None` means today.
    pub fn reference_date(&self) -> Option<String> {
        std::env::var("DATEFIND_REFERENCE_DATE")
            .ok()
            .or_else(|| self.reference_date.clone())
    }

    /// Get no_color with precedence: env > config > default.
    ///
    /// Respects the `NO_COLOR` standard (https://no-color.org/).
    pub fn no_color(&self) -> bool {
        if std::env::var("NO_COLOR").is_ok() {
            return true;
        }
        if std::env::var("DATEFIND_NO_COLOR").is_ok() {
            return true;
        }
        self.no_color.unwrap_or(false)
    }
}

/// Create a default config file at the standard location.
pub fn init_config() -> Result<PathBuf, String> {
    let path = Config::path().ok_or("Cannot determine config directory")?;

    if path.exists() {
        return Err(format!("Config file already exists: {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create directory: {}", e))?;
    }

    fs::write(&path, DEFAULT_CONFIG).map_err(|e| format!("Failed to write config: {}", e))?;

    Ok(path)
}
