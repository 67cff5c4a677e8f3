pub mod schema;

use std::path::{Path, PathBuf};

use anyhow::Result;

pub use schema::BarConfig;

/// Points at an alternative config file (used by tests).
pub const CONFIG_ENV: &str = "SESSION_BAR_CONFIG";

/// Paths the renderer works with after flags, config and defaults are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Paths {
    pub status_file: PathBuf,
    pub scripts_dir: PathBuf,
}

/// Load the TOML config.
/// Checks `SESSION_BAR_CONFIG` first, then falls back to
/// `~/.config/session-bar/config.toml` (platform-appropriate).
/// Returns the default config if the file is missing or unparseable.
pub fn load() -> BarConfig {
    let config_path = std::env::var(CONFIG_ENV)
        .ok()
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|d| d.join("session-bar").join("config.toml")));

    match config_path {
        Some(path) => load_from(&path),
        None => BarConfig::default(),
    }
}

/// Read one config file, silently defaulting on any failure.
pub fn load_from(path: &Path) -> BarConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
            tracing::debug!(path = %path.display(), error = %err, "ignoring malformed config");
            BarConfig::default()
        }),
        Err(_) => BarConfig::default(),
    }
}

/// Merge CLI overrides over config values over home-relative defaults.
pub fn resolve(
    status_file: Option<PathBuf>,
    scripts_dir: Option<PathBuf>,
    config: BarConfig,
) -> Result<Paths> {
    let status_file = match status_file.or(config.status_file) {
        Some(path) => path,
        None => default_status_file(&home_dir()?),
    };
    let scripts_dir = match scripts_dir.or(config.scripts_dir) {
        Some(path) => path,
        None => default_scripts_dir(&home_dir()?),
    };

    tracing::debug!(
        status_file = %status_file.display(),
        scripts_dir = %scripts_dir.display(),
        "resolved paths"
    );

    Ok(Paths {
        status_file,
        scripts_dir,
    })
}

/// Built-in paths, ignoring flags and config. Relative to the working
/// directory when no home directory is known.
pub fn default_paths() -> Paths {
    let home = dirs::home_dir().unwrap_or_default();
    Paths {
        status_file: default_status_file(&home),
        scripts_dir: default_scripts_dir(&home),
    }
}

pub fn default_status_file(home: &Path) -> PathBuf {
    home.join(".claude-swift").join("status-config.json")
}

pub fn default_scripts_dir(home: &Path) -> PathBuf {
    home.join("wonderland").join("claude-swift").join("scripts")
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("could not determine home directory"))
}
