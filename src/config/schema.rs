use std::path::PathBuf;

use serde::Deserialize;

/// User-configurable settings from `config.toml`.
/// Missing file is not an error -- every field is optional.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BarConfig {
    /// Status file written by the session hooks.
    /// Default: "~/.claude-swift/status-config.json"
    pub status_file: Option<PathBuf>,

    /// Directory containing `status-updater.sh`.
    /// Default: "~/wonderland/claude-swift/scripts"
    pub scripts_dir: Option<PathBuf>,
}
