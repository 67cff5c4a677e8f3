pub mod render;

use std::path::PathBuf;

use clap::Parser;

/// Render agent session status as a SwiftBar menu
#[derive(Parser)]
#[command(name = "session-bar", version, about, long_about = None)]
pub struct Cli {
    /// Status file to read (default: ~/.claude-swift/status-config.json)
    #[arg(long, value_name = "PATH")]
    pub status_file: Option<PathBuf>,

    /// Directory containing status-updater.sh (default: ~/wonderland/claude-swift/scripts)
    #[arg(long, value_name = "PATH")]
    pub scripts_dir: Option<PathBuf>,

    /// Logging verbosity for stderr: off, error, warn, info, debug.
    #[arg(long)]
    pub log_level: Option<String>,
}
