use std::path::Path;

use chrono::{DateTime, Utc};
use unicode_segmentation::UnicodeSegmentation;

/// Truncate `name` to at most `limit` user-visible characters (grapheme
/// clusters), replacing the last kept one with an ellipsis when anything
/// is cut.
pub fn truncate_name(name: &str, limit: usize) -> String {
    if name.graphemes(true).count() <= limit {
        return name.to_string();
    }
    let mut out: String = name
        .graphemes(true)
        .take(limit.saturating_sub(1))
        .collect();
    out.push('\u{2026}');
    out
}

/// Keep the first `limit` grapheme clusters, no ellipsis.
pub fn truncate_command(command: &str, limit: usize) -> String {
    command.graphemes(true).take(limit).collect()
}

/// Format the age of `timestamp` relative to `now` (e.g. "5m ago").
/// Whole units, truncated. Timestamps in the future read as "Just now".
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_elapsed(now.signed_duration_since(timestamp).num_seconds())
}

fn format_elapsed(seconds: i64) -> String {
    if seconds < 60 {
        "Just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h ago", seconds / 3600)
    } else {
        format!("{}d ago", seconds / 86400)
    }
}

/// Escape spaces so the host passes the path as a single `paramN` value.
pub fn escape_spaces(path: &Path) -> String {
    path.display().to_string().replace(' ', "\\ ")
}
