pub mod style;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// The status file written by the session hooks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub projects: Vec<ProjectStatus>,
    #[serde(with = "timestamp")]
    pub last_update: DateTime<Utc>,
}

impl Snapshot {
    /// A snapshot with no projects, stamped `now`.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            projects: Vec::new(),
            last_update: now,
        }
    }
}

/// Last reported status of one project's session.
#[derive(Debug, Deserialize, Clone)]
pub struct ProjectStatus {
    pub project: String,
    pub status: Status,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub command: Option<String>,
}

/// Session status as written by the hooks.
/// Unknown values deserialize to `Unknown` for forward-compatibility.
///
/// Variants are declared in display precedence order; `style::STYLES` is
/// indexed by discriminant.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    WaitingConfirmation,
    Executing,
    UserInput,
    Error,
    Completed,
    Idle,
    #[serde(other)]
    Unknown,
}

impl Status {
    /// Whether the session currently wants the user's eyes.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            Status::Executing | Status::WaitingConfirmation | Status::UserInput
        )
    }
}

/// Timestamps in the status file use a fixed millisecond UTC layout,
/// e.g. `2025-01-15T10:30:00.123Z`.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%3fZ";

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        NaiveDateTime::parse_from_str(raw, FORMAT).map(|naive| Utc.from_utc_datetime(&naive))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read and parse the status file. One bad record fails the whole file.
pub fn try_load(path: &Path) -> Result<Snapshot, LoadError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Load the status file, collapsing any failure to an empty snapshot.
/// The menu must always render, so the reason only goes to the debug log.
pub fn load(path: &Path, now: DateTime<Utc>) -> Snapshot {
    match try_load(path) {
        Ok(snapshot) => {
            tracing::debug!(
                path = %path.display(),
                projects = snapshot.projects.len(),
                last_update = %snapshot.last_update,
                "loaded status snapshot"
            );
            snapshot
        }
        Err(err) => {
            tracing::debug!(
                path = %path.display(),
                error = %err,
                "status file unusable, using empty snapshot"
            );
            Snapshot::empty(now)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    const WELL_FORMED: &str = r#"{
        "projects": [
            {"project": "api", "status": "executing", "timestamp": "2025-01-15T10:30:00.123Z", "command": "cargo test"},
            {"project": "web", "status": "idle", "timestamp": "2025-01-15T09:00:00.000Z"}
        ],
        "lastUpdate": "2025-01-15T10:30:00.123Z"
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot: Snapshot = serde_json::from_str(WELL_FORMED).unwrap();
        assert_eq!(snapshot.projects.len(), 2);
        assert_eq!(snapshot.projects[0].project, "api");
        assert_eq!(snapshot.projects[0].status, Status::Executing);
        assert_eq!(snapshot.projects[0].command.as_deref(), Some("cargo test"));
        assert_eq!(snapshot.projects[1].status, Status::Idle);
        assert!(snapshot.projects[1].command.is_none());
    }

    #[test]
    fn test_parse_timestamp_millis() {
        let ts = timestamp::parse("2025-01-15T10:30:00.123Z").unwrap();
        assert_eq!(ts.timestamp(), 1736937000);
        assert_eq!(ts.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn test_parse_timestamp_rejects_other_layouts() {
        assert!(timestamp::parse("2025-01-15 10:30:00").is_err());
        assert!(timestamp::parse("2025-01-15T10:30:00.123+02:00").is_err());
        assert!(timestamp::parse("yesterday").is_err());
    }

    #[test]
    fn test_parse_unknown_status() {
        let json = r#"{"project": "x", "status": "compiling", "timestamp": "2025-01-15T10:30:00.000Z"}"#;
        let record: ProjectStatus = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, Status::Unknown);
    }

    #[test]
    fn test_parse_all_known_statuses() {
        let cases = [
            ("waiting_confirmation", Status::WaitingConfirmation),
            ("executing", Status::Executing),
            ("user_input", Status::UserInput),
            ("error", Status::Error),
            ("completed", Status::Completed),
            ("idle", Status::Idle),
        ];
        for (raw, expected) in cases {
            let json = format!(
                r#"{{"project": "p", "status": "{}", "timestamp": "2025-01-15T10:30:00.000Z"}}"#,
                raw
            );
            let record: ProjectStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(record.status, expected, "status {}", raw);
        }
    }

    #[test]
    fn test_is_active() {
        assert!(Status::Executing.is_active());
        assert!(Status::WaitingConfirmation.is_active());
        assert!(Status::UserInput.is_active());
        assert!(!Status::Error.is_active());
        assert!(!Status::Completed.is_active());
        assert!(!Status::Idle.is_active());
        assert!(!Status::Unknown.is_active());
    }

    #[test]
    fn test_load_well_formed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("status-config.json");
        std::fs::write(&path, WELL_FORMED).unwrap();

        let snapshot = load(&path, fixed_now());
        assert_eq!(snapshot.projects.len(), 2);
        assert_eq!(
            snapshot.last_update,
            timestamp::parse("2025-01-15T10:30:00.123Z").unwrap()
        );
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        assert!(matches!(try_load(&path), Err(LoadError::Io(_))));
        let snapshot = load(&path, fixed_now());
        assert!(snapshot.projects.is_empty());
        assert_eq!(snapshot.last_update, fixed_now());
    }

    #[test]
    fn test_load_truncated_json_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("status-config.json");
        std::fs::write(&path, &WELL_FORMED[..WELL_FORMED.len() / 2]).unwrap();

        assert!(matches!(try_load(&path), Err(LoadError::Json(_))));
        let snapshot = load(&path, fixed_now());
        assert!(snapshot.projects.is_empty());
        assert_eq!(snapshot.last_update, fixed_now());
    }

    #[test]
    fn test_one_bad_timestamp_invalidates_whole_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("status-config.json");
        std::fs::write(
            &path,
            r#"{
                "projects": [
                    {"project": "good", "status": "idle", "timestamp": "2025-01-15T10:30:00.000Z"},
                    {"project": "bad", "status": "idle", "timestamp": "2025-01-15T10:30:00Z"}
                ],
                "lastUpdate": "2025-01-15T10:30:00.000Z"
            }"#,
        )
        .unwrap();

        assert!(try_load(&path).is_err());
        assert!(load(&path, fixed_now()).projects.is_empty());
    }

    #[test]
    fn test_missing_last_update_is_schema_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("status-config.json");
        std::fs::write(&path, r#"{"projects": []}"#).unwrap();

        assert!(matches!(try_load(&path), Err(LoadError::Json(_))));
    }
}
