//! SwiftBar menu rendering.
//!
//! Output is the plugin line protocol: the first line is the menu-bar
//! title, `---` starts a dropdown section, a `--` prefix nests an item
//! under the previous one, and `| key=value` attaches metadata.

pub mod format;

use std::cmp::Ordering;
use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::status::style::SLEEP_GLYPH;
use crate::status::{ProjectStatus, Snapshot};
use format::{escape_spaces, time_ago, truncate_command, truncate_name};

/// Most projects named in the menu-bar title.
const MAX_HEADER_PROJECTS: usize = 3;
const HEADER_NAME_LIMIT: usize = 12;
const COMMAND_LIMIT: usize = 50;

const SEPARATOR: &str = "---";
const EMPTY_PLACEHOLDER: &str = "No Claude Sessions | color=gray";
const UPDATER_SCRIPT: &str = "status-updater.sh";

/// Lists session processes while leaving out the desktop app and grep itself.
const PROCESS_TEST_COMMAND: &str =
    r#"/bin/bash -c 'ps aux | grep -E " claude$|/claude$" | grep -v "Claude.app" | grep -v grep'"#;

/// Everything rendering needs besides the snapshot.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub now: DateTime<Utc>,
    /// Opened by the "Open Config" action.
    pub status_file: PathBuf,
    /// Directory containing the status updater script.
    pub scripts_dir: PathBuf,
}

/// Render the full menu. Every line, including the last, ends in `\n`.
pub fn render(snapshot: &Snapshot, ctx: &RenderContext) -> String {
    let epoch_secs = ctx.now.timestamp();
    let mut out = String::with_capacity(512 + snapshot.projects.len() * 256);

    let _ = writeln!(out, "{}", render_header(&snapshot.projects, epoch_secs));
    let _ = writeln!(out, "{}", SEPARATOR);

    if snapshot.projects.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_PLACEHOLDER);
    } else {
        for project in by_precedence(snapshot.projects.iter()) {
            render_project(&mut out, project, ctx, epoch_secs);
        }
    }

    let _ = writeln!(out, "{}", SEPARATOR);
    render_actions(&mut out, &ctx.status_file);

    out
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Status priority first, then most recently updated.
fn precedence(a: &ProjectStatus, b: &ProjectStatus) -> Ordering {
    a.status
        .priority()
        .cmp(&b.status.priority())
        .then_with(|| b.timestamp.cmp(&a.timestamp))
}

fn by_precedence<'a>(projects: impl Iterator<Item = &'a ProjectStatus>) -> Vec<&'a ProjectStatus> {
    let mut sorted: Vec<&ProjectStatus> = projects.collect();
    sorted.sort_by(|a, b| precedence(a, b));
    sorted
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Menu-bar title: up to three active sessions, most urgent first, or a
/// sleep glyph when nothing is active.
fn render_header(projects: &[ProjectStatus], epoch_secs: i64) -> String {
    let active = by_precedence(projects.iter().filter(|p| p.status.is_active()));
    if active.is_empty() {
        return SLEEP_GLYPH.to_string();
    }

    let mut items: Vec<String> = active
        .iter()
        .take(MAX_HEADER_PROJECTS)
        .map(|p| {
            format!(
                "{}{}",
                p.status.icon(epoch_secs),
                truncate_name(&p.project, HEADER_NAME_LIMIT)
            )
        })
        .collect();

    if active.len() > MAX_HEADER_PROJECTS {
        items.push(format!("+{}", active.len() - MAX_HEADER_PROJECTS));
    }

    items.join(" ")
}

/// One submenu per project with status details and per-project actions.
fn render_project(out: &mut String, project: &ProjectStatus, ctx: &RenderContext, epoch_secs: i64) {
    let status = project.status;

    let _ = writeln!(
        out,
        "{} {} | submenu=true",
        status.icon(epoch_secs),
        project.project
    );
    let _ = writeln!(out, "--Status: {} | color={}", status.label(), status.color());
    let _ = writeln!(out, "--Updated: {}", time_ago(project.timestamp, ctx.now));

    if let Some(command) = &project.command {
        let _ = writeln!(
            out,
            "--Info: {} | color=gray font=Monaco",
            truncate_command(command, COMMAND_LIMIT)
        );
    }

    let _ = writeln!(out, "--{}", SEPARATOR);
    let _ = writeln!(out, "--\u{1F504} Refresh | refresh=true");
    let _ = writeln!(
        out,
        "--Mark Completed | bash={}",
        updater_command(&ctx.scripts_dir, "completed", &project.project)
    );
    let _ = writeln!(
        out,
        "--Mark Idle | bash={}",
        updater_command(&ctx.scripts_dir, "idle", &project.project)
    );
}

fn render_actions(out: &mut String, status_file: &Path) {
    let _ = writeln!(out, "\u{1F504} Refresh All | refresh=true");
    let _ = writeln!(
        out,
        "\u{2699}\u{FE0F} Open Config | bash=open param1={}",
        escape_spaces(status_file)
    );
    let _ = writeln!(
        out,
        "\u{1F4CA} Process Detection Test | bash={}",
        PROCESS_TEST_COMMAND
    );
}

/// Shell command that sets `project` to `status` via the updater script.
/// Emitted for the host to run on click; never executed here.
fn updater_command(scripts_dir: &Path, status: &str, project: &str) -> String {
    format!(
        "{} {} \"{}\"",
        scripts_dir.join(UPDATER_SCRIPT).display(),
        status,
        project
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
