use std::io::Write;
use std::panic::{self, AssertUnwindSafe};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::cli::Cli;
use crate::config;
use crate::menu::{self, RenderContext};
use crate::status::{self, Snapshot};

/// Entry point. Runs `run_inner` with panics caught and silenced so the
/// host always gets a parseable menu and the process always exits 0.
pub fn run(cli: Cli) -> Result<()> {
    let now = Utc::now();

    match catch_silently(|| run_inner(cli, now)) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            tracing::debug!(error = %err, "render failed, printing empty menu");
            print_fallback(now);
        }
        Err(_) => print_fallback(now),
    }
    Ok(())
}

fn run_inner(cli: Cli, now: DateTime<Utc>) -> Result<()> {
    init_logging(cli.log_level.as_deref());

    let config = config::load();
    let paths = config::resolve(cli.status_file, cli.scripts_dir, config)?;

    let snapshot = status::load(&paths.status_file, now);

    let ctx = RenderContext {
        now,
        status_file: paths.status_file,
        scripts_dir: paths.scripts_dir,
    };
    let text = menu::render(&snapshot, &ctx);

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .context("failed to write menu to stdout")?;
    stdout.flush()?;

    Ok(())
}

/// Run `f`, catching any panic. The default hook is swapped for one that
/// only logs at debug level, then restored.
fn catch_silently<T>(f: impl FnOnce() -> T) -> std::thread::Result<T> {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        tracing::debug!(panic = %info, "render panicked");
    }));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    panic::set_hook(previous);
    result
}

/// The empty-snapshot menu with built-in paths.
fn fallback_menu(now: DateTime<Utc>) -> String {
    let paths = config::default_paths();
    let ctx = RenderContext {
        now,
        status_file: paths.status_file,
        scripts_dir: paths.scripts_dir,
    };
    menu::render(&Snapshot::empty(now), &ctx)
}

fn print_fallback(now: DateTime<Utc>) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(fallback_menu(now).as_bytes());
    let _ = stdout.flush();
}

/// Install a stderr subscriber. Logging is off unless asked for, since the
/// host treats any output as part of the plugin's result.
fn init_logging(level: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(level))
        .try_init();
}

fn log_filter(level: Option<&str>) -> &'static str {
    match level.unwrap_or("off") {
        "off" => "off",
        "error" => "error",
        "warn" => "warn",
        "info" => "info",
        "debug" => "debug",
        other => {
            eprintln!("warning: unknown log level '{}', defaulting to 'off'", other);
            "off"
        }
    }
}
