//! Tracing initialization.
//! Builds a subscriber with EnvFilter, supports compact or JSON formats, and optional file logging.
//!
//! Behavior:
//! - Log level is driven by LogLevel (no RUST_LOG override here).
//! - Console logs go to stderr; stdout is reserved for the report table.
//! - If `log_file` is provided and passes safety checks, a non-blocking file layer is added.
//!
//! Implementation notes:
//! - File logging uses tracing_appender::non_blocking to avoid blocking on I/O.
//! - We refuse file logging if any ancestor of the file path is a symlink.

use anyhow::Result;
use chrono::Local;
use mv_sed::output as out;
use mv_sed::{LogLevel, path_has_symlink_ancestor};
use std::fmt as stdfmt;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> stdfmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%d/%m/%y %H:%M:%S"))
    }
}

#[inline]
fn to_level_filter(lvl: &LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

#[inline]
fn env_filter_from_level(level_filter: LevelFilter) -> EnvFilter {
    let level_str = match level_filter {
        LevelFilter::ERROR => "error",
        LevelFilter::WARN => "warn",
        LevelFilter::INFO => "info",
        LevelFilter::DEBUG => "debug",
        LevelFilter::TRACE => "trace",
        _ => "warn",
    };
    EnvFilter::new(level_str)
}

fn open_append(path: &Path) -> io::Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut opts = OpenOptions::new();
    opts.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    opts.open(path)
}

/// Try to open a non-blocking file writer for logging:
/// - Refuse if any ancestor is a symlink (prints a warning and returns None)
/// - Best-effort create parent directory
/// - Open file for append and wrap with non_blocking
fn maybe_open_non_blocking_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(true) => {
            out::print_warn(&format!(
                "refusing file logging: an ancestor of {} is a symlink",
                path.display()
            ));
            return None;
        }
        Err(e) => {
            out::print_warn(&format!(
                "cannot check log path {} for symlinks: {}",
                path.display(),
                e
            ));
            return None;
        }
        Ok(false) => {}
    }

    match open_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            out::print_warn(&format!("cannot open log file {}: {}", path.display(), e));
            None
        }
    }
}

/// Initialize tracing based on LogLevel and format. Returns an optional WorkerGuard
/// if a file appender is created (must be held until shutdown to flush logs).
pub fn init_tracing(
    lvl: &LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let env_filter = env_filter_from_level(to_level_filter(lvl));

    // Optional file layer
    if let Some(path) = log_file {
        if let Some((writer, guard)) = maybe_open_non_blocking_writer(path) {
            if json {
                let stderr_layer = tsfmt::layer()
                    .event_format(tsfmt::format().json())
                    .with_timer(LocalHumanTime)
                    .with_level(true)
                    .with_target(true)
                    .with_writer(io::stderr);
                let file_layer = tsfmt::layer()
                    .event_format(tsfmt::format().json())
                    .with_timer(LocalHumanTime)
                    .with_level(true)
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(writer);
                registry()
                    .with(env_filter)
                    .with(stderr_layer)
                    .with(file_layer)
                    .try_init()?;
            } else {
                let stderr_layer = tsfmt::layer()
                    .with_timer(LocalHumanTime)
                    .with_level(true)
                    .with_target(true)
                    .compact()
                    .with_writer(io::stderr);
                let file_layer = tsfmt::layer()
                    .with_timer(LocalHumanTime)
                    .with_level(true)
                    .with_target(true)
                    .with_ansi(false)
                    .compact()
                    .with_writer(writer);
                registry()
                    .with(env_filter)
                    .with(stderr_layer)
                    .with(file_layer)
                    .try_init()?;
            }
            return Ok(Some(guard));
        }
        out::print_warn(&format!(
            "file logging to '{}' was not enabled; logs continue on stderr",
            path.display()
        ));
    }

    // No file layer (either not requested or refused/failed)
    if json {
        let stderr_layer = tsfmt::layer()
            .event_format(tsfmt::format().json())
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(true)
            .with_writer(io::stderr);
        registry().with(env_filter).with(stderr_layer).try_init()?;
    } else {
        let stderr_layer = tsfmt::layer()
            .with_timer(LocalHumanTime)
            .with_level(true)
            .with_target(true)
            .compact()
            .with_writer(io::stderr);
        registry().with(env_filter).with(stderr_layer).try_init()?;
    }
    Ok(None)
}
