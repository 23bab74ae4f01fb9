//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - Flags override environment values, which override defaults.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Rename every FILE through a transformation.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Rename files using a path transformation, refusing unsafe renames"
)]
pub struct Args {
    /// Don't actually rename anything; report what would happen.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Transformation selector: `command[:PROGRAM ARGS...]` or `substitute`.
    #[arg(short = 't', long = "transform", value_name = "SELECTOR")]
    pub transform: Option<String>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Transformation argument (e.g. a sed script).
    #[arg(value_name = "ARG", allow_hyphen_values = true)]
    pub arg: String,

    /// Files to rename.
    #[arg(value_name = "FILE", required = true, num_args = 1.., value_hint = ValueHint::AnyPath)]
    pub files: Vec<String>,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(selector) = &self.transform {
            cfg.transform = selector.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(path) = &self.log_file {
            cfg.log_file = Some(path.clone());
        }
        if self.json {
            cfg.json_logs = true;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
