//! Environment overrides.
//! Applied on top of defaults and below CLI flags. Values that fail to parse
//! are skipped and reported back so the caller can warn once logging is up.

use std::env;
use std::path::PathBuf;

use super::types::{Config, LogLevel};

pub const ENV_LOG_LEVEL: &str = "MV_SED_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "MV_SED_LOG_FILE";
pub const ENV_TRANSFORM: &str = "MV_SED_TRANSFORM";

/// Apply `MV_SED_*` variables from the process environment.
pub fn apply_env_overrides(cfg: &mut Config) -> Vec<String> {
    apply_overrides_from(cfg, |key| env::var(key).ok())
}

fn apply_overrides_from<F>(cfg: &mut Config, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut warnings = Vec::new();

    if let Some(raw) = lookup(ENV_LOG_LEVEL) {
        match LogLevel::parse(&raw) {
            Some(level) => cfg.log_level = level,
            None => warnings.push(format!("ignoring {ENV_LOG_LEVEL}: invalid log level '{raw}'")),
        }
    }

    if let Some(raw) = lookup(ENV_LOG_FILE) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            warnings.push(format!("ignoring {ENV_LOG_FILE}: empty path"));
        } else {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }

    if let Some(raw) = lookup(ENV_TRANSFORM) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            warnings.push(format!("ignoring {ENV_TRANSFORM}: empty selector"));
        } else {
            cfg.transform = trimmed.to_string();
        }
    }

    warnings
}
