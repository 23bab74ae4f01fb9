//! Config module.
//! Provides the runtime configuration type, log levels, environment
//! overrides and the log-path safety check.

mod env;
pub mod paths;
pub mod types;

pub use env::{ENV_LOG_FILE, ENV_LOG_LEVEL, ENV_TRANSFORM, apply_env_overrides};
pub use paths::path_has_symlink_ancestor;
pub use types::{Config, LogLevel};

/// Transformation used when neither the CLI nor the environment picks one:
/// pipe the paths through `sed <ARG>`.
pub const DEFAULT_TRANSFORM: &str = "command:sed";
