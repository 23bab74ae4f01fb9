//! Typed error definitions for mv_sed.
//! Only whole-run failures live here; per-pair problems are reported as
//! dispositions in the plan and never surface as errors.
//! Variants wrapping an io::Error keep it as `source`; print with `{:#}`
//! (anyhow) to see the whole chain.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MvSedError {
    #[error("unknown transformation '{name}' (known: {known})")]
    UnknownTransform { name: String, known: String },

    #[error("invalid configuration for transformation '{name}': {reason}")]
    InvalidTransformConfig { name: String, reason: String },

    #[error("malformed transformation argument: {0}")]
    MalformedArgument(String),

    #[error("failed to run {program}")]
    TransformSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    TransformFailed { program: String, status: String },

    #[error("transformation output is not valid UTF-8: {0}")]
    TransformOutput(String),

    #[error("cannot resolve {}", path.display())]
    Resolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("destination already exists: '{}'", .0.display())]
    DestinationExists(PathBuf),

    #[error("{0}")]
    RenameFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl MvSedError {
    /// Short stable identifier, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            MvSedError::UnknownTransform { .. } => "unknown_transform",
            MvSedError::InvalidTransformConfig { .. } => "invalid_transform_config",
            MvSedError::MalformedArgument(_) => "malformed_argument",
            MvSedError::TransformSpawn { .. } => "transform_spawn",
            MvSedError::TransformFailed { .. } => "transform_failed",
            MvSedError::TransformOutput(_) => "transform_output",
            MvSedError::Resolution { .. } => "resolution",
            MvSedError::DestinationExists(_) => "destination_exists",
            MvSedError::RenameFailed(_) => "rename_failed",
            MvSedError::Io(_) => "io",
            MvSedError::Interrupted => "interrupted",
        }
    }
}

pub type Result<T> = std::result::Result<T, MvSedError>;
