//! Core library for `mv_sed`.
//!
//! Renames a batch of files through a path transformation. The interesting
//! part is the planner: every (source, destination) pair gets a disposition
//! before anything on disk is touched, and destinations that collide with
//! each other (directly, through an ancestor, or through a chain of such
//! collisions) are refused instead of being renamed in some lucky order.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod plan;
pub mod report;
pub mod shutdown;
pub mod transform;

pub use config::{Config, LogLevel, path_has_symlink_ancestor};
pub use errors::MvSedError;
pub use fs_ops::{ExecutionSummary, execute_plan};
pub use plan::{
    ConflictMap, Disposition, PlannedRename, dedup_sources, find_conflicting_paths, plan_renames,
    resolve_path,
};
pub use transform::{Transform, TransformRegistry, Transformation};
