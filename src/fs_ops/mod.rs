//! Filesystem operations: executing a validated rename plan.

mod atomic;
mod execute;
mod helpers;

pub use atomic::rename_in_place;
pub use execute::{ExecutionSummary, execute_plan};
pub use helpers::io_error_with_help;
