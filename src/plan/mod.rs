//! Mass-rename planning: resolve destinations, detect conflicts, validate.

pub mod conflict;
pub mod resolve;
pub mod validate;

pub use conflict::{CauseTable, ConflictMap, find_conflicting_paths};
pub use resolve::{dedup_sources, resolve_path};
pub use validate::{Disposition, PlannedRename, plan_renames};
