//! Plan execution.
//! Walks the validated plan in index order, writing one report row per pair
//! and renaming only the pairs disposed `Rename` (unless dry-run).
//!
//! Notes:
//! - Each row is flushed before its rename so a later failure never hides
//!   that the rename was attempted.
//! - The destination is re-checked right before renaming; if something
//!   appeared since planning the whole run stops. Renames already done stay.

use std::io::Write;
use tracing::{info, warn};

use super::atomic::rename_in_place;
use crate::errors::{MvSedError, Result};
use crate::plan::PlannedRename;
use crate::plan::validate::lexists;
use crate::report::format_rows;
use crate::shutdown;

/// Counts for the end-of-run log line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionSummary {
    pub renamed: usize,
    pub planned_renames: usize,
    pub nops: usize,
    pub refused: usize,
}

/// Report every row to `out` and perform the renames.
pub fn execute_plan<W: Write>(
    planned: &[PlannedRename],
    dry_run: bool,
    out: &mut W,
) -> Result<ExecutionSummary> {
    let rows = format_rows(planned, dry_run);
    let mut summary = ExecutionSummary::default();

    for (entry, row) in planned.iter().zip(rows) {
        writeln!(out, "{row}")?;
        out.flush()?;

        let disposition = &entry.disposition;
        if disposition.is_refusal() {
            summary.refused += 1;
            continue;
        }
        if !disposition.is_rename() {
            summary.nops += 1;
            continue;
        }
        summary.planned_renames += 1;
        if dry_run {
            continue;
        }

        if shutdown::is_requested() {
            warn!(index = entry.index, "stopping before rename: interrupted");
            return Err(MvSedError::Interrupted);
        }
        if lexists(&entry.new) {
            return Err(MvSedError::DestinationExists(entry.new.clone()));
        }
        rename_in_place(&entry.old, &entry.new)?;
        summary.renamed += 1;
        info!(old = %entry.old.display(), new = %entry.new.display(), "renamed");
    }

    if summary.refused > 0 {
        info!(refused = summary.refused, "some renames were refused; see report");
    }
    Ok(summary)
}
