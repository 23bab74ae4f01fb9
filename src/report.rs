//! Report table.
//! One row per planned pair: (disposition token, old, new), each column
//! left-aligned to its widest cell, trailing padding trimmed.

use crate::plan::{Disposition, PlannedRename};

/// Token shown for a row; renames carry `_dry_run` when nothing will be touched.
pub fn row_token(disposition: &Disposition, dry_run: bool) -> String {
    let mut token = disposition.token();
    if disposition.is_rename() && dry_run {
        token.push_str("_dry_run");
    }
    token
}

/// Format every row up front so column widths cover the whole batch.
pub fn format_rows(planned: &[PlannedRename], dry_run: bool) -> Vec<String> {
    let table: Vec<[String; 3]> = planned
        .iter()
        .map(|p| {
            [
                row_token(&p.disposition, dry_run),
                p.old.display().to_string(),
                p.new.display().to_string(),
            ]
        })
        .collect();

    let mut widths = [0usize; 3];
    for row in &table {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    table
        .iter()
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            cells.join(" ").trim_end().to_string()
        })
        .collect()
}
