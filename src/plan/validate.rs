//! Rename plan validation.
//! Assigns exactly one `Disposition` to every pair without touching the
//! filesystem beyond read-only queries. The literal spellings are kept for
//! reporting; checks on the destination use its resolved form.

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::conflict::{ConflictMap, find_conflicting_paths};
use super::resolve::resolve_path;
use crate::errors::Result;

/// Outcome for one (source, destination) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Source and destination are spelled the same.
    Nop,
    /// Safe to rename; the only disposition that mutates anything.
    Rename,
    SourceNotExist,
    DestParentNotExist,
    DestParentNotDir,
    DestExists,
    /// Destination collides with the one at `cause_index`, shown literally as `cause`.
    DestConflict { cause_index: usize, cause: PathBuf },
    /// More sources than destinations: this source got nothing.
    DestNotSet,
    /// More destinations than sources: this destination has no source.
    SourceNotSet,
}

impl Disposition {
    /// Lowercase report token, e.g. `dest_exists` or `dest_conflict:<path>`.
    pub fn token(&self) -> String {
        match self {
            Disposition::Nop => "nop".into(),
            Disposition::Rename => "rename".into(),
            Disposition::SourceNotExist => "source_not_exist".into(),
            Disposition::DestParentNotExist => "dest_parent_not_exist".into(),
            Disposition::DestParentNotDir => "dest_parent_not_dir".into(),
            Disposition::DestExists => "dest_exists".into(),
            Disposition::DestConflict { cause, .. } => {
                format!("dest_conflict:{}", cause.display())
            }
            Disposition::DestNotSet => "dest_not_set".into(),
            Disposition::SourceNotSet => "source_not_set".into(),
        }
    }

    pub fn is_rename(&self) -> bool {
        matches!(self, Disposition::Rename)
    }

    /// Anything that is neither a rename nor a harmless no-op.
    pub fn is_refusal(&self) -> bool {
        !matches!(self, Disposition::Rename | Disposition::Nop)
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// One validated row of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRename {
    pub index: usize,
    pub disposition: Disposition,
    pub old: PathBuf,
    pub new: PathBuf,
}

/// Existence without following a final symlink; a dangling link exists.
pub(crate) fn lexists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Lexical equality ignoring `.` segments (`./a` and `a` are the same
/// spelling); `..` and symlinks are deliberately not interpreted.
fn same_spelling<'p>(a: &'p Path, b: &'p Path) -> bool {
    fn strip(p: &Path) -> impl Iterator<Item = Component<'_>> {
        p.components().filter(|c| !matches!(c, Component::CurDir))
    }
    strip(a).eq(strip(b))
}

/// Resolve every destination, then validate. Fails only if resolution does.
pub fn plan_renames(olds: &[PathBuf], news: &[PathBuf]) -> Result<Vec<PlannedRename>> {
    let reals = news
        .iter()
        .map(|new| resolve_path(new))
        .collect::<Result<Vec<_>>>()?;
    Ok(validate_mass_rename(olds, news, &reals))
}

/// Assign a disposition to every pair.
///
/// `reals[i]` is the resolved form of `news[i]`; `plan_renames` is the only
/// caller and builds both from the same list. Pairs past the shorter list
/// become `DestNotSet`/`SourceNotSet` rows.
pub(crate) fn validate_mass_rename(
    olds: &[PathBuf],
    news: &[PathBuf],
    reals: &[PathBuf],
) -> Vec<PlannedRename> {
    debug_assert_eq!(news.len(), reals.len());
    let conflicts = find_conflicting_paths(reals);
    let mut planned = Vec::with_capacity(olds.len().max(news.len()));

    for (i, ((old, new), real)) in olds.iter().zip(news).zip(reals).enumerate() {
        let disposition = disposition_for(i, old, new, real, news, &conflicts);
        debug!(index = i, old = %old.display(), new = %new.display(), %disposition, "planned");
        planned.push(PlannedRename {
            index: i,
            disposition,
            old: old.clone(),
            new: new.clone(),
        });
    }

    let paired = olds.len().min(news.len());
    for (offset, old) in olds.iter().enumerate().skip(paired) {
        planned.push(PlannedRename {
            index: offset,
            disposition: Disposition::DestNotSet,
            old: old.clone(),
            new: old.clone(),
        });
    }
    for (offset, new) in news.iter().enumerate().skip(paired) {
        planned.push(PlannedRename {
            index: offset,
            disposition: Disposition::SourceNotSet,
            old: new.clone(),
            new: new.clone(),
        });
    }
    planned
}

// First matching rule wins; several can hold at once.
fn disposition_for(
    i: usize,
    old: &Path,
    new: &Path,
    real: &Path,
    news: &[PathBuf],
    conflicts: &ConflictMap,
) -> Disposition {
    if let Some(cause_index) = conflicts.cause_of(i) {
        return Disposition::DestConflict {
            cause_index,
            cause: news[cause_index].clone(),
        };
    }
    if !lexists(old) {
        return Disposition::SourceNotExist;
    }
    if same_spelling(old, new) {
        return Disposition::Nop;
    }
    let real_parent = real.parent().unwrap_or(real);
    if !real_parent.exists() {
        return Disposition::DestParentNotExist;
    }
    if !real_parent.is_dir() {
        return Disposition::DestParentNotDir;
    }
    // A symlink at the destination resolves to its target, which may be
    // missing; the link itself still occupies the name.
    if lexists(real) || lexists(new) {
        return Disposition::DestExists;
    }
    Disposition::Rename
}
