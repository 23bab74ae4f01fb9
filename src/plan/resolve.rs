//! Path resolution.
//! - `resolve_path` follows symlinks and normalizes `.`/`..` for the part of a
//!   path that exists, then appends the remaining segments literally.
//! - `dedup_sources` drops later spellings of a path already seen.
//!
//! Notes:
//! - Missing components are not an error: destinations usually do not exist yet.
//! - A dangling symlink is still followed, so it resolves to its missing target.
//! - Only real query failures (permissions, loops, ...) become `Resolution` errors.

use std::collections::{HashSet, VecDeque};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

use crate::errors::{MvSedError, Result};

/// Symlinks followed in one resolution before giving up (Linux MAXSYMLINKS).
const MAX_SYMLINK_HOPS: usize = 40;

/// Errors meaning "this prefix is not there", after which segments are kept literally.
fn is_missing(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

enum Step {
    Parent,
    Name(OsString),
}

/// Queue `path`'s components ahead of whatever is still pending. A rooted
/// path restarts `resolved` from its root.
fn queue_front(path: &Path, resolved: &mut PathBuf, pending: &mut VecDeque<Step>) {
    if path.is_absolute() {
        *resolved = PathBuf::new();
    }
    let mut steps = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => steps.push(Step::Parent),
            Component::Normal(name) => steps.push(Step::Name(name.to_os_string())),
        }
    }
    for step in steps.into_iter().rev() {
        pending.push_front(step);
    }
}

/// Canonical form of `path`, tolerant of non-existent tails.
///
/// Relative paths are taken against the current directory. Components are
/// walked left to right; each symlink met is replaced by its target, even
/// when that target does not exist. `..` pops the resolved prefix, so it
/// applies after symlinks are followed.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    let fail = |source: io::Error| MvSedError::Resolution {
        path: path.to_path_buf(),
        source,
    };
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().map_err(fail)?.join(path)
    };

    let mut resolved = PathBuf::new();
    let mut pending = VecDeque::new();
    queue_front(&absolute, &mut resolved, &mut pending);

    let mut hops = 0;
    while let Some(step) = pending.pop_front() {
        let name = match step {
            Step::Parent => {
                resolved.pop();
                continue;
            }
            Step::Name(name) => name,
        };
        let candidate = resolved.join(&name);
        match fs::symlink_metadata(&candidate) {
            Ok(meta) if meta.file_type().is_symlink() => {
                hops += 1;
                if hops > MAX_SYMLINK_HOPS {
                    return Err(fail(io::Error::other("too many levels of symbolic links")));
                }
                let target = fs::read_link(&candidate).map_err(fail)?;
                trace!(link = %candidate.display(), target = %target.display(), "following symlink");
                // a relative target is taken from the link's own directory
                queue_front(&target, &mut resolved, &mut pending);
            }
            Ok(_) => resolved = candidate,
            Err(e) if is_missing(&e) => resolved = candidate,
            Err(source) => return Err(fail(source)),
        }
    }
    Ok(resolved)
}

/// Drop inputs that resolve to an already-seen location, keeping first-seen order
/// and the caller's original spelling.
pub fn dedup_sources(files: &[String]) -> Result<Vec<String>> {
    let mut seen: HashSet<PathBuf> = HashSet::with_capacity(files.len());
    let mut unique = Vec::with_capacity(files.len());
    for file in files {
        let real = resolve_path(Path::new(file))?;
        if seen.insert(real) {
            unique.push(file.clone());
        } else {
            debug!(path = %file, "dropping duplicate input");
        }
    }
    Ok(unique)
}
