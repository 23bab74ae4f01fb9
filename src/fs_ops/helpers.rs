//! I/O helper utilities.
//!
//! Enriches a failed rename's io::Error with both paths and an actionable
//! hint so the single fatal line tells the user what to fix.
//!
//! Usage:
//!   fs::rename(src, dst).map_err(io_error_with_help("rename", src, dst))?;

use std::io;
use std::path::Path;

use crate::errors::MvSedError;

/// Format a human-friendly message with op/paths plus platform-aware hints.
fn build_message(op: &str, src: &Path, dst: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}' -> '{}': {}", op, src.display(), dst.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" (permission denied; check ownership and write permissions)");
                }
                libc::EXDEV => {
                    msg.push_str(" (cross-device; rename cannot move between filesystems)");
                }
                libc::EBUSY => {
                    msg.push_str(" (resource busy; ensure no other process is using it)");
                }
                libc::ENOENT => {
                    msg.push_str(" (path not found; it may have been removed after planning)");
                }
                libc::ENOTEMPTY | libc::EEXIST => {
                    msg.push_str(" (destination appeared after planning)");
                }
                libc::EROFS => {
                    msg.push_str(" (read-only filesystem)");
                }
                libc::EINVAL => {
                    msg.push_str(" (cannot move a directory into itself)");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" (filename or path too long)");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" (access denied; check permissions)"),
                17 => msg.push_str(" (not same device; cross-filesystem rename)"),
                32 => msg.push_str(" (sharing violation; file is in use)"),
                2 | 3 => msg.push_str(" (path not found)"),
                80 | 183 => msg.push_str(" (destination appeared after planning)"),
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" (permission denied; check ownership and write permissions)");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" (path not found; it may have been removed after planning)");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" (destination appeared after planning)");
            }
            _ => {}
        }
    }

    msg
}

/// Returns a closure suitable for `.map_err(...)` on a two-path operation.
pub fn io_error_with_help<'a>(
    op: &'a str,
    src: &'a Path,
    dst: &'a Path,
) -> impl FnOnce(io::Error) -> MvSedError + 'a {
    move |e: io::Error| MvSedError::RenameFailed(build_message(op, src, dst, &e))
}
