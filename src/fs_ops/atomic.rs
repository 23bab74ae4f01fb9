//! Rename helper.
//! - Performs a plain rename (no copy fallback, no overwrite).
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::path::Path;

use super::helpers::io_error_with_help;
use crate::errors::Result;

pub fn rename_in_place(src: &Path, dst: &Path) -> Result<()> {
    fs::rename(src, dst).map_err(io_error_with_help("rename", src, dst))?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // Ignore fsync errors to avoid turning a successful rename into a failure.
        let target = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        let _ = fsync_dir(target);
    }

    Ok(())
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> std::io::Result<()> {
    fs::File::open(dir)?.sync_all()
}
