//! Log path safety check.

use std::fs;
use std::io;
use std::path::Path;

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.as_os_str().is_empty() {
            break;
        }
        if let Ok(meta) = fs::symlink_metadata(anc) {
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
