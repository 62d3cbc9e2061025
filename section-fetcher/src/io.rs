use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::warn;

use crate::{Error, Result};

/// Creates every missing directory above `path`.
pub fn ensure_parent_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path_ref = path.as_ref();
    match path_ref.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| Error::filesystem(parent, e))
        }
        _ => Ok(()),
    }
}

/// Removes `path` if it is an empty directory.
///
/// Best-effort: a missing directory counts as removed, a non-empty one or any
/// other failure is logged and reported as `false`.
pub fn remove_empty_dir<P: AsRef<Path>>(path: P) -> bool {
    let path_ref = path.as_ref();
    let is_empty = match fs::read_dir(path_ref) {
        Ok(mut entries) => entries.next().is_none(),
        Err(e) if e.kind() == ErrorKind::NotFound => return true,
        Err(e) => {
            warn!("Could not inspect directory {}: {}", path_ref.display(), e);
            return false;
        }
    };
    if !is_empty {
        warn!(
            "Leaving directory {} in place, it is not empty",
            path_ref.display()
        );
        return false;
    }

    match fs::remove_dir(path_ref) {
        Ok(()) => true,
        Err(e) if e.kind() == ErrorKind::NotFound => true,
        Err(e) => {
            warn!("Failed to remove directory {}: {}", path_ref.display(), e);
            false
        }
    }
}

/// Removes a file that must not outlive a failed download. Best-effort.
pub fn remove_file_quietly<P: AsRef<Path>>(path: P) {
    let path_ref = path.as_ref();
    if let Err(e) = fs::remove_file(path_ref) {
        if e.kind() != ErrorKind::NotFound {
            warn!("Failed to remove file {}: {}", path_ref.display(), e);
        }
    }
}
