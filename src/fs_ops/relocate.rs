//! Best-effort in-place rename.
//!
//! The file stays in its directory and only its name changes. An existing
//! target is never overwritten. Any failure leaves the file where it was and
//! hands the original path back so the caller can still notify with it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::errors::ImportError;

use super::helpers::describe_io_error;

/// Result of a rename attempt; always carries a usable path.
#[derive(Debug)]
pub enum Relocation {
    /// New name equals the old one (ignoring case); nothing was done.
    Unchanged(PathBuf),
    Renamed(PathBuf),
    /// The rename failed; the file is still at `original`.
    Failed { original: PathBuf, error: ImportError },
}

impl Relocation {
    /// Where the file is now.
    pub fn path(&self) -> &Path {
        match self {
            Relocation::Unchanged(p) | Relocation::Renamed(p) => p,
            Relocation::Failed { original, .. } => original,
        }
    }

    pub fn into_path(self) -> PathBuf {
        match self {
            Relocation::Unchanged(p) | Relocation::Renamed(p) => p,
            Relocation::Failed { original, .. } => original,
        }
    }
}

/// Rename `src` to `new_name` within the same directory, never clobbering.
pub fn relocate(src: &Path, new_name: &str) -> Relocation {
    let old_name = src
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if old_name.to_lowercase() == new_name.to_lowercase() {
        return Relocation::Unchanged(src.to_path_buf());
    }

    let dest = src.with_file_name(new_name);
    info!("Transforming file '{old_name}' to '{new_name}'");

    match rename_no_clobber(src, &dest) {
        Ok(()) => Relocation::Renamed(dest),
        Err(e) => {
            let err = ImportError::RenameFailed {
                path: src.to_path_buf(),
                reason: describe_io_error("rename", &dest, &e),
            };
            error!(code = err.code(), kind = err.kind(), "{err}");
            Relocation::Failed {
                original: src.to_path_buf(),
                error: err,
            }
        }
    }
}

/// Move `src` to `dst`, failing with `AlreadyExists` if `dst` is taken.
///
/// A hard link claims the destination atomically (link(2) refuses existing
/// names); the source name is then unlinked. Filesystems without hard links
/// fall back to an existence check followed by rename.
fn rename_no_clobber(src: &Path, dst: &Path) -> io::Result<()> {
    if fs::symlink_metadata(dst).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "destination already exists",
        ));
    }
    match fs::hard_link(src, dst) {
        Ok(()) => {
            if let Err(e) = fs::remove_file(src) {
                let _ = fs::remove_file(dst);
                return Err(e);
            }
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Err(e),
        Err(_) => fs::rename(src, dst)?,
    }
    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // Best-effort durability of the directory entry change.
        let _ = fs::File::open(parent).and_then(|d| d.sync_all());
    }
    Ok(())
}
