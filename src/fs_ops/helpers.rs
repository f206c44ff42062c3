//! I/O error descriptions.
//!
//! Turns an `io::Error` into a one-line reason with an actionable hint, used
//! as the `reason` of rename/trim failures so logs say what to fix.
//!
//! Usage:
//!   fs::remove_file(p).map_err(|e| describe_io_error("delete file", p, &e))

use std::io;
use std::path::Path;

fn hint_for(e: &io::Error) -> Option<&'static str> {
    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::EBUSY | libc::ETXTBSY => Some("file is busy; another process may still be writing it"),
            libc::EEXIST => Some("target already exists; refusing to overwrite"),
            libc::ENOTEMPTY => Some("directory is not empty"),
            libc::ENOENT => Some("path not found; it may have been moved or deleted"),
            libc::EROFS => Some("read-only filesystem"),
            libc::ENAMETOOLONG => Some("file name too long; shorten the transform output"),
            libc::EXDEV => Some("cross-filesystem rename is not possible"),
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }
    #[cfg(windows)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            5 => Some("access denied; check permissions"),
            32 | 33 => Some("file is in use by another process"),
            80 | 183 => Some("target already exists; refusing to overwrite"),
            145 => Some("directory is not empty"),
            2 | 3 => Some("path not found; it may have been moved or deleted"),
            206 => Some("file name too long; shorten the transform output"),
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::AlreadyExists => Some("target already exists; refusing to overwrite"),
        io::ErrorKind::NotFound => Some("path not found; it may have been moved or deleted"),
        _ => None,
    }
}

/// `"<op> '<path>': <error> (<hint>)"`, with the hint omitted when none applies.
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    match hint_for(e) {
        Some(hint) => format!("{op} '{}': {e} ({hint})", path.display()),
        None => format!("{op} '{}': {e}", path.display()),
    }
}
