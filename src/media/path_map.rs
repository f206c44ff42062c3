//! Local → remote path translation.
//!
//! The downstream service may see the downloads folder under a different root
//! (container mount, network share). This is a plain string-prefix swap using
//! the host separator, not a semantic rebase.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Absolute form of `path` without resolving symlinks; `\\?\` prefixes are
/// dropped on Windows so the prefix length lines up with configured roots.
pub fn normalize(path: &Path) -> PathBuf {
    let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    dunce::simplified(&abs).to_path_buf()
}

/// Map `file` (under `local_root`) onto `remote_root`.
///
/// Drops exactly `local_root`'s length from the front of the normalized file
/// path, then one leading separator, then joins the remainder onto
/// `remote_root`. The root itself maps to `remote_root` unchanged.
pub fn map_to_remote(local_root: &Path, file: &Path, remote_root: &Path) -> PathBuf {
    let full = normalize(file);
    let full = full.to_string_lossy();
    let root_len = local_root.as_os_str().to_string_lossy().len();

    let rest = full.get(root_len..).unwrap_or("");
    let rest = rest.strip_prefix(MAIN_SEPARATOR).unwrap_or(rest);
    if rest.is_empty() {
        return remote_root.to_path_buf();
    }
    remote_root.join(rest)
}
