//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the rest of the codebase can remain platform-agnostic.

mod temp;
#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{
    has_hidden_attribute, open_log_file_secure_append, set_dir_mode_0700,
    write_config_secure_new_0600,
};

#[cfg(not(unix))]
pub use windows::{
    has_hidden_attribute, open_log_file_secure_append, set_dir_mode_0700,
    write_config_secure_new_0600,
};

use std::fs::Metadata;
use std::path::Path;

/// Hidden by naming convention (leading dot) or by the platform's hidden attribute.
pub fn is_hidden(path: &Path, meta: &Metadata) -> bool {
    let dot_named = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false);
    dot_named || has_hidden_attribute(meta)
}
