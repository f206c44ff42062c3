//! Flat `search|replace` transform files.
//!
//! One rule per line, split on the first `|`. Blank lines and `#` comments are
//! skipped. A line without `|` is a rule that deletes its match. Rule order is
//! line order.

use std::fs;
use std::path::Path;

use crate::errors::ImportError;

use super::types::Transform;

/// Parse transform rules from file contents.
pub fn parse_transforms(contents: &str) -> Vec<Transform> {
    contents
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
        .enumerate()
        .map(|(idx, line)| {
            let (search, replace) = line.split_once('|').unwrap_or((line, ""));
            Transform::new(idx as i32, search, replace)
        })
        .collect()
}

/// Read and parse a transforms file.
pub fn load_transforms_file(path: &Path) -> Result<Vec<Transform>, ImportError> {
    let contents = fs::read_to_string(path).map_err(|e| ImportError::TransformsFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(parse_transforms(&contents))
}
