//! Filename transformation.
//!
//! Rules are regex search/replace pairs applied case-insensitively to the file
//! name only, in ascending `order`, each rule's output feeding the next.
//! Applying the same rules twice is not guaranteed to be a no-op: a rule whose
//! replacement text matches its own pattern keeps firing.

use regex::{Regex, RegexBuilder};
use std::path::Path;
use tracing::{debug, info};

use crate::config::Transform;
use crate::errors::ImportError;

#[derive(Debug, Clone)]
struct CompiledRule {
    pattern: Regex,
    replace: String,
}

/// Ordered, compiled set of filename rules.
#[derive(Debug, Clone, Default)]
pub struct FilenameTransformer {
    rules: Vec<CompiledRule>,
}

impl FilenameTransformer {
    /// Compile `rules` in ascending `order` (ties keep their listed order).
    /// Patterns that fail to compile are returned alongside and left out.
    pub fn compile(rules: &[Transform]) -> (Self, Vec<ImportError>) {
        let mut ordered: Vec<&Transform> = rules.iter().collect();
        ordered.sort_by_key(|t| t.order);

        let mut compiled = Vec::with_capacity(ordered.len());
        let mut errors = Vec::new();
        for rule in ordered {
            match RegexBuilder::new(&rule.search).case_insensitive(true).build() {
                Ok(pattern) => compiled.push(CompiledRule {
                    pattern,
                    replace: rule.replace.clone(),
                }),
                Err(e) => errors.push(ImportError::InvalidTransform {
                    pattern: rule.search.clone(),
                    reason: e.to_string(),
                }),
            }
        }
        (Self { rules: compiled }, errors)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Compute the transformed file name for `path`. Never touches the filesystem.
    pub fn apply(&self, path: &Path) -> String {
        let original = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.rules.is_empty() {
            info!("No transforms configured");
            return original;
        }

        let mut current = original.clone();
        for rule in &self.rules {
            let next = rule.pattern.replace_all(&current, rule.replace.as_str()).into_owned();
            debug!(pattern = %rule.pattern, from = %current, to = %next, " - Transform");
            current = next;
        }

        if current != original {
            info!("Filename transformed: {original} => {current}");
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transformer(rules: &[(i32, &str, &str)]) -> FilenameTransformer {
        let rules: Vec<Transform> = rules
            .iter()
            .map(|(o, s, r)| Transform::new(*o, *s, *r))
            .collect();
        let (t, errs) = FilenameTransformer::compile(&rules);
        assert!(errs.is_empty());
        t
    }

    #[test]
    fn empty_rules_return_name_unchanged() {
        let t = FilenameTransformer::default();
        assert_eq!(t.apply(Path::new("/dl/Show.S01E01.mkv")), "Show.S01E01.mkv");
    }

    #[test]
    fn applies_to_file_name_only() {
        let t = transformer(&[(0, "S01E01", "1x01")]);
        assert_eq!(t.apply(Path::new("/S01E01/Show.S01E01.mkv")), "Show.1x01.mkv");
    }

    #[test]
    fn case_insensitive_match() {
        let t = transformer(&[(0, "s01e01", "1x01")]);
        assert_eq!(t.apply(Path::new("Show.S01E01.mkv")), "Show.1x01.mkv");
    }

    #[test]
    fn rules_compose_in_order_field_sequence() {
        // Listed out of order; `order` decides.
        let t = transformer(&[(2, "Episode", "Ep"), (1, "x01", "Episode")]);
        assert_eq!(t.apply(Path::new("Show.x01.mkv")), "Show.Ep.mkv");
    }

    #[test]
    fn capture_groups_expand() {
        let t = transformer(&[(0, r"S(\d+)E(\d+)", "${1}x$2")]);
        assert_eq!(t.apply(Path::new("Show.S02E05.mkv")), "Show.02x05.mkv");
    }

    #[test]
    fn self_matching_replacement_is_not_idempotent() {
        let t = transformer(&[(0, "a", "aa")]);
        let once = t.apply(Path::new("a.mkv"));
        let twice = t.apply(Path::new(&once));
        assert_ne!(once, twice);
    }
}
