//! In-flight download detection.
//!
//! A file is skipped this cycle when its name carries the `.partial.` marker or
//! it was written to within the last five minutes. Only the name and mtime are
//! consulted; no download-client state.

use std::time::{Duration, SystemTime};

/// Files modified more recently than this are assumed to still be downloading.
pub const PARTIAL_WINDOW: Duration = Duration::from_secs(5 * 60);

pub const PARTIAL_MARKER: &str = ".partial.";

/// Absolute distance between two instants (clock skew can put mtime in the future).
fn age(now: SystemTime, modified: SystemTime) -> Duration {
    match now.duration_since(modified) {
        Ok(d) => d,
        Err(e) => e.duration(),
    }
}

/// True when `name` or `modified` marks the file as still being written.
pub fn is_partial_download(name: &str, modified: SystemTime, now: SystemTime) -> bool {
    name.to_lowercase().contains(PARTIAL_MARKER) || age(now, modified) < PARTIAL_WINDOW
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(n: u64) -> Duration {
        Duration::from_secs(n * 3600)
    }

    #[test]
    fn marker_wins_regardless_of_age() {
        let now = SystemTime::now();
        assert!(is_partial_download("incoming.partial.mkv", now - hours(48), now));
        assert!(is_partial_download("Incoming.PARTIAL.mkv", now - hours(48), now));
    }

    #[test]
    fn recent_file_is_partial_regardless_of_name() {
        let now = SystemTime::now();
        assert!(is_partial_download("Show.S01E01.mkv", now - Duration::from_secs(60), now));
        assert!(is_partial_download(
            "Show.S01E01.mkv",
            now - (PARTIAL_WINDOW - Duration::from_secs(1)),
            now
        ));
    }

    #[test]
    fn future_mtime_counts_by_absolute_age() {
        let now = SystemTime::now();
        assert!(is_partial_download("a.mkv", now + Duration::from_secs(30), now));
        assert!(!is_partial_download("a.mkv", now + hours(1), now));
    }

    #[test]
    fn old_unmarked_file_is_complete() {
        let now = SystemTime::now();
        assert!(!is_partial_download("Show.S01E01.mkv", now - hours(1), now));
        assert!(!is_partial_download("partial.mkv", now - PARTIAL_WINDOW, now));
    }
}
