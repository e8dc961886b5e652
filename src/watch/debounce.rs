//! Duplicate-event suppression for filesystem creation notifications.
//!
//! Steam delivers the same logical file-creation as several rapid-fire
//! notifications, and also keeps rewriting a `most_recent.jpg` marker that
//! is never the final artifact. Both must be filtered before a path reaches
//! the upload pipeline.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Window in which a repeated notification for the same path is ignored.
const DEBOUNCE_WINDOW: Duration = Duration::from_secs(2);

/// Steam's continuously rewritten capture marker.
const TRANSIENT_MARKER: &str = "most_recent.jpg";

/// True for the temp file Steam rewrites on every capture.
pub fn is_transient_marker(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().eq_ignore_ascii_case(TRANSIENT_MARKER))
        .unwrap_or(false)
}

/// Per-path record of the last accepted upload trigger.
///
/// Owned by the watcher worker; entries live for the process lifetime, which
/// is bounded by the number of distinct screenshots taken in a session.
/// The entry marks "last successfully triggered upload", not "last seen
/// notification": callers record a path only after stabilization completes,
/// so a slow stabilization cannot suppress a genuinely distinct second
/// capture of the same path before its own upload has started.
#[derive(Default)]
pub struct UploadCache {
    entries: HashMap<PathBuf, Instant>,
}

impl UploadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Was this path accepted within the debounce window?
    pub fn recently_uploaded(&self, path: &Path) -> bool {
        self.entries
            .get(path)
            .map(|at| at.elapsed() < DEBOUNCE_WINDOW)
            .unwrap_or(false)
    }

    /// Record an accepted upload trigger for this path.
    pub fn mark_uploaded(&mut self, path: &Path) {
        self.entries.insert(path.to_path_buf(), Instant::now());
    }

    #[cfg(test)]
    fn mark_uploaded_at(&mut self, path: &Path, at: Instant) {
        self.entries.insert(path.to_path_buf(), at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_name_is_rejected_case_insensitively() {
        assert!(is_transient_marker(Path::new("/shots/most_recent.jpg")));
        assert!(is_transient_marker(Path::new("/shots/MOST_RECENT.JPG")));
        assert!(is_transient_marker(Path::new("/shots/Most_Recent.Jpg")));
    }

    #[test]
    fn ordinary_screenshots_are_not_markers() {
        assert!(!is_transient_marker(Path::new("/shots/shot1.png")));
        assert!(!is_transient_marker(Path::new("/shots/most_recent.jpg.bak")));
        assert!(!is_transient_marker(Path::new("/")));
    }

    #[test]
    fn unseen_path_is_not_recent() {
        let cache = UploadCache::new();
        assert!(!cache.recently_uploaded(Path::new("/shots/new.png")));
    }

    #[test]
    fn marked_path_is_suppressed_immediately() {
        let mut cache = UploadCache::new();
        let path = Path::new("/shots/shot1.png");
        cache.mark_uploaded(path);
        assert!(cache.recently_uploaded(path));
    }

    #[test]
    fn suppression_ends_at_the_two_second_boundary() {
        let mut cache = UploadCache::new();
        let path = Path::new("/shots/shot1.png");

        cache.mark_uploaded_at(path, Instant::now() - Duration::from_millis(1900));
        assert!(cache.recently_uploaded(path));

        cache.mark_uploaded_at(path, Instant::now() - Duration::from_millis(2100));
        assert!(!cache.recently_uploaded(path));
    }

    #[test]
    fn paths_are_tracked_independently() {
        let mut cache = UploadCache::new();
        cache.mark_uploaded(Path::new("/shots/a.png"));
        assert!(cache.recently_uploaded(Path::new("/shots/a.png")));
        assert!(!cache.recently_uploaded(Path::new("/shots/b.png")));
    }
}
