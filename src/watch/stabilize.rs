//! Write-completion detection — wait until a screenshot stops growing.
//!
//! Creation notifications arrive while Steam is still writing the file, so
//! uploading immediately would ship a truncated image. The file's size is
//! polled until it holds still; size quiescence is the proxy for
//! "write complete".

use std::path::Path;
use std::time::Duration;

/// Time between size polls.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Consecutive equal size reads required to declare the file stable
/// (3 reads ≈ 300ms of observed quiescence).
const STABLE_READS: u32 = 3;

/// Total polling budget before giving up (30 polls at 100ms).
const MAX_POLLS: u32 = 30;

/// Block until `path` has stopped changing size, or the budget runs out.
///
/// Returns false if the file never held a stable size within the budget —
/// the caller must abandon the upload for this event. A file that does not
/// exist yet counts as "not stable yet", not as a failure: creation
/// notifications can race with the file actually appearing on disk.
pub fn wait_for_stable(path: &Path) -> bool {
    poll_until_stable(path, POLL_INTERVAL, MAX_POLLS)
}

fn poll_until_stable(path: &Path, interval: Duration, max_polls: u32) -> bool {
    let mut last_size: Option<u64> = None;
    let mut stable = 0u32;

    for _ in 0..max_polls {
        let size = match std::fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(_) => {
                // Not on disk yet — wait a beat and re-poll
                std::thread::sleep(interval);
                continue;
            }
        };

        if last_size == Some(size) {
            stable += 1;
            if stable >= STABLE_READS {
                return true;
            }
        } else {
            stable = 0;
            last_size = Some(size);
        }

        std::thread::sleep(interval);
    }

    false
}
