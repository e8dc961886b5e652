//! Screenshot directory monitoring — the capture pipeline's entry point.
//!
//! One background thread owns the filesystem subscription for every
//! screenshot directory and runs each accepted notification through
//! dedup → stabilize → upload → report, in delivery order. A slow upload
//! delays the next notification; with manual captures arriving seconds
//! apart that serialization is the intended behavior, not a bottleneck.

mod debounce;
mod stabilize;
mod targets;

pub use debounce::{is_transient_marker, UploadCache};
pub use stabilize::wait_for_stable;
pub use targets::watch_targets;

use crate::report::UploadReporter;
use crate::settings::Settings;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Failed to create filesystem watcher: {0}")]
    Init(#[from] notify::Error),

    #[error("Failed to spawn watcher thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Subscribe to every existing screenshot directory and start the worker.
///
/// The worker thread lives for the rest of the process; there is no stop
/// handle. Missing directories are skipped with a warning so a machine
/// without Steam still watches what it has.
pub fn start(reporter: UploadReporter) -> Result<(), WatchError> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = RecommendedWatcher::new(tx, Config::default())?;

    let mut watching = 0usize;
    for target in targets::watch_targets() {
        if target.is_dir() {
            match watcher.watch(&target, RecursiveMode::NonRecursive) {
                Ok(()) => {
                    log::info!("[WATCH] Watching: {}", target.display());
                    watching += 1;
                }
                Err(e) => log::warn!("[WATCH] Could not watch {}: {}", target.display(), e),
            }
        } else {
            log::warn!("[WATCH] Missing: {}", target.display());
        }
    }
    if watching == 0 {
        log::warn!("[WATCH] No screenshot directories found — nothing to monitor");
    }

    std::thread::Builder::new()
        .name("zipline-watcher".to_string())
        .spawn(move || {
            // The subscription dies with the watcher; keep it alive for the
            // lifetime of the delivery loop.
            let _watcher = watcher;
            let mut cache = UploadCache::new();

            for delivery in rx {
                match delivery {
                    Ok(event) => handle_event(&event, &mut cache, &reporter),
                    Err(e) => log::error!("[WATCH] Notification error: {}", e),
                }
            }
            log::info!("[WATCH] Watcher stopped");
        })?;

    Ok(())
}

/// Route one raw notification. Only creations matter: modify and rename
/// chatter from editors and Steam's own rewrites would produce duplicate or
/// truncated uploads.
fn handle_event(event: &Event, cache: &mut UploadCache, reporter: &UploadReporter) {
    if !matches!(event.kind, EventKind::Create(_)) {
        return;
    }
    for path in &event.paths {
        handle_created(path, cache, &Settings::load(), reporter);
    }
}

/// The per-file pipeline: dedup → stabilize → upload → report.
///
/// Every failure is terminal for this one event and absorbed here — one bad
/// file must never stop monitoring of the next.
pub fn handle_created(
    path: &Path,
    cache: &mut UploadCache,
    settings: &Settings,
    reporter: &UploadReporter,
) {
    if path.is_dir() {
        return;
    }
    if is_transient_marker(path) {
        return;
    }

    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if cache.recently_uploaded(&canonical) {
        log::debug!("[WATCH] Duplicate notification for {}", path.display());
        return;
    }

    if !wait_for_stable(path) {
        log::error!("[WATCH] {} never stabilized, skipping upload", path.display());
        return;
    }

    // Marked after stabilization, so a capture whose write outlasted the
    // debounce window still accepts its own follow-up event correctly.
    cache.mark_uploaded(&canonical);

    match crate::upload::upload_screenshot(path, settings) {
        Ok(Some(outcome)) => reporter.send(outcome),
        Ok(None) => {}
        Err(e) => log::error!("[WATCH] Upload failed for {}: {}", path.display(), e),
    }
}
