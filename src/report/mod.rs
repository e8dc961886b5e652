//! Cross-thread result delivery — worker thread to the app event loop.
//!
//! The watcher worker must never call into the async runtime directly, and
//! the event loop must never block on an upload. The handoff is a channel:
//! workers push outcomes through a cloneable `UploadReporter`, and a single
//! task on the Tauri runtime drains the channel and emits the frontend
//! event. Only successes travel this channel; failures die in the worker's
//! logs.

use serde::Serialize;
use tauri::Emitter;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Event name the frontend listens for.
pub const UPLOAD_SUCCESS_EVENT: &str = "zipline_upload_success";

/// A completed upload: where the file came from and where it lives now.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    pub source_path: String,
    pub shareable_link: String,
}

/// Worker-side handle for reporting completed uploads.
#[derive(Clone)]
pub struct UploadReporter {
    tx: UnboundedSender<UploadOutcome>,
}

impl UploadReporter {
    /// Hand an outcome to the event loop. Never blocks; if the app side has
    /// shut down the outcome is dropped with a log line.
    pub fn send(&self, outcome: UploadOutcome) {
        if self.tx.send(outcome).is_err() {
            log::warn!("[REPORT] Emitter task gone, dropping upload result");
        }
    }
}

/// Build the reporter and its receiving end.
///
/// The receiver goes to `spawn_emitter` during app setup; the reporter is
/// cloned into every watcher worker.
pub fn channel() -> (UploadReporter, UnboundedReceiver<UploadOutcome>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (UploadReporter { tx }, rx)
}

/// Drain upload outcomes and emit them to the frontend.
///
/// This task is the only code that touches the event system for uploads, so
/// each successful upload produces exactly one `zipline_upload_success`.
pub fn spawn_emitter(app: tauri::AppHandle, mut rx: UnboundedReceiver<UploadOutcome>) {
    tauri::async_runtime::spawn(async move {
        while let Some(outcome) = rx.recv().await {
            log::info!(
                "[REPORT] {} → {}",
                outcome.source_path,
                outcome.shareable_link
            );
            if let Err(e) = app.emit(UPLOAD_SUCCESS_EVENT, &outcome) {
                log::error!("[REPORT] Failed to emit upload event: {}", e);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn outcomes_cross_from_worker_thread_to_async_context() {
        let (reporter, mut rx) = channel();

        let worker = std::thread::spawn(move || {
            reporter.send(UploadOutcome {
                source_path: "/shots/shot1.png".to_string(),
                shareable_link: "https://x/y.png".to_string(),
            });
        });

        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome.source_path, "/shots/shot1.png");
        assert_eq!(outcome.shareable_link, "https://x/y.png");
        worker.join().unwrap();
    }

    #[tokio::test]
    async fn cloned_reporters_feed_one_receiver() {
        let (reporter, mut rx) = channel();
        let second = reporter.clone();

        reporter.send(UploadOutcome {
            source_path: "a".to_string(),
            shareable_link: "1".to_string(),
        });
        second.send(UploadOutcome {
            source_path: "b".to_string(),
            shareable_link: "2".to_string(),
        });

        assert_eq!(rx.recv().await.unwrap().source_path, "a");
        assert_eq!(rx.recv().await.unwrap().source_path, "b");
    }

    #[test]
    fn send_after_receiver_dropped_does_not_panic() {
        let (reporter, rx) = channel();
        drop(rx);
        reporter.send(UploadOutcome {
            source_path: "a".to_string(),
            shareable_link: "1".to_string(),
        });
    }

    #[test]
    fn outcome_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(UploadOutcome {
            source_path: "/shots/shot1.png".to_string(),
            shareable_link: "https://x/y.png".to_string(),
        })
        .unwrap();
        assert_eq!(json["sourcePath"], "/shots/shot1.png");
        assert_eq!(json["shareableLink"], "https://x/y.png");
    }
}
