//! Zipline Uploader — Tauri application entry point.
//!
//! This is the app shell that wires together:
//! - Persisted settings (settings/)
//! - Screenshot directory monitoring (watch/)
//! - Zipline HTTP client (upload/)
//! - Worker-to-frontend result delivery (report/)

pub mod report;
pub mod settings;
pub mod upload;
pub mod watch;

use settings::Settings;
use std::sync::atomic::{AtomicBool, Ordering};
use tauri::Manager;

/// Monitor lifecycle state, managed by Tauri.
///
/// Holds the reporter handle the watcher worker needs and the running flag
/// that makes `start_monitoring` idempotent.
pub struct MonitorState {
    running: AtomicBool,
    reporter: report::UploadReporter,
}

impl MonitorState {
    pub fn new(reporter: report::UploadReporter) -> Self {
        Self {
            running: AtomicBool::new(false),
            reporter,
        }
    }

    /// Start the watcher worker once. Subsequent calls are successful no-ops.
    fn start(&self) -> Result<(), watch::WatchError> {
        if self.running.swap(true, Ordering::SeqCst) {
            log::info!("[WATCH] Monitor already running");
            return Ok(());
        }
        match watch::start(self.reporter.clone()) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }
}

/// Tauri command: read one setting, falling back to the caller's default.
#[tauri::command]
fn get_setting(key: String, default: Option<serde_json::Value>) -> serde_json::Value {
    Settings::load()
        .get(&key)
        .or(default)
        .unwrap_or(serde_json::Value::Null)
}

/// Tauri command: update one setting and persist immediately.
///
/// Returns false on unknown keys, wrongly typed values, or write failures —
/// the frontend never sees a thrown error from this path.
#[tauri::command]
fn set_setting(key: String, value: serde_json::Value) -> bool {
    let mut settings = Settings::load();
    if !settings.set(&key, &value) {
        return false;
    }
    settings.save()
}

/// Tauri command: explicit flush point for the frontend.
///
/// Persistence already happened in `set_setting`, so there is nothing left
/// to write; the command exists so the settings protocol stays symmetrical.
#[tauri::command]
fn commit_settings() -> bool {
    true
}

/// Tauri command: list the user's Zipline folders for the folder picker.
#[tauri::command]
async fn get_folders() -> Result<serde_json::Value, String> {
    tauri::async_runtime::spawn_blocking(|| upload::fetch_folders(&Settings::load()))
        .await
        .map_err(|e| e.to_string())
}

/// Tauri command: start watching screenshot directories.
///
/// Idempotent — calling while already running reports success.
#[tauri::command]
fn start_monitoring(state: tauri::State<'_, MonitorState>) -> Result<bool, String> {
    state.start().map(|_| true).map_err(|e| e.to_string())
}

/// Entry point — called by Tauri runtime.
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::init();

    tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            get_setting,
            set_setting,
            commit_settings,
            get_folders,
            start_monitoring
        ])
        .setup(|app| {
            log::info!("Zipline Uploader starting up");

            let (reporter, rx) = report::channel();
            report::spawn_emitter(app.handle().clone(), rx);

            let state = MonitorState::new(reporter);
            if Settings::load().auto_start {
                if let Err(e) = state.start() {
                    log::error!("[WATCH] Auto-start failed: {}", e);
                }
            }
            app.manage(state);

            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("Error running Zipline Uploader");
}
