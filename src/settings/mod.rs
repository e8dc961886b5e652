//! Persisted plugin settings — the Zipline endpoint, token, and upload options.
//!
//! Settings live as a single JSON file in the platform config directory:
//!   macOS:   ~/Library/Application Support/zipline-uploader/settings.json
//!   Linux:   ~/.config/zipline-uploader/settings.json
//!   Windows: %APPDATA%/zipline-uploader/settings.json
//!
//! The watcher re-reads this file before every upload, so changes made in
//! the settings UI take effect on the next screenshot without a restart.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Zipline naming formats the server accepts in the `Format` header.
pub const FORMAT_OPTIONS: [&str; 4] = ["DATE", "UUID", "RANDOM", "NAME"];

/// All persisted settings. Field names match the JSON keys the frontend
/// reads and writes (camelCase).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(rename = "uploadURL")]
    pub upload_url: String,
    pub token: String,
    pub selected_format: String,
    pub use_folder: bool,
    pub zipline_folder: String,
    pub auto_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            upload_url: String::new(),
            token: String::new(),
            selected_format: "DATE".to_string(),
            use_folder: false,
            zipline_folder: String::new(),
            auto_start: false,
        }
    }
}

/// Location of the settings file.
pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("zipline-uploader")
        .join("settings.json")
}

impl Settings {
    /// Load settings from the default location. Missing or unreadable files
    /// yield defaults — a fresh install is not an error.
    pub fn load() -> Self {
        Self::load_from(&settings_path())
    }

    /// Load settings from an explicit path.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(settings) => settings,
                Err(e) => {
                    log::error!("[SETTINGS] Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::error!("[SETTINGS] Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the default location. Returns false on failure —
    /// the RPC layer reports a boolean rather than surfacing an error.
    pub fn save(&self) -> bool {
        self.save_to(&settings_path())
    }

    /// Save settings to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> bool {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::error!("[SETTINGS] Failed to create {}: {}", parent.display(), e);
                return false;
            }
        }
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                log::error!("[SETTINGS] Failed to serialize settings: {}", e);
                return false;
            }
        };
        match std::fs::write(path, json) {
            Ok(()) => true,
            Err(e) => {
                log::error!("[SETTINGS] Failed to write {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Read a single setting by its JSON key.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        match key {
            "uploadURL" => Some(self.upload_url.clone().into()),
            "token" => Some(self.token.clone().into()),
            "selectedFormat" => Some(self.selected_format.clone().into()),
            "useFolder" => Some(self.use_folder.into()),
            "ziplineFolder" => Some(self.zipline_folder.clone().into()),
            "autoStart" => Some(self.auto_start.into()),
            _ => None,
        }
    }

    /// Update a single setting by its JSON key. Unknown keys and wrongly
    /// typed values are rejected with a log line, not an error.
    pub fn set(&mut self, key: &str, value: &serde_json::Value) -> bool {
        let applied = match key {
            "uploadURL" => assign_string(&mut self.upload_url, value),
            "token" => assign_string(&mut self.token, value),
            "selectedFormat" => assign_string(&mut self.selected_format, value),
            "useFolder" => assign_bool(&mut self.use_folder, value),
            "ziplineFolder" => assign_string(&mut self.zipline_folder, value),
            "autoStart" => assign_bool(&mut self.auto_start, value),
            _ => {
                log::warn!("[SETTINGS] Ignoring unknown key: {}", key);
                false
            }
        };
        if !applied && self.get(key).is_some() {
            log::warn!("[SETTINGS] Rejected value for {}: {}", key, value);
        }
        applied
    }
}

fn assign_string(slot: &mut String, value: &serde_json::Value) -> bool {
    match value.as_str() {
        Some(s) => {
            *slot = s.to_string();
            true
        }
        None => false,
    }
}

fn assign_bool(slot: &mut bool, value: &serde_json::Value) -> bool {
    match value.as_bool() {
        Some(b) => {
            *slot = b;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_date_format() {
        let s = Settings::default();
        assert_eq!(s.selected_format, "DATE");
        assert!(FORMAT_OPTIONS.contains(&s.selected_format.as_str()));
        assert!(s.upload_url.is_empty());
        assert!(!s.auto_start);
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load_from(&dir.path().join("nope.json"));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut s = Settings::default();
        s.upload_url = "https://files.example.com/api/upload".to_string();
        s.token = "secret".to_string();
        s.use_folder = true;
        assert!(s.save_to(&path));

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded, s);
    }

    #[test]
    fn persisted_json_uses_frontend_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert!(json.get("uploadURL").is_some());
        assert!(json.get("selectedFormat").is_some());
        assert!(json.get("autoStart").is_some());
    }

    #[test]
    fn get_and_set_by_key() {
        let mut s = Settings::default();
        assert!(s.set("token", &serde_json::json!("abc123")));
        assert_eq!(s.get("token"), Some(serde_json::json!("abc123")));
        assert!(s.set("useFolder", &serde_json::json!(true)));
        assert!(s.use_folder);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut s = Settings::default();
        assert!(!s.set("colour", &serde_json::json!("blue")));
        assert_eq!(s.get("colour"), None);
    }

    #[test]
    fn set_rejects_wrong_type() {
        let mut s = Settings::default();
        assert!(!s.set("useFolder", &serde_json::json!("yes")));
        assert!(!s.use_folder);
        assert!(!s.set("token", &serde_json::json!(42)));
        assert!(s.token.is_empty());
    }
}
