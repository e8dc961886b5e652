//! Screenshot directory discovery.
//!
//! Two sources, resolved once at watch-start:
//! - the fixed `~/Pictures/Screenshots` folder
//! - Steam's per-user capture folders under
//!   `~/.local/share/Steam/userdata/<id>/760/remote/<appid>/screenshots`

use std::path::{Path, PathBuf};

const STEAM_SCREENSHOT_GLOB: &str = ".local/share/Steam/userdata/*/760/remote/*/screenshots";

/// All candidate screenshot directories for this machine.
///
/// Missing directories are included here and skipped (with a logged warning)
/// when the watcher subscribes, so a machine without Steam installed still
/// watches the fixed folder.
pub fn watch_targets() -> Vec<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
    expand_targets(&home.join("Pictures").join("Screenshots"), &home)
}

/// Combine the fixed directory with the glob-enumerated Steam folders.
fn expand_targets(fixed: &Path, home: &Path) -> Vec<PathBuf> {
    let mut targets = vec![fixed.to_path_buf()];

    let pattern = home.join(STEAM_SCREENSHOT_GLOB);
    match glob::glob(&pattern.to_string_lossy()) {
        Ok(paths) => {
            for entry in paths {
                match entry {
                    Ok(path) => targets.push(path),
                    Err(e) => log::warn!("[WATCH] Unreadable glob entry: {}", e),
                }
            }
        }
        Err(e) => log::warn!("[WATCH] Bad screenshot glob pattern: {}", e),
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_directory_always_listed_first() {
        let home = tempfile::tempdir().unwrap();
        let fixed = home.path().join("Pictures/Screenshots");

        let targets = expand_targets(&fixed, home.path());
        assert_eq!(targets[0], fixed);
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn steam_user_folders_are_globbed() {
        let home = tempfile::tempdir().unwrap();
        let fixed = home.path().join("Pictures/Screenshots");

        for user in ["1001", "1002"] {
            for app in ["620", "730"] {
                let dir = home
                    .path()
                    .join(".local/share/Steam/userdata")
                    .join(user)
                    .join("760/remote")
                    .join(app)
                    .join("screenshots");
                std::fs::create_dir_all(&dir).unwrap();
            }
        }
        // A sibling that should not match the pattern
        std::fs::create_dir_all(
            home.path()
                .join(".local/share/Steam/userdata/1001/760/remote/620/thumbnails"),
        )
        .unwrap();

        let targets = expand_targets(&fixed, home.path());
        assert_eq!(targets.len(), 5);
        assert!(targets
            .iter()
            .skip(1)
            .all(|t| t.ends_with("screenshots")));
    }
}
