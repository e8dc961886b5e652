//! Build script for the Zipline Uploader Tauri app.

fn main() {
    tauri_build::build();
}
