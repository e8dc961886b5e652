//! Desktop binary — hands off to the shared app shell immediately.

// Prevents an extra console window on Windows in release builds.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    zipline_uploader_lib::run();
}
