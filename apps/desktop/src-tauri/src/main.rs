//! STOP B4U SHOP desktop entry point.

// Prevents an additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    stopb4u_desktop_lib::run()
}
