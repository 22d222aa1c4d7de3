//! Platform abstraction layer
//!
//! Translates browser input into simulation commands. Listener wiring lives in
//! the wasm entry point; everything here is plain data so it runs under tests.

pub mod input;

pub use input::{SettingToggle, command_for_key, setting_toggle_for_key, tap_side};
