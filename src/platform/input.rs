//! Keyboard and pointer mapping

use crate::sim::{Command, TapSide};

/// Map a `KeyboardEvent.key` value to a command
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Command::MoveLeft),
        "ArrowRight" | "d" | "D" => Some(Command::MoveRight),
        "r" | "R" => Some(Command::Restart),
        "p" | "P" => Some(Command::TogglePause),
        _ => None,
    }
}

/// Display preference toggled from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingToggle {
    Glow,
    Fps,
    ReducedMotion,
}

/// Map a `KeyboardEvent.key` value to a settings toggle
pub fn setting_toggle_for_key(key: &str) -> Option<SettingToggle> {
    match key {
        "g" | "G" => Some(SettingToggle::Glow),
        "f" | "F" => Some(SettingToggle::Fps),
        "m" | "M" => Some(SettingToggle::ReducedMotion),
        _ => None,
    }
}

/// Which half of an element of width `width` the offset `x` falls in
pub fn tap_side(x: f32, width: f32) -> TapSide {
    if x < width / 2.0 {
        TapSide::Left
    } else {
        TapSide::Right
    }
}
