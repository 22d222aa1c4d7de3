//! Lane Dodge - A lane-switching obstacle dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, scoring, collisions)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser input translation
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `tuning`: Data-driven game balance

pub mod best_score;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use best_score::BestScore;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// These are the defaults baked into [`Tuning::default`]; gameplay code reads
/// the values from the active `Tuning` instead.
pub mod consts {
    /// Canvas dimensions (logical pixels)
    pub const CANVAS_WIDTH: f32 = 360.0;
    pub const CANVAS_HEIGHT: f32 = 640.0;

    /// Number of lanes
    pub const LANE_COUNT: u8 = 3;

    /// Player marker - fixed line near the bottom of the canvas
    pub const PLAYER_Y: f32 = 550.0;
    pub const PLAYER_RADIUS: f32 = 14.0;
    /// Lane the player starts in (middle lane)
    pub const PLAYER_START_LANE: u8 = 1;

    /// Fall speed at run start (pixels/s)
    pub const BASE_SPEED: f32 = 140.0;
    /// Fall speed gained per second of run time (pixels/s²)
    pub const SPEED_RAMP: f32 = 6.0;

    /// Seconds between spawns at run start
    pub const BASE_SPAWN_INTERVAL: f32 = 0.9;
    /// Spawn interval lost per second of run time
    pub const SPAWN_RAMP: f32 = 0.01;
    /// Spawn interval floor
    pub const MIN_SPAWN_INTERVAL: f32 = 0.35;
    /// Share of the previous interval kept each frame when easing toward the target
    pub const SPAWN_SMOOTHING: f32 = 0.98;

    /// Obstacle width as a fraction of lane width
    pub const OBSTACLE_WIDTH_RATIO: f32 = 0.7;
    /// Obstacle height range [min, max)
    pub const OBSTACLE_MIN_HEIGHT: f32 = 24.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 64.0;

    /// Largest frame delta fed to the simulation (background tabs, slow devices)
    pub const MAX_FRAME_DT: f32 = 0.05;
}
