//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame delta and queued commands are the only inputs
//! - Randomness only through an injected `SpawnSource`
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Span, first_hit, obstacle_hits_player};
pub use difficulty::{smooth_interval, speed_at, target_spawn_interval};
pub use spawn::{ScriptedSpawns, SpawnSource, spawn_obstacle};
pub use state::{GameState, Obstacle, Player, RunPhase, TapSide};
pub use tick::{Command, GameEvent, TickInput, tick};
