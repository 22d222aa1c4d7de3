//! GPU-side scene description
//!
//! Converts a `GameState` into the uniform blocks the SDF shader reads. Pure
//! data, so the mapping is tested without a GPU.

use bytemuck::{Pod, Zeroable};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::settings::Settings;
use crate::sim::{GameState, RunPhase};

/// Maximum number of obstacles uploaded per frame (must match shader)
pub const MAX_OBSTACLES: usize = 64;

/// Overlay codes (must match shader)
pub const OVERLAY_NONE: u32 = 0;
pub const OVERLAY_PAUSED: u32 = 1;
pub const OVERLAY_DEAD: u32 = 2;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Globals {
    pub resolution: [f32; 2],  // offset 0
    pub canvas_size: [f32; 2], // offset 8
    pub time: f32,             // offset 16
    pub lane_count: u32,       // offset 20
    pub player_lane: u32,      // offset 24
    pub obstacle_count: u32,   // offset 28
    pub player_pos: [f32; 2],  // offset 32
    pub player_radius: f32,    // offset 40
    pub glow: f32,             // offset 44 - 0 disables the halo
    pub pulse: f32,            // offset 48 - 0 freezes the halo animation
    pub overlay: u32,          // offset 52
    pub _pad: [u32; 2],        // pad to 64 bytes
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ObstacleData {
    pub rect_min: [f32; 2],
    pub rect_max: [f32; 2],
    pub passed: f32, // 1.0 once scored (drawn dimmer)
    pub lane: u32,
    pub _pad: [u32; 2], // 32-byte stride for uniform arrays
}

/// Everything the pipeline uploads for one frame
#[derive(Debug, Clone)]
pub struct Scene {
    pub globals: Globals,
    /// Always `MAX_OBSTACLES` long; entries past `globals.obstacle_count` are zeroed
    pub obstacles: Vec<ObstacleData>,
}

impl Scene {
    /// Build the frame description. `resolution` is the surface size in physical
    /// pixels, `time` is seconds since start (animation only).
    pub fn build(state: &GameState, settings: &Settings, resolution: (u32, u32), time: f32) -> Self {
        let tuning = &state.tuning;

        let mut obstacles = vec![ObstacleData::zeroed(); MAX_OBSTACLES];
        if state.obstacles.len() > MAX_OBSTACLES {
            log::debug!(
                "Dropping {} obstacles from render",
                state.obstacles.len() - MAX_OBSTACLES
            );
        }
        for (slot, obstacle) in obstacles.iter_mut().zip(&state.obstacles) {
            let (min, max) = obstacle.rect(tuning);
            *slot = ObstacleData {
                rect_min: min.to_array(),
                rect_max: max.to_array(),
                passed: if obstacle.passed { 1.0 } else { 0.0 },
                lane: obstacle.lane as u32,
                _pad: [0; 2],
            };
        }

        let overlay = match state.phase {
            RunPhase::Running => OVERLAY_NONE,
            RunPhase::Paused => OVERLAY_PAUSED,
            RunPhase::Dead => OVERLAY_DEAD,
        };

        let globals = Globals {
            resolution: [resolution.0 as f32, resolution.1 as f32],
            canvas_size: [CANVAS_WIDTH, CANVAS_HEIGHT],
            time,
            lane_count: tuning.lane_count as u32,
            player_lane: state.player.lane as u32,
            obstacle_count: state.obstacles.len().min(MAX_OBSTACLES) as u32,
            player_pos: [tuning.lane_center_x(state.player.lane), state.player.y],
            player_radius: state.player.radius,
            glow: if settings.effective_glow() { 1.0 } else { 0.0 },
            pulse: if settings.effective_pulse() { 1.0 } else { 0.0 },
            overlay,
            _pad: [0; 2],
        };

        Self { globals, obstacles }
    }
}
