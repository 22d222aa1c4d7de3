//! Data-driven game balance
//!
//! The shipped values live in `assets/tuning.json` and are embedded at compile
//! time. Missing fields fall back to the constants in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Embedded balance file
const TUNING_JSON: &str = include_str!("../assets/tuning.json");

/// Reasons a tuning file is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("lane_count must be at least 2 (got {0})")]
    TooFewLanes(u8),
    #[error("player_start_lane {lane} is outside 0..{lane_count}")]
    StartLaneOutOfRange { lane: u8, lane_count: u8 },
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("min_spawn_interval {min} exceeds base_spawn_interval {base}")]
    SpawnFloorAboveBase { min: f32, base: f32 },
    #[error("obstacle height range [{min}, {max}) is empty")]
    EmptyHeightRange { min: f32, max: f32 },
    #[error("obstacle_width_ratio must be in (0, 1] (got {0})")]
    WidthRatio(f32),
    #[error("spawn_smoothing must be in [0, 1) (got {0})")]
    Smoothing(f32),
    #[error("player at y={y} with radius {radius} does not fit on the canvas")]
    PlayerOffCanvas { y: f32, radius: f32 },
}

/// Balance parameters read by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub lane_count: u8,
    pub player_y: f32,
    pub player_radius: f32,
    pub player_start_lane: u8,
    pub base_speed: f32,
    pub speed_ramp: f32,
    pub base_spawn_interval: f32,
    pub spawn_ramp: f32,
    pub min_spawn_interval: f32,
    pub spawn_smoothing: f32,
    pub obstacle_width_ratio: f32,
    pub obstacle_min_height: f32,
    pub obstacle_max_height: f32,
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_count: LANE_COUNT,
            player_y: PLAYER_Y,
            player_radius: PLAYER_RADIUS,
            player_start_lane: PLAYER_START_LANE,
            base_speed: BASE_SPEED,
            speed_ramp: SPEED_RAMP,
            base_spawn_interval: BASE_SPAWN_INTERVAL,
            spawn_ramp: SPAWN_RAMP,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            spawn_smoothing: SPAWN_SMOOTHING,
            obstacle_width_ratio: OBSTACLE_WIDTH_RATIO,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,
            obstacle_max_height: OBSTACLE_MAX_HEIGHT,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load the embedded balance file, falling back to defaults if it is broken
    pub fn load() -> Self {
        match Self::from_json(TUNING_JSON) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Rejected embedded tuning ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Check that the parameters describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.lane_count < 2 {
            return Err(TuningError::TooFewLanes(self.lane_count));
        }
        if self.player_start_lane >= self.lane_count {
            return Err(TuningError::StartLaneOutOfRange {
                lane: self.player_start_lane,
                lane_count: self.lane_count,
            });
        }

        for (field, value) in [
            ("player_radius", self.player_radius),
            ("base_speed", self.base_speed),
            ("base_spawn_interval", self.base_spawn_interval),
            ("min_spawn_interval", self.min_spawn_interval),
            ("obstacle_min_height", self.obstacle_min_height),
            ("max_frame_dt", self.max_frame_dt),
        ] {
            // Written as !(x > 0) so NaN is rejected too
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        for (field, value) in [("speed_ramp", self.speed_ramp), ("spawn_ramp", self.spawn_ramp)] {
            if !(value >= 0.0) {
                return Err(TuningError::Negative { field, value });
            }
        }

        if self.min_spawn_interval > self.base_spawn_interval {
            return Err(TuningError::SpawnFloorAboveBase {
                min: self.min_spawn_interval,
                base: self.base_spawn_interval,
            });
        }
        if !(self.obstacle_max_height > self.obstacle_min_height) {
            return Err(TuningError::EmptyHeightRange {
                min: self.obstacle_min_height,
                max: self.obstacle_max_height,
            });
        }
        if !(self.obstacle_width_ratio > 0.0 && self.obstacle_width_ratio <= 1.0) {
            return Err(TuningError::WidthRatio(self.obstacle_width_ratio));
        }
        if !(0.0..1.0).contains(&self.spawn_smoothing) {
            return Err(TuningError::Smoothing(self.spawn_smoothing));
        }
        if self.player_y - self.player_radius < 0.0
            || self.player_y + self.player_radius > CANVAS_HEIGHT
        {
            return Err(TuningError::PlayerOffCanvas {
                y: self.player_y,
                radius: self.player_radius,
            });
        }

        Ok(())
    }

    /// Width of a single lane in pixels
    #[inline]
    pub fn lane_width(&self) -> f32 {
        CANVAS_WIDTH / self.lane_count as f32
    }

    /// Horizontal center of a lane
    #[inline]
    pub fn lane_center_x(&self, lane: u8) -> f32 {
        (lane as f32 + 0.5) * self.lane_width()
    }

    /// Highest valid lane index
    #[inline]
    pub fn last_lane(&self) -> u8 {
        self.lane_count - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_tuning_matches_defaults() {
        let tuning = Tuning::from_json(TUNING_JSON).expect("embedded tuning should be valid");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let tuning = Tuning::from_json(r#"{ "lane_count": 5 }"#).unwrap();
        assert_eq!(tuning.lane_count, 5);
        assert_eq!(tuning.base_speed, BASE_SPEED);
        assert_eq!(tuning.min_spawn_interval, MIN_SPAWN_INTERVAL);
    }

    #[test]
    fn test_rejects_bad_documents() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "lane_count": 1, "player_start_lane": 0 }"#),
            Err(TuningError::TooFewLanes(1))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "player_start_lane": 3 }"#),
            Err(TuningError::StartLaneOutOfRange { lane: 3, lane_count: 3 })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "min_spawn_interval": 2.0 }"#),
            Err(TuningError::SpawnFloorAboveBase { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "obstacle_min_height": 80.0 }"#),
            Err(TuningError::EmptyHeightRange { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_smoothing": 1.0 }"#),
            Err(TuningError::Smoothing(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "base_speed": -1.0 }"#),
            Err(TuningError::NotPositive { field: "base_speed", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "player_y": 635.0 }"#),
            Err(TuningError::PlayerOffCanvas { .. })
        ));
    }

    #[test]
    fn test_lane_geometry() {
        let tuning = Tuning::default();
        assert!((tuning.lane_width() - 120.0).abs() < 1e-4);
        assert!((tuning.lane_center_x(0) - 60.0).abs() < 1e-4);
        assert!((tuning.lane_center_x(2) - 300.0).abs() < 1e-4);
        assert_eq!(tuning.last_lane(), 2);
    }
}
