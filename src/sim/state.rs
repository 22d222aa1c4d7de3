//! Game state and core simulation types
//!
//! Everything the frame step reads or mutates lives here.

use glam::Vec2;

use crate::consts::CANVAS_HEIGHT;
use crate::tuning::Tuning;

use super::collision::Span;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Active gameplay
    Running,
    /// Simulation frozen, frame still rendered with overlay
    Paused,
    /// Run ended by a collision
    Dead,
}

/// Which half of the play area a tap landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapSide {
    Left,
    Right,
}

/// The player's marker
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Current lane index (0 = leftmost)
    pub lane: u8,
    /// Fixed vertical position of the marker center
    pub y: f32,
    pub radius: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            lane: tuning.player_start_lane,
            y: tuning.player_y,
            radius: tuning.player_radius,
        }
    }

    /// Step one lane left, stopping at the edge. Returns true if the lane changed.
    pub fn move_left(&mut self) -> bool {
        if self.lane == 0 {
            return false;
        }
        self.lane -= 1;
        true
    }

    /// Step one lane right, stopping at `last_lane`. Returns true if the lane changed.
    pub fn move_right(&mut self, last_lane: u8) -> bool {
        if self.lane >= last_lane {
            return false;
        }
        self.lane += 1;
        true
    }

    /// Vertical extent of the marker (center ± radius)
    pub fn span(&self) -> Span {
        Span::new(self.y - self.radius, self.y + self.radius)
    }
}

/// A falling obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub lane: u8,
    /// Top edge (increases as the obstacle falls)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Already counted toward the score
    pub passed: bool,
}

impl Obstacle {
    /// Lower edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Vertical extent (top to top + height)
    pub fn span(&self) -> Span {
        Span::new(self.y, self.bottom())
    }

    /// True once the whole obstacle has left the bottom of the canvas
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.y > CANVAS_HEIGHT
    }

    /// Top-left and bottom-right corners in canvas space
    pub fn rect(&self, tuning: &Tuning) -> (Vec2, Vec2) {
        let cx = tuning.lane_center_x(self.lane);
        let half = self.width / 2.0;
        (
            Vec2::new(cx - half, self.y),
            Vec2::new(cx + half, self.bottom()),
        )
    }
}

/// Complete state of the current session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance parameters for this session
    pub tuning: Tuning,
    pub phase: RunPhase,
    pub player: Player,
    /// Active obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Seconds since the run started (paused time excluded)
    pub elapsed: f32,
    /// Current fall speed (pixels/s)
    pub speed: f32,
    /// Current, smoothed spawn interval (seconds)
    pub spawn_interval: f32,
    /// Time accumulated toward the next spawn
    pub spawn_timer: f32,
    pub score: u32,
    /// Best score across runs (persisted by the host)
    pub best_score: u32,
    /// Number of runs started this session
    pub runs: u32,
    /// Next obstacle ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh session
    pub fn new(tuning: Tuning, best_score: u32) -> Self {
        Self {
            phase: RunPhase::Running,
            player: Player::new(&tuning),
            obstacles: Vec::new(),
            elapsed: 0.0,
            speed: tuning.base_speed,
            spawn_interval: tuning.base_spawn_interval,
            spawn_timer: 0.0,
            score: 0,
            best_score,
            runs: 1,
            next_id: 1,
            tuning,
        }
    }

    /// Start a new run. Best score survives.
    pub fn restart(&mut self) {
        self.obstacles.clear();
        self.player = Player::new(&self.tuning);
        self.elapsed = 0.0;
        self.speed = self.tuning.base_speed;
        self.spawn_interval = self.tuning.base_spawn_interval;
        self.spawn_timer = 0.0;
        self.score = 0;
        self.phase = RunPhase::Running;
        self.runs += 1;
    }

    /// False once the run has ended
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.phase != RunPhase::Dead
    }

    /// True while the simulation advances
    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(Tuning::default(), 7);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.player.lane, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 7);
        assert_eq!(state.speed, 140.0);
        assert!(state.obstacles.is_empty());
        assert!(state.is_alive() && state.is_running());
    }

    #[test]
    fn test_player_lane_clamped() {
        let mut player = Player::new(&Tuning::default());
        assert!(player.move_left());
        assert!(!player.move_left());
        assert_eq!(player.lane, 0);

        assert!(player.move_right(2));
        assert!(player.move_right(2));
        assert!(!player.move_right(2));
        assert_eq!(player.lane, 2);
    }

    #[test]
    fn test_obstacle_geometry() {
        let tuning = Tuning::default();
        let obstacle = Obstacle {
            id: 1,
            lane: 0,
            y: 100.0,
            width: 84.0,
            height: 30.0,
            passed: false,
        };
        let (min, max) = obstacle.rect(&tuning);
        assert!((min.x - 18.0).abs() < 1e-4);
        assert!((max.x - 102.0).abs() < 1e-4);
        assert_eq!(min.y, 100.0);
        assert_eq!(max.y, 130.0);
        assert!(!obstacle.is_off_screen());
    }

    #[test]
    fn test_restart_keeps_best() {
        let mut state = GameState::new(Tuning::default(), 3);
        state.score = 12;
        state.best_score = 12;
        state.elapsed = 30.0;
        state.speed = 320.0;
        state.phase = RunPhase::Dead;
        state.player.lane = 0;

        state.restart();

        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 12);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.speed, state.tuning.base_speed);
        assert_eq!(state.player.lane, 1);
        assert_eq!(state.runs, 2);
    }
}
