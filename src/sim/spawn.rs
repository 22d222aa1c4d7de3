//! Obstacle spawning
//!
//! Randomness enters the simulation only through [`SpawnSource`], so tests can
//! script exact lanes and heights while the game feeds a seeded PCG.

use rand::Rng;

use super::state::{GameState, Obstacle};

/// Random choices needed to spawn an obstacle
pub trait SpawnSource {
    /// Uniform lane index in `0..lane_count`
    fn pick_lane(&mut self, lane_count: u8) -> u8;
    /// Uniform height in `[min, max)`
    fn pick_height(&mut self, min: f32, max: f32) -> f32;
}

impl<R: Rng> SpawnSource for R {
    fn pick_lane(&mut self, lane_count: u8) -> u8 {
        self.random_range(0..lane_count)
    }

    fn pick_height(&mut self, min: f32, max: f32) -> f32 {
        self.random_range(min..max)
    }
}

/// Replays fixed lane/height sequences, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSpawns {
    lanes: Vec<u8>,
    heights: Vec<f32>,
    lane_idx: usize,
    height_idx: usize,
}

impl ScriptedSpawns {
    pub fn new(lanes: Vec<u8>, heights: Vec<f32>) -> Self {
        Self {
            lanes,
            heights,
            lane_idx: 0,
            height_idx: 0,
        }
    }
}

impl SpawnSource for ScriptedSpawns {
    fn pick_lane(&mut self, lane_count: u8) -> u8 {
        let lane = self.lanes.get(self.lane_idx % self.lanes.len().max(1)).copied();
        self.lane_idx += 1;
        lane.unwrap_or(0).min(lane_count.saturating_sub(1))
    }

    fn pick_height(&mut self, min: f32, max: f32) -> f32 {
        let height = self
            .heights
            .get(self.height_idx % self.heights.len().max(1))
            .copied();
        self.height_idx += 1;
        height.unwrap_or(min).clamp(min, max)
    }
}

/// Create a new obstacle just above the visible area and add it to the state
pub fn spawn_obstacle<S: SpawnSource + ?Sized>(state: &mut GameState, source: &mut S) -> u32 {
    let tuning = &state.tuning;
    let lane = source.pick_lane(tuning.lane_count);
    let height = source.pick_height(tuning.obstacle_min_height, tuning.obstacle_max_height);
    let width = tuning.lane_width() * tuning.obstacle_width_ratio;

    let id = state.next_obstacle_id();
    state.obstacles.push(Obstacle {
        id,
        lane,
        y: -height,
        width,
        height,
        passed: false,
    });
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_above_canvas() {
        let mut state = GameState::new(Tuning::default(), 0);
        let mut source = ScriptedSpawns::new(vec![2], vec![30.0]);

        let id = spawn_obstacle(&mut state, &mut source);

        assert_eq!(state.obstacles.len(), 1);
        let o = &state.obstacles[0];
        assert_eq!(o.id, id);
        assert_eq!(o.lane, 2);
        assert_eq!(o.height, 30.0);
        assert_eq!(o.y, -30.0);
        assert!((o.width - 84.0).abs() < 1e-4);
        assert!(!o.passed);
    }

    #[test]
    fn test_scripted_cycles_and_clamps() {
        let mut source = ScriptedSpawns::new(vec![0, 7], vec![10.0, 50.0]);
        assert_eq!(source.pick_lane(3), 0);
        assert_eq!(source.pick_lane(3), 2);
        assert_eq!(source.pick_lane(3), 0);
        assert_eq!(source.pick_height(24.0, 64.0), 24.0);
        assert_eq!(source.pick_height(24.0, 64.0), 50.0);
    }

    #[test]
    fn test_rng_source_in_range() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..500 {
            let lane = rng.pick_lane(3);
            assert!(lane < 3);
            let h = rng.pick_height(24.0, 64.0);
            assert!((24.0..64.0).contains(&h));
        }
    }

    #[test]
    fn test_seeded_spawns_repeat() {
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        let lanes_a: Vec<u8> = (0..20).map(|_| a.pick_lane(3)).collect();
        let lanes_b: Vec<u8> = (0..20).map(|_| b.pick_lane(3)).collect();
        assert_eq!(lanes_a, lanes_b);
    }
}
