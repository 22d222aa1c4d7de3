//! Collision detection between the player marker and obstacles
//!
//! Lanes are discrete, so a hit is a lane match plus a 1D overlap test on the
//! vertical axis.

use super::state::{Obstacle, Player};

/// A closed vertical interval [min, max]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// True if the two intervals share more than a single edge point
    #[inline]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.min < other.max && other.min < self.max
    }
}

/// Check one obstacle against the player
pub fn obstacle_hits_player(obstacle: &Obstacle, player: &Player) -> bool {
    obstacle.lane == player.lane && obstacle.span().overlaps(&player.span())
}

/// Find the first obstacle (in spawn order) touching the player
pub fn first_hit<'a>(obstacles: &'a [Obstacle], player: &Player) -> Option<&'a Obstacle> {
    obstacles.iter().find(|o| obstacle_hits_player(o, player))
}
