//! Axis-aligned bounding box collision detection
//!
//! Overlap is strict: boxes that only share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacles::Obstacle;
use super::physics::Player;

/// Axis-aligned box given by its top-left (`min`) and bottom-right (`max`) corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Build from `(x0, y0, x1, y1)` corner coordinates
    pub fn from_corners(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Check whether the player currently hits an obstacle
pub fn collides_with(player: &Player, obstacle: &Obstacle) -> bool {
    player.bounds().overlaps(&obstacle.bounds())
}

/// First obstacle (in iteration order) the player overlaps, if any
pub fn check_all<'a>(player: &Player, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    let hitbox = player.bounds();
    obstacles.iter().find(|o| hitbox.overlaps(&o.bounds()))
}
