//! Player jump physics
//!
//! Screen coordinates: y grows downward, so a jump starts with a negative
//! velocity and gravity pulls it back toward the ground.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// The player-controlled runner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner. `x` never changes.
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity in units/tick (negative = upward)
    pub vel_y: f32,
    pub is_jumping: bool,
    /// Top edge while standing on the ground
    pub rest_y: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_X, GROUND_Y, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }
}

impl Player {
    /// Create a player standing on `ground_y` at column `x`
    pub fn new(x: f32, ground_y: f32, size: Vec2) -> Self {
        let rest_y = ground_y - size.y;
        Self {
            pos: Vec2::new(x, rest_y),
            size,
            vel_y: 0.0,
            is_jumping: false,
            rest_y,
        }
    }

    /// Begin a jump. Rejected (returns false) while already airborne.
    pub fn start_jump(&mut self, velocity: f32) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.is_jumping = true;
        self.vel_y = velocity;
        true
    }

    /// Integrate one tick of the jump arc. Returns true on the tick the player lands.
    pub fn advance(&mut self, gravity: f32) -> bool {
        if !self.is_jumping {
            return false;
        }

        self.pos.y += self.vel_y;
        self.vel_y += gravity;

        if self.pos.y >= self.rest_y {
            self.pos.y = self.rest_y;
            self.vel_y = 0.0;
            self.is_jumping = false;
            return true;
        }
        false
    }

    /// Put the player back on the ground, at rest
    pub fn reset(&mut self) {
        self.pos.y = self.rest_y;
        self.vel_y = 0.0;
        self.is_jumping = false;
    }

    pub fn is_grounded(&self) -> bool {
        !self.is_jumping && self.pos.y == self.rest_y
    }

    /// Right edge (the side facing incoming obstacles)
    pub fn leading_edge(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.pos + self.size)
    }
}
