//! Obstacle field: spawning, scrolling, pass tracking and recycling
//!
//! Obstacles enter at the right edge of the field and scroll left by the
//! current game speed every tick. Ids come from a monotonically increasing
//! counter, so a recycled obstacle is always a new entity with a new id.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::clock::{Scheduler, TimerHandle, TimerKind};
use super::collision::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Stable identity of a live obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

/// A ground obstacle (cactus)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Set once the player has cleared it (scored exactly once)
    pub passed: bool,
}

impl Obstacle {
    pub fn new(id: ObstacleId, x: f32, height: f32) -> Self {
        Self {
            id,
            x,
            width: OBSTACLE_WIDTH,
            height,
            passed: false,
        }
    }

    /// Top edge, derived from the ground line so obstacles never float
    pub fn top(&self) -> f32 {
        GROUND_Y - self.height
    }

    /// Trailing (right) edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_corners(self.x, self.top(), self.right(), GROUND_Y)
    }
}

/// What happened to the field during one `advance_all`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldAdvance {
    /// Obstacles that were passed this tick, in field order
    pub passed: Vec<ObstacleId>,
    /// Obstacles that left the field this tick
    pub removed: Vec<ObstacleId>,
}

/// Live obstacles plus the self-rearming spawn timer
#[derive(Debug, Clone)]
pub struct ObstacleField {
    /// Insertion order, which is also collision check order
    obstacles: Vec<Obstacle>,
    next_id: u32,
    spawn_timer: Option<TimerHandle>,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleField {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
            spawn_timer: None,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    /// Add an obstacle with a fresh id at `x`
    pub fn insert(&mut self, x: f32, height: f32) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id += 1;
        self.obstacles.push(Obstacle::new(id, x, height));
        id
    }

    /// Spawn one obstacle at the right edge and re-arm the spawn timer
    pub fn spawn_one<R: Rng>(
        &mut self,
        rng: &mut R,
        tuning: &Tuning,
        scheduler: &mut Scheduler,
    ) -> ObstacleId {
        let height = tuning
            .obstacle_heights
            .choose(rng)
            .copied()
            .unwrap_or(OBSTACLE_HEIGHTS[0]);
        let id = self.insert(FIELD_WIDTH, height);

        let delay = rng.random_range(tuning.spawn_delay_min_ms..=tuning.spawn_delay_max_ms);
        self.arm(scheduler, delay);

        log::debug!("Spawned obstacle {} (height {}), next in {}ms", id.0, height, delay);
        id
    }

    /// Arm the spawn timer, replacing any pending one
    pub fn arm(&mut self, scheduler: &mut Scheduler, delay_ms: u64) {
        self.disarm(scheduler);
        self.spawn_timer = Some(scheduler.schedule(delay_ms, TimerKind::SpawnObstacle));
    }

    /// Cancel the pending spawn timer, if any
    pub fn disarm(&mut self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.spawn_timer.take() {
            scheduler.cancel(handle);
        }
    }

    pub fn spawn_timer(&self) -> Option<TimerHandle> {
        self.spawn_timer
    }

    /// Accept a fired timer only if it is the one currently armed.
    /// Stale handles from a previous run or a cancelled arm are rejected.
    pub fn claim_timer(&mut self, handle: TimerHandle) -> bool {
        if self.spawn_timer == Some(handle) {
            self.spawn_timer = None;
            true
        } else {
            false
        }
    }

    /// Scroll every obstacle left by `speed`, record passes against the
    /// player's leading edge, and drop obstacles that left the field.
    pub fn advance_all(&mut self, speed: f32, player_front: f32) -> FieldAdvance {
        let mut report = FieldAdvance::default();

        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
            if !obstacle.passed && obstacle.right() < player_front {
                obstacle.passed = true;
                report.passed.push(obstacle.id);
            }
        }

        self.obstacles.retain(|o| {
            if o.x < 0.0 {
                report.removed.push(o.id);
                false
            } else {
                true
            }
        });

        report
    }

    /// Drop every obstacle (ids keep counting up)
    pub fn clear(&mut self) {
        self.obstacles.clear();
    }
}
