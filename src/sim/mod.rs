//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, virtual clock only
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod state;
pub mod tick;

pub use clock::{FixedStep, Scheduler, TimerHandle, TimerKind};
pub use collision::{Aabb, check_all, collides_with};
pub use obstacles::{FieldAdvance, Obstacle, ObstacleField, ObstacleId};
pub use physics::Player;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
