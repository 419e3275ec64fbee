//! T-Rex Runner - a side-scrolling jump-and-dodge game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (jump physics, obstacles, collisions, game state)
//! - `session`: Binds the simulation to high score persistence
//! - `renderer`: Retained-mode drawing capability and the terminal canvas
//! - `platform`: Terminal input mapping
//! - `highscores`: Load/save of the best score
//! - `settings`: Settings file and paths
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (50 Hz)
    pub const TICK_MS: u64 = 20;
    /// Maximum ticks replayed per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Frame gaps longer than this are clamped (suspend, lag)
    pub const MAX_FRAME_MS: u64 = 100;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    /// Ground line - everything above is sky, below is floor
    pub const GROUND_Y: f32 = 300.0;

    /// Player defaults (fixed column, stands on the ground line)
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Top edge of the player while standing
    pub const PLAYER_REST_Y: f32 = GROUND_Y - PLAYER_HEIGHT;

    /// Jump impulse (negative = upward, units/tick)
    pub const JUMP_VELOCITY: f32 = -15.0;
    /// Gravity (added to velocity each tick while airborne)
    pub const GRAVITY: f32 = 1.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_HEIGHTS: [f32; 4] = [30.0, 40.0, 50.0, 60.0];

    /// Scroll speed (units/tick) and its step-up per `SPEED_STEP_SCORE` points
    pub const BASE_SPEED: f32 = 5.0;
    pub const SPEED_INCREMENT: f32 = 1.0;
    pub const SPEED_STEP_SCORE: u64 = 10;

    /// Spawn timing
    pub const SPAWN_DELAY_MIN_MS: u64 = 1500;
    pub const SPAWN_DELAY_MAX_MS: u64 = 3000;
    pub const FIRST_SPAWN_DELAY_MS: u64 = 1000;

    /// Upper bounds accepted from settings files
    pub const MAX_TICK_MS: u64 = 1000;
    pub const MAX_SPAWN_DELAY_MS: u64 = 60_000;
}
