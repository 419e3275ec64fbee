//! Data-driven game balance
//!
//! Every knob the simulation reads. Defaults come from `consts`; a settings
//! file can override any subset of them.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Simulation tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fixed tick interval in milliseconds
    pub tick_ms: u64,
    /// Initial jump velocity (units/tick, negative = upward)
    pub jump_velocity: f32,
    /// Gravity (units/tick², positive = downward)
    pub gravity: f32,
    /// Scroll speed at the start of a run (units/tick)
    pub base_speed: f32,
    /// Speed added every `speed_step_score` points
    pub speed_increment: f32,
    pub speed_step_score: u64,
    /// Random delay range between spawns
    pub spawn_delay_min_ms: u64,
    pub spawn_delay_max_ms: u64,
    /// Delay before the first obstacle of a run
    pub first_spawn_delay_ms: u64,
    /// Heights an obstacle may be drawn from (uniformly)
    pub obstacle_heights: Vec<f32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            speed_step_score: SPEED_STEP_SCORE,
            spawn_delay_min_ms: SPAWN_DELAY_MIN_MS,
            spawn_delay_max_ms: SPAWN_DELAY_MAX_MS,
            first_spawn_delay_ms: FIRST_SPAWN_DELAY_MS,
            obstacle_heights: OBSTACLE_HEIGHTS.to_vec(),
        }
    }
}

impl Tuning {
    /// Replace values the simulation cannot run with, logging each fix
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.tick_ms == 0 {
            log::warn!("tick_ms must be positive, using {}", defaults.tick_ms);
            self.tick_ms = defaults.tick_ms;
        } else if self.tick_ms > MAX_TICK_MS {
            log::warn!("tick_ms {} is too long, using {}", self.tick_ms, MAX_TICK_MS);
            self.tick_ms = MAX_TICK_MS;
        }
        if !(self.jump_velocity < 0.0) {
            log::warn!(
                "jump_velocity {} does not point upward, using {}",
                self.jump_velocity,
                defaults.jump_velocity
            );
            self.jump_velocity = defaults.jump_velocity;
        }
        if !(self.gravity > 0.0) {
            log::warn!("gravity {} would never land, using {}", self.gravity, defaults.gravity);
            self.gravity = defaults.gravity;
        }
        if !(self.base_speed > 0.0) {
            log::warn!("base_speed {} must be positive, using {}", self.base_speed, defaults.base_speed);
            self.base_speed = defaults.base_speed;
        }
        if !(self.speed_increment >= 0.0) {
            log::warn!("speed_increment {} is negative, using 0", self.speed_increment);
            self.speed_increment = 0.0;
        }
        if self.speed_step_score == 0 {
            log::warn!("speed_step_score must be positive, using {}", defaults.speed_step_score);
            self.speed_step_score = defaults.speed_step_score;
        }
        for (name, delay) in [
            ("spawn_delay_min_ms", &mut self.spawn_delay_min_ms),
            ("spawn_delay_max_ms", &mut self.spawn_delay_max_ms),
            ("first_spawn_delay_ms", &mut self.first_spawn_delay_ms),
        ] {
            if *delay > MAX_SPAWN_DELAY_MS {
                log::warn!("{} {} is too long, using {}", name, delay, MAX_SPAWN_DELAY_MS);
                *delay = MAX_SPAWN_DELAY_MS;
            }
        }
        if self.spawn_delay_min_ms > self.spawn_delay_max_ms {
            log::warn!(
                "spawn delay range {}..{} is inverted, swapping",
                self.spawn_delay_min_ms,
                self.spawn_delay_max_ms
            );
            std::mem::swap(&mut self.spawn_delay_min_ms, &mut self.spawn_delay_max_ms);
        }

        let before = self.obstacle_heights.len();
        self.obstacle_heights
            .retain(|h| h.is_finite() && *h > 0.0 && *h < GROUND_Y);
        if self.obstacle_heights.len() != before {
            log::warn!("Dropped {} invalid obstacle heights", before - self.obstacle_heights.len());
        }
        if self.obstacle_heights.is_empty() {
            log::warn!("No obstacle heights configured, using defaults");
            self.obstacle_heights = defaults.obstacle_heights;
        }

        self
    }

    /// Speed for a given score: base plus one increment per completed step
    pub fn speed_for_score(&self, score: u64) -> f32 {
        let steps = score / self.speed_step_score.max(1);
        self.base_speed + steps as f32 * self.speed_increment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_already_sane() {
        assert_eq!(Tuning::default().sanitized(), Tuning::default());
    }

    #[test]
    fn test_sanitize_fixes_bad_values() {
        let tuning = Tuning {
            tick_ms: 0,
            jump_velocity: 4.0,
            gravity: -1.0,
            base_speed: 0.0,
            speed_increment: -2.0,
            speed_step_score: 0,
            spawn_delay_min_ms: 3000,
            spawn_delay_max_ms: 1000,
            first_spawn_delay_ms: 0,
            obstacle_heights: vec![-5.0, f32::NAN, 500.0],
        }
        .sanitized();

        let defaults = Tuning::default();
        assert_eq!(tuning.tick_ms, defaults.tick_ms);
        assert_eq!(tuning.jump_velocity, defaults.jump_velocity);
        assert_eq!(tuning.gravity, defaults.gravity);
        assert_eq!(tuning.base_speed, defaults.base_speed);
        assert_eq!(tuning.speed_increment, 0.0);
        assert_eq!(tuning.speed_step_score, defaults.speed_step_score);
        assert_eq!((tuning.spawn_delay_min_ms, tuning.spawn_delay_max_ms), (1000, 3000));
        assert_eq!(tuning.first_spawn_delay_ms, 0);
        assert_eq!(tuning.obstacle_heights, defaults.obstacle_heights);
    }

    #[test]
    fn test_sanitize_clamps_long_intervals() {
        let tuning = Tuning {
            tick_ms: u64::MAX,
            spawn_delay_min_ms: u64::MAX - 1,
            spawn_delay_max_ms: u64::MAX,
            first_spawn_delay_ms: 90_000,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(tuning.tick_ms, MAX_TICK_MS);
        assert_eq!(tuning.spawn_delay_min_ms, MAX_SPAWN_DELAY_MS);
        assert_eq!(tuning.spawn_delay_max_ms, MAX_SPAWN_DELAY_MS);
        assert_eq!(tuning.first_spawn_delay_ms, MAX_SPAWN_DELAY_MS);
    }

    #[test]
    fn test_speed_steps_at_multiples() {
        let tuning = Tuning::default();
        assert_eq!(tuning.speed_for_score(0), BASE_SPEED);
        assert_eq!(tuning.speed_for_score(9), BASE_SPEED);
        assert_eq!(tuning.speed_for_score(10), BASE_SPEED + SPEED_INCREMENT);
        assert_eq!(tuning.speed_for_score(19), BASE_SPEED + SPEED_INCREMENT);
        assert_eq!(tuning.speed_for_score(30), BASE_SPEED + 3.0 * SPEED_INCREMENT);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "gravity": 2.0 }"#).expect("valid json");
        assert_eq!(tuning.gravity, 2.0);
        assert_eq!(tuning.tick_ms, TICK_MS);
        assert_eq!(tuning.obstacle_heights, OBSTACLE_HEIGHTS.to_vec());
    }
}
