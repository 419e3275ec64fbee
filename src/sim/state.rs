//! Game state and run lifecycle
//!
//! `GameState` exclusively owns the player, the obstacle field and the spawn
//! scheduler. Everything outside the simulation reads it through accessors
//! and changes it only through `jump`, `restart` and `tick`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::{Scheduler, TimerHandle, TimerKind};
use super::obstacles::{Obstacle, ObstacleField, ObstacleId};
use super::physics::Player;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active run
    Playing,
    /// Run ended by a collision; frozen until restart
    GameOver,
}

/// Something observable that happened during a tick or an input
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Jumped,
    Landed,
    ObstacleSpawned { id: ObstacleId, height: f32 },
    ObstaclePassed { id: ObstacleId, score: u64 },
    ObstacleRemoved { id: ObstacleId },
    SpeedUp { speed: f32 },
    /// The best score was beaten and should be persisted
    NewHighScore { score: u64 },
    GameOver { obstacle: ObstacleId, score: u64, high_score: u64 },
    Restarted { run: u32 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    tuning: Tuning,
    pub(crate) phase: GamePhase,
    pub(crate) score: u64,
    pub(crate) high_score: u64,
    /// Scroll speed in units/tick
    pub(crate) speed: f32,
    /// Simulation tick counter (all runs)
    pub(crate) time_ticks: u64,
    /// 1-based run counter, bumped on every restart
    pub(crate) run: u32,
    /// Score shown on the game-over banner
    pub(crate) final_score: Option<u64>,
    pub(crate) player: Player,
    pub(crate) field: ObstacleField,
    pub(crate) scheduler: Scheduler,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given seed and the previously stored best score
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            speed: tuning.speed_for_score(0),
            tuning,
            phase: GamePhase::Playing,
            score: 0,
            high_score,
            time_ticks: 0,
            run: 1,
            final_score: None,
            player: Player::default(),
            field: ObstacleField::new(),
            scheduler: Scheduler::new(),
            events: Vec::new(),
        };

        state.arm_first_spawn();
        state
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn final_score(&self) -> Option<u64> {
        self.final_score
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn run(&self) -> u32 {
        self.run
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Live obstacles in insertion order
    pub fn obstacles(&self) -> &[Obstacle] {
        self.field.obstacles()
    }

    /// Handle of the armed spawn timer (None once the run is over)
    pub fn spawn_timer(&self) -> Option<TimerHandle> {
        self.field.spawn_timer()
    }

    /// Request a jump. Ignored while airborne or after game over.
    pub fn jump(&mut self) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        let started = self.player.start_jump(self.tuning.jump_velocity);
        if started {
            self.events.push(GameEvent::Jumped);
        }
        started
    }

    /// Start a fresh run. Only meaningful from `GameOver`; ignored while playing.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }

        self.field.disarm(&mut self.scheduler);
        self.field.clear();
        self.player.reset();
        self.score = 0;
        self.speed = self.tuning.speed_for_score(0);
        self.final_score = None;
        self.run += 1;
        self.phase = GamePhase::Playing;
        self.arm_first_spawn();

        log::info!("Run {} started", self.run);
        self.events.push(GameEvent::Restarted { run: self.run });
        true
    }

    /// Events produced since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn arm_first_spawn(&mut self) {
        let delay = self.tuning.first_spawn_delay_ms;
        self.field.arm(&mut self.scheduler, delay);
    }

    /// Dispatch a fired timer. Timers that are not the currently armed
    /// handle, or that fire outside `Playing`, are dropped.
    pub(crate) fn on_timer(&mut self, handle: TimerHandle, kind: TimerKind) {
        match kind {
            TimerKind::SpawnObstacle => {
                if self.phase != GamePhase::Playing || !self.field.claim_timer(handle) {
                    log::debug!("Dropping stale spawn timer {}", handle.raw());
                    return;
                }
                let id = self
                    .field
                    .spawn_one(&mut self.rng, &self.tuning, &mut self.scheduler);
                let height = self.field.get(id).map(|o| o.height).unwrap_or_default();
                self.events.push(GameEvent::ObstacleSpawned { id, height });
            }
        }
    }

    /// One point for a passed obstacle; speed steps up on every multiple of the step size
    pub(crate) fn award_point(&mut self, id: ObstacleId) {
        self.score += 1;
        self.events.push(GameEvent::ObstaclePassed {
            id,
            score: self.score,
        });

        let speed = self.tuning.speed_for_score(self.score);
        if speed != self.speed {
            self.speed = speed;
            log::debug!("Score {} - speed now {}", self.score, self.speed);
            self.events.push(GameEvent::SpeedUp { speed });
        }
    }

    /// Collision: freeze the run and settle the high score
    pub(crate) fn end_run(&mut self, obstacle: ObstacleId) {
        self.phase = GamePhase::GameOver;
        self.field.disarm(&mut self.scheduler);
        self.final_score = Some(self.score);

        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore { score: self.score });
        }

        log::info!(
            "Game over on run {}: score {}, high score {}",
            self.run,
            self.score,
            self.high_score
        );
        self.events.push(GameEvent::GameOver {
            obstacle,
            score: self.score,
            high_score: self.high_score,
        });
    }
}
