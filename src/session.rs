//! A play session: simulation plus high score persistence
//!
//! The store is read once when the session starts and written only when a
//! run beats the stored best. Save failures are logged and play continues.

use crate::highscores::HighScoreStore;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session<S: HighScoreStore> {
    state: GameState,
    store: S,
    /// Input collected since the last tick
    pending: TickInput,
}

impl<S: HighScoreStore> Session<S> {
    pub fn new(mut store: S, tuning: Tuning, seed: u64) -> Self {
        let high_score = store.load();
        log::info!("Session started with seed {} (high score {})", seed, high_score);
        Self {
            state: GameState::new(seed, tuning, high_score),
            store,
            pending: TickInput::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Queue a jump for the next tick
    pub fn request_jump(&mut self) {
        self.pending.jump = true;
    }

    /// Queue a restart for the next tick
    pub fn request_restart(&mut self) {
        self.pending.restart = true;
    }

    /// Run one tick with the queued input; returns the events it produced
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let input = std::mem::take(&mut self.pending);
        tick(&mut self.state, &input);
        let events = self.state.drain_events();
        self.persist(&events);
        events
    }

    fn persist(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::NewHighScore { score } = event {
                if let Err(e) = self.store.save(*score) {
                    log::warn!("Failed to save high score {}: {}", score, e);
                }
            }
        }
    }
}
