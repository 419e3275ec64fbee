//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. Within a
//! tick the order is fixed: due timers, jump physics, obstacle movement and
//! scoring, then the collision check. Scoring before the collision check
//! means a point earned on the tick the run ends still counts.

use super::collision::check_all;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key pressed since the last tick
    pub jump: bool,
    /// Restart key pressed since the last tick
    pub restart: bool,
}

impl TickInput {
    pub fn jump() -> Self {
        Self {
            jump: true,
            ..Default::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Default::default()
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.restart();
    }
    if input.jump {
        state.jump();
    }

    // Frozen until restart
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    let tick_ms = state.tuning().tick_ms;
    for (handle, kind) in state.scheduler.advance(tick_ms) {
        state.on_timer(handle, kind);
    }

    // 1. Jump physics
    let gravity = state.tuning().gravity;
    if state.player.advance(gravity) {
        state.push_event(GameEvent::Landed);
    }

    // 2. Obstacle movement and pass scoring
    let report = state
        .field
        .advance_all(state.speed, state.player.leading_edge());
    for id in report.passed {
        state.award_point(id);
    }
    for id in report.removed {
        log::debug!("Obstacle {} left the field", id.0);
        state.push_event(GameEvent::ObstacleRemoved { id });
    }

    // 3. Collision check
    if let Some(id) = check_all(&state.player, state.field.obstacles()).map(|o| o.id) {
        state.end_run(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::ObstacleId;
    use crate::tuning::Tuning;

    fn new_game() -> GameState {
        GameState::new(12345, Tuning::default(), 0)
    }

    /// Tuning that never spawns on its own, for hand-placed obstacle tests
    fn quiet_game() -> GameState {
        let tuning = Tuning {
            first_spawn_delay_ms: u64::MAX / 2,
            ..Default::default()
        };
        GameState::new(12345, tuning, 0)
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_first_spawn_after_delay() {
        let mut state = new_game();
        let ticks_to_spawn = FIRST_SPAWN_DELAY_MS / TICK_MS;

        for _ in 0..ticks_to_spawn - 1 {
            tick(&mut state, &idle());
        }
        assert!(state.obstacles().is_empty());

        tick(&mut state, &idle());
        assert_eq!(state.obstacles().len(), 1);
        // Spawned at the right edge, then moved on the same tick
        assert_eq!(state.obstacles()[0].x, FIELD_WIDTH - BASE_SPEED);
    }

    #[test]
    fn test_jump_input_starts_jump() {
        let mut state = new_game();
        tick(&mut state, &TickInput::jump());
        assert!(state.player().is_jumping);
        assert_eq!(state.player().pos.y, PLAYER_REST_Y + JUMP_VELOCITY);

        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::Jumped);
    }

    #[test]
    fn test_jump_lands_after_fixed_ticks() {
        let mut state = quiet_game();
        tick(&mut state, &TickInput::jump());
        for _ in 0..30 {
            tick(&mut state, &idle());
        }
        assert!(!state.player().is_jumping);
        assert_eq!(state.player().pos.y, PLAYER_REST_Y);
        assert!(state.drain_events().contains(&GameEvent::Landed));
    }

    #[test]
    fn test_collision_ends_run() {
        let mut state = quiet_game();
        let id = state.field.insert(PLAYER_X + PLAYER_WIDTH + BASE_SPEED - 1.0, 40.0);

        tick(&mut state, &idle());

        assert_eq!(state.phase(), GamePhase::GameOver);
        assert!(state.drain_events().iter().any(|e| matches!(
            e,
            GameEvent::GameOver { obstacle, .. } if *obstacle == id
        )));
    }

    #[test]
    fn test_touching_obstacle_does_not_end_run() {
        let mut state = quiet_game();
        // Left edge lands exactly on the player's right edge
        state.field.insert(PLAYER_X + PLAYER_WIDTH + BASE_SPEED, 40.0);
        tick(&mut state, &idle());
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_jumping_over_obstacle_scores_once() {
        let mut state = quiet_game();
        state.field.insert(PLAYER_X + PLAYER_WIDTH + 60.0, 60.0);

        tick(&mut state, &TickInput::jump());
        for _ in 0..60 {
            tick(&mut state, &idle());
        }

        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_point_on_death_tick_counts() {
        let mut state = quiet_game();
        // Passed this tick, ending up just behind the player without touching it
        let passed = state.field.insert(PLAYER_X - OBSTACLE_WIDTH + BASE_SPEED, 30.0);
        // Collides this tick
        let hit = state.field.insert(PLAYER_X + PLAYER_WIDTH, 30.0);

        tick(&mut state, &idle());

        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.score(), 1);
        assert_eq!(state.final_score(), Some(1));

        let events = state.drain_events();
        let pass_at = events
            .iter()
            .position(|e| *e == GameEvent::ObstaclePassed { id: passed, score: 1 });
        let over_at = events.iter().position(|e| matches!(e, GameEvent::GameOver { .. }));
        assert!(pass_at.expect("passed") < over_at.expect("game over"));
        assert!(matches!(events[over_at.unwrap()], GameEvent::GameOver { obstacle, .. } if obstacle == hit));
    }

    #[test]
    fn test_game_over_freezes_everything() {
        let mut state = new_game();
        state.field.insert(PLAYER_X + 10.0, 40.0);
        tick(&mut state, &idle());
        assert!(state.is_game_over());

        let score = state.score();
        let speed = state.speed();
        let ticks = state.time_ticks();
        let xs: Vec<f32> = state.obstacles().iter().map(|o| o.x).collect();

        for _ in 0..500 {
            tick(&mut state, &TickInput::jump());
        }

        assert_eq!(state.score(), score);
        assert_eq!(state.speed(), speed);
        assert_eq!(state.time_ticks(), ticks);
        assert_eq!(state.obstacles().iter().map(|o| o.x).collect::<Vec<_>>(), xs);
        assert!(!state.player().is_jumping);
        // No spawn can sneak in after death
        assert_eq!(state.obstacles().len(), 1);
        assert!(state.spawn_timer().is_none());
    }

    #[test]
    fn test_restart_matches_fresh_first_tick() {
        let mut played = new_game();
        // Play until an obstacle ends the run
        let mut guard = 0;
        while !played.is_game_over() {
            tick(&mut played, &idle());
            guard += 1;
            assert!(guard < 10_000, "run never ended");
        }

        tick(&mut played, &TickInput::restart());

        let mut fresh = new_game();
        tick(&mut fresh, &idle());

        assert_eq!(played.phase(), fresh.phase());
        assert_eq!(played.score(), fresh.score());
        assert_eq!(played.speed(), fresh.speed());
        assert_eq!(played.player(), fresh.player());
        assert_eq!(played.obstacles(), fresh.obstacles());
        assert_eq!(
            played.scheduler.remaining_ms(played.spawn_timer().expect("armed")),
            fresh.scheduler.remaining_ms(fresh.spawn_timer().expect("armed")),
        );
    }

    #[test]
    fn test_removed_obstacle_event() {
        let mut state = quiet_game();
        let id = state.field.insert(2.0, 30.0);
        tick(&mut state, &idle());
        assert!(state.obstacles().is_empty());
        assert_eq!(state.phase(), GamePhase::Playing);
        assert!(state.drain_events().contains(&GameEvent::ObstacleRemoved { id }));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, Tuning::default(), 0);
        let mut state2 = GameState::new(99999, Tuning::default(), 0);

        for i in 0..2000u32 {
            let input = TickInput {
                jump: i % 37 == 0,
                restart: i % 401 == 0,
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks(), state2.time_ticks());
        assert_eq!(state1.score(), state2.score());
        assert_eq!(state1.run(), state2.run());
        assert_eq!(state1.obstacles(), state2.obstacles());
        assert_eq!(state1.drain_events(), state2.drain_events());
    }

    #[test]
    fn test_oversized_tick_interval_keeps_running() {
        let settings =
            crate::Settings::from_json(r#"{ "tuning": { "tick_ms": 18446744073709551615 } }"#)
                .expect("valid json");
        assert_eq!(settings.tuning.tick_ms, MAX_TICK_MS);
        let mut state = GameState::new(1, settings.tuning, 0);
        for _ in 0..5 {
            tick(&mut state, &idle());
        }
        assert_eq!(state.phase(), GamePhase::Playing);
        assert!(state.spawn_timer().is_some());

        // Even unsanitized, the virtual clock saturates instead of overflowing
        let raw = Tuning {
            tick_ms: u64::MAX,
            ..Default::default()
        };
        let mut state = GameState::new(1, raw, 0);
        tick(&mut state, &idle());
        tick(&mut state, &idle());
        assert_eq!(state.time_ticks(), 2);
    }

    #[test]
    fn test_ids_never_reused_across_restart() {
        let mut state = new_game();
        let mut seen: Vec<ObstacleId> = Vec::new();

        for i in 0..3000u32 {
            let input = TickInput {
                restart: true,
                jump: i % 23 == 0,
            };
            tick(&mut state, &input);
            for event in state.drain_events() {
                if let GameEvent::ObstacleSpawned { id, .. } = event {
                    assert!(!seen.contains(&id), "id {:?} reused", id);
                    seen.push(id);
                }
            }
        }
        assert!(!seen.is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn score_monotonic_while_playing(
                seed in 0u64..500,
                jumps in proptest::collection::vec(any::<bool>(), 100..600)
            ) {
                let mut state = GameState::new(seed, Tuning::default(), 0);
                let mut last_score = 0;

                for &jump in &jumps {
                    tick(&mut state, &TickInput { jump, restart: false });
                    prop_assert!(state.score() >= last_score);
                    last_score = state.score();
                    if state.is_game_over() {
                        prop_assert!(state.high_score() >= state.score());
                        break;
                    }
                }
            }

            #[test]
            fn player_never_below_ground(
                seed in 0u64..500,
                jumps in proptest::collection::vec(any::<bool>(), 50..400)
            ) {
                let mut state = GameState::new(seed, Tuning::default(), 0);
                for &jump in &jumps {
                    tick(&mut state, &TickInput { jump, restart: jump });
                    let player = state.player();
                    prop_assert!(player.pos.y <= player.rest_y);
                    if !player.is_jumping {
                        prop_assert_eq!(player.pos.y, player.rest_y);
                        prop_assert_eq!(player.vel_y, 0.0);
                    }
                }
            }

            #[test]
            fn double_jump_same_as_single(
                seed in 0u64..500,
                warmup in 0usize..40
            ) {
                let mut once = GameState::new(seed, Tuning::default(), 0);
                for _ in 0..warmup {
                    tick(&mut once, &TickInput::default());
                }
                let mut twice = once.clone();

                once.jump();
                twice.jump();
                twice.jump();

                prop_assert_eq!(once.player(), twice.player());
                for _ in 0..40 {
                    tick(&mut once, &TickInput::default());
                    tick(&mut twice, &TickInput::default());
                }
                prop_assert_eq!(once.player(), twice.player());
                prop_assert_eq!(once.score(), twice.score());
                prop_assert_eq!(once.phase(), twice.phase());
            }

            #[test]
            fn restart_after_any_run_matches_fresh(
                seed in 0u64..500,
                jumps in proptest::collection::vec(any::<bool>(), 0..300)
            ) {
                let mut played = GameState::new(seed, Tuning::default(), 0);
                for &jump in &jumps {
                    if played.is_game_over() {
                        break;
                    }
                    tick(&mut played, &TickInput { jump, restart: false });
                }
                if !played.is_game_over() {
                    // A wall tall enough to catch the player mid-jump
                    played.field.insert(PLAYER_X + 10.0, 250.0);
                    tick(&mut played, &TickInput::default());
                }
                prop_assert!(played.is_game_over());

                tick(&mut played, &TickInput::restart());
                let mut fresh = GameState::new(seed, Tuning::default(), 0);
                tick(&mut fresh, &TickInput::default());

                prop_assert_eq!(played.phase(), fresh.phase());
                prop_assert_eq!(played.score(), 0);
                prop_assert_eq!(played.speed(), fresh.speed());
                prop_assert_eq!(played.player(), fresh.player());
                prop_assert!(played.obstacles().is_empty());
                prop_assert_eq!(
                    played.spawn_timer().and_then(|h| played.scheduler.remaining_ms(h)),
                    fresh.spawn_timer().and_then(|h| fresh.scheduler.remaining_ms(h))
                );
            }
        }
    }
}
