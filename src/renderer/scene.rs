//! Keeps a renderer's items in step with the game state
//!
//! Simulation entities carry their own ids; the scene remembers which
//! renderer handle draws each one, creating handles for new obstacles and
//! deleting the handles of obstacles that left the field.

use std::collections::{BTreeMap, HashSet};

use glam::Vec2;

use super::shapes::{Anchor, Color, ShapeStyle, Tag, TextStyle};
use super::Renderer;
use crate::consts::*;
use crate::sim::{Aabb, GameState, ObstacleId};

/// Where the game-over banner sits (the original canvas center)
const BANNER_POS: Vec2 = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0);
const HINT_POS: Vec2 = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0 + 30.0);
const HUD_MARGIN: f32 = 10.0;

pub struct Scene<H> {
    player: H,
    score: H,
    high_score: H,
    obstacles: BTreeMap<ObstacleId, H>,
    banner_shown: bool,
    /// Last (score, high score) written to the HUD
    hud: Option<(u64, u64)>,
}

impl<H: Copy + Eq + std::fmt::Debug> Scene<H> {
    /// Draw the static backdrop and HUD, then the current state
    pub fn new<R: Renderer<Handle = H>>(renderer: &mut R, state: &GameState) -> Self {
        renderer.create_rect(
            Aabb::from_corners(0.0, 0.0, FIELD_WIDTH, GROUND_Y),
            ShapeStyle::filled(Color::SkyBlue),
            Tag::Background,
        );
        renderer.create_rect(
            Aabb::from_corners(0.0, GROUND_Y, FIELD_WIDTH, FIELD_HEIGHT),
            ShapeStyle::filled(Color::SaddleBrown),
            Tag::Background,
        );

        let player = renderer.create_rect(
            state.player().bounds(),
            ShapeStyle::filled(Color::Green),
            Tag::Player,
        );
        let score = renderer.create_text(
            Vec2::new(HUD_MARGIN, HUD_MARGIN),
            "",
            TextStyle::new(Color::Black, 12, Anchor::NorthWest),
            Tag::Hud,
        );
        let high_score = renderer.create_text(
            Vec2::new(FIELD_WIDTH - HUD_MARGIN, HUD_MARGIN),
            "",
            TextStyle::new(Color::Black, 12, Anchor::NorthEast),
            Tag::Hud,
        );

        let mut scene = Self {
            player,
            score,
            high_score,
            obstacles: BTreeMap::new(),
            banner_shown: false,
            hud: None,
        };
        scene.sync(renderer, state);
        scene
    }

    /// Bring every drawn item up to date with `state`
    pub fn sync<R: Renderer<Handle = H>>(&mut self, renderer: &mut R, state: &GameState) {
        renderer.move_rect(self.player, state.player().bounds());

        let mut live = HashSet::with_capacity(state.obstacles().len());
        for obstacle in state.obstacles() {
            live.insert(obstacle.id);
            match self.obstacles.get(&obstacle.id) {
                Some(&handle) => renderer.move_rect(handle, obstacle.bounds()),
                None => {
                    let handle = renderer.create_rect(
                        obstacle.bounds(),
                        ShapeStyle::filled(Color::Brown),
                        Tag::Obstacle,
                    );
                    self.obstacles.insert(obstacle.id, handle);
                }
            }
        }
        self.obstacles.retain(|id, handle| {
            let keep = live.contains(id);
            if !keep {
                renderer.delete(*handle);
            }
            keep
        });

        let hud = (state.score(), state.high_score());
        if self.hud != Some(hud) {
            renderer.set_text(self.score, &format!("Score: {}", hud.0));
            renderer.set_text(self.high_score, &format!("High Score: {}", hud.1));
            self.hud = Some(hud);
        }

        match (state.is_game_over(), self.banner_shown) {
            (true, false) => {
                renderer.create_text(
                    BANNER_POS,
                    "Game Over",
                    TextStyle::new(Color::Red, 24, Anchor::Center),
                    Tag::Banner,
                );
                let final_score = state.final_score().unwrap_or_else(|| state.score());
                renderer.create_text(
                    HINT_POS,
                    &format!("Score {} - press R or click to restart", final_score),
                    TextStyle::new(Color::Black, 12, Anchor::Center),
                    Tag::Banner,
                );
                self.banner_shown = true;
            }
            (false, true) => {
                renderer.delete_tag(Tag::Banner);
                self.banner_shown = false;
            }
            _ => {}
        }
    }

    /// Renderer handle currently drawing `id`
    pub fn obstacle_handle(&self, id: ObstacleId) -> Option<H> {
        self.obstacles.get(&id).copied()
    }

    pub fn drawn_obstacles(&self) -> usize {
        self.obstacles.len()
    }
}
