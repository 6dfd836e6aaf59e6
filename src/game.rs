use rand::Rng;
use tracing::{debug, info};

use crate::components::{ChaserAgent, InvincibilityState, PlayerAgent};
use crate::ghost::move_chasers;
use crate::level::{DotField, Layout};
use crate::player::{consume_dot, move_player};

pub const DOT_REWARD: u32 = 10;
pub const STARTING_LIVES: u32 = 3;
pub const INVINCIBILITY_TICKS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    Over,
    Won,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Over | Phase::Won)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub phase: Phase,
    pub score: u32,
    pub lives: u32,
}

/// Everything one game mutates. The maze itself lives in the [`Layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub dots: DotField,
    pub player: PlayerAgent,
    pub chasers: Vec<ChaserAgent>,
    pub invincibility: InvincibilityState,
    pub state: SessionState,
}

impl Game {
    /// Fresh placement for `layout` in the given phase.
    pub fn new(layout: &Layout, phase: Phase) -> Self {
        Self {
            dots: DotField::for_maze(layout.maze()),
            player: layout.spawn_player(),
            chasers: layout.spawn_chasers(),
            invincibility: InvincibilityState::default(),
            state: SessionState {
                phase,
                score: 0,
                lives: STARTING_LIVES,
            },
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Advances the game by one tick. Outside `Playing` this does nothing.
    pub fn step(&mut self, layout: &Layout, rng: &mut impl Rng) -> Phase {
        if self.state.phase != Phase::Playing {
            return self.state.phase;
        }
        let maze = layout.maze();

        let moved = move_player(&mut self.player, maze);

        if moved && consume_dot(&self.player, &mut self.dots) {
            self.state.score += DOT_REWARD;
            debug!(
                row = self.player.position.row,
                col = self.player.position.col,
                score = self.state.score,
                remaining = self.dots.remaining(),
                "dot eaten"
            );
            if self.dots.is_cleared() {
                self.state.phase = Phase::Won;
                info!(score = self.state.score, "all dots cleared");
                return self.state.phase;
            }
        }

        move_chasers(&mut self.chasers, maze, rng);

        self.handle_collisions(layout);
        self.state.phase
    }

    fn handle_collisions(&mut self, layout: &Layout) {
        if self.invincibility.active {
            self.invincibility.tick();
            return;
        }

        let hit = self
            .chasers
            .iter()
            .position(|chaser| chaser.position == self.player.position);
        let Some(idx) = hit else {
            return;
        };

        self.state.lives = self.state.lives.saturating_sub(1);
        if self.state.lives == 0 {
            self.state.phase = Phase::Over;
            info!(chaser = idx, score = self.state.score, "last life lost");
            return;
        }

        info!(chaser = idx, lives = self.state.lives, "life lost, respawning");
        self.respawn(layout);
    }

    fn respawn(&mut self, layout: &Layout) {
        self.player = layout.spawn_player();
        self.chasers = layout.spawn_chasers();
        self.invincibility = InvincibilityState::granted(INVINCIBILITY_TICKS);
    }
}
