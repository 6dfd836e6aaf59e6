//! Grid chase game: a fixed-tick simulation of one player and several
//! randomly wandering chasers, plus a terminal front end.

pub mod components;
pub mod config;
pub mod error;
pub mod game;
pub mod ghost;
pub mod input;
pub mod level;
pub mod movement;
pub mod player;
pub mod render;
pub mod session;
pub mod terminal;

pub use components::{Cell, ChaserAgent, ChaserColor, Direction, InvincibilityState, PlayerAgent};
pub use game::{Game, Phase, SessionState, DOT_REWARD, INVINCIBILITY_TICKS, STARTING_LIVES};
pub use level::{CellKind, DotField, Layout, LayoutError, Maze};
pub use movement::{can_move, next_cell};
pub use session::{Session, Timing};
