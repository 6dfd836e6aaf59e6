use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::session::Timing;

pub const DEFAULT_TICK_MS: u64 = 150;
pub const DEFAULT_RENDER_FPS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Theme {
    Classic,
    Mono,
}

/// Command-line flags, each with an environment fallback.
#[derive(Debug, Clone, Parser)]
#[command(name = "pacman")]
#[command(about = "Eat every dot in the maze while dodging four wandering ghosts")]
pub struct Settings {
    /// Milliseconds per simulation tick
    #[arg(long, env = "PACMAN_TICK_MS", default_value_t = DEFAULT_TICK_MS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Redraws per second
    #[arg(long, env = "PACMAN_FPS", default_value_t = DEFAULT_RENDER_FPS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub fps: u64,

    /// Seed for ghost movement; random when omitted
    #[arg(long, env = "PACMAN_SEED")]
    pub seed: Option<u64>,

    /// Text layout file to play instead of the built-in maze
    #[arg(long, env = "PACMAN_MAZE", value_name = "PATH")]
    pub maze: Option<PathBuf>,

    /// Color scheme
    #[arg(long, env = "PACMAN_THEME", value_enum, default_value_t = Theme::Classic)]
    pub theme: Theme,

    /// Write trace output to this file (filtered by RUST_LOG)
    #[arg(long, env = "PACMAN_LOG", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn timing(&self) -> Timing {
        Timing {
            tick: Duration::from_millis(self.tick_ms),
            frame: Duration::from_micros(1_000_000 / self.fps.max(1)),
        }
    }
}
