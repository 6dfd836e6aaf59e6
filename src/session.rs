use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info};

use crate::components::Direction;
use crate::game::{Game, Phase, SessionState};
use crate::level::Layout;

/// Loop cadences. The simulation and the redraw run independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub tick: Duration,
    pub frame: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(150),
            frame: Duration::from_micros(1_000_000 / 60),
        }
    }
}

/// Periodic timer handle. Dropping it is cancelling it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    last: Instant,
}

impl Interval {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self { period, last: now }
    }

    /// Fires at most once per call; a late poll does not queue catch-up firings.
    pub fn fire(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.period {
            self.last = now;
            true
        } else {
            false
        }
    }

    pub fn deadline(&self) -> Instant {
        self.last + self.period
    }
}

/// The two loop handles of a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopHandles {
    pub simulation: Interval,
    pub frame: Interval,
}

/// What one [`Session::pump`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pump {
    pub stepped: bool,
    pub frame_due: bool,
}

/// Owns the game, its phase machine, the chaser RNG and the loop handles.
pub struct Session<R> {
    layout: Layout,
    game: Game,
    rng: R,
    timing: Timing,
    handles: Option<LoopHandles>,
}

impl<R: Rng> Session<R> {
    pub fn new(layout: Layout, rng: R, timing: Timing) -> Self {
        let game = Game::new(&layout, Phase::Idle);
        Self {
            layout,
            game,
            rng,
            timing,
            handles: None,
        }
    }

    /// Start or restart. Any running loops are cancelled before the reset,
    /// then fresh handles are scheduled from `now`.
    pub fn start(&mut self, now: Instant) {
        self.cancel_loops();
        self.game = Game::new(&self.layout, Phase::Playing);
        self.handles = Some(LoopHandles {
            simulation: Interval::new(self.timing.tick, now),
            frame: Interval::new(self.timing.frame, now),
        });
        info!(
            dots = self.game.dots.remaining(),
            chasers = self.game.chasers.len(),
            "game started"
        );
    }

    /// Buffers a turn for the next tick. Dropped unless a game is running.
    pub fn set_pending_direction(&mut self, dir: Direction) {
        match self.game.phase() {
            Phase::Playing => self.game.player.pending_direction = Some(dir),
            Phase::Idle | Phase::Over | Phase::Won => {
                debug!(?dir, "input ignored outside play");
            }
        }
    }

    /// Runs one simulation step immediately. Leaving `Playing` cancels the loops.
    pub fn tick(&mut self) -> Phase {
        let phase = self.game.step(&self.layout, &mut self.rng);
        if phase != Phase::Playing {
            self.cancel_loops();
        }
        phase
    }

    /// Drives both loops from one clock reading.
    pub fn pump(&mut self, now: Instant) -> Pump {
        let mut pump = Pump::default();
        let simulation_due = match self.handles.as_mut() {
            Some(handles) => handles.simulation.fire(now),
            None => return pump,
        };
        if simulation_due {
            self.tick();
            pump.stepped = true;
        }
        // The step may have ended the game; a cancelled loop draws nothing more.
        if let Some(handles) = self.handles.as_mut() {
            pump.frame_due = handles.frame.fire(now);
        }
        pump
    }

    /// Earliest instant either loop wants to run again.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.handles
            .as_ref()
            .map(|h| h.simulation.deadline().min(h.frame.deadline()))
    }

    pub fn is_running(&self) -> bool {
        self.handles.is_some()
    }

    pub fn phase(&self) -> Phase {
        self.game.phase()
    }

    pub fn state(&self) -> SessionState {
        self.game.state
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[cfg(test)]
    pub(crate) fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    fn cancel_loops(&mut self) {
        if self.handles.take().is_some() {
            debug!(phase = ?self.game.phase(), "loops cancelled");
        }
    }
}
