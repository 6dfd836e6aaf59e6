use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;

/// Raw mode plus alternate screen for as long as the guard lives.
pub struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    /// If any setup step fails, the guard is dropped and undoes the earlier ones.
    pub fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut guard = Self { out };
        guard.out.execute(EnterAlternateScreen)?;
        guard.out.execute(Hide)?;
        Ok(guard)
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let _ = restore(&mut self.out);
    }
}

/// Runs every restore step, even after one fails, and reports the first error.
pub fn restore<W: Write>(out: &mut W) -> io::Result<()> {
    let shown = out.execute(Show).map(drop);
    let left = out.execute(LeaveAlternateScreen).map(drop);
    let cooked = terminal::disable_raw_mode();
    shown.and(left).and(cooked)
}
