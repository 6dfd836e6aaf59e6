use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::components::{Cell, ChaserColor, Direction, PlayerAgent};
use crate::config::Theme;
use crate::game::{Game, Phase, SessionState};
use crate::level::{CellKind, Layout};

const CELL_W: usize = 2;

/// Colors the render pass draws with. The simulation never sees these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub wall: Color,
    pub holding: Color,
    pub dot: Color,
    pub player: Color,
    pub player_dimmed: Color,
    pub hud: Color,
    pub chasers: [Color; 4],
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Classic => Self {
                wall: Color::Rgb { r: 37, g: 99, b: 235 },
                holding: Color::Rgb { r: 60, g: 60, b: 60 },
                dot: Color::Rgb { r: 255, g: 215, b: 0 },
                player: Color::Rgb { r: 255, g: 255, b: 0 },
                player_dimmed: Color::Rgb { r: 136, g: 136, b: 136 },
                hud: Color::White,
                chasers: [
                    Color::Rgb { r: 255, g: 0, b: 0 },
                    Color::Rgb { r: 255, g: 184, b: 255 },
                    Color::Rgb { r: 0, g: 255, b: 255 },
                    Color::Rgb { r: 255, g: 184, b: 81 },
                ],
            },
            Theme::Mono => Self {
                wall: Color::Grey,
                holding: Color::DarkGrey,
                dot: Color::White,
                player: Color::White,
                player_dimmed: Color::DarkGrey,
                hud: Color::White,
                chasers: [Color::Grey; 4],
            },
        }
    }

    fn chaser(&self, color: ChaserColor) -> Color {
        let idx = match color {
            ChaserColor::Red => 0,
            ChaserColor::Pink => 1,
            ChaserColor::Cyan => 2,
            ChaserColor::Orange => 3,
        };
        self.chasers[idx]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Glyph {
    Player { facing: Direction, mouth_open: bool },
    Chaser,
    Wall,
    Holding,
    Dot,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub glyph: Glyph,
    pub color: Color,
}

const BLANK: Sprite = Sprite {
    glyph: Glyph::Empty,
    color: Color::Reset,
};

/// Builds one frame, row-major, from a read-only view of the game.
pub fn compose(layout: &Layout, game: &Game, palette: &Palette) -> Vec<Sprite> {
    let maze = layout.maze();
    let mut frame = Vec::with_capacity(maze.width() * maze.height());
    for (cell, kind) in maze.cells() {
        frame.push(sprite_for(game, palette, cell, kind));
    }
    frame
}

fn sprite_for(game: &Game, palette: &Palette, cell: Cell, kind: CellKind) -> Sprite {
    if cell == game.player.position {
        let dimmed = game.invincibility.active && game.invincibility.remaining_ticks % 2 == 0;
        return Sprite {
            glyph: Glyph::Player {
                facing: game.player.facing,
                mouth_open: mouth_open(&game.player),
            },
            color: if dimmed {
                palette.player_dimmed
            } else {
                palette.player
            },
        };
    }
    if let Some(chaser) = game.chasers.iter().find(|c| c.position == cell) {
        return Sprite {
            glyph: Glyph::Chaser,
            color: palette.chaser(chaser.color),
        };
    }
    if game.dots.has_dot(cell) {
        return Sprite {
            glyph: Glyph::Dot,
            color: palette.dot,
        };
    }
    match kind {
        CellKind::Wall => Sprite {
            glyph: Glyph::Wall,
            color: palette.wall,
        },
        CellKind::HoldingArea => Sprite {
            glyph: Glyph::Holding,
            color: palette.holding,
        },
        CellKind::Corridor | CellKind::OpenSpace => BLANK,
    }
}

fn mouth_open(player: &PlayerAgent) -> bool {
    player.animation_phase.sin().abs() >= 0.5
}

fn glyph_text(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::Player {
            mouth_open: false, ..
        } => "●",
        Glyph::Player { facing, .. } => match facing {
            Direction::Right => "ᗧ",
            Direction::Left => "ᗤ",
            Direction::Up => "ᗢ",
            Direction::Down => "ᗣ",
        },
        Glyph::Chaser => "👻",
        Glyph::Wall => "██",
        Glyph::Holding => "░░",
        Glyph::Dot => "·",
        Glyph::Empty => "",
    }
}

pub fn hud_line(state: &SessionState, dots_left: usize) -> String {
    format!(
        "SCORE: {}  LIVES: {}  DOTS: {}  (q to quit)",
        state.score,
        "♥".repeat(state.lives as usize),
        dots_left
    )
}

/// Text shown over the board when no game is running.
pub fn overlay_lines(state: &SessionState) -> Vec<String> {
    match state.phase {
        Phase::Playing => Vec::new(),
        Phase::Idle => vec![
            "PAC-MAN".to_string(),
            "Arrow keys or WASD to move".to_string(),
            "Eat every dot and avoid the ghosts".to_string(),
            "Press Enter to start".to_string(),
        ],
        Phase::Over => vec![
            "GAME OVER".to_string(),
            format!("Final Score: {}", state.score),
            "Enter to play again, q to quit".to_string(),
        ],
        Phase::Won => vec![
            "YOU WIN!".to_string(),
            format!("Final Score: {}", state.score),
            "Enter to play again, q to quit".to_string(),
        ],
    }
}

/// Diffing terminal renderer; only changed cells are rewritten.
pub struct Renderer {
    palette: Palette,
    last: Vec<Sprite>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(layout: &Layout, palette: Palette) -> Self {
        let maze = layout.maze();
        Self {
            palette,
            last: vec![BLANK; maze.width() * maze.height()],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    /// Forces the next frame to repaint everything.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    pub fn render<W: Write>(&mut self, out: &mut W, layout: &Layout, game: &Game) -> io::Result<()> {
        let maze = layout.maze();
        let needed_h = (maze.height() + 2) as u16;
        let needed_w = (maze.width() * CELL_W) as u16;

        out.queue(MoveTo(0, 0))?;

        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            out.queue(Print(msg))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        let hud = hud_line(&game.state, game.dots.remaining());
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            out.queue(SetForegroundColor(self.palette.hud))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        let frame = compose(layout, game, &self.palette);
        for (idx, sprite) in frame.into_iter().enumerate() {
            if self.needs_full || sprite != self.last[idx] {
                self.last[idx] = sprite;
                self.draw_sprite(out, idx % maze.width(), idx / maze.width(), sprite)?;
            }
        }
        self.needs_full = false;

        out.flush()
    }

    /// Draws the phase banner centred on the board. The next `render` repaints underneath.
    pub fn render_overlay<W: Write>(
        &mut self,
        out: &mut W,
        layout: &Layout,
        state: &SessionState,
    ) -> io::Result<()> {
        let lines = overlay_lines(state);
        if lines.is_empty() {
            return Ok(());
        }
        let maze = layout.maze();
        let board_w = maze.width() * CELL_W;
        let top = self.origin_y + (maze.height().saturating_sub(lines.len()) / 2) as u16;
        for (i, line) in lines.iter().enumerate() {
            let w = UnicodeWidthStr::width(line.as_str()).min(board_w);
            let x = self.origin_x + ((board_w - w) / 2) as u16;
            out.queue(MoveTo(x, top + i as u16))?;
            out.queue(SetForegroundColor(self.palette.player))?;
            out.queue(Print(line))?;
            out.queue(ResetColor)?;
        }
        self.needs_full = true;
        out.flush()
    }

    fn draw_sprite<W: Write>(&self, out: &mut W, x: usize, y: usize, sprite: Sprite) -> io::Result<()> {
        let text = glyph_text(sprite.glyph);
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(sprite.color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                out.queue(Print(' '))?;
            }
        }
        out.queue(ResetColor)?;
        Ok(())
    }
}
