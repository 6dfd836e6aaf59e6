/// Grid coordinate. Rows grow downwards, columns grow to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step as `(row, col)` offsets.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAgent {
    pub position: Cell,
    pub facing: Direction,
    pub pending_direction: Option<Direction>,
    /// Mouth animation counter; cosmetic only.
    pub animation_phase: f32,
}

impl PlayerAgent {
    pub fn spawn(cell: Cell, facing: Direction) -> Self {
        Self {
            position: cell,
            facing,
            pending_direction: None,
            animation_phase: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaserColor {
    Red,
    Pink,
    Cyan,
    Orange,
}

impl ChaserColor {
    pub const CYCLE: [ChaserColor; 4] = [
        ChaserColor::Red,
        ChaserColor::Pink,
        ChaserColor::Cyan,
        ChaserColor::Orange,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaserAgent {
    pub position: Cell,
    pub facing: Direction,
    pub color: ChaserColor,
}

/// Post-collision grace period, shared by the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvincibilityState {
    pub active: bool,
    pub remaining_ticks: u32,
}

impl InvincibilityState {
    pub fn granted(ticks: u32) -> Self {
        Self {
            active: ticks > 0,
            remaining_ticks: ticks,
        }
    }

    /// Counts one tick down, clearing the flag once the window is spent.
    pub fn tick(&mut self) {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        if self.remaining_ticks == 0 {
            self.active = false;
        }
    }
}
