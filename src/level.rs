use thiserror::Error;

use crate::components::{Cell, ChaserAgent, ChaserColor, Direction, PlayerAgent};

/// The built-in board: 21 rows by 20 columns, tunnel on row 9.
///
/// `#` wall, `.` corridor with a dot, `-` open floor, `=` chaser holding area.
const REFERENCE_ROWS: [&str; 21] = [
    "####################",
    "#........##........#",
    "#.##.###.##.###.##.#",
    "#..................#",
    "#.##.#.######.#.##.#",
    "#....#...##...#....#",
    "####.###.##.###.####",
    "####.#........#.####",
    "####.#.##==##.#.####",
    ".......#====#.......",
    "####.#.######.#.####",
    "####.#........#.####",
    "####.#.######.#.####",
    "#........##........#",
    "#.##.###.##.###.##.#",
    "#..#............#..#",
    "##.#.#.######.#.#.##",
    "#....#...##...#....#",
    "#.######.##.######.#",
    "#..................#",
    "####################",
];

const REFERENCE_PLAYER: (Cell, Direction) = (Cell::new(1, 1), Direction::Right);

const REFERENCE_CHASERS: [(Cell, Direction, ChaserColor); 4] = [
    (Cell::new(9, 9), Direction::Left, ChaserColor::Red),
    (Cell::new(9, 10), Direction::Right, ChaserColor::Pink),
    (Cell::new(8, 9), Direction::Up, ChaserColor::Cyan),
    (Cell::new(8, 10), Direction::Down, ChaserColor::Orange),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Wall,
    Corridor,
    OpenSpace,
    HoldingArea,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown layout character {ch:?} at row {row}, column {col}")]
    UnknownCharacter { ch: char, row: usize, col: usize },
    #[error("layout has no player spawn (`P`)")]
    MissingPlayerSpawn,
    #[error("layout has more than one player spawn, second at row {row}, column {col}")]
    DuplicatePlayerSpawn { row: usize, col: usize },
    #[error("spawn at row {row}, column {col} is not on the board or sits on a wall")]
    BlockedSpawn { row: usize, col: usize },
    #[error("layout has no dots to collect")]
    NoDots,
}

/// Static maze. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    kinds: Vec<CellKind>,
}

impl Maze {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    pub fn kind(&self, cell: Cell) -> Option<CellKind> {
        if self.contains(cell) {
            Some(self.kinds[cell.row * self.width + cell.col])
        } else {
            None
        }
    }

    /// Off-board cells answer `false`: the board edge is open space so that
    /// wrap-around can carry agents across it.
    pub fn is_wall(&self, cell: Cell) -> bool {
        matches!(self.kind(cell), Some(CellKind::Wall))
    }

    pub fn cells(&self) -> impl Iterator<Item = (Cell, CellKind)> + '_ {
        self.kinds
            .iter()
            .enumerate()
            .map(move |(idx, kind)| (Cell::new(idx / self.width, idx % self.width), *kind))
    }
}

/// Remaining dots, one flag per maze cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotField {
    width: usize,
    dots: Vec<bool>,
    remaining: usize,
}

impl DotField {
    /// A dot on every corridor cell and nowhere else.
    pub fn for_maze(maze: &Maze) -> Self {
        let dots: Vec<bool> = maze
            .kinds
            .iter()
            .map(|kind| *kind == CellKind::Corridor)
            .collect();
        let remaining = dots.iter().filter(|dot| **dot).count();
        Self {
            width: maze.width,
            dots,
            remaining,
        }
    }

    pub fn has_dot(&self, cell: Cell) -> bool {
        cell.col < self.width
            && cell.row < self.dots.len() / self.width
            && self.dots[cell.row * self.width + cell.col]
    }

    /// Clears the dot at `cell`. Returns whether there was one to clear.
    pub fn consume(&mut self, cell: Cell) -> bool {
        if !self.has_dot(cell) {
            return false;
        }
        self.dots[cell.row * self.width + cell.col] = false;
        self.remaining -= 1;
        true
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining == 0
    }
}

/// Maze plus the spawn placement every game and every respawn starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    maze: Maze,
    player_spawn: (Cell, Direction),
    chaser_spawns: Vec<ChaserAgent>,
}

impl Layout {
    pub fn new(
        maze: Maze,
        player_spawn: (Cell, Direction),
        chaser_spawns: Vec<ChaserAgent>,
    ) -> Result<Self, LayoutError> {
        let spawn_cells =
            std::iter::once(player_spawn.0).chain(chaser_spawns.iter().map(|c| c.position));
        for cell in spawn_cells {
            if !maze.contains(cell) || maze.is_wall(cell) {
                return Err(LayoutError::BlockedSpawn {
                    row: cell.row,
                    col: cell.col,
                });
            }
        }
        if DotField::for_maze(&maze).is_cleared() {
            return Err(LayoutError::NoDots);
        }
        Ok(Self {
            maze,
            player_spawn,
            chaser_spawns,
        })
    }

    /// The classic board with four chasers in the holding area.
    pub fn reference() -> Self {
        let maze = reference_maze();
        let chasers = REFERENCE_CHASERS
            .iter()
            .map(|(position, facing, color)| ChaserAgent {
                position: *position,
                facing: *facing,
                color: *color,
            })
            .collect();
        Self {
            maze,
            player_spawn: REFERENCE_PLAYER,
            chaser_spawns: chasers,
        }
    }

    /// Parses a text board. Besides the cell codes, `P` marks the player
    /// spawn and `<` `>` `^` `v` mark chaser spawns facing that way.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect::<Vec<_>>();
        let last = rows
            .iter()
            .rposition(|row| !row.is_empty())
            .ok_or(LayoutError::Empty)?;
        let (maze, player, chasers) = parse_rows(rows[..=last].iter().copied())?;
        let player = player.ok_or(LayoutError::MissingPlayerSpawn)?;
        Self::new(maze, (player, Direction::Right), chasers)
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn spawn_player(&self) -> PlayerAgent {
        PlayerAgent::spawn(self.player_spawn.0, self.player_spawn.1)
    }

    pub fn spawn_chasers(&self) -> Vec<ChaserAgent> {
        self.chaser_spawns.clone()
    }
}

fn reference_maze() -> Maze {
    let kinds = REFERENCE_ROWS
        .iter()
        .flat_map(|row| row.chars())
        .map(|ch| match ch {
            '.' => CellKind::Corridor,
            '-' => CellKind::OpenSpace,
            '=' => CellKind::HoldingArea,
            _ => CellKind::Wall,
        })
        .collect();
    Maze {
        width: REFERENCE_ROWS[0].len(),
        height: REFERENCE_ROWS.len(),
        kinds,
    }
}

type Parsed = (Maze, Option<Cell>, Vec<ChaserAgent>);

fn parse_rows<'a>(rows: impl Iterator<Item = &'a str>) -> Result<Parsed, LayoutError> {
    let mut kinds = Vec::new();
    let mut width = None;
    let mut height = 0;
    let mut player = None;
    let mut chasers = Vec::new();

    for (row, line) in rows.enumerate() {
        let mut cols = 0;
        for (col, ch) in line.chars().enumerate() {
            let cell = Cell::new(row, col);
            let kind = match ch {
                '#' => CellKind::Wall,
                '.' => CellKind::Corridor,
                ' ' | '-' => CellKind::OpenSpace,
                '=' => CellKind::HoldingArea,
                'P' => {
                    if player.is_some() {
                        return Err(LayoutError::DuplicatePlayerSpawn { row, col });
                    }
                    player = Some(cell);
                    CellKind::Corridor
                }
                '<' | '>' | '^' | 'v' => {
                    let facing = match ch {
                        '<' => Direction::Left,
                        '>' => Direction::Right,
                        '^' => Direction::Up,
                        _ => Direction::Down,
                    };
                    let color = ChaserColor::CYCLE[chasers.len() % ChaserColor::CYCLE.len()];
                    chasers.push(ChaserAgent {
                        position: cell,
                        facing,
                        color,
                    });
                    CellKind::HoldingArea
                }
                other => {
                    return Err(LayoutError::UnknownCharacter { ch: other, row, col });
                }
            };
            kinds.push(kind);
            cols += 1;
        }
        match width {
            None => width = Some(cols),
            Some(expected) if expected != cols => {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected,
                    found: cols,
                });
            }
            Some(_) => {}
        }
        height += 1;
    }

    let width = match width {
        Some(w) if w > 0 => w,
        _ => return Err(LayoutError::Empty),
    };
    Ok((
        Maze {
            width,
            height,
            kinds,
        },
        player,
        chasers,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_layout_dimensions_and_tunnel() {
        let layout = Layout::reference();
        let maze = layout.maze();
        assert_eq!((maze.height(), maze.width()), (21, 20));
        assert_eq!(maze.kind(Cell::new(9, 0)), Some(CellKind::Corridor));
        assert_eq!(maze.kind(Cell::new(9, 19)), Some(CellKind::Corridor));
        assert_eq!(maze.kind(Cell::new(9, 9)), Some(CellKind::HoldingArea));
        assert!(maze.is_wall(Cell::new(0, 0)));
    }

    #[test]
    fn reference_board_matches_its_text_form() {
        let (parsed, player, chasers) =
            parse_rows(REFERENCE_ROWS.iter().copied()).expect("reference rows parse");
        assert_eq!(player, None);
        assert!(chasers.is_empty());
        assert_eq!(&parsed, Layout::reference().maze());
        assert!(REFERENCE_ROWS.iter().all(|row| row.len() == REFERENCE_ROWS[0].len()));
    }

    #[test]
    fn off_board_queries_are_not_walls() {
        let maze = Layout::reference().maze().clone();
        assert!(!maze.is_wall(Cell::new(21, 0)));
        assert!(!maze.is_wall(Cell::new(0, 20)));
        assert!(!maze.is_wall(Cell::new(usize::MAX, usize::MAX)));
    }

    #[test]
    fn dots_only_on_corridors() {
        let layout = Layout::reference();
        let maze = layout.maze();
        let dots = DotField::for_maze(maze);
        let corridors = maze
            .cells()
            .filter(|(_, kind)| *kind == CellKind::Corridor)
            .count();
        assert_eq!(dots.remaining(), corridors);
        for (cell, kind) in maze.cells() {
            assert_eq!(dots.has_dot(cell), kind == CellKind::Corridor);
        }
    }

    #[test]
    fn consuming_a_dot_counts_once() {
        let maze = Layout::reference().maze().clone();
        let mut dots = DotField::for_maze(&maze);
        let before = dots.remaining();
        assert!(dots.consume(Cell::new(1, 2)));
        assert!(!dots.consume(Cell::new(1, 2)));
        assert!(!dots.consume(Cell::new(0, 0)));
        assert_eq!(dots.remaining(), before - 1);
    }

    #[test]
    fn parses_spawn_markers() {
        let layout = Layout::parse("#####\n#P.-#\n#=<>#\n#####\n\n").expect("valid layout");
        assert_eq!((layout.maze().height(), layout.maze().width()), (4, 5));
        let player = layout.spawn_player();
        assert_eq!(player.position, Cell::new(1, 1));
        assert_eq!(player.facing, Direction::Right);
        let chasers = layout.spawn_chasers();
        assert_eq!(chasers.len(), 2);
        assert_eq!(chasers[0].facing, Direction::Left);
        assert_eq!(chasers[0].color, ChaserColor::Red);
        assert_eq!(chasers[1].position, Cell::new(2, 3));
        assert_eq!(chasers[1].color, ChaserColor::Pink);
        assert_eq!(layout.maze().kind(Cell::new(1, 3)), Some(CellKind::OpenSpace));
    }

    #[test]
    fn rejects_malformed_layouts() {
        assert_eq!(Layout::parse("\n\n"), Err(LayoutError::Empty));
        assert_eq!(
            Layout::parse("#P.#\n#.#"),
            Err(LayoutError::RaggedRow {
                row: 1,
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            Layout::parse("#P?#"),
            Err(LayoutError::UnknownCharacter {
                ch: '?',
                row: 0,
                col: 2
            })
        );
        assert_eq!(Layout::parse("#..#"), Err(LayoutError::MissingPlayerSpawn));
        assert_eq!(
            Layout::parse("#PP#"),
            Err(LayoutError::DuplicatePlayerSpawn { row: 0, col: 2 })
        );
    }

    #[test]
    fn rejects_spawn_on_wall() {
        let maze = Layout::reference().maze().clone();
        let err = Layout::new(maze, (Cell::new(0, 0), Direction::Right), Vec::new());
        assert_eq!(err, Err(LayoutError::BlockedSpawn { row: 0, col: 0 }));
    }
}
