use crate::components::{Cell, Direction};
use crate::level::Maze;

/// One unit step in `dir`, wrapped toroidally on both axes.
pub fn next_cell(maze: &Maze, cell: Cell, dir: Direction) -> Cell {
    let (dr, dc) = dir.delta();
    Cell {
        row: wrap(cell.row as isize + dr, maze.height()),
        col: wrap(cell.col as isize + dc, maze.width()),
    }
}

/// Wrap happens before the wall query, so a wall at the far edge blocks the tunnel.
pub fn can_move(maze: &Maze, cell: Cell, dir: Direction) -> bool {
    !maze.is_wall(next_cell(maze, cell, dir))
}

/// Directions in `Direction::ALL` order that lead to a passable cell.
pub fn open_directions(maze: &Maze, cell: Cell) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|dir| can_move(maze, cell, *dir))
        .collect()
}

fn wrap(value: isize, dimension: usize) -> usize {
    if value < 0 {
        dimension.saturating_sub(1)
    } else if value as usize >= dimension {
        0
    } else {
        value as usize
    }
}
