use crate::components::PlayerAgent;
use crate::level::{DotField, Maze};
use crate::movement::{can_move, next_cell};

/// Mouth animation advance per tick of actual movement.
pub const ANIMATION_STEP: f32 = 0.3;

/// Commits a buffered turn when it is open, then advances one cell along the
/// facing. A blocked player simply stays put. Returns whether it moved.
pub fn move_player(player: &mut PlayerAgent, maze: &Maze) -> bool {
    if let Some(dir) = player.pending_direction {
        if can_move(maze, player.position, dir) {
            player.facing = dir;
            player.pending_direction = None;
        }
    }

    if can_move(maze, player.position, player.facing) {
        player.position = next_cell(maze, player.position, player.facing);
        player.animation_phase += ANIMATION_STEP;
        true
    } else {
        false
    }
}

/// Eats the dot under the player, if any.
pub fn consume_dot(player: &PlayerAgent, dots: &mut DotField) -> bool {
    dots.consume(player.position)
}
