use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::ChaserAgent;
use crate::level::Maze;
use crate::movement::{can_move, next_cell, open_directions};

/// Chance per tick that a chaser picks a fresh heading at a junction.
pub const TURN_CHANCE: f64 = 0.1;

/// Random-walk step for one chaser. No pursuit: a chaser keeps its heading
/// until blocked, then picks uniformly among the open directions.
pub fn move_chaser(chaser: &mut ChaserAgent, maze: &Maze, rng: &mut impl Rng) {
    if !can_move(maze, chaser.position, chaser.facing) {
        if let Some(dir) = open_directions(maze, chaser.position).choose(rng) {
            chaser.facing = *dir;
        }
    }

    if can_move(maze, chaser.position, chaser.facing) {
        chaser.position = next_cell(maze, chaser.position, chaser.facing);
    }

    if rng.gen::<f64>() < TURN_CHANCE {
        let options = open_directions(maze, chaser.position);
        if options.len() > 1 {
            if let Some(dir) = options.choose(rng) {
                chaser.facing = *dir;
            }
        }
    }
}

/// Moves every chaser once, in slice order.
pub fn move_chasers(chasers: &mut [ChaserAgent], maze: &Maze, rng: &mut impl Rng) {
    for chaser in chasers.iter_mut() {
        move_chaser(chaser, maze, rng);
    }
}
