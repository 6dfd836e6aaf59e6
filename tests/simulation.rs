use pacman_chase::{
    next_cell, Cell, ChaserAgent, ChaserColor, Direction, Game, InvincibilityState, Layout, Phase,
    DOT_REWARD, INVINCIBILITY_TICKS, STARTING_LIVES,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn playing(layout: &Layout) -> Game {
    Game::new(layout, Phase::Playing)
}

/// Player and one chaser sealed into the same cell. Neither can move, so
/// the player never eats and the game can only end by collision.
fn sealed_cell() -> Layout {
    let maze = Layout::parse("#####\n#P#.#\n#####")
        .expect("valid layout")
        .maze()
        .clone();
    let chaser = ChaserAgent {
        position: Cell::new(1, 1),
        facing: Direction::Left,
        color: ChaserColor::Red,
    };
    Layout::new(maze, (Cell::new(1, 1), Direction::Right), vec![chaser]).expect("valid layout")
}

#[test]
fn next_cell_stays_on_the_board() {
    let layouts = [
        Layout::reference(),
        Layout::parse("P.\n..").expect("valid layout"),
        Layout::parse(".P...\n.....\n.....").expect("valid layout"),
    ];
    for layout in &layouts {
        let maze = layout.maze();
        for (cell, _) in maze.cells() {
            for dir in Direction::ALL {
                let next = next_cell(maze, cell, dir);
                assert!(maze.contains(next), "{cell:?} {dir:?} -> {next:?}");
            }
        }
    }
}

#[test]
fn player_moves_right_and_eats() {
    let layout = Layout::reference();
    let mut game = playing(&layout);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert_eq!(game.player.position, Cell::new(1, 1));
    assert_eq!(game.player.facing, Direction::Right);
    assert!(game.dots.has_dot(Cell::new(1, 2)));

    game.step(&layout, &mut rng);

    assert_eq!(game.player.position, Cell::new(1, 2));
    assert!(!game.dots.has_dot(Cell::new(1, 2)));
    assert_eq!(game.state.score, DOT_REWARD);
}

#[test]
fn tunnel_wraps_left_edge_to_right_edge() {
    let layout = Layout::reference();
    let mut game = playing(&layout);
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    game.player.position = Cell::new(9, 0);
    game.player.facing = Direction::Left;

    game.step(&layout, &mut rng);
    assert_eq!(game.player.position, Cell::new(9, 19));

    game.player.facing = Direction::Right;
    game.step(&layout, &mut rng);
    assert_eq!(game.player.position, Cell::new(9, 0));
}

#[test]
fn wall_on_far_edge_blocks_the_wrap() {
    let layout = Layout::parse("#####\n.P..#\n#####").expect("valid layout");
    let mut game = playing(&layout);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    game.player.position = Cell::new(1, 0);
    game.player.facing = Direction::Left;

    game.step(&layout, &mut rng);
    assert_eq!(game.player.position, Cell::new(1, 0));
}

#[test]
fn last_life_ends_the_game() {
    let layout = sealed_cell();
    let mut game = playing(&layout);
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    game.state.lives = 1;

    assert_eq!(game.step(&layout, &mut rng), Phase::Over);
    assert_eq!(game.state.lives, 0);

    let frozen = game.clone();
    game.step(&layout, &mut rng);
    assert_eq!(game, frozen);
}

#[test]
fn collision_respawns_everyone() {
    let layout = Layout::reference();
    let mut game = playing(&layout);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    game.player.position = Cell::new(3, 4);
    game.player.facing = Direction::Left;
    game.chasers[0].position = Cell::new(3, 2);
    game.chasers[0].facing = Direction::Right;

    game.step(&layout, &mut rng);

    assert_eq!(game.state.lives, STARTING_LIVES - 1);
    assert_eq!(game.state.phase, Phase::Playing);
    assert_eq!(game.player, layout.spawn_player());
    assert_eq!(game.chasers, layout.spawn_chasers());
    assert_eq!(
        game.invincibility,
        InvincibilityState {
            active: true,
            remaining_ticks: INVINCIBILITY_TICKS
        }
    );
}

#[test]
fn collisions_ignored_during_invincibility_window() {
    let layout = sealed_cell();
    let mut game = playing(&layout);
    let mut rng = ChaCha8Rng::seed_from_u64(6);

    game.step(&layout, &mut rng);
    assert_eq!(game.state.lives, STARTING_LIVES - 1);
    assert_eq!(game.invincibility.remaining_ticks, INVINCIBILITY_TICKS);

    for remaining in (0..INVINCIBILITY_TICKS).rev() {
        game.step(&layout, &mut rng);
        assert_eq!(game.chasers[0].position, game.player.position);
        assert_eq!(game.state.lives, STARTING_LIVES - 1);
        assert_eq!(game.invincibility.remaining_ticks, remaining);
    }
    assert!(!game.invincibility.active);

    game.step(&layout, &mut rng);
    assert_eq!(game.state.lives, STARTING_LIVES - 2);
}

#[test]
fn random_play_keeps_every_invariant() {
    let layout = Layout::reference();
    let maze = layout.maze();
    let mut rng = ChaCha8Rng::seed_from_u64(0xC0FFEE);
    let mut input_rng = ChaCha8Rng::seed_from_u64(99);
    let mut game = playing(&layout);

    for _ in 0..5_000 {
        if game.phase() != Phase::Playing {
            game = playing(&layout);
        }
        if input_rng.gen_bool(0.2) {
            game.player.pending_direction = Direction::ALL.choose(&mut input_rng).copied();
        }
        let score = game.state.score;
        let dots = game.dots.remaining();
        let lives = game.state.lives;

        let phase = game.step(&layout, &mut rng);

        assert!(!maze.is_wall(game.player.position));
        assert!(maze.contains(game.player.position));
        for chaser in &game.chasers {
            assert!(!maze.is_wall(chaser.position));
            assert!(maze.contains(chaser.position));
        }
        assert!(game.state.score >= score);
        let eaten = (dots - game.dots.remaining()) as u32;
        assert!(eaten <= 1);
        assert_eq!(game.state.score - score, eaten * DOT_REWARD);
        assert!(lives - game.state.lives <= 1);
        assert_eq!(phase == Phase::Won, game.dots.is_cleared());
        assert_eq!(phase == Phase::Over, game.state.lives == 0);
    }
}
