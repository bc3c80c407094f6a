//! Test utilities for navigator integration tests.
//!
//! Helpers for building mazes, running the navigator on a simulated robot
//! and replaying the recorded command log.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use marga::sim::{GridMaze, RobotCommand, SimulatedRobot, generate_maze};
use marga::{Direction, GridCoord, NavigationReport, Navigator, NavigatorConfig};

/// Everything a run leaves behind.
pub struct Run {
    pub report: NavigationReport,
    pub visited: HashSet<GridCoord>,
    pub robot: SimulatedRobot,
}

/// Run the navigator once on `maze`.
pub fn run(maze: GridMaze, config: NavigatorConfig) -> Run {
    let mut robot = SimulatedRobot::new(maze);
    let mut navigator = Navigator::new(&mut robot, config);
    let report = navigator.move_to_exit();
    let visited = navigator.visited().clone();
    Run {
        report,
        visited,
        robot,
    }
}

/// Parse an ASCII maze, panicking on malformed test input.
pub fn maze(ascii: &str) -> GridMaze {
    GridMaze::from_ascii(ascii).expect("test maze must parse")
}

/// Seeded perfect maze.
pub fn random_maze(width: usize, height: usize, seed: u64) -> GridMaze {
    generate_maze(width, height, &mut StdRng::seed_from_u64(seed)).expect("valid size")
}

/// Seeded maze with `openings` extra interior walls knocked out, so it
/// contains loops.
pub fn random_maze_with_loops(width: usize, height: usize, seed: u64, openings: usize) -> GridMaze {
    let base = random_maze(width, height, seed);
    let mut rows: Vec<Vec<char>> = base
        .render(&HashSet::new())
        .lines()
        .map(|l| l.chars().collect())
        .collect();

    let mut rng = StdRng::seed_from_u64(seed.wrapping_mul(31).wrapping_add(1));
    for _ in 0..openings {
        let x = rng.random_range(1..width - 1);
        let y = rng.random_range(1..height - 1);
        if rows[y][x] == '#' {
            rows[y][x] = '.';
        }
    }

    let ascii: Vec<String> = rows.into_iter().map(|r| r.into_iter().collect()).collect();
    maze(&ascii.join("\n"))
}

/// Replay the command log, checking that every `step` undoes the most
/// recent unmatched successful `try_move`.
///
/// Returns the unmatched moves, i.e. the path from the start to where the
/// robot ended.
pub fn replay_path(commands: &[RobotCommand]) -> Vec<Direction> {
    let mut path = Vec::new();
    for command in commands {
        match *command {
            RobotCommand::TryMove {
                direction,
                moved: true,
            } => path.push(direction),
            RobotCommand::Step { direction } => {
                let undone = path.pop().expect("step without a move to undo");
                assert_eq!(
                    direction,
                    undone.opposite(),
                    "step {:?} does not undo {:?}",
                    direction,
                    undone
                );
            }
            _ => {}
        }
    }
    path
}

/// Number of `try_move` calls issued from each cell, per direction.
pub fn probes_per_cell(commands: &[RobotCommand]) -> HashMap<(GridCoord, Direction), usize> {
    let mut position = GridCoord::ORIGIN;
    let mut counts = HashMap::new();
    for command in commands {
        match *command {
            RobotCommand::TryMove { direction, moved } => {
                *counts.entry((position, direction)).or_insert(0) += 1;
                if moved {
                    position = position.neighbor(direction);
                }
            }
            RobotCommand::Step { direction } => position = position.neighbor(direction),
            RobotCommand::Halt => {}
        }
    }
    counts
}
