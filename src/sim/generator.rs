//! Random perfect-maze generation by depth-first carving.

use std::collections::{HashSet, VecDeque};

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::maze::{GridMaze, MazeError, Tile};
use crate::core::{Direction, GridCoord};

/// Generate a random maze of `width` x `height` tiles.
///
/// Rooms sit on odd coordinates and are joined by carving the wall between
/// them, so every room is reachable and there are no loops. The start is the
/// top-left room and the exit the room farthest from it.
pub fn generate_maze<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    rng: &mut R,
) -> Result<GridMaze, MazeError> {
    if width < 3 || height < 3 {
        return Err(MazeError::InvalidSize { width, height });
    }

    let start = GridCoord::new(1, 1);
    let mut maze = GridMaze::filled(width, height, start);
    let is_room = |c: GridCoord| {
        c.x > 0
            && c.y > 0
            && (c.x as usize) < width - 1
            && (c.y as usize) < height - 1
            && c.x % 2 == 1
            && c.y % 2 == 1
    };

    let mut carved = HashSet::new();
    let mut stack = vec![start];
    carved.insert(start);
    maze.set_tile(start, Tile::Floor);

    while let Some(&current) = stack.last() {
        let candidates: Vec<Direction> = Direction::EXPLORATION_ORDER
            .into_iter()
            .filter(|&d| {
                let next = current.neighbor(d).neighbor(d);
                is_room(next) && !carved.contains(&next)
            })
            .collect();

        match candidates.choose(&mut *rng) {
            Some(&direction) => {
                let wall = current.neighbor(direction);
                let next = wall.neighbor(direction);
                maze.set_tile(wall, Tile::Floor);
                maze.set_tile(next, Tile::Floor);
                carved.insert(next);
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }

    let exit = farthest_from(&maze, start);
    maze.set_exit(exit);

    debug!(
        "[MazeGen] {}x{} maze: {} rooms, exit at {}",
        width,
        height,
        carved.len(),
        exit
    );

    Ok(maze)
}

/// Last cell reached by a breadth-first walk, i.e. one of the farthest.
fn farthest_from(maze: &GridMaze, from: GridCoord) -> GridCoord {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    let mut last = from;

    seen.insert(from);
    queue.push_back(from);

    while let Some(cell) = queue.pop_front() {
        last = cell;
        for neighbor in cell.neighbors_4() {
            if maze.is_passable(neighbor) && seen.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    last
}
