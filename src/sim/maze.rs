//! ASCII grid mazes.
//!
//! ```text
//! #######
//! #S..#E#
//! #.#.#.#
//! #.#...#
//! #######
//! ```
//!
//! `#` is a wall, `.` or space is floor, `S` marks the start (exactly one)
//! and `E` the exit (at most one). `X` is a start cell that is also the exit.
//! Short rows are padded with walls and everything outside the grid is a wall.
//! Empty lines before the first row and after the last are ignored; a row of
//! spaces is a row of floor.

use std::collections::{HashSet, VecDeque};
use std::path::Path;

use thiserror::Error;

use crate::core::GridCoord;

/// Contents of one maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    /// Impassable
    #[default]
    Wall,
    /// Passable floor
    Floor,
    /// Passable floor that ends the run
    Exit,
}

impl Tile {
    /// Can the robot stand on this tile?
    #[inline]
    pub fn is_passable(self) -> bool {
        matches!(self, Tile::Floor | Tile::Exit)
    }

    /// Single character representation for debugging
    pub fn as_char(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Exit => 'E',
        }
    }
}

/// Errors while building a maze.
#[derive(Error, Debug)]
pub enum MazeError {
    /// I/O error reading the maze file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No rows at all
    #[error("Maze is empty")]
    Empty,

    /// A character outside the maze alphabet
    #[error("Unknown tile {ch:?} at row {row}, column {col}")]
    UnknownTile {
        /// Offending character
        ch: char,
        /// Zero-based row
        row: usize,
        /// Zero-based column
        col: usize,
    },

    /// No `S` in the maze
    #[error("Maze has no start cell 'S'")]
    MissingStart,

    /// More than one `S`
    #[error("Second start cell at {0}")]
    DuplicateStart(GridCoord),

    /// More than one `E`
    #[error("Second exit cell at {0}")]
    DuplicateExit(GridCoord),

    /// Generator dimensions too small
    #[error("Invalid maze size {width}x{height} (minimum 3x3)")]
    InvalidSize {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
}

/// A rectangular grid maze in absolute cell coordinates.
///
/// The robot's start cell is stored separately; [`Self::reachable_from_start`]
/// reports cells relative to it, which is the navigator's frame.
#[derive(Clone, Debug)]
pub struct GridMaze {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    start: GridCoord,
    exit: Option<GridCoord>,
}

impl GridMaze {
    /// Create a maze filled with walls.
    pub(crate) fn filled(width: usize, height: usize, start: GridCoord) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Wall; width * height],
            start,
            exit: None,
        }
    }

    /// Parse an ASCII maze.
    pub fn from_ascii(text: &str) -> Result<Self, MazeError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .skip_while(|l| l.is_empty())
            .collect();
        let rows: Vec<&str> = match rows.iter().rposition(|l| !l.is_empty()) {
            Some(last) => rows[..=last].to_vec(),
            None => return Err(MazeError::Empty),
        };

        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        if width == 0 {
            return Err(MazeError::Empty);
        }

        let mut tiles = vec![Tile::Wall; width * height];
        let mut start = None;
        let mut exit = None;

        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let coord = GridCoord::new(col as i32, row as i32);
                let tile = match ch {
                    '#' => Tile::Wall,
                    '.' | ' ' => Tile::Floor,
                    'S' => {
                        if start.replace(coord).is_some() {
                            return Err(MazeError::DuplicateStart(coord));
                        }
                        Tile::Floor
                    }
                    'E' => {
                        if exit.replace(coord).is_some() {
                            return Err(MazeError::DuplicateExit(coord));
                        }
                        Tile::Exit
                    }
                    'X' => {
                        if start.replace(coord).is_some() {
                            return Err(MazeError::DuplicateStart(coord));
                        }
                        if exit.replace(coord).is_some() {
                            return Err(MazeError::DuplicateExit(coord));
                        }
                        Tile::Exit
                    }
                    _ => return Err(MazeError::UnknownTile { ch, row, col }),
                };
                tiles[row * width + col] = tile;
            }
        }

        let start = start.ok_or(MazeError::MissingStart)?;

        Ok(Self {
            width,
            height,
            tiles,
            start,
            exit,
        })
    }

    /// Load an ASCII maze file.
    pub fn load(path: &Path) -> Result<Self, MazeError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ascii(&contents)
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Absolute start cell
    pub fn start(&self) -> GridCoord {
        self.start
    }

    /// Absolute exit cell, if the maze has one
    pub fn exit(&self) -> Option<GridCoord> {
        self.exit
    }

    fn index(&self, coord: GridCoord) -> Option<usize> {
        if coord.x < 0 || coord.y < 0 {
            return None;
        }
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Tile at an absolute coordinate. Outside the grid is wall.
    pub fn tile(&self, coord: GridCoord) -> Tile {
        self.index(coord)
            .map(|i| self.tiles[i])
            .unwrap_or(Tile::Wall)
    }

    /// Can the robot stand on this absolute coordinate?
    #[inline]
    pub fn is_passable(&self, coord: GridCoord) -> bool {
        self.tile(coord).is_passable()
    }

    /// Overwrite a tile. Out-of-grid writes are ignored.
    pub(crate) fn set_tile(&mut self, coord: GridCoord, tile: Tile) {
        if let Some(i) = self.index(coord) {
            self.tiles[i] = tile;
        }
    }

    /// Move the exit to `coord`, turning the old exit back into floor.
    pub(crate) fn set_exit(&mut self, coord: GridCoord) {
        if let Some(old) = self.exit.take() {
            self.set_tile(old, Tile::Floor);
        }
        self.set_tile(coord, Tile::Exit);
        self.exit = Some(coord);
    }

    /// Surround the exit with walls so it cannot be reached.
    ///
    /// Returns `false` and leaves the maze untouched if there is no exit, or
    /// the exit is the start or next to it.
    pub fn wall_off_exit(&mut self) -> bool {
        let Some(exit) = self.exit else {
            return false;
        };
        if exit.manhattan_distance(&self.start) <= 1 {
            return false;
        }
        for neighbor in exit.neighbors_4() {
            self.set_tile(neighbor, Tile::Wall);
        }
        true
    }

    /// Cells reachable from the start through passable tiles, relative to
    /// the start cell.
    ///
    /// The search stops at the exit the same way the robot does: the exit
    /// itself is included, cells only reachable through it are not.
    pub fn reachable_from_start(&self) -> HashSet<GridCoord> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();

        seen.insert(self.start);
        queue.push_back(self.start);

        while let Some(cell) = queue.pop_front() {
            if Some(cell) == self.exit {
                continue;
            }
            for neighbor in cell.neighbors_4() {
                if self.is_passable(neighbor) && seen.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        seen.into_iter().map(|c| c - self.start).collect()
    }

    /// Is the exit reachable from the start?
    pub fn is_solvable(&self) -> bool {
        match self.exit {
            Some(exit) => self.reachable_from_start().contains(&(exit - self.start)),
            None => false,
        }
    }

    /// Number of passable cells.
    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_passable()).count()
    }

    /// Render the maze, marking `visited` cells (relative to the start) with
    /// `o`. The start is drawn as `S`, or `X` when it is also the exit.
    pub fn render(&self, visited: &HashSet<GridCoord>) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let coord = GridCoord::new(x as i32, y as i32);
                let tile = self.tile(coord);
                let ch = if coord == self.start {
                    if tile == Tile::Exit { 'X' } else { 'S' }
                } else if tile == Tile::Floor && visited.contains(&(coord - self.start)) {
                    'o'
                } else {
                    tile.as_char()
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "
#####
#S.E#
#####
";

    #[test]
    fn test_parse_small_maze() {
        let maze = GridMaze::from_ascii(SMALL).unwrap();
        assert_eq!(maze.width(), 5);
        assert_eq!(maze.height(), 3);
        assert_eq!(maze.start(), GridCoord::new(1, 1));
        assert_eq!(maze.exit(), Some(GridCoord::new(3, 1)));
        assert_eq!(maze.tile(GridCoord::new(2, 1)), Tile::Floor);
        assert_eq!(maze.tile(GridCoord::new(3, 1)), Tile::Exit);
        assert_eq!(maze.floor_count(), 3);
    }

    #[test]
    fn test_outside_is_wall() {
        let maze = GridMaze::from_ascii("S.").unwrap();
        assert!(maze.is_passable(GridCoord::new(1, 0)));
        assert!(!maze.is_passable(GridCoord::new(-1, 0)));
        assert!(!maze.is_passable(GridCoord::new(2, 0)));
        assert!(!maze.is_passable(GridCoord::new(0, 1)));
    }

    #[test]
    fn test_ragged_rows_padded_with_walls() {
        let maze = GridMaze::from_ascii("S...\n.\n").unwrap();
        assert_eq!(maze.width(), 4);
        assert!(maze.is_passable(GridCoord::new(0, 1)));
        assert!(!maze.is_passable(GridCoord::new(1, 1)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(GridMaze::from_ascii("\n\n"), Err(MazeError::Empty)));
        assert!(matches!(
            GridMaze::from_ascii("..E"),
            Err(MazeError::MissingStart)
        ));
        assert!(matches!(
            GridMaze::from_ascii("S.S"),
            Err(MazeError::DuplicateStart(_))
        ));
        assert!(matches!(
            GridMaze::from_ascii("SEE"),
            Err(MazeError::DuplicateExit(_))
        ));
        match GridMaze::from_ascii("S.\n.x") {
            Err(MazeError::UnknownTile { ch, row, col }) => {
                assert_eq!((ch, row, col), ('x', 1, 1));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_reachable_relative_to_start() {
        let maze = GridMaze::from_ascii(
            "
#####
#.S.#
###.#
#..##
",
        )
        .unwrap();
        let reachable = maze.reachable_from_start();
        let expected: HashSet<GridCoord> = [
            GridCoord::new(0, 0),
            GridCoord::new(-1, 0),
            GridCoord::new(1, 0),
            GridCoord::new(1, 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(reachable, expected);
        assert!(!maze.is_solvable());
    }

    #[test]
    fn test_start_on_exit() {
        let maze = GridMaze::from_ascii("X").unwrap();
        assert_eq!(maze.exit(), Some(maze.start()));
        assert!(maze.is_solvable());
        assert_eq!(maze.render(&HashSet::new()), "X\n");
        assert!(matches!(
            GridMaze::from_ascii("XE"),
            Err(MazeError::DuplicateExit(_))
        ));
    }

    #[test]
    fn test_wall_off_exit() {
        let mut maze = GridMaze::from_ascii("S..E.").unwrap();
        assert!(maze.is_solvable());
        assert!(maze.wall_off_exit());
        assert!(!maze.is_solvable());
        assert_eq!(maze.tile(GridCoord::new(2, 0)), Tile::Wall);
        assert_eq!(maze.tile(GridCoord::new(4, 0)), Tile::Wall);
    }

    #[test]
    fn test_wall_off_exit_next_to_start_is_refused() {
        for ascii in ["X..", "SE.", "S\nE"] {
            let mut maze = GridMaze::from_ascii(ascii).unwrap();
            let before = maze.render(&HashSet::new());

            assert!(!maze.wall_off_exit(), "{:?}", ascii);
            assert!(maze.is_solvable());
            assert_eq!(maze.render(&HashSet::new()), before);
        }
    }

    #[test]
    fn test_space_rows_are_floor() {
        let maze = GridMaze::from_ascii("   \nS#E").unwrap();
        assert_eq!(maze.height(), 2);
        assert_eq!(maze.width(), 3);
        assert_eq!(maze.start(), GridCoord::new(0, 1));
        assert_eq!(maze.tile(GridCoord::new(1, 0)), Tile::Floor);
        assert!(maze.is_solvable());

        // Trailing space row is kept too, blank lines are not
        let maze = GridMaze::from_ascii("\nS#E\n   \n\n").unwrap();
        assert_eq!(maze.height(), 2);
        assert!(maze.is_solvable());
    }

    #[test]
    fn test_render_marks_visited() {
        let maze = GridMaze::from_ascii(SMALL).unwrap();
        let visited: HashSet<GridCoord> = [GridCoord::new(0, 0), GridCoord::new(1, 0)]
            .into_iter()
            .collect();
        assert_eq!(maze.render(&visited), "#####\n#SoE#\n#####\n");
    }
}
