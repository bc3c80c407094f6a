//! Integer grid coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use super::Direction;

/// Grid coordinates (integer cell indices).
///
/// The grid is implicit and unbounded. `y` grows downwards, so
/// [`Direction::Up`] decreases it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column)
    pub x: i32,
    /// Y coordinate (row)
    pub y: i32,
}

impl GridCoord {
    /// The navigator's starting cell.
    pub const ORIGIN: GridCoord = GridCoord { x: 0, y: 0 };

    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent cell one unit step away in `direction`.
    #[inline]
    pub fn neighbor(self, direction: Direction) -> GridCoord {
        self + direction.delta()
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The 4 cardinal neighbours, in exploration order.
    #[inline]
    pub fn neighbors_4(self) -> [GridCoord; 4] {
        Direction::EXPLORATION_ORDER.map(|d| self.neighbor(d))
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCoord::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCoord::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_deltas() {
        let c = GridCoord::new(5, 5);
        assert_eq!(c.neighbor(Direction::Left), GridCoord::new(4, 5));
        assert_eq!(c.neighbor(Direction::Right), GridCoord::new(6, 5));
        assert_eq!(c.neighbor(Direction::Up), GridCoord::new(5, 4));
        assert_eq!(c.neighbor(Direction::Down), GridCoord::new(5, 6));
    }

    #[test]
    fn test_neighbors_4_follow_exploration_order() {
        let n4 = GridCoord::ORIGIN.neighbors_4();
        assert_eq!(n4[0], GridCoord::new(-1, 0)); // Left
        assert_eq!(n4[1], GridCoord::new(1, 0)); // Right
        assert_eq!(n4[2], GridCoord::new(0, 1)); // Down
        assert_eq!(n4[3], GridCoord::new(0, -1)); // Up
    }

    #[test]
    fn test_manhattan_distance() {
        let a = GridCoord::new(-2, 3);
        let b = GridCoord::new(1, -1);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(b - a, GridCoord::new(3, -4));
    }

    #[test]
    fn test_display() {
        assert_eq!(GridCoord::new(-1, 4).to_string(), "(-1, 4)");
    }
}
