//! Axis-aligned movement directions.

use serde::{Deserialize, Serialize};

use super::GridCoord;

/// One of the four axis-aligned moves a maze robot can make.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// (-1, 0)
    Left,
    /// (+1, 0)
    Right,
    /// (0, -1)
    Up,
    /// (0, +1)
    Down,
}

impl Direction {
    /// Order in which the navigator probes directions from every cell.
    ///
    /// Fixed so that two structurally identical mazes produce the same
    /// command sequence.
    pub const EXPLORATION_ORDER: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Down,
        Direction::Up,
    ];

    /// Unit step for this direction.
    #[inline]
    pub fn delta(self) -> GridCoord {
        match self {
            Direction::Left => GridCoord::new(-1, 0),
            Direction::Right => GridCoord::new(1, 0),
            Direction::Up => GridCoord::new(0, -1),
            Direction::Down => GridCoord::new(0, 1),
        }
    }

    /// The direction that undoes a move in this direction.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Lowercase name, used in logs and the CLI trace.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_cancels_delta() {
        for dir in Direction::EXPLORATION_ORDER {
            assert_eq!(dir.delta() + dir.opposite().delta(), GridCoord::ORIGIN);
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_exploration_order() {
        assert_eq!(
            Direction::EXPLORATION_ORDER,
            [
                Direction::Left,
                Direction::Right,
                Direction::Down,
                Direction::Up
            ]
        );
    }

    #[test]
    fn test_serde_names() {
        let yaml = serde_yaml::to_string(&Direction::Down).unwrap();
        assert_eq!(yaml.trim(), "down");
        let parsed: Direction = serde_yaml::from_str("left").unwrap();
        assert_eq!(parsed, Direction::Left);
    }
}
