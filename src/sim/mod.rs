//! Grid maze simulation.
//!
//! Everything needed to run the [`Navigator`](crate::Navigator) without a
//! physical robot:
//!
//! - [`GridMaze`]: ASCII maze with walls, a start and an optional exit
//! - [`generate_maze`]: random perfect mazes for stress and property tests
//! - [`SimulatedRobot`]: [`MazeRobot`](crate::MazeRobot) implementation that
//!   records every command it receives
//! - [`Scenario`]: YAML test scenarios with expected outcomes
//!
//! ```rust,no_run
//! use marga::sim::{GridMaze, SimulatedRobot};
//! use marga::Navigator;
//!
//! let maze = GridMaze::from_ascii("S..#\n.#.E").unwrap();
//! let mut robot = SimulatedRobot::new(maze);
//! let report = Navigator::with_defaults(&mut robot).move_to_exit();
//! assert!(report.is_success());
//! ```

mod generator;
mod maze;
mod robot;
mod scenario;

pub use generator::generate_maze;
pub use maze::{GridMaze, MazeError, Tile};
pub use robot::{RobotCommand, SimulatedRobot};
pub use scenario::{ExpectedOutcome, Expectation, Scenario, ScenarioError, ScenarioResult};
