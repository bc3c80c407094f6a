//! # Marga: Depth-First Maze Navigation
//!
//! Drives a robot from its start cell to the exit of an unknown grid maze.
//! The robot offers nothing but local moves: it can try to step into a
//! neighbouring cell, step back, and tell us when it stands on the exit.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marga::{MazeRobot, Navigator, NavigatorConfig};
//!
//! let mut robot = MyRobot::connect()?;
//! let report = Navigator::new(&mut robot, NavigatorConfig::default()).move_to_exit();
//! println!("{}: {} cells", report.outcome.code(), report.stats.cells_visited);
//! ```
//!
//! ## Coordinate Frame
//!
//! The navigator's coordinates are relative to the start cell `(0, 0)`.
//! `x` grows to the right, `y` grows downwards:
//!
//! ```text
//!              Up (0,-1)
//!                  │
//!   Left (-1,0) ── S ── Right (+1,0)
//!                  │
//!              Down (0,+1)
//! ```
//!
//! Directions are always probed in the order Left, Right, Down, Up.
//!
//! ## Architecture
//!
//! - [`core`]: [`GridCoord`] and [`Direction`]
//! - [`robot`]: the [`MazeRobot`] trait and the run-scoped [`ExitSignal`]
//! - [`navigator`]: depth-first traversal with physical backtracking
//! - [`config`]: YAML-loadable [`NavigatorConfig`]
//! - [`sim`]: grid maze simulation, maze generation and scenarios
//!   (feature `sim`, on by default)

pub mod config;
pub mod core;
pub mod navigator;
pub mod robot;
#[cfg(feature = "sim")]
pub mod sim;

pub use config::{ConfigLoadError, NavigatorConfig, TraversalMode};
pub use crate::core::{Direction, GridCoord};
pub use navigator::{NavigationReport, Navigator, Outcome, TraversalStats};
pub use robot::{ExitSignal, MazeRobot};
