//! Scenario YAML parsing and execution.
//!
//! A scenario names a maze, an optional navigator configuration and the
//! expected result of running the navigator on it:
//!
//! ```yaml
//! name: "dead end first"
//! maze: |
//!   #####
//!   #.S.#
//!   #.#E#
//!   #####
//! config:
//!   traversal: iterative
//! expect:
//!   outcome: exit_reached
//!   backtracks: 5
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::maze::{GridMaze, MazeError};
use super::robot::SimulatedRobot;
use crate::config::NavigatorConfig;
use crate::core::GridCoord;
use crate::navigator::{NavigationReport, Navigator, Outcome};

/// A test scenario loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    /// Human-readable scenario name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: String,

    /// Inline ASCII maze
    #[serde(default)]
    pub maze: Option<String>,

    /// ASCII maze file, relative to the scenario's directory
    #[serde(default)]
    pub maze_file: Option<String>,

    /// Navigator configuration for this run
    #[serde(default)]
    pub config: NavigatorConfig,

    /// Expected result
    pub expect: Expectation,
}

/// Expected result of a scenario. Unset counters are not checked.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Expectation {
    /// Terminal outcome
    pub outcome: ExpectedOutcome,

    /// Exact size of the visited set
    #[serde(default)]
    pub cells_visited: Option<usize>,

    /// Exact number of compensating moves
    #[serde(default)]
    pub backtracks: Option<usize>,

    /// Exact final position relative to the start
    #[serde(default)]
    pub final_position: Option<GridCoord>,

    /// Exact number of exit notifications the robot fired
    #[serde(default)]
    pub exit_notifications: Option<usize>,
}

/// Outcome named in scenario files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedOutcome {
    /// The exit notification fired
    ExitReached,
    /// The robot was told to halt
    Unreachable,
}

impl From<ExpectedOutcome> for Outcome {
    fn from(expected: ExpectedOutcome) -> Self {
        match expected {
            ExpectedOutcome::ExitReached => Outcome::ExitReached,
            ExpectedOutcome::Unreachable => Outcome::Unreachable,
        }
    }
}

/// Error type for scenario loading
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// I/O error reading file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Maze could not be built
    #[error("Invalid maze: {0}")]
    Maze(#[from] MazeError),

    /// Neither `maze` nor `maze_file` given
    #[error("Scenario '{0}' has no maze")]
    NoMaze(String),
}

/// Everything observed while running a scenario.
#[derive(Clone, Debug)]
pub struct ScenarioResult {
    /// Navigator report
    pub report: NavigationReport,
    /// Visited set, relative to the start
    pub visited: HashSet<GridCoord>,
    /// Cells reachable from the start, relative to the start
    pub reachable: HashSet<GridCoord>,
    /// Final robot position, relative to the start
    pub final_position: GridCoord,
    /// Exit notifications fired by the robot
    pub exit_notifications: usize,
    /// `halt_and_catch_fire` calls
    pub halts: usize,
    /// `step` calls into walls
    pub faults: usize,
}

impl Scenario {
    /// Load scenario from YAML file
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Resolve the maze file path (handles both relative and absolute)
    pub fn resolve_maze_path(&self, base_dir: &Path) -> Option<PathBuf> {
        let file = Path::new(self.maze_file.as_ref()?);
        if file.is_absolute() {
            Some(file.to_path_buf())
        } else {
            Some(base_dir.join(file))
        }
    }

    /// Build the maze. An inline maze wins over `maze_file`.
    pub fn build_maze(&self, base_dir: &Path) -> Result<GridMaze, ScenarioError> {
        if let Some(ascii) = &self.maze {
            return Ok(GridMaze::from_ascii(ascii)?);
        }
        match self.resolve_maze_path(base_dir) {
            Some(path) => Ok(GridMaze::load(&path)?),
            None => Err(ScenarioError::NoMaze(self.name.clone())),
        }
    }

    /// Run the navigator on this scenario's maze.
    pub fn run(&self, base_dir: &Path) -> Result<ScenarioResult, ScenarioError> {
        let maze = self.build_maze(base_dir)?;
        let reachable = maze.reachable_from_start();
        let mut robot = SimulatedRobot::new(maze);

        let mut navigator = Navigator::new(&mut robot, self.config.clone());
        let report = navigator.move_to_exit();
        let visited = navigator.visited().clone();

        Ok(ScenarioResult {
            report,
            visited,
            reachable,
            final_position: robot.relative_position(),
            exit_notifications: robot.exit_notifications(),
            halts: robot.halts(),
            faults: robot.faults(),
        })
    }

    /// Compare a result against the expectation and the navigator's
    /// contract. Returns one message per mismatch.
    pub fn verify(&self, result: &ScenarioResult) -> Vec<String> {
        let mut failures = Vec::new();
        let expected = Outcome::from(self.expect.outcome);
        let report = &result.report;

        if report.outcome != expected {
            failures.push(format!(
                "outcome: expected {}, got {}",
                expected.code(),
                report.outcome.code()
            ));
        }

        let (notifications, halts) = match report.outcome {
            Outcome::ExitReached => (1, 0),
            Outcome::Unreachable => (0, 1),
        };
        if result.exit_notifications != notifications {
            failures.push(format!(
                "exit notifications: expected {}, got {}",
                notifications, result.exit_notifications
            ));
        }
        if result.halts != halts {
            failures.push(format!(
                "halts: expected {}, got {}",
                halts, result.halts
            ));
        }
        if result.faults != 0 {
            failures.push(format!("{} backtracks ran into walls", result.faults));
        }

        if report.outcome == Outcome::Unreachable {
            if result.visited != result.reachable {
                failures.push(format!(
                    "visited {} cells but {} are reachable",
                    result.visited.len(),
                    result.reachable.len()
                ));
            }
            if result.final_position != GridCoord::ORIGIN {
                failures.push(format!(
                    "robot did not return to start, ended at {}",
                    result.final_position
                ));
            }
        }

        if let Some(cells) = self.expect.cells_visited
            && cells != report.stats.cells_visited
        {
            failures.push(format!(
                "cells visited: expected {}, got {}",
                cells, report.stats.cells_visited
            ));
        }
        if let Some(backtracks) = self.expect.backtracks
            && backtracks != report.stats.backtracks
        {
            failures.push(format!(
                "backtracks: expected {}, got {}",
                backtracks, report.stats.backtracks
            ));
        }
        if let Some(notifications) = self.expect.exit_notifications
            && notifications != result.exit_notifications
        {
            failures.push(format!(
                "notification count: expected {}, got {}",
                notifications, result.exit_notifications
            ));
        }
        if let Some(position) = self.expect.final_position
            && position != result.final_position
        {
            failures.push(format!(
                "final position: expected {}, got {}",
                position, result.final_position
            ));
        }

        failures
    }
}
