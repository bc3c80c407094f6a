//! Depth-first maze navigator.
//!
//! The navigator only sees the maze through [`MazeRobot`]: a probe either
//! moves the robot one cell or reports a wall. It keeps its own coordinate
//! model relative to the start cell, never re-enters a visited cell, and
//! walks the robot back out of every branch that did not lead to the exit.
//!
//! ```text
//!   explore(c):
//!     for d in [Left, Right, Down, Up]:
//!       exit reached?   -> stop
//!       try_move(d)?    -> explore(c + d)
//!                          exit still not reached -> step(opposite(d))
//! ```

use std::collections::HashSet;

use log::{debug, info, trace, warn};

use crate::config::{NavigatorConfig, TraversalMode};
use crate::core::{Direction, GridCoord};
use crate::robot::{ExitSignal, MazeRobot};

/// Terminal outcome of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The robot reported reaching the exit.
    ExitReached,
    /// Every reachable cell was explored without finding the exit.
    Unreachable,
}

impl Outcome {
    /// Short code for logging/metrics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ExitReached => "EXIT_REACHED",
            Self::Unreachable => "UNREACHABLE",
        }
    }
}

/// Counters collected during one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Cells added to the visited set
    pub cells_visited: usize,
    /// `try_move` calls
    pub probes: usize,
    /// Probes that hit a wall
    pub blocked: usize,
    /// Probes that moved the robot
    pub advances: usize,
    /// Compensating `step` calls
    pub backtracks: usize,
    /// Deepest exploration frame (origin = 0)
    pub max_depth: usize,
}

/// Result of [`Navigator::move_to_exit`].
#[derive(Clone, Debug)]
pub struct NavigationReport {
    /// How the run ended.
    pub outcome: Outcome,
    /// Traversal counters.
    pub stats: TraversalStats,
}

impl NavigationReport {
    /// Did the robot reach the exit?
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::ExitReached
    }
}

/// Frame of the iterative traversal.
struct Frame {
    coord: GridCoord,
    /// Index into [`Direction::EXPLORATION_ORDER`] of the next probe.
    next: usize,
    /// Direction of the descent that is waiting to be undone.
    descended: Option<Direction>,
}

impl Frame {
    fn new(coord: GridCoord) -> Self {
        Self {
            coord,
            next: 0,
            descended: None,
        }
    }
}

/// Moves a robot from the start cell towards the maze exit.
pub struct Navigator<'r, R: MazeRobot + ?Sized> {
    robot: &'r mut R,
    config: NavigatorConfig,
    visited: HashSet<GridCoord>,
    exit: ExitSignal,
    stats: TraversalStats,
}

impl<'r, R: MazeRobot + ?Sized> Navigator<'r, R> {
    /// Create a navigator for a robot standing on the start cell.
    pub fn new(robot: &'r mut R, config: NavigatorConfig) -> Self {
        Self {
            robot,
            config,
            visited: HashSet::new(),
            exit: ExitSignal::new(),
            stats: TraversalStats::default(),
        }
    }

    /// Create with default configuration
    pub fn with_defaults(robot: &'r mut R) -> Self {
        Self::new(robot, NavigatorConfig::default())
    }

    /// Cells explored by the most recent run, relative to the start cell.
    pub fn visited(&self) -> &HashSet<GridCoord> {
        &self.visited
    }

    /// Counters of the most recent run.
    pub fn stats(&self) -> &TraversalStats {
        &self.stats
    }

    /// Get the configuration
    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Drive the robot until it reports the exit, or give up.
    ///
    /// The robot must stand on the start cell and must not have reported the
    /// exit yet. If the whole reachable region is explored without reaching
    /// the exit, [`MazeRobot::halt_and_catch_fire`] is called exactly once.
    ///
    /// After a successful run the robot is left wherever the exit
    /// notification found it.
    pub fn move_to_exit(&mut self) -> NavigationReport {
        self.visited = HashSet::new();
        self.stats = TraversalStats::default();
        self.exit = ExitSignal::new();
        self.robot.subscribe_exit(self.exit.clone());

        info!(
            "[Navigator] Starting {:?} traversal from {}",
            self.config.traversal,
            GridCoord::ORIGIN
        );

        match self.config.traversal {
            TraversalMode::Recursive => self.explore(GridCoord::ORIGIN, 0),
            TraversalMode::Iterative => self.explore_iterative(GridCoord::ORIGIN),
        }

        let outcome = if self.exit.is_fired() {
            info!(
                "[Navigator] Exit reached: {} cells visited, {} backtracks",
                self.stats.cells_visited, self.stats.backtracks
            );
            Outcome::ExitReached
        } else {
            warn!(
                "[Navigator] Exit unreachable: all {} reachable cells explored",
                self.stats.cells_visited
            );
            self.robot.halt_and_catch_fire();
            Outcome::Unreachable
        };

        NavigationReport {
            outcome,
            stats: self.stats.clone(),
        }
    }

    /// Recursive depth-first exploration from `current`, where the robot
    /// currently stands.
    fn explore(&mut self, current: GridCoord, depth: usize) {
        if !self.enter(current, depth) {
            return;
        }

        for direction in Direction::EXPLORATION_ORDER {
            if self.exit.is_fired() {
                return;
            }
            if !self.probe(current, direction) {
                continue;
            }
            self.explore(current.neighbor(direction), depth + 1);
            self.retreat(direction);
        }

        self.log_dead_end(current);
    }

    /// Same traversal as [`Self::explore`] with an explicit frame stack.
    fn explore_iterative(&mut self, origin: GridCoord) {
        if !self.enter(origin, 0) {
            return;
        }

        let mut stack = vec![Frame::new(origin)];

        while let Some(frame) = stack.last_mut() {
            if let Some(direction) = frame.descended.take() {
                self.retreat(direction);
            }

            if self.exit.is_fired() {
                stack.pop();
                continue;
            }

            let Some(&direction) = Direction::EXPLORATION_ORDER.get(frame.next) else {
                let coord = frame.coord;
                stack.pop();
                self.log_dead_end(coord);
                continue;
            };
            frame.next += 1;

            let current = frame.coord;
            if !self.probe(current, direction) {
                continue;
            }
            frame.descended = Some(direction);

            let neighbor = current.neighbor(direction);
            // Depth of the new frame equals the current stack length
            if self.enter(neighbor, stack.len()) {
                stack.push(Frame::new(neighbor));
            }
        }
    }

    /// Mark `coord` visited. Returns false if it was already visited or the
    /// exit has been reached, in which case nothing changes.
    fn enter(&mut self, coord: GridCoord, depth: usize) -> bool {
        if self.exit.is_fired() || !self.visited.insert(coord) {
            return false;
        }

        self.stats.cells_visited += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let interval = self.config.progress_log_interval;
        if interval > 0 && self.stats.cells_visited % interval == 0 {
            debug!(
                "[Navigator] Progress: {} cells visited, depth {}, {} backtracks",
                self.stats.cells_visited, depth, self.stats.backtracks
            );
        }
        true
    }

    /// Try to move from `from` in `direction`.
    fn probe(&mut self, from: GridCoord, direction: Direction) -> bool {
        self.stats.probes += 1;
        let moved = self.robot.try_move(direction);
        if moved {
            self.stats.advances += 1;
            trace!(
                "[Navigator] {} -> {}: moved to {}",
                from,
                direction.as_str(),
                from.neighbor(direction)
            );
        } else {
            self.stats.blocked += 1;
            trace!("[Navigator] {} -> {}: blocked", from, direction.as_str());
        }
        moved
    }

    /// Undo a descent in `direction`, unless the exit was found in it.
    fn retreat(&mut self, direction: Direction) {
        if self.exit.is_fired() {
            return;
        }
        self.stats.backtracks += 1;
        trace!("[Navigator] backtrack {}", direction.opposite().as_str());
        self.robot.step(direction.opposite());
    }

    fn log_dead_end(&self, coord: GridCoord) {
        if !self.exit.is_fired() {
            debug!("[Navigator] Exhausted {}", coord);
        }
    }
}
