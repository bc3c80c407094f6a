//! Simulated robot walking a [`GridMaze`].

use log::{error, info, trace};

use super::maze::{GridMaze, Tile};
use crate::core::{Direction, GridCoord};
use crate::robot::{ExitSignal, MazeRobot};

/// A command received by the simulated robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RobotCommand {
    /// `try_move` and whether it moved
    TryMove {
        /// Requested direction
        direction: Direction,
        /// Did the robot move?
        moved: bool,
    },
    /// Unconditional `step`
    Step {
        /// Requested direction
        direction: Direction,
    },
    /// `halt_and_catch_fire`
    Halt,
}

/// Robot that moves through a [`GridMaze`] and records every command.
///
/// The exit notification fires exactly once, the first time the robot stands
/// on the exit tile while an observer is subscribed. After a halt the robot
/// refuses to move.
#[derive(Debug)]
pub struct SimulatedRobot {
    maze: GridMaze,
    position: GridCoord,
    signal: Option<ExitSignal>,
    exit_notifications: usize,
    halts: usize,
    faults: usize,
    commands: Vec<RobotCommand>,
}

impl SimulatedRobot {
    /// Place a robot on the maze's start cell.
    pub fn new(maze: GridMaze) -> Self {
        let position = maze.start();
        Self {
            maze,
            position,
            signal: None,
            exit_notifications: 0,
            halts: 0,
            faults: 0,
            commands: Vec::new(),
        }
    }

    /// The maze being walked
    pub fn maze(&self) -> &GridMaze {
        &self.maze
    }

    /// Absolute position in the maze
    pub fn position(&self) -> GridCoord {
        self.position
    }

    /// Position relative to the start cell (the navigator's frame)
    pub fn relative_position(&self) -> GridCoord {
        self.position - self.maze.start()
    }

    /// How many times the exit notification fired
    pub fn exit_notifications(&self) -> usize {
        self.exit_notifications
    }

    /// How many times `halt_and_catch_fire` was called
    pub fn halts(&self) -> usize {
        self.halts
    }

    /// `step` calls that ran into a wall
    pub fn faults(&self) -> usize {
        self.faults
    }

    /// Is the robot halted?
    pub fn is_halted(&self) -> bool {
        self.halts > 0
    }

    /// Every command received, in order
    pub fn commands(&self) -> &[RobotCommand] {
        &self.commands
    }

    fn notify_if_on_exit(&mut self) {
        if self.exit_notifications > 0 || self.maze.tile(self.position) != Tile::Exit {
            return;
        }
        if let Some(signal) = &self.signal {
            info!("[SimRobot] Reached exit at {}", self.position);
            self.exit_notifications += 1;
            signal.fire();
        }
    }
}

impl MazeRobot for SimulatedRobot {
    fn try_move(&mut self, direction: Direction) -> bool {
        let target = self.position.neighbor(direction);
        let moved = !self.is_halted() && self.maze.is_passable(target);
        self.commands.push(RobotCommand::TryMove { direction, moved });

        if moved {
            self.position = target;
            trace!("[SimRobot] moved {} to {}", direction.as_str(), target);
            self.notify_if_on_exit();
        }
        moved
    }

    fn step(&mut self, direction: Direction) {
        self.commands.push(RobotCommand::Step { direction });
        let target = self.position.neighbor(direction);

        if self.is_halted() || !self.maze.is_passable(target) {
            self.faults += 1;
            error!(
                "[SimRobot] step {} from {} rejected: target blocked or robot halted",
                direction.as_str(),
                self.position
            );
            return;
        }

        self.position = target;
        self.notify_if_on_exit();
    }

    fn subscribe_exit(&mut self, signal: ExitSignal) {
        self.signal = Some(signal);
        self.notify_if_on_exit();
    }

    fn halt_and_catch_fire(&mut self) {
        self.commands.push(RobotCommand::Halt);
        self.halts += 1;
        error!("[SimRobot] Halt and catch fire at {}", self.position);
    }
}
