//! Robot abstraction driven by the navigator.

use std::cell::Cell;
use std::rc::Rc;

use crate::core::Direction;

/// Run-scoped "exit reached" flag.
///
/// The navigator creates one per run and hands a clone to the robot through
/// [`MazeRobot::subscribe_exit`]. The robot fires it synchronously from inside
/// the motion call that brought it onto the exit, so the navigator sees it as
/// soon as that call returns. Once fired it stays fired.
#[derive(Clone, Debug, Default)]
pub struct ExitSignal {
    reached: Rc<Cell<bool>>,
}

impl ExitSignal {
    /// Create an unfired signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the exit has been reached.
    pub fn fire(&self) {
        self.reached.set(true);
    }

    /// Has the exit been reached?
    #[inline]
    pub fn is_fired(&self) -> bool {
        self.reached.get()
    }
}

/// Movement primitives of a robot standing somewhere in an unknown maze.
///
/// Implement this trait to connect the [`Navigator`](crate::Navigator) to a
/// real robot or a simulation. The robot never reports its position; the
/// navigator tracks it from the moves that succeeded.
///
/// # Example
///
/// ```ignore
/// struct MyRobot { /* motor + bumper handles */ }
///
/// impl MazeRobot for MyRobot {
///     fn try_move(&mut self, direction: Direction) -> bool {
///         self.drive_one_cell(direction).is_ok()
///     }
///
///     fn step(&mut self, direction: Direction) {
///         let _ = self.drive_one_cell(direction);
///     }
///
///     fn subscribe_exit(&mut self, signal: ExitSignal) {
///         self.exit_signal = Some(signal);
///     }
///
///     fn halt_and_catch_fire(&mut self) {
///         self.motors.stop();
///     }
/// }
/// ```
pub trait MazeRobot {
    /// Attempt to move one cell in `direction`.
    ///
    /// Returns true if the robot moved. On false the position is unchanged.
    /// A successful move onto the exit fires the subscribed [`ExitSignal`]
    /// before returning.
    fn try_move(&mut self, direction: Direction) -> bool;

    /// Move one cell in `direction` without reporting the result.
    ///
    /// Only used to back out into a cell the robot already stood on, so the
    /// move is assumed to succeed.
    fn step(&mut self, direction: Direction);

    /// Register the observer for the exit notification.
    ///
    /// Called once per run. A robot that already stands on the exit fires the
    /// signal immediately.
    fn subscribe_exit(&mut self, signal: ExitSignal);

    /// The exit cannot be reached from the start. Terminal.
    fn halt_and_catch_fire(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_starts_unfired() {
        let signal = ExitSignal::new();
        assert!(!signal.is_fired());
    }

    #[test]
    fn test_signal_clones_share_state() {
        let signal = ExitSignal::new();
        let observer = signal.clone();
        observer.fire();
        assert!(signal.is_fired());

        // Firing again is harmless
        observer.fire();
        assert!(signal.is_fired());
    }

    #[test]
    fn test_fresh_signal_is_independent() {
        let first = ExitSignal::new();
        first.fire();
        let second = ExitSignal::new();
        assert!(!second.is_fired());
    }
}
