//! Turtle drawing commands and the backend seam that executes them

use crate::geometry::Point;

/// A single turtle primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurtleCommand {
    PenUp,
    PenDown,
    /// Go to an absolute position, drawing if the pen is down
    MoveTo(Point),
    /// Absolute heading in degrees, counterclockwise from +x
    SetHeading(f64),
}

/// Pen position and heading while paths are translated.
///
/// `position` is in the coordinates of the path being translated and
/// restarts at the origin for every path; `turtle` and `heading` follow the
/// real turtle in output space from one path to the next.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorState {
    /// Current position in path space
    pub position: Point,
    /// Where the turtle stands, in output space
    pub turtle: Point,
    /// Current heading in output space, degrees
    pub heading: f64,
}

impl CursorState {
    /// A turtle standing at `position`, where path and output space agree
    pub fn at(position: Point) -> Self {
        Self {
            position,
            turtle: position,
            heading: 0.0,
        }
    }

    /// Restart path-space tracking for the next path, keeping the turtle
    pub fn next_path(self) -> Self {
        Self {
            position: Point::ORIGIN,
            ..self
        }
    }
}

/// A turtle backend: anything that accepts the four primitives
pub trait Turtle {
    fn pen_up(&mut self);
    fn pen_down(&mut self);
    fn goto(&mut self, x: f64, y: f64);
    fn set_heading(&mut self, degrees: f64);

    fn execute(&mut self, command: &TurtleCommand) {
        match *command {
            TurtleCommand::PenUp => self.pen_up(),
            TurtleCommand::PenDown => self.pen_down(),
            TurtleCommand::MoveTo(p) => self.goto(p.x, p.y),
            TurtleCommand::SetHeading(angle) => self.set_heading(angle),
        }
    }
}

/// Feed commands to a backend in order
pub fn replay<T: Turtle + ?Sized>(commands: &[TurtleCommand], turtle: &mut T) {
    for command in commands {
        turtle.execute(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log(Vec<String>);

    impl Turtle for Log {
        fn pen_up(&mut self) {
            self.0.push("up".into());
        }
        fn pen_down(&mut self) {
            self.0.push("down".into());
        }
        fn goto(&mut self, x: f64, y: f64) {
            self.0.push(format!("goto {} {}", x, y));
        }
        fn set_heading(&mut self, degrees: f64) {
            self.0.push(format!("heading {}", degrees));
        }
    }

    #[test]
    fn test_next_path_keeps_turtle_and_heading() {
        let cursor = CursorState {
            position: Point::new(3.0, 4.0),
            turtle: Point::new(3.0, -4.0),
            heading: 270.0,
        }
        .next_path();
        assert_eq!(cursor.position, Point::ORIGIN);
        assert_eq!(cursor.turtle, Point::new(3.0, -4.0));
        assert_eq!(cursor.heading, 270.0);
    }

    #[test]
    fn test_replay_in_order() {
        let mut log = Log::default();
        replay(
            &[
                TurtleCommand::PenUp,
                TurtleCommand::MoveTo(Point::new(1.0, 2.0)),
                TurtleCommand::PenDown,
                TurtleCommand::SetHeading(90.0),
            ],
            &mut log,
        );
        assert_eq!(log.0, vec!["up", "goto 1 2", "down", "heading 90"]);
    }
}
