//! Translation of path commands into turtle commands
//!
//! The emitter keeps the cursor in path space and maps every emitted point
//! through its output transform, so element transforms and the y-axis flip
//! never leak into relative-coordinate resolution.

use tracing::{debug, warn};

use crate::geometry::{arc_between, ArcShape, Curve, Point, Transform};
use crate::parser::PathCommand;
use crate::turtle::command::{CursorState, TurtleCommand};
use crate::turtle::config::EmitConfig;

/// Headings closer than this are considered equal, degrees
const HEADING_EPSILON: f64 = 1e-9;

/// Moves shorter than this have no direction
const MIN_HEADING_DISTANCE: f64 = 1e-12;

/// Emits turtle commands for parsed path data
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    config: EmitConfig,
    transform: Transform,
}

impl Emitter {
    pub fn new(config: EmitConfig) -> Self {
        Self {
            config,
            transform: Transform::identity(),
        }
    }

    /// Map emitted coordinates through `transform`
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Translate `commands`, starting from and updating `cursor`.
    ///
    /// Empty input, or input with non-finite operands, produces no commands
    /// and leaves the cursor untouched.
    pub fn emit(&self, commands: &[PathCommand], cursor: &mut CursorState) -> Vec<TurtleCommand> {
        if commands.is_empty() {
            return Vec::new();
        }
        if let Some(index) = commands.iter().position(|c| !c.is_finite()) {
            warn!(index, "path command has non-finite operands, skipping path");
            return Vec::new();
        }

        let mut pass = Pass {
            emitter: self,
            cursor: *cursor,
            subpath_start: cursor.position,
            prev_cubic_ctrl: None,
            prev_quad_ctrl: None,
            out: Vec::with_capacity(commands.len() * 2),
        };
        for command in commands {
            pass.command(command);
        }

        debug!(
            commands = commands.len(),
            emitted = pass.out.len(),
            "emitted path"
        );
        *cursor = pass.cursor;
        pass.out
    }
}

/// Emit `commands` from the origin with an identity transform
pub fn emit(commands: &[PathCommand], config: &EmitConfig) -> Vec<TurtleCommand> {
    Emitter::new(config.clone()).emit(commands, &mut CursorState::default())
}

/// State of one translation pass
struct Pass<'e> {
    emitter: &'e Emitter,
    cursor: CursorState,
    subpath_start: Point,
    /// Second control point of the previous C/S segment
    prev_cubic_ctrl: Option<Point>,
    /// Control point of the previous Q/T segment
    prev_quad_ctrl: Option<Point>,
    out: Vec<TurtleCommand>,
}

impl Pass<'_> {
    fn command(&mut self, command: &PathCommand) {
        let pos = self.cursor.position;
        let resolve = |p: Point, absolute: bool| if absolute { p } else { pos + p };

        // Smooth curves only reflect a control point of the directly
        // preceding segment
        let prev_cubic = self.prev_cubic_ctrl.take();
        let prev_quad = self.prev_quad_ctrl.take();

        match *command {
            PathCommand::MoveTo { to, absolute } => {
                let target = resolve(to, absolute);
                self.out.push(TurtleCommand::PenUp);
                self.goto(target);
                self.out.push(TurtleCommand::PenDown);
                self.subpath_start = target;
            }
            PathCommand::LineTo { to, absolute } => self.goto(resolve(to, absolute)),
            PathCommand::HorizontalLineTo { x, absolute } => {
                let x = if absolute { x } else { pos.x + x };
                self.goto(Point::new(x, pos.y));
            }
            PathCommand::VerticalLineTo { y, absolute } => {
                let y = if absolute { y } else { pos.y + y };
                self.goto(Point::new(pos.x, y));
            }
            PathCommand::CubicBezierTo {
                ctrl1,
                ctrl2,
                to,
                absolute,
            } => {
                let ctrl2 = resolve(ctrl2, absolute);
                let to = resolve(to, absolute);
                self.curve_to(
                    Curve::Cubic {
                        from: pos,
                        ctrl1: resolve(ctrl1, absolute),
                        ctrl2,
                        to,
                    },
                    to,
                );
                self.prev_cubic_ctrl = Some(ctrl2);
            }
            PathCommand::SmoothCubicBezierTo {
                ctrl2,
                to,
                absolute,
            } => {
                let ctrl1 = prev_cubic.map_or(pos, |c| pos.reflect(c));
                let ctrl2 = resolve(ctrl2, absolute);
                let to = resolve(to, absolute);
                self.curve_to(
                    Curve::Cubic {
                        from: pos,
                        ctrl1,
                        ctrl2,
                        to,
                    },
                    to,
                );
                self.prev_cubic_ctrl = Some(ctrl2);
            }
            PathCommand::QuadraticBezierTo { ctrl, to, absolute } => {
                let ctrl = resolve(ctrl, absolute);
                let to = resolve(to, absolute);
                self.curve_to(Curve::Quadratic { from: pos, ctrl, to }, to);
                self.prev_quad_ctrl = Some(ctrl);
            }
            PathCommand::SmoothQuadraticBezierTo { to, absolute } => {
                let ctrl = prev_quad.map_or(pos, |c| pos.reflect(c));
                let to = resolve(to, absolute);
                self.curve_to(Curve::Quadratic { from: pos, ctrl, to }, to);
                self.prev_quad_ctrl = Some(ctrl);
            }
            PathCommand::ArcTo {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                to,
                absolute,
            } => {
                let to = resolve(to, absolute);
                match arc_between(pos, to, rx, ry, x_axis_rotation, large_arc, sweep) {
                    ArcShape::Omit => {}
                    ArcShape::Line => self.goto(to),
                    ArcShape::Arc(arc) => self.curve_to(Curve::Arc(arc), to),
                }
            }
            PathCommand::ClosePath => self.goto(self.subpath_start),
        }
    }

    /// One move per sample; the final sample lands exactly on `to`
    fn curve_to(&mut self, curve: Curve, to: Point) {
        let segments = self
            .emitter
            .config
            .sampling
            .segments_for(curve.approximate_length());
        let mut samples = curve.sample(segments);
        if let Some(last) = samples.last_mut() {
            *last = to;
        }
        for sample in samples {
            self.goto(sample);
        }
    }

    fn goto(&mut self, target: Point) {
        let transform = &self.emitter.transform;
        let out = transform.apply(target);

        if self.emitter.config.headings {
            if let Some(heading) = heading_towards(self.cursor.turtle, out) {
                if (heading - self.cursor.heading).abs() > HEADING_EPSILON {
                    self.out.push(TurtleCommand::SetHeading(heading));
                    self.cursor.heading = heading;
                }
            }
        }

        self.out.push(TurtleCommand::MoveTo(out));
        self.cursor.position = target;
        self.cursor.turtle = out;
    }
}

/// Heading from `from` to `to` in degrees, counterclockwise from +x, in [0, 360)
pub fn heading_towards(from: Point, to: Point) -> Option<f64> {
    if from.distance_to(to) < MIN_HEADING_DISTANCE {
        return None;
    }
    let degrees = (to.y - from.y).atan2(to.x - from.x).to_degrees();
    Some(degrees.rem_euclid(360.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn emit_str(data: &str, config: &EmitConfig) -> Vec<TurtleCommand> {
        emit(&parse(data).expect("Should parse"), config)
    }

    fn moves(commands: &[TurtleCommand]) -> Vec<Point> {
        commands
            .iter()
            .filter_map(|c| match c {
                TurtleCommand::MoveTo(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    fn assert_close(a: Point, b: Point) {
        assert!(a.distance_to(b) < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_square() {
        let out = emit_str("M 0 0 L 10 0 L 10 10 Z", &EmitConfig::default());
        assert_eq!(
            out,
            vec![
                TurtleCommand::PenUp,
                TurtleCommand::MoveTo(Point::new(0.0, 0.0)),
                TurtleCommand::PenDown,
                TurtleCommand::MoveTo(Point::new(10.0, 0.0)),
                TurtleCommand::MoveTo(Point::new(10.0, 10.0)),
                TurtleCommand::MoveTo(Point::new(0.0, 0.0)),
            ]
        );
    }

    #[test]
    fn test_empty_is_noop() {
        assert_eq!(emit(&[], &EmitConfig::default()), vec![]);
    }

    #[test]
    fn test_relative_line_after_move() {
        let cmds = parse("M 5 5 l 3 0").unwrap();
        let mut cursor = CursorState::default();
        let out = Emitter::default().emit(&cmds, &mut cursor);
        assert_eq!(out.last(), Some(&TurtleCommand::MoveTo(Point::new(8.0, 5.0))));
        assert_eq!(cursor.position, Point::new(8.0, 5.0));
    }

    #[test]
    fn test_relative_resolves_against_initial_cursor() {
        let cmds = parse("l 1 1").unwrap();
        let mut cursor = CursorState::at(Point::new(10.0, 20.0));
        let out = Emitter::default().emit(&cmds, &mut cursor);
        assert_eq!(out, vec![TurtleCommand::MoveTo(Point::new(11.0, 21.0))]);
    }

    #[test]
    fn test_horizontal_and_vertical() {
        let out = emit_str("M 1 2 H 5 v 3 h -2 V 0", &EmitConfig::default());
        assert_eq!(
            moves(&out),
            vec![
                Point::new(1.0, 2.0),
                Point::new(5.0, 2.0),
                Point::new(5.0, 5.0),
                Point::new(3.0, 5.0),
                Point::new(3.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_close_returns_to_subpath_start_and_relative_follows() {
        let out = emit_str("M 0 0 L 4 0 m 10 10 l 5 0 z l 0 1", &EmitConfig::default());
        assert_eq!(
            moves(&out),
            vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(14.0, 10.0),
                Point::new(19.0, 10.0),
                Point::new(14.0, 10.0),
                Point::new(14.0, 11.0),
            ]
        );
    }

    #[test]
    fn test_curve_samples_are_monotonic() {
        // Control points spread evenly on a line: x grows with t
        let out = emit_str("M 0 0 C 10 0 20 0 30 0", &EmitConfig::default());
        let pts = moves(&out);
        let samples = &pts[1..];
        assert!(samples.len() >= 2);
        for pair in samples.windows(2) {
            assert!(pair[1].x > pair[0].x, "samples not increasing: {:?}", pair);
        }
        assert_eq!(*samples.last().unwrap(), Point::new(30.0, 0.0));
    }

    #[test]
    fn test_fixed_segments() {
        let config = EmitConfig::new().with_fixed_segments(5);
        let out = emit_str("M 0 0 Q 50 50 100 0", &config);
        assert_eq!(moves(&out).len(), 1 + 5);
    }

    #[test]
    fn test_tiny_curve_still_has_two_segments() {
        let out = emit_str("M 0 0 q 0.1 0.1 0.2 0", &EmitConfig::default());
        assert_eq!(moves(&out).len(), 1 + 2);
    }

    #[test]
    fn test_smooth_cubic_reflects_previous_control() {
        let config = EmitConfig::new().with_fixed_segments(2);
        let out = emit_str("M 0 0 C 0 10 10 10 10 0 S 20 -10 20 0", &config);
        let pts = moves(&out);
        // M, 2 samples of C, 2 samples of S
        assert_eq!(pts.len(), 5);
        assert_close(pts[3], Point::new(15.0, -7.5));
        assert_eq!(pts[4], Point::new(20.0, 0.0));
    }

    #[test]
    fn test_smooth_quadratic_without_previous_uses_cursor() {
        let config = EmitConfig::new().with_fixed_segments(2);
        let out = emit_str("M 0 0 T 10 0", &config);
        let pts = moves(&out);
        // Control point collapses onto the start point
        assert_close(pts[1], Point::new(2.5, 0.0));
    }

    #[test]
    fn test_arc_lands_on_endpoint() {
        let out = emit_str("M 0 0 A 5 5 0 0 1 10 0", &EmitConfig::default());
        let pts = moves(&out);
        assert!(pts.len() >= 3);
        assert_eq!(*pts.last().unwrap(), Point::new(10.0, 0.0));
        // Every sample lies on the circle around (5, 0)
        for p in &pts[1..] {
            assert!((p.distance_to(Point::new(5.0, 0.0)) - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_arcs() {
        let out = emit_str("M 0 0 A 5 5 0 0 1 0 0", &EmitConfig::default());
        assert_eq!(moves(&out).len(), 1);

        let out = emit_str("M 0 0 A 0 5 0 0 1 10 0", &EmitConfig::default());
        assert_eq!(moves(&out), vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
    }

    #[test]
    fn test_output_transform_keeps_cursor_in_path_space() {
        let cmds = parse("M 0 0 l 10 10 l 5 0").unwrap();
        let mut cursor = CursorState::default();
        let out = Emitter::default()
            .with_transform(Transform::flip_y())
            .emit(&cmds, &mut cursor);
        assert_eq!(
            moves(&out),
            vec![
                Point::new(0.0, -0.0),
                Point::new(10.0, -10.0),
                Point::new(15.0, -10.0),
            ]
        );
        assert_eq!(cursor.position, Point::new(15.0, 10.0));
        assert_eq!(cursor.turtle, Point::new(15.0, -10.0));
    }

    #[test]
    fn test_headings_continue_from_previous_path() {
        let emitter = Emitter::new(EmitConfig::new().with_headings(true));
        let mut cursor = CursorState::default();
        emitter.emit(&parse("M 50 50 L 50 90").unwrap(), &mut cursor);
        assert_eq!(cursor.turtle, Point::new(50.0, 90.0));
        assert!((cursor.heading - 90.0).abs() < 1e-9);

        let mut cursor = cursor.next_path();
        let out = emitter.emit(&parse("M 10 50 L 40 50").unwrap(), &mut cursor);
        // Pen-up move heads from (50, 90), then the stroke turns back east
        match out[1] {
            TurtleCommand::SetHeading(h) => assert!((h - 225.0).abs() < 1e-9, "heading {}", h),
            other => panic!("Expected SetHeading, got {:?}", other),
        }
        assert_eq!(out[4], TurtleCommand::SetHeading(0.0));
        assert_eq!(out[5], TurtleCommand::MoveTo(Point::new(40.0, 50.0)));
    }

    #[test]
    fn test_headings() {
        let config = EmitConfig::new().with_headings(true);
        let out = emit_str("M 0 0 L 10 0 L 10 10", &config);
        assert_eq!(out.len(), 6);
        assert_eq!(out[3], TurtleCommand::MoveTo(Point::new(10.0, 0.0)));
        match out[4] {
            TurtleCommand::SetHeading(h) => assert!((h - 90.0).abs() < 1e-9),
            other => panic!("Expected SetHeading, got {:?}", other),
        }
        assert_eq!(out[5], TurtleCommand::MoveTo(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_heading_towards() {
        let o = Point::ORIGIN;
        assert_eq!(heading_towards(o, o), None);
        assert_eq!(heading_towards(o, Point::new(1.0, 0.0)), Some(0.0));
        let west = heading_towards(o, Point::new(-1.0, 0.0)).unwrap();
        assert!((west - 180.0).abs() < 1e-9);
        let south = heading_towards(o, Point::new(0.0, -1.0)).unwrap();
        assert!((south - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_operands_emit_nothing() {
        let cmds = vec![
            PathCommand::MoveTo {
                to: Point::new(0.0, 0.0),
                absolute: true,
            },
            PathCommand::LineTo {
                to: Point::new(f64::NAN, 1.0),
                absolute: true,
            },
        ];
        let mut cursor = CursorState::default();
        assert!(Emitter::default().emit(&cmds, &mut cursor).is_empty());
        assert_eq!(cursor, CursorState::default());
    }
}
