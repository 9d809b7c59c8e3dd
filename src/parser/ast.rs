//! Path-data command types

use crate::geometry::Point;

/// One command of SVG path data.
///
/// Relative commands keep their operands as written; they are resolved
/// against the running cursor when emitted.
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo {
        to: Point,
        absolute: bool,
    },
    LineTo {
        to: Point,
        absolute: bool,
    },
    HorizontalLineTo {
        x: f64,
        absolute: bool,
    },
    VerticalLineTo {
        y: f64,
        absolute: bool,
    },
    CubicBezierTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
        absolute: bool,
    },
    /// `S`: first control point is the reflection of the previous one
    SmoothCubicBezierTo {
        ctrl2: Point,
        to: Point,
        absolute: bool,
    },
    QuadraticBezierTo {
        ctrl: Point,
        to: Point,
        absolute: bool,
    },
    /// `T`: control point is the reflection of the previous one
    SmoothQuadraticBezierTo {
        to: Point,
        absolute: bool,
    },
    ArcTo {
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
        absolute: bool,
    },
    ClosePath,
}

impl PathCommand {
    /// Whether every numeric operand is finite
    pub fn is_finite(&self) -> bool {
        match self {
            PathCommand::MoveTo { to, .. }
            | PathCommand::LineTo { to, .. }
            | PathCommand::SmoothQuadraticBezierTo { to, .. } => to.is_finite(),
            PathCommand::HorizontalLineTo { x, .. } => x.is_finite(),
            PathCommand::VerticalLineTo { y, .. } => y.is_finite(),
            PathCommand::CubicBezierTo {
                ctrl1, ctrl2, to, ..
            } => ctrl1.is_finite() && ctrl2.is_finite() && to.is_finite(),
            PathCommand::SmoothCubicBezierTo { ctrl2, to, .. } => {
                ctrl2.is_finite() && to.is_finite()
            }
            PathCommand::QuadraticBezierTo { ctrl, to, .. } => ctrl.is_finite() && to.is_finite(),
            PathCommand::ArcTo {
                rx,
                ry,
                x_axis_rotation,
                to,
                ..
            } => rx.is_finite() && ry.is_finite() && x_axis_rotation.is_finite() && to.is_finite(),
            PathCommand::ClosePath => true,
        }
    }
}

/// The kind of command introduced by a path-data letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    HorizontalLineTo,
    VerticalLineTo,
    CubicBezierTo,
    SmoothCubicBezierTo,
    QuadraticBezierTo,
    SmoothQuadraticBezierTo,
    ArcTo,
    ClosePath,
}

impl CommandKind {
    /// Map a command letter to its kind and absolute flag
    pub fn from_letter(letter: char) -> Option<(CommandKind, bool)> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => CommandKind::MoveTo,
            'L' => CommandKind::LineTo,
            'H' => CommandKind::HorizontalLineTo,
            'V' => CommandKind::VerticalLineTo,
            'C' => CommandKind::CubicBezierTo,
            'S' => CommandKind::SmoothCubicBezierTo,
            'Q' => CommandKind::QuadraticBezierTo,
            'T' => CommandKind::SmoothQuadraticBezierTo,
            'A' => CommandKind::ArcTo,
            'Z' => CommandKind::ClosePath,
            _ => return None,
        };
        Some((kind, letter.is_ascii_uppercase()))
    }

    /// Number of operands consumed per repetition
    pub fn arity(self) -> usize {
        match self {
            CommandKind::MoveTo | CommandKind::LineTo | CommandKind::SmoothQuadraticBezierTo => 2,
            CommandKind::HorizontalLineTo | CommandKind::VerticalLineTo => 1,
            CommandKind::CubicBezierTo => 6,
            CommandKind::SmoothCubicBezierTo | CommandKind::QuadraticBezierTo => 4,
            CommandKind::ArcTo => 7,
            CommandKind::ClosePath => 0,
        }
    }

    /// Build a command from exactly `arity()` operands
    pub(crate) fn build(self, ops: &[f64], absolute: bool) -> Result<PathCommand, String> {
        debug_assert_eq!(ops.len(), self.arity());
        let point = |i: usize| Point::new(ops[i], ops[i + 1]);
        let cmd = match self {
            CommandKind::MoveTo => PathCommand::MoveTo {
                to: point(0),
                absolute,
            },
            CommandKind::LineTo => PathCommand::LineTo {
                to: point(0),
                absolute,
            },
            CommandKind::HorizontalLineTo => PathCommand::HorizontalLineTo {
                x: ops[0],
                absolute,
            },
            CommandKind::VerticalLineTo => PathCommand::VerticalLineTo {
                y: ops[0],
                absolute,
            },
            CommandKind::CubicBezierTo => PathCommand::CubicBezierTo {
                ctrl1: point(0),
                ctrl2: point(2),
                to: point(4),
                absolute,
            },
            CommandKind::SmoothCubicBezierTo => PathCommand::SmoothCubicBezierTo {
                ctrl2: point(0),
                to: point(2),
                absolute,
            },
            CommandKind::QuadraticBezierTo => PathCommand::QuadraticBezierTo {
                ctrl: point(0),
                to: point(2),
                absolute,
            },
            CommandKind::SmoothQuadraticBezierTo => PathCommand::SmoothQuadraticBezierTo {
                to: point(0),
                absolute,
            },
            CommandKind::ArcTo => PathCommand::ArcTo {
                rx: ops[0],
                ry: ops[1],
                x_axis_rotation: ops[2],
                large_arc: arc_flag(ops[3])?,
                sweep: arc_flag(ops[4])?,
                to: point(5),
                absolute,
            },
            CommandKind::ClosePath => PathCommand::ClosePath,
        };
        Ok(cmd)
    }
}

fn arc_flag(value: f64) -> Result<bool, String> {
    if value == 0.0 {
        Ok(false)
    } else if value == 1.0 {
        Ok(true)
    } else {
        Err(format!("Arc flag must be 0 or 1, found {}", value))
    }
}
