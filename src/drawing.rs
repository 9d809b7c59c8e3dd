//! Converted drawings and their turtle world coordinates

use crate::document::PaintStyle;
use crate::geometry::{Point, Transform};
use crate::turtle::TurtleCommand;

/// Smallest world width or height, so degenerate drawings still get a canvas
pub const MIN_WORLD_SIZE: f64 = 1.0;

/// Rectangle of world coordinates the turtle canvas is mapped to.
///
/// Unlike SVG user space, `min_y` is the bottom edge when the y axis is
/// flipped; the bounds are always normalized so that min <= max.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 1000.0,
            max_y: 1000.0,
        }
    }
}

impl WorldBounds {
    /// Smallest rectangle containing all points, None if there are none
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        points
            .into_iter()
            .filter(|p| p.is_finite())
            .fold(None, |bounds: Option<WorldBounds>, p| {
                Some(match bounds {
                    None => WorldBounds {
                        min_x: p.x,
                        min_y: p.y,
                        max_x: p.x,
                        max_y: p.y,
                    },
                    Some(b) => WorldBounds {
                        min_x: b.min_x.min(p.x),
                        min_y: b.min_y.min(p.y),
                        max_x: b.max_x.max(p.x),
                        max_y: b.max_y.max(p.y),
                    },
                })
            })
    }

    /// Bounding box of the rectangle spanned by two corners after `transform`
    pub fn from_corners(a: Point, b: Point, transform: &Transform) -> Option<Self> {
        Self::from_points(
            [
                a,
                Point::new(b.x, a.y),
                b,
                Point::new(a.x, b.y),
            ]
            .map(|p| transform.apply(p)),
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Width over height
    pub fn aspect(&self) -> f64 {
        self.width() / self.height()
    }

    /// Grow each side by `fraction` of the width/height, after widening
    /// degenerate sizes to the minimum
    pub fn with_margin(self, fraction: f64) -> Self {
        let b = self.clamped();
        let fraction = if fraction.is_finite() { fraction.max(0.0) } else { 0.0 };
        let dx = b.width() * fraction;
        let dy = b.height() * fraction;
        WorldBounds {
            min_x: b.min_x - dx,
            min_y: b.min_y - dy,
            max_x: b.max_x + dx,
            max_y: b.max_y + dy,
        }
    }

    /// Widen a zero-width or zero-height rectangle around its center
    pub fn clamped(self) -> Self {
        let mut b = self;
        if b.width() < MIN_WORLD_SIZE {
            let cx = (b.min_x + b.max_x) / 2.0;
            b.min_x = cx - MIN_WORLD_SIZE / 2.0;
            b.max_x = cx + MIN_WORLD_SIZE / 2.0;
        }
        if b.height() < MIN_WORLD_SIZE {
            let cy = (b.min_y + b.max_y) / 2.0;
            b.min_y = cy - MIN_WORLD_SIZE / 2.0;
            b.max_y = cy + MIN_WORLD_SIZE / 2.0;
        }
        b
    }
}

/// One converted path element
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: Option<String>,
    pub style: PaintStyle,
    pub commands: Vec<TurtleCommand>,
}

/// A converted document, ready to be written out or replayed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Drawing {
    pub world: WorldBounds,
    pub shapes: Vec<Shape>,
}

impl Drawing {
    /// Every command of every shape, in drawing order
    pub fn commands(&self) -> impl Iterator<Item = &TurtleCommand> {
        self.shapes.iter().flat_map(|s| s.commands.iter())
    }

    /// Bounding box of all positions the turtle visits
    pub fn bounds(&self) -> Option<WorldBounds> {
        WorldBounds::from_points(self.commands().filter_map(|c| match c {
            TurtleCommand::MoveTo(p) => Some(*p),
            _ => None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        assert_eq!(WorldBounds::from_points(Vec::new()), None);
        let b = WorldBounds::from_points(vec![
            Point::new(1.0, 5.0),
            Point::new(-2.0, 3.0),
            Point::new(f64::NAN, 100.0),
        ])
        .unwrap();
        assert_eq!(
            b,
            WorldBounds {
                min_x: -2.0,
                min_y: 3.0,
                max_x: 1.0,
                max_y: 5.0
            }
        );
    }

    #[test]
    fn test_from_corners_flipped() {
        let b = WorldBounds::from_corners(
            Point::ORIGIN,
            Point::new(100.0, 50.0),
            &Transform::flip_y(),
        )
        .unwrap();
        assert_eq!(b.min_y, -50.0);
        assert_eq!(b.max_y, 0.0);
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.aspect(), 2.0);
    }

    #[test]
    fn test_margin() {
        let b = WorldBounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 100.0,
            max_y: 50.0,
        }
        .with_margin(0.1);
        assert_eq!(
            b,
            WorldBounds {
                min_x: -10.0,
                min_y: -5.0,
                max_x: 110.0,
                max_y: 55.0
            }
        );
    }

    #[test]
    fn test_degenerate_bounds_are_widened() {
        let b = WorldBounds::from_points(vec![Point::new(3.0, 0.0), Point::new(3.0, 10.0)])
            .unwrap()
            .with_margin(0.0);
        assert_eq!(b.width(), MIN_WORLD_SIZE);
        assert_eq!(b.min_x, 2.5);
        assert_eq!(b.height(), 10.0);
    }

    #[test]
    fn test_drawing_bounds() {
        let drawing = Drawing {
            world: WorldBounds::default(),
            shapes: vec![Shape {
                id: None,
                style: PaintStyle::default(),
                commands: vec![
                    TurtleCommand::PenUp,
                    TurtleCommand::MoveTo(Point::new(1.0, 1.0)),
                    TurtleCommand::PenDown,
                    TurtleCommand::MoveTo(Point::new(4.0, -2.0)),
                ],
            }],
        };
        let b = drawing.bounds().unwrap();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (1.0, -2.0, 4.0, 1.0));
        assert_eq!(drawing.commands().count(), 4);
    }
}
