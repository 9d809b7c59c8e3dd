//! Geometry primitives: points, affine transforms and parametric curves
//!
//! Curves are evaluated in path space. The emitter samples them and maps the
//! sampled points through a [`Transform`] into turtle coordinates.

use std::ops::{Add, Mul, Sub};

use lyon_geom::{vector, Angle, Arc, ArcFlags, CubicBezierSegment, QuadraticBezierSegment, SvgArc};

/// A 2D point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Reflect `other` through this point (used for smooth curve control points)
    pub fn reflect(&self, other: Point) -> Point {
        Point::new(2.0 * self.x - other.x, 2.0 * self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// A 2D affine transform in SVG matrix form.
///
/// ```text
/// [a c e]
/// [b d f]
/// [0 0 1]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self::matrix(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn matrix(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::matrix(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::matrix(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `degrees` around the origin.
    ///
    /// Positive angles turn +x towards +y, which is clockwise on screen in
    /// SVG's y-down coordinate system.
    pub fn rotate(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::matrix(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Rotation by `degrees` around `center`
    pub fn rotate_about(degrees: f64, center: Point) -> Self {
        Self::translate(center.x, center.y)
            .then(&Self::rotate(degrees))
            .then(&Self::translate(-center.x, -center.y))
    }

    pub fn skew_x(degrees: f64) -> Self {
        Self::matrix(1.0, 0.0, degrees.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    pub fn skew_y(degrees: f64) -> Self {
        Self::matrix(1.0, degrees.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
    }

    /// Mirror across the x axis (SVG y-down to turtle y-up)
    pub fn flip_y() -> Self {
        Self::scale(1.0, -1.0)
    }

    /// Matrix product `self × inner`: the result applies `inner` first.
    ///
    /// This is how SVG composes `transform="A B"` and how a parent's
    /// transform wraps a child's.
    pub fn then(&self, inner: &Transform) -> Transform {
        Transform {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            e: self.a * inner.e + self.c * inner.f + self.e,
            f: self.b * inner.e + self.d * inner.f + self.f,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

impl From<Point> for lyon_geom::Point<f64> {
    fn from(p: Point) -> Self {
        lyon_geom::point(p.x, p.y)
    }
}

impl From<lyon_geom::Point<f64>> for Point {
    fn from(p: lyon_geom::Point<f64>) -> Self {
        Point::new(p.x, p.y)
    }
}

/// Result of converting an SVG endpoint arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcShape {
    /// Zero radius: the arc is a straight line to its endpoint
    Line,
    /// Endpoints coincide: the arc draws nothing
    Omit,
    Arc(Arc<f64>),
}

/// Convert an SVG endpoint arc to center form.
///
/// Radii that cannot span the endpoints are scaled up uniformly until
/// exactly one ellipse fits.
pub fn arc_between(
    from: Point,
    to: Point,
    rx: f64,
    ry: f64,
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
) -> ArcShape {
    if from == to {
        return ArcShape::Omit;
    }

    let svg_arc = SvgArc {
        from: from.into(),
        to: to.into(),
        radii: vector(rx.abs(), ry.abs()),
        x_rotation: Angle::degrees(x_axis_rotation),
        flags: ArcFlags { large_arc, sweep },
    };
    if svg_arc.is_straight_line() {
        return ArcShape::Line;
    }
    ArcShape::Arc(svg_arc.to_arc())
}

/// A parametric curve segment, t ∈ [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Cubic {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    Quadratic {
        from: Point,
        ctrl: Point,
        to: Point,
    },
    Arc(Arc<f64>),
}

/// Chords used to estimate curve length
const LENGTH_ESTIMATE_STEPS: usize = 16;

impl Curve {
    pub fn point_at(&self, t: f64) -> Point {
        match *self {
            Curve::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            } => CubicBezierSegment {
                from: from.into(),
                ctrl1: ctrl1.into(),
                ctrl2: ctrl2.into(),
                to: to.into(),
            }
            .sample(t)
            .into(),
            Curve::Quadratic { from, ctrl, to } => QuadraticBezierSegment {
                from: from.into(),
                ctrl: ctrl.into(),
                to: to.into(),
            }
            .sample(t)
            .into(),
            Curve::Arc(arc) => arc.sample(t).into(),
        }
    }

    /// Polyline length estimate
    pub fn approximate_length(&self) -> f64 {
        let mut length = 0.0;
        let mut prev = self.point_at(0.0);
        for i in 1..=LENGTH_ESTIMATE_STEPS {
            let next = self.point_at(i as f64 / LENGTH_ESTIMATE_STEPS as f64);
            length += prev.distance_to(next);
            prev = next;
        }
        length
    }

    /// Sample the curve at `t = i / segments` for `i = 1..=segments`.
    ///
    /// The start point is not included; the last sample is exactly t = 1.
    pub fn sample(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        (1..=segments)
            .map(|i| self.point_at(i as f64 / segments as f64))
            .collect()
    }
}
