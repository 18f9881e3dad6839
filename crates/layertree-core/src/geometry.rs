//! Geometric primitives for layer placement.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in user space
//! - [`Size`] - Width and height dimensions
//! - [`Transform`] - A single affine transform entry of a layer's transform list
//!
//! # Coordinate System
//!
//! Layer trees use the SVG user-space convention:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```

use std::fmt;

use serde::Deserialize;

/// A 2D point in user space.
///
/// # Examples
///
/// ```
/// # use layertree_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns true if both dimensions are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// One entry of a layer's transform list.
///
/// A layer's transform list is composed in list order: index 0 is the
/// outermost transform, the last entry is the one closest to the layer's own
/// contents. This matches the left-to-right reading of an SVG `transform`
/// attribute.
///
/// # Examples
///
/// ```
/// # use layertree_core::geometry::{Point, Transform};
/// let shift = Transform::translate(10.0, 5.0);
/// assert_eq!(shift.apply(Point::new(1.0, 1.0)), Point::new(11.0, 6.0));
/// assert_eq!(shift.to_string(), "translate(10 5)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transform {
    /// Full affine matrix `[a b c d e f]` as in SVG `matrix(...)`
    Matrix {
        a: f32,
        b: f32,
        c: f32,
        d: f32,
        e: f32,
        f: f32,
    },
    Translate {
        tx: f32,
        ty: f32,
    },
    Scale {
        sx: f32,
        sy: f32,
    },
    /// Rotation about the origin, in degrees
    Rotate {
        angle: f32,
    },
}

impl Transform {
    /// Creates a translation by `(tx, ty)`.
    pub fn translate(tx: f32, ty: f32) -> Self {
        Self::Translate { tx, ty }
    }

    /// Creates a scale by `(sx, sy)`.
    pub fn scale(sx: f32, sy: f32) -> Self {
        Self::Scale { sx, sy }
    }

    /// Returns the transform as affine coefficients `[a, b, c, d, e, f]`.
    pub fn to_matrix(self) -> [f32; 6] {
        match self {
            Self::Matrix { a, b, c, d, e, f } => [a, b, c, d, e, f],
            Self::Translate { tx, ty } => [1.0, 0.0, 0.0, 1.0, tx, ty],
            Self::Scale { sx, sy } => [sx, 0.0, 0.0, sy, 0.0, 0.0],
            Self::Rotate { angle } => {
                let (sin, cos) = angle.to_radians().sin_cos();
                [cos, sin, -sin, cos, 0.0, 0.0]
            }
        }
    }

    /// Maps a point through this transform.
    pub fn apply(self, point: Point) -> Point {
        let [a, b, c, d, e, f] = self.to_matrix();
        Point::new(
            a * point.x() + c * point.y() + e,
            b * point.x() + d * point.y() + f,
        )
    }
}

impl fmt::Display for Transform {
    /// Formats the transform using SVG `transform` attribute syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Matrix {
                a,
                b,
                c,
                d,
                e,
                f: ty,
            } => write!(f, "matrix({a} {b} {c} {d} {e} {ty})"),
            Self::Translate { tx, ty } => write!(f, "translate({tx} {ty})"),
            Self::Scale { sx, sy } => write!(f, "scale({sx} {sy})"),
            Self::Rotate { angle } => write!(f, "rotate({angle})"),
        }
    }
}

/// Maps a point through a transform list, innermost entry first.
///
/// # Examples
///
/// ```
/// # use layertree_core::geometry::{apply_all, Point, Transform};
/// let transforms = [Transform::translate(10.0, 0.0), Transform::scale(2.0, 2.0)];
/// // scale is applied first, then the translation
/// assert_eq!(apply_all(&transforms, Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
/// ```
pub fn apply_all(transforms: &[Transform], point: Point) -> Point {
    transforms
        .iter()
        .rev()
        .fold(point, |point, transform| transform.apply(point))
}
