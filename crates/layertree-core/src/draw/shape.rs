//! Resolved shape geometry.
//!
//! Shapes arrive here already resolved to user-space geometry; attribute
//! parsing and unit resolution happen before a [`Shape`] is built.

use serde::Deserialize;

use crate::geometry::{Point, Size};

/// One segment of a [`Shape::Path`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathSegment {
    MoveTo { to: Point },
    LineTo { to: Point },
    QuadTo { control: Point, to: Point },
    CubicTo { control1: Point, control2: Point, to: Point },
    Close,
}

/// Geometry of a shape content.
///
/// # Examples
///
/// ```
/// # use layertree_core::draw::Shape;
/// # use layertree_core::geometry::{Point, Size};
/// let rect = Shape::Rect {
///     origin: Point::new(0.0, 0.0),
///     size: Size::new(10.0, 20.0),
///     rx: 0.0,
///     ry: 0.0,
/// };
/// assert_eq!(rect.kind(), "rect");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
    },
    Rect {
        origin: Point,
        size: Size,
        #[serde(default)]
        rx: f32,
        #[serde(default)]
        ry: f32,
    },
    Ellipse {
        center: Point,
        rx: f32,
        ry: f32,
    },
    Polyline {
        points: Vec<Point>,
    },
    Polygon {
        points: Vec<Point>,
    },
    Path {
        segments: Vec<PathSegment>,
    },
}

impl Shape {
    /// Returns a short, stable name for the kind of shape.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Line { .. } => "line",
            Self::Rect { .. } => "rect",
            Self::Ellipse { .. } => "ellipse",
            Self::Polyline { .. } => "polyline",
            Self::Polygon { .. } => "polygon",
            Self::Path { .. } => "path",
        }
    }
}

/// Formats path segments as SVG path data.
///
/// # Examples
///
/// ```
/// # use layertree_core::draw::{path_data, PathSegment};
/// # use layertree_core::geometry::Point;
/// let data = path_data(&[
///     PathSegment::MoveTo { to: Point::new(0.0, 0.0) },
///     PathSegment::LineTo { to: Point::new(10.0, 5.0) },
///     PathSegment::Close,
/// ]);
/// assert_eq!(data, "M0 0 L10 5 Z");
/// ```
pub fn path_data(segments: &[PathSegment]) -> String {
    segments
        .iter()
        .map(|segment| match *segment {
            PathSegment::MoveTo { to } => format!("M{} {}", to.x(), to.y()),
            PathSegment::LineTo { to } => format!("L{} {}", to.x(), to.y()),
            PathSegment::QuadTo { control, to } => {
                format!("Q{} {} {} {}", control.x(), control.y(), to.x(), to.y())
            }
            PathSegment::CubicTo {
                control1,
                control2,
                to,
            } => format!(
                "C{} {} {} {} {} {}",
                control1.x(),
                control1.y(),
                control2.x(),
                control2.y(),
                to.x(),
                to.y()
            ),
            PathSegment::Close => "Z".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats a point list as an SVG `points` attribute value.
pub fn points_data(points: &[Point]) -> String {
    points
        .iter()
        .map(|point| format!("{},{}", point.x(), point.y()))
        .collect::<Vec<_>>()
        .join(" ")
}
