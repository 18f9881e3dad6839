//! Drawing value types of a layer tree.
//!
//! This module provides the backend-agnostic vocabulary the content builder
//! produces: [`Layer`] nodes holding [`LayerContent`] values, together with
//! the paint and text attributes those contents carry.

mod fill;
mod image;
mod layer;
mod shape;
mod stroke;
mod text;

pub use fill::{FillAttributes, FillRule};
pub use image::{Image, ImageFormat, UnsupportedImageType};
pub use layer::{Layer, LayerContent};
pub use shape::{PathSegment, Shape, path_data, points_data};
pub use stroke::{StrokeAttributes, StrokeCap, StrokeJoin, StrokeStyle};
pub use text::{CosmicTextMeasure, TextAnchor, TextAttributes, TextMeasure};
