//! Layers and the contents they hold.
//!
//! A layer tree is the renderer-ready form of a document: every element
//! becomes a [`Layer`] carrying its own transform list and opacity, and every
//! drawable element contributes one [`LayerContent`] to it. References to
//! other elements stay nested as [`LayerContent::Layer`] instead of being
//! flattened into the referencing layer.
//!
//! # Example
//!
//! ```
//! # use layertree_core::draw::{FillAttributes, Layer, LayerContent, Shape, StrokeAttributes};
//! # use layertree_core::geometry::{Point, Transform};
//! let dot = LayerContent::Shape(
//!     Shape::Ellipse { center: Point::new(0.0, 0.0), rx: 1.0, ry: 1.0 },
//!     StrokeAttributes::default(),
//!     FillAttributes::default(),
//! );
//!
//! let mut inner = Layer::new();
//! inner.push_content(dot);
//!
//! let mut outer = Layer::new();
//! outer.push_transform(Transform::translate(10.0, 10.0));
//! outer.push_content(LayerContent::Layer(inner));
//!
//! assert_eq!(outer.contents().len(), 1);
//! assert_eq!(outer.content_count(), 2);
//! ```

use crate::{
    draw::{FillAttributes, Image, Shape, StrokeAttributes, TextAttributes},
    geometry::{Point, Transform},
};

/// The renderer-ready form of one element.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerContent {
    /// A filled and/or stroked shape.
    Shape(Shape, StrokeAttributes, FillAttributes),
    /// A nested layer, used for resolved references and container children.
    Layer(Layer),
    /// A single text run starting at `position`.
    Text(String, Point, TextAttributes),
    /// A decoded raster image.
    Image(Image),
}

impl LayerContent {
    /// Returns a short, stable name for the kind of content.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Shape(..) => "shape",
            Self::Layer(_) => "layer",
            Self::Text(..) => "text",
            Self::Image(_) => "image",
        }
    }
}

/// A node of the layer tree.
///
/// The transform list is composed in list order: index 0 is outermost and
/// the last entry is applied to the contents first.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    transform: Vec<Transform>,
    contents: Vec<LayerContent>,
    opacity: f32,
}

impl Layer {
    /// Creates an empty, fully opaque layer without transforms.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(&self) -> &[Transform] {
        &self.transform
    }

    pub fn contents(&self) -> &[LayerContent] {
        &self.contents
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Appends a transform, applied after (inside) the existing ones.
    pub fn push_transform(&mut self, transform: Transform) {
        self.transform.push(transform);
    }

    /// Inserts a transform at the front of the list, outside the existing ones.
    pub fn prepend_transform(&mut self, transform: Transform) {
        self.transform.insert(0, transform);
    }

    pub fn push_content(&mut self, content: LayerContent) {
        self.contents.push(content);
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    /// Counts every content in this layer and in all nested layers.
    pub fn content_count(&self) -> usize {
        self.contents
            .iter()
            .map(|content| match content {
                LayerContent::Layer(layer) => 1 + layer.content_count(),
                _ => 1,
            })
            .sum()
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            transform: Vec::new(),
            contents: Vec::new(),
            opacity: 1.0,
        }
    }
}
