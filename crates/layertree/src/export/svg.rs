//! SVG rendering of layer trees.
//!
//! Each [`Layer`] becomes a `<g>` carrying its transform list and opacity,
//! and each content becomes one SVG element inside it. Text is written at
//! its already anchored start point, so no `text-anchor` is emitted.

use std::io;

use base64::Engine;
use log::{debug, info};
use svg::{Node, node::element as svg_element};

use layertree_core::{
    apply_fill, apply_stroke,
    color::Color,
    draw::{
        FillAttributes, Image, Layer, LayerContent, Shape, StrokeAttributes, TextAttributes,
        path_data, points_data,
    },
    geometry::{Point, Size},
};

use super::{Error, Exporter};

/// SVG exporter for a canvas of a fixed size.
#[derive(Debug, Clone)]
pub struct Svg {
    size: Size,
    background: Option<Color>,
}

impl Svg {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            background: None,
        }
    }

    /// Paints the whole canvas with `background` below the layer tree.
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Renders the layer tree into an SVG document.
    pub fn render_document(&self, root: &Layer) -> svg::Document {
        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", self.size.width(), self.size.height()),
            )
            .set("width", self.size.width())
            .set("height", self.size.height());

        if let Some(background) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", background)
                    .set("fill-opacity", background.alpha()),
            );
        }

        debug!(contents = root.content_count(); "Rendering layer tree");
        doc.add(self.render_layer(root))
    }

    fn render_layer(&self, layer: &Layer) -> svg_element::Group {
        let mut group = svg_element::Group::new();

        if !layer.transform().is_empty() {
            let transform = layer
                .transform()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            group = group.set("transform", transform);
        }
        if layer.opacity() < 1.0 {
            group = group.set("opacity", layer.opacity());
        }

        for content in layer.contents() {
            group.append(self.render_content(content));
        }
        group
    }

    fn render_content(&self, content: &LayerContent) -> Box<dyn Node> {
        match content {
            LayerContent::Shape(shape, stroke, fill) => render_shape(shape, stroke, fill),
            LayerContent::Layer(layer) => Box::new(self.render_layer(layer)),
            LayerContent::Text(value, position, attributes) => {
                Box::new(render_text(value, *position, attributes))
            }
            LayerContent::Image(image) => Box::new(render_image(image)),
        }
    }
}

impl Exporter for Svg {
    fn export_layer_tree(&self, root: &Layer, out: &mut dyn io::Write) -> Result<(), Error> {
        let doc = self.render_document(root);
        svg::write(out, &doc)?;

        info!(width = self.size.width(), height = self.size.height(); "SVG written");
        Ok(())
    }
}

fn render_shape(shape: &Shape, stroke: &StrokeAttributes, fill: &FillAttributes) -> Box<dyn Node> {
    macro_rules! painted {
        ($element:expr) => {
            Box::new(apply_stroke!(apply_fill!($element, fill), stroke))
        };
    }

    match shape {
        Shape::Line { from, to } => painted!(
            svg_element::Line::new()
                .set("x1", from.x())
                .set("y1", from.y())
                .set("x2", to.x())
                .set("y2", to.y())
        ),
        Shape::Rect {
            origin,
            size,
            rx,
            ry,
        } => {
            let mut rect = svg_element::Rectangle::new()
                .set("x", origin.x())
                .set("y", origin.y())
                .set("width", size.width())
                .set("height", size.height());
            if *rx > 0.0 || *ry > 0.0 {
                rect = rect.set("rx", *rx).set("ry", *ry);
            }
            painted!(rect)
        }
        Shape::Ellipse { center, rx, ry } => painted!(
            svg_element::Ellipse::new()
                .set("cx", center.x())
                .set("cy", center.y())
                .set("rx", *rx)
                .set("ry", *ry)
        ),
        Shape::Polyline { points } => {
            painted!(svg_element::Polyline::new().set("points", points_data(points)))
        }
        Shape::Polygon { points } => {
            painted!(svg_element::Polygon::new().set("points", points_data(points)))
        }
        Shape::Path { segments } => {
            painted!(svg_element::Path::new().set("d", path_data(segments)))
        }
    }
}

fn render_text(value: &str, position: Point, attributes: &TextAttributes) -> svg_element::Text {
    let text = svg_element::Text::new(value)
        .set("x", position.x())
        .set("y", position.y())
        .set("font-family", attributes.font_name())
        .set("font-size", attributes.size());

    match attributes.color() {
        None => text.set("fill", "none"),
        Some(color) => text
            .set("fill", color.to_string())
            .set("fill-opacity", color.alpha()),
    }
}

fn render_image(image: &Image) -> svg_element::Image {
    let encoded = base64::engine::general_purpose::STANDARD.encode(image.data());
    let mut element = svg_element::Image::new()
        .set("x", image.origin().x())
        .set("y", image.origin().y())
        .set("href", format!("data:{};base64,{encoded}", image.mime_type()));

    // Unset dimensions are left to the image's intrinsic size.
    if let Some(width) = image.width() {
        element = element.set("width", width);
    }
    if let Some(height) = image.height() {
        element = element.set("height", height);
    }
    element
}
