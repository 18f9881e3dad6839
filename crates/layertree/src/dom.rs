//! Parsed document elements.
//!
//! This is the typed element tree the layer builder consumes. Elements are a
//! closed set: every kind the builder understands is a variant of [`Element`]
//! and is dispatched by `match`.
//!
//! All types implement [`serde::Deserialize`], so a document can be loaded
//! from a scene file:
//!
//! ```
//! # use layertree::dom::{Document, Element};
//! let document: Document = toml::from_str(r##"
//!     width = 200
//!     height = 60
//!
//!     [[elements]]
//!     kind = "text"
//!     value = "Hello World"
//!     x = 10
//!     y = 30
//!     style = { font_family = "Helvetica", font_size = 16 }
//! "##).unwrap();
//!
//! assert!(matches!(document.elements[0], Element::Text(_)));
//! ```

use std::str::FromStr;

use serde::Deserialize;

use layertree_core::{
    color::Color,
    draw::{FillRule, Shape, StrokeCap, StrokeJoin, StrokeStyle, TextAnchor},
    geometry::Transform,
};

/// A paint value: either nothing or a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Paint {
    None,
    Color(Color),
}

impl Paint {
    /// Returns the painted color, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Self::None => None,
            Self::Color(color) => Some(color),
        }
    }
}

impl FromStr for Paint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" => Ok(Self::None),
            color => Color::new(color).map(Self::Color),
        }
    }
}

impl TryFrom<String> for Paint {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Presentation attributes set explicitly on an element.
///
/// Every field is optional: `None` means "inherit". Opacity is the only one
/// that is not inherited; it applies to the element's own layer.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Style {
    pub fill: Option<Paint>,
    pub fill_opacity: Option<f32>,
    pub fill_rule: Option<FillRule>,
    pub stroke: Option<Paint>,
    pub stroke_width: Option<f32>,
    pub stroke_opacity: Option<f32>,
    pub stroke_linecap: Option<StrokeCap>,
    pub stroke_linejoin: Option<StrokeJoin>,
    pub stroke_dasharray: Option<StrokeStyle>,
    pub stroke_miterlimit: Option<f32>,
    pub opacity: Option<f32>,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub text_anchor: Option<TextAnchor>,
}

/// An element reference such as `#glyph-1`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Href(String);

impl Href {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the fragment identifier, the non-empty part after `#`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use layertree::dom::Href;
    /// assert_eq!(Href::new("#glyph").fragment_id(), Some("glyph"));
    /// assert_eq!(Href::new("fonts.svg#glyph").fragment_id(), Some("glyph"));
    /// assert_eq!(Href::new("#").fragment_id(), None);
    /// assert_eq!(Href::new("glyph").fragment_id(), None);
    /// ```
    pub fn fragment_id(&self) -> Option<&str> {
        self.0
            .split_once('#')
            .map(|(_, fragment)| fragment)
            .filter(|fragment| !fragment.is_empty())
    }
}

impl std::fmt::Display for Href {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A container whose children are built into nested layers.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub transform: Vec<Transform>,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub children: Vec<Element>,
}

/// A shape whose geometry is already resolved.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShapeElement {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub transform: Vec<Transform>,
    #[serde(default)]
    pub style: Style,
    pub shape: Shape,
}

impl ShapeElement {
    pub fn new(shape: Shape) -> Self {
        Self {
            id: None,
            transform: Vec::new(),
            style: Style::default(),
            shape,
        }
    }
}

/// A reference to another element of the same document.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Use {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub transform: Vec<Transform>,
    #[serde(default)]
    pub style: Style,
    pub href: Href,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
}

/// A single run of text.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Text {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub transform: Vec<Transform>,
    #[serde(default)]
    pub style: Style,
    pub value: String,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
}

/// An embedded raster image referenced by a `data:` URI.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub transform: Vec<Transform>,
    #[serde(default)]
    pub style: Style,
    pub href: String,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

/// Any element the layer builder understands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Group(Group),
    Shape(ShapeElement),
    Use(Use),
    Text(Text),
    Image(Image),
}

impl Element {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Group(group) => group.id.as_deref(),
            Self::Shape(shape) => shape.id.as_deref(),
            Self::Use(use_element) => use_element.id.as_deref(),
            Self::Text(text) => text.id.as_deref(),
            Self::Image(image) => image.id.as_deref(),
        }
    }

    pub fn transform(&self) -> &[Transform] {
        match self {
            Self::Group(group) => &group.transform,
            Self::Shape(shape) => &shape.transform,
            Self::Use(use_element) => &use_element.transform,
            Self::Text(text) => &text.transform,
            Self::Image(image) => &image.transform,
        }
    }

    pub fn style(&self) -> &Style {
        match self {
            Self::Group(group) => &group.style,
            Self::Shape(shape) => &shape.style,
            Self::Use(use_element) => &use_element.style,
            Self::Text(text) => &text.style,
            Self::Image(image) => &image.style,
        }
    }

    /// Returns the element's children; only groups have any.
    pub fn children(&self) -> &[Element] {
        match self {
            Self::Group(group) => &group.children,
            _ => &[],
        }
    }

    /// Returns a short, stable name for the element kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Group(_) => "group",
            Self::Shape(_) => "shape",
            Self::Use(_) => "use",
            Self::Text(_) => "text",
            Self::Image(_) => "image",
        }
    }
}

/// A parsed document: its canvas size and top-level elements.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Document {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub elements: Vec<Element>,
}

#[cfg(test)]
mod tests {
    use layertree_core::geometry::Point;

    use super::*;

    #[test]
    fn test_paint_from_str() {
        assert_eq!("none".parse::<Paint>(), Ok(Paint::None));
        assert_eq!(
            "red".parse::<Paint>().unwrap().color(),
            Some(Color::new("red").unwrap())
        );
        assert!("not-a-color".parse::<Paint>().is_err());
    }

    #[test]
    fn test_href_without_fragment() {
        assert_eq!(Href::new("").fragment_id(), None);
        assert_eq!(Href::new("data:image/png;base64,AAAA").fragment_id(), None);
    }

    #[test]
    fn test_element_accessors() {
        let group = Element::Group(Group {
            id: Some("g".to_string()),
            transform: vec![Transform::translate(1.0, 2.0)],
            children: vec![Element::Text(Text {
                value: "child".to_string(),
                ..Text::default()
            })],
            ..Group::default()
        });

        assert_eq!(group.id(), Some("g"));
        assert_eq!(group.kind(), "group");
        assert_eq!(group.transform(), &[Transform::translate(1.0, 2.0)]);
        assert_eq!(group.children().len(), 1);
        assert!(group.children()[0].children().is_empty());
    }

    #[test]
    fn test_deserialize_scene() {
        let document: Document = toml::from_str(
            r##"
            width = 100
            height = 50

            [[elements]]
            kind = "shape"
            id = "dot"
            style = { fill = "none", stroke = "blue", stroke_width = 2 }
            shape = { type = "ellipse", center = { x = 5, y = 5 }, rx = 2, ry = 2 }

            [[elements]]
            kind = "use"
            href = "#dot"
            x = 10
            transform = [{ type = "scale", sx = 2, sy = 2 }]

            [[elements]]
            kind = "group"
            style = { font_family = "serif", text_anchor = "middle" }

            [[elements.children]]
            kind = "text"
            value = "수학 공식"
            "##,
        )
        .unwrap();

        assert_eq!(document.elements.len(), 3);

        let Element::Shape(shape) = &document.elements[0] else {
            panic!("expected a shape element");
        };
        assert_eq!(shape.style.fill, Some(Paint::None));
        assert_eq!(shape.style.stroke_width, Some(2.0));
        assert_eq!(
            shape.shape,
            Shape::Ellipse {
                center: Point::new(5.0, 5.0),
                rx: 2.0,
                ry: 2.0
            }
        );

        let Element::Use(use_element) = &document.elements[1] else {
            panic!("expected a use element");
        };
        assert_eq!(use_element.href.fragment_id(), Some("dot"));
        assert_eq!(use_element.x, Some(10.0));
        assert_eq!(use_element.y, None);
        assert_eq!(use_element.transform, vec![Transform::scale(2.0, 2.0)]);

        let group = &document.elements[2];
        assert_eq!(group.style().text_anchor, Some(TextAnchor::Middle));
        assert_eq!(group.children().len(), 1);
    }

    #[test]
    fn test_deserialize_rejects_unknown_style_field() {
        let result: Result<Document, _> = toml::from_str(
            r#"
            width = 1
            height = 1

            [[elements]]
            kind = "text"
            value = "x"
            style = { colour = "red" }
            "#,
        );
        assert!(result.is_err());
    }
}
