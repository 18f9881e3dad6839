//! Stroke attributes of shape contents.
//!
//! A shape without a stroke paint carries a [`StrokeAttributes`] whose color
//! is `None`; [`apply_stroke!`](crate::apply_stroke!) writes it as
//! `stroke="none"` and drops the remaining stroke attributes.

use std::str::FromStr;

use serde::Deserialize;

use crate::color::Color;

/// Line pattern of a stroke.
///
/// # SVG Mapping
///
/// - `Solid`: No dasharray attribute
/// - `Dashed`: "5,5"
/// - `Dotted`: "2,3"
/// - `Custom(pattern)`: Uses the provided pattern string
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line with equal dash and gap lengths (5px dash, 5px gap)
    Dashed,
    /// Dotted line with small dots (2px dot, 3px gap)
    Dotted,
    /// Custom SVG dasharray pattern
    /// Format: comma or space-separated list of dash/gap lengths
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" | "none" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            // Any other value is treated as a custom dasharray pattern
            _ => Ok(Self::Custom(s.to_string())),
        }
    }
}

impl TryFrom<String> for StrokeStyle {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// Defines how line endpoints are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeCap {
    /// Flat cap at the exact endpoint (SVG default)
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    /// Returns the SVG stroke-linecap value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}


/// Defines how line corners (joins) are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeJoin {
    /// Sharp corner with mitered point (SVG default)
    #[default]
    Miter,
    Round,
    Bevel,
}

impl StrokeJoin {
    /// Returns the SVG stroke-linejoin value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}


/// Stroke attributes carried by a shape content.
///
/// A `None` color means the shape is not stroked (SVG `stroke="none"`), which
/// is the initial value of the stroke paint.
///
/// # Examples
///
/// ```
/// use layertree_core::draw::{StrokeAttributes, StrokeCap};
/// use layertree_core::color::Color;
///
/// // Default: not stroked, 1px, solid
/// let stroke = StrokeAttributes::default();
/// assert!(!stroke.is_visible());
///
/// let mut stroke = StrokeAttributes::new(Color::new("red").unwrap(), 2.0);
/// stroke.set_cap(StrokeCap::Round);
/// assert!(stroke.is_visible());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeAttributes {
    color: Option<Color>,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
    join: StrokeJoin,
    miter_limit: f32,
}

impl StrokeAttributes {
    /// Creates a new solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color: Some(color),
            width,
            ..Self::default()
        }
    }

    /// Returns the stroke color, or `None` when the shape is not stroked.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Returns the stroke cap style.
    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    /// Returns the stroke join style.
    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    /// Returns the miter limit.
    pub fn miter_limit(&self) -> f32 {
        self.miter_limit
    }

    /// Returns true if the stroke paints anything at all.
    pub fn is_visible(&self) -> bool {
        self.color.is_some_and(|color| color.alpha() > 0.0) && self.width > 0.0
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    pub fn set_cap(&mut self, cap: StrokeCap) {
        self.cap = cap;
    }

    pub fn set_join(&mut self, join: StrokeJoin) {
        self.join = join;
    }

    pub fn set_miter_limit(&mut self, miter_limit: f32) {
        self.miter_limit = miter_limit;
    }
}

impl Default for StrokeAttributes {
    fn default() -> Self {
        Self {
            color: None,
            width: 1.0,
            style: StrokeStyle::default(),
            cap: StrokeCap::default(),
            join: StrokeJoin::default(),
            miter_limit: 4.0,
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Unstroked attributes produce `stroke="none"` and nothing else.
///
/// # Examples
///
/// ```
/// use layertree_core::draw::StrokeAttributes;
/// use layertree_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeAttributes::new(Color::new("black").unwrap(), 2.0);
/// let rect = svg_element::Rectangle::new()
///     .set("width", 100)
///     .set("height", 50);
///
/// let rect = layertree_core::apply_stroke!(rect, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        match $stroke.color() {
            None => $element.set("stroke", "none"),
            Some(color) => {
                let mut elem = $element
                    .set("stroke", color.to_string())
                    .set("stroke-opacity", color.alpha())
                    .set("stroke-width", $stroke.width())
                    .set("stroke-linecap", $stroke.cap().to_svg_value())
                    .set("stroke-linejoin", $stroke.join().to_svg_value())
                    .set("stroke-miterlimit", $stroke.miter_limit());

                if let Some(dasharray) = $stroke.style().to_svg_value() {
                    elem = elem.set("stroke-dasharray", dasharray);
                }

                elem
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Line, Rectangle};

    use super::*;

    #[test]
    fn test_stroke_default_is_unpainted() {
        let stroke = StrokeAttributes::default();
        assert!(stroke.color().is_none());
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.miter_limit(), 4.0);
        assert!(!stroke.is_visible());
    }

    #[test]
    fn test_stroke_visibility() {
        let black = Color::new("black").unwrap();

        assert!(StrokeAttributes::new(black, 1.0).is_visible());
        assert!(!StrokeAttributes::new(black, 0.0).is_visible());
        assert!(!StrokeAttributes::new(black.with_alpha(0.0), 1.0).is_visible());
    }

    #[test]
    fn test_clearing_color_unpaints_stroke() {
        let mut stroke = StrokeAttributes::new(Color::new("green").unwrap(), 2.5);
        stroke.set_color(None);

        assert!(stroke.color().is_none());
        assert!(!stroke.is_visible());
        // The remaining attributes survive for a later repaint.
        assert_eq!(stroke.width(), 2.5);
    }

    #[test]
    fn test_stroke_style_dasharray() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(StrokeStyle::from_str("none").unwrap(), StrokeStyle::Solid);
        assert_eq!(
            StrokeStyle::from_str("4 2").unwrap().to_svg_value(),
            Some("4 2".to_string())
        );
    }

    #[test]
    fn test_apply_stroke_without_color() {
        let mut stroke = StrokeAttributes::default();
        stroke.set_width(3.0);
        stroke.set_style(StrokeStyle::Dashed);

        let rect = crate::apply_stroke!(Rectangle::new(), &stroke).to_string();

        assert!(rect.contains(r#"stroke="none""#));
        assert!(!rect.contains("stroke-width"));
        assert!(!rect.contains("stroke-dasharray"));
    }

    #[test]
    fn test_apply_stroke_with_color() {
        let mut stroke = StrokeAttributes::new(Color::new("red").unwrap().with_alpha(0.5), 2.0);
        stroke.set_style(StrokeStyle::Dotted);
        stroke.set_cap(StrokeCap::Round);
        stroke.set_join(StrokeJoin::Bevel);

        let line = crate::apply_stroke!(Line::new(), &stroke).to_string();

        assert!(line.contains(r#"stroke-opacity="0.5""#));
        assert!(line.contains(r#"stroke-width="2""#));
        assert!(line.contains(r#"stroke-linecap="round""#));
        assert!(line.contains(r#"stroke-linejoin="bevel""#));
        assert!(line.contains(r#"stroke-dasharray="2,3""#));
    }
}
