//! Fill attributes of shape contents.

use serde::Deserialize;

use crate::color::Color;

/// Winding rule used to decide what is "inside" a shape.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    #[default]
    #[serde(alias = "non-zero")]
    NonZero,
    #[serde(alias = "even-odd")]
    EvenOdd,
}

impl FillRule {
    /// Returns the SVG `fill-rule` value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::NonZero => "nonzero",
            Self::EvenOdd => "evenodd",
        }
    }
}

/// Fill attributes carried by a shape content.
///
/// A `None` color means the shape is not filled (SVG `fill="none"`).
/// `opacity` is the fill opacity and multiplies the color's own alpha.
///
/// # Examples
///
/// ```
/// use layertree_core::draw::{FillAttributes, FillRule};
/// use layertree_core::color::Color;
///
/// let fill = FillAttributes::default();
/// assert_eq!(fill.color(), Some(Color::default()));
/// assert_eq!(fill.rule(), FillRule::NonZero);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FillAttributes {
    color: Option<Color>,
    opacity: f32,
    rule: FillRule,
}

impl FillAttributes {
    pub fn new(color: Option<Color>, opacity: f32, rule: FillRule) -> Self {
        Self {
            color,
            opacity,
            rule,
        }
    }

    /// Returns the fill color, or `None` when the shape is not filled.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn rule(&self) -> FillRule {
        self.rule
    }

    /// Returns true if the fill paints anything at all.
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.color.is_some_and(|color| color.alpha() > 0.0)
    }
}

impl Default for FillAttributes {
    /// Opaque black, non-zero: the initial fill of an SVG shape.
    fn default() -> Self {
        Self {
            color: Some(Color::default()),
            opacity: 1.0,
            rule: FillRule::default(),
        }
    }
}

/// Apply all fill attributes to an SVG element.
///
/// Unfilled attributes produce `fill="none"` and nothing else.
///
/// # Examples
///
/// ```
/// use layertree_core::draw::FillAttributes;
/// use svg::node::element as svg_element;
///
/// let circle = svg_element::Circle::new().set("r", 5);
/// let circle = layertree_core::apply_fill!(circle, &FillAttributes::default());
/// ```
#[macro_export]
macro_rules! apply_fill {
    ($element:expr, $fill:expr) => {{
        match $fill.color() {
            None => $element.set("fill", "none"),
            Some(color) => $element
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha() * $fill.opacity())
                .set("fill-rule", $fill.rule().to_svg_value()),
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_visibility() {
        assert!(FillAttributes::default().is_visible());
        assert!(!FillAttributes::new(None, 1.0, FillRule::NonZero).is_visible());
        assert!(!FillAttributes::new(Some(Color::default()), 0.0, FillRule::NonZero).is_visible());
    }

    #[test]
    fn test_apply_fill() {
        let fill = FillAttributes::new(Some(Color::default()), 0.5, FillRule::EvenOdd);
        let rect = apply_fill!(svg::node::element::Rectangle::new(), &fill).to_string();
        assert!(rect.contains(r#"fill-opacity="0.5""#));
        assert!(rect.contains(r#"fill-rule="evenodd""#));

        let none = FillAttributes::new(None, 1.0, FillRule::NonZero);
        let rect = apply_fill!(svg::node::element::Rectangle::new(), &none).to_string();
        assert_eq!(rect, r#"<rect fill="none"/>"#);
    }

    #[test]
    fn test_fill_rule_svg_values() {
        assert_eq!(FillRule::NonZero.to_svg_value(), "nonzero");
        assert_eq!(FillRule::EvenOdd.to_svg_value(), "evenodd");
    }
}
