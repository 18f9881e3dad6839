//! Inherited rendering state and the paint attributes derived from it.
//!
//! [`State`] is the cascaded context at one point of the element tree. It is
//! never mutated in place: a child receives the value returned by
//! [`State::inheriting`], and the parent's state is left untouched.

use layertree_core::{
    color::Color,
    draw::{
        FillAttributes, FillRule, StrokeAttributes, StrokeCap, StrokeJoin, StrokeStyle,
        TextAnchor, TextAttributes,
    },
};

use crate::dom::{Paint, Style};

/// Cascaded presentation state at a point of the element tree.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    fill: Paint,
    fill_opacity: f32,
    fill_rule: FillRule,
    stroke: Paint,
    stroke_width: f32,
    stroke_opacity: f32,
    stroke_cap: StrokeCap,
    stroke_join: StrokeJoin,
    stroke_dash: StrokeStyle,
    stroke_miter_limit: f32,
    font_name: String,
    font_size: f32,
    text_anchor: TextAnchor,
}

impl State {
    /// Creates the root state: black fill, no stroke, start-anchored text in
    /// the given font.
    pub fn new(font_name: impl Into<String>, font_size: f32) -> Self {
        Self {
            fill: Paint::Color(Color::default()),
            fill_opacity: 1.0,
            fill_rule: FillRule::default(),
            stroke: Paint::None,
            stroke_width: 1.0,
            stroke_opacity: 1.0,
            stroke_cap: StrokeCap::default(),
            stroke_join: StrokeJoin::default(),
            stroke_dash: StrokeStyle::default(),
            stroke_miter_limit: 4.0,
            font_name: font_name.into(),
            font_size,
            text_anchor: TextAnchor::default(),
        }
    }

    /// Returns the state seen by an element carrying `style`.
    ///
    /// Attributes set on the element replace the inherited ones; everything
    /// else is carried over unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use layertree::dom::Style;
    /// # use layertree::state::State;
    /// let root = State::default();
    /// let style = Style {
    ///     font_family: Some("Hiragino Sans".to_string()),
    ///     ..Style::default()
    /// };
    ///
    /// let child = root.inheriting(&style);
    /// assert_eq!(child.font_name(), "Hiragino Sans");
    /// assert_eq!(child.font_size(), root.font_size());
    /// assert_eq!(root.font_name(), "Times");
    /// ```
    pub fn inheriting(&self, style: &Style) -> Self {
        Self {
            fill: style.fill.unwrap_or(self.fill),
            fill_opacity: style.fill_opacity.unwrap_or(self.fill_opacity),
            fill_rule: style.fill_rule.unwrap_or(self.fill_rule),
            stroke: style.stroke.unwrap_or(self.stroke),
            stroke_width: style.stroke_width.unwrap_or(self.stroke_width),
            stroke_opacity: style.stroke_opacity.unwrap_or(self.stroke_opacity),
            stroke_cap: style.stroke_linecap.unwrap_or(self.stroke_cap),
            stroke_join: style.stroke_linejoin.unwrap_or(self.stroke_join),
            stroke_dash: style
                .stroke_dasharray
                .clone()
                .unwrap_or_else(|| self.stroke_dash.clone()),
            stroke_miter_limit: style.stroke_miterlimit.unwrap_or(self.stroke_miter_limit),
            font_name: style
                .font_family
                .clone()
                .unwrap_or_else(|| self.font_name.clone()),
            font_size: style.font_size.unwrap_or(self.font_size),
            text_anchor: style.text_anchor.unwrap_or(self.text_anchor),
        }
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn text_anchor(&self) -> TextAnchor {
        self.text_anchor
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new("Times", 12.0)
    }
}

fn with_opacity(paint: Paint, opacity: f32) -> Option<Color> {
    paint
        .color()
        .map(|color| color.with_alpha(color.alpha() * opacity))
}

/// Derives the stroke attributes of a shape drawn in `state`.
///
/// Stroke opacity is folded into the color's alpha.
pub fn stroke_attributes(state: &State) -> StrokeAttributes {
    let mut stroke = StrokeAttributes::default();
    stroke.set_color(with_opacity(state.stroke, state.stroke_opacity));
    stroke.set_width(state.stroke_width);
    stroke.set_style(state.stroke_dash.clone());
    stroke.set_cap(state.stroke_cap);
    stroke.set_join(state.stroke_join);
    stroke.set_miter_limit(state.stroke_miter_limit);
    stroke
}

/// Derives the fill attributes of a shape drawn in `state`.
pub fn fill_attributes(state: &State) -> FillAttributes {
    FillAttributes::new(state.fill.color(), state.fill_opacity, state.fill_rule)
}

/// Derives the inherited text attributes; text is painted with the fill.
pub fn text_attributes(state: &State) -> TextAttributes {
    let mut attributes = TextAttributes::new(state.font_name.clone(), state.font_size);
    attributes.set_anchor(state.text_anchor);
    attributes.set_color(with_opacity(state.fill, state.fill_opacity));
    attributes
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn red() -> Color {
        Color::new("red").unwrap()
    }

    #[test]
    fn test_default_state_paint() {
        let state = State::default();

        let fill = fill_attributes(&state);
        assert_eq!(fill.color(), Some(Color::default()));
        assert_approx_eq!(f32, fill.opacity(), 1.0);

        let stroke = stroke_attributes(&state);
        assert!(stroke.color().is_none());
        assert!(!stroke.is_visible());
    }

    #[test]
    fn test_inheriting_does_not_touch_parent() {
        let parent = State::default();
        let style = Style {
            fill: Some(Paint::None),
            font_size: Some(30.0),
            ..Style::default()
        };

        let child = parent.inheriting(&style);

        assert!(fill_attributes(&child).color().is_none());
        assert_approx_eq!(f32, child.font_size(), 30.0);
        assert_eq!(fill_attributes(&parent).color(), Some(Color::default()));
        assert_approx_eq!(f32, parent.font_size(), 12.0);
    }

    #[test]
    fn test_inheriting_empty_style_is_identity() {
        let parent = State::new("Helvetica", 16.0).inheriting(&Style {
            stroke: Some(Paint::Color(red())),
            stroke_dasharray: Some(StrokeStyle::Dashed),
            ..Style::default()
        });

        assert_eq!(parent.inheriting(&Style::default()), parent);
    }

    #[test]
    fn test_stroke_attributes_fold_opacity() {
        let state = State::default().inheriting(&Style {
            stroke: Some(Paint::Color(red())),
            stroke_width: Some(3.0),
            stroke_opacity: Some(0.5),
            stroke_linecap: Some(StrokeCap::Round),
            stroke_linejoin: Some(StrokeJoin::Bevel),
            stroke_miterlimit: Some(8.0),
            ..Style::default()
        });

        let stroke = stroke_attributes(&state);
        let color = stroke.color().unwrap();
        assert_approx_eq!(f32, color.alpha(), 0.5);
        assert_approx_eq!(f32, stroke.width(), 3.0);
        assert_eq!(stroke.cap(), StrokeCap::Round);
        assert_eq!(stroke.join(), StrokeJoin::Bevel);
        assert_approx_eq!(f32, stroke.miter_limit(), 8.0);
    }

    #[test]
    fn test_text_attributes_follow_fill() {
        let state = State::default().inheriting(&Style {
            fill: Some(Paint::Color(red())),
            fill_opacity: Some(0.25),
            text_anchor: Some(TextAnchor::End),
            ..Style::default()
        });

        let attributes = text_attributes(&state);
        assert_eq!(attributes.font_name(), "Times");
        assert_eq!(attributes.anchor(), TextAnchor::End);
        assert_approx_eq!(f32, attributes.color().unwrap().alpha(), 0.25);
    }
}
