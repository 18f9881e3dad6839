//! Text attributes and text measurement.
//!
//! # Overview
//!
//! - [`TextAttributes`] - Resolved font family, size, anchor and color of a text content
//! - [`TextAnchor`] - Horizontal alignment of a text run relative to its position
//! - [`TextMeasure`] - The measurement seam used to turn an anchor into an offset
//! - [`CosmicTextMeasure`] - [`TextMeasure`] backed by `cosmic-text` shaping
//!
//! # Quick Start
//!
//! ```
//! # use layertree_core::draw::{CosmicTextMeasure, TextAnchor, TextAttributes, TextMeasure};
//! let mut attributes = TextAttributes::new("Helvetica", 16.0);
//! attributes.set_anchor(TextAnchor::Middle);
//!
//! let width = CosmicTextMeasure.measure("Hello", &attributes);
//! assert!(width > 0.0);
//! ```

use std::{
    str::FromStr,
    sync::{Arc, Mutex, OnceLock},
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;
use serde::Deserialize;

use crate::{color::Color, geometry::Size};

/// Horizontal alignment of a text run relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// Returns the SVG `text-anchor` value
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }

    /// Returns the horizontal offset of the run's start for a run `width` wide.
    ///
    /// # Examples
    ///
    /// ```
    /// # use layertree_core::draw::TextAnchor;
    /// assert_eq!(TextAnchor::Start.offset(40.0), 0.0);
    /// assert_eq!(TextAnchor::Middle.offset(40.0), -20.0);
    /// assert_eq!(TextAnchor::End.offset(40.0), -40.0);
    /// ```
    pub fn offset(self, width: f32) -> f32 {
        match self {
            Self::Start => 0.0,
            Self::Middle => -width / 2.0,
            Self::End => -width,
        }
    }
}

impl FromStr for TextAnchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "middle" => Ok(Self::Middle),
            "end" => Ok(Self::End),
            _ => Err(format!(
                "invalid text anchor `{s}`, valid values: start, middle, end"
            )),
        }
    }
}

/// Resolved attributes of a text content.
///
/// The font name is only changed while the content is being built (element
/// overrides and script fallback); a finished text content is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAttributes {
    font_name: String,
    size: f32,
    anchor: TextAnchor,
    color: Option<Color>,
}

impl TextAttributes {
    /// Creates start-anchored, black text attributes.
    pub fn new(font_name: impl Into<String>, size: f32) -> Self {
        Self {
            font_name: font_name.into(),
            size,
            anchor: TextAnchor::default(),
            color: Some(Color::default()),
        }
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    /// Returns the font size in user units.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    /// Returns the text color, or `None` when the text is not painted.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn set_font_name(&mut self, font_name: impl Into<String>) {
        self.font_name = font_name.into();
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    pub fn set_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = anchor;
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }
}

/// Measures the advance width of a text run.
///
/// The text path only needs the width of the run to turn a `middle`/`end`
/// anchor into a start offset.
pub trait TextMeasure {
    /// Returns the advance width of `text` drawn with `attributes`.
    fn measure(&self, text: &str, attributes: &TextAttributes) -> f32;
}

/// [`TextMeasure`] backed by a process-wide `cosmic-text` [`FontSystem`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CosmicTextMeasure;

impl TextMeasure for CosmicTextMeasure {
    fn measure(&self, text: &str, attributes: &TextAttributes) -> f32 {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(text, attributes)
            .width()
    }
}

/// TextManager handles text measurement and font operations
/// It maintains a reusable FontSystem instance to avoid expensive recreation
struct TextManager {
    font_system: Arc<Mutex<FontSystem>>,
}

impl TextManager {
    /// Create a new TextManager with a default FontSystem
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Arc::new(Mutex::new(FontSystem::new())),
        }
    }

    /// Calculate the size of `text` in user units using cosmic-text shaping.
    ///
    /// Falls back to an average-advance estimate when shaping produces no
    /// layout runs (for example when no font is installed for the family).
    fn calculate_text_size(&self, text: &str, attributes: &TextAttributes) -> Size {
        if text.is_empty() || attributes.size() <= 0.0 {
            return Size::default();
        }

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        let font_size = attributes.size();
        let metrics = Metrics::new(font_size, font_size * 1.15);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(attributes.font_name()));

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        let layout_runs: Vec<_> = buffer.layout_runs().collect();
        if !layout_runs.is_empty() {
            for last in layout_runs.iter().map(|run| run.glyphs.last()) {
                if let Some(last) = last {
                    max_width = max_width.max(last.x + last.w);
                }
                total_height += metrics.line_height;
            }
        } else {
            max_width = text.chars().count() as f32 * (font_size * 0.55);
            total_height = metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
