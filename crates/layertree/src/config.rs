//! Configuration types for layer tree building and rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML configuration file. Every section and field is optional.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`FontCatalog`] - Platform fonts used for CJK fallback (`[fonts]`).
//! - [`StyleConfig`] - Root text style and background color (`[style]`).
//! - [`BuildConfig`] - Handling of elements that fail to build (`[build]`).
//!
//! # Example
//!
//! ```
//! # use layertree::config::AppConfig;
//! let config: AppConfig = toml::from_str(r#"
//!     [style]
//!     font_family = "Helvetica"
//!
//!     [build]
//!     on_error = "skip"
//! "#).unwrap();
//!
//! assert_eq!(config.style().font_family(), "Helvetica");
//! assert_eq!(config.style().font_size(), 12.0);
//! ```

use serde::Deserialize;

use layertree_core::color::Color;

use crate::{builder::OnError, font::FontCatalog, state::State};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Font catalog section.
    #[serde(default)]
    fonts: FontCatalog,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Build configuration section.
    #[serde(default)]
    build: BuildConfig,
}

impl AppConfig {
    pub fn new(fonts: FontCatalog, style: StyleConfig, build: BuildConfig) -> Self {
        Self {
            fonts,
            style,
            build,
        }
    }

    pub fn fonts(&self) -> &FontCatalog {
        &self.fonts
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn build(&self) -> &BuildConfig {
        &self.build
    }
}

/// Root text style and export styling.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Font family of text that sets none.
    font_family: String,

    /// Font size of text that sets none.
    font_size: f32,

    /// Canvas background color, as a color string.
    background_color: Option<String>,
}

impl StyleConfig {
    pub fn new(font_family: impl Into<String>, font_size: f32) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            background_color: None,
        }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the state the top-level elements of a document inherit.
    pub fn root_state(&self) -> State {
        State::new(self.font_family.as_str(), self.font_size)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new("Times", 12.0)
    }
}

/// Build behavior.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct BuildConfig {
    #[serde(default)]
    on_error: OnError,
}

impl BuildConfig {
    pub fn new(on_error: OnError) -> Self {
        Self { on_error }
    }

    /// Returns what happens when an element fails to build.
    pub fn on_error(&self) -> OnError {
        self.on_error
    }
}
