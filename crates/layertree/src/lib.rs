//! Layertree - builds renderer-ready layer trees from parsed vector documents.
//!
//! A [`dom::Document`] is walked element by element. Each element becomes a
//! [`draw::Layer`] whose contents are shapes, nested layers for `use`
//! references, text runs with CJK font fallback applied, and decoded images.
//! The resulting tree can be exported to SVG.
//!
//! # Example
//!
//! ```
//! # use layertree::LayerTreeBuilder;
//! let builder = LayerTreeBuilder::default();
//! let document = builder.parse(r##"
//!     width = 200
//!     height = 60
//!
//!     [[elements]]
//!     kind = "text"
//!     value = "任意非零倍数"
//!     x = 10
//!     y = 40
//! "##).unwrap();
//!
//! let root = builder.build(&document).unwrap();
//! let svg = builder.render_svg(&document, &root).unwrap();
//! assert!(svg.contains(r#"font-family="PingFang SC""#));
//! ```

pub mod builder;
pub mod config;
pub mod decode;
pub mod dom;
pub mod export;
pub mod font;
pub mod index;
pub mod state;

mod error;

pub use layertree_core::{color, draw, geometry, identifier};

pub use error::{BuildError, LayerTreeError};

use log::{debug, info, trace};

use layertree_core::{
    draw::{CosmicTextMeasure, Layer},
    geometry::Size,
};

use builder::LayerBuilder;
use config::AppConfig;
use export::{Exporter, svg::Svg};
use index::DocumentIndex;

#[derive(Default)]
pub struct LayerTreeBuilder {
    config: AppConfig,
}

impl LayerTreeBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parses a TOML scene into a document.
    pub fn parse(&self, source: &str) -> Result<dom::Document, LayerTreeError> {
        info!("Parsing scene");

        let document: dom::Document =
            toml::from_str(source).map_err(|err| LayerTreeError::new_scene_error(err, source))?;

        debug!(elements = document.elements.len(); "Scene parsed successfully");
        trace!(document:?; "Parsed document");

        Ok(document)
    }

    /// Builds the layer tree of `document`, measuring text with cosmic-text.
    pub fn build(&self, document: &dom::Document) -> Result<Layer, LayerTreeError> {
        let index = DocumentIndex::new(document);
        let root = LayerBuilder::new(&index, self.config.fonts(), &CosmicTextMeasure)
            .with_on_error(self.config.build().on_error())
            .build(document, &self.config.style().root_state())?;

        Ok(root)
    }

    /// Renders a built layer tree on the canvas of `document`.
    pub fn render_svg(
        &self,
        document: &dom::Document,
        root: &Layer,
    ) -> Result<String, LayerTreeError> {
        let background = self
            .config
            .style()
            .background_color()
            .map_err(LayerTreeError::Export)?;

        let exporter =
            Svg::new(Size::new(document.width, document.height)).with_background(background);

        let mut out = Vec::new();
        exporter
            .export_layer_tree(root, &mut out)
            .map_err(|err| LayerTreeError::Export(err.to_string()))?;

        info!("SVG rendered successfully");
        String::from_utf8(out).map_err(|err| LayerTreeError::Export(err.to_string()))
    }
}
