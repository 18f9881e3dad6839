//! Export of built layer trees.
//!
//! The [`Exporter`] trait is the last stage of the pipeline:
//!
//! ```text
//! Scene (TOML)
//!     ↓ parse
//! Document
//!     ↓ build
//! Layer tree
//!     ↓ export (this module)
//! Output
//! ```

/// SVG export backend.
pub mod svg;

use std::io;

use thiserror::Error;

use layertree_core::draw::Layer;

/// Abstraction for layer tree export backends.
pub trait Exporter {
    /// Writes `root` to `out` in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the tree cannot be converted to the target
    /// format, or [`Error::Io`] if writing the output fails.
    fn export_layer_tree(&self, root: &Layer, out: &mut dyn io::Write) -> Result<(), Error>;
}

/// Errors raised while exporting a layer tree.
#[derive(Debug, Error)]
pub enum Error {
    #[error("render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
