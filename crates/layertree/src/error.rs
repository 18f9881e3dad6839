//! Error types for layer tree construction.
//!
//! [`BuildError`] is scoped to a single element: the tree walker reports it
//! together with the offending element and the caller decides whether the
//! whole build is aborted. [`LayerTreeError`] is the facade error returned by
//! [`LayerTreeBuilder`](crate::LayerTreeBuilder).

use std::io;

use thiserror::Error;

use layertree_core::identifier::Id;

use crate::decode::DecodeError;

/// Failure to build the layer contents of one element.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A `use` href has no fragment, or names an id missing from the document.
    #[error("missing referenced element: `{href}`")]
    UnresolvedReference { href: String },

    /// A `use` resolved to an element already being built on the current path.
    #[error("cyclic reference to `{id}` via {}", format_chain(.chain))]
    CyclicReference { id: Id, chain: Vec<Id> },

    #[error("cannot decode image: {reason}")]
    UndecodableImage { reason: String },
}

impl BuildError {
    /// Returns a short, stable name for the error kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnresolvedReference { .. } => "unresolved_reference",
            Self::CyclicReference { .. } => "cyclic_reference",
            Self::UndecodableImage { .. } => "undecodable_image",
        }
    }
}

impl From<DecodeError> for BuildError {
    fn from(error: DecodeError) -> Self {
        Self::UndecodableImage {
            reason: error.to_string(),
        }
    }
}

fn format_chain(chain: &[Id]) -> String {
    chain
        .iter()
        .map(|id| format!("`{id}`"))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// The main error type for layer tree operations.
#[derive(Debug, Error)]
pub enum LayerTreeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid scene: {err}")]
    Scene { err: toml::de::Error, src: String },

    #[error("build error: {0}")]
    Build(#[from] BuildError),

    #[error("export error: {0}")]
    Export(String),
}

impl LayerTreeError {
    /// Create a new `Scene` error with the associated source text.
    pub fn new_scene_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Scene {
            err,
            src: src.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_reference_message() {
        let error = BuildError::CyclicReference {
            id: Id::new("a"),
            chain: vec![Id::new("a"), Id::new("b"), Id::new("a")],
        };
        assert_eq!(
            error.to_string(),
            "cyclic reference to `a` via `a` -> `b` -> `a`"
        );
        assert_eq!(error.kind(), "cyclic_reference");
    }

    #[test]
    fn test_decode_error_becomes_undecodable_image() {
        let error = BuildError::from(DecodeError::Empty);
        assert!(matches!(error, BuildError::UndecodableImage { .. }));
        assert_eq!(error.to_string(), "cannot decode image: data URI payload is empty");
    }

    #[test]
    fn test_build_error_into_layer_tree_error() {
        let error: LayerTreeError = BuildError::UnresolvedReference {
            href: "#nope".to_string(),
        }
        .into();
        assert_eq!(
            error.to_string(),
            "build error: missing referenced element: `#nope`"
        );
    }
}
