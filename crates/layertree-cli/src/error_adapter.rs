//! Error adapter for converting LayerTreeError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Scene errors carry
//! the scene source and point at the offending TOML span; every other error
//! is reported with a stable code and, where one helps, a hint.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use layertree::{BuildError, LayerTreeError};

/// Adapter for a scene parse error.
pub struct SceneAdapter<'a> {
    err: &'a toml::de::Error,
    src: &'a str,
}

impl<'a> SceneAdapter<'a> {
    pub fn new(err: &'a toml::de::Error, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for SceneAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for SceneAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid scene: {}", self.err.message())
    }
}

impl std::error::Error for SceneAdapter<'_> {}

impl MietteDiagnostic for SceneAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("layertree::scene"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "every `[[elements]]` entry needs a `kind` of group, shape, use, text or image",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Adapter for non-scene [`LayerTreeError`] variants.
pub struct ErrorAdapter<'a>(pub &'a LayerTreeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            LayerTreeError::Io(_) => "layertree::io",
            LayerTreeError::Scene { .. } => "layertree::scene",
            LayerTreeError::Build(BuildError::UnresolvedReference { .. }) => {
                "layertree::build::unresolved_reference"
            }
            LayerTreeError::Build(BuildError::CyclicReference { .. }) => {
                "layertree::build::cyclic_reference"
            }
            LayerTreeError::Build(BuildError::UndecodableImage { .. }) => {
                "layertree::build::undecodable_image"
            }
            LayerTreeError::Export(_) => "layertree::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            LayerTreeError::Build(BuildError::UnresolvedReference { .. }) => {
                "`href` must be `#id` naming an element of the same scene"
            }
            LayerTreeError::Build(BuildError::CyclicReference { .. }) => {
                "an element cannot reference itself, directly or through other `use` elements"
            }
            LayerTreeError::Build(BuildError::UndecodableImage { .. }) => {
                "images must be `data:` URIs of png, jpeg, gif or webp data"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A scene error with source location information.
    Scene(SceneAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Scene(s) => fmt::Display::fmt(s, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Scene(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Scene(s) => s.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Scene(s) => s.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Scene(s) => s.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Scene(s) => s.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`LayerTreeError`] into a list of reportable errors.
pub fn to_reportables(err: &LayerTreeError) -> Vec<Reportable<'_>> {
    match err {
        LayerTreeError::Scene { err, src } => vec![Reportable::Scene(SceneAdapter::new(err, src))],
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use layertree::LayerTreeBuilder;

    use super::*;

    #[test]
    fn test_scene_error_has_label() {
        let src = "width = 10\nheight = \n";
        let err = LayerTreeBuilder::default().parse(src).unwrap_err();

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        let Reportable::Scene(scene) = &reportables[0] else {
            panic!("Expected Scene");
        };
        assert!(scene.to_string().starts_with("invalid scene:"));
        assert_eq!(scene.code().unwrap().to_string(), "layertree::scene");
        assert_eq!(scene.labels().unwrap().count(), 1);
    }

    #[test]
    fn test_build_error_codes() {
        let err = LayerTreeError::Build(BuildError::UnresolvedReference {
            href: "#nope".to_string(),
        });

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(
                    e.code().unwrap().to_string(),
                    "layertree::build::unresolved_reference"
                );
                assert!(e.help().is_some());
            }
            Reportable::Scene(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = LayerTreeError::Io(std::io::Error::other("disk full"));
        let reportables = to_reportables(&err);
        assert!(reportables[0].help().is_none());
        assert_eq!(reportables[0].code().unwrap().to_string(), "layertree::io");
    }
}
