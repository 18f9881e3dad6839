//! Tree walker turning document elements into layers.
//!
//! Every element becomes a [`Layer`] carrying the element's transform list
//! and opacity; its drawable part becomes one [`LayerContent`] of that layer.
//! Groups contribute one nested layer per child, and `use` elements one
//! nested layer for the element they reference.
//!
//! # Example
//!
//! ```
//! # use layertree::builder::LayerBuilder;
//! # use layertree::dom::Document;
//! # use layertree::font::FontCatalog;
//! # use layertree::index::DocumentIndex;
//! # use layertree::state::State;
//! # use layertree_core::draw::{CosmicTextMeasure, LayerContent};
//! let document: Document = toml::from_str(r##"
//!     width = 100
//!     height = 100
//!
//!     [[elements]]
//!     kind = "shape"
//!     id = "dot"
//!     shape = { type = "ellipse", center = { x = 0, y = 0 }, rx = 4, ry = 4 }
//!
//!     [[elements]]
//!     kind = "use"
//!     href = "#dot"
//!     x = 20
//! "##).unwrap();
//!
//! let index = DocumentIndex::new(&document);
//! let fonts = FontCatalog::default();
//! let builder = LayerBuilder::new(&index, &fonts, &CosmicTextMeasure);
//!
//! let root = builder.build(&document, &State::default()).unwrap();
//! assert_eq!(root.contents().len(), 2);
//! ```

mod contents;

pub use contents::{make_image_contents, make_shape_contents};

use std::ptr;

use indexmap::IndexSet;
use log::{debug, info, trace, warn};
use serde::Deserialize;

use layertree_core::{
    draw::{Layer, LayerContent, TextMeasure},
    identifier::Id,
};

use crate::{
    dom::{Document, Element},
    error::BuildError,
    font::FontCatalog,
    index::ElementLookup,
    state::State,
};

/// What the walker does when a child element fails to build.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    /// Stop and return the first error
    #[default]
    Abort,
    /// Leave the failing element out and continue with its siblings
    Skip,
}

/// Ids of the elements on the current build path, outermost first.
type BuildPath = IndexSet<Id>;

/// Builds layers for the elements of one document.
///
/// The builder holds only shared references to its collaborators. It is
/// `Send + Sync` when they are, and one instance may build any number of
/// documents' elements as long as `lookup` indexes the same document.
#[derive(Debug)]
pub struct LayerBuilder<'a, L: ?Sized, M: ?Sized> {
    lookup: &'a L,
    fonts: &'a FontCatalog,
    measure: &'a M,
    on_error: OnError,
}

impl<'a, L, M> LayerBuilder<'a, L, M>
where
    L: ElementLookup + ?Sized,
    M: TextMeasure + ?Sized,
{
    pub fn new(lookup: &'a L, fonts: &'a FontCatalog, measure: &'a M) -> Self {
        Self {
            lookup,
            fonts,
            measure,
            on_error: OnError::default(),
        }
    }

    /// Sets how failing child elements are handled.
    pub fn with_on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }

    /// Builds the root layer of `document`.
    ///
    /// The root layer has no transform and holds one nested layer per
    /// top-level element.
    ///
    /// # Errors
    ///
    /// Returns the first [`BuildError`] unless the builder skips failing
    /// elements.
    pub fn build(&self, document: &Document, state: &State) -> Result<Layer, BuildError> {
        info!(elements = document.elements.len(); "Building layer tree");

        let mut path = BuildPath::new();
        let mut root = Layer::new();
        self.push_children(&mut root, &document.elements, state, &mut path)?;

        debug!(contents = root.content_count(); "Layer tree built");
        Ok(root)
    }

    /// Builds the layer of a single element in the inherited `state`.
    pub fn make_layer(&self, element: &Element, state: &State) -> Result<Layer, BuildError> {
        self.make_layer_on_path(element, state, &mut BuildPath::new())
    }

    fn make_layer_on_path(
        &self,
        element: &Element,
        state: &State,
        path: &mut BuildPath,
    ) -> Result<Layer, BuildError> {
        trace!(kind = element.kind(), id = element.id().unwrap_or_default(); "Building element");

        let state = state.inheriting(element.style());

        let mut layer = Layer::new();
        for transform in element.transform() {
            layer.push_transform(*transform);
        }
        if let Some(opacity) = element.style().opacity {
            layer.set_opacity(opacity);
        }

        let entered = self
            .resolved_id(element)
            .is_some_and(|id| path.insert(id));
        let result = self.push_contents(&mut layer, element, &state, path);
        if entered {
            path.pop();
        }

        result.map(|()| layer)
    }

    /// Returns the id `element` is reachable by, if any.
    ///
    /// An element whose id is shadowed by an earlier duplicate cannot be the
    /// target of a reference, so it has none.
    fn resolved_id(&self, element: &Element) -> Option<Id> {
        let id = Id::existing(element.id()?)?;
        self.lookup
            .lookup(id)
            .is_some_and(|indexed| ptr::eq(indexed, element))
            .then_some(id)
    }

    fn push_contents(
        &self,
        layer: &mut Layer,
        element: &Element,
        state: &State,
        path: &mut BuildPath,
    ) -> Result<(), BuildError> {
        match element {
            Element::Group(group) => self.push_children(layer, &group.children, state, path)?,
            Element::Shape(shape) => layer.push_content(make_shape_contents(&shape.shape, state)),
            Element::Use(use_element) => {
                let contents = self.make_use_layer_contents_on_path(use_element, state, path)?;
                layer.push_content(contents);
            }
            Element::Text(text) => layer.push_content(self.make_text_contents(text, state)),
            Element::Image(image) => layer.push_content(make_image_contents(image)?),
        }
        Ok(())
    }

    fn push_children(
        &self,
        layer: &mut Layer,
        children: &[Element],
        state: &State,
        path: &mut BuildPath,
    ) -> Result<(), BuildError> {
        for child in children {
            match self.make_layer_on_path(child, state, path) {
                Ok(child_layer) => layer.push_content(LayerContent::Layer(child_layer)),
                Err(err) if self.on_error == OnError::Skip => {
                    warn!(
                        kind = child.kind(),
                        id = child.id().unwrap_or_default(),
                        err:err;
                        "Skipping element that failed to build"
                    );
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}
