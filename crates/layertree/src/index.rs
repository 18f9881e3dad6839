//! Read-only identifier index over a document's elements.

use indexmap::IndexMap;
use log::{debug, warn};

use layertree_core::identifier::Id;

use crate::dom::{Document, Element};

/// Finds elements by fragment identifier.
///
/// Implementations must not change while a build pass is running; the
/// reference path may query them from several sibling builds at once.
pub trait ElementLookup {
    fn lookup(&self, id: Id) -> Option<&Element>;
}

/// Identifier index over a borrowed [`Document`].
///
/// Every element carrying an `id` is indexed, including elements nested in
/// groups. When an id is used more than once, the first element in document
/// order wins.
///
/// # Examples
///
/// ```
/// # use layertree::dom::{Document, Element, Text};
/// # use layertree::index::{DocumentIndex, ElementLookup};
/// # use layertree_core::identifier::Id;
/// let document = Document {
///     elements: vec![Element::Text(Text {
///         id: Some("label".to_string()),
///         value: "Hello".to_string(),
///         ..Text::default()
///     })],
///     ..Document::default()
/// };
///
/// let index = DocumentIndex::new(&document);
/// assert!(index.lookup(Id::new("label")).is_some());
/// assert!(index.lookup(Id::new("missing")).is_none());
/// ```
#[derive(Debug)]
pub struct DocumentIndex<'a> {
    elements: IndexMap<Id, &'a Element>,
}

impl<'a> DocumentIndex<'a> {
    pub fn new(document: &'a Document) -> Self {
        let mut elements = IndexMap::new();
        for element in &document.elements {
            index_element(&mut elements, element);
        }
        debug!(indexed = elements.len(); "Document index built");

        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

fn index_element<'a>(elements: &mut IndexMap<Id, &'a Element>, element: &'a Element) {
    if let Some(id) = element.id() {
        let id = Id::new(id);
        if elements.contains_key(&id) {
            warn!(id:%; "Duplicate element id, keeping the first occurrence");
        } else {
            elements.insert(id, element);
        }
    }

    for child in element.children() {
        index_element(elements, child);
    }
}

impl ElementLookup for DocumentIndex<'_> {
    fn lookup(&self, id: Id) -> Option<&Element> {
        self.elements.get(&id).copied()
    }
}
