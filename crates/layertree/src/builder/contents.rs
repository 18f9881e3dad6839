//! The four content paths: shape, reference, text and image.

use std::str::FromStr;

use log::{debug, warn};

use layertree_core::{
    draw::{Image, ImageFormat, LayerContent, Shape, TextAnchor, TextMeasure},
    geometry::{Point, Transform},
    identifier::Id,
};

use super::{BuildPath, LayerBuilder};
use crate::{
    decode::decode_href,
    dom,
    error::BuildError,
    index::ElementLookup,
    state::{self, State},
};

/// Builds the contents of a shape drawn with the paint of `state`.
pub fn make_shape_contents(shape: &Shape, state: &State) -> LayerContent {
    let stroke = state::stroke_attributes(state);
    let fill = state::fill_attributes(state);
    LayerContent::Shape(shape.clone(), stroke, fill)
}

/// Decodes an embedded image and places it at `(x, y)`.
///
/// Width and height are copied from the element; when absent they stay unset
/// and the renderer uses the image's intrinsic size.
///
/// # Errors
///
/// Returns [`BuildError::UndecodableImage`] if the href is not a decodable
/// `data:` URI, the payload is empty, or its MIME type is not a supported
/// raster format.
pub fn make_image_contents(image: &dom::Image) -> Result<LayerContent, BuildError> {
    let result = decode_image(image);
    if let Err(err) = &result {
        warn!(id = image.id.as_deref().unwrap_or_default(), reason:% = err; "Cannot decode image");
    }
    result.map(LayerContent::Image)
}

fn decode_image(image: &dom::Image) -> Result<Image, BuildError> {
    let decoded = decode_href(&image.href)?;
    let format = ImageFormat::from_str(decoded.mime_type()).map_err(|err| {
        BuildError::UndecodableImage {
            reason: err.to_string(),
        }
    })?;

    let decoded = Image::new(format, decoded.into_data()).ok_or_else(|| {
        BuildError::UndecodableImage {
            reason: "image payload is empty".to_string(),
        }
    })?;

    Ok(decoded
        .with_origin(Point::new(image.x.unwrap_or(0.0), image.y.unwrap_or(0.0)))
        .with_width(image.width)
        .with_height(image.height))
}

impl<L, M> LayerBuilder<'_, L, M>
where
    L: ElementLookup + ?Sized,
    M: TextMeasure + ?Sized,
{
    /// Builds the contents of a `use` element: a nested layer holding the
    /// referenced element, built in the same inherited `state`.
    ///
    /// A non-zero `(x, y)` offset becomes a translate inserted in front of the
    /// nested layer's own transforms.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnresolvedReference`] when the href has no
    /// fragment or names no element, [`BuildError::CyclicReference`] when the
    /// referenced element is already being built, and any error raised while
    /// building the referenced element.
    pub fn make_use_layer_contents(
        &self,
        use_element: &dom::Use,
        state: &State,
    ) -> Result<LayerContent, BuildError> {
        self.make_use_layer_contents_on_path(use_element, state, &mut BuildPath::new())
    }

    pub(super) fn make_use_layer_contents_on_path(
        &self,
        use_element: &dom::Use,
        state: &State,
        path: &mut BuildPath,
    ) -> Result<LayerContent, BuildError> {
        let use_id = use_element.id.as_deref().unwrap_or_default();

        let resolved = use_element
            .href
            .fragment_id()
            .and_then(Id::existing)
            .and_then(|id| self.lookup.lookup(id).map(|element| (id, element)));
        let Some((id, element)) = resolved else {
            warn!(id = use_id, href:% = use_element.href; "Missing referenced element");
            return Err(BuildError::UnresolvedReference {
                href: use_element.href.to_string(),
            });
        };

        if path.contains(&id) {
            let chain: Vec<Id> = path.iter().copied().chain([id]).collect();
            warn!(id = use_id, referenced:% = id; "Cyclic reference");
            return Err(BuildError::CyclicReference { id, chain });
        }

        let mut layer = self.make_layer_on_path(element, state, path)?;

        let offset = Point::new(use_element.x.unwrap_or(0.0), use_element.y.unwrap_or(0.0));
        if !offset.is_zero() {
            layer.prepend_transform(Transform::translate(offset.x(), offset.y()));
        }

        debug!(referenced:% = id, x = offset.x(), y = offset.y(); "Resolved reference");
        Ok(LayerContent::Layer(layer))
    }

    /// Builds the contents of a text run.
    ///
    /// Font family, size and anchor set on the element override the inherited
    /// ones; the family is then substituted through the font catalog when the
    /// text needs a CJK-capable font. A `middle` or `end` anchor shifts the
    /// start point left by half or all of the measured width.
    pub fn make_text_contents(&self, text: &dom::Text, state: &State) -> LayerContent {
        let mut point = Point::new(text.x.unwrap_or(0.0), text.y.unwrap_or(0.0));

        let mut attributes = state::text_attributes(state);
        if let Some(font_family) = &text.style.font_family {
            attributes.set_font_name(font_family.as_str());
        }
        if let Some(font_size) = text.style.font_size {
            attributes.set_size(font_size);
        }
        if let Some(anchor) = text.style.text_anchor {
            attributes.set_anchor(anchor);
        }

        let resolved = self.fonts.resolve(attributes.font_name(), &text.value);
        if resolved != attributes.font_name() {
            debug!(from = attributes.font_name(), to = resolved; "Substituted CJK font");
            let resolved = resolved.to_string();
            attributes.set_font_name(resolved);
        }

        if attributes.anchor() != TextAnchor::Start {
            let width = self.measure.measure(&text.value, &attributes);
            point = point.with_x(point.x() + attributes.anchor().offset(width));
        }

        LayerContent::Text(text.value.clone(), point, attributes)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use layertree_core::{
        color::Color,
        draw::{FillRule, TextAttributes},
        geometry::Size,
    };

    use super::*;
    use crate::{
        dom::{Document, Element, Href, Paint, ShapeElement, Style, Use},
        font::FontCatalog,
        index::DocumentIndex,
    };

    const PNG_HREF: &str = "data:image/png;base64,iVBORw0KGgo=";

    struct FixedMeasure;

    impl TextMeasure for FixedMeasure {
        fn measure(&self, text: &str, _attributes: &TextAttributes) -> f32 {
            text.chars().count() as f32 * 10.0
        }
    }

    fn square(id: &str) -> Element {
        Element::Shape(ShapeElement {
            id: Some(id.to_string()),
            transform: vec![Transform::scale(3.0, 3.0)],
            ..ShapeElement::new(Shape::Rect {
                origin: Point::default(),
                size: Size::new(1.0, 1.0),
                rx: 0.0,
                ry: 0.0,
            })
        })
    }

    fn use_of(href: &str, x: Option<f32>, y: Option<f32>) -> dom::Use {
        Use {
            href: Href::new(href),
            x,
            y,
            ..Use::default()
        }
    }

    fn with_builder<R>(
        document: &Document,
        f: impl FnOnce(&LayerBuilder<'_, DocumentIndex<'_>, FixedMeasure>) -> R,
    ) -> R {
        let index = DocumentIndex::new(document);
        let fonts = FontCatalog::default();
        f(&LayerBuilder::new(&index, &fonts, &FixedMeasure))
    }

    fn text(value: &str, style: Style) -> dom::Text {
        dom::Text {
            value: value.to_string(),
            x: Some(100.0),
            y: Some(40.0),
            style,
            ..dom::Text::default()
        }
    }

    #[test]
    fn test_shape_contents_use_state_paint() {
        let state = State::default().inheriting(&Style {
            stroke: Some(Paint::Color(Color::new("blue").unwrap())),
            stroke_width: Some(2.0),
            fill_rule: Some(FillRule::EvenOdd),
            ..Style::default()
        });
        let shape = Shape::Line {
            from: Point::new(0.0, 0.0),
            to: Point::new(10.0, 10.0),
        };

        let LayerContent::Shape(built, stroke, fill) = make_shape_contents(&shape, &state) else {
            panic!("expected shape contents");
        };
        assert_eq!(built, shape);
        assert_eq!(stroke.color(), Some(Color::new("blue").unwrap()));
        assert_approx_eq!(f32, stroke.width(), 2.0);
        assert_eq!(fill.rule(), FillRule::EvenOdd);
    }

    #[test]
    fn test_use_without_offset_adds_no_transform() {
        let document = Document {
            elements: vec![square("sq")],
            ..Document::default()
        };

        for (x, y) in [(None, None), (Some(0.0), Some(0.0)), (Some(0.0), None)] {
            let contents = with_builder(&document, |builder| {
                builder
                    .make_use_layer_contents(&use_of("#sq", x, y), &State::default())
                    .unwrap()
            });
            let LayerContent::Layer(layer) = contents else {
                panic!("expected a nested layer");
            };
            assert_eq!(layer.transform(), &[Transform::scale(3.0, 3.0)]);
        }
    }

    #[test]
    fn test_use_offset_prepends_translate() {
        let document = Document {
            elements: vec![square("sq")],
            ..Document::default()
        };

        let contents = with_builder(&document, |builder| {
            builder
                .make_use_layer_contents(&use_of("#sq", Some(10.0), None), &State::default())
                .unwrap()
        });

        let LayerContent::Layer(layer) = contents else {
            panic!("expected a nested layer");
        };
        assert_eq!(
            layer.transform(),
            &[Transform::translate(10.0, 0.0), Transform::scale(3.0, 3.0)]
        );
        assert!(matches!(layer.contents(), [LayerContent::Shape(..)]));
    }

    #[test]
    fn test_use_unresolved_reference() {
        let document = Document {
            elements: vec![square("present")],
            ..Document::default()
        };

        for href in ["#absent-element", "present", "#", ""] {
            let result = with_builder(&document, |builder| {
                builder.make_use_layer_contents(&use_of(href, None, None), &State::default())
            });
            let Err(BuildError::UnresolvedReference { href: reported }) = result else {
                panic!("expected an unresolved reference for `{href}`");
            };
            assert_eq!(reported, href);
        }
    }

    #[test]
    fn test_text_contents_plain() {
        let document = Document::default();
        let contents = with_builder(&document, |builder| {
            builder.make_text_contents(
                &text(
                    "Hello World",
                    Style {
                        font_family: Some("Helvetica".to_string()),
                        ..Style::default()
                    },
                ),
                &State::default(),
            )
        });

        let LayerContent::Text(value, point, attributes) = contents else {
            panic!("expected text contents");
        };
        assert_eq!(value, "Hello World");
        assert_eq!(point, Point::new(100.0, 40.0));
        assert_eq!(attributes.font_name(), "Helvetica");
        assert_approx_eq!(f32, attributes.size(), 12.0);
    }

    #[test]
    fn test_text_contents_substitutes_inherited_font() {
        let document = Document::default();
        let contents = with_builder(&document, |builder| {
            builder.make_text_contents(&text("任意非零倍数", Style::default()), &State::default())
        });

        let LayerContent::Text(_, _, attributes) = contents else {
            panic!("expected text contents");
        };
        assert_eq!(attributes.font_name(), "PingFang SC");
    }

    #[test]
    fn test_text_contents_anchor_offset_uses_resolved_attributes() {
        let document = Document::default();
        let state = State::new("Times", 16.0);

        let middle = with_builder(&document, |builder| {
            builder.make_text_contents(
                &text(
                    "数学公式",
                    Style {
                        text_anchor: Some(TextAnchor::Middle),
                        ..Style::default()
                    },
                ),
                &state,
            )
        });
        let LayerContent::Text(_, point, attributes) = middle else {
            panic!("expected text contents");
        };
        assert_approx_eq!(f32, point.x(), 80.0);
        assert_eq!(attributes.anchor(), TextAnchor::Middle);
        assert_eq!(attributes.font_name(), "PingFang SC");

        let end = with_builder(&document, |builder| {
            builder.make_text_contents(
                &text(
                    "abc",
                    Style {
                        text_anchor: Some(TextAnchor::End),
                        ..Style::default()
                    },
                ),
                &state,
            )
        });
        let LayerContent::Text(_, point, _) = end else {
            panic!("expected text contents");
        };
        assert_approx_eq!(f32, point.x(), 70.0);
    }

    #[test]
    fn test_image_contents_placement() {
        let image = dom::Image {
            href: PNG_HREF.to_string(),
            x: Some(4.0),
            width: Some(32.0),
            ..dom::Image::default()
        };

        let LayerContent::Image(built) = make_image_contents(&image).unwrap() else {
            panic!("expected image contents");
        };
        assert_eq!(built.format(), ImageFormat::Png);
        assert_eq!(built.origin(), Point::new(4.0, 0.0));
        assert_eq!(built.width(), Some(32.0));
        assert_eq!(built.height(), None);
        assert!(!built.data().is_empty());
    }

    #[test]
    fn test_image_contents_undecodable() {
        for href in [
            "",
            "data:image/png;base64,",
            "data:image/png;base64,@@@@",
            "data:image/svg+xml;base64,PHN2Zy8+",
            "image.png",
        ] {
            let image = dom::Image {
                href: href.to_string(),
                ..dom::Image::default()
            };
            assert!(
                matches!(
                    make_image_contents(&image),
                    Err(BuildError::UndecodableImage { .. })
                ),
                "expected `{href}` to be undecodable"
            );
        }
    }
}
