//! Text runs through the whole pipeline: scene, layer tree and SVG.

use layertree::{
    LayerTreeBuilder,
    draw::{Layer, LayerContent, TextAttributes},
};

/// Builds a scene holding a single text element and returns its attributes.
fn build_text(font_family: Option<&str>, font_size: f32, value: &str) -> TextAttributes {
    let font_family = font_family
        .map(|family| format!(r#"font_family = "{family}", "#))
        .unwrap_or_default();
    let source = format!(
        r#"
        width = 300
        height = 80

        [[elements]]
        kind = "text"
        value = "{value}"
        x = 10
        y = 40
        style = {{ {font_family}font_size = {font_size}, fill = "black" }}
        "#
    );

    let builder = LayerTreeBuilder::default();
    let document = builder.parse(&source).expect("Failed to parse scene");
    let root = builder.build(&document).expect("Failed to build scene");

    find_text(&root).expect("Scene should contain a text run")
}

fn find_text(layer: &Layer) -> Option<TextAttributes> {
    layer.contents().iter().find_map(|content| match content {
        LayerContent::Text(_, _, attributes) => Some(attributes.clone()),
        LayerContent::Layer(layer) => find_text(layer),
        _ => None,
    })
}

#[test]
fn test_english_text_keeps_font() {
    let attributes = build_text(Some("Helvetica"), 16.0, "Hello World");
    assert_eq!(attributes.font_name(), "Helvetica");
}

#[test]
fn test_math_symbols_keep_font() {
    let attributes = build_text(Some("Times"), 16.0, "+-*/=()[]");
    assert_eq!(attributes.font_name(), "Times");
}

#[test]
fn test_chinese_text_in_times_falls_back_to_sans() {
    let attributes = build_text(Some("Times"), 18.0, "任意非零倍数");
    assert_eq!(attributes.font_name(), "PingFang SC");
}

#[test]
fn test_chinese_text_keeps_pingfang() {
    let attributes = build_text(Some("PingFang SC"), 18.0, "任意非零倍数");
    assert_eq!(attributes.font_name(), "PingFang SC");
}

#[test]
fn test_japanese_font_keeps_chinese_only_text() {
    let attributes = build_text(Some("Hiragino Sans"), 18.0, "数学公式");
    assert_eq!(attributes.font_name(), "Hiragino Sans");
}

#[test]
fn test_korean_text_keeps_apple_sd_gothic() {
    let attributes = build_text(Some("Apple SD Gothic Neo"), 18.0, "수학 공식");
    assert_eq!(attributes.font_name(), "Apple SD Gothic Neo");
}

#[test]
fn test_korean_text_ignores_serif_hint() {
    let attributes = build_text(Some("serif"), 18.0, "수학 공식");
    assert_eq!(attributes.font_name(), "Apple SD Gothic Neo");
}

#[test]
fn test_large_font_chinese() {
    let attributes = build_text(Some("Times"), 72.0, "数");
    assert_eq!(attributes.font_name(), "PingFang SC");
    assert_eq!(attributes.size(), 72.0);
}

#[test]
fn test_mixed_english_chinese() {
    let attributes = build_text(Some("Arial"), 16.0, "Hello 你好 123");
    assert_eq!(attributes.font_name(), "PingFang SC");
}

#[test]
fn test_serif_font_fallback() {
    let attributes = build_text(Some("serif"), 16.0, "任意非零倍数");
    assert_eq!(attributes.font_name(), "Songti SC");
}

#[test]
fn test_empty_font_fallback() {
    // No family on the element: the root state's "Times" is inherited.
    let attributes = build_text(None, 16.0, "任意非零倍数");
    assert_eq!(attributes.font_name(), "PingFang SC");
}

#[test]
fn test_transformed_text_renders() {
    let source = r#"
        width = 200
        height = 100

        [[elements]]
        kind = "group"
        transform = [{ type = "scale", sx = 1, sy = -1 }]

        [[elements.children]]
        kind = "text"
        value = "Test"
        x = 10
        y = -50
        transform = [{ type = "scale", sx = 1, sy = -1 }]
        style = { font_family = "Times", font_size = 16 }
    "#;

    let builder = LayerTreeBuilder::default();
    let document = builder.parse(source).unwrap();
    let root = builder.build(&document).unwrap();
    let svg = builder.render_svg(&document, &root).unwrap();

    assert_eq!(svg.matches(r#"transform="scale(1 -1)""#).count(), 2);
    assert!(svg.contains(r#"y="-50""#));
    assert!(svg.contains("Test"));
}
