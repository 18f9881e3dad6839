//! CLI logic for the Layertree tool.
//!
//! Reads a TOML scene, builds its layer tree and writes the tree as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use layertree::{
    LayerTreeBuilder, LayerTreeError,
    builder::OnError,
    config::{AppConfig, BuildConfig},
};

/// Run the Layertree CLI application
///
/// This function processes the input scene through the layer tree pipeline
/// and writes the resulting SVG to the output file.
///
/// # Errors
///
/// Returns `LayerTreeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene parsing errors
/// - Element build errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), LayerTreeError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.skip_errors {
        app_config = AppConfig::new(
            app_config.fonts().clone(),
            app_config.style().clone(),
            BuildConfig::new(OnError::Skip),
        );
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = LayerTreeBuilder::new(app_config);
    let document = builder.parse(&source)?;
    let root = builder.build(&document)?;
    let svg = builder.render_svg(&document, &root)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
