//! CLI logic for the Kindred family tree tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::fs;

use log::info;

use kindred::{FamilyTreeBuilder, KindredError};

/// Run the Kindred CLI application
///
/// Reads the member document, lays it out and writes the result in the
/// requested format to the output file.
///
/// # Errors
///
/// Returns `KindredError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Member document decoding errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), KindredError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        format:? = args.format;
        "Processing family tree"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = FamilyTreeBuilder::new(app_config);
    let members = builder.parse(&source)?;
    let output = match args.format {
        OutputFormat::Svg => builder.render_svg(&members)?,
        OutputFormat::Layout => builder.render_layout_json(&members)?,
        OutputFormat::Members => builder.export_members(&members)?,
    };

    fs::write(&args.output, output)?;

    info!(output_file = args.output; "Output written successfully");

    Ok(())
}
