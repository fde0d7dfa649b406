//! CLI logic for the Skyline diagram renderer.
//!
//! This module contains the core CLI logic for rendering the TechModa
//! architecture topologies to PNG files.

pub mod error_adapter;
pub mod topology;

mod args;
mod config;

pub use args::Args;
pub use topology::Topology;

use std::path::Path;

use log::info;

use skyline::{DiagramError, RenderOptions};

/// Run the Skyline CLI application
///
/// Declares the selected topology (or all five when none is selected) and
/// renders each one to a PNG in the output directory.
///
/// # Errors
///
/// Returns `DiagramError` for:
/// - Configuration loading errors
/// - An unwritable output directory
/// - Declaration errors
/// - Layout engine or file I/O errors during rendering
pub fn run(args: &Args) -> Result<(), DiagramError> {
    let app_config = config::load_config(args.config.as_ref())?;

    let output_dir = Path::new(&args.output_dir);
    let topologies: Vec<Topology> = match args.topology {
        Some(topology) => vec![topology],
        None => Topology::ALL.to_vec(),
    };

    for topology in topologies {
        info!(topology:?, output_dir = args.output_dir; "Rendering topology");

        let options = RenderOptions::new(output_dir.join(topology.file_stem()))
            .with_font_size(app_config.render().font_size())
            .with_pad(app_config.render().pad())
            .with_direction(topology.direction());

        let mut diagram = topology::declare(topology, options)?;
        let output = diagram.finalize()?;

        info!(output = output.display().to_string(); "PNG exported successfully");
    }

    Ok(())
}
