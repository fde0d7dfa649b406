//! Command-line argument definitions for the Skyline CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select which topology to render and control the
//! output directory, configuration file, and logging verbosity.

use clap::Parser;

use crate::topology::Topology;

/// Command-line arguments for the Skyline diagram renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Topology to render; all five are rendered when omitted
    #[arg(value_enum)]
    pub topology: Option<Topology>,

    /// Directory the PNG files are written to
    #[arg(short, long, default_value = "docs/assets/images")]
    pub output_dir: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
