//! PNG export through the external Graphviz layout engine.
//!
//! The engine is treated as an opaque collaborator: the DOT source goes in,
//! PNG bytes come out, and any failure is surfaced verbatim as
//! [`DiagramError::Render`]. The image is written to a temporary file next to
//! the destination and persisted only after a successful layout pass, so no
//! partial output file is ever left behind.

pub(crate) mod dot;

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use dot_structures::Graph;
use graphviz_rust::{cmd::Format, printer::PrinterContext};
use log::debug;

use crate::{config::RenderOptions, error::DiagramError};

/// Lays out `graph` with the `dot` engine and writes the PNG for `options`.
pub(crate) fn write_png(graph: Graph, options: &RenderOptions) -> Result<PathBuf, DiagramError> {
    let dot_source = graphviz_rust::print(graph, &mut PrinterContext::default());
    debug!(dot_bytes = dot_source.len(); "Serialized diagram to DOT");

    let png = graphviz_rust::exec_dot(dot_source, vec![Format::Png.into()])
        .map_err(|err| DiagramError::Render(err.to_string()))?;

    let output_path = options.output_path().with_extension("png");
    let directory = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(directory)?;
    temp_file.write_all(&png)?;
    temp_file
        .persist(&output_path)
        .map_err(|err| DiagramError::Io(err.error))?;

    Ok(output_path)
}
