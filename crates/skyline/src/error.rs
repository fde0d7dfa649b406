//! Error types for Skyline operations.
//!
//! This module provides the main error type [`DiagramError`] which wraps the
//! conditions that can occur while declaring or rendering a diagram. All of
//! them are unrecoverable at the point raised: the diagram either renders
//! fully or the build aborts.

use std::io;

use thiserror::Error;

/// The main error type for Skyline operations.
#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Bad render options, such as an output path whose directory is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A node category outside the supported taxonomy.
    #[error("Unknown node category: {0}")]
    UnknownCategory(String),

    /// Group open/close calls did not pair up in last-opened-first-closed order.
    #[error("Unbalanced group: {0}")]
    UnbalancedGroup(String),

    /// The diagram handle was already consumed by `finalize`.
    #[error("Diagram already finalized")]
    DiagramClosed,

    /// The external layout engine failed; the message is passed through verbatim.
    #[error("Render engine error: {0}")]
    Render(String),
}
