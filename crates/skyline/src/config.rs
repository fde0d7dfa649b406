//! Configuration types for diagram rendering.
//!
//! [`RenderOptions`] carries the per-diagram settings that the declarative
//! API does not cover: output path, layout direction, and the graph-level
//! font and padding factors handed to the layout engine.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Layout direction for the rank hierarchy.
///
/// Maps directly onto Graphviz's `rankdir` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Ranks flow from the top of the image to the bottom (`rankdir=TB`).
    #[default]
    TopToBottom,
    /// Ranks flow from the left of the image to the right (`rankdir=LR`).
    LeftToRight,
}

impl Direction {
    /// Returns the Graphviz `rankdir` value for this direction.
    pub(crate) fn rankdir(&self) -> &'static str {
        match self {
            Direction::TopToBottom => "TB",
            Direction::LeftToRight => "LR",
        }
    }
}

/// Render settings for a single diagram build.
///
/// The output path is given without an extension; `finalize` appends `.png`.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    font_size: f32,
    pad: f32,
    output_path: PathBuf,
    direction: Direction,
}

impl RenderOptions {
    /// Creates render options for the given output path (sans extension) with
    /// default font size, padding, and a top-to-bottom layout.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            font_size: 24.0,
            pad: 1.5,
            output_path: output_path.into(),
            direction: Direction::default(),
        }
    }

    /// Sets the title font size passed to the layout engine.
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the padding factor around the drawing, in inches.
    pub fn with_pad(mut self, pad: f32) -> Self {
        self.pad = pad;
        self
    }

    /// Sets the layout direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Returns the title font size.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the padding factor.
    pub fn pad(&self) -> f32 {
        self.pad
    }

    /// Returns the output path, without extension.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Returns the layout direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}
