//! Error adapter for converting DiagramError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use skyline::DiagramError;

/// Adapter wrapping a [`DiagramError`] for rendering with miette.
pub struct ErrorAdapter<'a>(pub &'a DiagramError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            DiagramError::Io(_) => "skyline::io",
            DiagramError::Configuration(_) => "skyline::config",
            DiagramError::UnknownCategory(_) => "skyline::taxonomy",
            DiagramError::UnbalancedGroup(_) => "skyline::group",
            DiagramError::DiagramClosed => "skyline::closed",
            DiagramError::Render(_) => "skyline::render",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            DiagramError::Render(_) => Some(Box::new(
                "is the Graphviz `dot` binary installed and on your PATH?",
            )),
            DiagramError::Configuration(_) => {
                Some(Box::new("does the output directory exist?"))
            }
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
