//! Writing drawn graphs to files.
//!
//! The [`Exporter`] trait is the last step of the pipeline: it takes a
//! laid-out [`Graph`] and writes it in some output format. [`svg::Svg`] is
//! the only backend.
//!
//! Export operations return [`Error`], which converts into
//! [`TrellisError::Export`](crate::TrellisError::Export) at the crate
//! boundary.

pub mod svg;

use crate::graph::Graph;

/// Abstraction for export backends.
pub trait Exporter {
    /// Draws `graph` and writes the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the graph cannot be drawn, or
    /// [`Error::Io`] if writing the output fails.
    fn export_graph<N, E>(&mut self, graph: &Graph<N, E>) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    Render(String),
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
