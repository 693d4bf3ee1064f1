use std::io;
use std::path::PathBuf;

use ptrmap_common::error::RangeError;
use thiserror::Error;

/// Failures that end a mapping run.
///
/// Lookup failures never show up here; an address that does not resolve is
/// simply left out of the graph.
#[derive(Debug, Error)]
pub enum MapError {
    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("Failed to set up resolver: {0}")]
    Resolver(#[source] io::Error),

    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(String),
}
