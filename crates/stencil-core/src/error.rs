//! Materialization error taxonomy
//!
//! A missing source directory is not an error at all: the materializer
//! logs a warning and treats the subtree as empty. Everything below
//! aborts the current call and bubbles to the caller, which owns any
//! partial-output cleanup policy.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaterializeError {
    /// The templating step failed (malformed template syntax, undefined
    /// binding access). The destination file is never written, so
    /// already-materialized siblings stay intact.
    #[error("failed to render template {path}")]
    Render {
        path: PathBuf,
        #[source]
        source: handlebars::RenderError,
    },

    /// An I/O failure on read/write/mkdir/copy.
    #[error("{op} failed for {path}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MaterializeError {
    pub(crate) fn io(op: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn render(path: &Path, source: handlebars::RenderError) -> Self {
        Self::Render {
            path: path.to_path_buf(),
            source,
        }
    }
}
