//! Fatal build errors.
//!
//! Everything in here aborts the build. Problems the pipeline can survive
//! (a missing stylesheet, a broken image reference, a scratch file that won't
//! delete) are reported through [`crate::diagnostics`] instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    /// The configured input directory is missing or isn't a directory
    #[error("input directory `{}` does not exist or is not a directory", .directory.display())]
    Configuration { directory: PathBuf },

    /// The file-matching pattern couldn't be compiled
    #[error("invalid file pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The input directory contains nothing matching the pattern
    #[error("no files matching `{pattern}` found in `{}`", .directory.display())]
    EmptyInput { directory: PathBuf, pattern: String },

    /// The external rendering engine could not produce the document
    #[error("rendering engine failed while rendering {stage} ({}): {reason}", .inputs.join(", "))]
    RenderEngine {
        stage: String,
        inputs: Vec<String>,
        reason: String,
    },
}
