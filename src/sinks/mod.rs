//! PDF output.
//!
//! Layout is delegated to an external HTML-to-PDF engine behind the
//! [`RenderEngine`] trait. The driver in [`render_document`] owns everything
//! around the engine: writing the scratch HTML it reads, building the
//! options, protecting the declared output from partial writes, and cleaning
//! up afterwards.

mod driver;
mod options;
mod wkhtmltopdf;

pub use driver::*;
pub use options::*;
pub use wkhtmltopdf::Wkhtmltopdf;

use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// A single engine invocation
#[derive(Debug, Clone, Copy)]
pub struct RenderJob<'a> {
    /// Locator of the cover document, if there is one
    pub cover: Option<&'a str>,
    /// Locator of the body document
    pub body: &'a str,
    /// Where the engine should write the PDF
    pub output: &'a Path,
    pub options: &'a RenderOptions,
}

/// Why an engine invocation failed
#[derive(Debug, Error)]
pub enum EngineFailure {
    #[error("engine executable not found: {0}")]
    NotFound(String),

    #[error("failed to start engine: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("engine exited with {status}{}", stderr_tail(.stderr))]
    Exit { status: String, stderr: String },

    #[error("engine did not finish within {} seconds and was stopped", .0.as_secs())]
    Timeout(Duration),
}

fn stderr_tail(stderr: &str) -> String {
    const LINES: usize = 10;
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.is_empty() {
        return String::new();
    }
    let start = lines.len().saturating_sub(LINES);
    format!(":\n{}", lines[start..].join("\n"))
}

/// Something that can turn HTML into a paginated document
pub trait RenderEngine {
    fn name(&self) -> &str;
    fn render(&self, job: &RenderJob<'_>) -> Result<(), EngineFailure>;
}
