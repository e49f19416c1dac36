//! The build, start to finish: discover the notes, assemble the body and the
//! cover, then hand both to the rendering engine.

use crate::config::Configuration;
use crate::diagnostics::{Diagnostic, Diagnostics, ResourceKind};
use crate::metadata::Metadata;
use crate::rendering::{self, AssembledDocument, AssemblyOptions};
use crate::sinks::{self, RenderEngine, RenderOptions, RenderTarget};
use crate::source;
use anyhow::Result;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

/// Summary of a finished build
#[derive(Debug)]
pub struct BuildReport {
    pub sources: usize,
    pub toc_entries: usize,
    pub page_breaks: usize,
    pub cover: bool,
    pub output: PathBuf,
    /// Intermediate HTML left behind on request
    pub intermediate: Vec<PathBuf>,
}

pub fn build(
    config: &Configuration,
    engine: &dyn RenderEngine,
    diagnostics: &mut dyn Diagnostics,
    progress: &ProgressBar,
) -> Result<BuildReport> {
    let paths = &config.paths;

    progress.set_message("Discovering notes...");
    let sources = source::discover(&paths.input_directory, &paths.pattern)?;
    log::info!(
        "{} Markdown file(s) found in {}",
        sources.len(),
        paths.input_directory.display()
    );
    progress.set_length(sources.len() as u64);

    let stylesheet = load_stylesheet(&paths.stylesheet, diagnostics);
    let metadata = if config.document.cover {
        load_metadata(&paths.metadata, diagnostics)?
    } else {
        None
    };

    let body = rendering::assemble(
        &sources,
        &AssemblyOptions {
            toc: config.document.toc,
            toc_title: config.document.toc_title.clone(),
            stylesheet: stylesheet.clone(),
        },
        diagnostics,
        progress,
    )?;
    let cover = rendering::build_cover(
        metadata.as_ref(),
        &paths.logo_directory,
        stylesheet.as_deref(),
    );

    let options = RenderOptions::new(
        config.page.clone(),
        config.footer.clone(),
        cover.is_some(),
        config.document.numbering,
    );
    let document = AssembledDocument { cover, body };

    progress.set_message(format!("Rendering PDF with {}...", engine.name()));
    let report = sinks::render_document(
        &document,
        &options,
        engine,
        RenderTarget {
            scratch_directory: &paths.scratch_directory,
            output: &paths.output,
            keep_intermediate: config.document.keep_intermediate,
        },
        diagnostics,
    )?;

    Ok(BuildReport {
        sources: sources.len(),
        toc_entries: document.body.toc.len(),
        page_breaks: document.body.page_breaks,
        cover: document.cover.is_some(),
        output: report.output,
        intermediate: report.intermediate,
    })
}

/// Read the stylesheet, if there is one. Styling is optional, so problems
/// are only warned about.
fn load_stylesheet(path: &Path, diagnostics: &mut dyn Diagnostics) -> Option<String> {
    if !path.is_file() {
        diagnostics.warn(Diagnostic::MissingResource {
            kind: ResourceKind::Stylesheet,
            reference: path.display().to_string(),
            resolved: std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
        });
        return None;
    }
    match std::fs::read_to_string(path) {
        Ok(css) => Some(css),
        Err(e) => {
            diagnostics.warn(Diagnostic::UnreadableResource {
                kind: ResourceKind::Stylesheet,
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            None
        }
    }
}

/// Load the cover metadata. A missing file disables the cover.
fn load_metadata(path: &Path, diagnostics: &mut dyn Diagnostics) -> Result<Option<Metadata>> {
    let metadata = Metadata::load(path)?;
    if metadata.is_none() {
        diagnostics.warn(Diagnostic::MissingResource {
            kind: ResourceKind::Metadata,
            reference: path.display().to_string(),
            resolved: std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
        });
    }
    Ok(metadata)
}
