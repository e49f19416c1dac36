use super::{RenderEngine, RenderJob, RenderOptions};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::BuildError;
use crate::references::file_locator;
use crate::rendering::AssembledDocument;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const COVER_FILE: &str = "cover.html";
const BODY_FILE: &str = "body.html";

/// Where the output goes and what happens to the scratch files
#[derive(Debug, Clone, Copy)]
pub struct RenderTarget<'a> {
    /// Directory the intermediate HTML is written to
    pub scratch_directory: &'a Path,
    /// The PDF to produce; overwritten if it exists
    pub output: &'a Path,
    /// Leave the intermediate HTML in place afterwards
    pub keep_intermediate: bool,
}

/// What a successful render produced
#[derive(Debug)]
pub struct RenderReport {
    pub output: PathBuf,
    /// Intermediate files that were kept on request
    pub intermediate: Vec<PathBuf>,
}

/// Render `document` to `target.output` through `engine`.
///
/// The engine writes into a temporary file next to the output, which only
/// replaces the output once the engine has succeeded. Scratch files are
/// removed afterwards whether or not rendering worked, unless they were
/// asked to be kept.
pub fn render_document(
    document: &AssembledDocument,
    options: &RenderOptions,
    engine: &dyn RenderEngine,
    target: RenderTarget<'_>,
    diagnostics: &mut dyn Diagnostics,
) -> Result<RenderReport> {
    let mut scratch: Vec<PathBuf> = Vec::default();
    let result = render_with_scratch(document, options, engine, target, &mut scratch);

    if target.keep_intermediate {
        for path in scratch.iter() {
            log::info!("kept intermediate file {}", path.display());
        }
    } else {
        for path in scratch.drain(..) {
            if let Err(e) = std::fs::remove_file(&path) {
                diagnostics.warn(Diagnostic::Cleanup {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    result?;
    Ok(RenderReport {
        output: target.output.to_path_buf(),
        intermediate: scratch,
    })
}

fn render_with_scratch(
    document: &AssembledDocument,
    options: &RenderOptions,
    engine: &dyn RenderEngine,
    target: RenderTarget<'_>,
    scratch: &mut Vec<PathBuf>,
) -> Result<()> {
    let directory = target.scratch_directory;
    std::fs::create_dir_all(directory).with_context(|| {
        format!(
            "Failed to create intermediate directory {}",
            directory.display()
        )
    })?;
    let directory = std::path::absolute(directory)
        .with_context(|| format!("Failed to resolve {}", directory.display()))?;

    let cover = match document.cover.as_deref().filter(|_| options.cover()) {
        Some(cover) => Some(write_scratch(&directory.join(COVER_FILE), cover, scratch)?),
        None => None,
    };
    let body = write_scratch(&directory.join(BODY_FILE), &document.body.markup, scratch)?;

    let output = target.output;
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent)
        .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    let pending = tempfile::Builder::new()
        .prefix(".md-binder-")
        .suffix(".pdf")
        .tempfile_in(&parent)
        .with_context(|| format!("Failed to create a temporary file in {}", parent.display()))?
        .into_temp_path();

    let job = RenderJob {
        cover: cover.as_deref(),
        body: &body,
        output: &pending,
        options,
    };
    log::info!("rendering {} with {}", output.display(), engine.name());
    if let Err(failure) = engine.render(&job) {
        let stage = if cover.is_some() { "cover and body" } else { "body" };
        let mut inputs: Vec<String> = cover.iter().cloned().collect();
        inputs.push(body.clone());
        return Err(BuildError::RenderEngine {
            stage: stage.to_string(),
            inputs,
            reason: failure.to_string(),
        }
        .into());
    }

    pending
        .persist(output)
        .with_context(|| format!("Failed to move the rendered PDF to {}", output.display()))?;
    Ok(())
}

/// Write one scratch document and return its locator
fn write_scratch(path: &Path, contents: &str, scratch: &mut Vec<PathBuf>) -> Result<String> {
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write intermediate file {}", path.display()))?;
    scratch.push(path.to_path_buf());
    Ok(file_locator(path))
}
