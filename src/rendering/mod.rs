//! HTML assembly.
//!
//! Turns the ordered source files into the two HTML documents the engine
//! consumes: the optional cover, and the body (table of contents followed by
//! every document, with explicit page breaks between them).
//!
//! The table of contents is produced in two phases. Every document is
//! converted first, each conversion handing back its own headings; only when
//! the whole book has been walked is the outline rendered and substituted for
//! the placeholder that was emitted ahead of the content.

mod cover;
mod markdown;
mod toc;

pub use cover::build_cover;
pub use toc::TocEntry;

use crate::diagnostics::Diagnostics;
use crate::references::resolve_references;
use crate::source::SourceFile;
use anyhow::{Context, Result};
use indicatif::ProgressBar;

/// Forces the engine onto a new page
pub const PAGE_BREAK: &str = "<div style=\"page-break-after: always;\"></div>\n";

/// Stands in for the table of contents until every heading is known
const TOC_PLACEHOLDER: &str = "<!-- md-binder:toc -->";

#[derive(Debug, Clone)]
pub struct AssemblyOptions {
    pub toc: bool,
    /// Heading shown above the table of contents
    pub toc_title: String,
    /// Stylesheet contents, embedded verbatim
    pub stylesheet: Option<String>,
}

/// The body document and what went into it
#[derive(Debug)]
pub struct AssembledBody {
    pub markup: String,
    /// Every level 1 and 2 heading across the book, in order
    pub toc: Vec<TocEntry>,
    pub page_breaks: usize,
}

/// The cover (if any) and the body, ready for the engine
#[derive(Debug)]
pub struct AssembledDocument {
    pub cover: Option<String>,
    pub body: AssembledBody,
}

/// Wrap `body` in a complete HTML document
pub fn document(stylesheet: Option<&str>, body: &str) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    if let Some(css) = stylesheet {
        html.push_str("<style>\n");
        html.push_str(css);
        html.push_str("\n</style>\n");
    }
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    html.push_str("\n</body>\n</html>\n");
    html
}

/// Convert and concatenate `sources` in order.
///
/// `sources` is never empty here; discovery refuses an empty input directory.
pub fn assemble(
    sources: &[SourceFile],
    options: &AssemblyOptions,
    diagnostics: &mut dyn Diagnostics,
    progress: &ProgressBar,
) -> Result<AssembledBody> {
    let mut body = String::new();
    let mut page_breaks = 0;

    if options.toc {
        body.push_str(&format!(
            "<h1 class=\"toc-title\">{}</h1>\n<div class=\"toc\">{TOC_PLACEHOLDER}</div>\n",
            html_escape::encode_text(&options.toc_title)
        ));
        body.push_str(PAGE_BREAK);
        page_breaks += 1;
    }

    // phase one: convert everything, collecting headings as we go
    let mut outline: Vec<TocEntry> = Vec::default();
    for (i, source) in sources.iter().enumerate() {
        progress.set_message(format!("Converting {}", source.path().display()));

        let text = source
            .read()
            .with_context(|| format!("Failed to read {}", source.path().display()))?;
        let text = resolve_references(&text, source.directory(), diagnostics);
        let converted = markdown::convert(&text, i + 1)
            .with_context(|| format!("Failed to convert {}", source.path().display()))?;

        body.push_str(&converted.html);
        body.push('\n');
        if i + 1 < sources.len() {
            body.push_str(PAGE_BREAK);
            page_breaks += 1;
        }

        outline.extend(converted.headings);
        progress.inc(1);
    }

    // phase two: the outline is complete, drop it into place
    if options.toc {
        body = body.replacen(TOC_PLACEHOLDER, &toc::render(&outline), 1);
    }

    Ok(AssembledBody {
        markup: document(options.stylesheet.as_deref(), &body),
        toc: outline,
        page_breaks,
    })
}
