//! Markdown to HTML conversion.
//!
//! Conversion is done per document with a fresh arena, and the headings used
//! for the table of contents come back as part of the result rather than
//! accumulating on a shared converter. Anchors are prefixed with the
//! document's position in the book so they stay unique across documents
//! without any state crossing document boundaries.

use super::toc::TocEntry;
use anyhow::{Context, Result};
use comrak::arena_tree::Node;
use comrak::nodes::{Ast, AstNode, LineColumn, NodeValue};
use comrak::{format_html, parse_document, Arena, Options};
use std::cell::RefCell;
use std::collections::HashSet;

/// Deepest heading level that makes it into the table of contents
pub const TOC_DEPTH: u8 = 2;

/// One converted document
#[derive(Debug)]
pub struct Converted {
    pub html: String,
    /// Level 1 and 2 headings, in document order
    pub headings: Vec<TocEntry>,
}

/// Convert one document. `number` is the document's 1-based position in the
/// book and namespaces its anchors.
pub fn convert(markdown: &str, number: usize) -> Result<Converted> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.footnotes = true;
    options.extension.description_lists = true;
    // anchors and any raw HTML in the notes have to survive
    options.render.unsafe_ = true;

    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &options);

    let targets: Vec<(&AstNode, u8)> = root
        .descendants()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::Heading(heading) if heading.level <= TOC_DEPTH => {
                Some((node, heading.level))
            }
            _ => None,
        })
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut headings = Vec::with_capacity(targets.len());
    for (node, level) in targets {
        let text = heading_text(node);
        let anchor = unique_anchor(&mut seen, format!("{number:02}-{}", slugify(&text)));

        let marker = arena.alloc(Node::new(RefCell::new(Ast::new(
            NodeValue::HtmlInline(format!(r#"<a id="{anchor}"></a>"#)),
            LineColumn { line: 0, column: 0 },
        ))));
        node.prepend(marker);

        headings.push(TocEntry {
            level,
            text,
            anchor,
        });
    }

    let mut html = Vec::new();
    format_html(root, &options, &mut html).with_context(|| "Failed to format HTML")?;
    let html = String::from_utf8(html).with_context(|| "Converted HTML isn't valid UTF-8")?;

    Ok(Converted { html, headings })
}

/// The plain text of a heading, with inline markup stripped
fn heading_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.descendants() {
        match &child.data.borrow().value {
            NodeValue::Text(t) => text.push_str(t),
            NodeValue::Code(code) => text.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_string()
}

/// Lower-case, keep alphanumerics, collapse everything else into single dashes
fn slugify(text: &str) -> String {
    let mut out = String::new();
    let mut last_dash = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            out.push(c);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "section".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `base`, or `base-N` with the smallest N not already handed out
fn unique_anchor(seen: &mut HashSet<String>, base: String) -> String {
    let mut candidate = base.clone();
    let mut suffix = 1;
    while seen.contains(&candidate) {
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }
    seen.insert(candidate.clone());
    candidate
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn collects_top_two_levels() {
        let converted = convert(
            "# Intro\n\nText.\n\n## Background\n\n### Detail\n\n# Second `part`\n",
            1,
        )
        .expect("can convert");
        let summary: Vec<(u8, &str, &str)> = converted
            .headings
            .iter()
            .map(|h| (h.level, h.text.as_str(), h.anchor.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1, "Intro", "01-intro"),
                (2, "Background", "01-background"),
                (1, "Second part", "01-second-part"),
            ]
        );
    }

    #[test]
    fn anchors_are_emitted_in_headings() {
        let converted = convert("# Intro\n", 3).expect("can convert");
        assert!(converted.html.contains(r#"<h1><a id="03-intro"></a>Intro</h1>"#));
    }

    #[test]
    fn duplicate_headings_get_distinct_anchors() {
        let converted = convert("## Summary\n\n## Summary\n", 2).expect("can convert");
        let anchors: Vec<&str> = converted.headings.iter().map(|h| h.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["02-summary", "02-summary-1"]);
    }

    #[test]
    fn numbered_heading_does_not_collide_with_generated_suffix() {
        let converted =
            convert("## Summary\n\n## Summary\n\n## Summary 1\n", 1).expect("can convert");
        let anchors: Vec<&str> = converted.headings.iter().map(|h| h.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["01-summary", "01-summary-1", "01-summary-1-1"]);
        for anchor in anchors {
            assert_eq!(
                converted.html.matches(&format!(r#"id="{anchor}""#)).count(),
                1
            );
        }
    }

    #[test]
    fn renders_tables() {
        let converted =
            convert("| a | b |\n|---|---|\n| 1 | 2 |\n", 1).expect("can convert");
        assert!(converted.html.contains("<table>"));
        assert!(converted.headings.is_empty());
    }

    #[test]
    fn keeps_rewritten_image_locators() {
        let converted =
            convert("![caption](file:///docs/img/a.png)\n", 1).expect("can convert");
        assert!(converted
            .html
            .contains(r#"<img src="file:///docs/img/a.png" alt="caption" />"#));
    }

    #[test]
    fn slugs_handle_punctuation() {
        assert_eq!(slugify("What's new?  (v2)"), "what-s-new-v2");
        assert_eq!(slugify("¡Hola, señor!"), "hola-señor");
        assert_eq!(slugify("***"), "section");
    }
}
