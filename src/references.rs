//! Image reference rewriting.
//!
//! The rendering engine reads the assembled HTML from the scratch directory,
//! not from where each Markdown file lives, so relative image paths have to be
//! turned into absolute `file:///` locators before conversion. Each file's
//! references are resolved against that file's own directory.

use crate::diagnostics::{Diagnostic, Diagnostics, ResourceKind};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use regex::{Captures, Regex};
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

/// Matches `![alt](target)` and `![alt](<target>)`, each with an optional
/// `"title"`, `'title'` or `(title)`
static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"!\[(?P<alt>[^\]]*)\]\("#,
        r#"(?:<(?P<angle>[^<>\n]*)>|(?P<target>[^)\s<][^)\s]*))"#,
        r#"(?P<title>\s+(?:"[^"]*"|'[^']*'|\([^)]*\)))?"#,
        r#"\)"#
    ))
    .expect("image pattern is valid")
});

/// Characters that can't appear verbatim in a locator inside a Markdown link
const LOCATOR: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'(')
    .add(b')')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Rewrite every local image reference in `text` relative to `base`.
///
/// Remote references, references carrying any URL scheme and absolute paths
/// are left alone, which also makes the rewrite idempotent. A reference whose
/// target doesn't exist is still rewritten, and reported.
pub fn resolve_references(text: &str, base: &Path, diagnostics: &mut dyn Diagnostics) -> String {
    IMAGE_RE
        .replace_all(text, |caps: &Captures| {
            let target = caps
                .name("angle")
                .or_else(|| caps.name("target"))
                .map(|m| m.as_str())
                .unwrap_or_default();
            if target.is_empty() || !is_local_relative(target) {
                return caps[0].to_string();
            }

            let decoded = percent_decode_str(target).decode_utf8_lossy();
            let resolved = normalize(&base.join(decoded.as_ref()));
            if !resolved.exists() {
                diagnostics.warn(Diagnostic::MissingResource {
                    kind: ResourceKind::Image,
                    reference: target.to_string(),
                    resolved: resolved.clone(),
                });
            }

            let title = caps.name("title").map(|m| m.as_str()).unwrap_or_default();
            format!("![{}]({}{})", &caps["alt"], file_locator(&resolved), title)
        })
        .into_owned()
}

/// Convert an absolute path into a `file:///` locator the engine can load
pub fn file_locator(path: &Path) -> String {
    let path = path.to_string_lossy().replace('\\', "/");
    let encoded = utf8_percent_encode(&path, LOCATOR).to_string();
    if encoded.starts_with('/') {
        format!("file://{encoded}")
    } else {
        format!("file:///{encoded}")
    }
}

/// Whether `target` should be resolved against the document's directory
fn is_local_relative(target: &str) -> bool {
    if has_scheme(target) {
        return false;
    }
    let path = Path::new(target);
    !(path.is_absolute() || path.has_root())
}

/// `http:`, `https:`, `file:`, `data:` and friends. Single letters are left
/// out so Windows drive letters aren't mistaken for schemes.
fn has_scheme(target: &str) -> bool {
    let Some((scheme, _)) = target.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    scheme.len() >= 2
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Lexically resolve `.` and `..` without touching the filesystem; the
/// target may not exist.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
