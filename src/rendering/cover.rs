//! Cover page rendering.
//!
//! The cover is its own HTML document so the engine can place it ahead of the
//! body and keep it out of the page numbering. Only the metadata fields that
//! are present are rendered, always in the same order: logo, code, title,
//! institution, date.

use super::document;
use crate::metadata::Metadata;
use crate::references::file_locator;
use std::path::Path;

/// Render the cover page, or `None` when there is no metadata at all
pub fn build_cover(
    metadata: Option<&Metadata>,
    logo_directory: &Path,
    stylesheet: Option<&str>,
) -> Option<String> {
    let metadata = metadata?;
    let mut body = String::from("<div class=\"cover\">\n");

    if let Some(logo) = &metadata.logo {
        let path = logo_directory.join(logo);
        if path.is_file() {
            let path = std::path::absolute(&path).unwrap_or(path);
            body.push_str(&format!(
                "<img src=\"{}\" alt=\"Logo\" class=\"logo\">\n",
                html_escape::encode_double_quoted_attribute(&file_locator(&path))
            ));
        } else {
            log::debug!("cover logo {} not found, leaving it out", path.display());
        }
    }
    if let Some(code) = &metadata.code {
        body.push_str(&format!("<h3>{}:</h3>\n", html_escape::encode_text(code)));
    }
    if let Some(title) = &metadata.course_title {
        body.push_str(&format!("<h1>{}</h1>\n", html_escape::encode_text(title)));
    }
    if let Some(institution) = &metadata.institution {
        body.push_str(&format!(
            "<h3>{}</h3>\n",
            html_escape::encode_text(institution)
        ));
    }
    if let Some(date) = &metadata.date {
        body.push_str(&format!("<p>{}</p>\n", html_escape::encode_text(date)));
    }

    body.push_str("</div>\n");
    Some(document(stylesheet, &body))
}

#[cfg(test)]
mod test {
    use super::*;

    fn full_metadata() -> Metadata {
        Metadata {
            logo: Some("logo.png".to_string()),
            code: Some("CS-101".to_string()),
            course_title: Some("Operating Systems".to_string()),
            institution: Some("Some University".to_string()),
            date: Some("March 2024".to_string()),
        }
    }

    #[test]
    fn no_metadata_means_no_cover() {
        assert!(build_cover(None, Path::new("logo"), None).is_none());
    }

    #[test]
    fn renders_fields_in_order() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        std::fs::write(dir.path().join("logo.png"), b"png").unwrap();

        let cover = build_cover(Some(&full_metadata()), dir.path(), None).expect("has cover");
        let positions: Vec<usize> = [
            "class=\"logo\"",
            "<h3>CS-101:</h3>",
            "<h1>Operating Systems</h1>",
            "<h3>Some University</h3>",
            "<p>March 2024</p>",
        ]
        .iter()
        .map(|needle| cover.find(needle).expect("field is present"))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(cover.contains(&file_locator(&dir.path().join("logo.png"))));
    }

    #[test]
    fn missing_logo_is_skipped() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let cover = build_cover(Some(&full_metadata()), dir.path(), None).expect("has cover");
        assert!(!cover.contains("<img"));
        assert!(cover.contains("<h1>Operating Systems</h1>"));
    }

    #[test]
    fn absent_keys_are_skipped() {
        let metadata = Metadata {
            course_title: Some("Notes".to_string()),
            ..Metadata::default()
        };
        let cover = build_cover(Some(&metadata), Path::new("logo"), None).expect("has cover");
        assert!(cover.contains("<h1>Notes</h1>"));
        assert!(!cover.contains("<h3>"));
        assert!(!cover.contains("<p>"));
    }

    #[test]
    fn embeds_stylesheet_and_escapes() {
        let metadata = Metadata {
            institution: Some("A & B".to_string()),
            ..Metadata::default()
        };
        let cover = build_cover(Some(&metadata), Path::new("logo"), Some("h1 { color: red; }"))
            .expect("has cover");
        assert!(cover.contains("<style>\nh1 { color: red; }\n</style>"));
        assert!(cover.contains("<h3>A &amp; B</h3>"));
    }
}
