//! Table of contents rendering.
//!
//! The outline is a flat list of level-1 and level-2 headings; nesting is
//! implied by the level alone. Level-2 entries nest under the level-1 entry
//! before them, and any level-2 entries before the first level-1 entry sit at
//! the top level.

/// One heading in the outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// 1 or 2
    pub level: u8,
    pub text: String,
    /// The `id` the heading's anchor carries in the body
    pub anchor: String,
}

/// Render the outline as a nested link list
pub fn render(entries: &[TocEntry]) -> String {
    let mut html = String::from("<ul>\n");
    // whether a top-level <li> is still open, and whether it has a nested <ul>
    let mut open_item = false;
    let mut open_sublist = false;

    for entry in entries {
        let link = format!(
            r##"<a href="#{}">{}</a>"##,
            html_escape::encode_double_quoted_attribute(&entry.anchor),
            html_escape::encode_text(&entry.text)
        );

        if entry.level <= 1 || !open_item {
            if open_sublist {
                html.push_str("</ul>\n");
                open_sublist = false;
            }
            if open_item {
                html.push_str("</li>\n");
            }
            html.push_str("<li>");
            html.push_str(&link);
            // a stray level-2 entry doesn't get children of its own
            open_item = entry.level <= 1;
            if !open_item {
                html.push_str("</li>\n");
            }
        } else {
            if !open_sublist {
                html.push_str("\n<ul>\n");
                open_sublist = true;
            }
            html.push_str("<li>");
            html.push_str(&link);
            html.push_str("</li>\n");
        }
    }

    if open_sublist {
        html.push_str("</ul>\n");
    }
    if open_item {
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n");
    html
}

#[cfg(test)]
mod test {
    use super::*;

    fn entry(level: u8, text: &str, anchor: &str) -> TocEntry {
        TocEntry {
            level,
            text: text.to_string(),
            anchor: anchor.to_string(),
        }
    }

    #[test]
    fn nests_second_level_under_first() {
        let html = render(&[
            entry(1, "Intro", "01-intro"),
            entry(2, "Scope", "01-scope"),
            entry(2, "Terms", "01-terms"),
            entry(1, "Body", "02-body"),
        ]);
        assert_eq!(
            html,
            "<ul>\n\
             <li><a href=\"#01-intro\">Intro</a>\n\
             <ul>\n\
             <li><a href=\"#01-scope\">Scope</a></li>\n\
             <li><a href=\"#01-terms\">Terms</a></li>\n\
             </ul>\n\
             </li>\n\
             <li><a href=\"#02-body\">Body</a></li>\n\
             </ul>\n"
        );
    }

    #[test]
    fn leading_second_level_is_top_level() {
        let html = render(&[entry(2, "Preface", "01-preface"), entry(1, "One", "02-one")]);
        assert_eq!(
            html,
            "<ul>\n\
             <li><a href=\"#01-preface\">Preface</a></li>\n\
             <li><a href=\"#02-one\">One</a></li>\n\
             </ul>\n"
        );
    }

    #[test]
    fn escapes_heading_text() {
        let html = render(&[entry(1, "Fish & <Chips>", "01-fish-chips")]);
        assert!(html.contains("Fish &amp; &lt;Chips&gt;"));
    }

    #[test]
    fn empty_outline_is_empty_list() {
        assert_eq!(render(&[]), "<ul>\n</ul>\n");
    }
}
