use serde::{Deserialize, Serialize};

/// Paper size and margins, in whatever units the engine accepts (`0.75in`,
/// `20mm`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// Named paper size, e.g. `Letter` or `A4`
    pub size: String,
    pub margin_top: String,
    pub margin_right: String,
    pub margin_bottom: String,
    pub margin_left: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        PageSettings {
            size: "Letter".to_string(),
            margin_top: "0.75in".to_string(),
            margin_right: "0.75in".to_string(),
            margin_bottom: "1in".to_string(),
            margin_left: "0.75in".to_string(),
        }
    }
}

/// The page-number footer. `[page]` and `[toPage]` are filled in by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterSettings {
    pub text: String,
    /// Font size in points
    pub font_size: u32,
    /// Gap between the footer and the content, in millimetres
    pub spacing: u32,
    /// Draw a rule above the footer
    pub line: bool,
}

impl Default for FooterSettings {
    fn default() -> Self {
        FooterSettings {
            text: "Page [page] of [toPage]".to_string(),
            font_size: 9,
            spacing: 5,
            line: true,
        }
    }
}

/// Everything the engine needs to know about the layout of the output.
///
/// The cover occupies a physical page but must not show up in the visible
/// numbering, so when both a cover and numbering are in play the page counter
/// is shifted back by one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub page: PageSettings,
    pub footer: FooterSettings,
    numbering: bool,
    cover: bool,
}

impl RenderOptions {
    pub fn new(page: PageSettings, footer: FooterSettings, cover: bool, numbering: bool) -> Self {
        RenderOptions {
            page,
            footer,
            numbering,
            cover,
        }
    }

    pub fn numbering(&self) -> bool {
        self.numbering
    }

    pub fn cover(&self) -> bool {
        self.cover
    }

    /// -1 exactly when a cover is present and pages are numbered
    pub fn numbering_offset(&self) -> i32 {
        if self.cover && self.numbering {
            -1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn options(cover: bool, numbering: bool) -> RenderOptions {
        RenderOptions::new(
            PageSettings::default(),
            FooterSettings::default(),
            cover,
            numbering,
        )
    }

    #[test]
    fn offset_only_with_cover_and_numbering() {
        assert_eq!(options(true, true).numbering_offset(), -1);
        assert_eq!(options(true, false).numbering_offset(), 0);
        assert_eq!(options(false, true).numbering_offset(), 0);
        assert_eq!(options(false, false).numbering_offset(), 0);
    }

    #[test]
    fn can_serialize_page_settings() {
        let page = PageSettings::default();
        let toml_str = toml::to_string(&page).expect("can serialize");
        let deserialized: PageSettings = toml::from_str(&toml_str).expect("can deserialize");
        assert_eq!(page, deserialized);
    }

    #[test]
    fn partial_footer_settings_fill_defaults() {
        let footer: FooterSettings = toml::from_str("line = false").expect("can deserialize");
        assert!(!footer.line);
        assert_eq!(footer.font_size, 9);
        assert_eq!(footer.text, "Page [page] of [toPage]");
    }
}
