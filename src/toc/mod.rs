//! Table of contents for rendered post HTML.
//!
//! Headings are found with a tag scanner rather than a DOM, anchored with
//! slug ids and folded into a nested outline for in-page navigation.

mod anchors;
mod block;
mod outline;
mod parser;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use anchors::{
    add_anchor_spans, assign_anchors, ensure_heading_ids, extract_headings, extract_headings_with,
    inject_anchors, inject_anchors_with, AnchoredDocument, IdRegistry,
};
pub use block::{insert_toc_at_top, remove_toc, replace_toc, TOC_CLASS};
pub use outline::{Outline, OutlineNode, OutlineOptions};
pub use parser::strip_tags;

/// Label used for headings without text
pub const DEFAULT_EMPTY_LABEL: &str = "(boş başlık)";

/// Message rendered when a document has no headings
pub const DEFAULT_EMPTY_MESSAGE: &str = "Başlık bulunamadı.";

/// Base id for headings whose text has no slug characters
pub const DEFAULT_HEADING_FALLBACK: &str = "heading";

/// One heading of a document, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocItem {
    pub heading_text: String,
    pub heading_level: u8,
    pub anchor_id: String,
    pub order_index: usize,
}

impl TocItem {
    /// Text to display for this heading, falling back to `placeholder`
    pub fn label<'a>(&'a self, placeholder: &'a str) -> &'a str {
        if self.heading_text.is_empty() {
            placeholder
        } else {
            &self.heading_text
        }
    }
}

/// Inclusive range of heading levels (h1 = 1 ... h6 = 6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRange {
    pub min: u8,
    pub max: u8,
}

impl LevelRange {
    /// Every heading level
    pub const ALL: LevelRange = LevelRange { min: 1, max: 6 };

    /// Levels shown in an article's side panel
    pub const ARTICLE: LevelRange = LevelRange { min: 2, max: 4 };

    /// Build a range, clamping both ends into 1..=6 and ordering them
    pub fn new(min: u8, max: u8) -> Self {
        let min = min.clamp(1, 6);
        let max = max.clamp(1, 6);
        if min <= max {
            LevelRange { min, max }
        } else {
            LevelRange { min: max, max: min }
        }
    }

    pub fn contains(&self, level: u8) -> bool {
        level >= self.min && level <= self.max
    }
}

impl Default for LevelRange {
    fn default() -> Self {
        LevelRange::ALL
    }
}

impl fmt::Display for LevelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl FromStr for LevelRange {
    type Err = String;

    /// Parse `"2-4"` or a single level such as `"3"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_level = |part: &str| -> Result<u8, String> {
            let level: u8 = part
                .trim()
                .trim_start_matches(['h', 'H'])
                .parse()
                .map_err(|_| format!("invalid heading level '{}'", part.trim()))?;
            if (1..=6).contains(&level) {
                Ok(level)
            } else {
                Err(format!("heading level {} is outside 1-6", level))
            }
        };

        match s.split_once('-') {
            Some((min, max)) => Ok(LevelRange::new(parse_level(min)?, parse_level(max)?)),
            None => {
                let level = parse_level(s)?;
                Ok(LevelRange::new(level, level))
            }
        }
    }
}

/// What to do with a heading that already carries an `id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// Keep existing ids, generate only missing ones
    #[default]
    Preserve,
    /// Regenerate every heading id from its text
    Overwrite,
}

impl FromStr for IdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preserve" => Ok(IdPolicy::Preserve),
            "overwrite" => Ok(IdPolicy::Overwrite),
            other => Err(format!("unknown id policy '{}'", other)),
        }
    }
}

/// Options for heading extraction and anchoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocOptions {
    pub levels: LevelRange,
    pub id_policy: IdPolicy,
    /// Prepended to every generated id, e.g. `toc-`
    pub anchor_prefix: String,
    pub heading_fallback: String,
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            levels: LevelRange::ALL,
            id_policy: IdPolicy::Preserve,
            anchor_prefix: String::new(),
            heading_fallback: DEFAULT_HEADING_FALLBACK.to_string(),
        }
    }
}

impl TocOptions {
    pub fn with_levels(mut self, levels: LevelRange) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_id_policy(mut self, id_policy: IdPolicy) -> Self {
        self.id_policy = id_policy;
        self
    }
}

/// Extract the headings of `html` and render them as a navigation outline
pub fn render_toc(html: &str, toc_options: &TocOptions, outline_options: &OutlineOptions) -> String {
    let items = extract_headings_with(html, toc_options);
    Outline::build(&items, outline_options.max_depth).to_html(outline_options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_range_parsing() {
        assert_eq!("2-4".parse::<LevelRange>().unwrap(), LevelRange::ARTICLE);
        assert_eq!("h1-h6".parse::<LevelRange>().unwrap(), LevelRange::ALL);
        assert_eq!("3".parse::<LevelRange>().unwrap(), LevelRange::new(3, 3));
        assert_eq!("4-2".parse::<LevelRange>().unwrap(), LevelRange::ARTICLE);
        assert!("0-3".parse::<LevelRange>().is_err());
        assert!("a-b".parse::<LevelRange>().is_err());
    }

    #[test]
    fn test_level_range_clamps() {
        let range = LevelRange::new(0, 9);
        assert_eq!(range, LevelRange::ALL);
        assert!(range.contains(1) && range.contains(6));
        assert!(!LevelRange::ARTICLE.contains(5));
        assert_eq!(LevelRange::ARTICLE.to_string(), "2-4");
    }

    #[test]
    fn test_item_label_placeholder() {
        let item = TocItem {
            heading_text: String::new(),
            heading_level: 2,
            anchor_id: "heading".to_string(),
            order_index: 0,
        };
        assert_eq!(item.label(DEFAULT_EMPTY_LABEL), "(boş başlık)");
    }

    #[test]
    fn test_id_policy_from_str() {
        assert_eq!("Overwrite".parse::<IdPolicy>().unwrap(), IdPolicy::Overwrite);
        assert_eq!("preserve".parse::<IdPolicy>().unwrap(), IdPolicy::Preserve);
        assert!("keep".parse::<IdPolicy>().is_err());
    }

    #[test]
    fn test_render_toc_end_to_end() {
        let html = "<h2>Giriş</h2><p>..</p><h3>Şartlar</h3><h2>Sonuç</h2>";
        let toc = render_toc(html, &TocOptions::default(), &OutlineOptions::default());

        assert!(toc.starts_with("<nav class=\"toc\">"));
        assert!(toc.contains("<a href=\"#giris\">Giriş</a>"));
        assert!(toc.contains("<a href=\"#sartlar\">Şartlar</a>"));
        assert!(toc.contains("<a href=\"#sonuc\">Sonuç</a>"));
    }
}
