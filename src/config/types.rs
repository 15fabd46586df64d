use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::toc::{IdPolicy, LevelRange, OutlineOptions, TocOptions};

/// Table of contents configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocConfig {
    /// Shallowest heading level collected
    #[serde(default = "defaults::default_min_level")]
    pub min_level: u8,

    /// Deepest heading level collected
    #[serde(default = "defaults::default_max_level")]
    pub max_level: u8,

    /// Prefix outline entries with `1.2.3` style numbers
    #[serde(default)]
    pub numbered: bool,

    /// Deepest heading level rendered in the outline
    #[serde(default = "defaults::default_max_depth")]
    pub max_depth: u8,

    /// Keep or regenerate ids headings already carry
    #[serde(default)]
    pub id_policy: IdPolicy,

    /// Prepended to generated heading ids
    #[serde(default)]
    pub anchor_prefix: String,

    /// Label for headings without text
    #[serde(default = "defaults::default_empty_label")]
    pub empty_label: String,

    /// Shown instead of an outline when there are no headings
    #[serde(default = "defaults::default_empty_message")]
    pub empty_message: String,

    /// Id base for headings without slug characters
    #[serde(default = "defaults::default_heading_fallback")]
    pub heading_fallback: String,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            min_level: defaults::default_min_level(),
            max_level: defaults::default_max_level(),
            numbered: false,
            max_depth: defaults::default_max_depth(),
            id_policy: IdPolicy::default(),
            anchor_prefix: String::new(),
            empty_label: defaults::default_empty_label(),
            empty_message: defaults::default_empty_message(),
            heading_fallback: defaults::default_heading_fallback(),
        }
    }
}

impl TocConfig {
    pub fn levels(&self) -> LevelRange {
        LevelRange::new(self.min_level, self.max_level)
    }

    /// Extraction options for heading scanning and anchoring
    pub fn toc_options(&self) -> TocOptions {
        TocOptions {
            levels: self.levels(),
            id_policy: self.id_policy,
            anchor_prefix: self.anchor_prefix.clone(),
            heading_fallback: self.heading_fallback.clone(),
        }
    }

    /// Rendering options for the outline
    pub fn outline_options(&self) -> OutlineOptions {
        OutlineOptions {
            numbered: self.numbered,
            max_depth: self.max_depth,
            empty_label: self.empty_label.clone(),
            empty_message: self.empty_message.clone(),
        }
    }
}

/// Site configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Site root every other directory is relative to
    #[serde(default = "defaults::default_source")]
    pub source: PathBuf,

    /// Data directory holding the post store
    #[serde(default = "defaults::default_data_dir")]
    pub data_dir: PathBuf,

    /// File name of the post store inside `data_dir`
    #[serde(default = "defaults::default_posts_file")]
    pub posts_file: String,

    /// Directory markdown copies of posts are written to
    #[serde(default = "defaults::default_content_dir")]
    pub content_dir: PathBuf,

    /// Table of contents settings
    #[serde(default)]
    pub toc: TocConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: defaults::default_source(),
            data_dir: defaults::default_data_dir(),
            posts_file: defaults::default_posts_file(),
            content_dir: defaults::default_content_dir(),
            toc: TocConfig::default(),
        }
    }
}

impl Config {
    /// Full path of the post store file
    pub fn store_path(&self) -> PathBuf {
        self.source.join(&self.data_dir).join(&self.posts_file)
    }

    /// Full path of the markdown export directory
    pub fn content_path(&self) -> PathBuf {
        self.source.join(&self.content_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = Config {
            source: PathBuf::from("/site"),
            ..Config::default()
        };
        assert_eq!(config.store_path(), PathBuf::from("/site/data/posts.json"));
        assert_eq!(config.content_path(), PathBuf::from("/site/src/content/blog"));
    }

    #[test]
    fn test_toc_config_into_options() {
        let toc = TocConfig {
            min_level: 4,
            max_level: 2,
            numbered: true,
            anchor_prefix: "toc-".to_string(),
            ..TocConfig::default()
        };

        let options = toc.toc_options();
        assert_eq!(options.levels, LevelRange::ARTICLE);
        assert_eq!(options.anchor_prefix, "toc-");

        let outline = toc.outline_options();
        assert!(outline.numbered);
        assert_eq!(outline.empty_message, "Başlık bulunamadı.");
    }
}
