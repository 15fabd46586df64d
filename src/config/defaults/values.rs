use std::path::PathBuf;

use crate::toc::{DEFAULT_EMPTY_LABEL, DEFAULT_EMPTY_MESSAGE, DEFAULT_HEADING_FALLBACK};

/// Default source directory
pub fn default_source() -> PathBuf {
    PathBuf::from(".")
}

/// Default data directory, where the post store lives
pub fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Default post store file name
pub fn default_posts_file() -> String {
    "posts.json".to_string()
}

/// Default directory markdown copies of posts are exported to
pub fn default_content_dir() -> PathBuf {
    PathBuf::from("src/content/blog")
}

/// Shallowest heading level collected for the article outline
pub fn default_min_level() -> u8 {
    2
}

/// Deepest heading level collected for the article outline
pub fn default_max_level() -> u8 {
    4
}

/// Deepest heading level rendered in the outline
pub fn default_max_depth() -> u8 {
    6
}

pub fn default_empty_label() -> String {
    DEFAULT_EMPTY_LABEL.to_string()
}

pub fn default_empty_message() -> String {
    DEFAULT_EMPTY_MESSAGE.to_string()
}

pub fn default_heading_fallback() -> String {
    DEFAULT_HEADING_FALLBACK.to_string()
}
