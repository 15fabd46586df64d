//! YAML front matter for the markdown mirror of each post.

pub mod export;
pub mod parser;
pub mod types;

pub use export::{export_all, export_post, exported_path, read_markdown_dir, remove_exported, MarkdownSource};
pub use parser::{has_front_matter, parse, render, split};
pub use types::FrontMatter;
