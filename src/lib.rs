//! Turkish-aware slugs, heading anchors and tables of contents for blog posts.

pub mod cli;
pub mod config;
pub mod content;
pub mod front_matter;
pub mod markdown;
pub mod slug;
pub mod toc;
pub mod utils;
