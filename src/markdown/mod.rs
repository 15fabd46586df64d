pub mod engine;

pub use engine::{create_comrak_options, markdown_to_html, render_markdown, render_source};
