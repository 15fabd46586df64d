use std::path::Path;

use comrak::Options;
use log::debug;

use crate::front_matter;
use crate::utils::error::BoxResult;
use crate::utils::{fs, path};

/// Create default ComrakOptions with GitHub Flavored Markdown settings
pub fn create_comrak_options<'a>() -> Options<'a> {
    let mut options = Options::default();

    // Extension options - GitHub Flavored Markdown
    options.extension.strikethrough = true;
    options.extension.tagfilter = false;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    // Heading ids are assigned by the toc module
    options.extension.header_ids = None;

    // Render options
    options.render.hardbreaks = false;
    options.render.github_pre_lang = true;
    options.render.unsafe_ = true;

    options
}

/// Render markdown to HTML using Comrak
pub fn render_markdown<'a>(content: &str, options: &Options<'a>) -> String {
    comrak::markdown_to_html(content, options)
}

/// Render markdown to HTML with the default options
pub fn markdown_to_html(content: &str) -> String {
    render_markdown(content, &create_comrak_options())
}

/// Read a content file as HTML.
///
/// Markdown files lose their front matter and are rendered; anything else
/// is returned as-is.
pub fn render_source<P: AsRef<Path>>(file: P) -> BoxResult<String> {
    let file = file.as_ref();
    let text = fs::read_file(file)?;

    if !path::is_markdown(file) {
        return Ok(text);
    }

    debug!("Rendering markdown {}", file.display());
    let (_, body) = front_matter::parse(&text)?;
    Ok(markdown_to_html(&body))
}
