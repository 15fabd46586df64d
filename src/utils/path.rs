use std::path::Path;

/// Extensions treated as markdown sources
const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Extensions treated as rendered HTML content
const HTML_EXTENSIONS: [&str; 2] = ["html", "htm"];

/// Get file extension as a lowercase string
pub fn get_extension<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

/// Check if a path is a markdown source
pub fn is_markdown<P: AsRef<Path>>(path: P) -> bool {
    get_extension(path)
        .map_or(false, |e| MARKDOWN_EXTENSIONS.contains(&e.as_str()))
}

/// Check if a path holds content whose headings can be anchored
pub fn is_content_file<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    is_markdown(path)
        || get_extension(path).map_or(false, |e| HTML_EXTENSIONS.contains(&e.as_str()))
}
