use lazy_static::lazy_static;
use regex::Regex;

/// Class of the `<nav>` element a rendered outline is wrapped in
pub const TOC_CLASS: &str = "toc";

lazy_static! {
    static ref TOC_BLOCK: Regex =
        Regex::new(r#"(?is)<nav\s+class\s*=\s*["']toc["'][^>]*>.*?</nav>\n?"#).unwrap();
}

/// Put `toc_html` in front of the document
pub fn insert_toc_at_top(html: &str, toc_html: &str) -> String {
    format!("{}\n{}", toc_html, html)
}

/// Replace the first TOC block with `toc_html`, or insert it at the top if there is none
pub fn replace_toc(html: &str, toc_html: &str) -> String {
    match TOC_BLOCK.find(html) {
        Some(block) => {
            let keeps_newline = block.as_str().ends_with('\n');
            let mut out = String::with_capacity(html.len() + toc_html.len());
            out.push_str(&html[..block.start()]);
            out.push_str(toc_html);
            if keeps_newline {
                out.push('\n');
            }
            out.push_str(&html[block.end()..]);
            out
        }
        None => insert_toc_at_top(html, toc_html),
    }
}

/// Remove every TOC block from the document
pub fn remove_toc(html: &str) -> String {
    TOC_BLOCK.replace_all(html, "").into_owned()
}
