use serde::{Deserialize, Serialize};

use super::block::TOC_CLASS;
use super::{TocItem, DEFAULT_EMPTY_LABEL, DEFAULT_EMPTY_MESSAGE};

/// Rendering options for an outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineOptions {
    /// Prefix each entry with its dotted position, e.g. `2.1.3`
    pub numbered: bool,
    /// Deepest heading level to include
    pub max_depth: u8,
    pub empty_label: String,
    pub empty_message: String,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            numbered: false,
            max_depth: 6,
            empty_label: DEFAULT_EMPTY_LABEL.to_string(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }
}

/// A heading together with the headings nested under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub item: TocItem,
    /// Position in the outline, `[2, 1]` for the first child of the second root
    pub number: Vec<usize>,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    fn new(item: TocItem) -> Self {
        Self {
            item,
            number: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Dotted position, `2.1.3`
    pub fn number_label(&self) -> String {
        self.number
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    fn label(&self, options: &OutlineOptions) -> String {
        let text = self.item.label(&options.empty_label);
        if options.numbered {
            format!("{} {}", self.number_label(), text)
        } else {
            text.to_string()
        }
    }

    fn to_html(&self, options: &OutlineOptions, html: &mut String) {
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            html_escape::encode_double_quoted_attribute(&self.item.anchor_id),
            html_escape::encode_text(&self.label(options))
        ));

        if !self.children.is_empty() {
            html.push_str("<ol>");
            for child in &self.children {
                child.to_html(options, html);
            }
            html.push_str("</ol>");
        }

        html.push_str("</li>");
    }

    fn to_markdown(&self, options: &OutlineOptions, indent_level: usize, md: &mut String) {
        let indent = "  ".repeat(indent_level);
        md.push_str(&format!(
            "{}* [{}](#{})\n",
            indent,
            escape_link_text(&self.label(options)),
            self.item.anchor_id
        ));

        for child in &self.children {
            child.to_markdown(options, indent_level + 1, md);
        }
    }

    fn fill_empty_labels(&mut self, placeholder: &str) {
        if self.item.heading_text.is_empty() {
            self.item.heading_text = placeholder.to_string();
        }
        for child in &mut self.children {
            child.fill_empty_labels(placeholder);
        }
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::count).sum::<usize>()
    }
}

/// Nested outline of a document's headings.
///
/// A heading deeper than the one before it nests under it, a shallower one
/// closes lists back up to its own level and equal levels are siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    pub nodes: Vec<OutlineNode>,
}

impl Outline {
    /// Build the outline from items in document order, dropping levels deeper than `max_depth`
    pub fn build(items: &[TocItem], max_depth: u8) -> Self {
        let mut roots: Vec<OutlineNode> = Vec::new();
        let mut open: Vec<OutlineNode> = Vec::new();

        for item in items.iter().filter(|item| item.heading_level <= max_depth) {
            while open
                .last()
                .map_or(false, |top| top.item.heading_level >= item.heading_level)
            {
                if let Some(done) = open.pop() {
                    attach(done, &mut open, &mut roots);
                }
            }
            open.push(OutlineNode::new(item.clone()));
        }

        while let Some(done) = open.pop() {
            attach(done, &mut open, &mut roots);
        }

        number_nodes(&mut roots, &[]);
        Outline { nodes: roots }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of entries at every depth
    pub fn len(&self) -> usize {
        self.nodes.iter().map(OutlineNode::count).sum()
    }

    /// Render as a `<nav>` block holding nested ordered lists.
    ///
    /// An empty outline renders the "no headings" message instead of a list.
    pub fn to_html(&self, options: &OutlineOptions) -> String {
        let mut html = format!("<nav class=\"{}\">", TOC_CLASS);

        if self.nodes.is_empty() {
            html.push_str(&format!(
                "<p class=\"toc-empty\">{}</p>",
                html_escape::encode_text(&options.empty_message)
            ));
        } else {
            html.push_str("<ol class=\"toc-root\">");
            for node in &self.nodes {
                node.to_html(options, &mut html);
            }
            html.push_str("</ol>");
        }

        html.push_str("</nav>");
        html
    }

    /// Render as a nested markdown list
    pub fn to_markdown(&self, options: &OutlineOptions) -> String {
        if self.nodes.is_empty() {
            return format!("{}\n", options.empty_message);
        }

        let mut md = String::new();
        for node in &self.nodes {
            node.to_markdown(options, 0, &mut md);
        }
        md
    }

    /// Pretty JSON of the outline, with empty headings carrying the placeholder label
    pub fn to_json(&self, options: &OutlineOptions) -> serde_json::Result<String> {
        let mut labelled = self.clone();
        for node in &mut labelled.nodes {
            node.fill_empty_labels(&options.empty_label);
        }
        serde_json::to_string_pretty(&labelled)
    }
}

/// Backslash-escape the characters that would end or break a markdown link label
fn escape_link_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn attach(node: OutlineNode, open: &mut [OutlineNode], roots: &mut Vec<OutlineNode>) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn number_nodes(nodes: &mut [OutlineNode], prefix: &[usize]) {
    for (index, node) in nodes.iter_mut().enumerate() {
        let mut number = prefix.to_vec();
        number.push(index + 1);
        number_nodes(&mut node.children, &number);
        node.number = number;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(levels: &[u8]) -> Vec<TocItem> {
        levels
            .iter()
            .enumerate()
            .map(|(i, level)| TocItem {
                heading_text: format!("H{}", i),
                heading_level: *level,
                anchor_id: format!("h{}", i),
                order_index: i,
            })
            .collect()
    }

    #[test]
    fn test_nesting_follows_levels() {
        let outline = Outline::build(&items(&[2, 3, 3, 2]), 6);

        assert_eq!(outline.nodes.len(), 2);
        assert_eq!(outline.nodes[0].children.len(), 2);
        assert_eq!(outline.nodes[0].children[0].item.anchor_id, "h1");
        assert_eq!(outline.nodes[0].children[1].item.anchor_id, "h2");
        assert!(outline.nodes[1].children.is_empty());
        assert_eq!(outline.nodes[1].item.anchor_id, "h3");
        assert_eq!(outline.len(), 4);
    }

    #[test]
    fn test_nested_html() {
        let outline = Outline::build(&items(&[2, 3, 3, 2]), 6);
        let html = outline.to_html(&OutlineOptions::default());

        assert_eq!(
            html,
            "<nav class=\"toc\"><ol class=\"toc-root\">\
             <li><a href=\"#h0\">H0</a><ol>\
             <li><a href=\"#h1\">H1</a></li>\
             <li><a href=\"#h2\">H2</a></li>\
             </ol></li>\
             <li><a href=\"#h3\">H3</a></li>\
             </ol></nav>"
        );
    }

    #[test]
    fn test_shallower_heading_closes_several_levels() {
        let outline = Outline::build(&items(&[1, 2, 3, 4, 2, 1]), 6);
        assert_eq!(outline.nodes.len(), 2);
        let first = &outline.nodes[0];
        assert_eq!(first.children.len(), 2);
        assert_eq!(first.children[0].children[0].children[0].item.heading_level, 4);
    }

    #[test]
    fn test_first_heading_deeper_than_later_ones() {
        let outline = Outline::build(&items(&[3, 2, 3]), 6);
        assert_eq!(outline.nodes.len(), 2);
        assert_eq!(outline.nodes[1].children.len(), 1);
    }

    #[test]
    fn test_numbering() {
        let outline = Outline::build(&items(&[2, 3, 4, 3, 2, 3]), 6);
        let numbers: Vec<String> = vec![
            outline.nodes[0].number_label(),
            outline.nodes[0].children[0].number_label(),
            outline.nodes[0].children[0].children[0].number_label(),
            outline.nodes[0].children[1].number_label(),
            outline.nodes[1].number_label(),
            outline.nodes[1].children[0].number_label(),
        ];
        assert_eq!(numbers, vec!["1", "1.1", "1.1.1", "1.2", "2", "2.1"]);

        let options = OutlineOptions {
            numbered: true,
            ..OutlineOptions::default()
        };
        assert!(outline.to_html(&options).contains("<a href=\"#h2\">1.1.1 H2</a>"));
    }

    #[test]
    fn test_max_depth_drops_deep_headings() {
        let outline = Outline::build(&items(&[2, 3, 4, 4, 2]), 3);
        assert_eq!(outline.len(), 3);
        assert!(outline.nodes[0].children[0].children.is_empty());
    }

    #[test]
    fn test_empty_outline() {
        let outline = Outline::build(&[], 6);
        assert!(outline.is_empty());
        assert_eq!(
            outline.to_html(&OutlineOptions::default()),
            "<nav class=\"toc\"><p class=\"toc-empty\">Başlık bulunamadı.</p></nav>"
        );
        assert_eq!(outline.to_markdown(&OutlineOptions::default()), "Başlık bulunamadı.\n");
    }

    #[test]
    fn test_labels_are_escaped_and_placeholder_used() {
        let mut list = items(&[2, 2]);
        list[0].heading_text = "Kira <ve> Tahliye & Dava".to_string();
        list[1].heading_text = String::new();
        let html = Outline::build(&list, 6).to_html(&OutlineOptions::default());

        assert!(html.contains("Kira &lt;ve&gt; Tahliye &amp; Dava"));
        assert!(html.contains("<a href=\"#h1\">(boş başlık)</a>"));
    }

    #[test]
    fn test_markdown() {
        let outline = Outline::build(&items(&[2, 3, 2]), 6);
        assert_eq!(
            outline.to_markdown(&OutlineOptions::default()),
            "* [H0](#h0)\n  * [H1](#h1)\n* [H2](#h2)\n"
        );
    }

    #[test]
    fn test_markdown_escapes_link_text() {
        let mut list = items(&[2, 2]);
        list[0].heading_text = r"Madde [1] ve C:\yol".to_string();
        list[1].heading_text = String::new();
        let md = Outline::build(&list, 6).to_markdown(&OutlineOptions::default());

        assert_eq!(md, "* [Madde \\[1\\] ve C:\\\\yol](#h0)\n* [(boş başlık)](#h1)\n");
    }

    #[test]
    fn test_json_uses_placeholder_label() {
        let mut list = items(&[2, 3]);
        list[1].heading_text = String::new();
        let outline = Outline::build(&list, 6);
        let options = OutlineOptions {
            empty_label: "(adsız)".to_string(),
            ..OutlineOptions::default()
        };

        let value: serde_json::Value = serde_json::from_str(&outline.to_json(&options).unwrap()).unwrap();
        assert_eq!(value["nodes"][0]["item"]["heading_text"], "H0");
        assert_eq!(value["nodes"][0]["children"][0]["item"]["heading_text"], "(adsız)");
        assert_eq!(outline.nodes[0].children[0].item.heading_text, "");
    }
}
