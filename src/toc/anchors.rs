use std::collections::HashSet;

use log::debug;

use super::parser::{document_ids, scan_headings, without_id_attribute, HeadingTag};
use super::{IdPolicy, TocItem, TocOptions};
use crate::slug::{resolve_collision, slugify};

/// Ids already used within one document.
///
/// Passed explicitly through every anchoring call so ids generated in one
/// pass are seen by the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdRegistry {
    used: HashSet<String>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every id found in `html`
    pub fn from_document(html: &str) -> Self {
        let mut registry = Self::new();
        registry.extend(document_ids(html, &HashSet::new()));
        registry
    }

    pub fn contains(&self, id: &str) -> bool {
        self.used.contains(id)
    }

    /// Mark `id` as used, returning false if it already was
    pub fn register(&mut self, id: impl Into<String>) -> bool {
        self.used.insert(id.into())
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, ids: I) {
        self.used.extend(ids);
    }

    /// Claim `base`, or `base-N` for the first free N, and mark it used
    pub fn claim(&mut self, base: &str) -> String {
        let id = resolve_collision(base, |candidate| self.used.contains(candidate));
        self.used.insert(id.clone());
        id
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

/// A heading paired with the anchor id it ends up with
#[derive(Debug, Clone)]
pub(crate) struct Anchored<'a> {
    pub heading: HeadingTag<'a>,
    pub item: TocItem,
}

impl Anchored<'_> {
    /// Opening tag carrying the anchor id, or the original tag if it already does
    fn open_tag(&self) -> String {
        if self.heading.id.as_deref() == Some(self.item.anchor_id.as_str()) {
            return self.heading.open_tag.to_string();
        }

        // Keep the author's tag-name casing, `<H2` stays `<H2`
        let tag_name = &self.heading.open_tag[..3];
        format!(
            "{} id=\"{}\"{}>",
            tag_name,
            html_escape::encode_double_quoted_attribute(&self.item.anchor_id),
            without_id_attribute(self.heading.attrs)
        )
    }
}

/// Result of giving every heading of a document an id
#[derive(Debug, Clone)]
pub struct AnchoredDocument {
    pub html: String,
    pub items: Vec<TocItem>,
    pub registry: IdRegistry,
}

/// Decide the anchor id of every heading in `html`.
///
/// Ids already present in the document are registered first; with
/// [`IdPolicy::Overwrite`] the ids of the headings being rewritten are left
/// out so they can be generated afresh.
pub(crate) fn assign_headings<'a>(
    html: &'a str,
    options: &TocOptions,
    registry: &mut IdRegistry,
) -> Vec<Anchored<'a>> {
    let headings = scan_headings(html, options.levels);

    let skip: HashSet<usize> = match options.id_policy {
        IdPolicy::Preserve => HashSet::new(),
        IdPolicy::Overwrite => headings.iter().map(|h| h.open.start).collect(),
    };
    registry.extend(document_ids(html, &skip));

    headings
        .into_iter()
        .enumerate()
        .map(|(order_index, heading)| {
            let heading_text = heading.text();
            let anchor_id = match (&heading.id, options.id_policy) {
                (Some(existing), IdPolicy::Preserve) => existing.clone(),
                _ => registry.claim(&anchor_base(&heading_text, options)),
            };
            let item = TocItem {
                heading_text,
                heading_level: heading.level,
                anchor_id,
                order_index,
            };
            Anchored { heading, item }
        })
        .collect()
}

fn anchor_base(heading_text: &str, options: &TocOptions) -> String {
    let slug = slugify(heading_text);
    let slug = if slug.is_empty() {
        slugify(&options.heading_fallback)
    } else {
        slug
    };
    format!("{}{}", options.anchor_prefix, slug)
}

/// Anchor ids for every heading in `html`, threading `registry` through
pub fn assign_anchors(html: &str, options: &TocOptions, registry: &mut IdRegistry) -> Vec<TocItem> {
    assign_headings(html, options, registry)
        .into_iter()
        .map(|anchored| anchored.item)
        .collect()
}

/// Give every in-range heading an id and return the rewritten document.
///
/// Attributes other than `id` and the heading content are kept verbatim.
/// Running this on its own output returns the output unchanged.
pub fn ensure_heading_ids(html: &str, options: &TocOptions, mut registry: IdRegistry) -> AnchoredDocument {
    let anchored = assign_headings(html, options, &mut registry);

    let mut out = String::with_capacity(html.len() + anchored.len() * 16);
    let mut last = 0;
    for heading in &anchored {
        out.push_str(&html[last..heading.heading.open.start]);
        out.push_str(&heading.open_tag());
        last = heading.heading.open.end;
    }
    out.push_str(&html[last..]);

    debug!("Anchored {} headings", anchored.len());

    AnchoredDocument {
        html: out,
        items: anchored.into_iter().map(|a| a.item).collect(),
        registry,
    }
}

/// Headings of `html` across all levels, with the ids [`inject_anchors`] would give them
pub fn extract_headings(html: &str) -> Vec<TocItem> {
    extract_headings_with(html, &TocOptions::default())
}

/// Headings of `html` selected and anchored according to `options`
pub fn extract_headings_with(html: &str, options: &TocOptions) -> Vec<TocItem> {
    assign_anchors(html, options, &mut IdRegistry::new())
}

/// Add an `id` to every heading that lacks one
pub fn inject_anchors(html: &str) -> String {
    inject_anchors_with(html, &TocOptions::default())
}

/// Add heading ids according to `options`
pub fn inject_anchors_with(html: &str, options: &TocOptions) -> String {
    ensure_heading_ids(html, options, IdRegistry::new()).html
}

/// Anchor every heading and put a zero-height `toc-anchor` span in front of it.
///
/// A heading whose span already exists is left alone.
pub fn add_anchor_spans(html: &str, options: &TocOptions) -> String {
    let anchored_html = inject_anchors_with(html, options);

    // Every heading now has an id, keep them
    let keep = options.clone().with_id_policy(IdPolicy::Preserve);
    let mut registry = IdRegistry::new();
    let anchored = assign_headings(&anchored_html, &keep, &mut registry);

    let mut out = String::with_capacity(anchored_html.len() + anchored.len() * 48);
    let mut last = 0;
    for heading in &anchored {
        let span_id = format!("anchor-{}", heading.item.anchor_id);
        out.push_str(&anchored_html[last..heading.heading.open.start]);
        if registry.register(span_id.clone()) {
            out.push_str(&format!(
                "<span class=\"toc-anchor\" id=\"{}\"></span>",
                html_escape::encode_double_quoted_attribute(&span_id)
            ));
        }
        last = heading.heading.open.start;
    }
    out.push_str(&anchored_html[last..]);
    out
}
