use std::collections::HashSet;
use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

use super::LevelRange;

lazy_static! {
    // Quoted attribute values may contain `>`
    static ref OPEN_HEADING: Regex =
        Regex::new(r#"(?i)<h([1-6])(\s(?:"[^"]*"|'[^']*'|[^"'>])*)?>"#).unwrap();

    // The regex crate has no backreferences, so each level gets its own closing pattern
    static ref CLOSE_HEADING: Vec<Regex> = (1..=6)
        .map(|level| Regex::new(&format!(r"(?i)</h{}\s*>", level)).unwrap())
        .collect();

    static ref ATTRIBUTE: Regex = Regex::new(
        r#"\s*([^\s"'=/>]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#
    ).unwrap();

    static ref OPEN_TAG: Regex =
        Regex::new(r#"<[a-zA-Z][a-zA-Z0-9-]*(\s(?:"[^"]*"|'[^']*'|[^"'>])*)?/?>"#).unwrap();

    // Markup the browser never parses as elements; an unterminated one runs to the end
    static ref OPAQUE: Regex = Regex::new(
        r"(?is)<!--.*?(?:-->|\z)|<script\b.*?(?:</script\s*>|\z)|<style\b.*?(?:</style\s*>|\z)|<template\b.*?(?:</template\s*>|\z)|<textarea\b.*?(?:</textarea\s*>|\z)"
    ).unwrap();

    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// A heading element located in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeadingTag<'a> {
    pub level: u8,
    /// Byte range of the opening tag, `<h2 class="x">`
    pub open: Range<usize>,
    pub open_tag: &'a str,
    /// Raw attribute text of the opening tag, including its leading whitespace
    pub attrs: &'a str,
    pub inner: &'a str,
    /// Existing non-empty `id` attribute
    pub id: Option<String>,
}

impl<'a> HeadingTag<'a> {
    /// Visible text of the heading with markup stripped and entities decoded
    pub fn text(&self) -> String {
        strip_tags(self.inner)
    }
}

/// Comments and raw-text elements, sorted and non-overlapping
struct OpaqueRegions(Vec<Range<usize>>);

impl OpaqueRegions {
    fn of(html: &str) -> Self {
        OpaqueRegions(OPAQUE.find_iter(html).map(|m| m.range()).collect())
    }

    fn containing(&self, pos: usize) -> Option<&Range<usize>> {
        let index = self.0.partition_point(|region| region.end <= pos);
        self.0.get(index).filter(|region| region.start <= pos)
    }

    /// First match of `re` at or after `from` that does not start inside a region
    fn find_outside<'h>(&self, re: &Regex, html: &'h str, mut from: usize) -> Option<regex::Match<'h>> {
        loop {
            let found = re.find_at(html, from)?;
            match self.containing(found.start()) {
                Some(region) => from = region.end,
                None => return Some(found),
            }
        }
    }
}

/// Find every well-formed heading whose level is in `levels`, in document order.
///
/// A heading without a matching closing tag is skipped, and so is anything
/// inside a comment or a `script`, `style`, `template` or `textarea` element.
pub(crate) fn scan_headings(html: &str, levels: LevelRange) -> Vec<HeadingTag<'_>> {
    let opaque = OpaqueRegions::of(html);
    let mut headings = Vec::new();
    let mut pos = 0;

    while let Some(caps) = OPEN_HEADING.captures_at(html, pos) {
        let Some(whole) = caps.get(0) else { break };
        if let Some(region) = opaque.containing(whole.start()) {
            pos = region.end;
            continue;
        }
        let level = caps[1].as_bytes()[0] - b'0';

        let close_re = &CLOSE_HEADING[usize::from(level - 1)];
        let Some(close) = opaque.find_outside(close_re, html, whole.end()) else {
            pos = whole.end();
            continue;
        };

        if levels.contains(level) {
            let attrs = caps.get(2).map_or("", |m| m.as_str());
            headings.push(HeadingTag {
                level,
                open: whole.range(),
                open_tag: whole.as_str(),
                attrs,
                inner: &html[whole.end()..close.start()],
                id: id_attribute(attrs),
            });
        }

        pos = close.end();
    }

    headings
}

/// The first attribute named `id`: its byte range in `attrs` and its raw value
fn find_id_attribute(attrs: &str) -> Option<(Range<usize>, &str)> {
    ATTRIBUTE
        .captures_iter(attrs)
        .find(|caps| caps[1].eq_ignore_ascii_case("id"))
        .and_then(|caps| {
            let whole = caps.get(0)?;
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            Some((whole.range(), value))
        })
}

/// Value of the `id` attribute in raw attribute text, if present and non-empty
pub(crate) fn id_attribute(attrs: &str) -> Option<String> {
    let (_, raw) = find_id_attribute(attrs)?;
    let value = html_escape::decode_html_entities(raw).into_owned();

    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Attribute text with the first `id` attribute removed
pub(crate) fn without_id_attribute(attrs: &str) -> String {
    match find_id_attribute(attrs) {
        Some((range, _)) => format!("{}{}", &attrs[..range.start], &attrs[range.end..]),
        None => attrs.to_string(),
    }
}

/// Every element id in `html`, skipping the opening tags that start at `skip` offsets
pub(crate) fn document_ids(html: &str, skip: &HashSet<usize>) -> Vec<String> {
    let opaque = OpaqueRegions::of(html);
    let mut ids = Vec::new();
    let mut pos = 0;

    while let Some(caps) = OPEN_TAG.captures_at(html, pos) {
        let Some(tag) = caps.get(0) else { break };
        if let Some(region) = opaque.containing(tag.start()) {
            pos = region.end;
            continue;
        }
        pos = tag.end();

        if skip.contains(&tag.start()) {
            continue;
        }
        if let Some(id) = caps.get(1).and_then(|attrs| id_attribute(attrs.as_str())) {
            ids.push(id);
        }
    }

    ids
}

/// Strip comments and HTML tags, decode entities and collapse whitespace
pub fn strip_tags(fragment: &str) -> String {
    let visible = OPAQUE.replace_all(fragment, "");
    let stripped = TAG_REGEX.replace_all(&visible, "");
    let decoded = html_escape::decode_html_entities(&stripped);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
