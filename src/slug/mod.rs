//! URL-safe identifiers for posts and headings.
//!
//! A slug is lowercase ASCII: Turkish letters are transliterated, anything
//! that is not a letter, digit or separator is dropped and separator runs
//! collapse to a single hyphen.

mod transliterate;
mod unique;

use lazy_static::lazy_static;
use regex::Regex;

pub use transliterate::{transliterate, transliterate_char};
pub use unique::{
    base_slug, create_unique_slug, create_unique_slug_for_update, resolve_collision,
    SlugLookup, FALLBACK_SLUG,
};

lazy_static! {
    static ref SEPARATOR_RUN: Regex = Regex::new(r"[\s_-]+").unwrap();
}

/// Convert a title into a slug.
///
/// Transliteration runs before lowercasing so the map only has to produce
/// ASCII, which keeps the function idempotent. The result is empty when
/// `text` has no letters or digits.
pub fn slugify(text: &str) -> String {
    let lowered = transliterate(text.trim()).to_lowercase();

    let kept: String = lowered
        .chars()
        .filter(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-' || *c == '_'
        })
        .collect();

    SEPARATOR_RUN
        .replace_all(&kept, "-")
        .trim_matches('-')
        .to_string()
}

/// Check whether `candidate` is already in slug form
pub fn is_slug(candidate: &str) -> bool {
    !candidate.is_empty() && slugify(candidate) == candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turkish_title() {
        assert_eq!(slugify("İstanbul Şehri"), "istanbul-sehri");
        assert_eq!(slugify("Boşanma Davasında Velayet Hakkı"), "bosanma-davasinda-velayet-hakki");
        assert_eq!(slugify("ÇĞÖÜŞI çğöüşı"), "cgousi-cgousi");
    }

    #[test]
    fn test_separator_runs_collapse() {
        assert_eq!(
            slugify("  Multiple   Spaces--and_underscores  "),
            "multiple-spaces-and-underscores"
        );
        assert_eq!(slugify("a\t\nb"), "a-b");
        assert_eq!(slugify("--a--"), "a");
    }

    #[test]
    fn test_punctuation_is_removed() {
        assert_eq!(slugify("Law 101: İş Hukuku?"), "law-101-is-hukuku");
        assert_eq!(slugify("Kira (2024) & Tahliye!"), "kira-2024-tahliye");
        assert_eq!(slugify("e-Devlet"), "e-devlet");
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!!! ???"), "");
        assert_eq!(slugify("日本語"), "");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "İstanbul Şehri",
            "  Multiple   Spaces--and_underscores  ",
            "Law 101",
            "Ağır Ceza Mahkemesi — Kararlar",
            "___",
            "Émile Zola'nın İtirafı",
            "",
        ];
        for input in inputs {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_is_slug() {
        assert!(is_slug("law-101"));
        assert!(!is_slug("Law 101"));
        assert!(!is_slug(""));
        assert!(!is_slug("-law"));
    }
}
