use std::collections::{BTreeSet, HashSet};

use log::debug;

use super::slugify;

/// Base used when a title has no characters that survive slugification
pub const FALLBACK_SLUG: &str = "yazi";

/// Existence checks a storage collaborator exposes for slug assignment
pub trait SlugLookup {
    /// Whether any stored item already uses `slug`
    fn exists(&self, slug: &str) -> bool;

    /// Whether any stored item other than the one keyed `current_slug` uses `slug`
    fn exists_excluding(&self, slug: &str, current_slug: &str) -> bool;

    /// Unique slug for a new item titled `title`
    fn unique_slug(&self, title: &str) -> String {
        create_unique_slug(title, |candidate| self.exists(candidate))
    }

    /// Unique slug for the item currently keyed `current_slug` after a retitle
    fn unique_slug_for_update(&self, title: &str, current_slug: &str) -> String {
        create_unique_slug_for_update(title, current_slug, |candidate, current| {
            self.exists_excluding(candidate, current)
        })
    }
}

impl SlugLookup for HashSet<String> {
    fn exists(&self, slug: &str) -> bool {
        self.contains(slug)
    }

    fn exists_excluding(&self, slug: &str, current_slug: &str) -> bool {
        slug != current_slug && self.contains(slug)
    }
}

impl SlugLookup for BTreeSet<String> {
    fn exists(&self, slug: &str) -> bool {
        self.contains(slug)
    }

    fn exists_excluding(&self, slug: &str, current_slug: &str) -> bool {
        slug != current_slug && self.contains(slug)
    }
}

/// Slugify `title`, substituting [`FALLBACK_SLUG`] for an empty result
pub fn base_slug(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        debug!("Title {:?} has no slug characters, using '{}'", title, FALLBACK_SLUG);
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Return `base` if it is free, otherwise the first free `base-N` for N = 1, 2, ...
///
/// Terminates as long as `taken` eventually reports a candidate as free,
/// which holds for any finite collection.
pub fn resolve_collision<F>(base: &str, mut taken: F) -> String
where
    F: FnMut(&str) -> bool,
{
    if !taken(base) {
        return base.to_string();
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{}-{}", base, counter);
        if !taken(&candidate) {
            debug!("Slug '{}' taken, resolved to '{}'", base, candidate);
            return candidate;
        }
        counter += 1;
    }
}

/// Create a slug for a new item that `exists` does not report as used
pub fn create_unique_slug<F>(title: &str, exists: F) -> String
where
    F: FnMut(&str) -> bool,
{
    resolve_collision(&base_slug(title), exists)
}

/// Create a slug for an existing item being retitled.
///
/// An unchanged title keeps `current_slug` as is, so links do not break.
/// Otherwise candidates are checked with `exists_excluding(candidate,
/// current_slug)`, letting the item collide only with other items.
pub fn create_unique_slug_for_update<F>(title: &str, current_slug: &str, mut exists_excluding: F) -> String
where
    F: FnMut(&str, &str) -> bool,
{
    if slugify(title) == current_slug {
        return current_slug.to_string();
    }

    resolve_collision(&base_slug(title), |candidate| {
        exists_excluding(candidate, current_slug)
    })
}
