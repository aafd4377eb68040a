//! Set of content pages available in the docs source directory.

use std::collections::BTreeSet;

/// Content page paths, relative to the docs root.
///
/// Paths use `/` separators and carry no leading slash (`guide/manifest.md`).
/// Inputs are normalized on insertion, so `/guide/manifest.md` and
/// `guide\manifest.md` are stored as `guide/manifest.md`.
///
/// Static assets (files the generator copies verbatim from `public/`) are
/// kept apart from pages under their served path (`javadoc/index.html`).
/// Links may point at them, but they never count as orphans.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentIndex {
    pages: BTreeSet<String>,
    assets: BTreeSet<String>,
}

/// What a link resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// A markdown page, as stored in the index.
    Page(&'a str),
    /// A static asset, as stored in the index.
    Asset(&'a str),
}

impl ContentIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page path.
    pub fn insert(&mut self, path: &str) {
        let normalized = normalize_page_path(path);
        if !normalized.is_empty() {
            self.pages.insert(normalized);
        }
    }

    /// True if the page exists.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.pages.contains(&normalize_page_path(path))
    }

    /// Stored form of a page path, if the page exists.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.pages
            .get(normalize_page_path(path).as_str())
            .map(String::as_str)
    }

    /// Iterate over page paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(String::as_str)
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True if there are no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Add a static asset by its served path (`javadoc/index.html`).
    pub fn insert_asset(&mut self, path: &str) {
        let normalized = normalize_page_path(path);
        if !normalized.is_empty() {
            self.assets.insert(normalized);
        }
    }

    /// True if a static asset is served at `path`.
    #[must_use]
    pub fn contains_asset(&self, path: &str) -> bool {
        self.assets.contains(&normalize_page_path(path))
    }

    /// Iterate over static asset paths in sorted order.
    pub fn assets(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(String::as_str)
    }

    /// Resolve a link to a page or, failing that, a static asset.
    ///
    /// `candidates` are the page files tried in order; `url_path` is the
    /// decoded URL path used for the asset lookup. A URL ending in `/` is
    /// served by the directory's `index.html`.
    #[must_use]
    pub fn resolve(&self, url_path: &str, candidates: &[String]) -> Option<Resolved<'_>> {
        if let Some(page) = candidates.iter().find_map(|c| self.get(c)) {
            return Some(Resolved::Page(page));
        }

        let mut asset = normalize_page_path(url_path);
        if asset.is_empty() || asset.ends_with('/') {
            asset.push_str("index.html");
        }
        self.assets
            .get(asset.as_str())
            .map(|a| Resolved::Asset(a.as_str()))
    }
}

impl<S: AsRef<str>> FromIterator<S> for ContentIndex {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut index = Self::new();
        for path in iter {
            index.insert(path.as_ref());
        }
        index
    }
}

fn normalize_page_path(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches('/').to_owned()
}
