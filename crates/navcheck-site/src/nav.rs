//! Navigation tree data model.
//!
//! A site's navigation is made of two parts:
//! - the top navigation bar, a flat (or dropdown-nested) list of [`NavEntry`]
//! - the sidebar, a [`SidebarMap`] from URL prefix to a tree of [`NavEntry`]
//!
//! Both are authored by hand, loaded once, and never mutated afterwards.

use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// One node in the navigation tree.
///
/// Leaf nodes carry a `link` and no `items`. Internal nodes may carry both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NavEntry {
    /// Display text.
    pub text: String,
    /// Link target, as written by the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Initial collapsed state of a sidebar group. `None` means not collapsible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Child entries, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavEntry>,
}

impl NavEntry {
    /// Create a leaf entry.
    #[must_use]
    pub fn leaf(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(link.into()),
            collapsed: None,
            items: Vec::new(),
        }
    }

    /// Create a group entry without a link of its own.
    #[must_use]
    pub fn group(text: impl Into<String>, items: Vec<NavEntry>) -> Self {
        Self {
            text: text.into(),
            link: None,
            collapsed: None,
            items,
        }
    }

    /// Set the collapsed state.
    #[must_use]
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    /// Maximum depth of this subtree (a leaf has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.items.iter().map(NavEntry::depth).max().unwrap_or(0)
    }

    /// Number of entries in this subtree that carry a link.
    #[must_use]
    pub fn link_count(&self) -> usize {
        usize::from(self.link.is_some())
            + self.items.iter().map(NavEntry::link_count).sum::<usize>()
    }
}

/// Mapping from URL prefix (e.g. `/guide/`) to its top-level sidebar sections.
///
/// Keys keep the order in which they were authored. A sidebar given as a
/// plain list (no prefix keys) is stored under the root prefix `/`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarMap {
    scopes: Vec<(String, Vec<NavEntry>)>,
}

impl SidebarMap {
    /// Create an empty sidebar map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the sections for a prefix.
    ///
    /// Replacing keeps the original key position.
    pub fn insert(&mut self, prefix: impl Into<String>, sections: Vec<NavEntry>) {
        let prefix = prefix.into();
        if let Some(slot) = self.scopes.iter_mut().find(|(key, _)| *key == prefix) {
            slot.1 = sections;
        } else {
            self.scopes.push((prefix, sections));
        }
    }

    /// Sections for an exact prefix.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&[NavEntry]> {
        self.scopes
            .iter()
            .find(|(key, _)| key == prefix)
            .map(|(_, sections)| sections.as_slice())
    }

    /// Iterate over `(prefix, sections)` in authored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NavEntry])> {
        self.scopes
            .iter()
            .map(|(key, sections)| (key.as_str(), sections.as_slice()))
    }

    /// Number of prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// True if no prefixes are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Find the sidebar prefix shown for a page.
    ///
    /// Returns the longest key that prefixes `page_path`, the same rule the
    /// site generator uses to pick a sidebar. `page_path` is a URL path such
    /// as `/guide/events`; a missing leading slash is tolerated.
    #[must_use]
    pub fn scope_for(&self, page_path: &str) -> Option<&str> {
        let page_path = if page_path.starts_with('/') {
            page_path.to_owned()
        } else {
            format!("/{page_path}")
        };

        self.scopes
            .iter()
            .map(|(key, _)| key.as_str())
            .filter(|key| {
                let key_dir = key.trim_end_matches('/');
                key_dir.is_empty() || page_path.starts_with(*key) || page_path == key_dir
            })
            .max_by_key(|key| key.len())
    }

    /// Maximum depth across all sidebars (0 when empty).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes
            .iter()
            .flat_map(|(_, sections)| sections)
            .map(NavEntry::depth)
            .max()
            .unwrap_or(0)
    }
}

impl FromIterator<(String, Vec<NavEntry>)> for SidebarMap {
    fn from_iter<T: IntoIterator<Item = (String, Vec<NavEntry>)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (prefix, sections) in iter {
            map.insert(prefix, sections);
        }
        map
    }
}

impl<'de> Deserialize<'de> for SidebarMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SidebarMapVisitor)
    }
}

/// Visitor that keeps map keys in document order.
struct SidebarMapVisitor;

impl<'de> Visitor<'de> for SidebarMapVisitor {
    type Value = SidebarMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of URL prefixes to sidebar sections, or a list of sections")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = SidebarMap::new();
        while let Some((prefix, sections)) = access.next_entry::<String, Vec<NavEntry>>()? {
            map.insert(prefix, sections);
        }
        Ok(map)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut sections = Vec::new();
        while let Some(entry) = access.next_element::<NavEntry>()? {
            sections.push(entry);
        }
        let mut map = SidebarMap::new();
        map.insert("/", sections);
        Ok(map)
    }
}

impl Serialize for SidebarMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.scopes.len()))?;
        for (prefix, sections) in &self.scopes {
            map.serialize_entry(prefix, sections)?;
        }
        map.end()
    }
}

/// Social link shown in the site header.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SocialLink {
    /// Icon name (e.g. `github`).
    pub icon: String,
    /// Link target, usually external.
    pub link: String,
}

/// Where a navigation entry lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavArea<'a> {
    /// Top navigation bar.
    NavBar,
    /// Sidebar registered under the given prefix.
    Sidebar(&'a str),
    /// Header social links.
    Social,
}

impl NavArea<'_> {
    /// Base URL that relative links in this area resolve against.
    #[must_use]
    pub fn base(&self) -> &str {
        match self {
            Self::NavBar | Self::Social => "/",
            Self::Sidebar(prefix) => *prefix,
        }
    }
}

impl fmt::Display for NavArea<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NavBar => f.write_str("nav"),
            Self::Sidebar(prefix) => write!(f, "sidebar {prefix}"),
            Self::Social => f.write_str("social"),
        }
    }
}

/// A linked entry visited during [`SiteNav::visit_links`].
#[derive(Debug)]
pub struct LinkSite<'a> {
    /// Area the entry belongs to.
    pub area: NavArea<'a>,
    /// Texts of the ancestors and of the entry itself, outermost first.
    pub trail: Vec<&'a str>,
    /// Link as written.
    pub link: &'a str,
}

impl LinkSite<'_> {
    /// Human readable location, e.g. `sidebar /guide/ > Basics > Manifest`.
    #[must_use]
    pub fn location(&self) -> String {
        let mut location = self.area.to_string();
        for text in &self.trail {
            location.push_str(" > ");
            location.push_str(text);
        }
        location
    }
}

/// Navigation part of a documentation site configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteNav {
    /// Site title.
    pub title: Option<String>,
    /// Site description.
    pub description: Option<String>,
    /// Top navigation bar.
    pub nav: Vec<NavEntry>,
    /// Sidebars by URL prefix.
    pub sidebar: SidebarMap,
    /// Header social links.
    pub social_links: Vec<SocialLink>,
}

impl SiteNav {
    /// Visit every entry carrying a link, depth first, in authored order.
    ///
    /// Order: navigation bar, then each sidebar in key order, then social links.
    pub fn visit_links<'a>(&'a self, mut visit: impl FnMut(LinkSite<'a>)) {
        let mut trail = Vec::new();
        for entry in &self.nav {
            visit_entry(NavArea::NavBar, entry, &mut trail, &mut visit);
        }
        for (prefix, sections) in self.sidebar.iter() {
            for entry in sections {
                visit_entry(NavArea::Sidebar(prefix), entry, &mut trail, &mut visit);
            }
        }
        for social in &self.social_links {
            visit(LinkSite {
                area: NavArea::Social,
                trail: vec![social.icon.as_str()],
                link: &social.link,
            });
        }
    }

    /// Maximum depth across the navigation bar and all sidebars.
    #[must_use]
    pub fn depth(&self) -> usize {
        let nav_depth = self.nav.iter().map(NavEntry::depth).max().unwrap_or(0);
        nav_depth.max(self.sidebar.depth())
    }

    /// Number of linked entries in the navigation bar and all sidebars.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.nav.iter().map(NavEntry::link_count).sum::<usize>()
            + self
                .sidebar
                .iter()
                .flat_map(|(_, sections)| sections)
                .map(NavEntry::link_count)
                .sum::<usize>()
    }
}

fn visit_entry<'a>(
    area: NavArea<'a>,
    entry: &'a NavEntry,
    trail: &mut Vec<&'a str>,
    visit: &mut impl FnMut(LinkSite<'a>),
) {
    trail.push(&entry.text);
    if let Some(link) = &entry.link {
        visit(LinkSite {
            area,
            trail: trail.clone(),
            link,
        });
    }
    for child in &entry.items {
        visit_entry(area, child, trail, visit);
    }
    trail.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn guide_sidebar() -> SidebarMap {
        let mut sidebar = SidebarMap::new();
        sidebar.insert(
            "/guide/",
            vec![
                NavEntry::group("Plugin Guide", vec![NavEntry::leaf("Overview", "/guide/")]),
                NavEntry::group(
                    "1. Plugin Basics",
                    vec![
                        NavEntry::leaf("Manifest File", "/guide/manifest"),
                        NavEntry::leaf("Events & Listeners", "/guide/events"),
                    ],
                )
                .collapsed(false),
            ],
        );
        sidebar
    }

    #[test]
    fn test_nav_entry_depth() {
        let leaf = NavEntry::leaf("Leaf", "/leaf");
        assert_eq!(leaf.depth(), 1);

        let nested = NavEntry::group(
            "A",
            vec![NavEntry::group("B", vec![NavEntry::leaf("C", "/c")])],
        );
        assert_eq!(nested.depth(), 3);
    }

    #[test]
    fn test_nav_entry_link_count_includes_group_links() {
        let mut group = NavEntry::group("Guide", vec![NavEntry::leaf("Events", "/guide/events")]);
        group.link = Some("/guide/".to_owned());

        assert_eq!(group.link_count(), 2);
    }

    #[test]
    fn test_deserialize_entry_defaults() {
        let entry: NavEntry = serde_json::from_str(r#"{"text": "Home", "link": "/"}"#).unwrap();

        assert_eq!(entry, NavEntry::leaf("Home", "/"));
    }

    #[test]
    fn test_deserialize_sidebar_preserves_key_order() {
        let json = r#"{
            "/resource-packs/": [],
            "/api/": [],
            "/guide/": [{"text": "Overview", "link": "/guide/"}]
        }"#;

        let sidebar: SidebarMap = serde_json::from_str(json).unwrap();

        let keys: Vec<_> = sidebar.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["/resource-packs/", "/api/", "/guide/"]);
        assert_eq!(sidebar.get("/guide/").unwrap().len(), 1);
    }

    #[test]
    fn test_deserialize_sidebar_from_list_uses_root_prefix() {
        let json = r#"[{"text": "Intro", "link": "/intro"}]"#;

        let sidebar: SidebarMap = serde_json::from_str(json).unwrap();

        assert_eq!(sidebar.len(), 1);
        assert_eq!(sidebar.get("/").unwrap()[0].text, "Intro");
    }

    #[test]
    fn test_serialize_sidebar_keeps_order() {
        let mut sidebar = SidebarMap::new();
        sidebar.insert("/z/", Vec::new());
        sidebar.insert("/a/", Vec::new());

        let json = serde_json::to_string(&sidebar).unwrap();

        assert_eq!(json, r#"{"/z/":[],"/a/":[]}"#);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut sidebar = SidebarMap::new();
        sidebar.insert("/a/", Vec::new());
        sidebar.insert("/b/", Vec::new());
        sidebar.insert("/a/", vec![NavEntry::leaf("A", "/a/")]);

        let keys: Vec<_> = sidebar.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["/a/", "/b/"]);
        assert_eq!(sidebar.get("/a/").unwrap().len(), 1);
    }

    #[test]
    fn test_scope_for_picks_longest_prefix() {
        let sidebar: SidebarMap = [
            ("/".to_owned(), Vec::new()),
            ("/api/".to_owned(), Vec::new()),
            ("/api/world/".to_owned(), Vec::new()),
        ]
        .into_iter()
        .collect();

        assert_eq!(sidebar.scope_for("/api/world/chunks"), Some("/api/world/"));
        assert_eq!(sidebar.scope_for("/api/entity/player"), Some("/api/"));
        assert_eq!(sidebar.scope_for("/api"), Some("/api/"));
        assert_eq!(sidebar.scope_for("guide/events"), Some("/"));
    }

    #[test]
    fn test_scope_for_without_match() {
        let sidebar = guide_sidebar();

        assert_eq!(sidebar.scope_for("/art-packs/models"), None);
        assert_eq!(sidebar.scope_for("/guide/events"), Some("/guide/"));
    }

    #[test]
    fn test_visit_links_order_and_trail() {
        let site = SiteNav {
            nav: vec![NavEntry::leaf("Guide", "/guide/")],
            sidebar: guide_sidebar(),
            social_links: vec![SocialLink {
                icon: "github".to_owned(),
                link: "https://github.com/example/docs".to_owned(),
            }],
            ..Default::default()
        };

        let mut seen = Vec::new();
        site.visit_links(|link| seen.push((link.location(), link.link.to_owned())));

        assert_eq!(
            seen,
            vec![
                ("nav > Guide".to_owned(), "/guide/".to_owned()),
                (
                    "sidebar /guide/ > Plugin Guide > Overview".to_owned(),
                    "/guide/".to_owned()
                ),
                (
                    "sidebar /guide/ > 1. Plugin Basics > Manifest File".to_owned(),
                    "/guide/manifest".to_owned()
                ),
                (
                    "sidebar /guide/ > 1. Plugin Basics > Events & Listeners".to_owned(),
                    "/guide/events".to_owned()
                ),
                (
                    "social > github".to_owned(),
                    "https://github.com/example/docs".to_owned()
                ),
            ]
        );
    }

    #[test]
    fn test_site_depth_and_link_count() {
        let site = SiteNav {
            nav: vec![NavEntry::leaf("Home", "/")],
            sidebar: guide_sidebar(),
            ..Default::default()
        };

        assert_eq!(site.depth(), 2);
        assert_eq!(site.link_count(), 4);
    }

    #[test]
    fn test_empty_site_depth_is_zero() {
        assert_eq!(SiteNav::default().depth(), 0);
    }
}
