//! Loading navigation data from JSON, YAML or TOML files.
//!
//! The document can either hold the navigation keys at its top level or
//! nest them under `themeConfig`, the shape the site generator's config
//! object uses:
//!
//! ```json
//! {
//!   "title": "Developer Docs",
//!   "themeConfig": {
//!     "nav": [{ "text": "Guide", "link": "/guide/" }],
//!     "sidebar": { "/guide/": [{ "text": "Overview", "link": "/guide/" }] }
//!   }
//! }
//! ```
//!
//! Unknown keys (`search`, `footer`, `outline`, ...) are ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::nav::{NavEntry, SidebarMap, SiteNav, SocialLink};

/// Supported navigation file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavFormat {
    /// JSON (`.json`).
    Json,
    /// YAML (`.yaml`, `.yml`).
    Yaml,
    /// TOML (`.toml`).
    Toml,
}

impl NavFormat {
    /// Detect the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Error returned when loading navigation data fails.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Navigation file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// File extension is not one of the supported formats.
    #[error("Unsupported navigation file format: {} (expected .json, .yaml, .yml or .toml)", .0.display())]
    UnsupportedFormat(PathBuf),
    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parse error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Navigation keys, at either nesting level.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawNav {
    nav: Option<Vec<NavEntry>>,
    sidebar: Option<SidebarMap>,
    #[serde(alias = "socialLinks")]
    social_links: Option<Vec<SocialLink>>,
}

/// Raw navigation document as parsed from disk.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDocument {
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "themeConfig", alias = "theme_config")]
    theme_config: Option<RawNav>,
    nav: Option<Vec<NavEntry>>,
    sidebar: Option<SidebarMap>,
    #[serde(alias = "socialLinks")]
    social_links: Option<Vec<SocialLink>>,
}

impl RawDocument {
    /// Merge both levels; keys under `themeConfig` win.
    fn into_site_nav(self) -> SiteNav {
        let theme = self.theme_config.unwrap_or_default();
        SiteNav {
            title: self.title,
            description: self.description,
            nav: theme.nav.or(self.nav).unwrap_or_default(),
            sidebar: theme.sidebar.or(self.sidebar).unwrap_or_default(),
            social_links: theme
                .social_links
                .or(self.social_links)
                .unwrap_or_default(),
        }
    }
}

impl SiteNav {
    /// Load navigation data from a file, picking the format by extension.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the extension is unsupported, the file cannot
    /// be read, or its content does not parse.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let format =
            NavFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.into()))?;
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let site = Self::from_str_as(&content, format)?;
        tracing::debug!(
            path = %path.display(),
            sidebars = site.sidebar.len(),
            links = site.link_count(),
            "Loaded navigation"
        );
        Ok(site)
    }

    /// Parse navigation data from a string in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the content does not parse.
    pub fn from_str_as(content: &str, format: NavFormat) -> Result<Self, LoadError> {
        let raw: RawDocument = match format {
            NavFormat::Json => serde_json::from_str(content)?,
            NavFormat::Yaml => {
                if content.trim().is_empty() {
                    RawDocument::default()
                } else {
                    serde_yaml::from_str(content)?
                }
            }
            NavFormat::Toml => toml::from_str(content)?,
        };
        Ok(raw.into_site_nav())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            NavFormat::from_path(Path::new("nav.json")),
            Some(NavFormat::Json)
        );
        assert_eq!(
            NavFormat::from_path(Path::new("nav.YML")),
            Some(NavFormat::Yaml)
        );
        assert_eq!(
            NavFormat::from_path(Path::new("nav.yaml")),
            Some(NavFormat::Yaml)
        );
        assert_eq!(
            NavFormat::from_path(Path::new("nav.toml")),
            Some(NavFormat::Toml)
        );
        assert_eq!(NavFormat::from_path(Path::new("config.ts")), None);
        assert_eq!(NavFormat::from_path(Path::new("nav")), None);
    }

    #[test]
    fn test_parse_json_theme_config() {
        let json = r#"{
            "title": "Developer Docs",
            "description": "Server plugins and packs",
            "themeConfig": {
                "logo": "/logo.svg",
                "nav": [{ "text": "Guide", "link": "/guide/" }],
                "sidebar": {
                    "/guide/": [
                        {
                            "text": "1. Plugin Basics",
                            "collapsed": false,
                            "items": [{ "text": "Manifest File", "link": "/guide/manifest" }]
                        }
                    ]
                },
                "socialLinks": [{ "icon": "github", "link": "https://github.com/example/docs" }],
                "search": { "provider": "local" },
                "outline": { "level": [2, 3] }
            },
            "markdown": { "lineNumbers": true }
        }"#;

        let site = SiteNav::from_str_as(json, NavFormat::Json).unwrap();

        assert_eq!(site.title.as_deref(), Some("Developer Docs"));
        assert_eq!(site.nav, vec![NavEntry::leaf("Guide", "/guide/")]);
        assert_eq!(
            site.sidebar.get("/guide/").unwrap(),
            &[NavEntry::group(
                "1. Plugin Basics",
                vec![NavEntry::leaf("Manifest File", "/guide/manifest")]
            )
            .collapsed(false)]
        );
        assert_eq!(site.social_links.len(), 1);
        assert_eq!(site.social_links[0].icon, "github");
    }

    #[test]
    fn test_parse_flat_yaml() {
        let yaml = r#"
nav:
  - text: Home
    link: /
sidebar:
  /art-packs/:
    - text: Art Packs
      items:
        - text: Overview
          link: /art-packs/
        - text: Custom Models
          link: /art-packs/models
"#;

        let site = SiteNav::from_str_as(yaml, NavFormat::Yaml).unwrap();

        assert_eq!(site.nav, vec![NavEntry::leaf("Home", "/")]);
        let sections = site.sidebar.get("/art-packs/").unwrap();
        assert_eq!(sections[0].items.len(), 2);
        assert_eq!(sections[0].items[1].link.as_deref(), Some("/art-packs/models"));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
title = "Docs"

[[nav]]
text = "API Reference"
link = "/api/"

[[sidebar."/api/"]]
text = "World API"
collapsed = false

[[sidebar."/api/".items]]
text = "Chunks"
link = "/api/world/chunks"
"#;

        let site = SiteNav::from_str_as(toml, NavFormat::Toml).unwrap();

        assert_eq!(site.title.as_deref(), Some("Docs"));
        assert_eq!(site.nav[0].link.as_deref(), Some("/api/"));
        let sections = site.sidebar.get("/api/").unwrap();
        assert_eq!(sections[0].collapsed, Some(false));
        assert_eq!(sections[0].items[0].text, "Chunks");
    }

    #[test]
    fn test_theme_config_wins_over_top_level() {
        let json = r#"{
            "nav": [{ "text": "Old", "link": "/old" }],
            "themeConfig": { "nav": [{ "text": "New", "link": "/new" }] }
        }"#;

        let site = SiteNav::from_str_as(json, NavFormat::Json).unwrap();

        assert_eq!(site.nav, vec![NavEntry::leaf("New", "/new")]);
    }

    #[test]
    fn test_empty_yaml_is_empty_site() {
        let site = SiteNav::from_str_as("  \n", NavFormat::Yaml).unwrap();

        assert_eq!(site, SiteNav::default());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = SiteNav::from_str_as("{ nav: ", NavFormat::Json).unwrap_err();

        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_entry_without_text_is_parse_error() {
        let err = SiteNav::from_str_as(r#"{"nav": [{"link": "/"}]}"#, NavFormat::Json).unwrap_err();

        assert!(err.to_string().contains("text"));
    }

    #[test]
    fn test_from_path_unsupported_extension() {
        let err = SiteNav::from_path(Path::new("docs/.vitepress/config.ts")).unwrap_err();

        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SiteNav::from_path(Path::new("/nonexistent/nav.json")).unwrap_err();

        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nav.json");
        std::fs::write(&path, r#"{"nav": [{"text": "Home", "link": "/"}]}"#).unwrap();

        let site = SiteNav::from_path(&path).unwrap();

        assert_eq!(site.nav, vec![NavEntry::leaf("Home", "/")]);
    }
}
