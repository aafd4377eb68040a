//! Navigation data model and link-integrity validation for navcheck.
//!
//! This crate provides:
//! - [`SiteNav`], [`NavEntry`] and [`SidebarMap`]: the navigation tree of a
//!   documentation site, loadable from JSON, YAML or TOML
//! - [`resolve_link`]: mapping of navigation links to content files
//! - [`validate`]: broken link and orphan page detection
//!
//! # Quick Start
//!
//! ```
//! use navcheck_site::{ContentIndex, NavEntry, SidebarMap, SiteNav, ValidateOptions, validate};
//!
//! let mut sidebar = SidebarMap::new();
//! sidebar.insert("/guide/", vec![NavEntry::leaf("Manifest File", "/guide/manifest")]);
//! let site = SiteNav { sidebar, ..Default::default() };
//!
//! let content: ContentIndex = ["/guide/manifest.md"].into_iter().collect();
//! let report = validate(&site, &content, &ValidateOptions::default());
//! assert!(report.is_clean());
//! ```

mod content;
mod link;
mod loader;
mod nav;
mod validate;

pub use content::{ContentIndex, Resolved};
pub use link::{LinkTarget, resolve_link};
pub use loader::{LoadError, NavFormat};
pub use nav::{LinkSite, NavArea, NavEntry, SidebarMap, SiteNav, SocialLink};
pub use validate::{Diagnostic, DiagnosticKind, Report, ValidateOptions, validate};
