//! Navigation link-integrity validation.
//!
//! A single pass over the navigation tree resolves every internal link
//! against the [`ContentIndex`]. Links that match no content file or static
//! asset become [`DiagnosticKind::BrokenLink`]; content pages that no link
//! reaches (and no allow-list pattern covers) become
//! [`DiagnosticKind::OrphanPage`]. Static assets are never orphans.
//!
//! Diagnostics are advisory. Validation never fails, and the report is
//! sorted so that repeated runs over the same input are identical.

use std::collections::BTreeSet;
use std::fmt;

use glob::Pattern;
use serde::Serialize;

use crate::content::{ContentIndex, Resolved};
use crate::link::{LinkTarget, resolve_link};
use crate::nav::SiteNav;

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A navigation link has no corresponding content file.
    BrokenLink,
    /// A content file is never referenced by the navigation.
    OrphanPage,
}

impl DiagnosticKind {
    /// Stable identifier used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BrokenLink => "broken-link",
            Self::OrphanPage => "orphan-page",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Diagnostic {
    /// Finding category.
    pub kind: DiagnosticKind,
    /// Link as written (broken links) or content file path (orphan pages).
    pub path: String,
    /// Where the broken link was found, e.g. `sidebar /guide/ > Basics > Manifest`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Diagnostic {
    /// Create a broken link diagnostic.
    #[must_use]
    pub fn broken_link(path: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::BrokenLink,
            path: path.into(),
            location: Some(location.into()),
        }
    }

    /// Create an orphan page diagnostic.
    #[must_use]
    pub fn orphan_page(path: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::OrphanPage,
            path: path.into(),
            location: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.path)?;
        if let Some(location) = &self.location {
            write!(f, " ({location})")?;
        }
        Ok(())
    }
}

/// Validation result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Sorted, deduplicated findings.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of internal links checked.
    pub links_checked: usize,
    /// Number of content pages considered.
    pub pages_checked: usize,
}

impl Report {
    /// True if there are no findings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Findings of one kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    /// Number of findings of one kind.
    #[must_use]
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.of_kind(kind).count()
    }
}

/// Options for [`validate`].
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    allow_orphans: Vec<Pattern>,
}

impl ValidateOptions {
    /// Build options from orphan allow-list glob patterns.
    ///
    /// Patterns match content paths relative to the docs root (`404.md`,
    /// `drafts/**`).
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is not a valid glob.
    pub fn new<S: AsRef<str>>(allow_orphans: &[S]) -> Result<Self, glob::PatternError> {
        let allow_orphans = allow_orphans
            .iter()
            .map(|p| Pattern::new(p.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(Self { allow_orphans })
    }

    /// Build options from already compiled allow-list patterns.
    #[must_use]
    pub fn from_patterns(allow_orphans: Vec<Pattern>) -> Self {
        Self { allow_orphans }
    }

    fn is_allowed_orphan(&self, page: &str) -> bool {
        self.allow_orphans.iter().any(|p| p.matches(page))
    }
}

/// Check that every navigation link resolves and every page is linked.
///
/// Links in the navigation bar, all sidebars and the social links are
/// considered. External and anchor-only links are skipped.
#[must_use]
pub fn validate(site: &SiteNav, content: &ContentIndex, options: &ValidateOptions) -> Report {
    let mut diagnostics = BTreeSet::new();
    let mut referenced: BTreeSet<&str> = BTreeSet::new();
    let mut links_checked = 0;

    site.visit_links(|link| {
        let LinkTarget::Internal { path, candidates } = resolve_link(link.link, link.area.base())
        else {
            tracing::trace!(link = link.link, "Skipping non-internal link");
            return;
        };
        links_checked += 1;

        match content.resolve(&path, &candidates) {
            Some(Resolved::Page(page)) => {
                tracing::debug!(link = link.link, page, "Resolved link");
                referenced.insert(page);
            }
            Some(Resolved::Asset(asset)) => {
                tracing::debug!(link = link.link, asset, "Resolved link to static asset");
            }
            None => {
                tracing::debug!(link = link.link, %path, "Broken link");
                diagnostics.insert(Diagnostic::broken_link(link.link, link.location()));
            }
        }
    });

    for page in content.iter() {
        if !referenced.contains(page) && !options.is_allowed_orphan(page) {
            diagnostics.insert(Diagnostic::orphan_page(page));
        }
    }

    let report = Report {
        diagnostics: diagnostics.into_iter().collect(),
        links_checked,
        pages_checked: content.len(),
    };
    tracing::info!(
        links = report.links_checked,
        pages = report.pages_checked,
        broken = report.count(DiagnosticKind::BrokenLink),
        orphans = report.count(DiagnosticKind::OrphanPage),
        "Validated navigation"
    );
    report
}
