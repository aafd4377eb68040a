//! Link classification and resolution to content files.
//!
//! Navigation links use the site generator's routing rules:
//! - `/guide/` maps to `guide/index.md`
//! - `/guide/manifest` maps to `guide/manifest.md` (or `guide/manifest/index.md`)
//! - `/guide/manifest.html` and `/guide/manifest.md` map to `guide/manifest.md`
//!
//! Query strings and fragments are ignored, and percent-encoded paths are
//! decoded before lookup. Links without a leading slash are resolved against
//! a base directory.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// Classified navigation link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// Link with a URI scheme (`https:`, `mailto:`) or protocol-relative (`//host`).
    External,
    /// Fragment-only link pointing into the current page.
    Anchor,
    /// Link to a page of this site.
    Internal {
        /// Decoded, normalized URL path with a leading slash, query and
        /// fragment removed.
        path: String,
        /// Content files (relative to the docs root) that would serve the path,
        /// in lookup order.
        candidates: Vec<String>,
    },
}

/// Classify `link` and compute its content file candidates.
///
/// `base` is the URL directory relative links are joined onto, typically the
/// sidebar prefix (`/guide/`) or `/` for the navigation bar. A base without a
/// trailing slash (`/guide`) is still treated as a directory.
#[must_use]
pub fn resolve_link(link: &str, base: &str) -> LinkTarget {
    let link = link.trim();

    if is_external(link) {
        return LinkTarget::External;
    }
    if link.starts_with('#') {
        return LinkTarget::Anchor;
    }

    let without_fragment = link.split_once('#').map_or(link, |(path, _)| path);
    let raw_path = without_fragment
        .split_once('?')
        .map_or(without_fragment, |(path, _)| path);
    let decoded = decode_path(raw_path);

    let joined = if decoded.starts_with('/') {
        decoded.into_owned()
    } else {
        join_base(base, &decoded)
    };
    let path = normalize_segments(&joined);
    let candidates = content_candidates(&path);

    LinkTarget::Internal { path, candidates }
}

/// True for links the checker never follows.
fn is_external(link: &str) -> bool {
    if link.starts_with("//") {
        return true;
    }
    // A scheme is letters/digits/`+-.` before the first `:`, starting with a letter.
    let Some((scheme, _)) = link.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Percent-decode a URL path, keeping it as written if the bytes are not UTF-8.
fn decode_path(raw_path: &str) -> Cow<'_, str> {
    percent_decode_str(raw_path)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(raw_path))
}

/// Join a relative path onto the base directory.
fn join_base(base: &str, relative: &str) -> String {
    let dir = base.trim_matches('/');
    if dir.is_empty() {
        format!("/{relative}")
    } else {
        format!("/{dir}/{relative}")
    }
}

/// Collapse `.`, `..` and repeated slashes, keeping a trailing slash.
///
/// `..` above the root stays at the root.
fn normalize_segments(path: &str) -> String {
    let trailing_slash = path.ends_with('/') || path.ends_with("/.") || path.ends_with("/..");
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut normalized = String::from("/");
    normalized.push_str(&segments.join("/"));
    if trailing_slash && !segments.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// Content files that would serve a normalized URL path.
fn content_candidates(path: &str) -> Vec<String> {
    let relative = path.trim_start_matches('/');

    if relative.is_empty() {
        return vec!["index.md".to_owned()];
    }
    if relative.ends_with('/') {
        return vec![format!("{relative}index.md")];
    }
    if relative.ends_with(".md") {
        return vec![relative.to_owned()];
    }
    if let Some(stem) = relative.strip_suffix(".html") {
        return vec![format!("{stem}.md")];
    }
    vec![format!("{relative}.md"), format!("{relative}/index.md")]
}
