//! `navcheck tree` command implementation.

use clap::Args;
use navcheck_config::CliSettings;
use navcheck_site::{ContentIndex, LinkTarget, NavEntry, SiteNav, resolve_link};

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only show the sidebar used for this prefix or page (e.g. /guide/ or /guide/events).
    #[arg(long)]
    scope: Option<String>,
}

/// One rendered tree line.
#[derive(Debug, PartialEq, Eq)]
struct TreeLine {
    text: String,
    broken: bool,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or `--scope` matches no sidebar.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let loaded = self.source.load(CliSettings::default())?;
        let site = &loaded.site;

        let prefixes: Vec<&str> = match self.scope.as_deref() {
            Some(scope) => {
                let prefix = site.sidebar.scope_for(scope).ok_or_else(|| {
                    CliError::Validation(format!("No sidebar configured for {scope}"))
                })?;
                vec![prefix]
            }
            None => site.sidebar.iter().map(|(prefix, _)| prefix).collect(),
        };

        if self.scope.is_none() && !site.nav.is_empty() {
            output.highlight("nav");
            print_lines(&output, &render_entries(&site.nav, "/", &loaded.content));
        }
        for prefix in prefixes {
            let sections = site.sidebar.get(prefix).unwrap_or_default();
            output.highlight(&format!("sidebar {prefix}"));
            print_lines(&output, &render_entries(sections, prefix, &loaded.content));
        }

        output.info(&stats_line(site));
        Ok(())
    }
}

fn print_lines(output: &Output, lines: &[TreeLine]) {
    for line in lines {
        if line.broken {
            output.error(&line.text);
        } else {
            output.info(&line.text);
        }
    }
}

/// Render entries as indented lines, marking collapsed groups and broken links.
fn render_entries(entries: &[NavEntry], base: &str, content: &ContentIndex) -> Vec<TreeLine> {
    fn walk(
        entries: &[NavEntry],
        depth: usize,
        base: &str,
        content: &ContentIndex,
        lines: &mut Vec<TreeLine>,
    ) {
        for entry in entries {
            let marker = match (entry.items.is_empty(), entry.collapsed) {
                (true, _) => "-",
                (false, Some(true)) => "+",
                (false, _) => "v",
            };
            let mut text = format!("{}{marker} {}", "  ".repeat(depth), entry.text);
            let mut broken = false;
            if let Some(link) = &entry.link {
                text.push_str(&format!(" -> {link}"));
                if let LinkTarget::Internal { path, candidates } = resolve_link(link, base)
                    && content.resolve(&path, &candidates).is_none()
                {
                    text.push_str(" [missing]");
                    broken = true;
                }
            }
            lines.push(TreeLine { text, broken });
            walk(&entry.items, depth + 1, base, content, lines);
        }
    }

    let mut lines = Vec::new();
    walk(entries, 1, base, content, &mut lines);
    lines
}

/// Summary of the navigation shape.
fn stats_line(site: &SiteNav) -> String {
    format!(
        "{} sidebar(s), {} linked entries, max depth {}",
        site.sidebar.len(),
        site.link_count(),
        site.depth()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use navcheck_site::SidebarMap;
    use pretty_assertions::assert_eq;

    fn line(text: &str, broken: bool) -> TreeLine {
        TreeLine {
            text: text.to_owned(),
            broken,
        }
    }

    #[test]
    fn test_render_entries_marks_groups_and_missing_links() {
        let entries = vec![
            NavEntry::group(
                "1. Plugin Basics",
                vec![
                    NavEntry::leaf("Manifest File", "/guide/manifest"),
                    NavEntry::leaf("Commands", "/guide/commands"),
                ],
            )
            .collapsed(false),
            NavEntry::group(
                "Best Practices",
                vec![NavEntry::leaf("Code Style", "/guide/best-practices")],
            )
            .collapsed(true),
        ];
        let content: ContentIndex = ["guide/manifest.md", "guide/best-practices.md"]
            .into_iter()
            .collect();

        let lines = render_entries(&entries, "/guide/", &content);

        assert_eq!(
            lines,
            vec![
                line("  v 1. Plugin Basics", false),
                line("    - Manifest File -> /guide/manifest", false),
                line("    - Commands -> /guide/commands [missing]", true),
                line("  + Best Practices", false),
                line("    - Code Style -> /guide/best-practices", false),
            ]
        );
    }

    #[test]
    fn test_render_entries_external_link_is_not_missing() {
        let entries = vec![NavEntry::leaf("GitHub", "https://github.com/example/docs")];

        let lines = render_entries(&entries, "/", &ContentIndex::new());

        assert_eq!(
            lines,
            vec![line("  - GitHub -> https://github.com/example/docs", false)]
        );
    }

    #[test]
    fn test_render_entries_static_asset_is_not_missing() {
        let entries = vec![NavEntry::leaf("Javadoc", "/javadoc/index.html")];
        let mut content = ContentIndex::new();
        content.insert_asset("javadoc/index.html");

        let lines = render_entries(&entries, "/", &content);

        assert_eq!(
            lines,
            vec![line("  - Javadoc -> /javadoc/index.html", false)]
        );
    }

    #[test]
    fn test_stats_line() {
        let mut sidebar = SidebarMap::new();
        sidebar.insert(
            "/art-packs/",
            vec![NavEntry::group(
                "Art Packs",
                vec![
                    NavEntry::leaf("Overview", "/art-packs/"),
                    NavEntry::leaf("Animations", "/art-packs/animations"),
                ],
            )],
        );
        let site = SiteNav {
            nav: vec![NavEntry::leaf("Art Packs", "/art-packs/")],
            sidebar,
            ..Default::default()
        };

        assert_eq!(
            stats_line(&site),
            "1 sidebar(s), 3 linked entries, max depth 2"
        );
    }
}
