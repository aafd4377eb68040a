//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod tree;

pub(crate) use check::CheckArgs;
pub(crate) use tree::TreeArgs;

use std::path::PathBuf;

use clap::Args;
use navcheck_config::{CliSettings, Config};
use navcheck_fs::Scanner;
use navcheck_site::{ContentIndex, SiteNav};

use crate::error::CliError;

/// Arguments shared by every command that reads a site.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover navcheck.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long, env = "NAVCHECK_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Navigation file: .json, .yaml/.yml or .toml (overrides config).
    #[arg(short, long)]
    nav_file: Option<PathBuf>,

    /// Enable verbose output (log every resolved link).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything a command needs about the site being checked.
pub(crate) struct LoadedSite {
    pub config: Config,
    pub site: SiteNav,
    pub content: ContentIndex,
}

impl SourceArgs {
    /// Load configuration, navigation data and the content listing.
    ///
    /// `settings` carries command-specific overrides; the path overrides
    /// from these arguments are filled in here.
    pub(crate) fn load(&self, mut settings: CliSettings) -> Result<LoadedSite, CliError> {
        settings.source_dir.clone_from(&self.source_dir);
        settings.nav_file.clone_from(&self.nav_file);

        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        tracing::info!(
            source_dir = %config.docs_resolved.source_dir.display(),
            nav_file = %config.docs_resolved.nav_file.display(),
            "Loading site"
        );

        let site = SiteNav::from_path(&config.docs_resolved.nav_file)?;
        let content = Scanner::new(config.docs_resolved.source_dir.clone())
            .with_excludes(config.docs_resolved.exclude.as_slice())?
            .scan()?;

        Ok(LoadedSite {
            config,
            site,
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navcheck_site::{Diagnostic, ValidateOptions, validate};
    use pretty_assertions::assert_eq;
    use std::fs;

    const NAV_JSON: &str = r#"{
        "title": "Developer Docs",
        "themeConfig": {
            "nav": [
                { "text": "Guide", "link": "/guide/" },
                { "text": "Javadoc", "link": "/javadoc/index.html" }
            ],
            "sidebar": {
                "/guide/": [
                    { "text": "Plugin Guide", "items": [{ "text": "Overview", "link": "/guide/" }] },
                    {
                        "text": "1. Plugin Basics",
                        "collapsed": false,
                        "items": [
                            { "text": "Manifest File", "link": "/guide/manifest" },
                            { "text": "Commands", "link": "/guide/commands" }
                        ]
                    }
                ]
            },
            "socialLinks": [{ "icon": "github", "link": "https://github.com/example/docs" }]
        }
    }"#;

    fn write_site(root: &std::path::Path) {
        let guide = root.join("docs/guide");
        fs::create_dir_all(&guide).unwrap();
        fs::create_dir_all(root.join("docs/.vitepress")).unwrap();
        fs::create_dir_all(root.join("docs/public")).unwrap();
        fs::write(root.join("docs/.vitepress/nav.json"), NAV_JSON).unwrap();
        fs::write(guide.join("index.md"), "# Guide").unwrap();
        fs::write(guide.join("manifest.md"), "# Manifest").unwrap();
        fs::write(guide.join("legacy.md"), "# Legacy").unwrap();
        fs::write(root.join("docs/404.md"), "# Not found").unwrap();
        fs::write(root.join("docs/public/readme.md"), "# Assets").unwrap();
        fs::create_dir_all(root.join("docs/public/javadoc")).unwrap();
        fs::write(root.join("docs/public/javadoc/index.html"), "<html></html>").unwrap();
        fs::write(
            root.join("navcheck.toml"),
            "[check]\nallow_orphans = [\"404.md\"]\n",
        )
        .unwrap();
    }

    #[test]
    fn test_load_and_validate_site() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());
        let args = SourceArgs {
            config: Some(dir.path().join("navcheck.toml")),
            source_dir: None,
            nav_file: None,
            verbose: false,
        };

        let loaded = args.load(CliSettings::default()).unwrap();
        let options =
            ValidateOptions::from_patterns(loaded.config.check.allow_orphan_patterns.clone());
        let report = validate(&loaded.site, &loaded.content, &options);

        assert_eq!(
            loaded.content.iter().collect::<Vec<_>>(),
            vec![
                "404.md",
                "guide/index.md",
                "guide/legacy.md",
                "guide/manifest.md"
            ]
        );
        assert_eq!(
            loaded.content.assets().collect::<Vec<_>>(),
            vec!["javadoc/index.html", "readme.md"]
        );
        assert_eq!(
            report.diagnostics,
            vec![
                Diagnostic::broken_link(
                    "/guide/commands",
                    "sidebar /guide/ > 1. Plugin Basics > Commands"
                ),
                Diagnostic::orphan_page("guide/legacy.md"),
            ]
        );
    }

    #[test]
    fn test_load_missing_nav_file() {
        let dir = tempfile::tempdir().unwrap();
        write_site(dir.path());
        let args = SourceArgs {
            config: Some(dir.path().join("navcheck.toml")),
            source_dir: None,
            nav_file: Some(dir.path().join("missing.yaml")),
            verbose: false,
        };

        let result = args.load(CliSettings::default());

        assert!(matches!(result, Err(CliError::Load(_))));
    }
}
