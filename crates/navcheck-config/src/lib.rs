//! Configuration management for navcheck.
//!
//! Parses `navcheck.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.nav_file`
//! - `docs.exclude`
//! - `check.allow_orphans`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override navigation file.
    pub nav_file: Option<PathBuf>,
    /// Extra orphan allow-list patterns (appended to the configured ones).
    pub allow_orphans: Vec<String>,
    /// Override whether orphan pages fail the check.
    pub deny_orphans: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navcheck.toml";

/// Default docs source directory, relative to the config directory.
const DEFAULT_SOURCE_DIR: &str = "docs";

/// Default navigation file, relative to the docs source directory.
const DEFAULT_NAV_FILE: &str = ".vitepress/nav.json";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Check behaviour.
    pub check: CheckConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    nav_file: Option<String>,
    exclude: Option<Vec<String>>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// Navigation file (JSON, YAML or TOML).
    pub nav_file: PathBuf,
    /// Glob patterns (relative to `source_dir`) skipped while scanning.
    pub exclude: Vec<String>,
}

/// Check configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Glob patterns for pages that may be missing from the navigation.
    pub allow_orphans: Vec<String>,
    /// Whether orphan pages make the check fail.
    pub deny_orphans: bool,
    /// Whether broken links make the check fail.
    pub fail_on_broken_links: bool,

    /// `allow_orphans` compiled by [`Config::validate`].
    #[serde(skip)]
    pub allow_orphan_patterns: Vec<glob::Pattern>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            allow_orphans: Vec::new(),
            deny_orphans: false,
            fail_on_broken_links: true,
            allow_orphan_patterns: Vec::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Compile every entry as a glob pattern.
fn compile_globs(patterns: &[String], field: &str) -> Result<Vec<glob::Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            glob::Pattern::new(pattern).map_err(|e| {
                ConfigError::Validation(format!("{field}: invalid pattern {pattern:?}: {e}"))
            })
        })
        .collect()
}

/// Default exclude patterns for the content scan.
fn default_excludes() -> Vec<String> {
    vec!["node_modules/**".to_owned()]
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navcheck.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    ///
    /// Overriding the source directory also moves the default navigation
    /// file, unless the config file named one explicitly.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
            if self.docs.nav_file.is_none() {
                self.docs_resolved.nav_file = source_dir.join(DEFAULT_NAV_FILE);
            }
        }
        if let Some(nav_file) = &settings.nav_file {
            self.docs_resolved.nav_file.clone_from(nav_file);
        }
        self.check
            .allow_orphans
            .extend(settings.allow_orphans.iter().cloned());
        if let Some(deny_orphans) = settings.deny_orphans {
            self.check.deny_orphans = deny_orphans;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let source_dir = base.join(DEFAULT_SOURCE_DIR);
        Self {
            docs: DocsConfigRaw::default(),
            check: CheckConfig::default(),
            docs_resolved: DocsConfig {
                nav_file: source_dir.join(DEFAULT_NAV_FILE),
                source_dir,
                exclude: default_excludes(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    /// On success, `check.allow_orphan_patterns` holds the compiled
    /// allow-list.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        require_non_empty(
            &self.docs_resolved.source_dir.to_string_lossy(),
            "docs.source_dir",
        )?;
        require_non_empty(
            &self.docs_resolved.nav_file.to_string_lossy(),
            "docs.nav_file",
        )?;
        compile_globs(&self.docs_resolved.exclude, "docs.exclude")?;
        self.check.allow_orphan_patterns =
            compile_globs(&self.check.allow_orphans, "check.allow_orphans")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref source_dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(source_dir, "docs.source_dir")?);
        }
        if let Some(ref nav_file) = self.docs.nav_file {
            self.docs.nav_file = Some(expand::expand_env(nav_file, "docs.nav_file")?);
        }
        if let Some(ref exclude) = self.docs.exclude {
            self.docs.exclude = Some(expand::expand_env_all(exclude, "docs.exclude")?);
        }
        self.check.allow_orphans =
            expand::expand_env_all(&self.check.allow_orphans, "check.allow_orphans")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    ///
    /// An empty `source_dir` is kept empty so validation can report it.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = match self.docs.source_dir.as_deref() {
            Some("") => PathBuf::new(),
            Some(dir) => config_dir.join(dir),
            None => config_dir.join(DEFAULT_SOURCE_DIR),
        };
        let nav_file = match self.docs.nav_file.as_deref() {
            Some("") => PathBuf::new(),
            Some(file) => config_dir.join(file),
            None => source_dir.join(DEFAULT_NAV_FILE),
        };

        self.docs_resolved = DocsConfig {
            source_dir,
            nav_file,
            exclude: self.docs.exclude.clone().unwrap_or_else(default_excludes),
        };
    }
}
