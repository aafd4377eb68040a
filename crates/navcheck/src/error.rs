//! CLI error types.

use navcheck_config::ConfigError;
use navcheck_fs::ScanError;
use navcheck_site::LoadError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Scan(#[from] ScanError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Navigation check failed: {broken} broken link(s), {orphans} orphan page(s)")]
    CheckFailed { broken: usize, orphans: usize },
}
