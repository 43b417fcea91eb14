//! CLI error types.

use bt_config::ConfigError;
use bt_template::ExecuteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid JSON data")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("{0}")]
    Validation(String),
}
