//! Configuration management for bt.
//!
//! Parses `bt.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [render]
//! unknown_directive = "error"   # error | passthrough | literal
//!
//! [directives]
//! builtin = ["toLower", "toUpper", "trim", "pathEscape"]
//!
//! [data]
//! path = "${BT_DATA:-data.json}"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `data.path` supports `${VAR}` and `${VAR:-default}`.

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use bt_template::{Template, UnknownDirective, builtin};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the JSON data file.
    pub data_path: Option<PathBuf>,
    /// Override the unknown-directive policy.
    pub unknown_directive: Option<UnknownDirective>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "bt.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Directive selection.
    pub directives: DirectivesConfig,
    /// Data source configuration (path is a relative string from TOML).
    data: DataConfigRaw,

    /// Resolved data configuration (set after loading).
    #[serde(skip)]
    pub data_resolved: DataConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// What to do with placeholders naming an unregistered directive.
    pub unknown_directive: UnknownDirective,
}

/// Directive selection.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DirectivesConfig {
    /// Built-in directives to register.
    pub builtin: Vec<String>,
}

impl Default for DirectivesConfig {
    fn default() -> Self {
        Self {
            builtin: builtin::NAMES.iter().map(|&name| name.to_owned()).collect(),
        }
    }
}

/// Raw data configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DataConfigRaw {
    path: Option<String>,
}

/// Resolved data configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DataConfig {
    /// JSON document placeholders are resolved against.
    pub path: Option<PathBuf>,
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
        /// Config field path (e.g., "`data.path`").
        field: String,
        /// Error message (e.g., "${`BT_DATA`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `bt.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
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
            tracing::debug!(path = %discovered.display(), "Discovered config file");
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Build the template described by this configuration.
    ///
    /// Registers the selected built-in directives and applies the
    /// unknown-directive policy. Names are validated on load; unknown names
    /// in a hand-built config are skipped.
    #[must_use]
    pub fn build_template(&self) -> Template {
        Template::builder()
            .directives(self.directives.builtin.iter().filter_map(|name| builtin::by_name(name)))
            .unknown_directive(self.render.unknown_directive)
            .build()
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_directives()
    }

    /// Every selected directive must be a known built-in, listed once.
    fn validate_directives(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for name in &self.directives.builtin {
            if builtin::by_name(name).is_none() {
                return Err(ConfigError::Validation(format!(
                    "directives.builtin: unknown directive `{name}` (available: {})",
                    builtin::NAMES.join(", ")
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "directives.builtin: `{name}` listed more than once"
                )));
            }
        }
        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(data_path) = &settings.data_path {
            self.data_resolved.path = Some(data_path.clone());
        }
        if let Some(policy) = settings.unknown_directive {
            self.render.unknown_directive = policy;
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

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.data.path {
            self.data.path = Some(expand::expand_env(path, "data.path")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.data_resolved = DataConfig {
            path: self.data.path.as_deref().map(|p| config_dir.join(p)),
        };
    }
}
