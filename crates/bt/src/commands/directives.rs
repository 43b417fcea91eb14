//! `bt directives` command implementation.

use std::path::PathBuf;

use bt_config::Config;
use bt_template::builtin;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the directives command.
#[derive(Args)]
pub(crate) struct DirectivesArgs {
    /// Path to configuration file (default: auto-discover bt.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl DirectivesArgs {
    /// Execute the directives command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        output.highlight("Built-in directives:");
        for line in listing(&config) {
            output.info(&line);
        }
        output.info(&format!(
            "Unknown directives: {}",
            config.render.unknown_directive
        ));

        Ok(())
    }
}

/// One line per built-in, marking those enabled by `config`.
fn listing(config: &Config) -> Vec<String> {
    builtin::NAMES
        .iter()
        .map(|name| {
            let marker = if config.directives.builtin.iter().any(|n| n == name) {
                '*'
            } else {
                ' '
            };
            format!("  {marker} {name:<12} {}", describe(name))
        })
        .collect()
}

fn describe(name: &str) -> &'static str {
    match name {
        builtin::TO_LOWER => "lowercase the fetched value",
        builtin::TO_UPPER => "uppercase the fetched value",
        builtin::TRIM => "strip surrounding whitespace",
        builtin::PATH_ESCAPE => "percent-encode for use as a URL path segment",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_listing_marks_enabled() {
        let mut config = Config::default();
        config.directives.builtin = vec!["trim".to_owned()];

        let lines = listing(&config);

        assert_eq!(lines.len(), builtin::NAMES.len());
        assert!(lines.iter().any(|l| l.starts_with("  * trim")));
        assert!(lines.iter().any(|l| l.starts_with("    toLower")));
    }

    #[test]
    fn test_listing_default_enables_all() {
        let lines = listing(&Config::default());
        assert!(lines.iter().all(|l| l.starts_with("  * ")));
    }

    #[test]
    fn test_every_builtin_described() {
        for name in builtin::NAMES {
            assert!(!describe(name).is_empty(), "{name} has no description");
        }
    }
}
