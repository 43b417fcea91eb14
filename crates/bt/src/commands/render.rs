//! `bt render` command implementation.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use bt_config::{CliSettings, Config};
use bt_template::{Template, UnknownDirective};
use clap::Args;
use serde_json::Value;

use crate::error::CliError;
use crate::fetch::JsonFetch;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Template text, e.g. "/api/user/{{ .id }}".
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub(crate) template: Option<String>,

    /// Read the template from a file.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// JSON document placeholders are resolved against (overrides config).
    #[arg(short, long, env = "BT_DATA")]
    pub(crate) data: Option<PathBuf>,

    /// Write the output to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Policy for unknown directives: error, passthrough or literal (overrides config).
    #[arg(long)]
    pub(crate) unknown_directive: Option<UnknownDirective>,

    /// Path to configuration file (default: auto-discover bt.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, template or data cannot be loaded,
    /// or if rendering fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            data_path: self.data.clone(),
            unknown_directive: self.unknown_directive,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let input = self.read_template()?;
        let data = load_data(config.data_resolved.path.as_deref())?;
        let template = config.build_template();

        match &self.output {
            Some(path) => {
                let mut writer = BufWriter::new(File::create(path)?);
                let written = render(&template, &input, &data, &mut writer)?;
                writer.flush()?;
                output.success(&format!("Wrote {written} bytes to {}", path.display()));
            }
            None => {
                let mut stdout = io::stdout().lock();
                render(&template, &input, &data, &mut stdout)?;
                stdout.flush()?;
            }
        }

        Ok(())
    }

    fn read_template(&self) -> Result<Vec<u8>, CliError> {
        match (&self.template, &self.file) {
            (Some(text), _) => Ok(text.clone().into_bytes()),
            (None, Some(path)) => Ok(fs::read(path)?),
            (None, None) => Err(CliError::Validation(
                "either a template or --file is required".to_owned(),
            )),
        }
    }
}

/// Load the JSON document, or `null` when no data file is configured.
fn load_data(path: Option<&Path>) -> Result<Value, CliError> {
    let Some(path) = path else {
        tracing::debug!("No data file configured, placeholders resolve to empty");
        return Ok(Value::Null);
    };
    let content = fs::read(path)?;
    Ok(serde_json::from_slice(&content)?)
}

fn render(
    template: &Template,
    input: &[u8],
    data: &Value,
    out: &mut dyn Write,
) -> Result<usize, CliError> {
    let written = template.execute(out, input, JsonFetch::new(data))?;
    tracing::debug!(bytes = written, "Rendered template");
    Ok(written)
}
