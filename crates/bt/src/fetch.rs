//! Placeholder resolution against a JSON document.
//!
//! Paths are dot-separated and start with `.`: `.` is the whole document,
//! `.user.name` a nested field, `.items.0` an array element.

use std::io::Write;

use bt_template::{BoxError, Fetch};
use serde_json::Value;

/// Invalid placeholder path.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PathError {
    #[error("path `{0}` must start with `.`")]
    MissingDot(String),

    #[error("path is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
}

/// [`Fetch`] reading values from a JSON document.
///
/// Strings are written raw, numbers and booleans as JSON text, arrays and
/// objects as compact JSON. `null` and missing paths write nothing.
pub(crate) struct JsonFetch<'a> {
    root: &'a Value,
}

impl<'a> JsonFetch<'a> {
    pub(crate) fn new(root: &'a Value) -> Self {
        Self { root }
    }
}

impl Fetch for JsonFetch<'_> {
    fn fetch(&mut self, out: &mut dyn Write, path: &[u8]) -> Result<(), BoxError> {
        let path = std::str::from_utf8(path).map_err(PathError::from)?;
        let Some(value) = lookup(self.root, path)? else {
            tracing::debug!(path, "Path not found, writing nothing");
            return Ok(());
        };
        write_value(out, value)
    }
}

/// Find the value at `path`, or `None` if any segment is missing.
fn lookup<'v>(root: &'v Value, path: &str) -> Result<Option<&'v Value>, PathError> {
    let rest = path
        .strip_prefix('.')
        .ok_or_else(|| PathError::MissingDot(path.to_owned()))?;
    if rest.is_empty() {
        return Ok(Some(root));
    }

    let mut current = root;
    for segment in rest.split('.') {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

fn write_value(out: &mut dyn Write, value: &Value) -> Result<(), BoxError> {
    match value {
        Value::Null => {}
        Value::String(s) => out.write_all(s.as_bytes())?,
        Value::Bool(b) => write!(out, "{b}")?,
        Value::Number(n) => write!(out, "{n}")?,
        Value::Array(_) | Value::Object(_) => serde_json::to_writer(out, value)?,
    }
    Ok(())
}
