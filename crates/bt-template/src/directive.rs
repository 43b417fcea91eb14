//! Directive definitions and the immutable directive registry.
//!
//! A directive transforms the value fetched for a placeholder path:
//! `{{ toLower .name }}` fetches `.name` and hands the bytes to `toLower`.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::BoxError;

/// Transformation applied to a fetched value.
///
/// Directives are shared by every execution of a [`Template`](crate::Template),
/// possibly across threads, so they must be `Send + Sync` and hold no
/// unsynchronized mutable state.
///
/// Any `Fn(&mut dyn Write, &[u8]) -> Result<(), BoxError> + Send + Sync` is a
/// `Directive`.
pub trait Directive: Send + Sync {
    /// Write the transformed form of `arg` to `out`.
    fn resolve(&self, out: &mut dyn Write, arg: &[u8]) -> Result<(), BoxError>;
}

impl<F> Directive for F
where
    F: Fn(&mut dyn Write, &[u8]) -> Result<(), BoxError> + Send + Sync,
{
    fn resolve(&self, out: &mut dyn Write, arg: &[u8]) -> Result<(), BoxError> {
        self(out, arg)
    }
}

/// A named directive, registered once when a template is built.
///
/// Names are matched byte for byte, case-sensitively.
pub struct DirectiveDefinition {
    name: Box<[u8]>,
    directive: Box<dyn Directive>,
}

impl DirectiveDefinition {
    /// Define a directive from a closure.
    ///
    /// ```
    /// use std::io::Write;
    /// use bt_template::DirectiveDefinition;
    ///
    /// let reverse = DirectiveDefinition::new("reverse", |out, arg| {
    ///     let mut bytes = arg.to_vec();
    ///     bytes.reverse();
    ///     out.write_all(&bytes)?;
    ///     Ok(())
    /// });
    /// assert_eq!(reverse.name(), b"reverse");
    /// ```
    pub fn new<F>(name: impl Into<Vec<u8>>, resolve: F) -> Self
    where
        F: Fn(&mut dyn Write, &[u8]) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self::from_directive(name, resolve)
    }

    /// Define a directive from any [`Directive`] implementation.
    pub fn from_directive<D: Directive + 'static>(name: impl Into<Vec<u8>>, directive: D) -> Self {
        Self {
            name: name.into().into_boxed_slice(),
            directive: Box::new(directive),
        }
    }

    /// Directive name.
    #[must_use]
    pub fn name(&self) -> &[u8] {
        &self.name
    }
}

impl fmt::Debug for DirectiveDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveDefinition")
            .field("name", &String::from_utf8_lossy(&self.name))
            .finish_non_exhaustive()
    }
}

/// What to do when a placeholder names a directive that is not registered.
///
/// The value is always fetched first, so every placeholder still produces
/// exactly one fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum UnknownDirective {
    /// Abort with [`ExecuteError::UnknownDirective`](crate::ExecuteError::UnknownDirective).
    #[default]
    Error,
    /// Write the fetched value unchanged.
    PassThrough,
    /// Write the placeholder text (`{{ ... }}`) unchanged.
    Literal,
}

impl UnknownDirective {
    /// Policy name as used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::PassThrough => "passthrough",
            Self::Literal => "literal",
        }
    }
}

impl fmt::Display for UnknownDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing an [`UnknownDirective`] policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown directive policy `{0}` (expected error, passthrough or literal)")]
pub struct ParseUnknownDirectiveError(String);

impl FromStr for UnknownDirective {
    type Err = ParseUnknownDirectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Self::Error),
            "passthrough" => Ok(Self::PassThrough),
            "literal" => Ok(Self::Literal),
            other => Err(ParseUnknownDirectiveError(other.to_owned())),
        }
    }
}

/// Immutable name-to-directive mapping, built once per template.
pub(crate) struct Registry {
    directives: HashMap<Box<[u8]>, Box<dyn Directive>>,
}

impl Registry {
    /// Build the registry. On duplicate names the last definition wins.
    pub(crate) fn new(definitions: impl IntoIterator<Item = DirectiveDefinition>) -> Self {
        let mut directives: HashMap<Box<[u8]>, Box<dyn Directive>> = HashMap::new();
        for DirectiveDefinition { name, directive } in definitions {
            if directives.contains_key(&name) {
                tracing::warn!(
                    name = %String::from_utf8_lossy(&name),
                    "Duplicate directive registered, keeping the last definition"
                );
            }
            directives.insert(name, directive);
        }
        Self { directives }
    }

    pub(crate) fn get(&self, name: &[u8]) -> Option<&dyn Directive> {
        self.directives.get(name).map(|directive| &**directive)
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &[u8]> {
        self.directives.keys().map(|name| &**name)
    }

    pub(crate) fn len(&self) -> usize {
        self.directives.len()
    }
}
