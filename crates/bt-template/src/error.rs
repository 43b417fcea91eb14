//! Error types for template execution.

use std::io;

/// Boxed error returned by [`Fetch`](crate::Fetch) and
/// [`Directive`](crate::Directive) implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error that aborted a template execution.
///
/// The first failure stops the scan; bytes already written to the sink stay
/// there. The underlying error is kept unchanged and exposed through
/// [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExecuteError {
    /// Writing to the output sink failed.
    #[error("failed to write template output")]
    Write(#[from] io::Error),

    /// The caller-supplied fetch failed to resolve a path.
    #[error("failed to fetch value for path `{path}`")]
    Fetch {
        /// Placeholder path (lossy UTF-8).
        path: String,
        /// Error returned by the fetch implementation.
        #[source]
        source: BoxError,
    },

    /// A directive failed to transform its argument.
    #[error("directive `{name}` failed")]
    Directive {
        /// Directive name (lossy UTF-8).
        name: String,
        /// Error returned by the directive.
        #[source]
        source: BoxError,
    },

    /// A placeholder named a directive that is not registered.
    ///
    /// Only returned under [`UnknownDirective::Error`](crate::UnknownDirective::Error).
    #[error("unknown directive `{name}`")]
    UnknownDirective {
        /// Directive name (lossy UTF-8).
        name: String,
    },
}

impl ExecuteError {
    pub(crate) fn fetch(path: &[u8], source: BoxError) -> Self {
        Self::Fetch {
            path: String::from_utf8_lossy(path).into_owned(),
            source,
        }
    }

    pub(crate) fn directive(name: &[u8], source: BoxError) -> Self {
        Self::Directive {
            name: String::from_utf8_lossy(name).into_owned(),
            source,
        }
    }

    pub(crate) fn unknown_directive(name: &[u8]) -> Self {
        Self::UnknownDirective {
            name: String::from_utf8_lossy(name).into_owned(),
        }
    }

    /// Take the original error returned by a fetch or directive.
    ///
    /// Returns `None` for sink write failures and unknown directives.
    #[must_use]
    pub fn into_source(self) -> Option<BoxError> {
        match self {
            Self::Fetch { source, .. } | Self::Directive { source, .. } => Some(source),
            Self::Write(_) | Self::UnknownDirective { .. } => None,
        }
    }
}
