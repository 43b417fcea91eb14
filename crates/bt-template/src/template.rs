//! Template execution engine.

use std::fmt;
use std::io::{self, Write};

use crate::directive::Registry;
use crate::{
    DirectiveDefinition, ExecuteError, Fetch, Placeholder, Segment, Segments, UnknownDirective,
};

/// Immutable set of directives plus the engine that renders templates with it.
///
/// A `Template` is built once and reused for any number of
/// [`execute`](Self::execute) calls, including concurrent calls from several
/// threads.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use bt_template::{Template, builtin, fetch_fn};
///
/// let template = Template::new([builtin::to_lower()]);
/// let out = template
///     .render(
///         b"/api/user/{{ toLower .Name }}",
///         fetch_fn(|w, _path| {
///             w.write_all(b"Sergey")?;
///             Ok(())
///         }),
///     )
///     .unwrap();
/// assert_eq!(out, b"/api/user/sergey");
/// ```
pub struct Template {
    registry: Registry,
    unknown_directive: UnknownDirective,
}

impl Template {
    /// Build a template from directive definitions.
    ///
    /// When two definitions share a name, the last one wins.
    pub fn new(definitions: impl IntoIterator<Item = DirectiveDefinition>) -> Self {
        Self::builder().directives(definitions).build()
    }

    /// Start building a template with non-default settings.
    #[must_use]
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::default()
    }

    /// Whether a directive with this exact name is registered.
    #[must_use]
    pub fn has_directive(&self, name: &[u8]) -> bool {
        self.registry.get(name).is_some()
    }

    /// Names of the registered directives, in no particular order.
    pub fn directive_names(&self) -> impl Iterator<Item = &[u8]> {
        self.registry.names()
    }

    /// Policy applied to placeholders naming an unregistered directive.
    #[must_use]
    pub fn unknown_directive_policy(&self) -> UnknownDirective {
        self.unknown_directive
    }

    /// Render `template` into `out`, resolving placeholders with `fetch`.
    ///
    /// Literal bytes are written unchanged. A placeholder without a directive
    /// lets `fetch` write straight into `out`; with a directive, the fetched
    /// value is buffered and handed to the directive, which writes into `out`.
    ///
    /// Returns the number of bytes written to `out`.
    ///
    /// # Errors
    ///
    /// Stops at the first failure of a sink write, fetch or directive. Bytes
    /// written before the failure stay in `out`.
    pub fn execute<W, F>(
        &self,
        out: &mut W,
        template: &[u8],
        fetch: F,
    ) -> Result<usize, ExecuteError>
    where
        W: Write + ?Sized,
        F: Fetch,
    {
        let mut scratch = Vec::new();
        self.execute_with_buffer(out, template, fetch, &mut scratch)
    }

    /// Like [`execute`](Self::execute), with a caller-owned buffer for
    /// directive arguments.
    ///
    /// The buffer is cleared before each directive placeholder and keeps its
    /// capacity, so a hot loop rendering many templates does not reallocate.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub fn execute_with_buffer<W, F>(
        &self,
        out: &mut W,
        template: &[u8],
        mut fetch: F,
        scratch: &mut Vec<u8>,
    ) -> Result<usize, ExecuteError>
    where
        W: Write + ?Sized,
        F: Fetch,
    {
        let mut out = CountingWriter::new(out);

        for segment in Segments::new(template) {
            match segment {
                Segment::Literal(bytes) => out.write_all(bytes)?,
                Segment::Placeholder { raw, content } => {
                    let placeholder = Placeholder::parse(content);
                    self.dispatch(&mut out, placeholder, raw, &mut fetch, scratch)?;
                }
            }
        }

        Ok(out.written)
    }

    /// Render `template` into a new buffer.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute); the partial output is dropped.
    pub fn render<F: Fetch>(&self, template: &[u8], fetch: F) -> Result<Vec<u8>, ExecuteError> {
        let mut out = Vec::with_capacity(template.len());
        self.execute(&mut out, template, fetch)?;
        Ok(out)
    }

    fn dispatch<F: Fetch>(
        &self,
        out: &mut dyn Write,
        placeholder: Placeholder<'_>,
        raw: &[u8],
        fetch: &mut F,
        scratch: &mut Vec<u8>,
    ) -> Result<(), ExecuteError> {
        let path = placeholder.path;

        let Some(name) = placeholder.directive else {
            tracing::trace!(path = %String::from_utf8_lossy(path), "Fetching placeholder");
            return fetch
                .fetch(out, path)
                .map_err(|source| ExecuteError::fetch(path, source));
        };

        tracing::trace!(
            path = %String::from_utf8_lossy(path),
            directive = %String::from_utf8_lossy(name),
            "Fetching directive argument"
        );
        scratch.clear();
        fetch
            .fetch(scratch, path)
            .map_err(|source| ExecuteError::fetch(path, source))?;

        if let Some(directive) = self.registry.get(name) {
            return directive
                .resolve(out, scratch)
                .map_err(|source| ExecuteError::directive(name, source));
        }

        match self.unknown_directive {
            UnknownDirective::Error => Err(ExecuteError::unknown_directive(name)),
            UnknownDirective::PassThrough => {
                tracing::debug!(
                    directive = %String::from_utf8_lossy(name),
                    "Unknown directive, writing fetched value unchanged"
                );
                out.write_all(scratch)?;
                Ok(())
            }
            UnknownDirective::Literal => {
                tracing::debug!(
                    directive = %String::from_utf8_lossy(name),
                    "Unknown directive, writing placeholder unchanged"
                );
                out.write_all(raw)?;
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.directive_names().map(String::from_utf8_lossy).collect();
        f.debug_struct("Template")
            .field("directives", &names)
            .field("unknown_directive", &self.unknown_directive)
            .finish()
    }
}

/// Builder for [`Template`].
#[derive(Debug, Default)]
pub struct TemplateBuilder {
    definitions: Vec<DirectiveDefinition>,
    unknown_directive: UnknownDirective,
}

impl TemplateBuilder {
    /// Register a directive.
    #[must_use]
    pub fn directive(mut self, definition: DirectiveDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Register several directives.
    #[must_use]
    pub fn directives(
        mut self,
        definitions: impl IntoIterator<Item = DirectiveDefinition>,
    ) -> Self {
        self.definitions.extend(definitions);
        self
    }

    /// Set the policy for placeholders naming an unregistered directive.
    ///
    /// Default: [`UnknownDirective::Error`]
    #[must_use]
    pub fn unknown_directive(mut self, policy: UnknownDirective) -> Self {
        self.unknown_directive = policy;
        self
    }

    /// Build the immutable template.
    #[must_use]
    pub fn build(self) -> Template {
        let registry = Registry::new(self.definitions);
        tracing::debug!(
            directives = registry.len(),
            unknown_directive = %self.unknown_directive,
            "Template built"
        );
        Template {
            registry,
            unknown_directive: self.unknown_directive,
        }
    }
}

/// Sink wrapper counting the bytes accepted by the inner writer.
struct CountingWriter<'a, W: ?Sized> {
    inner: &'a mut W,
    written: usize,
}

impl<'a, W: Write + ?Sized> CountingWriter<'a, W> {
    fn new(inner: &'a mut W) -> Self {
        Self { inner, written: 0 }
    }
}

impl<W: Write + ?Sized> Write for CountingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
