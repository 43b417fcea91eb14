//! Caller-supplied value resolution.

use std::io::Write;

use crate::BoxError;

/// Resolves a placeholder path and writes its value to a sink.
///
/// The engine calls [`fetch`](Self::fetch) once for every placeholder, even
/// when the same path appears several times; nothing is cached. Writing zero
/// bytes is valid (for example when the path is unknown). Return an error only
/// for genuine resolution failures: it aborts the whole execution.
///
/// Any `FnMut(&mut dyn Write, &[u8]) -> Result<(), BoxError>` is a `Fetch`.
/// Wrap closures in [`fetch_fn`] so their argument types are inferred.
pub trait Fetch {
    /// Write the value for `path` to `out`.
    fn fetch(&mut self, out: &mut dyn Write, path: &[u8]) -> Result<(), BoxError>;
}

impl<F> Fetch for F
where
    F: FnMut(&mut dyn Write, &[u8]) -> Result<(), BoxError>,
{
    fn fetch(&mut self, out: &mut dyn Write, path: &[u8]) -> Result<(), BoxError> {
        self(out, path)
    }
}

/// Use a closure as a [`Fetch`].
///
/// ```
/// use std::io::Write;
/// use bt_template::fetch_fn;
///
/// let fetch = fetch_fn(|w, path| {
///     if path == b".id" {
///         w.write_all(b"1")?;
///     }
///     Ok(())
/// });
/// # let _ = fetch;
/// ```
pub fn fetch_fn<F>(f: F) -> F
where
    F: FnMut(&mut dyn Write, &[u8]) -> Result<(), BoxError>,
{
    f
}
