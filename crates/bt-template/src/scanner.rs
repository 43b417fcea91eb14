//! Template scanner.
//!
//! Splits a template into literal runs and `{{ ... }}` placeholders. Malformed
//! delimiters never fail: an unmatched `{{` or a lone `{` is literal text.

use std::iter::FusedIterator;

/// Placeholder open delimiter.
pub(crate) const OPEN: &[u8; 2] = b"{{";

/// Placeholder close delimiter.
pub(crate) const CLOSE: &[u8; 2] = b"}}";

/// A run of template bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Bytes copied to the output unchanged.
    Literal(&'a [u8]),
    /// A `{{ ... }}` placeholder.
    Placeholder {
        /// The full placeholder text, delimiters included.
        raw: &'a [u8],
        /// The bytes strictly between `{{` and `}}`.
        content: &'a [u8],
    },
}

/// Forward-only iterator over the [`Segment`]s of a template.
///
/// The first `}}` after an opening `{{` closes the placeholder; there is no
/// nesting. When no `}}` follows, everything from the `{{` to the end of input
/// is a single literal.
///
/// ```
/// use bt_template::{Segment, Segments};
///
/// let segments: Vec<_> = Segments::new(b"/user/{{ .id }}/{").collect();
/// assert_eq!(
///     segments,
///     vec![
///         Segment::Literal(b"/user/"),
///         Segment::Placeholder { raw: b"{{ .id }}", content: b" .id " },
///         Segment::Literal(b"/{"),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a [u8],
}

impl<'a> Segments<'a> {
    /// Start scanning `template`.
    #[must_use]
    pub fn new(template: &'a [u8]) -> Self {
        Self { rest: template }
    }

    /// Emit everything left as one literal.
    fn take_rest(&mut self) -> Segment<'a> {
        Segment::Literal(std::mem::take(&mut self.rest))
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let Some(open) = find(self.rest, OPEN) else {
            return Some(self.take_rest());
        };

        if open > 0 {
            let (literal, rest) = self.rest.split_at(open);
            self.rest = rest;
            return Some(Segment::Literal(literal));
        }

        let inner = &self.rest[OPEN.len()..];
        let Some(close) = find(inner, CLOSE) else {
            return Some(self.take_rest());
        };

        let (raw, rest) = self.rest.split_at(OPEN.len() + close + CLOSE.len());
        self.rest = rest;
        Some(Segment::Placeholder {
            raw,
            content: &inner[..close],
        })
    }
}

impl FusedIterator for Segments<'_> {}

/// Position of the first occurrence of a two-byte delimiter.
fn find(haystack: &[u8], delimiter: &[u8; 2]) -> Option<usize> {
    haystack.windows(2).position(|window| window == delimiter)
}
