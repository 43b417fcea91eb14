//! Placeholder content parsing.
//!
//! Grammar: `[<directive><whitespace>]<path>`, surrounding whitespace ignored.

/// Parsed content of a `{{ ... }}` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Directive applied to the fetched value, if any.
    pub directive: Option<&'a [u8]>,
    /// Path handed to the fetch.
    pub path: &'a [u8],
}

impl<'a> Placeholder<'a> {
    /// Parse the bytes between `{{` and `}}`.
    ///
    /// The split is purely syntactic: internal whitespace means the part before
    /// the first whitespace run names a directive, whether or not such a
    /// directive is registered. ASCII whitespace (space, tab, CR, LF, form
    /// feed) is recognized.
    ///
    /// ```
    /// use bt_template::Placeholder;
    ///
    /// let plain = Placeholder::parse(b"  .id ");
    /// assert_eq!(plain.directive, None);
    /// assert_eq!(plain.path, b".id");
    ///
    /// let piped = Placeholder::parse(b" toLower .Name ");
    /// assert_eq!(piped.directive, Some(b"toLower".as_slice()));
    /// assert_eq!(piped.path, b".Name");
    /// ```
    #[must_use]
    pub fn parse(content: &'a [u8]) -> Self {
        let content = content.trim_ascii();
        match content.iter().position(u8::is_ascii_whitespace) {
            Some(split) => {
                let (directive, path) = content.split_at(split);
                Self {
                    directive: Some(directive),
                    path: path.trim_ascii_start(),
                }
            }
            None => Self {
                directive: None,
                path: content,
            },
        }
    }
}
