//! Ready-made directives.
//!
//! Nothing here is registered automatically; pass the definitions you want to
//! [`Template::new`](crate::Template::new).
//!
//! | Name         | Effect                                              |
//! |--------------|-----------------------------------------------------|
//! | `toLower`    | Lowercase (Unicode for UTF-8 input, ASCII otherwise) |
//! | `toUpper`    | Uppercase (Unicode for UTF-8 input, ASCII otherwise) |
//! | `trim`       | Strip leading and trailing ASCII whitespace          |
//! | `pathEscape` | Percent-encode for use as one URL path segment       |

use std::io::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};

use crate::DirectiveDefinition;

/// Name of the [`to_lower`] directive.
pub const TO_LOWER: &str = "toLower";
/// Name of the [`to_upper`] directive.
pub const TO_UPPER: &str = "toUpper";
/// Name of the [`trim`] directive.
pub const TRIM: &str = "trim";
/// Name of the [`path_escape`] directive.
pub const PATH_ESCAPE: &str = "pathEscape";

/// Names of all built-in directives.
pub const NAMES: [&str; 4] = [TO_LOWER, TO_UPPER, TRIM, PATH_ESCAPE];

/// RFC 3986 unreserved characters: A-Z a-z 0-9 - . _ ~
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// `toLower`: lowercase the argument.
#[must_use]
pub fn to_lower() -> DirectiveDefinition {
    DirectiveDefinition::new(TO_LOWER, |out, arg| {
        match std::str::from_utf8(arg) {
            Ok(text) => out.write_all(text.to_lowercase().as_bytes())?,
            Err(_) => out.write_all(&arg.to_ascii_lowercase())?,
        }
        Ok(())
    })
}

/// `toUpper`: uppercase the argument.
#[must_use]
pub fn to_upper() -> DirectiveDefinition {
    DirectiveDefinition::new(TO_UPPER, |out, arg| {
        match std::str::from_utf8(arg) {
            Ok(text) => out.write_all(text.to_uppercase().as_bytes())?,
            Err(_) => out.write_all(&arg.to_ascii_uppercase())?,
        }
        Ok(())
    })
}

/// `trim`: strip surrounding ASCII whitespace.
#[must_use]
pub fn trim() -> DirectiveDefinition {
    DirectiveDefinition::new(TRIM, |out, arg| {
        out.write_all(arg.trim_ascii())?;
        Ok(())
    })
}

/// `pathEscape`: percent-encode everything except unreserved characters.
#[must_use]
pub fn path_escape() -> DirectiveDefinition {
    DirectiveDefinition::new(PATH_ESCAPE, |out, arg| {
        for chunk in percent_encode(arg, PATH_SEGMENT_ENCODE_SET) {
            out.write_all(chunk.as_bytes())?;
        }
        Ok(())
    })
}

/// Look up a built-in directive by name.
#[must_use]
pub fn by_name(name: &str) -> Option<DirectiveDefinition> {
    match name {
        TO_LOWER => Some(to_lower()),
        TO_UPPER => Some(to_upper()),
        TRIM => Some(trim()),
        PATH_ESCAPE => Some(path_escape()),
        _ => None,
    }
}

/// All built-in directives.
#[must_use]
pub fn all() -> Vec<DirectiveDefinition> {
    vec![to_lower(), to_upper(), trim(), path_escape()]
}
