//! Streaming byte template engine.
//!
//! This crate substitutes `{{ ... }}` placeholders inside a byte sequence with
//! values resolved at render time, optionally transformed by named directives.
//! Output is written straight to an [`std::io::Write`] sink; no parse tree is
//! built and no intermediate string is allocated per render.
//!
//! # Architecture
//!
//! - [`Segments`]: scanner splitting the input into literal runs and
//!   placeholders, degrading malformed delimiters to literal text
//! - [`Placeholder`]: parser for placeholder content (`[directive ]path`)
//! - [`Template`]: immutable directive registry plus the execution engine
//! - [`Fetch`]: caller-supplied value resolution, invoked once per placeholder
//! - [`Directive`]: transformation applied to a fetched value
//!
//! Ready-made directives live in [`builtin`].
//!
//! # Example
//!
//! ```
//! use std::io::Write;
//! use bt_template::{Template, builtin, fetch_fn};
//!
//! let template = Template::new([builtin::to_lower()]);
//!
//! let mut out = Vec::new();
//! template
//!     .execute(
//!         &mut out,
//!         b"/api/user/{{ .id }}/{{ toLower .name }}",
//!         fetch_fn(|w, path| {
//!             match path {
//!                 b".id" => w.write_all(b"1")?,
//!                 b".name" => w.write_all(b"Sergey")?,
//!                 _ => {}
//!             }
//!             Ok(())
//!         }),
//!     )
//!     .unwrap();
//!
//! assert_eq!(out, b"/api/user/1/sergey");
//! ```

pub mod builtin;
mod directive;
mod error;
mod fetch;
mod placeholder;
mod scanner;
mod template;

pub use directive::{
    Directive, DirectiveDefinition, ParseUnknownDirectiveError, UnknownDirective,
};
pub use error::{BoxError, ExecuteError};
pub use fetch::{Fetch, fetch_fn};
pub use placeholder::Placeholder;
pub use scanner::{Segment, Segments};
pub use template::{Template, TemplateBuilder};
