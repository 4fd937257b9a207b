//! This crate renders colorized line diffs of some actual output against the
//! output that was expected, the kind of diff a failing test wants to show.
//!
//! ```rust
//! let rendered = mdiff::diff_strings("hello world\n", "hello earth\n").unwrap();
//! assert_eq!(
//!     rendered,
//!     "\u{1b}[34m-\u{1b}[0m hello \u{1b}[31mworld\u{1b}[0m\n\
//!      \u{1b}[34m+\u{1b}[0m hello \u{1b}[36mearth\u{1b}[0m\n"
//! );
//! ```
//!
//! Rendering happens in two steps:
//!
//! * [`text`]: the line differ turns both texts into a sequence of
//!   [`LineToken`]s.  Lines that replace other lines are followed by a hint
//!   that marks which of their columns changed.
//! * [`colorize`]: the colorizer decodes every hint into [`ChangeRange`]s
//!   (see [`extract_ranges`]), wraps those columns of the line before it in
//!   red (deleted) or cyan (inserted) and marks the first character of every
//!   line in blue.
//!
//! The [`algorithms`] module holds the sequence diff both steps are built on.
//!
//! # Features
//!
//! * `unicode`: split words along Unicode word boundaries when computing
//!   hints.
//! * `serde`: serialization support for tokens, tags and ranges.
#![warn(rust_2018_idioms)]

pub mod algorithms;
pub mod colorize;
pub mod hint;
pub mod text;

mod assert;
mod deadline_support;
mod error;

pub use crate::algorithms::Algorithm;
pub use crate::assert::OutputDiff;
pub use crate::colorize::{apply_color, emphasize_leading, Colorizer, Palette};
pub use crate::error::Error;
pub use crate::hint::{extract_ranges, parse_hint_line, ChangeKind, ChangeRange};
pub use crate::text::{DiffConfig, Granularity, LineDiff, LineTag, LineToken};

/// Renders the colorized diff of `actual` against `expected`.
///
/// This uses the default [`DiffConfig`] and the ANSI [`Palette`].
pub fn diff_strings(actual: &str, expected: &str) -> Result<String, Error> {
    DiffConfig::default()
        .diff_lines(actual, expected)
        .colorize()
}
