use std::fmt;

use crate::colorize::Palette;
use crate::text::{normalize_newline, DiffConfig};

/// Displays the colorized diff of actual against expected output.
///
/// This is what [`assert_output_eq!`](crate::assert_output_eq) prints when
/// the two sides differ.
pub struct OutputDiff<'a> {
    actual: &'a str,
    expected: &'a str,
    palette: Palette,
}

impl<'a> OutputDiff<'a> {
    pub fn new(actual: &'a str, expected: &'a str) -> OutputDiff<'a> {
        OutputDiff {
            actual,
            expected,
            palette: Palette::default(),
        }
    }

    /// Renders with a different palette.
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

impl<'a> fmt::Display for OutputDiff<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.actual == self.expected {
            return writeln!(f, "Invisible differences: both outputs are the same.");
        }
        if normalize_newline(self.actual) == normalize_newline(self.expected) {
            return writeln!(
                f,
                "Invisible differences: the outputs only differ in their trailing newline."
            );
        }

        let diff = DiffConfig::default().diff_lines(self.actual, self.expected);
        match diff.colorize_with(&self.palette) {
            Ok(rendered) => {
                writeln!(f, "Differences (- output | + expected output):")?;
                f.write_str(&rendered)
            }
            Err(err) => writeln!(f, "Could not render the differences: {}", err),
        }
    }
}

/// Asserts that an output equals the expected output.
///
/// On mismatch this panics with a colorized line diff of the two.
///
/// ```should_panic
/// mdiff::assert_output_eq!("<p>hello</p>\n", "<p>hello world</p>\n");
/// ```
#[macro_export]
macro_rules! assert_output_eq {
    ($actual:expr, $expected:expr $(,)?) => {{
        match (&($actual), &($expected)) {
            (actual, expected) => {
                let actual: &str = ::std::convert::AsRef::as_ref(actual);
                let expected: &str = ::std::convert::AsRef::as_ref(expected);
                if actual != expected {
                    panic!(
                        "output != expected_output\n{}",
                        $crate::OutputDiff::new(actual, expected)
                    );
                }
            }
        }
    }};
    ($actual:expr, $expected:expr, $($arg:tt)+) => {{
        match (&($actual), &($expected)) {
            (actual, expected) => {
                let actual: &str = ::std::convert::AsRef::as_ref(actual);
                let expected: &str = ::std::convert::AsRef::as_ref(expected);
                if actual != expected {
                    panic!(
                        "output != expected_output: {}\n{}",
                        format_args!($($arg)+),
                        $crate::OutputDiff::new(actual, expected)
                    );
                }
            }
        }
    }};
}

#[test]
fn test_display_same() {
    let rendered = OutputDiff::new("a\n", "a\n").to_string();
    assert_eq!(rendered, "Invisible differences: both outputs are the same.\n");
}

#[test]
fn test_display_trailing_newline() {
    let expected = "Invisible differences: the outputs only differ in their trailing newline.\n";
    assert_eq!(OutputDiff::new("x", "x\n").to_string(), expected);
    assert_eq!(OutputDiff::new("a\nb\n", "a\nb").to_string(), expected);
}

#[test]
#[should_panic(expected = "only differ in their trailing newline")]
fn test_assert_fails_on_trailing_newline() {
    assert_output_eq!("x", "x\n");
}

#[test]
fn test_display_plain() {
    let rendered = OutputDiff::new("a\nb\n", "a\nc\n")
        .palette(Palette::plain())
        .to_string();
    insta::assert_snapshot!(rendered, @r###"
    Differences (- output | + expected output):
      a
    - b
    + c
    "###);
}

#[test]
fn test_assert_passes() {
    assert_output_eq!("x", String::from("x"));
    assert_output_eq!(String::from("a\nb\n"), "a\nb\n", "rendering {}", "lists");
}

#[test]
#[should_panic(expected = "output != expected_output")]
fn test_assert_fails() {
    assert_output_eq!("one\ntwo\n", "one\nthree\n");
}

#[test]
#[should_panic(expected = "output != expected_output: while rendering tables")]
fn test_assert_fails_with_message() {
    assert_output_eq!("a", "b", "while rendering {}", "tables");
}
