//! Turning line tokens into colored terminal output.
//!
//! The [`Colorizer`] walks the tokens of a diff once.  Lines are buffered
//! as they come in; a hint rewrites the line right before it by wrapping
//! the columns it marks in color.  When all tokens are in, the first
//! character of every line is emphasized and the lines are joined.
use log::debug;

use crate::error::Error;
use crate::hint::{extract_ranges, ChangeKind, ChangeRange};
use crate::text::{trim_newline, LineTag, LineToken};

/// The escape sequences used for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Opens a deleted span.
    pub removed: &'static str,
    /// Opens an inserted span.
    pub added: &'static str,
    /// Opens the leading marker of a line.
    pub marker: &'static str,
    /// Closes any of the above.
    pub reset: &'static str,
}

impl Palette {
    /// Red deletions, cyan insertions and blue line markers.
    pub const fn ansi() -> Palette {
        Palette {
            removed: "\u{1b}[31m",
            added: "\u{1b}[36m",
            marker: "\u{1b}[34m",
            reset: "\u{1b}[0m",
        }
    }

    /// A palette without any escape sequences.
    pub const fn plain() -> Palette {
        Palette {
            removed: "",
            added: "",
            marker: "",
            reset: "",
        }
    }

    fn paint(&self, kind: ChangeKind, s: &str, out: &mut String) {
        out.push_str(match kind {
            ChangeKind::Insert => self.added,
            ChangeKind::Delete => self.removed,
        });
        out.push_str(s);
        out.push_str(self.reset);
    }
}

impl Default for Palette {
    fn default() -> Palette {
        Palette::ansi()
    }
}

fn split_prefix(line: &str) -> (&str, &str) {
    match line.char_indices().nth(2) {
        Some((idx, _)) => line.split_at(idx),
        None => (line, ""),
    }
}

/// The number of columns a line offers to hints.
///
/// This is the content after the prefix, without the line terminator.
pub fn content_width(line: &str) -> usize {
    trim_newline(split_prefix(line).1).chars().count()
}

/// Wraps the given column ranges of a prefixed line in color.
///
/// The two character prefix and everything outside the ranges is copied
/// verbatim.  Ranges are expected in ascending order; columns past the end
/// of the content (or into its line terminator) are not colored.
pub fn apply_color(line: &str, ranges: &[ChangeRange], palette: &Palette) -> String {
    let (prefix, content) = split_prefix(line);
    let bounds: Vec<usize> = content
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(content.len()))
        .collect();
    let width = trim_newline(content).chars().count();

    let mut rv = String::with_capacity(line.len() + ranges.len() * 10);
    rv.push_str(prefix);
    let mut cursor = 0;
    for range in ranges {
        let start = range.start.max(cursor).min(width);
        let end = range.end.min(width);
        if start >= end {
            continue;
        }
        rv.push_str(&content[bounds[cursor]..bounds[start]]);
        palette.paint(range.kind, &content[bounds[start]..bounds[end]], &mut rv);
        cursor = end;
    }
    rv.push_str(&content[bounds[cursor]..]);
    rv
}

/// Wraps the first character of a line in the marker color.
pub fn emphasize_leading(line: &str, palette: &Palette) -> String {
    let mut chars = line.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str();
            let mut rv = String::with_capacity(line.len() + 10);
            rv.push_str(palette.marker);
            rv.push(first);
            rv.push_str(palette.reset);
            rv.push_str(rest);
            rv
        }
        None => String::new(),
    }
}

/// Renders line tokens one at a time.
///
/// `anchor` is the index of the buffered line the next hint applies to.
/// It is set by every removed or added line and cleared by anything else,
/// so each line is colored by at most one hint.
pub struct Colorizer<'p> {
    palette: &'p Palette,
    lines: Vec<String>,
    anchor: Option<usize>,
    replace_is_delete: bool,
    consumed: usize,
}

impl<'p> Colorizer<'p> {
    pub fn new(palette: &'p Palette) -> Colorizer<'p> {
        Colorizer {
            palette,
            lines: Vec::new(),
            anchor: None,
            replace_is_delete: false,
            consumed: 0,
        }
    }

    /// Feeds the next token.
    pub fn push(&mut self, token: &LineToken<'_>) -> Result<(), Error> {
        let index = self.consumed;
        self.consumed += 1;

        match token.tag() {
            LineTag::Hint => {
                let anchor = self.anchor.take().ok_or(Error::UnanchoredHint { index })?;
                let width = content_width(&self.lines[anchor]);
                let ranges = extract_ranges(token.value(), self.replace_is_delete, width)
                    .map_err(|err| {
                        debug!("rejecting hint at token {}: {}", index, err);
                        err
                    })?;
                let colored = apply_color(&self.lines[anchor], &ranges, self.palette);
                self.lines[anchor] = colored;
            }
            tag => {
                match tag {
                    LineTag::Removed => self.replace_is_delete = true,
                    LineTag::Added => self.replace_is_delete = false,
                    _ => {}
                }
                self.anchor = if tag == LineTag::Context {
                    None
                } else {
                    Some(self.lines.len())
                };
                self.lines.push(token.to_string());
            }
        }

        Ok(())
    }

    /// Emphasizes the leading markers and joins all lines.
    pub fn finish(self) -> String {
        self.lines
            .iter()
            .map(|line| emphasize_leading(line, self.palette))
            .collect()
    }
}

#[test]
fn test_apply_color() {
    let palette = Palette::ansi();
    let line = "- hello world\n";
    let ranges = [ChangeRange::new(ChangeKind::Delete, 6, 11)];
    assert_eq!(
        apply_color(line, &ranges, &palette),
        "- hello \u{1b}[31mworld\u{1b}[0m\n"
    );

    let ranges = [
        ChangeRange::new(ChangeKind::Insert, 0, 1),
        ChangeRange::new(ChangeKind::Delete, 2, 3),
    ];
    assert_eq!(
        apply_color("+ abcd", &ranges, &palette),
        "+ \u{1b}[36ma\u{1b}[0mb\u{1b}[31mc\u{1b}[0md"
    );
}

#[test]
fn test_apply_color_keeps_newline_out() {
    let palette = Palette::ansi();
    let ranges = [ChangeRange::new(ChangeKind::Delete, 0, 10)];
    assert_eq!(
        apply_color("- ab\r\n", &ranges, &palette),
        "- \u{1b}[31mab\u{1b}[0m\r\n"
    );
    assert_eq!(apply_color("- \n", &ranges, &palette), "- \n");
}

#[test]
fn test_apply_color_code_points() {
    let palette = Palette::ansi();
    let ranges = [ChangeRange::new(ChangeKind::Insert, 1, 3)];
    assert_eq!(
        apply_color("+ äöüx\n", &ranges, &palette),
        "+ ä\u{1b}[36möü\u{1b}[0mx\n"
    );
}

#[test]
fn test_emphasize_leading() {
    let palette = Palette::ansi();
    assert_eq!(
        emphasize_leading("  a\n", &palette),
        "\u{1b}[34m \u{1b}[0m a\n"
    );
    assert_eq!(emphasize_leading("", &palette), "");
    assert_eq!(emphasize_leading("- x\n", &Palette::plain()), "- x\n");
}

#[test]
fn test_colorizer() {
    let palette = Palette::ansi();
    let mut colorizer = Colorizer::new(&palette);
    colorizer.push(&LineToken::Removed("foo\n")).unwrap();
    colorizer.push(&LineToken::Hint("^^^".into())).unwrap();
    colorizer.push(&LineToken::Added("bar\n")).unwrap();
    colorizer.push(&LineToken::Hint("^^^".into())).unwrap();
    assert_eq!(
        colorizer.finish(),
        "\u{1b}[34m-\u{1b}[0m \u{1b}[31mfoo\u{1b}[0m\n\
         \u{1b}[34m+\u{1b}[0m \u{1b}[36mbar\u{1b}[0m\n"
    );
}

#[test]
fn test_unanchored_hints() {
    let palette = Palette::ansi();

    let mut colorizer = Colorizer::new(&palette);
    assert_eq!(
        colorizer.push(&LineToken::Hint("^".into())),
        Err(Error::UnanchoredHint { index: 0 })
    );

    let mut colorizer = Colorizer::new(&palette);
    colorizer.push(&LineToken::Context("a\n")).unwrap();
    assert_eq!(
        colorizer.push(&LineToken::Hint("^".into())),
        Err(Error::UnanchoredHint { index: 1 })
    );

    let mut colorizer = Colorizer::new(&palette);
    colorizer.push(&LineToken::Added("a\n")).unwrap();
    colorizer.push(&LineToken::Hint("^".into())).unwrap();
    assert_eq!(
        colorizer.push(&LineToken::Hint("^".into())),
        Err(Error::UnanchoredHint { index: 2 })
    );
}

#[test]
fn test_invalid_hint_aborts() {
    let palette = Palette::ansi();
    let mut colorizer = Colorizer::new(&palette);
    colorizer.push(&LineToken::Removed("abc\n")).unwrap();
    assert_eq!(
        colorizer.push(&LineToken::Hint(" ?".into())),
        Err(Error::InvalidHintCharacter {
            character: '?',
            column: 1,
        })
    );
}

#[test]
fn test_hint_longer_than_line() {
    let palette = Palette::ansi();
    let mut colorizer = Colorizer::new(&palette);
    colorizer.push(&LineToken::Removed("ab \n")).unwrap();
    colorizer.push(&LineToken::Hint("  -----".into())).unwrap();
    assert_eq!(
        colorizer.finish(),
        "\u{1b}[34m-\u{1b}[0m ab\u{1b}[31m \u{1b}[0m\n"
    );
}
