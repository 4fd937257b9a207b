//! Decoding of hint lines into column ranges.
//!
//! A hint line sits under a removed or added line and marks its columns:
//!
//! ```text
//! - hello world
//! ?       ^^^^^
//! + hello earth
//! ?       ^^^^^
//! ```
//!
//! A blank column is unchanged, `+` was inserted, `-` was deleted and `^`
//! was replaced.  Whether a replaced column counts as an insertion or a
//! deletion depends on the line the hint belongs to.
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::text::trim_newline;

/// Whether a column range was inserted or deleted.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ChangeKind {
    Insert,
    Delete,
}

impl ChangeKind {
    /// The kind a `^` marker resolves to.
    pub fn for_replace(replace_is_delete: bool) -> ChangeKind {
        if replace_is_delete {
            ChangeKind::Delete
        } else {
            ChangeKind::Insert
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ChangeKind::Insert => "insert",
            ChangeKind::Delete => "delete",
        })
    }
}

impl FromStr for ChangeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<ChangeKind, Error> {
        match s {
            "insert" => Ok(ChangeKind::Insert),
            "delete" => Ok(ChangeKind::Delete),
            other => Err(Error::InvalidRangeKind(other.to_string())),
        }
    }
}

/// A half-open range of changed columns.
///
/// Columns count code points of the line content, after the two character
/// prefix of the line.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeRange {
    pub kind: ChangeKind,
    pub start: usize,
    pub end: usize,
}

impl ChangeRange {
    pub fn new(kind: ChangeKind, start: usize, end: usize) -> ChangeRange {
        ChangeRange { kind, start, end }
    }

    /// The number of columns covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> TryFrom<(&'a str, usize, usize)> for ChangeRange {
    type Error = Error;

    /// Builds a range from a `(kind, start, end)` triple with a textual kind.
    fn try_from((kind, start, end): (&'a str, usize, usize)) -> Result<ChangeRange, Error> {
        Ok(ChangeRange::new(kind.parse()?, start, end))
    }
}

/// Decodes the markers of a hint line into change ranges.
///
/// `markers` is the hint without its `"? "` prefix.  `replace_is_delete`
/// decides how `^` is read and `limit` is the length of the content the
/// hint applies to.  Ranges are clamped to `limit` and dropped if that
/// leaves them empty, so a hint longer than its line never produces a
/// column past the end of it.
///
/// The returned ranges are sorted and never overlap.
///
/// ```
/// # use mdiff::{extract_ranges, ChangeKind, ChangeRange};
/// let ranges = extract_ranges("  ^^ --", true, 10).unwrap();
/// assert_eq!(
///     ranges,
///     vec![
///         ChangeRange::new(ChangeKind::Delete, 2, 4),
///         ChangeRange::new(ChangeKind::Delete, 5, 7),
///     ]
/// );
/// ```
pub fn extract_ranges(
    markers: &str,
    replace_is_delete: bool,
    limit: usize,
) -> Result<Vec<ChangeRange>, Error> {
    let markers = trim_newline(markers);
    let mut rv = Vec::new();
    let mut open: Option<(ChangeKind, usize)> = None;
    let mut width = 0;

    for (column, c) in markers.chars().enumerate() {
        width = column + 1;
        let kind = match c {
            ' ' => None,
            '+' => Some(ChangeKind::Insert),
            '-' => Some(ChangeKind::Delete),
            '^' => Some(ChangeKind::for_replace(replace_is_delete)),
            character => return Err(Error::InvalidHintCharacter { character, column }),
        };
        match (open, kind) {
            (Some((open_kind, _)), Some(kind)) if open_kind == kind => {}
            _ => {
                if let Some((open_kind, start)) = open.take() {
                    push_range(&mut rv, open_kind, start, column, limit);
                }
                open = kind.map(|kind| (kind, column));
            }
        }
    }

    if let Some((kind, start)) = open {
        push_range(&mut rv, kind, start, width, limit);
    }

    Ok(rv)
}

/// Like [`extract_ranges`] but takes the full hint line with its prefix.
pub fn parse_hint_line(
    line: &str,
    replace_is_delete: bool,
    limit: usize,
) -> Result<Vec<ChangeRange>, Error> {
    let markers = match line.char_indices().nth(2) {
        Some((idx, _)) => &line[idx..],
        None => "",
    };
    extract_ranges(markers, replace_is_delete, limit)
}

fn push_range(rv: &mut Vec<ChangeRange>, kind: ChangeKind, start: usize, end: usize, limit: usize) {
    let end = end.min(limit);
    if start < end {
        rv.push(ChangeRange::new(kind, start, end));
    }
}

#[test]
fn test_replace_resolution() {
    assert_eq!(
        extract_ranges("^^^^", true, 4).unwrap(),
        vec![ChangeRange::new(ChangeKind::Delete, 0, 4)]
    );
    assert_eq!(
        extract_ranges("^^^^", false, 4).unwrap(),
        vec![ChangeRange::new(ChangeKind::Insert, 0, 4)]
    );
}

#[test]
fn test_runs_switch_kind() {
    assert_eq!(
        extract_ranges("++--  +", false, 20).unwrap(),
        vec![
            ChangeRange::new(ChangeKind::Insert, 0, 2),
            ChangeRange::new(ChangeKind::Delete, 2, 4),
            ChangeRange::new(ChangeKind::Insert, 6, 7),
        ]
    );
    // a `^` read as `+` joins an adjacent insert run
    assert_eq!(
        extract_ranges(" +^^+", false, 20).unwrap(),
        vec![ChangeRange::new(ChangeKind::Insert, 1, 5)]
    );
    assert_eq!(
        extract_ranges(" +^^+", true, 20).unwrap(),
        vec![
            ChangeRange::new(ChangeKind::Insert, 1, 2),
            ChangeRange::new(ChangeKind::Delete, 2, 4),
            ChangeRange::new(ChangeKind::Insert, 4, 5),
        ]
    );
}

#[test]
fn test_blank_and_empty_hints() {
    assert!(extract_ranges("", true, 5).unwrap().is_empty());
    assert!(extract_ranges("     ", false, 5).unwrap().is_empty());
    assert!(extract_ranges("\n", false, 5).unwrap().is_empty());
}

#[test]
fn test_trailing_newline_is_ignored() {
    assert_eq!(
        extract_ranges("  --\n", true, 10).unwrap(),
        vec![ChangeRange::new(ChangeKind::Delete, 2, 4)]
    );
}

#[test]
fn test_clamped_to_content() {
    // the hint runs past the end of a three column line
    assert_eq!(
        extract_ranges("^^^^^^", true, 3).unwrap(),
        vec![ChangeRange::new(ChangeKind::Delete, 0, 3)]
    );
    assert_eq!(
        extract_ranges("+  ---", false, 3).unwrap(),
        vec![ChangeRange::new(ChangeKind::Insert, 0, 1)]
    );
    assert!(extract_ranges("    ^^", false, 3).unwrap().is_empty());
}

#[test]
fn test_invalid_character() {
    assert_eq!(
        extract_ranges("  ^x", true, 10),
        Err(Error::InvalidHintCharacter {
            character: 'x',
            column: 3,
        })
    );
    assert_eq!(
        extract_ranges("\t^", true, 10),
        Err(Error::InvalidHintCharacter {
            character: '\t',
            column: 0,
        })
    );
}

#[test]
fn test_ranges_sorted_and_disjoint() {
    let ranges = extract_ranges("-+^ ^-+ ++--^^  -", true, 100).unwrap();
    for pair in ranges.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }
    assert!(ranges.iter().all(|r| r.start < r.end));
}

#[test]
fn test_parse_hint_line() {
    assert_eq!(
        parse_hint_line("?       ^^^^^\n", false, 11).unwrap(),
        vec![ChangeRange::new(ChangeKind::Insert, 6, 11)]
    );
    assert!(parse_hint_line("?", true, 3).unwrap().is_empty());
}

#[test]
fn test_kind_from_str() {
    assert_eq!("insert".parse::<ChangeKind>(), Ok(ChangeKind::Insert));
    assert_eq!("delete".parse::<ChangeKind>(), Ok(ChangeKind::Delete));
    assert_eq!(
        "replace".parse::<ChangeKind>(),
        Err(Error::InvalidRangeKind("replace".into()))
    );
    assert_eq!(ChangeKind::Delete.to_string(), "delete");
    assert_eq!(
        ChangeRange::try_from(("delete", 1, 3)),
        Ok(ChangeRange::new(ChangeKind::Delete, 1, 3))
    );
    assert_eq!(
        ChangeRange::try_from(("move", 1, 3)),
        Err(Error::InvalidRangeKind("move".into()))
    );
}

#[test]
#[cfg(feature = "serde")]
fn test_serde() {
    let range = ChangeRange::new(ChangeKind::Insert, 2, 5);
    let json = serde_json::to_string(&range).unwrap();
    assert_eq!(json, r#"{"kind":"insert","start":2,"end":5}"#);
    let back: ChangeRange = serde_json::from_str(&json).unwrap();
    assert_eq!(back, range);
}
