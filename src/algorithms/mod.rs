//! Sequence diffing primitives.
//!
//! Both the line differ and the intra-line hint computation are built on
//! the same machinery: an [`Algorithm`] reports an edit script through a
//! [`DiffHook`], [`Replace`] coalesces it into maximal runs and [`Capture`]
//! records the result as [`DiffOp`]s.
//!
//! The hook only ever sees indexes, never values.  Anything that needs the
//! values looks them up in the original sequences.

mod capture;
mod hook;
mod replace;
mod utils;

use std::ops::{Index, Range};

pub use capture::*;
pub use hook::*;
pub use replace::*;

pub mod lcs;
pub mod myers;

use crate::deadline_support::Instant;

/// The algorithm used to compute an edit script.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Algorithm {
    /// [`myers`], linear in space.
    Myers,
    /// [`lcs`], quadratic in space.
    Lcs,
}

impl Default for Algorithm {
    /// Returns the default algorithm ([`Algorithm::Myers`]).
    fn default() -> Algorithm {
        Algorithm::Myers
    }
}

/// Creates a diff between old and new with the given algorithm.
///
/// Diffs `old` between `old_range` against `new` between `new_range`.
pub fn diff<Old, New, D>(
    alg: Algorithm,
    d: &mut D,
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
) -> Result<(), D::Error>
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    D: DiffHook,
    New::Output: PartialEq<Old::Output>,
{
    diff_deadline(alg, d, old, old_range, new, new_range, None)
}

/// Like [`diff`] but with a deadline after which the algorithm gives up.
pub fn diff_deadline<Old, New, D>(
    alg: Algorithm,
    d: &mut D,
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
    deadline: Option<Instant>,
) -> Result<(), D::Error>
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    D: DiffHook,
    New::Output: PartialEq<Old::Output>,
{
    match alg {
        Algorithm::Myers => myers::diff_deadline(d, old, old_range, new, new_range, deadline),
        Algorithm::Lcs => lcs::diff_deadline(d, old, old_range, new, new_range, deadline),
    }
}

/// Diffs old against new and returns the coalesced operations.
///
/// This always runs through [`Replace`] + [`Capture`], so adjacent
/// deletions and insertions come back as [`DiffOp::Replace`].
pub fn capture_diff_deadline<Old, New>(
    alg: Algorithm,
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
    deadline: Option<Instant>,
) -> Vec<DiffOp>
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    New::Output: PartialEq<Old::Output>,
{
    let mut d = Replace::new(Capture::new());
    match diff_deadline(alg, &mut d, old, old_range, new, new_range, deadline) {
        Ok(()) => d.into_inner().into_ops(),
        Err(never) => match never {},
    }
}

/// Like [`capture_diff_deadline`] but over two complete slices and
/// without a deadline.
pub fn capture_diff_slices<T>(alg: Algorithm, old: &[T], new: &[T]) -> Vec<DiffOp>
where
    T: PartialEq,
{
    capture_diff_deadline(alg, old, 0..old.len(), new, 0..new.len(), None)
}

/// Returns a measure of similarity in the range `0..=1`.
///
/// `1.0` means both sequences match completely, `0.0` that they share
/// nothing.  Two empty sequences are considered identical.
pub fn get_diff_ratio(ops: &[DiffOp], old_len: usize, new_len: usize) -> f32 {
    let matches = ops
        .iter()
        .map(|op| match *op {
            DiffOp::Equal { len, .. } => len,
            _ => 0,
        })
        .sum::<usize>();
    let len = old_len + new_len;
    if len == 0 {
        1.0
    } else {
        2.0 * matches as f32 / len as f32
    }
}

#[test]
fn test_ratio() {
    let old: Vec<char> = "abcd".chars().collect();
    let new: Vec<char> = "bcde".chars().collect();
    for &alg in &[Algorithm::Myers, Algorithm::Lcs] {
        let ops = capture_diff_slices(alg, &old, &new);
        assert_eq!(get_diff_ratio(&ops, old.len(), new.len()), 0.75);
    }
    assert_eq!(get_diff_ratio(&[], 0, 0), 1.0);
}

#[test]
fn test_capture_diff_slices() {
    let ops = capture_diff_slices(Algorithm::Myers, &["foo\n", "bar\n"], &["foo\n", "baz\n"]);
    assert_eq!(
        ops,
        vec![
            DiffOp::Equal {
                old_index: 0,
                new_index: 0,
                len: 1,
            },
            DiffOp::Replace {
                old_index: 1,
                old_len: 1,
                new_index: 1,
                new_len: 1,
            },
        ]
    );
}

#[test]
fn test_algorithms_agree_on_matches() {
    let cases: &[(&str, &str)] = &[
        ("kitten", "sitting"),
        ("the quick brown fox", "the quick red fox jumps"),
        ("abcabba", "cbabac"),
        ("", "abc"),
        ("same", "same"),
    ];
    for &(old, new) in cases {
        let old: Vec<char> = old.chars().collect();
        let new: Vec<char> = new.chars().collect();
        let myers = capture_diff_slices(Algorithm::Myers, &old, &new);
        let lcs = capture_diff_slices(Algorithm::Lcs, &old, &new);
        assert_eq!(
            get_diff_ratio(&myers, old.len(), new.len()),
            get_diff_ratio(&lcs, old.len(), new.len()),
            "{:?} vs {:?}",
            old,
            new
        );
    }
}
