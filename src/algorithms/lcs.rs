//! Longest common subsequence diff.
//!
//! The common prefix and suffix are reported as equal runs up front.  The
//! remaining middle part is solved with a dense dynamic programming table,
//! so this is only suited to small inputs.
//!
//! * time: `O(NM)`
//! * space: `O(NM)` for the middle part only
use std::ops::{Index, Range};

use crate::algorithms::utils::{common_prefix_len, common_suffix_len};
use crate::algorithms::DiffHook;
use crate::deadline_support::{deadline_exceeded, Instant};

/// Diffs `old` between `old_range` against `new` between `new_range`.
///
/// On a tie between dropping an old item and taking a new one, the old
/// item is deleted first, so a change always reports its deletions before
/// its insertions.
pub fn diff<Old, New, D>(
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
    diff_deadline(d, old, old_range, new, new_range, None)
}

/// Like [`diff`] but gives up filling the table once the deadline is
/// reached.
///
/// The middle part is then reported as deleted and inserted as a whole.
pub fn diff_deadline<Old, New, D>(
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
    if new_range.is_empty() {
        if !old_range.is_empty() {
            d.delete(old_range.start, old_range.len(), new_range.start)?;
        }
        return d.finish();
    } else if old_range.is_empty() {
        d.insert(old_range.start, new_range.start, new_range.len())?;
        return d.finish();
    }

    let prefix_len = common_prefix_len(old, old_range.clone(), new, new_range.clone());
    let suffix_len = common_suffix_len(
        old,
        old_range.start + prefix_len..old_range.end,
        new,
        new_range.start + prefix_len..new_range.end,
    );

    let old_mid = old_range.start + prefix_len..old_range.end - suffix_len;
    let new_mid = new_range.start + prefix_len..new_range.end - suffix_len;

    if prefix_len > 0 {
        d.equal(old_range.start, new_range.start, prefix_len)?;
    }

    let mut o = old_mid.start;
    let mut n = new_mid.start;

    if let Some(table) = LcsTable::new(old, old_mid.clone(), new, new_mid.clone(), deadline) {
        while o < old_mid.end && n < new_mid.end {
            let (i, j) = (o - old_mid.start, n - new_mid.start);
            if new[n] == old[o] {
                d.equal(o, n, 1)?;
                o += 1;
                n += 1;
            } else if table.get(i + 1, j) >= table.get(i, j + 1) {
                d.delete(o, 1, n)?;
                o += 1;
            } else {
                d.insert(o, n, 1)?;
                n += 1;
            }
        }
    }

    if o < old_mid.end {
        d.delete(o, old_mid.end - o, n)?;
    }
    if n < new_mid.end {
        d.insert(old_mid.end, n, new_mid.end - n)?;
    }

    if suffix_len > 0 {
        d.equal(old_mid.end, new_mid.end, suffix_len)?;
    }

    d.finish()
}

/// Lengths of the longest common subsequence of every pair of suffixes.
///
/// `get(i, j)` is the LCS length of `old[i..]` and `new[j..]`, relative to
/// the ranges the table was built for.
struct LcsTable {
    width: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    fn new<Old, New>(
        old: &Old,
        old_range: Range<usize>,
        new: &New,
        new_range: Range<usize>,
        deadline: Option<Instant>,
    ) -> Option<Self>
    where
        Old: Index<usize> + ?Sized,
        New: Index<usize> + ?Sized,
        New::Output: PartialEq<Old::Output>,
    {
        let width = new_range.len() + 1;
        let mut table = LcsTable {
            width,
            cells: vec![0; (old_range.len() + 1) * width],
        };

        for i in (0..old_range.len()).rev() {
            if deadline_exceeded(deadline) {
                return None;
            }
            for j in (0..new_range.len()).rev() {
                let val = if new[new_range.start + j] == old[old_range.start + i] {
                    table.get(i + 1, j + 1) + 1
                } else {
                    table.get(i + 1, j).max(table.get(i, j + 1))
                };
                table.cells[i * width + j] = val;
            }
        }

        Some(table)
    }

    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.width + j]
    }
}

#[test]
fn test_table() {
    let old = vec![2, 3];
    let new = vec![0, 1, 2];
    let table = LcsTable::new(&old, 0..2, &new, 0..3, None).unwrap();
    assert_eq!(table.get(0, 0), 1);
    assert_eq!(table.get(0, 2), 1);
    assert_eq!(table.get(1, 0), 0);
    assert_eq!(table.get(2, 3), 0);
}

#[test]
fn test_diff() {
    let a: &[usize] = &[0, 1, 2, 3, 4];
    let b: &[usize] = &[0, 1, 2, 9, 4];

    let mut d = crate::algorithms::Replace::new(crate::algorithms::Capture::new());
    diff(&mut d, a, 0..a.len(), b, 0..b.len()).unwrap();
    let ops = d.into_inner().into_ops();
    insta::assert_debug_snapshot!(ops, @r###"
    [
        Equal {
            old_index: 0,
            new_index: 0,
            len: 3,
        },
        Replace {
            old_index: 3,
            old_len: 1,
            new_index: 3,
            new_len: 1,
        },
        Equal {
            old_index: 4,
            new_index: 4,
            len: 1,
        },
    ]
    "###);
}

#[test]
fn test_contiguous() {
    let a: &[usize] = &[0, 1, 2, 3, 4, 4, 4, 5];
    let b: &[usize] = &[0, 1, 2, 8, 9, 4, 4, 7];

    let mut d = crate::algorithms::Replace::new(crate::algorithms::Capture::new());
    diff(&mut d, a, 0..a.len(), b, 0..b.len()).unwrap();
    let ops = d.into_inner().into_ops();
    insta::assert_debug_snapshot!(ops, @r###"
    [
        Equal {
            old_index: 0,
            new_index: 0,
            len: 3,
        },
        Replace {
            old_index: 3,
            old_len: 2,
            new_index: 3,
            new_len: 2,
        },
        Equal {
            old_index: 5,
            new_index: 5,
            len: 2,
        },
        Replace {
            old_index: 7,
            old_len: 1,
            new_index: 7,
            new_len: 1,
        },
    ]
    "###);
}

#[test]
fn test_empty_sides() {
    let a: &[usize] = &[];
    let b: &[usize] = &[1, 2];

    let mut d = crate::algorithms::Capture::new();
    diff(&mut d, a, 0..0, b, 0..2).unwrap();
    diff(&mut d, b, 0..2, a, 0..0).unwrap();
    diff(&mut d, a, 0..0, a, 0..0).unwrap();
    assert_eq!(
        d.ops(),
        &[
            crate::algorithms::DiffOp::Insert {
                old_index: 0,
                new_index: 0,
                new_len: 2,
            },
            crate::algorithms::DiffOp::Delete {
                old_index: 0,
                old_len: 2,
                new_index: 0,
            },
        ]
    );
}
