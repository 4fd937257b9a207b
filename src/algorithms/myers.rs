//! Myers' diff algorithm.
//!
//! * time: `O((N+M)D)`
//! * space: `O(N+M)`
//!
//! See [the article by Eugene W. Myers](http://www.xmailserver.org/diff2.pdf)
//! describing it.  This is the linear space variant: the middle snake is
//! searched from both ends and the halves on either side of it are solved
//! recursively.
use std::cmp::{max, min};
use std::ops::{Index, Range};

use crate::algorithms::utils::{common_prefix_len, common_suffix_len};
use crate::algorithms::DiffHook;
use crate::deadline_support::{deadline_exceeded, Instant};

fn modulo(a: isize, b: usize) -> usize {
    a.rem_euclid(b as isize) as usize
}

/// Diffs `old` between `old_range` against `new` between `new_range`.
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

/// Like [`diff`] but stops searching once the deadline is reached.
///
/// Whatever part of the input is unsolved by then is reported as deleted
/// and inserted as a whole.
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
    let prefix_len = common_prefix_len(old, old_range.clone(), new, new_range.clone());
    if prefix_len > 0 {
        d.equal(old_range.start, new_range.start, prefix_len)?;
    }
    let old_start = old_range.start + prefix_len;
    let new_start = new_range.start + prefix_len;

    let suffix_len = common_suffix_len(
        old,
        old_start..old_range.end,
        new,
        new_start..new_range.end,
    );
    let old_end = old_range.end - suffix_len;
    let new_end = new_range.end - suffix_len;

    conquer(
        d,
        old,
        old_start..old_end,
        new,
        new_start..new_end,
        deadline,
    )?;

    if suffix_len > 0 {
        d.equal(old_end, new_end, suffix_len)?;
    }
    d.finish()
}

fn conquer<Old, New, D>(
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
    let (i, i_) = (old_range.start, old_range.end);
    let (j, j_) = (new_range.start, new_range.end);

    if i_ > i && j_ > j {
        let n = i_ - i;
        let m = j_ - j;
        let l = (n + m) as isize;
        let z = 2 * min(n, m) + 2;
        let w = n as isize - m as isize;
        let mut fwd = vec![0; z];
        let mut bwd = vec![0; z];

        for h in 0..=(l / 2 + l % 2) {
            if deadline_exceeded(deadline) {
                break;
            }
            for &forward in &[true, false] {
                let (this, other) = if forward {
                    (&mut fwd, &mut bwd)
                } else {
                    (&mut bwd, &mut fwd)
                };
                let (k0, k1) = {
                    let (m, n) = (m as isize, n as isize);
                    (-(h - 2 * max(0, h - m)), h - 2 * max(0, h - n) + 1)
                };
                for k in (k0..k1).step_by(2) {
                    let mut a = if k == -h
                        || k != h && this[modulo(k - 1, z)] < this[modulo(k + 1, z)]
                    {
                        this[modulo(k + 1, z)]
                    } else {
                        this[modulo(k - 1, z)] + 1
                    };
                    let mut b = (a as isize - k) as usize;
                    let (s, t) = (a, b);
                    while a < n && b < m && {
                        let (e, f) = if forward {
                            (a, b)
                        } else {
                            (n - a - 1, m - b - 1)
                        };
                        new[j + f] == old[i + e]
                    } {
                        a += 1;
                        b += 1;
                    }
                    this[modulo(k, z)] = a;

                    let bound = if forward { h - 1 } else { h };
                    if (l % 2 == 1) == forward
                        && w - k >= -bound
                        && w - k <= bound
                        && this[modulo(k, z)] + other[modulo(w - k, z)] >= n
                    {
                        let (x, y, u, v) = if forward {
                            (s, t, a, b)
                        } else {
                            (n - a, m - b, n - s, m - t)
                        };
                        if h + bound > 1 || (x != u && y != v) {
                            conquer(d, old, i..i + x, new, j..j + y, deadline)?;
                            if x != u {
                                d.equal(i + x, j + y, u - x)?;
                            }
                            conquer(d, old, i + u..i_, new, j + v..j_, deadline)?;
                        } else if m > n {
                            d.equal(i, j, n)?;
                            d.insert(i + n, j + n, m - n)?;
                        } else if m < n {
                            d.equal(i, j, m)?;
                            d.delete(i + m, n - m, j + m)?;
                        }
                        return Ok(());
                    }
                }
            }
        }

        // out of time
        d.delete(i, n, j)?;
        d.insert(i_, j, m)?;
    } else if i_ > i {
        d.delete(i, i_ - i, j)?;
    } else if j_ > j {
        d.insert(i, j, j_ - j)?;
    }

    Ok(())
}

#[test]
fn test_modulo() {
    assert_eq!(modulo(-11, 10), 9);
    assert_eq!(modulo(23, 7), 2);
    assert_eq!(modulo(-12, 6), 0);
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
    use crate::algorithms::DiffOp;

    let a: &[usize] = &[0, 1, 2, 3, 4, 4, 4, 5];
    let b: &[usize] = &[0, 1, 2, 8, 9, 4, 4, 7];

    let mut d = crate::algorithms::Replace::new(crate::algorithms::Capture::new());
    diff(&mut d, a, 0..a.len(), b, 0..b.len()).unwrap();
    let ops = d.into_inner().into_ops();

    let matched: usize = ops
        .iter()
        .map(|op| match *op {
            DiffOp::Equal { len, .. } => len,
            _ => 0,
        })
        .sum();
    assert_eq!(matched, 5);
    assert_eq!(
        ops.first(),
        Some(&DiffOp::Equal {
            old_index: 0,
            new_index: 0,
            len: 3,
        })
    );
    let last = ops.last().unwrap();
    assert_eq!((last.old_range().end, last.new_range().end), (8, 8));
    assert!(!matches!(last, DiffOp::Equal { .. }));
}

#[test]
fn test_deadline_reached() {
    use crate::algorithms::{Capture, DiffOp};
    use crate::deadline_support::duration_to_deadline;

    let a: &[usize] = &[0, 1, 2, 3, 4, 5];
    let b: &[usize] = &[0, 9, 2, 8, 4, 5];

    let mut d = Capture::new();
    let deadline = duration_to_deadline(std::time::Duration::ZERO);
    diff_deadline(&mut d, a, 0..a.len(), b, 0..b.len(), deadline).unwrap();
    assert_eq!(
        d.into_ops(),
        vec![
            DiffOp::Equal {
                old_index: 0,
                new_index: 0,
                len: 1,
            },
            DiffOp::Delete {
                old_index: 1,
                old_len: 3,
                new_index: 1,
            },
            DiffOp::Insert {
                old_index: 4,
                new_index: 1,
                new_len: 3,
            },
            DiffOp::Equal {
                old_index: 4,
                new_index: 4,
                len: 2,
            },
        ]
    );
}
