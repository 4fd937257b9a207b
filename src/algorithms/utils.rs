use std::ops::{Index, Range};

/// Length of the run both ranges start with.
pub fn common_prefix_len<Old, New>(
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
) -> usize
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    New::Output: PartialEq<Old::Output>,
{
    old_range
        .zip(new_range)
        .take_while(|&(o, n)| new[n] == old[o])
        .count()
}

/// Length of the run both ranges end with.
pub fn common_suffix_len<Old, New>(
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
) -> usize
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    New::Output: PartialEq<Old::Output>,
{
    old_range
        .rev()
        .zip(new_range.rev())
        .take_while(|&(o, n)| new[n] == old[o])
        .count()
}

#[test]
fn test_common_prefix_len() {
    assert_eq!(common_prefix_len("".as_bytes(), 0..0, "".as_bytes(), 0..0), 0);
    assert_eq!(common_prefix_len("foobarbaz".as_bytes(), 0..9, "foobarblah".as_bytes(), 0..10), 7);
    assert_eq!(common_prefix_len("foobarbaz".as_bytes(), 0..9, "blablabla".as_bytes(), 0..9), 0);
    assert_eq!(common_prefix_len("foobarbaz".as_bytes(), 3..9, "foobarblah".as_bytes(), 3..10), 4);
}

#[test]
fn test_common_suffix_len() {
    assert_eq!(common_suffix_len("".as_bytes(), 0..0, "".as_bytes(), 0..0), 0);
    assert_eq!(common_suffix_len("1234".as_bytes(), 0..4, "X0001234".as_bytes(), 0..8), 4);
    assert_eq!(common_suffix_len("1234".as_bytes(), 0..4, "Xxxx".as_bytes(), 0..4), 0);
    assert_eq!(common_suffix_len("1234".as_bytes(), 2..4, "01234".as_bytes(), 2..5), 2);
}
