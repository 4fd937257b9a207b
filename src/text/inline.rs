//! Hints for replaced blocks.
//!
//! The lines of a replaced block are paired up before anything is marked.
//! The most similar removed/added pair is found first, then the lines above
//! and below it are paired the same way.  Only a pair gets column level
//! hints; lines without a counterpart are listed as they are.
use std::ops::Range;

use log::trace;

use crate::algorithms::{capture_diff_slices, get_diff_ratio, DiffOp};
use crate::text::{tokenize, trim_newline, DiffConfig, LineToken};

/// How many lines of each side are searched for a pair at once.
///
/// This keeps the search linear in the size of large blocks.
const PAIR_WINDOW: usize = 16;

/// A line of a replaced block broken into tokens.
struct Line<'s> {
    text: &'s str,
    tokens: Vec<&'s str>,
}

impl<'s> Line<'s> {
    fn new(text: &'s str, config: &DiffConfig) -> Line<'s> {
        Line {
            text,
            tokens: tokenize(trim_newline(text), config.granularity),
        }
    }

    /// The column each token starts at, followed by the width of the line.
    fn columns(&self) -> Vec<usize> {
        let mut rv = Vec::with_capacity(self.tokens.len() + 1);
        let mut column = 0;
        rv.push(column);
        for token in &self.tokens {
            column += token.chars().count();
            rv.push(column);
        }
        rv
    }

    /// A hint marking every column.
    fn full_hint(&self) -> Option<String> {
        let width = self.columns().last().copied().unwrap_or(0);
        if width == 0 {
            None
        } else {
            Some("^".repeat(width))
        }
    }
}

/// A removed and an added line that belong together.
enum Pair {
    Similar {
        old: usize,
        new: usize,
        ops: Vec<DiffOp>,
    },
    Identical {
        old: usize,
        new: usize,
    },
}

/// Upper bound of the ratio two lines can reach, from their lengths alone.
fn ratio_bound(old_len: usize, new_len: usize) -> f32 {
    let len = old_len + new_len;
    if len == 0 {
        1.0
    } else {
        2.0 * old_len.min(new_len) as f32 / len as f32
    }
}

/// Finds the most similar pair of lines.
///
/// The first pair with the highest ratio wins.  A pair of identical lines
/// is only used if no other pair reaches the cutoff.
fn best_pair(old: &[Line<'_>], new: &[Line<'_>], config: &DiffConfig) -> Option<Pair> {
    let mut best: Option<(f32, usize, usize, Vec<DiffOp>)> = None;
    let mut identical = None;

    for (j, new_line) in new.iter().enumerate() {
        for (i, old_line) in old.iter().enumerate() {
            if old_line.text == new_line.text {
                identical.get_or_insert((i, j));
                continue;
            }
            let (old_len, new_len) = (old_line.tokens.len(), new_line.tokens.len());
            let beats = |ratio: f32| match best {
                Some((best_ratio, ..)) => ratio > best_ratio,
                None => ratio >= config.cutoff,
            };
            if !beats(ratio_bound(old_len, new_len)) {
                continue;
            }
            let ops = capture_diff_slices(config.algorithm, &old_line.tokens, &new_line.tokens);
            let ratio = get_diff_ratio(&ops, old_len, new_len);
            if beats(ratio) {
                best = Some((ratio, i, j, ops));
            }
        }
    }

    match best {
        Some((ratio, old, new, ops)) => {
            trace!("paired lines {} and {} with ratio {:.3}", old, new, ratio);
            Some(Pair::Similar { old, new, ops })
        }
        None => identical.map(|(old, new)| Pair::Identical { old, new }),
    }
}

fn mark(markers: &mut [char], columns: &[usize], tokens: Range<usize>, marker: char) {
    for slot in &mut markers[columns[tokens.start]..columns[tokens.end]] {
        *slot = marker;
    }
}

fn finish_markers(markers: Vec<char>) -> Option<String> {
    let s: String = markers.into_iter().collect();
    let s = s.trim_end_matches(' ');
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Computes the hint markers of a pair of lines from their token diff.
fn pair_hints(
    old: &Line<'_>,
    new: &Line<'_>,
    ops: &[DiffOp],
) -> (Option<String>, Option<String>) {
    let old_columns = old.columns();
    let new_columns = new.columns();
    let mut old_markers = vec![' '; old_columns[old_columns.len() - 1]];
    let mut new_markers = vec![' '; new_columns[new_columns.len() - 1]];

    for op in ops {
        match *op {
            DiffOp::Equal { .. } => {}
            DiffOp::Delete { .. } => mark(&mut old_markers, &old_columns, op.old_range(), '-'),
            DiffOp::Insert { .. } => mark(&mut new_markers, &new_columns, op.new_range(), '+'),
            DiffOp::Replace { .. } => {
                mark(&mut old_markers, &old_columns, op.old_range(), '^');
                mark(&mut new_markers, &new_columns, op.new_range(), '^');
            }
        }
    }

    (finish_markers(old_markers), finish_markers(new_markers))
}

fn push_pair<'s>(
    rv: &mut Vec<LineToken<'s>>,
    old: &Line<'s>,
    new: &Line<'s>,
    ops: &[DiffOp],
) {
    let (old_hint, new_hint) = pair_hints(old, new, ops);
    rv.push(LineToken::Removed(old.text));
    rv.extend(old_hint.map(LineToken::Hint));
    rv.push(LineToken::Added(new.text));
    rv.extend(new_hint.map(LineToken::Hint));
}

/// Lists lines that have no similar counterpart on the other side.
fn push_unpaired<'s>(
    rv: &mut Vec<LineToken<'s>>,
    old: &[Line<'s>],
    new: &[Line<'s>],
    config: &DiffConfig,
) {
    for line in old {
        rv.push(LineToken::Removed(line.text));
        if config.whole_line_fallback {
            rv.extend(line.full_hint().map(LineToken::Hint));
        }
    }
    for line in new {
        rv.push(LineToken::Added(line.text));
        if config.whole_line_fallback {
            rv.extend(line.full_hint().map(LineToken::Hint));
        }
    }
}

fn pair_lines<'s>(
    rv: &mut Vec<LineToken<'s>>,
    mut old: &[Line<'s>],
    mut new: &[Line<'s>],
    config: &DiffConfig,
) {
    while !old.is_empty() && !new.is_empty() {
        let old_window = &old[..old.len().min(PAIR_WINDOW)];
        let new_window = &new[..new.len().min(PAIR_WINDOW)];

        let (i, j) = match best_pair(old_window, new_window, config) {
            Some(Pair::Similar { old: i, new: j, ops }) => {
                pair_lines(rv, &old[..i], &new[..j], config);
                push_pair(rv, &old[i], &new[j], &ops);
                (i, j)
            }
            Some(Pair::Identical { old: i, new: j }) => {
                pair_lines(rv, &old[..i], &new[..j], config);
                rv.push(LineToken::Context(old[i].text));
                (i, j)
            }
            None => {
                push_unpaired(rv, old_window, new_window, config);
                old = &old[old_window.len()..];
                new = &new[new_window.len()..];
                continue;
            }
        };
        old = &old[i + 1..];
        new = &new[j + 1..];
    }

    rv.extend(old.iter().map(|line| LineToken::Removed(line.text)));
    rv.extend(new.iter().map(|line| LineToken::Added(line.text)));
}

/// Appends the tokens of a replaced block.
pub(crate) fn push_replacement<'s>(
    rv: &mut Vec<LineToken<'s>>,
    old: &[&'s str],
    new: &[&'s str],
    config: &DiffConfig,
) {
    trace!("pairing {} removed with {} added lines", old.len(), new.len());
    let old: Vec<Line<'s>> = old.iter().map(|&text| Line::new(text, config)).collect();
    let new: Vec<Line<'s>> = new.iter().map(|&text| Line::new(text, config)).collect();
    pair_lines(rv, &old, &new, config);
}

#[cfg(test)]
fn replacement(
    old: &[&'static str],
    new: &[&'static str],
    config: &DiffConfig,
) -> Vec<LineToken<'static>> {
    let mut rv = Vec::new();
    push_replacement(&mut rv, old, new, config);
    rv
}

#[test]
fn test_word_hints() {
    assert_eq!(
        replacement(&["hello world\n"], &["hello earth\n"], &DiffConfig::default()),
        vec![
            LineToken::Removed("hello world\n"),
            LineToken::Hint("      ^^^^^".into()),
            LineToken::Added("hello earth\n"),
            LineToken::Hint("      ^^^^^".into()),
        ]
    );
}

#[test]
fn test_pure_insertion_and_deletion() {
    assert_eq!(
        replacement(&["a b\n"], &["a b c\n"], &DiffConfig::default()),
        vec![
            LineToken::Removed("a b\n"),
            LineToken::Added("a b c\n"),
            LineToken::Hint("   ++".into()),
        ]
    );
    assert_eq!(
        replacement(&["a b c\n"], &["a b\n"], &DiffConfig::default()),
        vec![
            LineToken::Removed("a b c\n"),
            LineToken::Hint("   --".into()),
            LineToken::Added("a b\n"),
        ]
    );
}

#[test]
fn test_char_hints() {
    let mut config = DiffConfig::default();
    config.granularity(crate::text::Granularity::Chars);
    assert_eq!(
        replacement(&["abcd\n"], &["abxd\n"], &config),
        vec![
            LineToken::Removed("abcd\n"),
            LineToken::Hint("  ^".into()),
            LineToken::Added("abxd\n"),
            LineToken::Hint("  ^".into()),
        ]
    );
}

#[test]
fn test_dissimilar_lines() {
    assert_eq!(
        replacement(&["foo\n"], &["bar\n", "quux\n"], &DiffConfig::default()),
        vec![
            LineToken::Removed("foo\n"),
            LineToken::Hint("^^^".into()),
            LineToken::Added("bar\n"),
            LineToken::Hint("^^^".into()),
            LineToken::Added("quux\n"),
            LineToken::Hint("^^^^".into()),
        ]
    );

    let mut config = DiffConfig::default();
    config.whole_line_fallback(false);
    assert_eq!(
        replacement(&["foo\n"], &["bar\n", "quux\n"], &config),
        vec![
            LineToken::Removed("foo\n"),
            LineToken::Added("bar\n"),
            LineToken::Added("quux\n"),
        ]
    );
}

#[test]
fn test_empty_lines_have_no_hints() {
    assert_eq!(
        replacement(&["\n"], &["x\n"], &DiffConfig::default()),
        vec![
            LineToken::Removed("\n"),
            LineToken::Added("x\n"),
            LineToken::Hint("^".into()),
        ]
    );
}

#[test]
fn test_code_point_columns() {
    let tokens = replacement(&["grüße welt\n"], &["grüße erde\n"], &DiffConfig::default());
    assert_eq!(tokens[1], LineToken::Hint("      ^^^^".into()));
    assert_eq!(tokens[3], LineToken::Hint("      ^^^^".into()));
}

#[test]
fn test_text_moving_between_lines() {
    let tokens = replacement(
        &["foo bar baz\n"],
        &["foo bar\n", "baz\n"],
        &DiffConfig::default(),
    );
    insta::assert_debug_snapshot!(tokens, @r###"
    [
        Removed(
            "foo bar baz\n",
        ),
        Hint(
            "       ----",
        ),
        Added(
            "foo bar\n",
        ),
        Added(
            "baz\n",
        ),
    ]
    "###);
}

#[test]
fn test_pairs_are_judged_on_their_own() {
    let tokens = replacement(
        &["hello world\n", "foo\n", "bar\n"],
        &["hello earth\n", "qux\n", "zap\n"],
        &DiffConfig::default(),
    );
    assert_eq!(
        tokens,
        vec![
            LineToken::Removed("hello world\n"),
            LineToken::Hint("      ^^^^^".into()),
            LineToken::Added("hello earth\n"),
            LineToken::Hint("      ^^^^^".into()),
            LineToken::Removed("foo\n"),
            LineToken::Hint("^^^".into()),
            LineToken::Removed("bar\n"),
            LineToken::Hint("^^^".into()),
            LineToken::Added("qux\n"),
            LineToken::Hint("^^^".into()),
            LineToken::Added("zap\n"),
            LineToken::Hint("^^^".into()),
        ]
    );
}

#[test]
fn test_best_pair_is_found_out_of_order() {
    let tokens = replacement(
        &["first line\n", "the second line\n"],
        &["the 2nd line\n"],
        &DiffConfig::default(),
    );
    assert_eq!(
        tokens,
        vec![
            LineToken::Removed("first line\n"),
            LineToken::Removed("the second line\n"),
            LineToken::Hint("    ^^^^^^".into()),
            LineToken::Added("the 2nd line\n"),
            LineToken::Hint("    ^^^".into()),
        ]
    );
}

#[test]
fn test_identical_lines_in_a_block() {
    let tokens = replacement(&["x\n", "same\n"], &["same\n", "y\n"], &DiffConfig::default());
    assert_eq!(
        tokens,
        vec![
            LineToken::Removed("x\n"),
            LineToken::Context("same\n"),
            LineToken::Added("y\n"),
        ]
    );
}

#[test]
fn test_large_blocks_pair_in_windows() {
    let old: Vec<String> = (0..100).map(|i| format!("actual {}\n", i)).collect();
    let new: Vec<String> = (0..100).map(|i| format!("expected {}\n", i)).collect();
    let old: Vec<&str> = old.iter().map(|x| x.as_str()).collect();
    let new: Vec<&str> = new.iter().map(|x| x.as_str()).collect();

    let mut rv = Vec::new();
    push_replacement(&mut rv, &old, &new, &DiffConfig::default());
    assert_eq!(rv.len(), 400);
    for (idx, chunk) in rv.chunks(4).enumerate() {
        assert_eq!(chunk[0], LineToken::Removed(old[idx]));
        assert_eq!(chunk[1], LineToken::Hint("^^^^^^".into()));
        assert_eq!(chunk[2], LineToken::Added(new[idx]));
        assert_eq!(chunk[3], LineToken::Hint("^^^^^^^^".into()));
    }
}
