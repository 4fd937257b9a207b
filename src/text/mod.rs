//! Line level diffing of actual against expected output.
//!
//! The entry point is [`DiffConfig`], which produces a [`LineDiff`]:
//!
//! ```rust
//! # use mdiff::{DiffConfig, LineToken};
//! let diff = DiffConfig::default().diff_lines("a\nb\n", "a\nc\n");
//! assert_eq!(
//!     diff.tokens(),
//!     vec![
//!         LineToken::Context("a\n"),
//!         LineToken::Removed("b\n"),
//!         LineToken::Hint("^".into()),
//!         LineToken::Added("c\n"),
//!         LineToken::Hint("^".into()),
//!     ]
//! );
//! ```
//!
//! Lines replaced by other lines get a [`LineToken::Hint`] that marks the
//! changed columns.  How that is computed is controlled by the
//! [`Granularity`] and the similarity cutoff of the config.
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use log::debug;

use crate::algorithms::{capture_diff_deadline, get_diff_ratio, Algorithm, DiffOp};
use crate::colorize::{Colorizer, Palette};
use crate::deadline_support::duration_to_deadline;
use crate::error::Error;

mod inline;

/// The kind of a [`LineToken`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LineTag {
    Context,
    Removed,
    Added,
    Hint,
}

impl LineTag {
    /// The two character prefix lines of this kind are rendered with.
    pub fn prefix(self) -> &'static str {
        match self {
            LineTag::Context => "  ",
            LineTag::Removed => "- ",
            LineTag::Added => "+ ",
            LineTag::Hint => "? ",
        }
    }
}

/// One classified line of a diff.
///
/// Line values keep their line terminator.  Hints carry the bare markers.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "tag", content = "value", rename_all = "snake_case")
)]
pub enum LineToken<'s> {
    /// The line is the same on both sides.
    Context(&'s str),
    /// The line only exists in the actual output.
    Removed(&'s str),
    /// The line only exists in the expected output.
    Added(&'s str),
    /// Column markers for the preceding removed or added line.
    Hint(String),
}

impl<'s> LineToken<'s> {
    pub fn tag(&self) -> LineTag {
        match *self {
            LineToken::Context(_) => LineTag::Context,
            LineToken::Removed(_) => LineTag::Removed,
            LineToken::Added(_) => LineTag::Added,
            LineToken::Hint(_) => LineTag::Hint,
        }
    }

    pub fn prefix(&self) -> &'static str {
        self.tag().prefix()
    }

    /// The line value or the markers of a hint.
    pub fn value(&self) -> &str {
        match *self {
            LineToken::Context(value) | LineToken::Removed(value) | LineToken::Added(value) => {
                value
            }
            LineToken::Hint(ref markers) => markers,
        }
    }

    pub fn is_hint(&self) -> bool {
        matches!(*self, LineToken::Hint(_))
    }
}

impl<'s> fmt::Display for LineToken<'s> {
    /// Renders the token as a line with its prefix.
    ///
    /// Hints are rendered on their own line, so concatenating all tokens
    /// gives a plain text diff with hint lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix(), self.value())?;
        if self.is_hint() {
            writeln!(f)?;
        }
        Ok(())
    }
}

/// How replaced lines are broken up to compute their hints.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Granularity {
    /// Words, runs of whitespace and single punctuation characters.
    ///
    /// With the `unicode` feature the Unicode word boundaries are used.
    Words,
    /// Single code points.
    Chars,
}

impl Default for Granularity {
    fn default() -> Granularity {
        Granularity::Words
    }
}

/// A builder for line diffs.
///
/// ```rust
/// # use mdiff::{DiffConfig, Granularity};
/// let diff = DiffConfig::default()
///     .granularity(Granularity::Chars)
///     .cutoff(0.6)
///     .diff_lines("kitten\n", "sitting\n");
/// assert_eq!(diff.old_lines(), vec!["kitten\n"]);
/// ```
#[derive(Clone, Debug)]
pub struct DiffConfig {
    algorithm: Algorithm,
    cutoff: f32,
    granularity: Granularity,
    whole_line_fallback: bool,
    timeout: Option<Duration>,
}

impl Default for DiffConfig {
    fn default() -> DiffConfig {
        DiffConfig {
            algorithm: Algorithm::default(),
            cutoff: 0.5,
            granularity: Granularity::default(),
            whole_line_fallback: true,
            timeout: None,
        }
    }
}

impl DiffConfig {
    /// Changes the algorithm.
    ///
    /// The default algorithm is [`Algorithm::Myers`].
    pub fn algorithm(&mut self, alg: Algorithm) -> &mut Self {
        self.algorithm = alg;
        self
    }

    /// Sets a timeout for the line diff.
    ///
    /// Once it passes, the lines not aligned yet are treated as one
    /// replaced block.  There is no timeout by default.
    pub fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the similarity a pair of lines needs for column level hints.
    ///
    /// The ratio is computed over the tokens of the two lines (see
    /// [`get_diff_ratio`]).  Defaults to `0.5`.
    pub fn cutoff(&mut self, cutoff: f32) -> &mut Self {
        self.cutoff = cutoff;
        self
    }

    /// Changes the granularity of hints.  Defaults to [`Granularity::Words`].
    pub fn granularity(&mut self, granularity: Granularity) -> &mut Self {
        self.granularity = granularity;
        self
    }

    /// Controls what happens to replacements below the cutoff.
    ///
    /// Lines of a replaced block that have no similar counterpart are
    /// listed removed first, then added.  When enabled (the default) every
    /// column of such lines is marked, so the whole line is highlighted.
    /// When disabled they get no hint.
    pub fn whole_line_fallback(&mut self, yes: bool) -> &mut Self {
        self.whole_line_fallback = yes;
        self
    }

    /// Diffs the actual output against the expected output line by line.
    ///
    /// Both inputs are first made to end in a newline.
    pub fn diff_lines<'old, 'new>(
        &self,
        actual: &'old str,
        expected: &'new str,
    ) -> LineDiff<'old, 'new> {
        let old = normalize_newline(actual);
        let new = normalize_newline(expected);
        let old_lines: Vec<&str> = split_lines(&old).collect();
        let new_lines: Vec<&str> = split_lines(&new).collect();
        let deadline = self.timeout.and_then(duration_to_deadline);
        let ops = capture_diff_deadline(
            self.algorithm,
            &old_lines,
            0..old_lines.len(),
            &new_lines,
            0..new_lines.len(),
            deadline,
        );
        debug!(
            "diffed {} actual lines against {} expected lines into {} ops",
            old_lines.len(),
            new_lines.len(),
            ops.len()
        );
        let (old_len, new_len) = (old_lines.len(), new_lines.len());
        LineDiff {
            old,
            new,
            old_len,
            new_len,
            ops,
            config: self.clone(),
        }
    }
}

/// The line diff of actual against expected output.
pub struct LineDiff<'old, 'new> {
    old: Cow<'old, str>,
    new: Cow<'new, str>,
    old_len: usize,
    new_len: usize,
    ops: Vec<DiffOp>,
    config: DiffConfig,
}

impl<'old, 'new> LineDiff<'old, 'new> {
    /// The captured line operations.
    pub fn ops(&self) -> &[DiffOp] {
        &self.ops
    }

    /// The lines of the normalized actual output.
    pub fn old_lines(&self) -> Vec<&str> {
        split_lines(&self.old).collect()
    }

    /// The lines of the normalized expected output.
    pub fn new_lines(&self) -> Vec<&str> {
        split_lines(&self.new).collect()
    }

    /// The share of lines both sides have in common, in the range `0..=1`.
    pub fn ratio(&self) -> f32 {
        get_diff_ratio(&self.ops, self.old_len, self.new_len)
    }

    /// Expands the operations into line tokens.
    pub fn tokens(&self) -> Vec<LineToken<'_>> {
        let old_lines = self.old_lines();
        let new_lines = self.new_lines();
        let mut rv = Vec::new();

        for op in &self.ops {
            match *op {
                DiffOp::Equal { .. } => {
                    rv.extend(old_lines[op.old_range()].iter().map(|&x| LineToken::Context(x)));
                }
                DiffOp::Delete { .. } => {
                    rv.extend(old_lines[op.old_range()].iter().map(|&x| LineToken::Removed(x)));
                }
                DiffOp::Insert { .. } => {
                    rv.extend(new_lines[op.new_range()].iter().map(|&x| LineToken::Added(x)));
                }
                DiffOp::Replace { .. } => inline::push_replacement(
                    &mut rv,
                    &old_lines[op.old_range()],
                    &new_lines[op.new_range()],
                    &self.config,
                ),
            }
        }

        rv
    }

    /// Renders the diff with the ANSI [`Palette`].
    pub fn colorize(&self) -> Result<String, Error> {
        self.colorize_with(&Palette::default())
    }

    /// Renders the diff with a custom palette.
    pub fn colorize_with(&self, palette: &Palette) -> Result<String, Error> {
        let mut colorizer = Colorizer::new(palette);
        for token in self.tokens() {
            colorizer.push(&token)?;
        }
        Ok(colorizer.finish())
    }
}

/// Makes sure the text ends in exactly the newline it already has, or one.
pub fn normalize_newline(s: &str) -> Cow<'_, str> {
    if s.ends_with('\n') {
        Cow::Borrowed(s)
    } else {
        let mut rv = String::with_capacity(s.len() + 1);
        rv.push_str(s);
        rv.push('\n');
        Cow::Owned(rv)
    }
}

/// Strips a trailing `\r\n`, `\n` or `\r`.
pub fn trim_newline(s: &str) -> &str {
    if let Some(rest) = s.strip_suffix("\r\n") {
        rest
    } else if let Some(rest) = s.strip_suffix('\n') {
        rest
    } else if let Some(rest) = s.strip_suffix('\r') {
        rest
    } else {
        s
    }
}

/// Given a string splits it into lines.
///
/// This operation will preserve the newline separation character at the end.
/// It supports all common newline sequences (`\r\n`, `\n` as well as `\r`).
pub fn split_lines(s: &str) -> impl Iterator<Item = &str> {
    let mut iter = s.char_indices().peekable();
    let mut last_pos = 0;

    std::iter::from_fn(move || {
        if let Some((idx, c)) = iter.next() {
            let mut rv = None;
            if c == '\r' {
                if iter.peek().map_or(false, |x| x.1 == '\n') {
                    rv = Some(&s[last_pos..=idx + 1]);
                    iter.next();
                    last_pos = idx + 2;
                } else {
                    rv = Some(&s[last_pos..=idx]);
                    last_pos = idx + 1;
                }
            } else if c == '\n' {
                rv = Some(&s[last_pos..=idx]);
                last_pos = idx + 1;
            }
            Some(rv)
        } else if last_pos < s.len() {
            let tmp = &s[last_pos..];
            last_pos = s.len();
            Some(Some(tmp))
        } else {
            None
        }
    })
    .flatten()
}

#[derive(PartialEq, Eq, Clone, Copy)]
enum CharClass {
    Word,
    Space,
    Other,
}

impl CharClass {
    fn of(c: char) -> CharClass {
        if c.is_alphanumeric() || c == '_' {
            CharClass::Word
        } else if c.is_whitespace() {
            CharClass::Space
        } else {
            CharClass::Other
        }
    }
}

/// Splits text into words, runs of whitespace and other single characters.
pub fn split_words(s: &str) -> impl Iterator<Item = &str> {
    let mut iter = s.char_indices().peekable();

    std::iter::from_fn(move || {
        let (start, c) = iter.next()?;
        let class = CharClass::of(c);
        let mut end = start + c.len_utf8();
        if class != CharClass::Other {
            while let Some(&(idx, next)) = iter.peek() {
                if CharClass::of(next) != class {
                    break;
                }
                iter.next();
                end = idx + next.len_utf8();
            }
        }
        Some(&s[start..end])
    })
}

/// Splits text along Unicode word boundaries.
///
/// This requires the `unicode` feature.
#[cfg(feature = "unicode")]
pub fn split_unicode_words(s: &str) -> impl Iterator<Item = &str> {
    unicode_segmentation::UnicodeSegmentation::split_word_bounds(s)
}

/// Splits text into its code points.
pub fn split_chars(s: &str) -> impl Iterator<Item = &str> {
    s.char_indices().map(move |(idx, c)| &s[idx..idx + c.len_utf8()])
}

pub(crate) fn tokenize(s: &str, granularity: Granularity) -> Vec<&str> {
    match granularity {
        #[cfg(feature = "unicode")]
        Granularity::Words => split_unicode_words(s).collect(),
        #[cfg(not(feature = "unicode"))]
        Granularity::Words => split_words(s).collect(),
        Granularity::Chars => split_chars(s).collect(),
    }
}

#[test]
fn test_split_lines() {
    assert_eq!(
        split_lines("first\nsecond\rthird\r\nfourth\nlast").collect::<Vec<_>>(),
        vec!["first\n", "second\r", "third\r\n", "fourth\n", "last"]
    );
    assert_eq!(split_lines("\n\n").collect::<Vec<_>>(), vec!["\n", "\n"]);
    assert_eq!(split_lines("\n").collect::<Vec<_>>(), vec!["\n"]);
    assert!(split_lines("").collect::<Vec<_>>().is_empty());
}

#[test]
fn test_split_words() {
    assert_eq!(
        split_words("foo    bar_baz, (x)\t2").collect::<Vec<_>>(),
        ["foo", "    ", "bar_baz", ",", " ", "(", "x", ")", "\t", "2"]
    );
    assert_eq!(
        split_words("grüße welt").collect::<Vec<_>>(),
        ["grüße", " ", "welt"]
    );
    assert!(split_words("").next().is_none());
}

#[test]
fn test_split_chars() {
    assert_eq!(split_chars("aü!").collect::<Vec<_>>(), ["a", "ü", "!"]);
}

#[test]
fn test_normalize_newline() {
    assert_eq!(normalize_newline("x"), "x\n");
    assert_eq!(normalize_newline("x\n"), "x\n");
    assert_eq!(normalize_newline(""), "\n");
    assert!(matches!(normalize_newline("x\n"), Cow::Borrowed(_)));
    assert_eq!(
        normalize_newline(&normalize_newline("a\nb")),
        normalize_newline("a\nb")
    );
}

#[test]
fn test_trim_newline() {
    assert_eq!(trim_newline("a\r\n"), "a");
    assert_eq!(trim_newline("a\n"), "a");
    assert_eq!(trim_newline("a\r"), "a");
    assert_eq!(trim_newline("a"), "a");
    assert_eq!(trim_newline("a\n\n"), "a\n");
}

#[test]
fn test_line_tokens() {
    let diff = DiffConfig::default().diff_lines("foo\nbar\nbaz", "foo\nblah\nbaz\nqux\n");
    insta::assert_debug_snapshot!(diff.tokens(), @r###"
    [
        Context(
            "foo\n",
        ),
        Removed(
            "bar\n",
        ),
        Hint(
            "^^^",
        ),
        Added(
            "blah\n",
        ),
        Hint(
            "^^^^",
        ),
        Context(
            "baz\n",
        ),
        Added(
            "qux\n",
        ),
    ]
    "###);
}

#[test]
fn test_every_line_appears_once() {
    let old = "one\ntwo\nthree\nfour\nfive\n";
    let new = "zero\none\nthree\nfour and more\nfive\nsix\n";
    let diff = DiffConfig::default().diff_lines(old, new);
    let tokens = diff.tokens();

    let old_side: String = tokens
        .iter()
        .filter(|t| matches!(t.tag(), LineTag::Context | LineTag::Removed))
        .map(|t| t.value())
        .collect();
    let new_side: String = tokens
        .iter()
        .filter(|t| matches!(t.tag(), LineTag::Context | LineTag::Added))
        .map(|t| t.value())
        .collect();
    assert_eq!(old_side, old);
    assert_eq!(new_side, new);

    for (idx, token) in tokens.iter().enumerate() {
        if token.is_hint() {
            assert!(idx > 0);
            assert!(matches!(
                tokens[idx - 1].tag(),
                LineTag::Removed | LineTag::Added
            ));
        }
    }
}

#[test]
fn test_newline_normalization() {
    let a = DiffConfig::default().diff_lines("x\ny", "x\nz");
    let b = DiffConfig::default().diff_lines("x\ny\n", "x\nz\n");
    assert_eq!(a.tokens(), b.tokens());
    assert_eq!(a.ops(), b.ops());
}

#[test]
fn test_ratio() {
    let diff = DiffConfig::default().diff_lines("a\nb\nc\nd\n", "a\nb\nc\nx\n");
    assert_eq!(diff.ratio(), 0.75);
    assert_eq!(DiffConfig::default().diff_lines("", "").ratio(), 1.0);
}

#[test]
fn test_timeout_keeps_the_rendering() {
    let old = "a\nb\nc\nd\n";
    let new = "x\nb\ny\nd\n";
    let normal = DiffConfig::default().diff_lines(old, new);
    let rushed = DiffConfig::default()
        .timeout(Duration::ZERO)
        .diff_lines(old, new);

    assert_eq!(
        rushed.ops(),
        &[
            DiffOp::Replace {
                old_index: 0,
                old_len: 3,
                new_index: 0,
                new_len: 3,
            },
            DiffOp::Equal {
                old_index: 3,
                new_index: 3,
                len: 1,
            },
        ]
    );
    assert_ne!(normal.ops(), rushed.ops());
    assert_eq!(normal.tokens(), rushed.tokens());
}

#[test]
fn test_token_display() {
    let tokens = vec![
        LineToken::Context("a\n"),
        LineToken::Removed("b\n"),
        LineToken::Hint("^".into()),
        LineToken::Added("c\n"),
    ];
    let rendered: String = tokens.iter().map(|t| t.to_string()).collect();
    assert_eq!(rendered, "  a\n- b\n? ^\n+ c\n");
}

#[test]
#[cfg(feature = "serde")]
fn test_serde() {
    let tokens = vec![LineToken::Removed("b\n"), LineToken::Hint("^".into())];
    insta::assert_snapshot!(serde_json::to_string(&tokens).unwrap(), @r###"[{"tag":"removed","value":"b\n"},{"tag":"hint","value":"^"}]"###);
}
