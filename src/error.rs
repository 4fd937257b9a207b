use thiserror::Error;

/// Errors raised while turning a token stream into a colorized diff.
///
/// None of these are caused by the compared texts themselves.  They signal
/// a hint line or a change kind that breaks the contract between the line
/// differ and the colorizer, so the diff is abandoned instead of being
/// rendered half-way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A hint line contains something other than `' '`, `+`, `-` or `^`.
    #[error("unexpected character {character:?} at column {column} of hint line")]
    InvalidHintCharacter { character: char, column: usize },
    /// A change kind tag is neither `insert` nor `delete`.
    #[error("unexpected change kind {0:?}")]
    InvalidRangeKind(String),
    /// A hint token does not directly follow a removed or added line.
    #[error("hint at token {index} does not follow a removed or added line")]
    UnanchoredHint { index: usize },
}

#[test]
fn test_messages() {
    let err = Error::InvalidHintCharacter {
        character: '?',
        column: 3,
    };
    assert_eq!(
        err.to_string(),
        "unexpected character '?' at column 3 of hint line"
    );
    assert_eq!(
        Error::InvalidRangeKind("equal".into()).to_string(),
        "unexpected change kind \"equal\""
    );
    assert_eq!(
        Error::UnanchoredHint { index: 0 }.to_string(),
        "hint at token 0 does not follow a removed or added line"
    );
}
