use super::lexer::TokenKind;
use crate::common::FlagKind;
use crate::dice::ParseDiceError;
use std::fmt;
use std::ops::Range;

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

impl ParseError {
    /// Moves the span `by` bytes to the right, for errors found in a slice of
    /// a larger input.
    pub fn offset(mut self, by: usize) -> Self {
        self.span = self.span.start + by..self.span.end + by;
        self
    }
}

#[derive(Debug, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedToken {
        found: Option<TokenKind>,
        expected: Vec<TokenKind>,
    },
    UnexpectedString {
        expected: Vec<TokenKind>,
    },
    InvalidDice(ParseDiceError),
    InvalidInteger,
    UnknownFlag,
    FlagNeedsDice,
    UnexpectedCount(FlagKind),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { found, expected } => {
                match found {
                    Some(kind) => write!(f, "unexpected token {}; expected ", kind)?,
                    None => write!(f, "unexpected end of input; expected ")?,
                }
                fmt_expected(expected, f)
            }
            Self::UnexpectedString { expected } => {
                write!(f, "expected ")?;
                fmt_expected(expected, f)
            }
            Self::InvalidDice(why) => write!(f, "invalid dice literal: {}", why),
            Self::InvalidInteger => write!(f, "integer is too large"),
            Self::UnknownFlag => write!(f, "unknown flag"),
            Self::FlagNeedsDice => {
                write!(f, "flags can only follow a dice term or a parenthesized group")
            }
            Self::UnexpectedCount(kind) => write!(f, "{} does not take a count", kind),
        }
    }
}

fn fmt_expected(expected: &[TokenKind], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let len = expected.len();

    if expected.is_empty() {
        f.write_str("end of input")
    } else if len == 1 {
        f.write_str(expected[0].to_str())
    } else if len == 2 {
        write!(f, "{} or {}", expected[0].to_str(), expected[1].to_str())
    } else {
        for exp in &expected[..len - 1] {
            write!(f, "{}, ", exp.to_str())?;
        }
        write!(f, "or {}", expected[len - 1].to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unknown_flag(span: Range<usize>) -> ParseError {
        ParseError {
            kind: ParseErrorKind::UnknownFlag,
            span,
            slice: "!nope".to_string(),
        }
    }

    #[test]
    fn test_offset() {
        assert_eq!(unknown_flag(4..9).offset(4), unknown_flag(8..13));
        assert_eq!(unknown_flag(0..5).offset(0), unknown_flag(0..5));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            unknown_flag(8..13).to_string(),
            "error at position 8 (\"!nope\"): unknown flag"
        );
        let err = ParseError {
            kind: ParseErrorKind::UnexpectedToken {
                found: None,
                expected: vec![TokenKind::Integer, TokenKind::Dice, TokenKind::LeftParen],
            },
            span: 3..3,
            slice: String::new(),
        };
        assert!(err.to_string().starts_with("error at position 3 (\"\"): unexpected end of input; expected "));
    }
}
