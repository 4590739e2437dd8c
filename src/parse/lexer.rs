use crate::common::BinaryOperator;
use logos::Logos;
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;

pub(crate) type Lexer<'a> = PeekableLexer<'a, logos::Lexer<'a, TokenKind>, TokenKind>;

pub(crate) fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub enum TokenKind {
    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9]*[dD]([0-9]+|[fF]|[fF][aA][tT][eE])")]
    Dice,

    // Only the sides of a die, as accepted on their own by `dice_sides`.
    #[regex(r"[fF]|[fF][aA][tT][eE]")]
    Fate,

    // Any bang-prefixed word; the parser decides whether it is a known flag,
    // so `!advantageous` is rejected as a whole instead of matching a prefix.
    #[regex(r"![a-zA-Z]+")]
    Flag,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub const OPERATORS: &'static [Self] = &[Self::Plus, Self::Minus, Self::Star, Self::Slash];

    pub fn to_str(self) -> &'static str {
        use TokenKind::*;

        match self {
            Integer => "<integer>",
            Dice => "<dice>",
            Fate => "<fate>",
            Flag => "<flag>",
            LeftParen => "'('",
            RightParen => "')'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Error => "<error>",
        }
    }

    pub fn as_binary_op(self) -> Option<BinaryOperator> {
        use BinaryOperator::*;
        Some(match self {
            Self::Plus => Add,
            Self::Minus => Sub,
            Self::Star => Mul,
            Self::Slash => Div,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(s: &str) -> Vec<TokenKind> {
        TokenKind::lexer(s).collect()
    }

    #[test]
    fn test_lex_dice() {
        use TokenKind::*;

        assert_eq!(kinds("2d20"), vec![Dice]);
        assert_eq!(kinds("D6"), vec![Dice]);
        assert_eq!(kinds("3dF 4dfate"), vec![Dice, Dice]);
        assert_eq!(kinds("1d6a"), vec![Dice, Error]);
        assert_eq!(kinds("1t6"), vec![Integer, Error, Integer]);
    }

    #[test]
    fn test_lex_expression() {
        use TokenKind::*;

        assert_eq!(
            kinds("(2d20 + 5)!ADV * 3"),
            vec![LeftParen, Dice, Plus, Integer, RightParen, Flag, Star, Integer]
        );
        assert_eq!(kinds("!keep(2)"), vec![Flag, LeftParen, Integer, RightParen]);
        assert_eq!(kinds("!advantageous"), vec![Flag]);
    }
}
