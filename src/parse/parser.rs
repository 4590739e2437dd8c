use super::error::{ParseError, ParseErrorKind};
use super::{ast::*, lexer::*};
use crate::common::*;
use crate::dice::ParseDiceError;
use logos_iter::LogosIter;

type PResult<'a, T = Node<'a>> = Result<T, ParseError>;

pub struct Parser<'a> {
    source: &'a str,
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    const OPERAND_START: &'static [TokenKind] =
        &[TokenKind::Integer, TokenKind::Dice, TokenKind::LeftParen];

    const SIDES: &'static [TokenKind] = &[TokenKind::Integer, TokenKind::Fate];

    pub fn new(s: &'a str) -> Self {
        Self {
            source: s,
            lexer: lexer(s),
        }
    }

    /// Parses a whole expression: operands joined by arithmetic, each dice
    /// term or group optionally followed by one flag.
    pub fn parse(mut self) -> PResult<'a, Expression<'a>> {
        let roll = self.parse_sequence()?;
        self.expect_end()?;
        Ok(Expression::new(self.source.trim(), roll))
    }

    /// Parses the fixed single-term shapes, first match wins:
    /// `dice`, `dice op integer`, `dice flag`, `dice flag op integer`.
    pub fn parse_term(mut self) -> PResult<'a> {
        let mut node = Node::new_dice(self.parse_dice()?);
        if self.matches(TokenKind::Flag) {
            node = Node::new_flagged(node, self.parse_flag()?);
        }
        if self.matches_any(TokenKind::OPERATORS) {
            let op = self.parse_operator()?;
            let rhs = Node::new_integer(self.parse_integer()?);
            node = Node::new_binary(op, node, rhs);
        }
        self.expect_end()?;
        Ok(node)
    }

    fn advance(&mut self) -> Option<TokenKind> {
        self.lexer.next()
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.lexer.peek().map_or(false, |&peeked| peeked == kind)
    }

    fn matches_any(&mut self, options: &[TokenKind]) -> bool {
        self.lexer
            .peek()
            .map_or(false, |peeked| options.contains(peeked))
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.matches(expected) {
            self.lexer.next();
            Ok(())
        } else {
            self.unexpected_token(vec![expected])
        }
    }

    pub(crate) fn expect_end(&mut self) -> PResult<()> {
        if self.lexer.peek().is_some() {
            self.unexpected_token(vec![])
        } else {
            Ok(())
        }
    }

    fn error<T>(&mut self, kind: ParseErrorKind) -> PResult<T> {
        Err(ParseError {
            kind,
            span: self.lexer.span(),
            slice: self.lexer.slice().to_string(),
        })
    }

    fn unexpected_token<T>(&mut self, expected: Vec<TokenKind>) -> PResult<T> {
        let found = self.advance();
        if matches!(found, Some(TokenKind::Error)) {
            self.error(ParseErrorKind::UnexpectedString { expected })
        } else {
            self.error(ParseErrorKind::UnexpectedToken { found, expected })
        }
    }

    fn parse_sequence(&mut self) -> PResult<'a> {
        let mut lhs = self.parse_operand()?;

        while self.matches_any(TokenKind::OPERATORS) {
            let op = self.parse_operator()?;
            let rhs = self.parse_operand()?;

            lhs = Node::new_binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn parse_operand(&mut self) -> PResult<'a> {
        let atom = match self.lexer.peek().copied() {
            Some(TokenKind::Integer) => Node::new_integer(self.parse_integer()?),
            Some(TokenKind::Dice) => Node::new_dice(self.parse_dice()?),
            Some(TokenKind::LeftParen) => self.parse_group()?,
            _ => return self.unexpected_token(Self::OPERAND_START.to_vec()),
        };

        let node = if atom.accepts_flag() && self.matches(TokenKind::Flag) {
            let flag = self.parse_flag()?;
            Node::new_flagged(atom, flag)
        } else {
            atom
        };

        // At most one flag, and only directly after a dice term or group.
        if self.matches(TokenKind::Flag) {
            self.advance();
            return self.error(ParseErrorKind::FlagNeedsDice);
        }
        Ok(node)
    }

    fn parse_group(&mut self) -> PResult<'a> {
        self.consume(TokenKind::LeftParen)?;
        let start = self.lexer.span().end;

        let inner = self.parse_sequence()?;

        self.consume(TokenKind::RightParen)?;
        let end = self.lexer.span().start;

        let text = self.source[start..end].trim();
        Ok(Node::new_group(Expression::new(text, inner)))
    }

    pub(crate) fn parse_integer(&mut self) -> PResult<Int> {
        self.consume(TokenKind::Integer)?;
        let parsed = self.lexer.slice().parse::<Int>();
        match parsed {
            Ok(x) => Ok(x),
            Err(_) => self.error(ParseErrorKind::InvalidInteger),
        }
    }

    pub(crate) fn parse_dice(&mut self) -> PResult<Dice> {
        self.consume(TokenKind::Dice)?;
        let parsed = self.lexer.slice().parse::<Dice>();
        match parsed {
            Ok(dice) => Ok(dice),
            Err(why) => self.error(ParseErrorKind::InvalidDice(why)),
        }
    }

    pub(crate) fn parse_sides(&mut self) -> PResult<Sides> {
        if !self.matches_any(Self::SIDES) {
            return self.unexpected_token(Self::SIDES.to_vec());
        }
        self.advance();
        let parsed = self.lexer.slice().parse::<Sides>();
        match parsed {
            Ok(sides) => Ok(sides),
            Err(why) => self.error(ParseErrorKind::InvalidDice(ParseDiceError::InvalidSides(why))),
        }
    }

    pub(crate) fn parse_flag(&mut self) -> PResult<Flag> {
        self.consume(TokenKind::Flag)?;
        let parsed = self.lexer.slice().parse::<FlagName>();
        let name = match parsed {
            Ok(name) => name,
            Err(_) => return self.error(ParseErrorKind::UnknownFlag),
        };

        if !self.matches(TokenKind::LeftParen) {
            return Ok(Flag::new(name));
        }
        if !name.kind().takes_count() {
            self.advance();
            return self.error(ParseErrorKind::UnexpectedCount(name.kind()));
        }
        self.consume(TokenKind::LeftParen)?;
        let count = self.parse_integer()?;
        self.consume(TokenKind::RightParen)?;
        Ok(Flag::with_count(name, count))
    }

    pub(crate) fn parse_operator(&mut self) -> PResult<BinaryOperator> {
        match self.lexer.peek().copied().and_then(TokenKind::as_binary_op) {
            Some(op) => {
                self.advance();
                Ok(op)
            }
            None => self.unexpected_token(TokenKind::OPERATORS.to_vec()),
        }
    }
}
