use crate::common::*;
pub use crate::dice::Dice;
use std::fmt;

/// A parsed expression together with the text it was parsed from.
///
/// Parenthesized groups are expressions of their own, so the tree of a
/// notation like `(2d20+5)!adv` holds an inner `Expression` for `2d20+5`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression<'a> {
    pub(crate) text: &'a str,
    pub(crate) roll: Node<'a>,
}

impl<'a> Expression<'a> {
    pub(crate) fn new(text: &'a str, roll: Node<'a>) -> Self {
        Self { text, roll }
    }

    /// The exact source text of this expression.
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn root(&self) -> &Node<'a> {
        &self.roll
    }
}

impl fmt::Display for Expression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.roll, f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    Integer(Int),
    Dice(Dice),
    Group(Box<Expression<'a>>),
    Flagged(Box<Node<'a>>, Flag),
    Binary(Box<Node<'a>>, BinaryOperator, Box<Node<'a>>),
}

impl<'a> Node<'a> {
    pub fn new_integer(x: Int) -> Self {
        Self::Integer(x)
    }

    pub fn new_dice(dice: Dice) -> Self {
        Self::Dice(dice)
    }

    pub fn new_group(inner: Expression<'a>) -> Self {
        Self::Group(Box::new(inner))
    }

    pub fn new_flagged(target: Self, flag: Flag) -> Self {
        Self::Flagged(Box::new(target), flag)
    }

    pub fn new_binary(op: BinaryOperator, lhs: Self, rhs: Self) -> Self {
        Self::Binary(Box::new(lhs), op, Box::new(rhs))
    }

    /// Whether a flag may be attached directly to this node.
    pub fn accepts_flag(&self) -> bool {
        matches!(self, Self::Dice(_) | Self::Group(_))
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(x) => fmt::Display::fmt(x, f),
            Self::Dice(d) => fmt::Display::fmt(d, f),
            Self::Group(e) => write!(f, "({})", e),
            Self::Flagged(x, flag) => write!(f, "{}{}", x, flag),
            Self::Binary(l, op, r) => write!(f, "{} {} {}", l, op, r),
        }
    }
}
