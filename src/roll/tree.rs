use super::visit::AcceptRoll;
use super::{RResult, RollError};
use crate::common::*;
use crate::parse::ast;

/// Read access to an evaluated node.
///
/// Every value is computed once while the tree is built, so reading it again
/// never rolls anything.
#[enum_dispatch::enum_dispatch]
pub trait Eval {
    fn total(&self) -> Int;

    /// The individual results a flag on this node chooses from.
    fn pool(&self) -> RResult<Vec<Int>>;
}

/// An evaluated expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Roll<'a> {
    pub(crate) text: &'a str,
    pub(crate) tree: RollTree<'a>,
}

impl<'a> Roll<'a> {
    pub(crate) fn new(text: &'a str, tree: RollTree<'a>) -> Self {
        Self { text, tree }
    }

    /// The notation this roll was evaluated from.
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn tree(&self) -> &RollTree<'a> {
        &self.tree
    }

    pub fn total(&self) -> Int {
        self.tree.total()
    }
}

impl Eval for Roll<'_> {
    fn total(&self) -> Int {
        self.tree.total()
    }

    fn pool(&self) -> RResult<Vec<Int>> {
        self.tree.pool()
    }
}

#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch::enum_dispatch(Eval, AcceptRoll)]
pub enum RollTree<'a> {
    Literal(Literal),
    Dice(Dice),
    Grouping(Grouping<'a>),
    Flagged(Flagged<'a>),
    Binary(Binary<'a>),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Literal(pub Int);

impl Eval for Literal {
    fn total(&self) -> Int {
        self.0
    }

    /// A number on its own has no results to select from.
    fn pool(&self) -> RResult<Vec<Int>> {
        Err(RollError::NotAPool("literal"))
    }
}

/// A rolled dice term.
#[derive(Debug, Clone, PartialEq)]
pub struct Dice {
    pub dice: ast::Dice,
    results: NonEmpty<Int>,
    total: Int,
}

impl Dice {
    pub(crate) fn new(dice: ast::Dice, results: NonEmpty<Int>, total: Int) -> Self {
        Self {
            dice,
            results,
            total,
        }
    }

    /// One result per die, in the order they were rolled.
    pub fn results(&self) -> &[Int] {
        self.results.as_slice()
    }

    pub fn sides(&self) -> Sides {
        self.dice.sides
    }
}

impl Eval for Dice {
    fn total(&self) -> Int {
        self.total
    }

    fn pool(&self) -> RResult<Vec<Int>> {
        Ok(self.results.to_vec())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grouping<'a> {
    pub text: &'a str,
    pub inner: Box<RollTree<'a>>,
}

impl<'a> Grouping<'a> {
    pub fn new(text: &'a str, inner: RollTree<'a>) -> Self {
        Self {
            text,
            inner: Box::new(inner),
        }
    }
}

impl Eval for Grouping<'_> {
    fn total(&self) -> Int {
        self.inner.total()
    }

    fn pool(&self) -> RResult<Vec<Int>> {
        self.inner.pool()
    }
}

/// A dice term or group with a flag applied to its results.
#[derive(Debug, Clone, PartialEq)]
pub struct Flagged<'a> {
    pub target: Box<RollTree<'a>>,
    pub flag: Flag,
    /// The results the flag chose from.
    pub pool: Vec<Int>,
    /// The results the flag kept.
    pub selected: Vec<Int>,
    total: Int,
}

impl<'a> Flagged<'a> {
    pub(crate) fn new(
        target: RollTree<'a>,
        flag: Flag,
        pool: Vec<Int>,
        selected: Vec<Int>,
        total: Int,
    ) -> Self {
        Self {
            target: Box::new(target),
            flag,
            pool,
            selected,
            total,
        }
    }

    /// For each entry of `pool`, whether the flag kept it. Equal results
    /// are matched left to right.
    pub fn kept(&self) -> Vec<bool> {
        let mut remaining = self.selected.clone();
        self.pool
            .iter()
            .map(|x| match remaining.iter().position(|y| y == x) {
                Some(i) => {
                    remaining.swap_remove(i);
                    true
                }
                None => false,
            })
            .collect()
    }
}

impl Eval for Flagged<'_> {
    fn total(&self) -> Int {
        self.total
    }

    fn pool(&self) -> RResult<Vec<Int>> {
        Ok(self.selected.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary<'a> {
    pub left: Box<RollTree<'a>>,
    pub op: BinaryOperator,
    pub right: Box<RollTree<'a>>,
    total: Int,
}

impl<'a> Binary<'a> {
    pub(crate) fn new(left: RollTree<'a>, op: BinaryOperator, right: RollTree<'a>, total: Int) -> Self {
        Self {
            left: Box::new(left),
            op,
            right: Box::new(right),
            total,
        }
    }
}

impl Eval for Binary<'_> {
    fn total(&self) -> Int {
        self.total
    }

    /// The left side's results, each combined with the right side's total,
    /// so `(2d20 + 5)!adv` picks the better of the two d20s plus 5.
    fn pool(&self) -> RResult<Vec<Int>> {
        let right = self.right.total();
        self.left
            .pool()?
            .into_iter()
            .map(|x| self.op.apply(x, right))
            .collect()
    }
}
