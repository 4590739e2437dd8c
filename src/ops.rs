//! The operators that combine and select roll results.
//!
//! Each operator keeps the operands it was built with and can be evaluated
//! any number of times without changing them. Arithmetic operators want
//! numbers; selection operators want a pool of individual results. A rolled
//! [`tree::Dice`] is accepted by both: it counts as its total where a number
//! is needed and as its list of results where a pool is needed.

use crate::common::{BinaryOperator, Flag, FlagKind, Int};
use crate::roll::tree::{self, Eval};
use crate::roll::RollError;
use std::fmt;

type RResult<T> = Result<T, RollError>;

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Int(Int),
    Pool(Vec<Int>),
    Dice(tree::Dice),
}

impl Operand {
    pub fn to_int(&self) -> RResult<Int> {
        match self {
            Self::Int(x) => Ok(*x),
            Self::Dice(d) => Ok(d.total()),
            Self::Pool(_) => Err(RollError::NotANumber),
        }
    }

    pub fn to_pool(&self, op: &'static str) -> RResult<Vec<Int>> {
        match self {
            Self::Pool(xs) => Ok(xs.clone()),
            Self::Dice(d) => Ok(d.results().to_vec()),
            Self::Int(_) => Err(RollError::NotAPool(op)),
        }
    }
}

impl From<Int> for Operand {
    fn from(x: Int) -> Self {
        Self::Int(x)
    }
}

impl From<Vec<Int>> for Operand {
    fn from(xs: Vec<Int>) -> Self {
        Self::Pool(xs)
    }
}

impl From<tree::Dice> for Operand {
    fn from(d: tree::Dice) -> Self {
        Self::Dice(d)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) => fmt::Display::fmt(x, f),
            Self::Pool(xs) => fmt_pool(xs, f),
            Self::Dice(d) => fmt::Display::fmt(&d.dice, f),
        }
    }
}

fn fmt_pool(xs: &[Int], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    for (i, x) in xs.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", x)?;
    }
    f.write_str("]")
}

#[enum_dispatch::enum_dispatch]
pub trait Operate {
    /// The operands exactly as they were given to the operator.
    fn operands(&self) -> &[Operand];

    fn evaluate(&self) -> RResult<Operand>;
}

#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch::enum_dispatch(Operate)]
pub enum Operator {
    Add(Add),
    Subtract(Subtract),
    Multiply(Multiply),
    Divide(Divide),
    Advantage(Advantage),
    Disadvantage(Disadvantage),
    Keep(Keep),
    Drop(Drop),
    Total(Total),
    Grow(Grow),
    Shrink(Shrink),
    Reroll(Reroll),
}

impl Operator {
    pub fn binary(op: BinaryOperator, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
        match op {
            BinaryOperator::Add => Add::new(lhs, rhs).into(),
            BinaryOperator::Sub => Subtract::new(lhs, rhs).into(),
            BinaryOperator::Mul => Multiply::new(lhs, rhs).into(),
            BinaryOperator::Div => Divide::new(lhs, rhs).into(),
        }
    }

    /// The operator a flag stands for, applied to `target`. Flags that take
    /// a count fall back to [`Flag::DEFAULT_COUNT`].
    pub fn flag(flag: &Flag, target: impl Into<Operand>) -> Self {
        match flag.kind() {
            FlagKind::Advantage => Advantage::new(target).into(),
            FlagKind::Disadvantage => Disadvantage::new(target).into(),
            FlagKind::Keep => Keep::new(target, flag.count_or_default()).into(),
            FlagKind::Drop => Drop::new(target, flag.count_or_default()).into(),
            FlagKind::Grow => Grow::new(target).into(),
            FlagKind::Shrink => Shrink::new(target).into(),
            FlagKind::Reroll => Reroll::new(target).into(),
        }
    }
}

impl BinaryOperator {
    pub fn apply(self, a: Int, b: Int) -> RResult<Int> {
        match self {
            Self::Add => add(a, b),
            Self::Sub => subtract(a, b),
            Self::Mul => multiply(a, b),
            Self::Div => divide(a, b),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add(x) => fmt::Display::fmt(x, f),
            Self::Subtract(x) => fmt::Display::fmt(x, f),
            Self::Multiply(x) => fmt::Display::fmt(x, f),
            Self::Divide(x) => fmt::Display::fmt(x, f),
            Self::Advantage(x) => fmt::Display::fmt(x, f),
            Self::Disadvantage(x) => fmt::Display::fmt(x, f),
            Self::Keep(x) => fmt::Display::fmt(x, f),
            Self::Drop(x) => fmt::Display::fmt(x, f),
            Self::Total(x) => fmt::Display::fmt(x, f),
            Self::Grow(x) => fmt::Display::fmt(x, f),
            Self::Shrink(x) => fmt::Display::fmt(x, f),
            Self::Reroll(x) => fmt::Display::fmt(x, f),
        }
    }
}

macro_rules! arithmetic_op_impl {
    ($(($name:ident, $sym:literal, $func:ident)),+ $(,)?) => {$(
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name([Operand; 2]);

        impl $name {
            pub fn new(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
                Self([lhs.into(), rhs.into()])
            }
        }

        impl Operate for $name {
            fn operands(&self) -> &[Operand] {
                &self.0
            }

            fn evaluate(&self) -> RResult<Operand> {
                let [lhs, rhs] = &self.0;
                $func(lhs.to_int()?, rhs.to_int()?).map(Operand::Int)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}{}", self.0[0], $sym, self.0[1])
            }
        }
    )+};
}

arithmetic_op_impl!(
    (Add, "+", add),
    (Subtract, "-", subtract),
    (Multiply, "*", multiply),
    (Divide, "/", divide),
);

macro_rules! selection_op_impl {
    (@unary $(($name:ident, $disp:literal, |$pool:ident| $body:expr)),+ $(,)?) => {$(
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(Operand);

        impl $name {
            pub fn new(target: impl Into<Operand>) -> Self {
                Self(target.into())
            }
        }

        impl Operate for $name {
            fn operands(&self) -> &[Operand] {
                std::slice::from_ref(&self.0)
            }

            fn evaluate(&self) -> RResult<Operand> {
                let $pool = self.0.to_pool($disp)?;
                $body
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}!{}", self.0, $disp)
            }
        }
    )+};
    (@counted $(($name:ident, $disp:literal, $func:ident)),+ $(,)?) => {$(
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name([Operand; 2]);

        impl $name {
            pub fn new(target: impl Into<Operand>, n: impl Into<Operand>) -> Self {
                Self([target.into(), n.into()])
            }
        }

        impl Operate for $name {
            fn operands(&self) -> &[Operand] {
                &self.0
            }

            fn evaluate(&self) -> RResult<Operand> {
                let [target, n] = &self.0;
                let pool = target.to_pool($disp)?;
                Ok(Operand::Pool($func(&pool, n.to_int()?)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}!{}({})", self.0[0], $disp, self.0[1])
            }
        }
    )+};
}

selection_op_impl!(@unary
    (Advantage, "advantage", |pool| advantage(&pool).map(Operand::Int)),
    (Disadvantage, "disadvantage", |pool| disadvantage(&pool).map(Operand::Int)),
    (Total, "total", |pool| total(&pool).map(Operand::Int)),
    (Grow, "grow", |_pool| Err(RollError::UnsupportedFlag(FlagKind::Grow))),
    (Shrink, "shrink", |_pool| Err(RollError::UnsupportedFlag(FlagKind::Shrink))),
    (Reroll, "reroll", |_pool| Err(RollError::UnsupportedFlag(FlagKind::Reroll))),
);

selection_op_impl!(@counted
    (Keep, "keep", keep),
    (Drop, "drop", drop),
);

pub fn add(a: Int, b: Int) -> RResult<Int> {
    a.checked_add(b).ok_or(RollError::Overflow)
}

/// `a - b`, but never less than 1: a roll total does not go non-positive.
pub fn subtract(a: Int, b: Int) -> RResult<Int> {
    a.checked_sub(b).map(|x| x.max(1)).ok_or(RollError::Overflow)
}

pub fn multiply(a: Int, b: Int) -> RResult<Int> {
    a.checked_mul(b).ok_or(RollError::Overflow)
}

/// Integer division rounding towards negative infinity.
pub fn divide(a: Int, b: Int) -> RResult<Int> {
    if b == 0 {
        return Err(RollError::ZeroDivision);
    }
    let q = a.checked_div(b).ok_or(RollError::Overflow)?;
    if a % b != 0 && (a < 0) != (b < 0) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

pub fn advantage(pool: &[Int]) -> RResult<Int> {
    pool.iter()
        .copied()
        .max()
        .ok_or(RollError::EmptySelection(FlagKind::Advantage))
}

pub fn disadvantage(pool: &[Int]) -> RResult<Int> {
    pool.iter()
        .copied()
        .min()
        .ok_or(RollError::EmptySelection(FlagKind::Disadvantage))
}

/// Keeps the `n` highest results, in their original order.
pub fn keep(pool: &[Int], n: Int) -> Vec<Int> {
    if n <= 0 {
        return Vec::new();
    }
    let n = usize::try_from(n).unwrap_or(usize::MAX);
    if n >= pool.len() {
        pool.to_vec()
    } else {
        without_lowest(pool, pool.len() - n)
    }
}

/// Drops the `n` lowest results, keeping the rest in their original order.
pub fn drop(pool: &[Int], n: Int) -> Vec<Int> {
    if n <= 0 {
        return pool.to_vec();
    }
    let n = usize::try_from(n).unwrap_or(usize::MAX);
    if n >= pool.len() {
        Vec::new()
    } else {
        without_lowest(pool, n)
    }
}

fn without_lowest(pool: &[Int], n: usize) -> Vec<Int> {
    let mut lowest = pool.to_vec();
    lowest.sort_unstable();
    lowest.truncate(n);

    let mut ret = pool.to_vec();
    for x in lowest {
        if let Some(i) = ret.iter().position(|&y| y == x) {
            ret.remove(i);
        }
    }
    ret
}

pub fn total(pool: &[Int]) -> RResult<Int> {
    pool.iter()
        .try_fold(0, |acc: Int, &x| acc.checked_add(x))
        .ok_or(RollError::Overflow)
}
