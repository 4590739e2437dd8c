//! Hooks for watching the evaluator work.
//!
//! Every die rolled and every operator applied is reported to the
//! [`Tracer`] held by the [`RollContext`](super::RollContext) as a [`Step`].

use super::tree::Dice;
use crate::ops::{Operand, Operator};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step<'s> {
    /// A dice term was rolled.
    Rolled(&'s Dice),
    /// An arithmetic operator was applied.
    Applied {
        operator: &'s Operator,
        result: &'s Operand,
    },
    /// A flag selected from a list of results.
    Selected {
        operator: &'s Operator,
        result: &'s Operand,
    },
}

impl fmt::Display for Step<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rolled(dice) => write!(f, "rolled {} -> {:?}", dice.dice, dice.results()),
            Self::Applied { operator, result } => write!(f, "applied {} = {}", operator, result),
            Self::Selected { operator, result } => write!(f, "selected {} = {}", operator, result),
        }
    }
}

pub trait Tracer {
    fn trace(&mut self, step: &Step<'_>);
}

impl<F: FnMut(&Step<'_>)> Tracer for F {
    fn trace(&mut self, step: &Step<'_>) {
        self(step)
    }
}

/// Discards every step.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl Tracer for NoTrace {
    fn trace(&mut self, _step: &Step<'_>) {}
}

/// Forwards every step to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn trace(&mut self, step: &Step<'_>) {
        log::debug!(target: "dice_notation::roll", "{}", step);
    }
}
