use crate::common::FlagKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RollError {
    #[error("too many dice rolled")]
    TooManyRolls,
    #[error("cannot divide by zero")]
    ZeroDivision,
    #[error("integer overflow")]
    Overflow,
    #[error("cannot take {0} of no results")]
    EmptySelection(FlagKind),
    #[error("a list of results cannot be used as a number")]
    NotANumber,
    #[error("{0} needs a list of results, not a number")]
    NotAPool(&'static str),
    #[error("{0} is not supported")]
    UnsupportedFlag(FlagKind),
}
