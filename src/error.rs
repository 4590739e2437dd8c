use crate::parse::ParseError;
use crate::roll::RollError;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Roll(#[from] RollError),
    #[error("no dice term found in {0:?}")]
    InvalidNotation(String),
    /// An expression of a multi-expression batch failed. `index` counts from 0.
    #[error("expression {}: {source}", .index + 1)]
    Batch { index: usize, source: Box<Error> },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
