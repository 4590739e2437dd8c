mod ctx;
mod error;
mod roller;
mod stringify;
pub mod trace;
pub mod tree;
mod visit;

type RResult<T> = Result<T, RollError>;

pub use ctx::{DefaultRoller, RollContext, DEFAULT_MAX_ROLLS};
pub use error::RollError;
pub use roller::Roller;
pub use stringify::{MarkdownStringifier, SimpleStringifier, Stringify};
pub use trace::{LogTracer, NoTrace, Step, Tracer};
pub use tree::{Eval, Roll};
pub use visit::{AcceptRoll, VisitRoll};

#[cfg(test)]
pub(crate) use roller::{FixedRoller, SequenceRoller};
