//! Parsing and rolling of tabletop dice notation such as `2d20!advantage+5`.
//!
//! ```no_run
//! let totals = dice_notation::roll("2d20!adv + 5; 3d6").unwrap();
//! assert_eq!(totals.len(), 2);
//! ```

pub mod common;
mod dice;
pub mod error;
mod factory;
pub mod ops;
pub mod parse;
pub mod roll;

pub use common::Int;
pub use dice::{Dice, ParseDiceError};
pub use error::{Error, Result};
pub use factory::{create_dice, match_dice};
pub use parse::parse;
pub use roll::{Roll, RollContext, Roller, Tracer};

/// The independent expressions of a batch, split on `,` and `;`.
pub fn split(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c| c == ',' || c == ';')
}

/// Rolls every expression in `text` and returns their totals in order.
pub fn roll(text: &str) -> Result<Vec<Int>> {
    roll_with(text, &mut RollContext::default())
}

pub fn roll_with<R: Roller, T: Tracer>(text: &str, ctx: &mut RollContext<R, T>) -> Result<Vec<Int>> {
    let rolls = roll_detailed(text, ctx)?;
    Ok(rolls.iter().map(Roll::total).collect())
}

/// Like [`roll_with`], but keeps every evaluated roll for display. The first
/// expression that fails to parse or evaluate fails the whole batch. When
/// `text` holds more than one expression the error is wrapped in
/// [`Error::Batch`], and parse error spans are positions in `text`.
pub fn roll_detailed<'a, R: Roller, T: Tracer>(
    text: &'a str,
    ctx: &mut RollContext<R, T>,
) -> Result<Vec<Roll<'a>>> {
    let pieces: Vec<&'a str> = split(text).collect();
    let batched = pieces.len() > 1;
    let mut rolls = Vec::with_capacity(pieces.len());
    let mut start = 0;

    for (index, expr) in pieces.into_iter().enumerate() {
        let roll = parse(expr)
            .map_err(|e| Error::Parse(e.offset(start)))
            .and_then(|ast| ctx.eval(&ast).map_err(Error::from));
        match roll {
            Ok(roll) => rolls.push(roll),
            Err(source) if batched => {
                return Err(Error::Batch {
                    index,
                    source: Box::new(source),
                })
            }
            Err(e) => return Err(e),
        }
        // separators are one byte
        start += expr.len() + 1;
    }

    Ok(rolls)
}
