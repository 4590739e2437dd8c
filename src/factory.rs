//! Pulling a bare dice term out of arbitrary text.

use crate::dice::Dice;
use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

fn dice_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d*[dD][\dF]+").expect("dice pattern is a valid regex"))
}

/// The first dice term in `s`, ignoring everything around it.
pub fn match_dice(s: &str) -> Result<&str> {
    dice_pattern()
        .find(s)
        .map(|m| m.as_str())
        .ok_or_else(|| Error::InvalidNotation(s.to_owned()))
}

/// Builds the first dice term found in `notation`, so `1d6+2` and
/// `1d6!advantage` both give `1d6`.
pub fn create_dice(notation: &str) -> Result<Dice> {
    let term = match_dice(notation)?;
    term.parse()
        .map_err(|_| Error::InvalidNotation(notation.to_owned()))
}
