//! Recognizers for each piece of dice notation on its own.
//!
//! Every function here must consume its entire input; trailing text of any
//! kind is an error rather than a partial match.

use super::ast::{Dice, Node};
use super::error::ParseError;
use super::parser::Parser;
use crate::common::*;

fn whole<'a, T>(
    s: &'a str,
    f: impl FnOnce(&mut Parser<'a>) -> Result<T, ParseError>,
) -> Result<T, ParseError> {
    let mut parser = Parser::new(s);
    let ret = f(&mut parser)?;
    parser.expect_end()?;
    Ok(ret)
}

/// One or more decimal digits.
pub fn integer(s: &str) -> Result<Int, ParseError> {
    whole(s, Parser::parse_integer)
}

/// An integer, or `fate`/`f` in any case.
pub fn dice_sides(s: &str) -> Result<Sides, ParseError> {
    whole(s, Parser::parse_sides)
}

/// An optional roll count, `d` in any case, then the sides.
pub fn dice(s: &str) -> Result<Dice, ParseError> {
    whole(s, Parser::parse_dice)
}

/// Exactly one of the known bang-prefixed flags, in any case.
pub fn flag(s: &str) -> Result<Flag, ParseError> {
    whole(s, Parser::parse_flag)
}

/// One of `+ - * /`.
pub fn operator(s: &str) -> Result<BinaryOperator, ParseError> {
    whole(s, Parser::parse_operator)
}

/// A single dice term with at most one flag and one integer modifier.
pub fn term(s: &str) -> Result<Node<'_>, ParseError> {
    Parser::new(s).parse_term()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ParseErrorKind;

    fn d(rolls: u32, sides: Sides) -> Dice {
        Dice::new(Num::new(rolls).unwrap(), sides)
    }

    fn poly(n: u32) -> Sides {
        Sides::try_from(n).unwrap()
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer("42"), Ok(42));
        assert!(integer("").is_err());
        assert!(integer("4a").is_err());
        assert!(integer("-4").is_err());
        assert_eq!(
            integer("99999999999999999999").unwrap_err().kind,
            ParseErrorKind::InvalidInteger
        );
    }

    #[test]
    fn test_dice_sides() {
        assert_eq!(dice_sides("20"), Ok(poly(20)));
        assert_eq!(dice_sides("fate"), Ok(Sides::Fate { abbreviated: false }));
        assert_eq!(dice_sides("F").map(|s| s.to_string()).as_deref(), Ok("f"));
        assert!(dice_sides("invalid").is_err());
    }

    #[test]
    fn test_dice() {
        assert_eq!(dice("1d6"), Ok(d(1, poly(6))));
        assert_eq!(dice("1D6"), Ok(d(1, poly(6))));
        assert_eq!(dice("d20"), Ok(d(1, poly(20))));
        assert_eq!(dice("3dfate"), Ok(d(3, Sides::Fate { abbreviated: false })));
        assert_eq!(dice("3dF"), Ok(d(3, Sides::Fate { abbreviated: true })));
        assert!(dice("1dZ").is_err());
        assert!(dice("1d1.2").is_err());
        assert!(dice("1d-6").is_err());
        assert!(dice("1t6").is_err());
    }

    #[test]
    fn test_flags() {
        for name in FlagName::ALL {
            let lower = name.as_str();
            assert_eq!(flag(lower).map(|f| f.name), Ok(*name));
            assert_eq!(flag(&lower.to_uppercase()).map(|f| f.name), Ok(*name));
            assert!(flag(&format!("{}s", lower)).is_err());
        }
        assert_eq!(flag("!aDvAnTaGe").map(|f| f.to_string()).as_deref(), Ok("!advantage"));
        assert!(flag("!advant").is_err());
        assert!(flag("!disadv").is_err());
        assert_eq!(flag("!shoop").unwrap_err().kind, ParseErrorKind::UnknownFlag);
    }

    #[test]
    fn test_operator() {
        assert_eq!(operator("+"), Ok(BinaryOperator::Add));
        assert_eq!(operator("-"), Ok(BinaryOperator::Sub));
        assert_eq!(operator("*"), Ok(BinaryOperator::Mul));
        assert_eq!(operator("/"), Ok(BinaryOperator::Div));
        assert!(operator("%").is_err());
        assert!(operator("++").is_err());
    }

    #[test]
    fn test_term() {
        assert_eq!(term("1d6"), Ok(Node::new_dice(d(1, poly(6)))));
        assert_eq!(term("1D6").map(|t| t.to_string()).as_deref(), Ok("1d6"));
        assert_eq!(term("1d6!keep").map(|t| t.to_string()).as_deref(), Ok("1d6!keep"));
        assert_eq!(term("1d6+5").map(|t| t.to_string()).as_deref(), Ok("1d6 + 5"));
        assert_eq!(
            term("1D6!KEEP+5").map(|t| t.to_string()).as_deref(),
            Ok("1d6!keep + 5")
        );
        for bad in ["1d1.2", "1d-6", "1t6", "1d6!keeper+5", "1d6a!keep+5", "1d6!advant+5"] {
            assert!(term(bad).is_err(), "{:?} should not parse", bad);
        }
    }
}
