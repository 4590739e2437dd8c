use std::fmt::{self, Write};
use std::num::NonZeroU32;
use std::str::FromStr;
pub use vec1::vec1;

pub type Int = i64;
pub type UInt = u32;
pub type NonZeroUInt = NonZeroU32;

/// The number of dice rolled together in one term.
pub type Num = NonZeroU32;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// The faces of a die: a plain polyhedral die or a fate die.
///
/// Fate dice remember whether they were written as `f` or `fate` so the
/// notation can be echoed back the way it was written.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Sides {
    Poly(NonZeroUInt),
    Fate { abbreviated: bool },
}

impl Sides {
    /// The inclusive range of faces a single die of this kind can show.
    pub fn bounds(self) -> (Int, Int) {
        match self {
            Self::Poly(n) => (1, Int::from(n.get())),
            Self::Fate { .. } => (-1, 1),
        }
    }
}

impl fmt::Display for Sides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poly(x) => fmt::Display::fmt(x, f),
            Self::Fate { abbreviated: true } => f.write_char('f'),
            Self::Fate { abbreviated: false } => f.write_str("fate"),
        }
    }
}

impl TryFrom<UInt> for Sides {
    type Error = std::num::TryFromIntError;

    fn try_from(value: UInt) -> Result<Self, Self::Error> {
        NonZeroUInt::try_from(value).map(Self::Poly)
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseSidesError {
    #[error("{0}")]
    InvalidNumber(#[from] std::num::ParseIntError),
    #[error("dice must have at least one side")]
    Zero,
    #[error("{0:?} is neither a number nor a fate die")]
    Unknown(String),
}

impl FromStr for Sides {
    type Err = ParseSidesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("f") {
            Ok(Self::Fate { abbreviated: true })
        } else if s.eq_ignore_ascii_case("fate") {
            Ok(Self::Fate { abbreviated: false })
        } else if s.bytes().all(|b| b.is_ascii_digit()) && !s.is_empty() {
            let n: UInt = s.parse()?;
            NonZeroUInt::new(n).map(Self::Poly).ok_or(ParseSidesError::Zero)
        } else {
            Err(ParseSidesError::Unknown(s.to_owned()))
        }
    }
}

/// The four arithmetic operators. They share a single precedence level and
/// associate strictly left to right.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperator {
    pub const ALL: &'static [Self] = &[Self::Add, Self::Sub, Self::Mul, Self::Div];

    pub fn as_char(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.as_char())
    }
}

impl FromStr for BinaryOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            _ => return Err(s.to_owned()),
        })
    }
}

/// What a flag does to the results of the term it is attached to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FlagKind {
    Advantage,
    Disadvantage,
    Keep,
    Drop,
    Grow,
    Shrink,
    /// Rerolling has no flag spelling, so no [`FlagName`] maps to it.
    Reroll,
}

impl FlagKind {
    /// Whether the flag accepts a `(n)` count argument.
    pub const fn takes_count(self) -> bool {
        matches!(self, Self::Keep | Self::Drop)
    }
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Advantage => "advantage",
            Self::Disadvantage => "disadvantage",
            Self::Keep => "keep",
            Self::Drop => "drop",
            Self::Grow => "grow",
            Self::Shrink => "shrink",
            Self::Reroll => "reroll",
        };
        f.write_str(s)
    }
}

/// The spelling a flag was written with. Several spellings share a
/// [`FlagKind`], e.g. `!adv` and `!advantage`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FlagName {
    Advantage,
    Adv,
    Disadvantage,
    Dis,
    Drop,
    Grow,
    Keep,
    Shrink,
    Take,
}

impl FlagName {
    pub const ALL: &'static [Self] = &[
        Self::Advantage,
        Self::Adv,
        Self::Disadvantage,
        Self::Dis,
        Self::Drop,
        Self::Grow,
        Self::Keep,
        Self::Shrink,
        Self::Take,
    ];

    /// The canonical, lowercase literal including the leading `!`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Advantage => "!advantage",
            Self::Adv => "!adv",
            Self::Disadvantage => "!disadvantage",
            Self::Dis => "!dis",
            Self::Drop => "!drop",
            Self::Grow => "!grow",
            Self::Keep => "!keep",
            Self::Shrink => "!shrink",
            Self::Take => "!take",
        }
    }

    pub const fn kind(self) -> FlagKind {
        match self {
            Self::Advantage | Self::Adv => FlagKind::Advantage,
            Self::Disadvantage | Self::Dis => FlagKind::Disadvantage,
            Self::Drop => FlagKind::Drop,
            Self::Grow => FlagKind::Grow,
            Self::Keep | Self::Take => FlagKind::Keep,
            Self::Shrink => FlagKind::Shrink,
        }
    }
}

impl fmt::Display for FlagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlagName {
    type Err = String;

    /// Matches the whole literal, ignoring case. `!advantageous` is not
    /// `!advantage` followed by junk, it is simply unknown.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_owned())
    }
}

/// A flag as written after a term, with its optional count.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Flag {
    pub name: FlagName,
    pub count: Option<Int>,
}

impl Flag {
    pub const DEFAULT_COUNT: Int = 1;

    pub const fn new(name: FlagName) -> Self {
        Self { name, count: None }
    }

    pub const fn with_count(name: FlagName, count: Int) -> Self {
        Self {
            name,
            count: Some(count),
        }
    }

    pub const fn kind(&self) -> FlagKind {
        self.name.kind()
    }

    pub fn count_or_default(&self) -> Int {
        self.count.unwrap_or(Self::DEFAULT_COUNT)
    }
}

impl From<FlagName> for Flag {
    fn from(name: FlagName) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name, f)?;
        if let Some(n) = self.count {
            write!(f, "({})", n)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sides_from_str() {
        assert_eq!("20".parse::<Sides>(), Ok(Sides::try_from(20u32).unwrap()));
        assert_eq!("F".parse::<Sides>(), Ok(Sides::Fate { abbreviated: true }));
        assert_eq!("FaTe".parse::<Sides>(), Ok(Sides::Fate { abbreviated: false }));
        assert_eq!("0".parse::<Sides>(), Err(ParseSidesError::Zero));
        assert!(matches!("invalid".parse::<Sides>(), Err(ParseSidesError::Unknown(_))));
        assert!("6F".parse::<Sides>().is_err());
    }

    #[test]
    fn test_sides_display_is_lowercase() {
        assert_eq!("F".parse::<Sides>().unwrap().to_string(), "f");
        assert_eq!("FATE".parse::<Sides>().unwrap().to_string(), "fate");
    }

    #[test]
    fn test_binary_operator_from_str() {
        for &op in BinaryOperator::ALL {
            assert_eq!(op.to_string().parse(), Ok(op));
        }
        assert_eq!("x".parse::<BinaryOperator>(), Err("x".to_string()));
        assert!("++".parse::<BinaryOperator>().is_err());
    }

    #[test]
    fn test_flag_name_from_str() {
        assert_eq!("!aDv".parse(), Ok(FlagName::Adv));
        assert_eq!("!ADVANTAGE".parse(), Ok(FlagName::Advantage));
        assert_eq!("!tAkE".parse::<FlagName>().map(FlagName::kind), Ok(FlagKind::Keep));
        assert!("!advantageous".parse::<FlagName>().is_err());
        assert!("!advant".parse::<FlagName>().is_err());
        assert!("!shoop".parse::<FlagName>().is_err());
    }

    #[test]
    fn test_flag_display() {
        assert_eq!(Flag::new(FlagName::Dis).to_string(), "!dis");
        assert_eq!(Flag::with_count(FlagName::Drop, 2).to_string(), "!drop(2)");
    }
}
