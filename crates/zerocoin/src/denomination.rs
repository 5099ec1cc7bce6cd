//! Coin denominations.

use core::fmt;

use crate::error::WireError;

/// The face value a coin is minted for.
///
/// Each denomination has its own accumulator. `Unset` marks coins whose
/// denomination has not been assigned yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Denomination {
    /// No denomination assigned.
    #[default]
    Unset,
    /// 1 unit.
    One,
    /// 5 units.
    Five,
    /// 10 units.
    Ten,
    /// 50 units.
    Fifty,
    /// 100 units.
    OneHundred,
    /// 500 units.
    FiveHundred,
    /// 1000 units.
    OneThousand,
    /// 5000 units.
    FiveThousand,
}

impl Denomination {
    /// Every assignable denomination, in ascending order.
    pub const ALL: [Self; 8] = [
        Self::One,
        Self::Five,
        Self::Ten,
        Self::Fifty,
        Self::OneHundred,
        Self::FiveHundred,
        Self::OneThousand,
        Self::FiveThousand,
    ];

    /// The denomination's wire code, equal to its face value.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::Unset => 0,
            Self::One => 1,
            Self::Five => 5,
            Self::Ten => 10,
            Self::Fifty => 50,
            Self::OneHundred => 100,
            Self::FiveHundred => 500,
            Self::OneThousand => 1000,
            Self::FiveThousand => 5000,
        }
    }

    /// Position in the denomination list, `Unset` being 0.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        match self {
            Self::Unset => 0,
            Self::One => 1,
            Self::Five => 2,
            Self::Ten => 3,
            Self::Fifty => 4,
            Self::OneHundred => 5,
            Self::FiveHundred => 6,
            Self::OneThousand => 7,
            Self::FiveThousand => 8,
        }
    }
}

impl TryFrom<u32> for Denomination {
    type Error = WireError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        if code == 0 {
            return Ok(Self::Unset);
        }
        Self::ALL
            .into_iter()
            .find(|denomination| denomination.value() == code)
            .ok_or(WireError::UnknownDenomination(code))
    }
}

impl From<Denomination> for u32 {
    fn from(denomination: Denomination) -> Self {
        denomination.value()
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::Unset {
            f.write_str("unset")
        } else {
            write!(f, "{}", self.value())
        }
    }
}
