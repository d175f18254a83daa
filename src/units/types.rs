//! Unit, color and oven records.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Paint color drawn from the fixed 12-color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    C1,
    C2,
    C3,
    C4,
    C5,
    C6,
    C7,
    C8,
    C9,
    C10,
    C11,
    C12,
}

impl Color {
    /// Every palette color, in palette order.
    pub const ALL: [Color; 12] = [
        Color::C1,
        Color::C2,
        Color::C3,
        Color::C4,
        Color::C5,
        Color::C6,
        Color::C7,
        Color::C8,
        Color::C9,
        Color::C10,
        Color::C11,
        Color::C12,
    ];

    /// Rarity band of this color.
    ///
    /// C1 and C2 are high-volume, C3 through C6 medium, everything else rare.
    pub fn band(self) -> ColorBand {
        match self {
            Color::C1 | Color::C2 => ColorBand::High,
            Color::C3 | Color::C4 | Color::C5 | Color::C6 => ColorBand::Medium,
            _ => ColorBand::Rare,
        }
    }

    /// 1-based position in the palette.
    pub fn number(self) -> usize {
        self as usize + 1
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.number())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('C')
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Color::ALL.get(i).copied())
            .ok_or_else(|| format!("unknown color: {s}"))
    }
}

/// Rarity tier of a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorBand {
    High,
    Medium,
    Rare,
}

/// Upstream oven a unit came out of.
///
/// Second-oven units prefer the downstream lanes; first-oven units placed
/// there incur a reroute penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Oven {
    First,
    Second,
}

impl fmt::Display for Oven {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Oven::First => f.write_str("O1"),
            Oven::Second => f.write_str("O2"),
        }
    }
}

/// One vehicle moving through the line.
///
/// The oven tag is empty at generation and set once, when the unit's
/// assignment is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unit {
    id: u64,
    color: Color,
    oven: Option<Oven>,
}

impl Unit {
    /// Creates an untagged unit.
    pub fn new(id: u64, color: Color) -> Self {
        Self {
            id,
            color,
            oven: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn oven(&self) -> Option<Oven> {
        self.oven
    }

    /// Sets the oven tag. Returns `false` and leaves the unit untouched if
    /// it was already tagged.
    pub fn tag_oven(&mut self, oven: Oven) -> bool {
        if self.oven.is_some() {
            return false;
        }
        self.oven = Some(oven);
        true
    }
}
