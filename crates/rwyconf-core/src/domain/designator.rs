//! Runway designator — the validated identifier for one runway end.
//!
//! A designator is a magnetic-heading number in 1–36 plus an optional
//! parallel-runway suffix (`L`/`C`/`R`). Parsing normalizes away leading
//! zeros (`01L` → `1L`) and rejects anything outside the heading range, so
//! a constructed [`Designator`] is always physically meaningful.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parallel-runway suffix.
///
/// Variant order gives the conventional left-to-right reading
/// (`16L`, `16C`, `16R`) when designators are sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParallelSuffix {
    Left,
    Center,
    Right,
}

impl ParallelSuffix {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'L' => Some(Self::Left),
            'C' => Some(Self::Center),
            'R' => Some(Self::Right),
            _ => None,
        }
    }
}

impl fmt::Display for ParallelSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "L"),
            Self::Center => write!(f, "C"),
            Self::Right => write!(f, "R"),
        }
    }
}

/// A validated runway designator.
///
/// Ordering is numeric-first, then suffix, which keeps designator sets in
/// the order a controller would read them out.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Designator {
    number: u8,
    suffix: Option<ParallelSuffix>,
}

impl Designator {
    /// Construct from a heading number and optional suffix.
    pub fn new(number: u8, suffix: Option<ParallelSuffix>) -> Result<Self, DesignatorError> {
        if !(1..=36).contains(&number) {
            return Err(DesignatorError::NumberOutOfRange(number));
        }
        Ok(Self { number, suffix })
    }

    /// Heading number in 1–36.
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Parallel suffix, if any.
    pub fn suffix(&self) -> Option<ParallelSuffix> {
        self.suffix
    }

    /// Magnetic heading in degrees (number × 10).
    pub fn heading_degrees(&self) -> f64 {
        f64::from(self.number) * 10.0
    }

    /// The opposite end of the same strip: heading + 180°, suffix preserved.
    pub fn reciprocal(&self) -> Self {
        // (n + 18) mod 36 with the zero wrapped back to 36.
        let number = ((self.number + 18 - 1) % 36) + 1;
        Self {
            number,
            suffix: self.suffix,
        }
    }

    /// Whether `other` is the opposite end of this designator's strip.
    ///
    /// Requires both the 180° heading offset and an identical suffix —
    /// `16L`/`34L` are reciprocal, `16L`/`34R` are not.
    pub fn is_reciprocal_of(&self, other: &Self) -> bool {
        self.suffix == other.suffix && self.reciprocal().number == other.number
    }
}

impl fmt::Display for Designator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number)?;
        if let Some(suffix) = self.suffix {
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Designator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Designator({self})")
    }
}

impl FromStr for Designator {
    type Err = DesignatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DesignatorError::Empty);
        }

        let digit_end = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        let (digits, rest) = s.split_at(digit_end);

        if digits.is_empty() || digits.len() > 2 {
            return Err(DesignatorError::Malformed(s.to_string()));
        }
        let number: u8 = digits
            .parse()
            .map_err(|_| DesignatorError::Malformed(s.to_string()))?;

        let suffix = match rest.chars().collect::<Vec<_>>().as_slice() {
            [] => None,
            [c] => match ParallelSuffix::from_char(*c) {
                Some(sfx) => Some(sfx),
                None => return Err(DesignatorError::Malformed(s.to_string())),
            },
            _ => return Err(DesignatorError::Malformed(s.to_string())),
        };

        Self::new(number, suffix)
    }
}

impl TryFrom<String> for Designator {
    type Error = DesignatorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Designator> for String {
    fn from(d: Designator) -> Self {
        d.to_string()
    }
}

/// Errors from designator parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DesignatorError {
    #[error("empty designator")]
    Empty,

    #[error("runway number out of range 1-36: {0}")]
    NumberOutOfRange(u8),

    #[error("malformed designator: {0}")]
    Malformed(String),
}
