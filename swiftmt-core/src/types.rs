/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Core types for FIN message handling.
//!
//! This module provides fundamental types used throughout SwiftMT:
//! - [`MtType`]: Three digit message type number (`103`, `540`)
//! - [`MtVariant`]: Validation flavour carried in block 3 field 119
//! - [`LogicalTerminal`]: Twelve character logical terminal address
//! - [`Direction`]: Input or output application header
//! - [`Priority`]: Message priority in the application header

use arrayvec::ArrayString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of characters in a logical terminal address.
pub const LT_ADDRESS_LEN: usize = 12;

/// SWIFT message type number.
///
/// Always exactly three ASCII digits. Lookups tolerate decorated spellings
/// such as `MT103`, `103_STP` or `fin.103.remit` through [`MtType::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct MtType(ArrayString<3>);

impl MtType {
    /// Creates a message type from exactly three ASCII digits.
    ///
    /// # Arguments
    /// * `s` - The message type digits (e.g. `"103"`)
    #[must_use]
    pub fn new(s: &str) -> Option<Self> {
        if s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit()) {
            ArrayString::from(s).ok().map(Self)
        } else {
            None
        }
    }

    /// Normalizes a decorated message type name.
    ///
    /// Known variant suffixes (`STP`, `REMIT`, `COV`) and every non-digit
    /// character are stripped; the remainder must be three digits.
    #[must_use]
    pub fn normalize(s: &str) -> Option<Self> {
        Self::normalize_with_variant(s).map(|(mt, _)| mt)
    }

    /// Normalizes a decorated message type name and reports its variant.
    ///
    /// `"103_STP"` yields `(103, Some(MtVariant::Stp))`.
    #[must_use]
    pub fn normalize_with_variant(s: &str) -> Option<(Self, Option<MtVariant>)> {
        let upper = s.trim().to_ascii_uppercase();
        let variant = MtVariant::ALL
            .iter()
            .copied()
            .find(|v| upper.ends_with(v.as_str()));
        let stem = match variant {
            Some(v) => &upper[..upper.len() - v.as_str().len()],
            None => upper.as_str(),
        };
        let digits: String = stem.chars().filter(char::is_ascii_digit).collect();
        Self::new(&digits).map(|mt| (mt, variant))
    }

    /// Returns the message type digits.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the message category (the first digit).
    #[must_use]
    pub fn category(&self) -> u8 {
        self.0.as_bytes()[0] - b'0'
    }

    /// Returns true for category 0 system and service messages.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.category() == 0
    }
}

impl AsRef<str> for MtType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MtType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s).ok_or(())
    }
}

/// Validation flavour of a message, carried in block 3 field 119.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MtVariant {
    /// Straight-through processing.
    Stp,
    /// Extended remittance information.
    Remit,
    /// Cover payment.
    Cov,
}

impl MtVariant {
    /// Every known variant, longest suffix first.
    pub const ALL: [Self; 3] = [Self::Remit, Self::Stp, Self::Cov];

    /// Returns the FIN spelling of the variant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stp => "STP",
            Self::Remit => "REMIT",
            Self::Cov => "COV",
        }
    }
}

impl fmt::Display for MtVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MtVariant {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STP" => Ok(Self::Stp),
            "REMIT" => Ok(Self::Remit),
            "COV" => Ok(Self::Cov),
            _ => Err(()),
        }
    }
}

/// Logical terminal address: BIC8, terminal code and branch code.
///
/// `BANKBEBBAXXX` is `BANKBEBB` + `A` + `XXX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct LogicalTerminal(ArrayString<LT_ADDRESS_LEN>);

impl LogicalTerminal {
    /// Creates a logical terminal from exactly twelve characters.
    #[must_use]
    pub fn new(s: &str) -> Option<Self> {
        if s.len() == LT_ADDRESS_LEN && s.is_ascii() {
            ArrayString::from(s).ok().map(Self)
        } else {
            None
        }
    }

    /// Returns the full address.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the eight character BIC.
    #[must_use]
    pub fn bic8(&self) -> &str {
        &self.0.as_str()[..8]
    }

    /// Returns the terminal code (ninth character).
    #[must_use]
    pub fn terminal(&self) -> char {
        self.0.as_bytes()[8] as char
    }

    /// Returns the three character branch code.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.0.as_str()[9..]
    }

    /// Returns the BIC11 form (BIC8 plus branch, terminal code dropped).
    #[must_use]
    pub fn bic11(&self) -> String {
        format!("{}{}", self.bic8(), self.branch())
    }
}

impl fmt::Display for LogicalTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of an application header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Sent to SWIFT.
    Input = b'I',
    /// Delivered by SWIFT.
    Output = b'O',
}

impl Direction {
    /// Creates a direction from its FIN character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::Input),
            'O' => Some(Self::Output),
            _ => None,
        }
    }

    /// Returns the FIN character for this direction.
    #[must_use]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }
}

/// Message priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Priority {
    /// System priority.
    System = b'S',
    /// Urgent.
    Urgent = b'U',
    /// Normal.
    Normal = b'N',
}

impl Priority {
    /// Creates a priority from its FIN character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'S' => Some(Self::System),
            'U' => Some(Self::Urgent),
            'N' => Some(Self::Normal),
            _ => None,
        }
    }

    /// Returns the FIN character for this priority.
    #[must_use]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mt_type_normalize() {
        assert_eq!(MtType::normalize("103").map(|m| m.to_string()), Some("103".into()));
        assert_eq!(MtType::normalize("MT103").map(|m| m.to_string()), Some("103".into()));
        assert_eq!(MtType::normalize("103_STP").map(|m| m.to_string()), Some("103".into()));
        assert_eq!(
            MtType::normalize("fin.103.remit").map(|m| m.to_string()),
            Some("103".into())
        );
        assert!(MtType::normalize("MT10").is_none());
        assert!(MtType::normalize("ABC").is_none());
        assert!(MtType::normalize("").is_none());
    }

    #[test]
    fn test_mt_type_variant() {
        let (mt, variant) = MtType::normalize_with_variant("202COV").unwrap();
        assert_eq!(mt.as_str(), "202");
        assert_eq!(variant, Some(MtVariant::Cov));

        let (_, none) = MtType::normalize_with_variant("MT540").unwrap();
        assert_eq!(none, None);
    }

    #[test]
    fn test_mt_type_category() {
        let mt = MtType::new("540").unwrap();
        assert_eq!(mt.category(), 5);
        assert!(!mt.is_system());
        assert!(MtType::new("010").unwrap().is_system());
    }

    #[test]
    fn test_logical_terminal_parts() {
        let lt = LogicalTerminal::new("BANKBEBBAXXX").unwrap();
        assert_eq!(lt.bic8(), "BANKBEBB");
        assert_eq!(lt.terminal(), 'A');
        assert_eq!(lt.branch(), "XXX");
        assert_eq!(lt.bic11(), "BANKBEBBXXX");
        assert!(LogicalTerminal::new("SHORT").is_none());
    }

    #[test]
    fn test_direction_and_priority() {
        assert_eq!(Direction::from_char('I'), Some(Direction::Input));
        assert_eq!(Direction::Output.as_char(), 'O');
        assert_eq!(Priority::from_char('U'), Some(Priority::Urgent));
        assert_eq!(Priority::from_char('X'), None);
    }
}
