/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Tag type for FIN payload fields.
//!
//! This module provides:
//! - [`Tag`]: An immutable `(name, value)` pair, the atomic unit of a block
//! - [`is_field_name`]: Shape check for block 4 field names (`20`, `32A`, `103`)
//! - [`split_name`]: Splits a field name into its number and letter option

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field occurrence inside a block.
///
/// In block 4 the name is a 2-3 digit field number optionally followed by a
/// single uppercase letter option. In blocks 3 and 5 the name is whatever
/// the sub-field carries (`108`, `CHK`, `PDE`). Values are kept verbatim,
/// embedded line breaks included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    name: String,
    value: String,
}

impl Tag {
    /// Creates a new tag.
    ///
    /// # Arguments
    /// * `name` - The field name (e.g. `"32A"`)
    /// * `value` - The raw field value
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the tag name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw tag value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the numeric part of the name, if the name has field shape.
    #[must_use]
    pub fn number(&self) -> Option<u16> {
        split_name(&self.name).and_then(|(digits, _)| digits.parse().ok())
    }

    /// Returns the letter option, if any.
    ///
    /// `32A` yields `Some('A')`, `20` yields `None`.
    #[must_use]
    pub fn letter(&self) -> Option<char> {
        split_name(&self.name).and_then(|(_, letter)| letter)
    }

    /// Returns true if the name is `number` followed by any single letter option.
    ///
    /// `is_number_with_letter("15")` matches `15A` and `15B` but not `15`.
    #[must_use]
    pub fn is_number_with_letter(&self, number: &str) -> bool {
        matches!(split_name(&self.name), Some((digits, Some(_))) if digits == number)
    }

    /// Returns true if the name matches any of the given names.
    #[must_use]
    pub fn is_any_of<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|n| n.as_ref() == self.name)
    }

    /// Returns the value split into lines, tolerating both CRLF and LF.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.value.lines()
    }

    /// Consumes the tag and returns its parts.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.value)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}:{}", self.name, self.value)
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for Tag {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

/// Splits a block 4 field name into its digits and optional letter option.
///
/// Returns `None` when the name does not have the `NN[N][A]` shape.
#[must_use]
pub fn split_name(name: &str) -> Option<(&str, Option<char>)> {
    let bytes = name.as_bytes();
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if !(2..=3).contains(&digits) {
        return None;
    }
    match &bytes[digits..] {
        [] => Some((&name[..digits], None)),
        [letter] if letter.is_ascii_uppercase() => Some((&name[..digits], Some(*letter as char))),
        _ => None,
    }
}

/// Returns true if `name` has the shape of a block 4 field name.
#[inline]
#[must_use]
pub fn is_field_name(name: &str) -> bool {
    split_name(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("20"), Some(("20", None)));
        assert_eq!(split_name("32A"), Some(("32", Some('A'))));
        assert_eq!(split_name("103"), Some(("103", None)));
        assert_eq!(split_name("108X"), Some(("108", Some('X'))));
        assert_eq!(split_name("1"), None);
        assert_eq!(split_name("1234"), None);
        assert_eq!(split_name("32a"), None);
        assert_eq!(split_name("32AB"), None);
        assert_eq!(split_name("CHK"), None);
    }

    #[test]
    fn test_tag_number_and_letter() {
        let tag = Tag::new("32A", "090828EUR1000,");
        assert_eq!(tag.number(), Some(32));
        assert_eq!(tag.letter(), Some('A'));

        let plain = Tag::new("20", "REF");
        assert_eq!(plain.number(), Some(20));
        assert_eq!(plain.letter(), None);

        let trailer = Tag::new("CHK", "123456789ABC");
        assert_eq!(trailer.number(), None);
    }

    #[test]
    fn test_is_number_with_letter() {
        assert!(Tag::new("15A", "").is_number_with_letter("15"));
        assert!(!Tag::new("15", "").is_number_with_letter("15"));
        assert!(!Tag::new("150A", "").is_number_with_letter("15"));
        assert!(!Tag::new("16R", "").is_number_with_letter("15"));
    }

    #[test]
    fn test_tag_display() {
        let tag = Tag::new("20", "REFERENCE");
        assert_eq!(tag.to_string(), ":20:REFERENCE");
    }

    #[test]
    fn test_tag_lines() {
        let tag = Tag::new("70", "LINE ONE\r\nLINE TWO");
        let lines: Vec<&str> = tag.lines().collect();
        assert_eq!(lines, vec!["LINE ONE", "LINE TWO"]);
    }
}
