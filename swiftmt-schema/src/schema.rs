/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Schema definitions for sequence boundaries.
//!
//! This module defines the declarative description of how a payload splits
//! into sequences:
//! - [`SequenceStyle`]: Which boundary algorithm a message type uses
//! - [`BoundaryRule`]: A style plus the parameters it needs
//! - [`FixedSpan`]: Start, end and tail tag names of a fixed span
//! - [`SequenceDef`] / [`MtSchema`]: Static registry entries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field whose letter option separates treasury sequences (`15A`, `15B`).
pub const MARKER_FIELD: &str = "15";

/// Field opening a qualified block.
pub const BLOCK_START: &str = "16R";

/// Field closing a qualified block.
pub const BLOCK_END: &str = "16S";

/// Boundary algorithm used by a message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceStyle {
    /// Sequences open at each `{marker}{letter}` tag.
    SplitByMarkerLetter,
    /// Nested blocks delimited by qualified start and end tags (`16R`/`16S`).
    PairedQualifierBlocks,
    /// Repeating `start ... end [tail]` spans.
    FixedSpanWithOptionalTail,
    /// Bespoke per-message logic outside the generic engine.
    Custom,
    /// Message type not present in the registry.
    Unknown,
}

impl SequenceStyle {
    /// Returns true if the generic engine can decompose this style.
    #[must_use]
    pub const fn is_generic(&self) -> bool {
        matches!(
            self,
            Self::SplitByMarkerLetter | Self::PairedQualifierBlocks | Self::FixedSpanWithOptionalTail
        )
    }
}

impl fmt::Display for SequenceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SplitByMarkerLetter => "split-by-marker-letter",
            Self::PairedQualifierBlocks => "paired-qualifier-blocks",
            Self::FixedSpanWithOptionalTail => "fixed-span-with-optional-tail",
            Self::Custom => "custom",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Start, end and tail tag names of a repeating fixed span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedSpan {
    /// Label given to every matched span.
    pub name: String,
    /// Tag names that open a span.
    pub start: Vec<String>,
    /// Tag names that close the span body.
    pub end: Vec<String>,
    /// Tag names allowed, in any order, right after the end tag.
    pub tail: Vec<String>,
}

impl FixedSpan {
    /// Creates a span definition.
    ///
    /// # Arguments
    /// * `name` - The label for matched spans
    /// * `start` - Tag names opening a span
    /// * `end` - Tag names closing the span body
    /// * `tail` - Optional trailing tag names
    #[must_use]
    pub fn new<S: AsRef<str>>(name: impl Into<String>, start: &[S], end: &[S], tail: &[S]) -> Self {
        let owned = |names: &[S]| names.iter().map(|n| n.as_ref().to_string()).collect();
        Self {
            name: name.into(),
            start: owned(start),
            end: owned(end),
            tail: owned(tail),
        }
    }
}

/// How a message type's payload, or a sequence of it, splits into sequences.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum BoundaryRule {
    /// Split at every `{marker}{letter}` tag.
    SplitByMarkerLetter {
        /// Field number whose letter options open sequences.
        marker: String,
        /// Restricts the result to one letter, if set.
        letter: Option<char>,
    },
    /// Nested blocks opened by `start` and closed by `end`, matched by qualifier.
    PairedQualifierBlocks {
        /// Tag name opening a block.
        start: String,
        /// Tag name closing a block.
        end: String,
        /// Restricts the result to blocks with this qualifier, at any depth.
        qualifier: Option<String>,
    },
    /// Repeating `start ... end [tail]` spans.
    FixedSpanWithOptionalTail(FixedSpan),
    /// Bespoke logic; the generic engine hands this back untouched.
    Custom,
    /// Unregistered message type; treated like [`BoundaryRule::Custom`].
    Unknown,
}

impl BoundaryRule {
    /// Creates a marker-letter rule for the given field number.
    #[must_use]
    pub fn split_by_marker(marker: impl Into<String>) -> Self {
        Self::SplitByMarkerLetter {
            marker: marker.into(),
            letter: None,
        }
    }

    /// Creates a `16R`/`16S` block rule.
    #[must_use]
    pub fn paired_blocks() -> Self {
        Self::paired(BLOCK_START, BLOCK_END)
    }

    /// Creates a block rule with custom start and end tag names.
    #[must_use]
    pub fn paired(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::PairedQualifierBlocks {
            start: start.into(),
            end: end.into(),
            qualifier: None,
        }
    }

    /// Creates a fixed span rule.
    #[must_use]
    pub fn fixed_span(span: FixedSpan) -> Self {
        Self::FixedSpanWithOptionalTail(span)
    }

    /// Restricts a marker-letter rule to one letter. Other styles are unchanged.
    #[must_use]
    pub fn with_letter(self, wanted: char) -> Self {
        match self {
            Self::SplitByMarkerLetter { marker, .. } => Self::SplitByMarkerLetter {
                marker,
                letter: Some(wanted),
            },
            other => other,
        }
    }

    /// Restricts a block rule to one qualifier. Other styles are unchanged.
    #[must_use]
    pub fn with_qualifier(self, wanted: impl Into<String>) -> Self {
        match self {
            Self::PairedQualifierBlocks { start, end, .. } => Self::PairedQualifierBlocks {
                start,
                end,
                qualifier: Some(wanted.into()),
            },
            other => other,
        }
    }

    /// Returns the style of this rule.
    #[must_use]
    pub const fn style(&self) -> SequenceStyle {
        match self {
            Self::SplitByMarkerLetter { .. } => SequenceStyle::SplitByMarkerLetter,
            Self::PairedQualifierBlocks { .. } => SequenceStyle::PairedQualifierBlocks,
            Self::FixedSpanWithOptionalTail(_) => SequenceStyle::FixedSpanWithOptionalTail,
            Self::Custom => SequenceStyle::Custom,
            Self::Unknown => SequenceStyle::Unknown,
        }
    }

    /// Returns true if the generic engine can apply this rule.
    #[must_use]
    pub const fn is_generic(&self) -> bool {
        self.style().is_generic()
    }
}

/// Boundary parameters of one registered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceBoundary {
    /// Opened by `15{letter}`.
    Letter(char),
    /// A `16R`/`16S` block with this qualifier.
    Qualifier(&'static str),
    /// A repeating fixed span.
    Span {
        /// Tag names opening a span.
        start: &'static [&'static str],
        /// Tag names closing the span body.
        end: &'static [&'static str],
        /// Optional trailing tag names.
        tail: &'static [&'static str],
    },
}

/// A sequence a message type defines, as registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceDef {
    /// Sequence name (`A`, `B1`, `E2`).
    pub name: &'static str,
    /// How the sequence is delimited.
    pub boundary: SequenceBoundary,
}

impl SequenceDef {
    /// Defines a sequence delimited by a qualified block.
    #[must_use]
    pub const fn qualified(name: &'static str, qualifier: &'static str) -> Self {
        Self {
            name,
            boundary: SequenceBoundary::Qualifier(qualifier),
        }
    }

    /// Defines a repeating fixed span sequence.
    #[must_use]
    pub const fn span(
        name: &'static str,
        start: &'static [&'static str],
        end: &'static [&'static str],
        tail: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            boundary: SequenceBoundary::Span { start, end, tail },
        }
    }

    /// Builds the boundary rule for this sequence.
    #[must_use]
    pub fn rule(&self) -> BoundaryRule {
        match self.boundary {
            SequenceBoundary::Letter(letter) => {
                BoundaryRule::split_by_marker(MARKER_FIELD).with_letter(letter)
            }
            SequenceBoundary::Qualifier(qualifier) => {
                BoundaryRule::paired_blocks().with_qualifier(qualifier)
            }
            SequenceBoundary::Span { start, end, tail } => {
                BoundaryRule::fixed_span(FixedSpan::new(self.name, start, end, tail))
            }
        }
    }
}

/// Registry entry for one message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MtSchema {
    /// Three digit message type.
    pub mt: &'static str,
    /// Boundary style used by the message type.
    pub style: SequenceStyle,
    /// Sequence letters, for [`SequenceStyle::SplitByMarkerLetter`].
    pub letters: &'static str,
    /// Registered sequences, for the block and span styles.
    pub sequences: &'static [SequenceDef],
}

impl MtSchema {
    /// Entry for a message type with bespoke boundary logic.
    #[must_use]
    pub const fn custom(mt: &'static str) -> Self {
        Self {
            mt,
            style: SequenceStyle::Custom,
            letters: "",
            sequences: &[],
        }
    }

    /// Entry for a message type split by field 15 letter options.
    #[must_use]
    pub const fn split(mt: &'static str, letters: &'static str) -> Self {
        Self {
            mt,
            style: SequenceStyle::SplitByMarkerLetter,
            letters,
            sequences: &[],
        }
    }

    /// Entry for a message type built from `16R`/`16S` blocks.
    #[must_use]
    pub const fn paired(mt: &'static str, sequences: &'static [SequenceDef]) -> Self {
        Self {
            mt,
            style: SequenceStyle::PairedQualifierBlocks,
            letters: "",
            sequences,
        }
    }

    /// Entry for a message type with repeating fixed spans.
    #[must_use]
    pub const fn spans(mt: &'static str, sequences: &'static [SequenceDef]) -> Self {
        Self {
            mt,
            style: SequenceStyle::FixedSpanWithOptionalTail,
            letters: "",
            sequences,
        }
    }

    /// Returns the definition of a named sequence.
    ///
    /// Marker-letter sequences are synthesized from [`MtSchema::letters`].
    #[must_use]
    pub fn sequence(&self, name: &str) -> Option<SequenceDef> {
        match self.style {
            SequenceStyle::SplitByMarkerLetter => {
                let letters = self.letters;
                let index = letters.find(name).filter(|_| name.len() == 1)?;
                let letter = letters[index..].chars().next()?;
                Some(SequenceDef {
                    name: &letters[index..index + 1],
                    boundary: SequenceBoundary::Letter(letter),
                })
            }
            _ => self.sequences.iter().find(|def| def.name == name).copied(),
        }
    }

    /// Returns the names of every sequence the message type defines.
    #[must_use]
    pub fn sequence_names(&self) -> Vec<&'static str> {
        match self.style {
            SequenceStyle::SplitByMarkerLetter => {
                let letters = self.letters;
                (0..letters.len()).map(|i| &letters[i..i + 1]).collect()
            }
            _ => self.sequences.iter().map(|def| def.name).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_style() {
        assert_eq!(
            BoundaryRule::split_by_marker("15").style(),
            SequenceStyle::SplitByMarkerLetter
        );
        assert_eq!(
            BoundaryRule::paired_blocks().style(),
            SequenceStyle::PairedQualifierBlocks
        );
        assert!(!BoundaryRule::Custom.is_generic());
        assert!(!BoundaryRule::Unknown.is_generic());
    }

    #[test]
    fn test_with_letter_only_touches_marker_rules() {
        let rule = BoundaryRule::split_by_marker("15").with_letter('B');
        assert_eq!(
            rule,
            BoundaryRule::SplitByMarkerLetter {
                marker: "15".to_string(),
                letter: Some('B')
            }
        );
        assert_eq!(BoundaryRule::Custom.with_letter('B'), BoundaryRule::Custom);
    }

    #[test]
    fn test_sequence_def_rule() {
        let def = SequenceDef::qualified("A", "GENL");
        assert_eq!(
            def.rule(),
            BoundaryRule::PairedQualifierBlocks {
                start: "16R".to_string(),
                end: "16S".to_string(),
                qualifier: Some("GENL".to_string()),
            }
        );

        let span = SequenceDef::span("B", &["21"], &["59", "59A"], &["70"]);
        match span.rule() {
            BoundaryRule::FixedSpanWithOptionalTail(fixed) => {
                assert_eq!(fixed.name, "B");
                assert_eq!(fixed.end, vec!["59".to_string(), "59A".to_string()]);
            }
            other => panic!("unexpected rule {other:?}"),
        }
    }

    #[test]
    fn test_split_schema_sequences() {
        let schema = MtSchema::split("300", "ABCDE");
        assert_eq!(schema.sequence_names(), vec!["A", "B", "C", "D", "E"]);
        assert_eq!(
            schema.sequence("C").map(|d| d.boundary),
            Some(SequenceBoundary::Letter('C'))
        );
        assert!(schema.sequence("F").is_none());
        assert!(schema.sequence("AB").is_none());
        assert!(schema.sequence("").is_none());
    }
}
