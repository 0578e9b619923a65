/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Boundary rule dispatch.
//!
//! [`decompose`] applies any [`BoundaryRule`] to a tag list. Generic styles
//! always produce a best-effort [`Decomposition`]; custom and unknown rules
//! come back untouched as [`UnsupportedRule`].

use crate::marker::decompose_by_marker;
use crate::paired::decompose_paired;
use crate::sequence::Decomposition;
use crate::span::decompose_fixed_span;
use swiftmt_core::taglist::TagList;
use swiftmt_schema::BoundaryRule;
use thiserror::Error;

/// The rule has no generic decomposition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("boundary rule {} has no generic decomposition", .rule.style())]
pub struct UnsupportedRule {
    /// The rule, handed back unchanged.
    pub rule: BoundaryRule,
}

/// Applies a boundary rule to `parent`.
///
/// # Arguments
/// * `parent` - The payload, or a previously decomposed sequence body
/// * `rule` - The rule to apply
///
/// # Errors
/// Returns [`UnsupportedRule`] for [`BoundaryRule::Custom`] and
/// [`BoundaryRule::Unknown`]. Structural problems in `parent` are never
/// errors; they are reported in [`Decomposition::diagnostics`].
pub fn decompose(parent: &TagList, rule: &BoundaryRule) -> Result<Decomposition, UnsupportedRule> {
    match rule {
        BoundaryRule::SplitByMarkerLetter { marker, letter } => {
            Ok(decompose_by_marker(parent, marker, *letter))
        }
        BoundaryRule::PairedQualifierBlocks {
            start,
            end,
            qualifier,
        } => Ok(decompose_paired(parent, start, end, qualifier.as_deref())),
        BoundaryRule::FixedSpanWithOptionalTail(span) => Ok(decompose_fixed_span(parent, span)),
        BoundaryRule::Custom | BoundaryRule::Unknown => Err(UnsupportedRule { rule: rule.clone() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swiftmt_core::tag::Tag;
    use swiftmt_schema::{FixedSpan, rule_for};

    fn payload(tags: &[(&str, &str)]) -> TagList {
        tags.iter().map(|(n, v)| Tag::new(*n, *v)).collect()
    }

    #[test]
    fn test_dispatch_marker() {
        let parent = payload(&[
            ("15A", ""),
            ("20", "REF"),
            ("21", "REL"),
            ("15B", ""),
            ("202", "X"),
            ("203", "Y"),
        ]);
        let pairs = decompose(&parent, &BoundaryRule::split_by_marker("15"))
            .unwrap()
            .into_pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "A");
        assert_eq!(pairs[0].1.names().collect::<Vec<_>>(), vec!["15A", "20", "21"]);
        assert_eq!(pairs[1].0, "B");
        assert_eq!(pairs[1].1.names().collect::<Vec<_>>(), vec!["15B", "202", "203"]);
    }

    #[test]
    fn test_dispatch_paired() {
        let parent = payload(&[
            ("16R", "SETT"),
            ("16R", "DET"),
            ("35B", "ISIN X"),
            ("16S", "DET"),
            ("16S", "SETT"),
        ]);
        let result = decompose(&parent, &BoundaryRule::paired_blocks()).unwrap();
        assert!(result.is_clean());
        assert_eq!(result.len(), 1);
        let det = result.sequences[0].child("DET").unwrap();
        assert_eq!(det.field("35B").map(Tag::value), Some("ISIN X"));
    }

    #[test]
    fn test_dispatch_fixed_span() {
        let parent = payload(&[("22M", ""), ("22N", ""), ("108", ""), ("22M", ""), ("22N", "")]);
        let rule = BoundaryRule::fixed_span(FixedSpan::new("S", &["22M"], &["22N"], &["108"]));
        let result = decompose(&parent, &rule).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.sequences[0].tags.len(), 3);
        assert_eq!(result.sequences[1].tags.len(), 2);
    }

    #[test]
    fn test_custom_and_unknown_are_handed_back() {
        let parent = payload(&[("20", "REF")]);
        let err = decompose(&parent, &BoundaryRule::Custom).unwrap_err();
        assert_eq!(err.rule, BoundaryRule::Custom);
        assert_eq!(
            err.to_string(),
            "boundary rule custom has no generic decomposition"
        );
        assert!(decompose(&parent, &BoundaryRule::Unknown).is_err());
    }

    #[test]
    fn test_registry_rule_drives_decomposition() {
        let parent = payload(&[
            ("16R", "GENL"),
            ("20C", ":SEME//REF"),
            ("16R", "LINK"),
            ("20C", ":PREV//OLD"),
            ("16S", "LINK"),
            ("16S", "GENL"),
            ("16R", "SETDET"),
            ("22F", ":SETR//TRAD"),
            ("16R", "SETPRTY"),
            ("95P", ":DEAG//BANKBEBB"),
            ("16S", "SETPRTY"),
            ("16R", "SETPRTY"),
            ("95P", ":REAG//BANKDEFF"),
            ("16S", "SETPRTY"),
            ("16S", "SETDET"),
        ]);
        let rule = rule_for("MT540", "E1").unwrap();
        let parties = decompose(&parent, &rule).unwrap();
        assert_eq!(parties.len(), 2);
        assert_eq!(
            parties.sequences[1].field("95P").map(Tag::value),
            Some(":REAG//BANKDEFF")
        );

        let rule = rule_for("540", "A1").unwrap();
        let links = decompose(&parent, &rule).unwrap();
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_determinism() {
        let parent = payload(&[("16R", "A"), ("20", "X"), ("16S", "B"), ("16S", "A")]);
        let rule = BoundaryRule::paired_blocks();
        let first = decompose(&parent, &rule).unwrap();
        let second = decompose(&parent, &rule).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.diagnostics.len(), 2);
    }
}
