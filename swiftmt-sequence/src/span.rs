/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Repeating fixed spans.
//!
//! A span opens at any start tag, runs through the first end tag and then
//! absorbs any tail tags that follow. A tag that could be both a tail tag and
//! a start tag opens the next span.

use crate::sequence::{Decomposition, Sequence};
use swiftmt_core::error::DecompositionDiagnostic;
use swiftmt_core::taglist::TagList;
use swiftmt_schema::FixedSpan;
use tracing::{trace, warn};

/// Collects every `start ... end [tail]` span of `parent`, in order.
///
/// Tags between spans belong to no sequence. A span whose end tag never
/// shows up runs to the end of `parent` and is flagged incomplete.
#[must_use]
pub fn decompose_fixed_span(parent: &TagList, span: &FixedSpan) -> Decomposition {
    let mut result = Decomposition::new();
    let len = parent.len();
    let mut index = 0;

    while index < len {
        if !parent[index].is_any_of(&span.start) {
            index += 1;
            continue;
        }
        let start = index;
        let Some(end) = (start + 1..len).find(|&i| parent[i].is_any_of(&span.end)) else {
            let diagnostic = DecompositionDiagnostic::TruncatedSequence {
                sequence: span.name.clone(),
                start,
            };
            warn!(%diagnostic, "fixed span");
            result.diagnostics.push(diagnostic);
            result
                .sequences
                .push(Sequence::new(span.name.as_str(), parent.sublist(start..len)).incomplete());
            break;
        };

        let mut stop = end + 1;
        while stop < len && parent[stop].is_any_of(&span.tail) && !parent[stop].is_any_of(&span.start)
        {
            stop += 1;
        }
        trace!(name = %span.name, start, stop, "fixed span");
        result
            .sequences
            .push(Sequence::new(span.name.as_str(), parent.sublist(start..stop)));
        index = stop;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use swiftmt_core::tag::Tag;

    fn payload(names: &[&str]) -> TagList {
        names.iter().map(|n| Tag::new(*n, "")).collect()
    }

    fn names(seq: &Sequence) -> Vec<&str> {
        seq.tags.names().collect()
    }

    #[test]
    fn test_optional_tail() {
        let parent = payload(&["22M", "22N", "108", "22M", "22N"]);
        let span = FixedSpan::new("B", &["22M"], &["22N"], &["108"]);
        let result = decompose_fixed_span(&parent, &span);
        assert!(result.is_clean());
        assert_eq!(result.len(), 2);
        assert_eq!(names(&result.sequences[0]), vec!["22M", "22N", "108"]);
        assert_eq!(names(&result.sequences[1]), vec!["22M", "22N"]);
        assert!(result.iter().all(|s| s.label == "B" && s.is_complete()));
    }

    #[test]
    fn test_repetition_count() {
        let mut names_in: Vec<&str> = vec!["20", "30"];
        for _ in 0..4 {
            names_in.extend(["21", "32B", "59A", "70", "71A"]);
        }
        let parent = payload(&names_in);
        let span = FixedSpan::new("B", &["21"], &["59", "59A"], &["70", "71A"]);
        let result = decompose_fixed_span(&parent, &span);
        assert_eq!(result.len(), 4);
        for seq in &result {
            assert_eq!(seq.tags[0].name(), "21");
            assert_eq!(seq.tags[seq.tags.len() - 1].name(), "71A");
        }
    }

    #[test]
    fn test_start_wins_over_tail() {
        let parent = payload(&["21", "59", "21", "59"]);
        let span = FixedSpan::new("B", &["21"], &["59"], &["21", "70"]);
        let result = decompose_fixed_span(&parent, &span);
        assert_eq!(result.len(), 2);
        assert_eq!(names(&result.sequences[0]), vec!["21", "59"]);
    }

    #[test]
    fn test_tail_stops_at_foreign_tag() {
        let parent = payload(&["21", "59", "70", "72", "70"]);
        let span = FixedSpan::new("B", &["21"], &["59"], &["70"]);
        let result = decompose_fixed_span(&parent, &span);
        assert_eq!(result.len(), 1);
        assert_eq!(names(&result.sequences[0]), vec!["21", "59", "70"]);
    }

    #[test]
    fn test_truncated_span() {
        let parent = payload(&["21", "59", "21", "32B", "50K"]);
        let span = FixedSpan::new("B", &["21"], &["59"], &[]);
        let result = decompose_fixed_span(&parent, &span);
        assert_eq!(result.len(), 2);
        let last = &result.sequences[1];
        assert!(!last.is_complete());
        assert_eq!(names(last), vec!["21", "32B", "50K"]);
        assert_eq!(
            result.diagnostics,
            vec![DecompositionDiagnostic::TruncatedSequence {
                sequence: "B".to_string(),
                start: 2,
            }]
        );
    }

    #[test]
    fn test_no_start_tag() {
        let parent = payload(&["20", "59"]);
        let span = FixedSpan::new("B", &["21"], &["59"], &[]);
        assert!(decompose_fixed_span(&parent, &span).is_empty());
    }
}
