/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Marker-letter splitting.
//!
//! Treasury messages open each sequence with field 15 carrying the sequence
//! letter as its option (`15A`, `15B`, ...). Sequences are flat siblings.

use crate::sequence::{Decomposition, Sequence};
use swiftmt_core::taglist::TagList;
use tracing::trace;

/// Splits `parent` at every `{marker}{letter}` tag.
///
/// Tags before the first marker belong to no sequence. A repeated letter
/// starts a new sequence with the same label.
///
/// # Arguments
/// * `parent` - The tags to split
/// * `marker` - The marker field number (e.g. `15`)
/// * `letter` - Keep only sequences with this letter, if set
#[must_use]
pub fn decompose_by_marker(parent: &TagList, marker: &str, letter: Option<char>) -> Decomposition {
    let mut decomposition = Decomposition::new();
    let mut open: Option<(char, usize)> = None;

    for (index, tag) in parent.iter().enumerate() {
        if !tag.is_number_with_letter(marker) {
            continue;
        }
        if let Some((label, start)) = open.take() {
            push(&mut decomposition, parent, label, start..index, letter);
        }
        open = tag.letter().map(|label| (label, index));
    }
    if let Some((label, start)) = open {
        push(&mut decomposition, parent, label, start..parent.len(), letter);
    }

    trace!(
        marker,
        sequences = decomposition.len(),
        "split by marker letter"
    );
    decomposition
}

fn push(
    decomposition: &mut Decomposition,
    parent: &TagList,
    label: char,
    range: std::ops::Range<usize>,
    wanted: Option<char>,
) {
    if wanted.is_none_or(|w| w == label) {
        decomposition
            .sequences
            .push(Sequence::new(label, parent.sublist(range)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swiftmt_core::tag::Tag;

    fn payload(names: &[&str]) -> TagList {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Tag::new(*n, format!("V{i}")))
            .collect()
    }

    fn shape(decomposition: &Decomposition) -> Vec<(String, Vec<String>)> {
        decomposition
            .iter()
            .map(|s| {
                (
                    s.label.to_string(),
                    s.tags.names().map(str::to_string).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_split_two_sequences() {
        let parent = payload(&["15A", "20", "21", "15B", "202", "203"]);
        let result = decompose_by_marker(&parent, "15", None);
        assert!(result.is_clean());
        assert_eq!(
            shape(&result),
            vec![
                ("A".to_string(), vec!["15A".into(), "20".into(), "21".into()]),
                ("B".to_string(), vec!["15B".into(), "202".into(), "203".into()]),
            ]
        );
    }

    #[test]
    fn test_tags_before_first_marker_are_dropped() {
        let parent = payload(&["20", "15A", "22A"]);
        let result = decompose_by_marker(&parent, "15", None);
        assert_eq!(result.len(), 1);
        assert_eq!(result.sequences[0].tags.len(), 2);
    }

    #[test]
    fn test_no_marker_yields_nothing() {
        let parent = payload(&["20", "21", "15"]);
        let first = decompose_by_marker(&parent, "15", None);
        let second = decompose_by_marker(&parent, "15", None);
        assert!(first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_repeated_letter_repeats_sequence() {
        let parent = payload(&["15A", "20", "15B", "30", "15B", "31"]);
        let result = decompose_by_marker(&parent, "15", None);
        let labels: Vec<&str> = result.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "B"]);
        assert_eq!(result.by_label("B")[1].tags[1].value(), "V5");
    }

    #[test]
    fn test_letter_filter() {
        let parent = payload(&["15A", "20", "15B", "30", "15C", "31", "15B"]);
        let result = decompose_by_marker(&parent, "15", Some('B'));
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|s| s.label == "B"));
        assert_eq!(result.sequences[1].tags.len(), 1);
    }

    #[test]
    fn test_marker_number_must_match_exactly() {
        let parent = payload(&["150A", "15A", "115B"]);
        let result = decompose_by_marker(&parent, "15", None);
        assert_eq!(result.len(), 1);
        assert_eq!(result.sequences[0].tags.len(), 2);
    }
}
