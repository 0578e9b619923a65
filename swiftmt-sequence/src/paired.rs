/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Qualified block nesting.
//!
//! Securities messages delimit sequences with a start tag (`16R`) and an end
//! tag (`16S`) carrying the same qualifier. Blocks nest without limit, so
//! open blocks live on an explicit stack instead of the call stack.
//!
//! Structural problems never abort the walk:
//! - an end tag whose qualifier differs from the innermost open block still
//!   closes that block and records [`DecompositionDiagnostic::UnmatchedQualifier`]
//! - an end tag with nothing open is skipped with [`DecompositionDiagnostic::UnexpectedEnd`]
//! - blocks still open at the end are closed there with
//!   [`DecompositionDiagnostic::UnclosedNesting`]

use crate::sequence::{Decomposition, Sequence};
use smallvec::SmallVec;
use swiftmt_core::error::DecompositionDiagnostic;
use swiftmt_core::tag::Tag;
use swiftmt_core::taglist::TagList;
use tracing::{debug, warn};

/// An open block.
#[derive(Debug)]
struct Frame {
    qualifier: String,
    start: usize,
    opening: Tag,
    own: TagList,
    children: Vec<Sequence>,
}

impl Frame {
    fn close(self, parent: &TagList, end: usize, closing: Option<Tag>, complete: bool) -> Sequence {
        Sequence {
            label: self.qualifier.as_str().into(),
            tags: parent.sublist(self.start + 1..end),
            own: self.own,
            children: self.children,
            opening: Some(self.opening),
            closing,
            complete,
        }
    }
}

/// Groups `parent` into nested qualified blocks.
///
/// Tags outside every block belong to no sequence.
///
/// # Arguments
/// * `parent` - The tags to decompose
/// * `start` - Tag name opening a block (e.g. `16R`)
/// * `end` - Tag name closing a block (e.g. `16S`)
/// * `qualifier` - Keep only blocks with this qualifier, at any depth
#[must_use]
pub fn decompose_paired(
    parent: &TagList,
    start: &str,
    end: &str,
    qualifier: Option<&str>,
) -> Decomposition {
    let mut stack: SmallVec<[Frame; 8]> = SmallVec::new();
    let mut result = Decomposition::new();

    for (index, tag) in parent.iter().enumerate() {
        if tag.name() == start {
            stack.push(Frame {
                qualifier: tag.value().trim().to_string(),
                start: index,
                opening: tag.clone(),
                own: TagList::new(),
                children: Vec::new(),
            });
        } else if tag.name() == end {
            let found = tag.value().trim();
            let Some(frame) = stack.pop() else {
                report(
                    &mut result.diagnostics,
                    DecompositionDiagnostic::UnexpectedEnd {
                        found: found.to_string(),
                        index,
                    },
                );
                continue;
            };
            let matched = frame.qualifier == found;
            if !matched {
                report(
                    &mut result.diagnostics,
                    DecompositionDiagnostic::UnmatchedQualifier {
                        expected: frame.qualifier.clone(),
                        found: found.to_string(),
                        index,
                    },
                );
            }
            let sequence = frame.close(parent, index, Some(tag.clone()), matched);
            attach(&mut stack, &mut result.sequences, sequence);
        } else if let Some(frame) = stack.last_mut() {
            frame.own.append(tag.clone());
        }
    }

    while let Some(frame) = stack.pop() {
        report(
            &mut result.diagnostics,
            DecompositionDiagnostic::UnclosedNesting {
                qualifier: frame.qualifier.clone(),
                start: frame.start,
            },
        );
        let sequence = frame.close(parent, parent.len(), None, false);
        attach(&mut stack, &mut result.sequences, sequence);
    }

    if let Some(wanted) = qualifier {
        result.sequences = select(result.sequences, wanted);
    }

    debug!(
        sequences = result.len(),
        diagnostics = result.diagnostics.len(),
        "decomposed qualified blocks"
    );
    result
}

fn attach(stack: &mut SmallVec<[Frame; 8]>, top: &mut Vec<Sequence>, sequence: Sequence) {
    match stack.last_mut() {
        Some(frame) => frame.children.push(sequence),
        None => top.push(sequence),
    }
}

fn report(diagnostics: &mut Vec<DecompositionDiagnostic>, diagnostic: DecompositionDiagnostic) {
    warn!(%diagnostic, "qualified block structure");
    diagnostics.push(diagnostic);
}

/// Collects every sequence labelled `wanted`, pre-order, subtrees included.
fn select(sequences: Vec<Sequence>, wanted: &str) -> Vec<Sequence> {
    let mut selected = Vec::new();
    let mut pending: Vec<Sequence> = sequences.into_iter().rev().collect();
    while let Some(mut sequence) = pending.pop() {
        let children = std::mem::take(&mut sequence.children);
        if sequence.label == wanted {
            sequence.children = children.clone();
            selected.push(sequence);
        }
        pending.extend(children.into_iter().rev());
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(tags: &[(&str, &str)]) -> TagList {
        tags.iter().map(|(n, v)| Tag::new(*n, *v)).collect()
    }

    #[test]
    fn test_nested_blocks() {
        let parent = payload(&[
            ("16R", "SETT"),
            ("16R", "DET"),
            ("35B", "ISIN X"),
            ("16S", "DET"),
            ("16S", "SETT"),
        ]);
        let result = decompose_paired(&parent, "16R", "16S", None);
        assert!(result.is_clean());
        assert_eq!(result.len(), 1);

        let sett = &result.sequences[0];
        assert_eq!(sett.label, "SETT");
        assert!(sett.own.is_empty());
        assert_eq!(sett.tags.len(), 3);
        assert_eq!(sett.children.len(), 1);

        let det = sett.child("DET").unwrap();
        assert_eq!(det.tags.names().collect::<Vec<_>>(), vec!["35B"]);
        assert!(det.is_complete());
        assert!(det.children.is_empty());
    }

    #[test]
    fn test_balanced_tree_accounts_for_every_tag() {
        let parent = payload(&[
            ("16R", "GENL"),
            ("20C", ":SEME//REF"),
            ("16R", "LINK"),
            ("20C", ":RELA//X"),
            ("16S", "LINK"),
            ("16R", "LINK"),
            ("20C", ":PREV//Y"),
            ("16S", "LINK"),
            ("23G", "NEWM"),
            ("16S", "GENL"),
            ("16R", "TRADDET"),
            ("98A", ":TRAD//20240102"),
            ("16S", "TRADDET"),
        ]);
        let result = decompose_paired(&parent, "16R", "16S", None);
        assert!(result.is_clean());
        assert_eq!(result.tree_len(), parent.len());

        let genl = result.first("GENL").unwrap();
        assert_eq!(genl.own.names().collect::<Vec<_>>(), vec!["20C", "23G"]);
        assert_eq!(genl.children.len(), 2);
        assert_eq!(genl.tags.len(), 8);
    }

    #[test]
    fn test_qualifier_mismatch_closes_anyway() {
        let parent = payload(&[
            ("16R", "SETT"),
            ("35B", "X"),
            ("16S", "OTHER"),
            ("20", "TOP"),
        ]);
        let result = decompose_paired(&parent, "16R", "16S", None);
        assert_eq!(result.len(), 1);
        assert!(!result.sequences[0].is_complete());
        assert_eq!(
            result.diagnostics,
            vec![DecompositionDiagnostic::UnmatchedQualifier {
                expected: "SETT".to_string(),
                found: "OTHER".to_string(),
                index: 2,
            }]
        );
    }

    #[test]
    fn test_unclosed_blocks_close_at_end() {
        let parent = payload(&[("16R", "A"), ("16R", "B"), ("20", "X")]);
        let result = decompose_paired(&parent, "16R", "16S", None);
        assert_eq!(result.len(), 1);
        let outer = &result.sequences[0];
        assert_eq!(outer.label, "A");
        assert!(!outer.is_complete());
        assert!(outer.closing.is_none());
        assert_eq!(outer.tags.len(), 2);
        assert_eq!(outer.children[0].tags.len(), 1);
        assert_eq!(result.diagnostics.len(), 2);
        assert!(matches!(
            result.diagnostics[0],
            DecompositionDiagnostic::UnclosedNesting { start: 1, .. }
        ));
    }

    #[test]
    fn test_stray_end_tag() {
        let parent = payload(&[("16S", "GENL"), ("16R", "A"), ("16S", "A")]);
        let result = decompose_paired(&parent, "16R", "16S", None);
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.diagnostics,
            vec![DecompositionDiagnostic::UnexpectedEnd {
                found: "GENL".to_string(),
                index: 0,
            }]
        );
    }

    #[test]
    fn test_qualifier_selects_at_any_depth() {
        let parent = payload(&[
            ("16R", "GENL"),
            ("16R", "LINK"),
            ("20C", "1"),
            ("16S", "LINK"),
            ("16R", "LINK"),
            ("20C", "2"),
            ("16S", "LINK"),
            ("16S", "GENL"),
            ("16R", "LINK"),
            ("20C", "3"),
            ("16S", "LINK"),
        ]);
        let result = decompose_paired(&parent, "16R", "16S", Some("LINK"));
        let values: Vec<&str> = result
            .iter()
            .map(|s| s.tags.first_value("20C").unwrap_or_default())
            .collect();
        assert_eq!(values, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 1_000;
        let mut parent = TagList::with_capacity(depth * 2);
        for _ in 0..depth {
            parent.append_field("16R", "X");
        }
        for _ in 0..depth {
            parent.append_field("16S", "X");
        }
        let result = decompose_paired(&parent, "16R", "16S", None);
        assert!(result.is_clean());
        assert_eq!(result.len(), 1);
        assert_eq!(result.find_nested("X").len(), depth);
    }
}
