/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Sequence result types.
//!
//! This module provides the values a decomposition hands back:
//! - [`SequenceLabel`]: Marker letter, block qualifier or span name
//! - [`Sequence`]: One matched sequence, possibly with nested children
//! - [`Decomposition`]: Matched sequences plus non-fatal diagnostics

use serde::{Deserialize, Serialize};
use std::fmt;
use swiftmt_core::error::DecompositionDiagnostic;
use swiftmt_core::tag::Tag;
use swiftmt_core::taglist::TagList;

/// Label of a matched sequence.
///
/// For marker-letter splits this is the letter (`A`), for qualified blocks
/// the qualifier (`SETDET`), for fixed spans the span name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceLabel(String);

impl SequenceLabel {
    /// Creates a new label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the label text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the label and returns its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SequenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SequenceLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SequenceLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<char> for SequenceLabel {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

impl PartialEq<str> for SequenceLabel {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SequenceLabel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One matched sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    /// Sequence label.
    pub label: SequenceLabel,
    /// Sequence body, in original order.
    ///
    /// For qualified blocks this excludes the opening and closing tags.
    pub tags: TagList,
    /// Body tags that are not inside any nested child.
    pub own: TagList,
    /// Nested sequences, in order of their opening tag.
    pub children: Vec<Sequence>,
    /// Tag that opened a qualified block.
    pub opening: Option<Tag>,
    /// Tag that closed a qualified block; `None` if closed implicitly.
    pub closing: Option<Tag>,
    /// False for truncated or implicitly closed sequences.
    pub complete: bool,
}

impl Sequence {
    /// Creates a flat, complete sequence.
    ///
    /// # Arguments
    /// * `label` - The sequence label
    /// * `tags` - The sequence body
    #[must_use]
    pub fn new(label: impl Into<SequenceLabel>, tags: TagList) -> Self {
        Self {
            label: label.into(),
            own: tags.clone(),
            tags,
            children: Vec::new(),
            opening: None,
            closing: None,
            complete: true,
        }
    }

    /// Marks the sequence as incomplete.
    #[must_use]
    pub fn incomplete(mut self) -> Self {
        self.complete = false;
        self
    }

    /// Returns the sequence label.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &SequenceLabel {
        &self.label
    }

    /// Returns the sequence body.
    #[inline]
    #[must_use]
    pub fn tags(&self) -> &TagList {
        &self.tags
    }

    /// Returns the body tags outside nested children.
    #[inline]
    #[must_use]
    pub fn own(&self) -> &TagList {
        &self.own
    }

    /// Returns the nested sequences.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Sequence] {
        &self.children
    }

    /// Returns true if the sequence was closed by its own end marker.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Returns the first direct child with the given label.
    #[must_use]
    pub fn child(&self, label: &str) -> Option<&Sequence> {
        self.children.iter().find(|c| c.label == label)
    }

    /// Returns the first tag with the given name in the body.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Tag> {
        self.tags.first(name)
    }

    /// Returns the number of tags this sequence accounts for.
    ///
    /// Counts its own tags, its opening and closing tags, and recursively
    /// those of its children.
    #[must_use]
    pub fn tree_len(&self) -> usize {
        self.own.len()
            + usize::from(self.opening.is_some())
            + usize::from(self.closing.is_some())
            + self.children.iter().map(Sequence::tree_len).sum::<usize>()
    }
}

/// Result of applying a boundary rule to a tag list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Matched sequences, in input order.
    pub sequences: Vec<Sequence>,
    /// Structural problems found along the way.
    pub diagnostics: Vec<DecompositionDiagnostic>,
}

impl Decomposition {
    /// Creates an empty decomposition.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sequences: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Returns true if no diagnostic was recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns the number of top-level sequences.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Returns true if nothing matched.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Returns an iterator over the top-level sequences.
    pub fn iter(&self) -> std::slice::Iter<'_, Sequence> {
        self.sequences.iter()
    }

    /// Returns the first top-level sequence with the given label.
    #[must_use]
    pub fn first(&self, label: &str) -> Option<&Sequence> {
        self.sequences.iter().find(|s| s.label == label)
    }

    /// Returns every top-level sequence with the given label, in order.
    #[must_use]
    pub fn by_label(&self, label: &str) -> Vec<&Sequence> {
        self.sequences.iter().filter(|s| s.label == label).collect()
    }

    /// Returns every sequence with the given label at any depth, pre-order.
    #[must_use]
    pub fn find_nested(&self, label: &str) -> Vec<&Sequence> {
        let mut found = Vec::new();
        let mut pending: Vec<&Sequence> = self.sequences.iter().rev().collect();
        while let Some(seq) = pending.pop() {
            if seq.label == label {
                found.push(seq);
            }
            pending.extend(seq.children.iter().rev());
        }
        found
    }

    /// Returns the total number of tags accounted for by the sequence tree.
    #[must_use]
    pub fn tree_len(&self) -> usize {
        self.sequences.iter().map(Sequence::tree_len).sum()
    }

    /// Flattens the top level into `(label, body)` pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(SequenceLabel, TagList)> {
        self.sequences
            .into_iter()
            .map(|s| (s.label, s.tags))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Decomposition {
    type Item = &'a Sequence;
    type IntoIter = std::slice::Iter<'a, Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sequences.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> TagList {
        names.iter().map(|n| Tag::new(*n, "")).collect()
    }

    #[test]
    fn test_label_comparisons() {
        let label = SequenceLabel::from('A');
        assert_eq!(label, "A");
        assert_eq!(label.as_str(), "A");
        assert_eq!(label.to_string(), "A");
    }

    #[test]
    fn test_sequence_new_is_flat() {
        let seq = Sequence::new("B", tags(&["21", "59"]));
        assert!(seq.is_complete());
        assert_eq!(seq.own(), seq.tags());
        assert!(seq.children().is_empty());
        assert_eq!(seq.tree_len(), 2);
        assert!(!seq.incomplete().is_complete());
    }

    #[test]
    fn test_find_nested_is_pre_order() {
        let mut inner = Sequence::new("LINK", tags(&["20C"]));
        inner.opening = Some(Tag::new("16R", "LINK"));
        inner.closing = Some(Tag::new("16S", "LINK"));
        let mut outer = Sequence::new("GENL", tags(&["20C", "23G"]));
        outer.own = tags(&["23G"]);
        outer.children.push(inner);
        outer.opening = Some(Tag::new("16R", "GENL"));
        outer.closing = Some(Tag::new("16S", "GENL"));

        let decomposition = Decomposition {
            sequences: vec![outer, Sequence::new("LINK", tags(&["13A"]))],
            diagnostics: Vec::new(),
        };
        let links = decomposition.find_nested("LINK");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].tags().names().collect::<Vec<_>>(), vec!["20C"]);
        assert_eq!(links[1].tags().names().collect::<Vec<_>>(), vec!["13A"]);
        assert_eq!(decomposition.by_label("LINK").len(), 1);
        assert_eq!(decomposition.tree_len(), 7);
    }

    #[test]
    fn test_into_pairs() {
        let decomposition = Decomposition {
            sequences: vec![
                Sequence::new("A", tags(&["15A", "20"])),
                Sequence::new("B", tags(&["15B"])),
            ],
            diagnostics: Vec::new(),
        };
        assert!(decomposition.is_clean());
        let pairs = decomposition.into_pairs();
        assert_eq!(pairs[0].0, "A");
        assert_eq!(pairs[1].1.len(), 1);
    }
}
