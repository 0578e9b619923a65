/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Ordered tag container.
//!
//! A [`TagList`] keeps tags in their original textual order. Repeated names
//! are legal and meaningful, so every lookup that can match more than once
//! comes in a "first" and an "all" flavour.

use crate::tag::Tag;
use serde::{Deserialize, Serialize};
use std::ops::{Index, Range};

/// An ordered, duplicate-tolerant list of tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagList {
    tags: Vec<Tag>,
}

impl TagList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Creates an empty list with room for `capacity` tags.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tags: Vec::with_capacity(capacity),
        }
    }

    /// Returns the first tag with the given name.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name() == name)
    }

    /// Returns the value of the first tag with the given name.
    #[must_use]
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.first(name).map(Tag::value)
    }

    /// Returns every tag with the given name, in order.
    #[must_use]
    pub fn all(&self, name: &str) -> Vec<&Tag> {
        self.tags.iter().filter(|t| t.name() == name).collect()
    }

    /// Returns the index of the first tag with the given name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.tags.iter().position(|t| t.name() == name)
    }

    /// Returns true if any tag has the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the tag at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.tags.get(index)
    }

    /// Returns an owned copy of a contiguous range of tags.
    ///
    /// The range is clamped to the list bounds, so an out-of-range request
    /// yields a shorter (possibly empty) list instead of panicking.
    #[must_use]
    pub fn sublist(&self, range: Range<usize>) -> TagList {
        let end = range.end.min(self.tags.len());
        let start = range.start.min(end);
        Self {
            tags: self.tags[start..end].to_vec(),
        }
    }

    /// Appends a tag at the end of the list.
    pub fn append(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// Appends a tag built from a name and a value.
    pub fn append_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.append(Tag::new(name, value));
    }

    /// Returns the tag names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(Tag::name)
    }

    /// Returns an iterator over the tags.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    /// Returns the tags as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns the number of tags.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if the list holds no tags.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Consumes the list and returns the underlying tags.
    #[must_use]
    pub fn into_vec(self) -> Vec<Tag> {
        self.tags
    }
}

/// Returns every tag in `list` named `name`.
///
/// Free-function form of [`TagList::all`], the call shape used by typed
/// field accessors.
#[must_use]
pub fn tags_by_name<'a>(list: &'a TagList, name: &str) -> Vec<&'a Tag> {
    list.all(name)
}

impl From<Vec<Tag>> for TagList {
    fn from(tags: Vec<Tag>) -> Self {
        Self { tags }
    }
}

impl FromIterator<Tag> for TagList {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl Extend<Tag> for TagList {
    fn extend<I: IntoIterator<Item = Tag>>(&mut self, iter: I) {
        self.tags.extend(iter);
    }
}

impl IntoIterator for TagList {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.into_iter()
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl Index<usize> for TagList {
    type Output = Tag;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tags[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TagList {
        vec![
            Tag::new("20", "REF1"),
            Tag::new("23B", "CRED"),
            Tag::new("71F", "EUR1,"),
            Tag::new("71F", "EUR2,"),
        ]
        .into()
    }

    #[test]
    fn test_first_and_all() {
        let list = sample();
        assert_eq!(list.first("71F").map(Tag::value), Some("EUR1,"));
        let all: Vec<&str> = list.all("71F").into_iter().map(Tag::value).collect();
        assert_eq!(all, vec!["EUR1,", "EUR2,"]);
        assert!(list.first("59").is_none());
        assert!(list.all("59").is_empty());
    }

    #[test]
    fn test_sublist_clamps() {
        let list = sample();
        let mid = list.sublist(1..3);
        assert_eq!(mid.names().collect::<Vec<_>>(), vec!["23B", "71F"]);
        assert_eq!(list.sublist(3..10).len(), 1);
        assert!(list.sublist(7..9).is_empty());
        assert!(list.sublist(3..1).is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut list = TagList::new();
        list.append(Tag::new("20", "A"));
        list.append_field("20", "B");
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].value(), "B");
        assert_eq!(list.position("20"), Some(0));
    }

    #[test]
    fn test_tags_by_name() {
        let list = sample();
        assert_eq!(tags_by_name(&list, "71F").len(), 2);
        assert!(list.contains("23B"));
        assert_eq!(list.first_value("23B"), Some("CRED"));
    }
}
