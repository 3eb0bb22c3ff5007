//! Ordered tag sets and the well-known tag vocabulary.
//!
//! Every element and relationship in a model carries a [`TagSet`]: the union
//! of the required tags for its kind and any user-supplied tags, in insertion
//! order. The set itself is a plain ordered collection; the rule that required
//! tags cannot be removed is enforced by the element types, which consult
//! their own required-tag list before delegating a removal.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Tag carried by every element.
pub const ELEMENT: &str = "Element";

/// Tag carried by software systems.
pub const SOFTWARE_SYSTEM: &str = "Software System";

/// Tag carried by containers.
pub const CONTAINER: &str = "Container";

/// Tag carried by components.
pub const COMPONENT: &str = "Component";

/// Tag carried by deployment nodes.
pub const DEPLOYMENT_NODE: &str = "Deployment Node";

/// Tag carried by container instances.
pub const CONTAINER_INSTANCE: &str = "Container Instance";

/// Tag carried by every relationship.
pub const RELATIONSHIP: &str = "Relationship";

/// Tag added to relationships with synchronous interaction style.
pub const SYNCHRONOUS: &str = "Synchronous";

/// Tag added to relationships with asynchronous interaction style.
pub const ASYNCHRONOUS: &str = "Asynchronous";

/// An insertion-ordered set of tags.
///
/// Tags are trimmed on insertion and empty tags are ignored. Iteration and
/// the serialized form both follow insertion order, so a model serializes
/// deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: IndexSet<String>,
}

impl TagSet {
    /// Creates an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tag set seeded with the given required tags, in order.
    pub fn with_required(required: &[&str]) -> Self {
        let mut set = Self::default();
        for tag in required {
            set.add(tag);
        }
        set
    }

    /// Adds a tag, returning `true` if it was not already present.
    ///
    /// The tag is trimmed; empty tags are ignored.
    pub fn add(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        self.tags.insert(tag.to_string())
    }

    /// Removes a tag, returning `true` if it was present.
    ///
    /// Insertion order of the remaining tags is preserved.
    pub fn remove(&mut self, tag: &str) -> bool {
        self.tags.shift_remove(tag.trim())
    }

    /// Returns `true` if the set contains the given tag.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag.trim())
    }

    /// Returns an iterator over the tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Returns the number of tags in the set.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` if the set contains no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Ensures every required tag is present, required tags first.
    ///
    /// Used when a tag set arrives from an external representation that may
    /// have been edited by hand. If any required tag is missing the set is
    /// rebuilt so that required tags lead, followed by the existing tags in
    /// their original order.
    pub fn ensure_required(&mut self, required: &[&str]) {
        if required.iter().all(|tag| self.contains(tag)) {
            return;
        }
        let existing = std::mem::take(&mut self.tags);
        for tag in required {
            self.add(tag);
        }
        for tag in existing {
            self.add(&tag);
        }
    }
}

impl Extend<String> for TagSet {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        for tag in iter {
            self.add(&tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_with_required_preserves_order() {
        let set = TagSet::with_required(&[ELEMENT, CONTAINER]);
        let tags: Vec<&str> = set.iter().collect();
        assert_eq!(tags, vec![ELEMENT, CONTAINER]);
    }

    #[test]
    fn test_add_trims_and_ignores_empty() {
        let mut set = TagSet::new();
        assert!(set.add("  Web Browser  "));
        assert!(!set.add("Web Browser"));
        assert!(!set.add("   "));
        assert_eq!(set.len(), 1);
        assert!(set.contains("Web Browser"));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut set = TagSet::with_required(&[ELEMENT, CONTAINER]);
        set.add("Database");
        set.add("Relational");

        assert!(set.remove("Database"));
        assert!(!set.remove("Database"));

        let tags: Vec<&str> = set.iter().collect();
        assert_eq!(tags, vec![ELEMENT, CONTAINER, "Relational"]);
    }

    #[test]
    fn test_ensure_required_rebuilds_with_required_first() {
        let mut set = TagSet::new();
        set.add("Database");

        set.ensure_required(&[ELEMENT, CONTAINER]);

        let tags: Vec<&str> = set.iter().collect();
        assert_eq!(tags, vec![ELEMENT, CONTAINER, "Database"]);
    }

    #[test]
    fn test_ensure_required_no_op_when_present() {
        let mut set = TagSet::with_required(&[ELEMENT]);
        set.add("Database");

        set.ensure_required(&[ELEMENT]);

        let tags: Vec<&str> = set.iter().collect();
        assert_eq!(tags, vec![ELEMENT, "Database"]);
    }

    #[test]
    fn test_serde_transparent() {
        let mut set = TagSet::with_required(&[ELEMENT, SOFTWARE_SYSTEM]);
        set.add("External API");

        let json = serde_json::to_string(&set).expect("serialize");
        assert_eq!(json, r#"["Element","Software System","External API"]"#);

        let back: TagSet = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, set);
    }

    proptest! {
        #[test]
        fn prop_first_seen_order_is_preserved(tags in prop::collection::vec("[a-zA-Z ]{1,12}", 1..24)) {
            let mut set = TagSet::new();
            for tag in &tags {
                set.add(tag);
            }

            let mut expected: Vec<String> = Vec::new();
            for tag in &tags {
                let trimmed = tag.trim();
                if !trimmed.is_empty() && !expected.iter().any(|t| t == trimmed) {
                    expected.push(trimmed.to_string());
                }
            }

            let actual: Vec<&str> = set.iter().collect();
            prop_assert_eq!(actual, expected.iter().map(String::as_str).collect::<Vec<_>>());
        }

        #[test]
        fn prop_ensure_required_always_restores_required(tags in prop::collection::vec("[a-z]{1,8}", 0..16)) {
            let mut set = TagSet::new();
            for tag in &tags {
                set.add(tag);
            }
            for tag in &tags {
                set.remove(tag);
            }

            set.ensure_required(&[ELEMENT, CONTAINER_INSTANCE]);
            prop_assert!(set.contains(ELEMENT));
            prop_assert!(set.contains(CONTAINER_INSTANCE));
        }
    }
}
