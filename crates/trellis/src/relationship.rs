//! Relationships between model elements.
//!
//! A [`Relationship`] is a directed, described edge between two elements,
//! identified like any other model item. Relationships are created
//! exclusively through the owning model's factory, which assigns the
//! identifier and performs duplicate and validity checks; the constructor is
//! crate-private for that reason.

use serde::{Deserialize, Serialize};

use trellis_core::{
    identifier::Id,
    tags::{self, TagSet},
};

const REQUIRED_TAGS: &[&str] = &[tags::RELATIONSHIP];

/// Classification of a relationship's call semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionStyle {
    #[default]
    Synchronous,
    Asynchronous,
}

impl InteractionStyle {
    /// Returns the tag added to relationships with this style.
    pub(crate) fn tag(self) -> &'static str {
        match self {
            InteractionStyle::Synchronous => tags::SYNCHRONOUS,
            InteractionStyle::Asynchronous => tags::ASYNCHRONOUS,
        }
    }
}

/// A directed edge between two elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    id: Id,
    source_id: Id,
    destination_id: Id,
    #[serde(default)]
    description: String,
    #[serde(default)]
    technology: String,
    #[serde(default)]
    interaction_style: InteractionStyle,
    #[serde(default)]
    tags: TagSet,
}

impl Relationship {
    pub(crate) fn new(
        id: Id,
        source_id: Id,
        destination_id: Id,
        description: &str,
        technology: &str,
        interaction_style: InteractionStyle,
    ) -> Self {
        let mut tags = TagSet::with_required(REQUIRED_TAGS);
        tags.add(interaction_style.tag());
        Self {
            id,
            source_id,
            destination_id,
            description: description.trim().to_string(),
            technology: technology.trim().to_string(),
            interaction_style,
            tags,
        }
    }

    /// Returns the relationship identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the id of the source element.
    pub fn source_id(&self) -> Id {
        self.source_id
    }

    /// Returns the id of the destination element.
    pub fn destination_id(&self) -> Id {
        self.destination_id
    }

    /// Returns the description of the relationship.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the technology of the relationship (e.g. "HTTPS").
    pub fn technology(&self) -> &str {
        &self.technology
    }

    /// Returns the interaction style of the relationship.
    pub fn interaction_style(&self) -> InteractionStyle {
        self.interaction_style
    }

    /// Returns the tags of the relationship.
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Adds a tag to the relationship.
    pub fn add_tag(&mut self, tag: &str) {
        self.tags.add(tag);
    }

    /// Removes a tag. Required tags are never removed.
    pub fn remove_tag(&mut self, tag: &str) {
        if !REQUIRED_TAGS.contains(&tag) {
            self.tags.remove(tag);
        }
    }

    pub(crate) fn ensure_required_tags(&mut self) {
        self.tags.ensure_required(REQUIRED_TAGS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_tag_is_applied() {
        let relationship = Relationship::new(
            Id::new("10"),
            Id::new("1"),
            Id::new("2"),
            "Sends events to",
            "AMQP",
            InteractionStyle::Asynchronous,
        );

        let tag_list: Vec<&str> = relationship.tags().iter().collect();
        assert_eq!(tag_list, vec![tags::RELATIONSHIP, tags::ASYNCHRONOUS]);
    }

    #[test]
    fn test_required_tag_cannot_be_removed() {
        let mut relationship = Relationship::new(
            Id::new("10"),
            Id::new("1"),
            Id::new("2"),
            "Uses",
            "",
            InteractionStyle::Synchronous,
        );

        relationship.remove_tag(tags::RELATIONSHIP);
        assert!(relationship.tags().contains(tags::RELATIONSHIP));

        relationship.remove_tag(tags::SYNCHRONOUS);
        assert!(!relationship.tags().contains(tags::SYNCHRONOUS));
    }

    #[test]
    fn test_description_and_technology_are_trimmed() {
        let relationship = Relationship::new(
            Id::new("10"),
            Id::new("1"),
            Id::new("2"),
            "  Reads from  ",
            "  JDBC  ",
            InteractionStyle::Synchronous,
        );

        assert_eq!(relationship.description(), "Reads from");
        assert_eq!(relationship.technology(), "JDBC");
    }
}
