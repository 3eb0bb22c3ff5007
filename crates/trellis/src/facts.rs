//! Structured usage facts produced by external source-code scanners.
//!
//! Tooling that inspects a codebase (annotation processors, dependency
//! analyzers) reports what it finds as [`UsageFact`]s: "this element uses
//! the element named X, for this reason, over this technology". The model
//! consumes those facts and turns each one into a relationship; the scanner
//! itself is not part of this library.

use serde::{Deserialize, Serialize};

use trellis_core::identifier::Id;

use crate::{error::ModelError, model::Model, relationship::InteractionStyle};

/// One "uses" fact reported by an external scanner.
///
/// The destination is an element name, not an id: scanners see names in
/// annotations, and the model resolves them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageFact {
    /// Name of the destination element.
    pub destination: String,
    /// Description of the relationship.
    #[serde(default)]
    pub description: String,
    /// Technology of the relationship.
    #[serde(default)]
    pub technology: String,
}

impl UsageFact {
    /// Creates a usage fact.
    pub fn new(destination: &str, description: &str, technology: &str) -> Self {
        Self {
            destination: destination.trim().to_string(),
            description: description.trim().to_string(),
            technology: technology.trim().to_string(),
        }
    }
}

impl Model {
    /// Creates one relationship per fact, from the given source element to
    /// the element each fact names.
    ///
    /// Returns the ids of the created relationships, in fact order. Facts
    /// are applied in order and application stops at the first failure;
    /// relationships created before the failure remain in the model (the
    /// graph is append-only).
    ///
    /// # Errors
    ///
    /// Fails if the source does not resolve, a destination name is unknown,
    /// or a fact duplicates an existing relationship.
    pub fn apply_usage_facts(
        &mut self,
        source: Id,
        facts: &[UsageFact],
    ) -> Result<Vec<Id>, ModelError> {
        let mut created = Vec::with_capacity(facts.len());
        for fact in facts {
            let destination = self
                .element_named(&fact.destination)
                .map(|element| element.id())
                .ok_or_else(|| ModelError::UnknownName(fact.destination.clone()))?;
            created.push(self.add_relationship(
                source,
                destination,
                &fact.description,
                &fact.technology,
                InteractionStyle::Synchronous,
            )?);
        }
        Ok(created)
    }
}
