//! Error types for model operations.
//!
//! This module provides the main error type [`ModelError`] covering the
//! validation failures raised by the model's factory operations. All failures
//! are surfaced synchronously at the offending call; a failed call leaves the
//! model unchanged.

use thiserror::Error;

use trellis_core::{healthcheck::HealthCheckError, identifier::Id};

/// The main error type for model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("a name must not be empty")]
    EmptyName,

    #[error("an element named {0:?} already exists in this scope")]
    DuplicateName(String),

    #[error("no element with id {0} exists in the model")]
    UnknownElement(Id),

    #[error("the source of a relationship must be an element of the model, but {0} does not resolve")]
    UnknownSource(Id),

    #[error("the destination of a relationship must be an element of the model, but {0} does not resolve")]
    UnknownDestination(Id),

    #[error("element {id} is not a {expected}")]
    WrongElementKind { id: Id, expected: &'static str },

    #[error("a relationship from {source} to {destination} with the same description already exists")]
    DuplicateRelationship { source: Id, destination: Id },

    #[error("no element named {0:?} exists in the model")]
    UnknownName(String),

    #[error(transparent)]
    HealthCheck(#[from] HealthCheckError),
}
