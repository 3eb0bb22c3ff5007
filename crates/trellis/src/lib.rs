//! Trellis - a software architecture modeling library following the C4 model.
//!
//! A model is an in-memory graph of software systems, containers,
//! components, and their deployment instances, with directed relationships
//! between them. The [`Model`] is the single owner of the graph: elements
//! and relationships are created through its factory operations, which
//! assign identifiers and enforce validity, and the finished model
//! serializes to a structured external representation.
//!
//! # Examples
//!
//! ```
//! use trellis::{InteractionStyle, Model};
//!
//! let mut model = Model::new();
//!
//! let system = model.add_software_system("Internet Banking", "Online banking")?;
//! let api = model.add_container(system, "API", "Serves the mobile app", "Axum")?;
//! let database = model.add_container(system, "Database", "Stores accounts", "PostgreSQL")?;
//! model.uses(api, database, "Reads from and writes to", "SQL")?;
//!
//! let node = model.add_deployment_node("AWS", "Production", "Amazon Web Services")?;
//! let instance = model.add_container_instance(node, api)?;
//! model.add_health_check(instance, "ping", "https://example.com/health")?;
//!
//! assert_eq!(model.canonical_name(api).as_deref(), Some("/Internet Banking/API"));
//! # Ok::<(), trellis::ModelError>(())
//! ```

mod deployment;
mod element;
mod error;
mod facts;
mod model;
mod relationship;

pub use trellis_core::{healthcheck, identifier, tags};

pub use deployment::{ContainerInstance, DeploymentNode};
pub use element::{Component, Container, Element, Location, ModelElement, SoftwareSystem};
pub use error::ModelError;
pub use facts::UsageFact;
pub use model::Model;
pub use relationship::{InteractionStyle, Relationship};
