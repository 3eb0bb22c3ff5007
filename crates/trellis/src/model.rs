//! The model root: single owner of all elements and relationships.
//!
//! A [`Model`] holds insertion-ordered arenas of elements and relationships
//! keyed by identifier, plus the parent index that gives every contained
//! element a navigable upward reference without embedded pointers. All
//! creation goes through the model's factory operations so that identifier
//! assignment and validation live in one place; element structs mutate only
//! their own fields.
//!
//! The graph is append-only during a modeling session: there is no removal
//! operation for elements or relationships.

use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use trellis_core::{healthcheck::HttpHealthCheck, identifier::Id};

use crate::{
    deployment::{ContainerInstance, DeploymentNode},
    element::{Component, Container, Element, ModelElement, SoftwareSystem},
    error::ModelError,
    relationship::{InteractionStyle, Relationship},
};

/// Assigns identifiers as consecutive numeric strings ("1", "2", ...).
///
/// Not persisted: after deserialization the generator is re-seeded from the
/// highest numeric identifier already in the model.
#[derive(Debug, Clone, Default)]
struct SequentialIdGenerator {
    last: u64,
}

impl SequentialIdGenerator {
    fn generate(&mut self) -> Id {
        self.last += 1;
        Id::new(&self.last.to_string())
    }

    /// Records an identifier seen in deserialized state so that newly
    /// generated identifiers do not collide with it.
    fn found(&mut self, id: Id) {
        if let Ok(value) = id.to_string().parse::<u64>() {
            if value > self.last {
                self.last = value;
            }
        }
    }
}

/// A software architecture model: elements, relationships, and the
/// deployment overlay, owned as one graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    elements: IndexMap<Id, Element>,
    #[serde(default)]
    relationships: IndexMap<Id, Relationship>,
    #[serde(default)]
    parents: IndexMap<Id, Id>,
    #[serde(skip)]
    id_generator: SequentialIdGenerator,
}

impl Model {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    fn validate_name(name: &str) -> Result<&str, ModelError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ModelError::EmptyName);
        }
        Ok(name)
    }

    // =========================================================================
    // Element factories
    // =========================================================================

    /// Adds a software system to the model.
    ///
    /// # Errors
    ///
    /// Fails if the name is empty or a software system with the same name
    /// already exists.
    pub fn add_software_system(&mut self, name: &str, description: &str) -> Result<Id, ModelError> {
        let name = Self::validate_name(name)?;
        if self.software_systems().any(|system| system.name() == Some(name)) {
            return Err(ModelError::DuplicateName(name.to_string()));
        }

        let id = self.id_generator.generate();
        self.elements.insert(
            id,
            Element::SoftwareSystem(SoftwareSystem::new(id, name, description)),
        );
        debug!(id:% = id, name = name; "added software system");
        Ok(id)
    }

    /// Adds a container to the given software system.
    ///
    /// # Errors
    ///
    /// Fails if the name is empty, the parent does not resolve to a software
    /// system, or the system already has a child with the same name.
    pub fn add_container(
        &mut self,
        system: Id,
        name: &str,
        description: &str,
        technology: &str,
    ) -> Result<Id, ModelError> {
        let name = Self::validate_name(name)?;
        let parent = self
            .elements
            .get(&system)
            .ok_or(ModelError::UnknownElement(system))?;
        if parent.as_software_system().is_none() {
            return Err(ModelError::WrongElementKind {
                id: system,
                expected: "software system",
            });
        }
        if self.children_of(system).any(|child| child.name() == Some(name)) {
            return Err(ModelError::DuplicateName(name.to_string()));
        }

        let id = self.id_generator.generate();
        self.elements.insert(
            id,
            Element::Container(Container::new(id, name, description, technology)),
        );
        self.parents.insert(id, system);
        debug!(id:% = id, name = name, parent:% = system; "added container");
        Ok(id)
    }

    /// Adds a component to the given container.
    ///
    /// # Errors
    ///
    /// Fails if the name is empty, the parent does not resolve to a
    /// container, or the container already has a child with the same name.
    pub fn add_component(
        &mut self,
        container: Id,
        name: &str,
        description: &str,
        technology: &str,
    ) -> Result<Id, ModelError> {
        let name = Self::validate_name(name)?;
        let parent = self
            .elements
            .get(&container)
            .ok_or(ModelError::UnknownElement(container))?;
        if parent.as_container().is_none() {
            return Err(ModelError::WrongElementKind {
                id: container,
                expected: "container",
            });
        }
        if self
            .children_of(container)
            .any(|child| child.name() == Some(name))
        {
            return Err(ModelError::DuplicateName(name.to_string()));
        }

        let id = self.id_generator.generate();
        self.elements.insert(
            id,
            Element::Component(Component::new(id, name, description, technology)),
        );
        self.parents.insert(id, container);
        debug!(id:% = id, name = name, parent:% = container; "added component");
        Ok(id)
    }

    /// Adds a top-level deployment node.
    ///
    /// # Errors
    ///
    /// Fails if the name is empty or a top-level deployment node with the
    /// same name already exists.
    pub fn add_deployment_node(
        &mut self,
        name: &str,
        description: &str,
        technology: &str,
    ) -> Result<Id, ModelError> {
        let name = Self::validate_name(name)?;
        let duplicate = self.elements.values().any(|element| {
            matches!(element, Element::DeploymentNode(..))
                && !self.parents.contains_key(&element.id())
                && element.name() == Some(name)
        });
        if duplicate {
            return Err(ModelError::DuplicateName(name.to_string()));
        }

        let id = self.id_generator.generate();
        self.elements.insert(
            id,
            Element::DeploymentNode(DeploymentNode::new(id, name, description, technology)),
        );
        debug!(id:% = id, name = name; "added deployment node");
        Ok(id)
    }

    /// Adds a deployment node as a child of another deployment node.
    ///
    /// # Errors
    ///
    /// Fails if the name is empty, the parent does not resolve to a
    /// deployment node, or the parent already has a child with the same name.
    pub fn add_child_deployment_node(
        &mut self,
        parent: Id,
        name: &str,
        description: &str,
        technology: &str,
    ) -> Result<Id, ModelError> {
        let name = Self::validate_name(name)?;
        let parent_element = self
            .elements
            .get(&parent)
            .ok_or(ModelError::UnknownElement(parent))?;
        if parent_element.as_deployment_node().is_none() {
            return Err(ModelError::WrongElementKind {
                id: parent,
                expected: "deployment node",
            });
        }
        if self.children_of(parent).any(|child| child.name() == Some(name)) {
            return Err(ModelError::DuplicateName(name.to_string()));
        }

        let id = self.id_generator.generate();
        self.elements.insert(
            id,
            Element::DeploymentNode(DeploymentNode::new(id, name, description, technology)),
        );
        self.parents.insert(id, parent);
        if let Some(node) = self
            .elements
            .get_mut(&parent)
            .and_then(Element::as_deployment_node_mut)
        {
            node.add_child(id);
        }
        debug!(id:% = id, name = name, parent:% = parent; "added child deployment node");
        Ok(id)
    }

    /// Adds an instance of the given container to a deployment node.
    ///
    /// The instance number is one more than the number of instances of that
    /// container already deployed anywhere in the model. Relationships
    /// between the source container and other containers are replicated onto
    /// the new instance against their already-deployed instances, with the
    /// same description, technology, and interaction style.
    ///
    /// # Errors
    ///
    /// Fails if either id does not resolve, or resolves to the wrong kind of
    /// element.
    pub fn add_container_instance(&mut self, node: Id, container: Id) -> Result<Id, ModelError> {
        let node_element = self
            .elements
            .get(&node)
            .ok_or(ModelError::UnknownElement(node))?;
        if node_element.as_deployment_node().is_none() {
            return Err(ModelError::WrongElementKind {
                id: node,
                expected: "deployment node",
            });
        }
        let source = self
            .elements
            .get(&container)
            .ok_or(ModelError::UnknownElement(container))?
            .as_container()
            .ok_or(ModelError::WrongElementKind {
                id: container,
                expected: "container",
            })?
            .clone();

        let instance_number = self.container_instances_of(container).count() as u32 + 1;
        let id = self.id_generator.generate();
        self.elements.insert(
            id,
            Element::ContainerInstance(ContainerInstance::new(id, &source, instance_number)),
        );
        if let Some(node_element) = self
            .elements
            .get_mut(&node)
            .and_then(Element::as_deployment_node_mut)
        {
            node_element.add_container_instance(id);
        }

        self.replicate_relationships(id, container)?;

        debug!(
            id:% = id,
            container:% = container,
            instance_number = instance_number;
            "added container instance"
        );
        Ok(id)
    }

    /// Replicates container-to-container relationships onto a newly deployed
    /// instance, against existing instances of the counterpart containers.
    fn replicate_relationships(&mut self, instance: Id, container: Id) -> Result<(), ModelError> {
        let mut replicated: Vec<(Id, Id, String, String, InteractionStyle)> = Vec::new();
        for relationship in self.relationships.values() {
            let source = relationship.source_id();
            let destination = relationship.destination_id();

            if source == container && self.container(destination).is_some() {
                for other in self.container_instances_of(destination) {
                    replicated.push((
                        instance,
                        other.id(),
                        relationship.description().to_string(),
                        relationship.technology().to_string(),
                        relationship.interaction_style(),
                    ));
                }
            }
            if destination == container && self.container(source).is_some() {
                for other in self.container_instances_of(source) {
                    replicated.push((
                        other.id(),
                        instance,
                        relationship.description().to_string(),
                        relationship.technology().to_string(),
                        relationship.interaction_style(),
                    ));
                }
            }
        }

        for (source, destination, description, technology, style) in replicated {
            if !self.relationship_exists(source, destination, &description) {
                self.add_relationship(source, destination, &description, &technology, style)?;
            }
        }
        Ok(())
    }

    // =========================================================================
    // Relationship factory
    // =========================================================================

    /// Adds a directed relationship between two elements.
    ///
    /// This is the sole way relationships enter the model: identifier
    /// assignment and validity checks happen here.
    ///
    /// # Errors
    ///
    /// Fails if either end does not resolve to an element of this model, or
    /// if a relationship with the same source, destination, and description
    /// already exists.
    pub fn add_relationship(
        &mut self,
        source: Id,
        destination: Id,
        description: &str,
        technology: &str,
        interaction_style: InteractionStyle,
    ) -> Result<Id, ModelError> {
        if !self.elements.contains_key(&source) {
            return Err(ModelError::UnknownSource(source));
        }
        if !self.elements.contains_key(&destination) {
            return Err(ModelError::UnknownDestination(destination));
        }
        let description = description.trim();
        if self.relationship_exists(source, destination, description) {
            return Err(ModelError::DuplicateRelationship {
                source,
                destination,
            });
        }

        let id = self.id_generator.generate();
        self.relationships.insert(
            id,
            Relationship::new(
                id,
                source,
                destination,
                description,
                technology,
                interaction_style,
            ),
        );
        debug!(id:% = id, source:% = source, destination:% = destination; "added relationship");
        Ok(id)
    }

    /// Adds a synchronous relationship between two elements.
    ///
    /// Convenience wrapper around [`add_relationship`](Self::add_relationship)
    /// with the default interaction style.
    pub fn uses(
        &mut self,
        source: Id,
        destination: Id,
        description: &str,
        technology: &str,
    ) -> Result<Id, ModelError> {
        self.add_relationship(
            source,
            destination,
            description,
            technology,
            InteractionStyle::Synchronous,
        )
    }

    fn relationship_exists(&self, source: Id, destination: Id, description: &str) -> bool {
        self.relationships.values().any(|relationship| {
            relationship.source_id() == source
                && relationship.destination_id() == destination
                && relationship.description() == description
        })
    }

    // =========================================================================
    // Health checks
    // =========================================================================

    /// Adds a health check with default interval and timeout to the given
    /// container instance.
    ///
    /// # Errors
    ///
    /// Fails if the id does not resolve to a container instance, or if the
    /// health check arguments are invalid.
    pub fn add_health_check(
        &mut self,
        instance: Id,
        name: &str,
        url: &str,
    ) -> Result<HttpHealthCheck, ModelError> {
        let element = self
            .elements
            .get_mut(&instance)
            .ok_or(ModelError::UnknownElement(instance))?;
        let Some(instance_element) = element.as_container_instance_mut() else {
            return Err(ModelError::WrongElementKind {
                id: instance,
                expected: "container instance",
            });
        };
        Ok(instance_element.add_health_check(name, url)?)
    }

    // =========================================================================
    // Lookup and traversal
    // =========================================================================

    /// Returns the element with the given id, if it exists.
    pub fn element(&self, id: Id) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Returns a mutable reference to the element with the given id.
    pub fn element_mut(&mut self, id: Id) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// Returns the relationship with the given id, if it exists.
    pub fn relationship(&self, id: Id) -> Option<&Relationship> {
        self.relationships.get(&id)
    }

    /// Returns an iterator over all elements, in creation order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Returns an iterator over all relationships, in creation order.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.values()
    }

    /// Returns the total number of elements in the model.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Returns the total number of relationships in the model.
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Returns an iterator over all software systems.
    pub fn software_systems(&self) -> impl Iterator<Item = &SoftwareSystem> {
        self.elements.values().filter_map(Element::as_software_system)
    }

    /// Returns the software system with the given id, if it exists.
    pub fn software_system(&self, id: Id) -> Option<&SoftwareSystem> {
        self.elements.get(&id)?.as_software_system()
    }

    /// Returns the container with the given id, if it exists.
    pub fn container(&self, id: Id) -> Option<&Container> {
        self.elements.get(&id)?.as_container()
    }

    /// Returns the component with the given id, if it exists.
    pub fn component(&self, id: Id) -> Option<&Component> {
        self.elements.get(&id)?.as_component()
    }

    /// Returns the deployment node with the given id, if it exists.
    pub fn deployment_node(&self, id: Id) -> Option<&DeploymentNode> {
        self.elements.get(&id)?.as_deployment_node()
    }

    /// Returns the container instance with the given id, if it exists.
    pub fn container_instance(&self, id: Id) -> Option<&ContainerInstance> {
        self.elements.get(&id)?.as_container_instance()
    }

    /// Returns a mutable reference to the container instance with the given
    /// id, e.g. for attaching health checks.
    pub fn container_instance_mut(&mut self, id: Id) -> Option<&mut ContainerInstance> {
        self.elements.get_mut(&id)?.as_container_instance_mut()
    }

    /// Returns an iterator over the deployed instances of a container.
    pub fn container_instances_of(&self, container: Id) -> impl Iterator<Item = &ContainerInstance> {
        self.elements
            .values()
            .filter_map(Element::as_container_instance)
            .filter(move |instance| instance.container() == Some(container))
    }

    /// Returns the first element with the given name, if any.
    pub fn element_named(&self, name: &str) -> Option<&Element> {
        let name = name.trim();
        self.elements
            .values()
            .find(|element| element.name() == Some(name))
    }

    /// Returns the element with the given canonical name, if any.
    pub fn element_by_canonical_name(&self, canonical: &str) -> Option<&Element> {
        self.elements
            .keys()
            .copied()
            .find(|id| self.canonical_name(*id).as_deref() == Some(canonical))
            .and_then(|id| self.elements.get(&id))
    }

    /// Returns the id of the parent of the given element, if it has one.
    ///
    /// A container instance has no parent entry of its own: its parent is
    /// the parent of the container it is based upon.
    pub fn parent_of(&self, id: Id) -> Option<Id> {
        match self.elements.get(&id)? {
            Element::ContainerInstance(instance) => {
                let container = instance.container()?;
                self.parents.get(&container).copied()
            }
            _ => self.parents.get(&id).copied(),
        }
    }

    /// Returns an iterator over the direct children of the given element.
    pub fn children_of(&self, parent: Id) -> impl Iterator<Item = &Element> {
        self.parents
            .iter()
            .filter(move |(_, candidate)| **candidate == parent)
            .filter_map(|(child, _)| self.elements.get(child))
    }

    /// Returns the canonical name of the element with the given id.
    ///
    /// Canonical names are derived from the ancestor chain and never stored:
    /// `/System`, `/System/Container`, `/System/Container/Component`,
    /// `/Deployment/Node/Child` for deployment nodes, and
    /// `/System/Container[2]` for the second instance of a container. `/`
    /// characters in element names are stripped.
    ///
    /// Returns `None` for an unknown id, or for a container instance whose
    /// container reference is unresolved.
    pub fn canonical_name(&self, id: Id) -> Option<String> {
        let element = self.elements.get(&id)?;
        match element {
            Element::ContainerInstance(instance) => {
                let container = instance.container()?;
                let base = self.canonical_name(container)?;
                Some(format!("{}[{}]", base, instance.instance_id()))
            }
            Element::DeploymentNode(node) => {
                let name = format_name(node.name()?);
                match self.parents.get(&id) {
                    Some(parent) => Some(format!("{}/{}", self.canonical_name(*parent)?, name)),
                    None => Some(format!("/Deployment/{}", name)),
                }
            }
            _ => {
                let name = format_name(element.name()?);
                match self.parents.get(&id) {
                    Some(parent) => Some(format!("{}/{}", self.canonical_name(*parent)?, name)),
                    None => Some(format!("/{}", name)),
                }
            }
        }
    }

    // =========================================================================
    // Hydration
    // =========================================================================

    /// Restores derived state after deserialization.
    ///
    /// Re-seeds the id generator past the highest numeric id in the model,
    /// resolves container references on container instances from their
    /// stored id strings where possible (leaving the stored string as a
    /// fallback when not), and re-applies required tags.
    pub fn hydrate(&mut self) {
        for id in self.elements.keys() {
            self.id_generator.found(*id);
        }
        for id in self.relationships.keys() {
            self.id_generator.found(*id);
        }

        let unresolved: Vec<Id> = self
            .elements
            .values()
            .filter_map(Element::as_container_instance)
            .filter(|instance| instance.container().is_none())
            .map(|instance| instance.id())
            .collect();
        for id in unresolved {
            let resolved = self
                .elements
                .get(&id)
                .and_then(Element::as_container_instance)
                .and_then(|instance| instance.container_id())
                .map(|raw| Id::new(&raw))
                .filter(|candidate| {
                    self.elements
                        .get(candidate)
                        .is_some_and(|element| element.as_container().is_some())
                });
            if let Some(container) = resolved {
                if let Some(instance) = self
                    .elements
                    .get_mut(&id)
                    .and_then(Element::as_container_instance_mut)
                {
                    instance.set_container(container);
                }
            }
        }

        for element in self.elements.values_mut() {
            element.ensure_required_tags();
        }
        for relationship in self.relationships.values_mut() {
            relationship.ensure_required_tags();
        }

        trace!(
            elements = self.elements.len(),
            relationships = self.relationships.len();
            "hydrated model"
        );
    }
}

fn format_name(name: &str) -> String {
    name.replace('/', "")
}

#[cfg(test)]
mod tests {
    use trellis_core::tags;

    use super::*;

    fn model_with_system() -> (Model, Id) {
        let mut model = Model::new();
        let system = model
            .add_software_system("Internet Banking", "Online banking")
            .expect("add system");
        (model, system)
    }

    #[test]
    fn test_add_software_system() {
        let (model, system) = model_with_system();

        let element = model.element(system).expect("element exists");
        assert_eq!(element.name(), Some("Internet Banking"));
        assert_eq!(element.kind(), "software system");
        assert!(element.tags().contains(tags::SOFTWARE_SYSTEM));
        assert_eq!(model.parent_of(system), None);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut model = Model::new();
        assert!(matches!(
            model.add_software_system("   ", ""),
            Err(ModelError::EmptyName)
        ));
        assert_eq!(model.element_count(), 0);
    }

    #[test]
    fn test_duplicate_software_system_name_rejected() {
        let (mut model, _) = model_with_system();
        assert!(matches!(
            model.add_software_system("Internet Banking", ""),
            Err(ModelError::DuplicateName(..))
        ));
    }

    #[test]
    fn test_container_requires_software_system_parent() {
        let (mut model, system) = model_with_system();
        let container = model
            .add_container(system, "API", "", "Axum")
            .expect("add container");

        assert_eq!(model.parent_of(container), Some(system));
        assert!(matches!(
            model.add_container(container, "Nested", "", ""),
            Err(ModelError::WrongElementKind { expected: "software system", .. })
        ));
        assert!(matches!(
            model.add_container(Id::new("999"), "Orphan", "", ""),
            Err(ModelError::UnknownElement(..))
        ));
    }

    #[test]
    fn test_container_names_unique_within_system() {
        let (mut model, system) = model_with_system();
        model
            .add_container(system, "API", "", "Axum")
            .expect("add container");
        assert!(matches!(
            model.add_container(system, "API", "", "Actix"),
            Err(ModelError::DuplicateName(..))
        ));
    }

    #[test]
    fn test_ids_are_sequential() {
        let (mut model, system) = model_with_system();
        let container = model.add_container(system, "API", "", "").expect("add");
        let component = model.add_component(container, "Ledger", "", "").expect("add");

        assert_eq!(system, "1");
        assert_eq!(container, "2");
        assert_eq!(component, "3");
    }

    #[test]
    fn test_canonical_names() {
        let (mut model, system) = model_with_system();
        let container = model
            .add_container(system, "Web/Application", "", "")
            .expect("add container");
        let component = model
            .add_component(container, "Sign In Controller", "", "")
            .expect("add component");

        assert_eq!(
            model.canonical_name(system).as_deref(),
            Some("/Internet Banking")
        );
        assert_eq!(
            model.canonical_name(container).as_deref(),
            Some("/Internet Banking/WebApplication")
        );
        assert_eq!(
            model.canonical_name(component).as_deref(),
            Some("/Internet Banking/WebApplication/Sign In Controller")
        );

        let found = model
            .element_by_canonical_name("/Internet Banking/WebApplication")
            .expect("lookup by canonical name");
        assert_eq!(found.id(), container);
    }

    #[test]
    fn test_deployment_node_canonical_names() {
        let mut model = Model::new();
        let aws = model
            .add_deployment_node("AWS", "", "Amazon Web Services")
            .expect("add node");
        let host = model
            .add_child_deployment_node(aws, "EC2", "", "Ubuntu")
            .expect("add child");

        assert_eq!(model.canonical_name(aws).as_deref(), Some("/Deployment/AWS"));
        assert_eq!(
            model.canonical_name(host).as_deref(),
            Some("/Deployment/AWS/EC2")
        );
        assert_eq!(model.deployment_node(aws).expect("node").children(), &[host]);
    }

    #[test]
    fn test_container_instances_are_numbered_from_one() {
        let (mut model, system) = model_with_system();
        let container = model.add_container(system, "API", "", "").expect("add");
        let node = model.add_deployment_node("AWS", "", "").expect("add node");

        let first = model
            .add_container_instance(node, container)
            .expect("first instance");
        let second = model
            .add_container_instance(node, container)
            .expect("second instance");

        assert_eq!(model.container_instance(first).expect("first").instance_id(), 1);
        assert_eq!(model.container_instance(second).expect("second").instance_id(), 2);
        assert_eq!(
            model.canonical_name(second).as_deref(),
            Some("/Internet Banking/API[2]")
        );
        assert_eq!(
            model.deployment_node(node).expect("node").container_instances(),
            &[first, second]
        );
    }

    #[test]
    fn test_container_instance_parent_is_the_containers_parent() {
        let (mut model, system) = model_with_system();
        let container = model.add_container(system, "API", "", "").expect("add");
        let node = model.add_deployment_node("AWS", "", "").expect("add node");
        let instance = model
            .add_container_instance(node, container)
            .expect("add instance");

        assert_eq!(model.parent_of(instance), Some(system));
    }

    #[test]
    fn test_add_relationship_validates_both_ends() {
        let (mut model, system) = model_with_system();
        let other = model.add_software_system("Mainframe", "").expect("add");

        assert!(matches!(
            model.uses(Id::new("999"), other, "Uses", ""),
            Err(ModelError::UnknownSource(..))
        ));
        assert!(matches!(
            model.uses(system, Id::new("999"), "Uses", ""),
            Err(ModelError::UnknownDestination(..))
        ));
        assert_eq!(model.relationship_count(), 0);

        let relationship = model.uses(system, other, "Gets data from", "XML/HTTPS").expect("add");
        let edge = model.relationship(relationship).expect("exists");
        assert_eq!(edge.source_id(), system);
        assert_eq!(edge.destination_id(), other);
        assert_eq!(edge.interaction_style(), InteractionStyle::Synchronous);
        assert_eq!(model.relationship_count(), 1);
    }

    #[test]
    fn test_duplicate_relationship_rejected() {
        let (mut model, system) = model_with_system();
        let other = model.add_software_system("Mainframe", "").expect("add");

        model.uses(system, other, "Uses", "").expect("first");
        assert!(matches!(
            model.uses(system, other, "Uses", ""),
            Err(ModelError::DuplicateRelationship { .. })
        ));

        // A different description is a different relationship.
        model.uses(system, other, "Audits", "").expect("second");
        assert_eq!(model.relationship_count(), 2);
    }

    #[test]
    fn test_relationships_replicated_onto_instances() {
        let (mut model, system) = model_with_system();
        let web = model.add_container(system, "Web", "", "").expect("add");
        let database = model.add_container(system, "Database", "", "").expect("add");
        model
            .add_relationship(
                web,
                database,
                "Reads from and writes to",
                "JDBC",
                InteractionStyle::Asynchronous,
            )
            .expect("add relationship");

        let node = model.add_deployment_node("AWS", "", "").expect("add node");
        let web_instance = model.add_container_instance(node, web).expect("web instance");
        // No database instance deployed yet, so nothing is replicated.
        assert_eq!(model.relationship_count(), 1);

        let database_instance = model
            .add_container_instance(node, database)
            .expect("database instance");
        assert_eq!(model.relationship_count(), 2);

        let replicated = model
            .relationships()
            .find(|relationship| relationship.source_id() == web_instance)
            .expect("replicated relationship");
        assert_eq!(replicated.destination_id(), database_instance);
        assert_eq!(replicated.description(), "Reads from and writes to");
        assert_eq!(replicated.technology(), "JDBC");
        assert_eq!(
            replicated.interaction_style(),
            InteractionStyle::Asynchronous
        );
    }

    #[test]
    fn test_add_health_check_through_the_model() {
        let (mut model, system) = model_with_system();
        let container = model.add_container(system, "API", "", "").expect("add");
        let node = model.add_deployment_node("AWS", "", "").expect("add node");
        let instance = model.add_container_instance(node, container).expect("add");

        let check = model
            .add_health_check(instance, "ping", "http://example.com/health")
            .expect("add health check");
        assert_eq!(check.interval(), 60);

        assert!(matches!(
            model.add_health_check(container, "ping", "http://example.com"),
            Err(ModelError::WrongElementKind { expected: "container instance", .. })
        ));
        assert!(matches!(
            model.add_health_check(instance, "", "http://example.com"),
            Err(ModelError::HealthCheck(..))
        ));
    }

    #[test]
    fn test_element_named() {
        let (mut model, system) = model_with_system();
        let container = model.add_container(system, "API", "", "").expect("add");

        assert_eq!(model.element_named("API").expect("found").id(), container);
        assert!(model.element_named("Nope").is_none());
    }
}
