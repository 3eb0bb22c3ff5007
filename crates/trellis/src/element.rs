//! Element types for the architecture model.
//!
//! Every node in the model graph is an element: a named, identified, taggable
//! item. Rather than a base class with shared mutable state, each element
//! kind is its own struct implementing the [`ModelElement`] capability trait,
//! and the [`Element`] enum dispatches over the kinds where the model stores
//! them in one arena.
//!
//! Parent navigation and canonical names are deliberately not answered here:
//! the owning [`Model`](crate::Model) holds the parent index and derives
//! canonical names from it, so elements never embed pointers to each other.

use serde::{Deserialize, Serialize};

use trellis_core::{
    identifier::Id,
    tags::{self, TagSet},
};

use crate::deployment::{ContainerInstance, DeploymentNode};

const SOFTWARE_SYSTEM_TAGS: &[&str] = &[tags::ELEMENT, tags::SOFTWARE_SYSTEM];
const CONTAINER_TAGS: &[&str] = &[tags::ELEMENT, tags::CONTAINER];
const COMPONENT_TAGS: &[&str] = &[tags::ELEMENT, tags::COMPONENT];

/// Whether a software system is part of the enterprise being modeled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Internal,
    External,
    #[default]
    Unspecified,
}

/// Capability trait implemented once per element kind.
///
/// The minimum contract every graph node supplies: identity, an optional
/// name (deployment instances have none of their own), a description, and a
/// tag set in which the kind's required tags are always present. Removing a
/// required tag through [`remove_tag`](ModelElement::remove_tag) is a silent
/// no-op.
pub trait ModelElement {
    /// Returns the element identifier assigned by the owning model.
    fn id(&self) -> Id;

    /// Returns the name of the element, if it owns one.
    fn name(&self) -> Option<&str>;

    /// Returns the description of the element.
    fn description(&self) -> &str;

    /// Returns the immutable minimum tag set for this element kind.
    fn required_tags(&self) -> &'static [&'static str];

    /// Returns the tags of the element.
    fn tags(&self) -> &TagSet;

    /// Adds a tag to the element.
    fn add_tag(&mut self, tag: &str);

    /// Removes a tag from the element. Required tags are never removed.
    fn remove_tag(&mut self, tag: &str);
}

/// A software system: the highest level of abstraction in the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftwareSystem {
    id: Id,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    location: Location,
    #[serde(default)]
    tags: TagSet,
}

impl SoftwareSystem {
    pub(crate) fn new(id: Id, name: &str, description: &str) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            location: Location::default(),
            tags: TagSet::with_required(SOFTWARE_SYSTEM_TAGS),
        }
    }

    /// Returns the location of this software system.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Sets the location of this software system.
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    /// Sets the name of this software system.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    /// Sets the description of this software system.
    pub fn set_description(&mut self, description: &str) {
        self.description = description.trim().to_string();
    }

    pub(crate) fn ensure_required_tags(&mut self) {
        self.tags.ensure_required(SOFTWARE_SYSTEM_TAGS);
    }
}

impl ModelElement for SoftwareSystem {
    fn id(&self) -> Id {
        self.id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn required_tags(&self) -> &'static [&'static str] {
        SOFTWARE_SYSTEM_TAGS
    }

    fn tags(&self) -> &TagSet {
        &self.tags
    }

    fn add_tag(&mut self, tag: &str) {
        self.tags.add(tag);
    }

    fn remove_tag(&mut self, tag: &str) {
        if !self.required_tags().contains(&tag) {
            self.tags.remove(tag);
        }
    }
}

/// A container: something that can execute code or host data within a
/// software system (e.g. an application or a database schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    id: Id,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    technology: String,
    #[serde(default)]
    tags: TagSet,
}

impl Container {
    pub(crate) fn new(id: Id, name: &str, description: &str, technology: &str) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            technology: technology.trim().to_string(),
            tags: TagSet::with_required(CONTAINER_TAGS),
        }
    }

    /// Returns the technology of this container (e.g. "Spring Boot").
    pub fn technology(&self) -> &str {
        &self.technology
    }

    /// Sets the technology of this container.
    pub fn set_technology(&mut self, technology: &str) {
        self.technology = technology.trim().to_string();
    }

    /// Sets the name of this container.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    /// Sets the description of this container.
    pub fn set_description(&mut self, description: &str) {
        self.description = description.trim().to_string();
    }

    pub(crate) fn ensure_required_tags(&mut self) {
        self.tags.ensure_required(CONTAINER_TAGS);
    }
}

impl ModelElement for Container {
    fn id(&self) -> Id {
        self.id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn required_tags(&self) -> &'static [&'static str] {
        CONTAINER_TAGS
    }

    fn tags(&self) -> &TagSet {
        &self.tags
    }

    fn add_tag(&mut self, tag: &str) {
        self.tags.add(tag);
    }

    fn remove_tag(&mut self, tag: &str) {
        if !self.required_tags().contains(&tag) {
            self.tags.remove(tag);
        }
    }
}

/// A component: a grouping of related functionality inside a container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    id: Id,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    technology: String,
    #[serde(default)]
    tags: TagSet,
}

impl Component {
    pub(crate) fn new(id: Id, name: &str, description: &str, technology: &str) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            technology: technology.trim().to_string(),
            tags: TagSet::with_required(COMPONENT_TAGS),
        }
    }

    /// Returns the technology of this component.
    pub fn technology(&self) -> &str {
        &self.technology
    }

    /// Sets the technology of this component.
    pub fn set_technology(&mut self, technology: &str) {
        self.technology = technology.trim().to_string();
    }

    /// Sets the name of this component.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    /// Sets the description of this component.
    pub fn set_description(&mut self, description: &str) {
        self.description = description.trim().to_string();
    }

    pub(crate) fn ensure_required_tags(&mut self) {
        self.tags.ensure_required(COMPONENT_TAGS);
    }
}

impl ModelElement for Component {
    fn id(&self) -> Id {
        self.id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn required_tags(&self) -> &'static [&'static str] {
        COMPONENT_TAGS
    }

    fn tags(&self) -> &TagSet {
        &self.tags
    }

    fn add_tag(&mut self, tag: &str) {
        self.tags.add(tag);
    }

    fn remove_tag(&mut self, tag: &str) {
        if !self.required_tags().contains(&tag) {
            self.tags.remove(tag);
        }
    }
}

/// Top-level element stored in the model's arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Element {
    SoftwareSystem(SoftwareSystem),
    Container(Container),
    Component(Component),
    DeploymentNode(DeploymentNode),
    ContainerInstance(ContainerInstance),
}

impl Element {
    /// Returns the element identifier.
    pub fn id(&self) -> Id {
        match self {
            Element::SoftwareSystem(system) => system.id(),
            Element::Container(container) => container.id(),
            Element::Component(component) => component.id(),
            Element::DeploymentNode(node) => node.id(),
            Element::ContainerInstance(instance) => instance.id(),
        }
    }

    /// Returns the name of the element, if it owns one.
    ///
    /// Container instances return `None`: their display name is resolved
    /// externally from the container they are based upon.
    pub fn name(&self) -> Option<&str> {
        match self {
            Element::SoftwareSystem(system) => system.name(),
            Element::Container(container) => container.name(),
            Element::Component(component) => component.name(),
            Element::DeploymentNode(node) => node.name(),
            Element::ContainerInstance(instance) => instance.name(),
        }
    }

    /// Returns the description of the element.
    pub fn description(&self) -> &str {
        match self {
            Element::SoftwareSystem(system) => system.description(),
            Element::Container(container) => container.description(),
            Element::Component(component) => component.description(),
            Element::DeploymentNode(node) => node.description(),
            Element::ContainerInstance(instance) => instance.description(),
        }
    }

    /// Returns the tags of the element.
    pub fn tags(&self) -> &TagSet {
        match self {
            Element::SoftwareSystem(system) => system.tags(),
            Element::Container(container) => container.tags(),
            Element::Component(component) => component.tags(),
            Element::DeploymentNode(node) => node.tags(),
            Element::ContainerInstance(instance) => instance.tags(),
        }
    }

    /// Adds a tag to the element.
    pub fn add_tag(&mut self, tag: &str) {
        match self {
            Element::SoftwareSystem(system) => system.add_tag(tag),
            Element::Container(container) => container.add_tag(tag),
            Element::Component(component) => component.add_tag(tag),
            Element::DeploymentNode(node) => node.add_tag(tag),
            Element::ContainerInstance(instance) => instance.add_tag(tag),
        }
    }

    /// Removes a tag from the element, subject to each kind's contract.
    pub fn remove_tag(&mut self, tag: &str) {
        match self {
            Element::SoftwareSystem(system) => system.remove_tag(tag),
            Element::Container(container) => container.remove_tag(tag),
            Element::Component(component) => component.remove_tag(tag),
            Element::DeploymentNode(node) => node.remove_tag(tag),
            Element::ContainerInstance(instance) => instance.remove_tag(tag),
        }
    }

    /// Returns a human-readable kind name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::SoftwareSystem(..) => "software system",
            Element::Container(..) => "container",
            Element::Component(..) => "component",
            Element::DeploymentNode(..) => "deployment node",
            Element::ContainerInstance(..) => "container instance",
        }
    }

    pub(crate) fn ensure_required_tags(&mut self) {
        match self {
            Element::SoftwareSystem(system) => system.ensure_required_tags(),
            Element::Container(container) => container.ensure_required_tags(),
            Element::Component(component) => component.ensure_required_tags(),
            Element::DeploymentNode(node) => node.ensure_required_tags(),
            Element::ContainerInstance(..) => {}
        }
    }

    /// Returns the element as a software system, if it is one.
    pub fn as_software_system(&self) -> Option<&SoftwareSystem> {
        match self {
            Element::SoftwareSystem(system) => Some(system),
            _ => None,
        }
    }

    /// Returns the element as a container, if it is one.
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Element::Container(container) => Some(container),
            _ => None,
        }
    }

    /// Returns the element as a component, if it is one.
    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Element::Component(component) => Some(component),
            _ => None,
        }
    }

    /// Returns the element as a deployment node, if it is one.
    pub fn as_deployment_node(&self) -> Option<&DeploymentNode> {
        match self {
            Element::DeploymentNode(node) => Some(node),
            _ => None,
        }
    }

    pub(crate) fn as_deployment_node_mut(&mut self) -> Option<&mut DeploymentNode> {
        match self {
            Element::DeploymentNode(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the element as a container instance, if it is one.
    pub fn as_container_instance(&self) -> Option<&ContainerInstance> {
        match self {
            Element::ContainerInstance(instance) => Some(instance),
            _ => None,
        }
    }

    pub(crate) fn as_container_instance_mut(&mut self) -> Option<&mut ContainerInstance> {
        match self {
            Element::ContainerInstance(instance) => Some(instance),
            _ => None,
        }
    }
}
