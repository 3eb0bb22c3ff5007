//! Deployment overlay: runtime nodes and container instances.
//!
//! The deployment overlay is a parallel structure describing where the static
//! model runs: a hierarchy of [`DeploymentNode`]s (e.g. "AWS", "EC2 instance")
//! hosting [`ContainerInstance`]s, each representing one running copy of a
//! container. Instances proxy identity from their source container rather
//! than owning it: they have no name of their own, their tags mirror the
//! container's, and their deployment-specific state is limited to health
//! checks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use trellis_core::{
    healthcheck::{self, HealthCheckError, HttpHealthCheck},
    identifier::Id,
    tags::{self, TagSet},
};

use crate::element::{Container, ModelElement};

const DEPLOYMENT_NODE_TAGS: &[&str] = &[tags::ELEMENT, tags::DEPLOYMENT_NODE];

// A container instance has no required tags of its own: its tag set is
// copied from the source container at creation and then frozen against
// removal.
const CONTAINER_INSTANCE_TAGS: &[&str] = &[];

/// A deployment node: a physical or virtual location where containers run.
///
/// Nodes form a hierarchy (a data center contains hosts, a host contains a
/// runtime) and host container instances at any level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentNode {
    id: Id,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    technology: String,
    #[serde(default = "default_instances")]
    instances: u32,
    #[serde(default)]
    children: Vec<Id>,
    #[serde(default)]
    container_instances: Vec<Id>,
    #[serde(default)]
    tags: TagSet,
}

fn default_instances() -> u32 {
    1
}

impl DeploymentNode {
    pub(crate) fn new(id: Id, name: &str, description: &str, technology: &str) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            technology: technology.trim().to_string(),
            instances: 1,
            children: Vec::new(),
            container_instances: Vec::new(),
            tags: TagSet::with_required(DEPLOYMENT_NODE_TAGS),
        }
    }

    /// Returns the technology of this deployment node (e.g. "Docker").
    pub fn technology(&self) -> &str {
        &self.technology
    }

    /// Returns the number of instances of this node.
    pub fn instances(&self) -> u32 {
        self.instances
    }

    /// Sets the number of instances of this node.
    pub fn set_instances(&mut self, instances: u32) {
        self.instances = instances;
    }

    /// Returns the ids of child deployment nodes, in creation order.
    pub fn children(&self) -> &[Id] {
        &self.children
    }

    /// Returns the ids of container instances hosted on this node.
    pub fn container_instances(&self) -> &[Id] {
        &self.container_instances
    }

    pub(crate) fn add_child(&mut self, child: Id) {
        self.children.push(child);
    }

    pub(crate) fn add_container_instance(&mut self, instance: Id) {
        self.container_instances.push(instance);
    }

    pub(crate) fn ensure_required_tags(&mut self) {
        self.tags.ensure_required(DEPLOYMENT_NODE_TAGS);
    }
}

impl ModelElement for DeploymentNode {
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
        DEPLOYMENT_NODE_TAGS
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

/// A deployment instance of a container: "container X runs here as copy N".
///
/// The instance holds the source container as a resolved id where possible,
/// plus the raw id string for the partially deserialized case where the
/// container has not been loaded yet. The resolved reference never reaches
/// the wire form; only the string does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerInstance {
    id: Id,
    #[serde(skip)]
    container: Option<Id>,
    container_id: Option<String>,
    instance_id: u32,
    #[serde(default)]
    tags: TagSet,
    #[serde(default)]
    health_checks: HashSet<HttpHealthCheck>,
}

impl ContainerInstance {
    pub(crate) fn new(id: Id, container: &Container, instance_id: u32) -> Self {
        let mut tag_set = TagSet::new();
        tag_set.extend(container.tags().iter().map(str::to_string));
        tag_set.add(tags::CONTAINER_INSTANCE);
        Self {
            id,
            container: Some(container.id()),
            container_id: Some(container.id().to_string()),
            instance_id,
            tags: tag_set,
            health_checks: HashSet::new(),
        }
    }

    /// Returns the resolved source container reference, if it is resolved.
    pub fn container(&self) -> Option<Id> {
        self.container
    }

    pub(crate) fn set_container(&mut self, container: Id) {
        self.container = Some(container);
    }

    #[cfg(test)]
    pub(crate) fn set_container_id(&mut self, container_id: &str) {
        self.container = None;
        self.container_id = Some(container_id.to_string());
    }

    /// Returns the id of the container this instance is based upon.
    ///
    /// Prefers the resolved container reference; falls back to the id string
    /// stored at deserialization time when the container is not resolvable.
    pub fn container_id(&self) -> Option<String> {
        match self.container {
            Some(container) => Some(container.to_string()),
            None => self.container_id.clone(),
        }
    }

    /// Returns the instance number of this container instance, starting at 1.
    pub fn instance_id(&self) -> u32 {
        self.instance_id
    }

    /// No-op: the name of a container instance is taken from the associated
    /// container.
    pub fn set_name(&mut self, _name: &str) {}

    /// Adds a health check with the default interval (60 seconds) and
    /// timeout (0 milliseconds).
    ///
    /// # Errors
    ///
    /// Returns a [`HealthCheckError`] naming the violated constraint.
    pub fn add_health_check(
        &mut self,
        name: &str,
        url: &str,
    ) -> Result<HttpHealthCheck, HealthCheckError> {
        self.add_health_check_with(
            name,
            url,
            healthcheck::DEFAULT_INTERVAL_SECONDS,
            healthcheck::DEFAULT_TIMEOUT_MILLIS,
        )
    }

    /// Adds a health check with an explicit polling interval (seconds) and
    /// timeout (milliseconds).
    ///
    /// # Errors
    ///
    /// Returns a [`HealthCheckError`] naming the violated constraint.
    pub fn add_health_check_with(
        &mut self,
        name: &str,
        url: &str,
        interval: i32,
        timeout: i64,
    ) -> Result<HttpHealthCheck, HealthCheckError> {
        let health_check = HttpHealthCheck::new(name, url, interval, timeout)?;
        self.health_checks.insert(health_check.clone());
        Ok(health_check)
    }

    /// Returns a copy of the health checks associated with this instance.
    ///
    /// Mutating the returned set does not affect the instance.
    pub fn health_checks(&self) -> HashSet<HttpHealthCheck> {
        self.health_checks.clone()
    }
}

impl ModelElement for ContainerInstance {
    fn id(&self) -> Id {
        self.id
    }

    /// Always `None`: the display name of a container instance is resolved
    /// externally from the container it is based upon.
    fn name(&self) -> Option<&str> {
        None
    }

    fn description(&self) -> &str {
        ""
    }

    fn required_tags(&self) -> &'static [&'static str] {
        CONTAINER_INSTANCE_TAGS
    }

    fn tags(&self) -> &TagSet {
        &self.tags
    }

    fn add_tag(&mut self, tag: &str) {
        self.tags.add(tag);
    }

    /// No-op: tags cannot be removed from container instances. They reflect
    /// the container the instance is based upon.
    fn remove_tag(&mut self, _tag: &str) {}
}
