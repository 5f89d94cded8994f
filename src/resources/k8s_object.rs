use std::collections::BTreeMap;
use std::fmt;

use crate::error::{catch_client_errors, ClientError};
use crate::k8s::client::ClusterClient;
use crate::k8s::snapshot::{ObjectSnapshot, ResourceHandle, SnapshotMetadata};

/// A single Kubernetes object, fetched once at construction.
///
/// If the fetch fails in a known way (not found, API or transport error, malformed
/// payload) the object simply does not exist: every accessor returns `None`, `false`
/// or nothing, for the lifetime of the value.
#[derive(Debug, Clone)]
pub struct K8sObject {
    handle: ResourceHandle,
    snapshot: Option<ObjectSnapshot>,
}

impl K8sObject {
    /// Fetch the object named by `handle`.
    ///
    /// Only unrecoverable client errors are returned.
    pub fn new<C>(client: &C, handle: ResourceHandle) -> Result<Self, ClientError>
    where
        C: ClusterClient + ?Sized,
    {
        let snapshot =
            catch_client_errors(|| client.get(&handle).and_then(ObjectSnapshot::from_value))?;
        if snapshot.is_none() {
            tracing::debug!(resource = %handle, resource_type = handle.resource_type(), "no object");
        }
        Ok(Self { handle, snapshot })
    }

    pub fn handle(&self) -> &ResourceHandle {
        &self.handle
    }

    pub fn api_version(&self) -> &str {
        self.handle.api_version()
    }

    pub fn resource_type(&self) -> &str {
        self.handle.resource_type()
    }

    /// The full fetched object, if any.
    pub fn snapshot(&self) -> Option<&ObjectSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn exists(&self) -> bool {
        self.snapshot.is_some()
    }

    fn metadata(&self) -> Option<&SnapshotMetadata> {
        self.snapshot.as_ref()?.metadata.as_ref()
    }

    /// `metadata.name`, or a top-level `name` for objects that carry it there.
    pub fn name(&self) -> Option<&str> {
        let snapshot = self.snapshot.as_ref()?;
        snapshot
            .metadata
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .or_else(|| snapshot.extra.get("name")?.as_str())
    }

    pub fn kind(&self) -> Option<&str> {
        self.snapshot.as_ref()?.kind.as_deref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata()?.namespace.as_deref()
    }

    pub fn uid(&self) -> Option<&str> {
        self.metadata()?.uid.as_deref()
    }

    pub fn resource_version(&self) -> Option<&str> {
        self.metadata()?.resource_version.as_deref()
    }

    pub fn labels(&self) -> Option<&BTreeMap<String, String>> {
        self.metadata()?.labels.as_ref()
    }

    pub fn annotations(&self) -> Option<&BTreeMap<String, String>> {
        self.metadata()?.annotations.as_ref()
    }

    /// `spec.containers[*].name`. `None` when the object has no container list at all,
    /// which is distinct from an empty list.
    ///
    /// Containers without a name are skipped, so the result can be shorter than the
    /// container list and is not index-aligned with `container_images`.
    pub fn container_names(&self) -> Option<Vec<&str>> {
        let containers = self.snapshot.as_ref()?.containers()?;
        Some(containers.iter().filter_map(|c| c.name.as_deref()).collect())
    }

    /// `spec.containers[*].image`, with the same `None` and skipping rules as
    /// `container_names`.
    pub fn container_images(&self) -> Option<Vec<&str>> {
        let containers = self.snapshot.as_ref()?.containers()?;
        Some(containers.iter().filter_map(|c| c.image.as_deref()).collect())
    }

    /// True iff some container image ends in `:latest`. Always resolves.
    pub fn has_latest_tag(&self) -> bool {
        self.container_images()
            .is_some_and(|images| images.iter().any(|i| i.ends_with(":latest")))
    }

    pub fn has_label(&self, key: &str) -> bool {
        self.labels().is_some_and(|labels| labels.contains_key(key))
    }

    /// `Some(true)` iff `status.phase` is exactly `Running`; `None` when there is no phase.
    pub fn is_running(&self) -> Option<bool> {
        let phase = self.snapshot.as_ref()?.status.as_ref()?.phase.as_deref()?;
        Some(phase == "Running")
    }

    /// Whether the fetched object has the given top-level key.
    pub fn has_field(&self, key: &str) -> bool {
        self.snapshot.as_ref().is_some_and(|s| s.has_field(key))
    }
}

/// `namespace/name` when a namespace was requested, otherwise `name`.
impl fmt::Display for K8sObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.handle, f)
    }
}
