//! In-memory `ClusterClient` that replays canned response trees.
//!
//! Object stubs are addressed as `{apiVersion}.{namespace}.{resourceType}`:
//!
//! ```
//! use kubecheck::k8s::mock::MockTransport;
//! use serde_json::json;
//!
//! let transport = MockTransport::new(json!({
//!     "v1": { "default": { "pods": [ { "name": "pod1", "kind": "Pod" } ] } }
//! }));
//! # let _ = transport;
//! ```
//!
//! Cluster-scoped lookups read the `default` namespace bucket.

use serde_json::Value;
use std::collections::BTreeMap;

use super::client::ClusterClient;
use super::discovery::ApiResourceDescriptor;
use super::snapshot::ResourceHandle;
use crate::error::ClientError;

/// Bucket used when a handle has no namespace.
pub const DEFAULT_NAMESPACE: &str = "default";

type FailureFn = Box<dyn Fn() -> ClientError>;

pub struct MockTransport {
    stub_data: Value,
    api_resources: BTreeMap<String, Value>,
    raise_errors: bool,
    failure: Option<FailureFn>,
}

impl MockTransport {
    pub fn new(stub_data: Value) -> Self {
        Self {
            stub_data,
            api_resources: BTreeMap::new(),
            raise_errors: true,
            failure: None,
        }
    }

    /// When true (the default), a `get` without a name fails with the fatal
    /// `InvalidRequest`; when false it is reported as not found.
    pub fn raise_errors(mut self, raise: bool) -> Self {
        self.raise_errors = raise;
        self
    }

    /// Register the discovery response for `api_version`: a JSON array of descriptors.
    pub fn with_api_resources(mut self, api_version: impl Into<String>, resources: Value) -> Self {
        self.api_resources.insert(api_version.into(), resources);
        self
    }

    /// Make every call fail with the error produced by `failure`.
    pub fn fail_with(mut self, failure: impl Fn() -> ClientError + 'static) -> Self {
        self.failure = Some(Box::new(failure));
        self
    }

    fn check_failure(&self) -> Result<(), ClientError> {
        match &self.failure {
            Some(failure) => Err(failure()),
            None => Ok(()),
        }
    }

    fn current_data(&self, handle: &ResourceHandle) -> &[Value] {
        let namespace = handle.namespace().unwrap_or(DEFAULT_NAMESPACE);
        self.stub_data
            .get(handle.api_version())
            .and_then(|v| v.get(namespace))
            .and_then(|v| v.get(handle.resource_type()))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

// Stubs carry a top-level `name`; real objects only have `metadata.name`.
fn object_name(item: &Value) -> Option<&str> {
    item.get("name")
        .or_else(|| item.get("metadata").and_then(|m| m.get("name")))
        .and_then(Value::as_str)
}

impl ClusterClient for MockTransport {
    fn get(&self, handle: &ResourceHandle) -> Result<Value, ClientError> {
        self.check_failure()?;
        let Some(name) = handle.name() else {
            return Err(if self.raise_errors {
                ClientError::InvalidRequest(format!(
                    "a name is required to get {}",
                    handle.resource_type()
                ))
            } else {
                ClientError::NotFound(handle.resource_type().to_string())
            });
        };

        self.current_data(handle)
            .iter()
            .find(|item| object_name(item) == Some(name))
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("{} {handle}", handle.resource_type())))
    }

    fn api_resources(&self, api_version: &str) -> Result<Vec<ApiResourceDescriptor>, ClientError> {
        self.check_failure()?;
        let raw = self
            .api_resources
            .get(api_version)
            .ok_or_else(|| ClientError::NotFound(format!("API group version {api_version}")))?;
        let descriptors: Vec<ApiResourceDescriptor> = serde_json::from_value(raw.clone())?;
        Ok(descriptors
            .into_iter()
            .map(|d| d.with_group_version(api_version))
            .collect())
    }
}
