//! kubecheck — Kubernetes objects and API discovery as queryable test resources.
//!
//! Each resource performs exactly one read through a caller-owned [`ClusterClient`]
//! when it is constructed and never refreshes. Known client failures leave the
//! resource empty instead of failing the assertion run.
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,   // accessors; callers are assertion helpers
    clippy::missing_errors_doc,   // the only error is an unrecoverable ClientError
)]

pub mod config;
pub mod error;
pub mod k8s;
pub mod resources;

pub use config::{Settings, DEFAULT_API_VERSION};
pub use error::{catch_client_errors, ClientError};
pub use k8s::{
    ApiResourceDescriptor, ClusterClient, KubeClusterClient, ObjectSnapshot, ResourceHandle,
};
pub use resources::{
    ApiResourceTable, ApiResourcesQuery, CellValue, Column, K8sApiResources, K8sObject,
};
