//! Cluster access: the client seam, response types, and the in-memory test transport.

pub mod client;
pub mod discovery;
pub mod mock;
pub mod snapshot;

pub use client::{ClusterClient, KubeClusterClient};
pub use discovery::ApiResourceDescriptor;
pub use snapshot::{ObjectSnapshot, ResourceHandle};
