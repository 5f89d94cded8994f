//! Queryable resources handed to assertions.

pub mod api_resources;
pub mod k8s_object;
pub mod table;

pub use api_resources::{ApiResourcesQuery, K8sApiResources};
pub use k8s_object::K8sObject;
pub use table::{ApiResourceTable, CellValue, Column};
