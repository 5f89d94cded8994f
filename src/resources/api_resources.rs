use crate::config::{Settings, DEFAULT_API_VERSION};
use crate::error::{catch_client_errors, ClientError};
use crate::k8s::client::ClusterClient;

use super::table::ApiResourceTable;

/// Parameters for an API resource listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResourcesQuery {
    pub api_version: String,
    /// Accepted and kept, but not applied: discovery has no label selection.
    pub label_selector: Option<String>,
}

impl Default for ApiResourcesQuery {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            label_selector: None,
        }
    }
}

impl ApiResourcesQuery {
    pub fn new(api_version: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            ..Default::default()
        }
    }

    /// Query the configured default api version.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_version.clone())
    }

    pub fn with_label_selector(mut self, selector: impl Into<String>) -> Self {
        self.label_selector = Some(selector.into());
        self
    }
}

/// The resource kinds registered under one API group/version, as a table.
#[derive(Debug, Clone)]
pub struct K8sApiResources {
    query: ApiResourcesQuery,
    table: ApiResourceTable,
}

impl K8sApiResources {
    /// Run one discovery fetch. A known failure yields an empty table;
    /// only unrecoverable client errors are returned.
    pub fn new<C>(client: &C, query: ApiResourcesQuery) -> Result<Self, ClientError>
    where
        C: ClusterClient + ?Sized,
    {
        if let Some(selector) = &query.label_selector {
            tracing::debug!(selector = %selector, "label selector is not applied to API discovery");
        }
        let rows = catch_client_errors(|| client.api_resources(&query.api_version))?
            .unwrap_or_default();
        if rows.is_empty() {
            tracing::debug!(api_version = %query.api_version, "no API resources");
        }
        Ok(Self {
            query,
            table: ApiResourceTable::new(rows),
        })
    }

    pub fn api_version(&self) -> &str {
        &self.query.api_version
    }

    pub fn label_selector(&self) -> Option<&str> {
        self.query.label_selector.as_deref()
    }

    pub fn table(&self) -> &ApiResourceTable {
        &self.table
    }

    pub fn exists(&self) -> bool {
        self.table.exists()
    }
}
