use anyhow::{Context, Result};
use kube::{
    api::{Api, ApiResource, DynamicObject, GroupVersionKind},
    config::{KubeConfigOptions, Kubeconfig},
    Client,
};
use serde_json::Value;
use std::path::Path;
use tokio::runtime::{Builder, Runtime};

use super::discovery::{descriptors_from_list, ApiResourceDescriptor};
use super::snapshot::{split_api_version, ResourceHandle};
use crate::config::Settings;
use crate::error::ClientError;

/// The two reads adapters need from a cluster.
///
/// Adapters borrow a client for the duration of their constructor only; the
/// caller owns it and may share it across any number of adapters.
pub trait ClusterClient {
    /// Fetch one object. Scoped to the handle's namespace when it has one,
    /// cluster-scoped otherwise.
    fn get(&self, handle: &ResourceHandle) -> Result<Value, ClientError>;

    /// Discovery: the resource kinds registered under `api_version`.
    fn api_resources(&self, api_version: &str) -> Result<Vec<ApiResourceDescriptor>, ClientError>;
}

/// `ClusterClient` backed by a live API server.
///
/// Calls block the current thread until the request completes, so this must not
/// be driven from inside another async runtime.
pub struct KubeClusterClient {
    client: Client,
    runtime: Runtime,
    context: String,
}

impl KubeClusterClient {
    /// Connect using the kubeconfig path and context from `settings`.
    pub fn connect(settings: &Settings) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start runtime for Kubernetes client")?;
        let client = runtime.block_on(build_client_for_context(
            settings.context.as_deref(),
            settings.kubeconfig.as_deref(),
        ))?;
        let context = settings.context.clone().unwrap_or_else(current_context);
        tracing::debug!(context = %context, "connected to cluster");
        Ok(Self {
            client,
            runtime,
            context,
        })
    }

    /// Wrap an existing client. The client must have been built on `runtime`.
    pub fn new(client: Client, runtime: Runtime) -> Self {
        Self {
            client,
            runtime,
            context: current_context(),
        }
    }

    /// Kubeconfig context this client talks to.
    pub fn context(&self) -> &str {
        &self.context
    }

    fn dynamic_api(&self, handle: &ResourceHandle) -> Api<DynamicObject> {
        let (group, version) = split_api_version(handle.api_version());
        // Kind is not part of the request path; the plural resource type is.
        let gvk = GroupVersionKind::gvk(group, version, "");
        let resource = ApiResource::from_gvk_with_plural(&gvk, handle.resource_type());
        match handle.namespace() {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &resource),
            None => Api::all_with(self.client.clone(), &resource),
        }
    }
}

impl ClusterClient for KubeClusterClient {
    fn get(&self, handle: &ResourceHandle) -> Result<Value, ClientError> {
        let name = handle.name().ok_or_else(|| {
            ClientError::InvalidRequest(format!(
                "a name is required to get {} {}",
                handle.api_version(),
                handle.resource_type()
            ))
        })?;
        tracing::debug!(
            api_version = handle.api_version(),
            resource_type = handle.resource_type(),
            namespace = handle.namespace(),
            name,
            "fetching object"
        );
        let api = self.dynamic_api(handle);
        let object = self.runtime.block_on(api.get(name))?;
        Ok(serde_json::to_value(object)?)
    }

    fn api_resources(&self, api_version: &str) -> Result<Vec<ApiResourceDescriptor>, ClientError> {
        tracing::debug!(api_version, "fetching API resources");
        let list = self.runtime.block_on(async {
            match split_api_version(api_version) {
                ("", version) => self.client.list_core_api_resources(version).await,
                _ => self.client.list_api_group_resources(api_version).await,
            }
        })?;
        Ok(descriptors_from_list(&list))
    }
}

/// Build a kube::Client for an optional kubeconfig context and path.
/// With neither given, the config is inferred (kubeconfig or in-cluster).
pub async fn build_client_for_context(
    context_name: Option<&str>,
    kubeconfig_path: Option<&Path>,
) -> Result<Client> {
    let options = KubeConfigOptions {
        context: context_name.map(str::to_string),
        ..Default::default()
    };
    let label = context_name.unwrap_or("current");

    let config = match kubeconfig_path {
        Some(path) => {
            let kubeconfig = Kubeconfig::read_from(path)
                .with_context(|| format!("Failed to read kubeconfig '{}'", path.display()))?;
            kube::Config::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .with_context(|| format!("Failed to load kubeconfig context '{label}'"))?
        }
        None if context_name.is_some() => kube::Config::from_kubeconfig(&options)
            .await
            .with_context(|| format!("Failed to load kubeconfig context '{label}'"))?,
        None => kube::Config::infer()
            .await
            .context("Failed to infer Kubernetes configuration")?,
    };

    Client::try_from(config).context("Failed to build Kubernetes client")
}

/// Return the current context name from kubeconfig (for log lines and display).
pub fn current_context() -> String {
    Kubeconfig::read()
        .ok()
        .and_then(|cfg| cfg.current_context)
        .unwrap_or_else(|| "unknown".to_string())
}
