use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIResource, APIResourceList};
use serde::{Deserialize, Serialize};

use super::snapshot::split_api_version;

/// One resource kind registered under an API group/version.
///
/// This describes the kind itself (`daemonsets`, `DaemonSet`, ...), not an instance of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiResourceDescriptor {
    pub name: String,
    pub singular_name: String,
    pub namespaced: bool,
    pub group: String,
    pub version: String,
    pub kind: String,
    pub short_names: Vec<String>,
    pub categories: Vec<String>,
}

impl ApiResourceDescriptor {
    /// Build from a discovery entry. Discovery usually leaves `group`/`version`
    /// empty on each entry; they are filled from the list's group version.
    pub fn from_api_resource(resource: &APIResource, group_version: &str) -> Self {
        let (group, version) = split_api_version(group_version);
        Self {
            name: resource.name.clone(),
            singular_name: resource.singular_name.clone(),
            namespaced: resource.namespaced,
            group: resource
                .group
                .clone()
                .filter(|g| !g.is_empty())
                .unwrap_or_else(|| group.to_string()),
            version: resource
                .version
                .clone()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| version.to_string()),
            kind: resource.kind.clone(),
            short_names: resource.short_names.clone().unwrap_or_default(),
            categories: resource.categories.clone().unwrap_or_default(),
        }
    }

    /// Fill empty `group`/`version` from the queried api version.
    pub(crate) fn with_group_version(mut self, group_version: &str) -> Self {
        let (group, version) = split_api_version(group_version);
        if self.group.is_empty() {
            self.group = group.to_string();
        }
        if self.version.is_empty() {
            self.version = version.to_string();
        }
        self
    }
}

/// Convert a full discovery response, keeping server order.
///
/// Subresources (`pods/log`, `deployments/scale`) are listed by discovery too, but they
/// are not resource kinds of their own and are skipped.
pub fn descriptors_from_list(list: &APIResourceList) -> Vec<ApiResourceDescriptor> {
    list.resources
        .iter()
        .filter(|r| !r.name.contains('/'))
        .map(|r| ApiResourceDescriptor::from_api_resource(r, &list.group_version))
        .collect()
}
