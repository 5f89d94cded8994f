use serde::{de, de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::config::{Settings, DEFAULT_API_VERSION};
use crate::error::ClientError;

/// Identifies one Kubernetes object: api version, plural resource type,
/// optional namespace (absent for cluster-scoped kinds) and optional name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    api_version: String,
    resource_type: String,
    namespace: Option<String>,
    name: Option<String>,
}

impl ResourceHandle {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            resource_type: resource_type.into(),
            namespace: None,
            name: None,
        }
    }

    /// A handle under the configured default api version.
    pub fn from_settings(resource_type: impl Into<String>, settings: &Settings) -> Self {
        Self::new(resource_type).with_api_version(settings.api_version.clone())
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// `namespace/name` for namespaced handles, `name` alone otherwise.
impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or_default();
        match &self.namespace {
            Some(ns) => write!(f, "{ns}/{name}"),
            None => f.write_str(name),
        }
    }
}

/// Split `group/version` into its parts. The core group has no slash: `v1` → `("", "v1")`.
pub fn split_api_version(api_version: &str) -> (&str, &str) {
    api_version.split_once('/').unwrap_or(("", api_version))
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Point-in-time view of one fetched object.
///
/// Every level is optional so that accessors are plain projections; a field that
/// does not apply to the object's kind is simply `None`. Outside `metadata`, a field
/// whose shape does not match (a CRD with a numeric `status.phase`, say) also reads
/// as `None` instead of rejecting the whole object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSnapshot {
    #[serde(default, deserialize_with = "lenient")]
    pub api_version: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    pub metadata: Option<SnapshotMetadata>,
    #[serde(default, deserialize_with = "lenient")]
    pub spec: Option<SnapshotSpec>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<SnapshotStatus>,
    /// Remaining top-level fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    top_level_keys: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub uid: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub resource_version: Option<String>,
    #[serde(default, deserialize_with = "string_map")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(default, deserialize_with = "string_map")]
    pub annotations: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SnapshotSpec {
    #[serde(default, deserialize_with = "lenient")]
    pub containers: Option<Vec<ContainerSnapshot>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContainerSnapshot {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SnapshotStatus {
    #[serde(default, deserialize_with = "lenient")]
    pub phase: Option<String>,
}

impl ObjectSnapshot {
    /// Convert a raw response tree.
    ///
    /// Only a non-object tree or unreadable `metadata` is `ClientError::Malformed`.
    pub fn from_value(value: Value) -> Result<Self, ClientError> {
        let top_level_keys = value
            .as_object()
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default();
        let mut snapshot: Self = serde_json::from_value(value)?;
        snapshot.top_level_keys = top_level_keys;
        Ok(snapshot)
    }

    /// Whether the object carries the given top-level key, whatever its shape.
    pub fn has_field(&self, key: &str) -> bool {
        self.top_level_keys.contains(key)
    }

    pub fn containers(&self) -> Option<&[ContainerSnapshot]> {
        self.spec.as_ref()?.containers.as_deref()
    }
}

// A value of the wrong shape reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

// resourceVersion is a string on the wire, but hand-written fixtures often use numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| match s {
        Scalar::Text(t) => t,
        Scalar::Number(n) => n.to_string(),
    }))
}

// Labels and annotations: a string map, or an empty sequence meaning "none".
// Entries with a null value are dropped.
fn string_map<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Map(BTreeMap<String, Option<String>>),
        Seq(Vec<Value>),
    }

    match Option::<Repr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Repr::Map(map)) => Ok(Some(
            map.into_iter()
                .filter_map(|(k, v)| v.map(|v| (k, v)))
                .collect(),
        )),
        Some(Repr::Seq(items)) if items.is_empty() => Ok(Some(BTreeMap::new())),
        Some(Repr::Seq(_)) => Err(de::Error::custom(
            "expected a map of strings or an empty sequence",
        )),
    }
}
