use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// API version used when a query does not name one.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Connection settings, read from `<config_dir>/kubecheck/config.toml`.
///
/// ```toml
/// context = "staging"
/// kubeconfig = "/etc/kube/config"
/// api_version = "v1"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Kubeconfig context to use. `None` means the current context.
    pub context: Option<String>,
    /// Explicit kubeconfig path. `None` means `$KUBECONFIG` or `~/.kube/config`.
    pub kubeconfig: Option<PathBuf>,
    /// Api version picked up by `ResourceHandle::from_settings` and
    /// `ApiResourcesQuery::from_settings`.
    pub api_version: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            context: None,
            kubeconfig: None,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl Settings {
    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("kubecheck").join("config.toml"))
    }

    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let settings: Self = toml::from_str(raw).context("Failed to parse settings")?;
        if settings.api_version.trim().is_empty() {
            anyhow::bail!("api_version must not be empty");
        }
        Ok(settings)
    }

    /// Apply `KUBECHECK_CONTEXT` and `KUBECHECK_KUBECONFIG` on top of the file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var("KUBECHECK_CONTEXT").ok(),
            std::env::var_os("KUBECHECK_KUBECONFIG").map(PathBuf::from),
        )
    }

    /// Non-empty overrides replace the corresponding setting.
    pub fn with_overrides(mut self, context: Option<String>, kubeconfig: Option<PathBuf>) -> Self {
        if let Some(ctx) = context.filter(|c| !c.trim().is_empty()) {
            self.context = Some(ctx.trim().to_string());
        }
        if let Some(path) = kubeconfig.filter(|p| !p.as_os_str().is_empty()) {
            self.kubeconfig = Some(path);
        }
        self
    }
}
