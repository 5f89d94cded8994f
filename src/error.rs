//! Client error classification and the normalization rule shared by every adapter.
//!
//! Known failure modes (not found, API status, transport, malformed payload) are
//! downgraded to "no data" so assertions observe them through `exists()` and empty
//! results. Anything else propagates and aborts adapter construction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("API error {code}: {message}")]
    Api { code: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("client configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether this error belongs to the known set that is normalized to "no data".
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Api { .. } | Self::Transport(_) | Self::Malformed(_)
        )
    }
}

impl From<kube::Error> for ClientError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(resp) if resp.code == 404 => Self::NotFound(resp.message.clone()),
            kube::Error::Api(resp) => Self::Api {
                code: resp.code,
                message: resp.message.clone(),
            },
            kube::Error::SerdeError(e) => Self::Malformed(e),
            kube::Error::Auth(e) => Self::Config(e.to_string()),
            kube::Error::InferConfig(e) => Self::Config(e.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Run one client call, turning recoverable failures into `Ok(None)`.
///
/// Unrecoverable errors are returned unchanged; callers propagate them with `?`.
pub fn catch_client_errors<T, F>(call: F) -> Result<Option<T>, ClientError>
where
    F: FnOnce() -> Result<T, ClientError>,
{
    match call() {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_recoverable() => {
            tracing::warn!(error = %e, "Kubernetes call failed, treating as no data");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
