//! Tests for kubecheck::error — recoverable classification and normalization.

use kubecheck::{catch_client_errors, ClientError};

#[test]
fn known_failures_are_recoverable() {
    let malformed = serde_json::from_str::<u32>("\"x\"").unwrap_err();
    let recoverable = [
        ClientError::NotFound("pods/x".to_string()),
        ClientError::Api {
            code: 500,
            message: "boom".to_string(),
        },
        ClientError::Transport("reset".to_string()),
        ClientError::Malformed(malformed),
    ];
    for err in &recoverable {
        assert!(err.is_recoverable(), "{err} should be recoverable");
    }
}

#[test]
fn request_and_config_errors_are_fatal() {
    assert!(!ClientError::InvalidRequest("no name".to_string()).is_recoverable());
    assert!(!ClientError::Config("no auth".to_string()).is_recoverable());
}

#[test]
fn catch_passes_success_through() {
    let out = catch_client_errors(|| Ok::<_, ClientError>(7)).unwrap();
    assert_eq!(out, Some(7));
}

#[test]
fn catch_turns_recoverable_error_into_none() {
    let out = catch_client_errors(|| {
        Err::<u32, _>(ClientError::NotFound("pods/x".to_string()))
    })
    .unwrap();
    assert_eq!(out, None);
}

#[test]
fn catch_returns_fatal_error() {
    let err = catch_client_errors(|| {
        Err::<u32, _>(ClientError::InvalidRequest("no name".to_string()))
    })
    .unwrap_err();
    assert!(matches!(err, ClientError::InvalidRequest(_)));
}

#[test]
fn error_messages_name_the_failure() {
    let err = ClientError::Api {
        code: 403,
        message: "forbidden".to_string(),
    };
    assert_eq!(err.to_string(), "API error 403: forbidden");
    assert_eq!(
        ClientError::NotFound("pods default/web".to_string()).to_string(),
        "resource not found: pods default/web"
    );
}

// ── Conversion from kube::Error ───────────────────────────────────────────────

fn api_status(code: u16, message: &str, reason: &str) -> kube::Error {
    kube::Error::Api(Box::new(
        kube::core::Status::failure(message, reason).with_code(code),
    ))
}

#[test]
fn status_404_becomes_not_found() {
    let err = ClientError::from(api_status(404, "pods \"x\" not found", "NotFound"));
    match &err {
        ClientError::NotFound(message) => assert_eq!(message, "pods \"x\" not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(err.is_recoverable());
}

#[test]
fn other_status_keeps_code_and_message() {
    let err = ClientError::from(api_status(500, "etcdserver: request timed out", "InternalError"));
    match &err {
        ClientError::Api { code, message } => {
            assert_eq!(*code, 500);
            assert_eq!(message, "etcdserver: request timed out");
        }
        other => panic!("expected Api, got {other:?}"),
    }
    assert!(err.is_recoverable());

    let forbidden = ClientError::from(api_status(403, "forbidden", "Forbidden"));
    assert!(matches!(forbidden, ClientError::Api { code: 403, .. }));
}

#[test]
fn serde_error_becomes_malformed() {
    let source = serde_json::from_str::<u32>("x").unwrap_err();
    let err = ClientError::from(kube::Error::SerdeError(source));
    assert!(matches!(err, ClientError::Malformed(_)));
    assert!(err.is_recoverable());
}

#[test]
fn stream_read_error_becomes_transport() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
    let err = ClientError::from(kube::Error::ReadEvents(io));
    match &err {
        ClientError::Transport(message) => assert!(message.contains("reset by peer")),
        other => panic!("expected Transport, got {other:?}"),
    }
    assert!(err.is_recoverable());
}

#[test]
fn converted_not_found_is_normalized_to_none() {
    let out = catch_client_errors(|| {
        Err::<u32, _>(ClientError::from(api_status(404, "gone", "NotFound")))
    })
    .unwrap();
    assert_eq!(out, None);
}
