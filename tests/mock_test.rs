//! Tests for kubecheck::k8s::mock — lookup rules of the in-memory transport.

use kubecheck::k8s::mock::MockTransport;
use kubecheck::{ClientError, ClusterClient, ResourceHandle};
use serde_json::json;

fn transport() -> MockTransport {
    MockTransport::new(json!({
        "v1": {
            "default": {
                "pods": [
                    { "name": "dup", "marker": 1 },
                    { "name": "dup", "marker": 2 },
                    { "metadata": { "name": "meta-only" } }
                ]
            },
            "kube-system": {
                "pods": [ { "name": "coredns" } ]
            }
        }
    }))
}

#[test]
fn first_match_wins() {
    let obj = transport()
        .get(&ResourceHandle::new("pods").in_namespace("default").named("dup"))
        .unwrap();
    assert_eq!(obj["marker"], 1);
}

#[test]
fn falls_back_to_metadata_name() {
    let obj = transport()
        .get(&ResourceHandle::new("pods").in_namespace("default").named("meta-only"))
        .unwrap();
    assert_eq!(obj["metadata"]["name"], "meta-only");
}

#[test]
fn namespace_scopes_the_lookup() {
    let t = transport();
    assert!(t
        .get(&ResourceHandle::new("pods").in_namespace("kube-system").named("coredns"))
        .is_ok());
    let err = t
        .get(&ResourceHandle::new("pods").in_namespace("default").named("coredns"))
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[test]
fn missing_discovery_stub_is_not_found() {
    let err = transport().api_resources("apps/v1").unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[test]
fn discovery_stub_is_decoded() {
    let t = transport().with_api_resources(
        "batch/v1",
        json!([{ "name": "jobs", "kind": "Job", "namespaced": true }]),
    );
    let descriptors = t.api_resources("batch/v1").unwrap();
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].group, "batch");
    assert_eq!(descriptors[0].version, "v1");
    assert!(descriptors[0].short_names.is_empty());
}

#[test]
fn injected_failure_applies_to_every_call() {
    let t = transport().fail_with(|| ClientError::Transport("down".to_string()));
    assert!(t
        .get(&ResourceHandle::new("pods").in_namespace("default").named("dup"))
        .is_err());
    assert!(t.api_resources("v1").is_err());
}
