//! Tests for kubecheck::k8s::client — connection error paths and kubeconfig reading.

use std::path::PathBuf;

use kubecheck::k8s::client::current_context;
use kubecheck::{KubeClusterClient, Settings};

// ── current_context ───────────────────────────────────────────────────────────

#[test]
fn current_context_returns_non_empty_string() {
    // Without a kubeconfig the function returns "unknown"; with one it returns the context name.
    let ctx = current_context();
    assert!(
        !ctx.is_empty(),
        "current_context must never return an empty string"
    );
}

// ── KubeClusterClient::connect — error paths ──────────────────────────────────

#[test]
fn connect_with_nonexistent_kubeconfig_path_returns_error() {
    let settings = Settings::default().with_overrides(
        Some("any-ctx".to_string()),
        Some(PathBuf::from("/nonexistent/kubeconfig.yaml")),
    );
    let result = KubeClusterClient::connect(&settings);
    assert!(
        result.is_err(),
        "connect with nonexistent kubeconfig must return Err"
    );
}

#[test]
fn connect_with_unknown_context_in_empty_kubeconfig_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config");
    std::fs::write(
        &path,
        "apiVersion: v1\nkind: Config\nclusters: []\ncontexts: []\nusers: []\n",
    )
    .unwrap();
    let settings = Settings::default()
        .with_overrides(Some("kubecheck-nonexistent-ctx-zzzz".to_string()), Some(path));
    let err = KubeClusterClient::connect(&settings)
        .err()
        .expect("unknown context must return Err");
    assert!(format!("{err:#}").contains("kubecheck-nonexistent-ctx-zzzz"));
}
