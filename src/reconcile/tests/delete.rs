//! Tests for the delete-and-converge workflow.

use std::time::Duration;

use crate::reconcile::ReconcileError;
use crate::test_support::ScriptedProvider;

use super::{descriptor, reconciler};

#[tokio::test]
async fn delete_clears_the_identifier_once_confirmed() {
    let provider = ScriptedProvider::new();
    provider.push_check_pending("2 instances remaining");
    provider.push_check_pending("1 instance remaining");
    provider.push_check_confirmed();
    let engine = reconciler(provider.clone());
    let mut desc = descriptor();
    desc.assign_status_id("cloudeos-router-status-abc123");

    engine
        .delete(&mut desc)
        .await
        .unwrap_or_else(|err| panic!("delete should converge: {err}"));

    assert!(desc.status_id.is_empty(), "identifier must be cleared");
    assert_eq!(provider.check_calls(), 3);
}

#[tokio::test]
async fn delete_timeout_keeps_the_identifier_and_names_it() {
    let provider = ScriptedProvider::new();
    let engine = reconciler(provider.clone()).with_delete_timeout(Duration::from_secs(30));
    let mut desc = descriptor();
    desc.assign_status_id("cloudeos-router-status-abc123");

    let err = engine
        .delete(&mut desc)
        .await
        .expect_err("delete should time out");

    let ReconcileError::DestroyTimeout { ref status_id, ref cause } = err else {
        panic!("expected DestroyTimeout, got: {err}");
    };
    assert_eq!(status_id, "cloudeos-router-status-abc123");
    assert_eq!(cause, "deletion still pending");
    assert!(
        err.to_string().contains("cloudeos-router-status-abc123"),
        "message must name the resource: {err}"
    );
    assert_eq!(
        desc.status_id, "cloudeos-router-status-abc123",
        "identifier must survive a failed delete"
    );
}

#[tokio::test]
async fn delete_request_failure_is_fatal_and_skips_polling() {
    let provider = ScriptedProvider::new();
    provider.push_delete_failure("router is busy");
    let engine = reconciler(provider.clone());
    let mut desc = descriptor();
    desc.assign_status_id("cloudeos-router-status-abc123");

    let err = engine
        .delete(&mut desc)
        .await
        .expect_err("delete should fail");

    assert!(matches!(err, ReconcileError::DeleteRouter(_)), "got: {err}");
    assert_eq!(provider.check_calls(), 0);
    assert_eq!(desc.status_id, "cloudeos-router-status-abc123");
}
