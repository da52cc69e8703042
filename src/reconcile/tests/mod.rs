//! Unit tests for the reconciliation engine.

use std::time::Duration;

use crate::descriptor::{RouterDescriptor, RouterInterface};
use crate::reconcile::{ReconcileError, Reconciler};
use crate::test_support::{ManualClock, ScriptedProvider};

mod delete;
mod wait;

fn descriptor() -> RouterDescriptor {
    RouterDescriptor::builder()
        .tf_id("router-abc123")
        .cloud_provider("aws")
        .region("us-west-2")
        .instance_type("c5.xlarge")
        .interface(RouterInterface {
            name: "eth0".to_owned(),
            id: "eni-1".to_owned(),
            private_ip: "10.0.0.4".to_owned(),
            subnet_id: "subnet-1".to_owned(),
            kind: "internal".to_owned(),
        })
        .build()
        .unwrap_or_else(|err| panic!("fixture descriptor should build: {err}"))
}

fn reconciler(provider: ScriptedProvider) -> Reconciler<ScriptedProvider, ManualClock> {
    Reconciler::new(provider)
        .with_poll_interval(Duration::from_secs(5))
        .with_clock(ManualClock::new())
}

#[tokio::test]
async fn update_applies_exactly_once_and_never_polls() {
    let provider = ScriptedProvider::new();
    let engine = reconciler(provider.clone());
    let desc = descriptor();

    engine
        .update(&desc)
        .await
        .unwrap_or_else(|err| panic!("update should succeed: {err}"));

    assert_eq!(provider.add_calls(), 1);
    assert_eq!(provider.status_calls(), 0);
    assert_eq!(provider.delete_calls(), 0);
    assert_eq!(provider.check_calls(), 0);
}

#[tokio::test]
async fn update_surfaces_apply_failure_directly() {
    let provider = ScriptedProvider::new();
    provider.push_add_failure("config rejected");
    let engine = reconciler(provider.clone());
    let desc = descriptor();

    let err = engine.update(&desc).await.expect_err("update should fail");

    assert!(matches!(err, ReconcileError::AddRouter(_)), "got: {err}");
    assert_eq!(provider.status_calls(), 0);
}

#[tokio::test]
async fn read_is_a_no_op() {
    let provider = ScriptedProvider::new();
    let engine = reconciler(provider.clone());
    let desc = descriptor();

    assert!(engine.read(&desc).is_ok());
    assert_eq!(provider.add_calls(), 0);
    assert_eq!(provider.status_calls(), 0);
}
