//! Tests for the deadline-bounded wait loops.

use std::time::Duration;

use crate::reconcile::Reconciler;
use crate::reconcile::wait::PollOutcome;
use crate::test_support::{ManualClock, ScriptedProvider};

use super::descriptor;

const INTERVAL: Duration = Duration::from_secs(5);

fn engine(
    provider: &ScriptedProvider,
    clock: &ManualClock,
) -> Reconciler<ScriptedProvider, ManualClock> {
    Reconciler::new(provider.clone())
        .with_poll_interval(INTERVAL)
        .with_clock(clock.clone())
}

#[tokio::test]
async fn wait_for_asn_times_out_with_the_last_cause() {
    let provider = ScriptedProvider::new();
    let clock = ManualClock::new();
    let mut desc = descriptor();

    let outcome = engine(&provider, &clock)
        .wait_for_asn(&mut desc, Duration::from_secs(10))
        .await;

    assert_eq!(
        outcome,
        PollOutcome::TimedOut {
            last_cause: Some(String::from("router BGP ASN not reported yet")),
        }
    );
}

#[tokio::test]
async fn wait_for_asn_issues_no_attempt_after_the_deadline() {
    let provider = ScriptedProvider::new();
    let clock = ManualClock::new();
    let mut desc = descriptor();

    let outcome = engine(&provider, &clock)
        .wait_for_asn(&mut desc, Duration::from_secs(12))
        .await;

    // Attempts run at t=0, 5, and 10; by t=15 the deadline has passed.
    assert!(matches!(outcome, PollOutcome::TimedOut { .. }));
    assert_eq!(provider.status_calls(), 3);
    assert_eq!(clock.elapsed(), Duration::from_secs(15));
}

#[tokio::test]
async fn wait_for_asn_records_fetch_failures_as_the_cause() {
    let provider = ScriptedProvider::new();
    provider.push_status_failure("gateway timeout");
    let clock = ManualClock::new();
    let mut desc = descriptor();

    let outcome = engine(&provider, &clock)
        .wait_for_asn(&mut desc, Duration::from_secs(4))
        .await;

    let PollOutcome::TimedOut { last_cause: Some(ref cause) } = outcome else {
        panic!("expected a timed-out outcome with a cause, got {outcome:?}");
    };
    assert!(cause.contains("gateway timeout"), "cause: {cause}");
}

#[tokio::test]
async fn wait_for_deletion_stops_sleeping_once_confirmed() {
    let provider = ScriptedProvider::new();
    provider.push_check_confirmed();
    let clock = ManualClock::new();
    let desc = descriptor();

    let outcome = engine(&provider, &clock)
        .wait_for_deletion(&desc, Duration::from_secs(600))
        .await;

    assert_eq!(outcome, PollOutcome::Converged);
    assert_eq!(provider.check_calls(), 1);
    assert_eq!(clock.elapsed(), Duration::ZERO, "no sleep after settling");
}

#[tokio::test]
async fn wait_for_deletion_retries_until_the_deadline() {
    let provider = ScriptedProvider::new();
    provider.push_check_pending("instance shutting down");
    let clock = ManualClock::new();
    let desc = descriptor();

    let outcome = engine(&provider, &clock)
        .wait_for_deletion(&desc, Duration::from_secs(9))
        .await;

    // Scripted cause first, steady-state cause afterwards; the last one wins.
    assert_eq!(
        outcome,
        PollOutcome::TimedOut {
            last_cause: Some(String::from("deletion still pending")),
        }
    );
    assert_eq!(provider.check_calls(), 2);
}
