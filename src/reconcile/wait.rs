//! Deadline-bounded convergence waits for the reconciliation engine.
//!
//! The original retry helper hid retryable-versus-terminal classification
//! behind callbacks; here each wait is an explicit loop over an injected
//! [`Clock`] that returns a tagged [`PollOutcome`].

use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use crate::descriptor::RouterDescriptor;
use crate::provider::RouterProvider;

use super::Reconciler;

/// Future returned by [`Clock::sleep`].
pub type SleepFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Time source injected into the convergence loops.
///
/// Production code uses [`TokioClock`]; tests inject a virtual clock so
/// deadline behaviour is deterministic.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;

    /// Suspends the calling task for `duration` without busy-spinning.
    fn sleep(&self, duration: Duration) -> SleepFuture<'_>;
}

/// Clock backed by the tokio runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Terminal outcome of a bounded convergence wait.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum PollOutcome {
    /// The awaited condition was observed before the deadline.
    Converged,
    /// The deadline lapsed; carries the cause of the last failed attempt.
    TimedOut { last_cause: Option<String> },
}

impl<P, C> Reconciler<P, C>
where
    P: RouterProvider,
    C: Clock,
{
    /// Polls router status until the control plane reports a non-empty BGP
    /// ASN or `budget` lapses.
    ///
    /// A failed status fetch and an absent ASN are both retryable; the
    /// loop only gives up at the deadline, and no attempt is started after
    /// the deadline has passed.
    pub(crate) async fn wait_for_asn(
        &self,
        descriptor: &mut RouterDescriptor,
        budget: Duration,
    ) -> PollOutcome {
        let deadline = self.clock.now() + budget;
        let mut last_cause = None;
        while self.clock.now() <= deadline {
            match self.provider.get_router_status(descriptor).await {
                Ok(()) if descriptor.has_bgp_asn() => return PollOutcome::Converged,
                Ok(()) => last_cause = Some(String::from("router BGP ASN not reported yet")),
                Err(err) => last_cause = Some(format!("status refresh failed: {err}")),
            }
            self.clock.sleep(self.poll_interval).await;
        }
        PollOutcome::TimedOut { last_cause }
    }

    /// Polls the deletion check until it confirms removal or `budget`
    /// lapses.
    ///
    /// Any check error means the resource has not been confirmed gone yet
    /// and keeps the loop waiting.
    pub(crate) async fn wait_for_deletion(
        &self,
        descriptor: &RouterDescriptor,
        budget: Duration,
    ) -> PollOutcome {
        let deadline = self.clock.now() + budget;
        let mut last_cause = None;
        while self.clock.now() <= deadline {
            match self.provider.check_router_deletion(descriptor).await {
                Ok(()) => return PollOutcome::Converged,
                Err(err) => last_cause = Some(err.to_string()),
            }
            self.clock.sleep(self.poll_interval).await;
        }
        PollOutcome::TimedOut { last_cause }
    }
}
