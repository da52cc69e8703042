//! Test support utilities shared across unit and integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::descriptor::RouterDescriptor;
use crate::provider::{ProviderFuture, RouterProvider};
use crate::reconcile::{Clock, SleepFuture};

/// Error produced by [`ScriptedProvider`] operations.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("{0}")]
pub struct ScriptedError(
    /// Message describing the scripted failure.
    pub String,
);

/// One scripted response to a status poll.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StatusReply {
    /// The status fetch succeeds and reports this ASN (empty means the
    /// control plane has not converged yet).
    Asn(String),
    /// The status fetch fails with this message.
    Fail(String),
}

#[derive(Debug, Default)]
struct ScriptState {
    add: VecDeque<Result<(), ScriptedError>>,
    status: VecDeque<StatusReply>,
    delete: VecDeque<Result<(), ScriptedError>>,
    check: VecDeque<Result<(), ScriptedError>>,
    add_calls: usize,
    status_calls: usize,
    delete_calls: usize,
    check_calls: usize,
}

/// Scripted provisioning client returning pre-seeded outcomes in FIFO
/// order.
///
/// Each operation pops from its own queue; an exhausted queue yields the
/// operation's steady state (apply and delete succeed, status reports no
/// ASN, the deletion check stays pending), which keeps timeout scenarios
/// short to script. Call counters allow asserting exactly how many
/// provider calls a workflow issued.
#[derive(Clone, Debug, Default)]
pub struct ScriptedProvider {
    inner: Arc<Mutex<ScriptState>>,
}

impl ScriptedProvider {
    /// Creates a provider with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ScriptState> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Queues a failing apply call.
    pub fn push_add_failure(&self, message: impl Into<String>) {
        self.lock().add.push_back(Err(ScriptedError(message.into())));
    }

    /// Queues a status poll that reports no ASN yet.
    pub fn push_status_empty(&self) {
        self.lock().status.push_back(StatusReply::Asn(String::new()));
    }

    /// Queues a status poll that reports the given ASN.
    pub fn push_status_asn(&self, asn: impl Into<String>) {
        self.lock().status.push_back(StatusReply::Asn(asn.into()));
    }

    /// Queues a failing status poll.
    pub fn push_status_failure(&self, message: impl Into<String>) {
        self.lock().status.push_back(StatusReply::Fail(message.into()));
    }

    /// Queues a failing delete request.
    pub fn push_delete_failure(&self, message: impl Into<String>) {
        self.lock()
            .delete
            .push_back(Err(ScriptedError(message.into())));
    }

    /// Queues a deletion check that confirms removal.
    pub fn push_check_confirmed(&self) {
        self.lock().check.push_back(Ok(()));
    }

    /// Queues a deletion check that reports the resource still present.
    pub fn push_check_pending(&self, message: impl Into<String>) {
        self.lock()
            .check
            .push_back(Err(ScriptedError(message.into())));
    }

    /// Number of apply calls observed so far.
    #[must_use]
    pub fn add_calls(&self) -> usize {
        self.lock().add_calls
    }

    /// Number of status polls observed so far.
    #[must_use]
    pub fn status_calls(&self) -> usize {
        self.lock().status_calls
    }

    /// Number of delete requests observed so far.
    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.lock().delete_calls
    }

    /// Number of deletion checks observed so far.
    #[must_use]
    pub fn check_calls(&self) -> usize {
        self.lock().check_calls
    }
}

impl RouterProvider for ScriptedProvider {
    type Error = ScriptedError;

    fn add_router<'a>(
        &'a self,
        _descriptor: &'a RouterDescriptor,
    ) -> ProviderFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let mut state = self.lock();
            state.add_calls += 1;
            state.add.pop_front().unwrap_or(Ok(()))
        })
    }

    fn get_router_status<'a>(
        &'a self,
        descriptor: &'a mut RouterDescriptor,
    ) -> ProviderFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let reply = {
                let mut state = self.lock();
                state.status_calls += 1;
                state
                    .status
                    .pop_front()
                    .unwrap_or_else(|| StatusReply::Asn(String::new()))
            };
            match reply {
                StatusReply::Asn(asn) => {
                    let status = if asn.is_empty() { "pending" } else { "deployed" };
                    descriptor.set_bgp_asn(asn);
                    descriptor.set_deployment_status(status);
                    Ok(())
                }
                StatusReply::Fail(message) => Err(ScriptedError(message)),
            }
        })
    }

    fn delete_router<'a>(
        &'a self,
        _descriptor: &'a RouterDescriptor,
    ) -> ProviderFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let mut state = self.lock();
            state.delete_calls += 1;
            state.delete.pop_front().unwrap_or(Ok(()))
        })
    }

    fn check_router_deletion<'a>(
        &'a self,
        _descriptor: &'a RouterDescriptor,
    ) -> ProviderFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let mut state = self.lock();
            state.check_calls += 1;
            state
                .check
                .pop_front()
                .unwrap_or_else(|| Err(ScriptedError(String::from("deletion still pending"))))
        })
    }
}

/// Clock whose time only advances when a sleep is awaited.
///
/// Deadline tests drive virtual time through the poll loop's own sleeps,
/// so a ten-minute budget elapses without real waiting.
#[derive(Clone, Debug)]
pub struct ManualClock {
    start: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl ManualClock {
    /// Creates a clock whose virtual time starts now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Arc::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Duration> {
        self.elapsed
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Total virtual time slept so far.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        *self.lock()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.lock()
    }

    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        Box::pin(async move {
            *self.lock() += duration;
        })
    }
}
