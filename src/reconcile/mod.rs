//! Reconciliation engine driving router lifecycle convergence.
//!
//! The engine bridges a synchronous create/update/delete surface to a
//! control plane that converges asynchronously: bounded polling against a
//! hard deadline, a compensating delete when create-time convergence fails,
//! and derivation of the stable tracking identifier once a router is ready.

mod error;
mod wait;

use std::time::Duration;

use tracing::{error, info, warn};

use crate::descriptor::RouterDescriptor;
use crate::ident::derive_status_id;
use crate::provider::RouterProvider;

pub use error::ReconcileError;
pub use wait::{Clock, SleepFuture, TokioClock};
use wait::PollOutcome;

const POLL_INTERVAL: Duration = Duration::from_secs(5);
const DELETE_TIMEOUT: Duration = Duration::from_secs(600);

/// Phases of the create-and-converge workflow.
///
/// `Converged` is the terminal success phase; `Failed` (resource rolled
/// back) and `Orphaned` (rollback itself failed) are the terminal failure
/// phases.
#[derive(Debug)]
enum CreatePhase<E> {
    Creating,
    ConvergenceWait,
    RollingBack { cause: Option<String> },
    Converged,
    Failed,
    Orphaned { source: E },
}

/// Drives router create, update, and delete workflows to convergence.
#[derive(Clone, Debug)]
pub struct Reconciler<P, C = TokioClock> {
    provider: P,
    clock: C,
    poll_interval: Duration,
    delete_timeout: Duration,
}

impl<P> Reconciler<P>
where
    P: RouterProvider,
{
    /// Creates a reconciler with the default polling cadence and delete
    /// convergence budget.
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            clock: TokioClock,
            poll_interval: POLL_INTERVAL,
            delete_timeout: DELETE_TIMEOUT,
        }
    }
}

impl<P, C> Reconciler<P, C>
where
    P: RouterProvider,
    C: Clock,
{
    /// Replaces the clock used for deadlines and sleeps.
    ///
    /// This is primarily used by tests to make deadline behaviour
    /// deterministic.
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Reconciler<P, C2> {
        Reconciler {
            provider: self.provider,
            clock,
            poll_interval: self.poll_interval,
            delete_timeout: self.delete_timeout,
        }
    }

    /// Overrides the interval between convergence poll attempts.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Overrides the delete convergence budget.
    #[must_use]
    pub const fn with_delete_timeout(mut self, timeout: Duration) -> Self {
        self.delete_timeout = timeout;
        self
    }

    /// Provisions the router and blocks until the control plane reports a
    /// BGP ASN, or fails cleanly.
    ///
    /// On a convergence timeout the just-created resource is deleted again.
    /// A rollback failure surfaces as the distinct
    /// [`ReconcileError::CleanupFailed`] so operators know the resource may
    /// be orphaned. On success the descriptor carries both the ASN and the
    /// derived tracking identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError`] when the descriptor is invalid, the
    /// initial apply call fails, the ASN never arrives within `timeout`, or
    /// the compensating delete fails.
    pub async fn create(
        &self,
        descriptor: &mut RouterDescriptor,
        timeout: Duration,
    ) -> Result<(), ReconcileError<P::Error>> {
        descriptor.validate()?;
        let mut phase = CreatePhase::Creating;
        loop {
            phase = match phase {
                CreatePhase::Creating => {
                    info!(tf_id = %descriptor.tf_id, "router create started");
                    self.provider
                        .add_router(descriptor)
                        .await
                        .map_err(ReconcileError::AddRouter)?;
                    CreatePhase::ConvergenceWait
                }
                CreatePhase::ConvergenceWait => {
                    match self.wait_for_asn(descriptor, timeout).await {
                        PollOutcome::Converged => CreatePhase::Converged,
                        PollOutcome::TimedOut { last_cause } => CreatePhase::RollingBack {
                            cause: last_cause,
                        },
                    }
                }
                CreatePhase::RollingBack { cause } => {
                    warn!(
                        tf_id = %descriptor.tf_id,
                        cause = cause.as_deref().unwrap_or("convergence deadline lapsed"),
                        "router rollback started"
                    );
                    match self.provider.delete_router(descriptor).await {
                        Ok(()) => CreatePhase::Failed,
                        Err(source) => CreatePhase::Orphaned { source },
                    }
                }
                CreatePhase::Converged => {
                    let status_id = derive_status_id(&descriptor.tf_id);
                    descriptor.assign_status_id(status_id.clone());
                    info!(%status_id, asn = %descriptor.router_bgp_asn, "router converged");
                    return Ok(());
                }
                CreatePhase::Failed => return Err(ReconcileError::AsnNotReturned),
                CreatePhase::Orphaned { source } => {
                    error!(tf_id = %descriptor.tf_id, error = %source, "router rollback failed");
                    return Err(ReconcileError::CleanupFailed {
                        tf_id: descriptor.tf_id.clone(),
                        source,
                    });
                }
            };
        }
    }

    /// Re-applies a changed descriptor to an already-provisioned router.
    ///
    /// The apply call is issued exactly once, with no convergence polling
    /// and no rollback: the resource converged when it was created, and the
    /// control plane applies configuration changes synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::AddRouter`] when the apply call fails and
    /// [`ReconcileError::Descriptor`] when the descriptor is invalid.
    pub async fn update(
        &self,
        descriptor: &RouterDescriptor,
    ) -> Result<(), ReconcileError<P::Error>> {
        descriptor.validate()?;
        self.provider
            .add_router(descriptor)
            .await
            .map_err(ReconcileError::AddRouter)?;
        info!(status_id = %derive_status_id(&descriptor.tf_id), "router update applied");
        Ok(())
    }

    /// Tears the router down and blocks until the control plane confirms
    /// removal.
    ///
    /// The tracking identifier is cleared if and only if deletion is
    /// confirmed; on any failure it is left intact and the resource is
    /// still considered present.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::DeleteRouter`] when the delete request
    /// fails and [`ReconcileError::DestroyTimeout`] when deletion is not
    /// confirmed within the configured budget.
    pub async fn delete(
        &self,
        descriptor: &mut RouterDescriptor,
    ) -> Result<(), ReconcileError<P::Error>> {
        let status_id = derive_status_id(&descriptor.tf_id);
        info!(%status_id, "router delete started");
        self.provider
            .delete_router(descriptor)
            .await
            .map_err(ReconcileError::DeleteRouter)?;
        match self.wait_for_deletion(descriptor, self.delete_timeout).await {
            PollOutcome::Converged => {
                descriptor.clear_status_id();
                info!(%status_id, "router deleted");
                Ok(())
            }
            PollOutcome::TimedOut { last_cause } => Err(ReconcileError::DestroyTimeout {
                status_id,
                cause: last_cause
                    .unwrap_or_else(|| String::from("deletion was not confirmed before the deadline")),
            }),
        }
    }

    /// Read-back is deliberately a no-op: observed state is refreshed only
    /// as a side effect of create convergence polling.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` mirrors the other workflow signatures.
    pub const fn read(
        &self,
        _descriptor: &RouterDescriptor,
    ) -> Result<(), ReconcileError<P::Error>> {
        Ok(())
    }
}

#[cfg(test)]
mod tests;
