//! Error taxonomy for the reconciliation engine.

use thiserror::Error;

use crate::descriptor::DescriptorError;

/// Errors surfaced by the reconciliation workflows.
///
/// The kinds distinguish what an operator must do next: a rolled-back
/// create can simply be retried, while [`ReconcileError::CleanupFailed`]
/// means a resource may have been orphaned and needs manual attention.
#[derive(Debug, Error)]
pub enum ReconcileError<E>
where
    E: std::error::Error + 'static,
{
    /// Raised when the descriptor fails validation before any call is made.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    /// Raised when the initial apply call fails; nothing was provisioned.
    #[error("failed to apply router configuration: {0}")]
    AddRouter(#[source] E),
    /// Raised when the BGP ASN never arrived and the compensating delete
    /// succeeded; the resource was rolled back and the create can be
    /// retried.
    #[error(
        "BGP ASN for the router was not returned before the deadline; the router was rolled back"
    )]
    AsnNotReturned,
    /// Raised when the compensating delete itself failed; the resource may
    /// still exist and requires operator intervention.
    #[error(
        "cleanup of router {tf_id} failed after a convergence timeout; the resource may be orphaned: {source}"
    )]
    CleanupFailed {
        /// Caller-supplied identifier of the router left behind.
        tf_id: String,
        /// Error returned by the compensating delete.
        #[source]
        source: E,
    },
    /// Raised when the delete request fails; the router is presumed to
    /// still exist and the tracking identifier is left intact.
    #[error("failed to request router deletion: {0}")]
    DeleteRouter(#[source] E),
    /// Raised when deletion was requested but never confirmed within the
    /// budget; the tracking identifier is left intact.
    #[error("failed to destroy {status_id}: {cause}")]
    DestroyTimeout {
        /// Derived identifier of the router that would not go away.
        status_id: String,
        /// Cause reported by the last deletion check.
        cause: String,
    },
}
