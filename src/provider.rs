//! Provisioning-client boundary for router lifecycle operations.
//!
//! The reconciliation engine drives convergence through this trait; the
//! concrete transport (see [`crate::fleet`]) is interchangeable, which keeps
//! the engine testable against scripted doubles.

use std::future::Future;
use std::pin::Pin;

use crate::descriptor::RouterDescriptor;

/// Future returned by provisioning-client operations.
pub type ProviderFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Minimal interface implemented by router provisioning clients.
pub trait RouterProvider {
    /// Client specific error type returned by the operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Creates the backing router resource, or re-applies its configuration
    /// when it already exists.
    fn add_router<'a>(
        &'a self,
        descriptor: &'a RouterDescriptor,
    ) -> ProviderFuture<'a, (), Self::Error>;

    /// Refreshes the descriptor's observed fields (BGP ASN, deployment
    /// status) in place. Must be safe to call repeatedly.
    fn get_router_status<'a>(
        &'a self,
        descriptor: &'a mut RouterDescriptor,
    ) -> ProviderFuture<'a, (), Self::Error>;

    /// Requests deletion of the backing router resource.
    fn delete_router<'a>(
        &'a self,
        descriptor: &'a RouterDescriptor,
    ) -> ProviderFuture<'a, (), Self::Error>;

    /// Succeeds only once deletion has completed; any error means the
    /// resource has not been confirmed gone yet and the caller should keep
    /// waiting.
    fn check_router_deletion<'a>(
        &'a self,
        descriptor: &'a RouterDescriptor,
    ) -> ProviderFuture<'a, (), Self::Error>;
}
