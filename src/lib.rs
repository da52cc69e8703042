//! Core library for the CloudEOS router lifecycle tool.
//!
//! The crate exposes a reconciliation engine that bridges synchronous
//! create/update/delete requests to a control plane that converges
//! asynchronously: create polls until the router reports a BGP ASN (and
//! rolls the resource back when it never does), delete polls until removal
//! is confirmed, and the stable tracking identifier is derived once
//! convergence succeeds. A fleet-management HTTP client implements the
//! provisioning boundary.

pub mod config;
pub mod descriptor;
pub mod fleet;
pub mod ident;
pub mod provider;
pub mod reconcile;
pub mod store;
pub mod test_support;

pub use config::{ConfigError, FleetConfig};
pub use descriptor::{DescriptorError, RouterDescriptor, RouterDescriptorBuilder, RouterInterface};
pub use fleet::{FleetClient, FleetClientError};
pub use ident::{STATUS_ID_TAG, TF_ID_PREFIX, derive_status_id};
pub use provider::{ProviderFuture, RouterProvider};
pub use reconcile::{Clock, ReconcileError, Reconciler, SleepFuture, TokioClock};
pub use store::{DescriptorStore, StoreError};
