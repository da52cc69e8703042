//! Derived-identifier scheme for router status resources.
//!
//! The tracking identifier is computed from the caller-supplied `tf_id` and
//! is assigned to a descriptor only once create convergence has succeeded.

/// Tag prepended to every derived router status identifier.
pub const STATUS_ID_TAG: &str = "cloudeos-router-status";

/// Well-known prefix carried by router `tf_id` values.
pub const TF_ID_PREFIX: &str = "router";

/// Derives the stable tracking identifier for a router status resource.
///
/// The result is [`STATUS_ID_TAG`] followed by `tf_id` with [`TF_ID_PREFIX`]
/// stripped. A `tf_id` without the prefix is used unchanged, so derivation
/// has no failure mode and the same input always yields the same output.
#[must_use]
pub fn derive_status_id(tf_id: &str) -> String {
    let suffix = tf_id.strip_prefix(TF_ID_PREFIX).unwrap_or(tf_id);
    format!("{STATUS_ID_TAG}{suffix}")
}
