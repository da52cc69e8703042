//! Command-line interface definitions for the `cloudeos` binary.
//!
//! This module centralises the clap parser structures so both the main
//! binary and the build script can reuse them when generating the manual
//! page.

use clap::Parser;

/// Top-level CLI for the `cloudeos` binary.
#[derive(Debug, Parser)]
#[command(
    name = "cloudeos",
    about = "Provision CloudEOS routers and wait for control-plane convergence",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Create the router and wait until the control plane reports a BGP ASN.
    #[command(name = "apply", about = "Create the router and wait for convergence")]
    Apply(ApplyCommand),
    /// Re-apply configuration to an already-provisioned router.
    #[command(name = "update", about = "Re-apply configuration without waiting")]
    Update(UpdateCommand),
    /// Delete the router and wait until removal is confirmed.
    #[command(name = "destroy", about = "Delete the router and wait for confirmation")]
    Destroy(DestroyCommand),
}

/// Arguments for the `cloudeos apply` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct ApplyCommand {
    /// Path to the router descriptor JSON file.
    #[arg(long, value_name = "PATH")]
    pub(crate) descriptor: String,
    /// Maximum seconds to wait for create convergence.
    #[arg(long, value_name = "SECONDS", default_value_t = 900)]
    pub(crate) timeout_secs: u64,
}

/// Arguments for the `cloudeos update` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct UpdateCommand {
    /// Path to the router descriptor JSON file.
    #[arg(long, value_name = "PATH")]
    pub(crate) descriptor: String,
}

/// Arguments for the `cloudeos destroy` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct DestroyCommand {
    /// Path to the router descriptor JSON file.
    #[arg(long, value_name = "PATH")]
    pub(crate) descriptor: String,
    /// Maximum seconds to wait for deletion to be confirmed.
    #[arg(long, value_name = "SECONDS", default_value_t = 600)]
    pub(crate) timeout_secs: u64,
}
