//! Binary entry point for the CloudEOS router lifecycle CLI.

use std::io::{self, Write};
use std::process;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use cloudeos::{
    DescriptorStore, FleetClient, FleetClientError, FleetConfig, ReconcileError, Reconciler,
    StoreError, derive_status_id,
};

mod cli;

use cli::{ApplyCommand, Cli, DestroyCommand, UpdateCommand};

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("client error: {0}")]
    Client(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("workflow failed: {0}")]
    Workflow(#[from] ReconcileError<FleetClientError>),
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli {
        Cli::Apply(args) => apply_command(args).await,
        Cli::Update(args) => update_command(args).await,
        Cli::Destroy(args) => destroy_command(args).await,
    }
}

fn build_reconciler() -> Result<Reconciler<FleetClient>, CliError> {
    let config =
        FleetConfig::load_without_cli_args().map_err(|err| CliError::Config(err.to_string()))?;
    let client = FleetClient::new(config).map_err(|err| CliError::Client(err.to_string()))?;
    Ok(Reconciler::new(client))
}

async fn apply_command(args: ApplyCommand) -> Result<(), CliError> {
    let store = DescriptorStore::new(Utf8PathBuf::from(args.descriptor));
    let mut descriptor = store.load()?;
    let reconciler = build_reconciler()?;

    reconciler
        .create(&mut descriptor, Duration::from_secs(args.timeout_secs))
        .await?;
    store.save(&descriptor)?;

    writeln!(io::stdout(), "{}", descriptor.status_id).ok();
    Ok(())
}

async fn update_command(args: UpdateCommand) -> Result<(), CliError> {
    let store = DescriptorStore::new(Utf8PathBuf::from(args.descriptor));
    let descriptor = store.load()?;
    let reconciler = build_reconciler()?;

    reconciler.update(&descriptor).await?;

    writeln!(
        io::stdout(),
        "updated {}",
        derive_status_id(&descriptor.tf_id)
    )
    .ok();
    Ok(())
}

async fn destroy_command(args: DestroyCommand) -> Result<(), CliError> {
    let store = DescriptorStore::new(Utf8PathBuf::from(args.descriptor));
    let mut descriptor = store.load()?;
    let reconciler =
        build_reconciler()?.with_delete_timeout(Duration::from_secs(args.timeout_secs));

    reconciler.delete(&mut descriptor).await?;
    store.save(&descriptor)?;

    writeln!(io::stdout(), "destroyed router {}", descriptor.tf_id).ok();
    Ok(())
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}
