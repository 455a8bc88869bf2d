//! `manifestd status` — Show the manifests registered with a running server.

use clap::Args;
use manifestd_common::constants::DEFAULT_SERVER_URL;

use super::client::ApiClient;
use crate::output;

/// Arguments for the `status` command.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Base URL of the control plane.
    #[arg(long, env = "MANIFESTD_SERVER", default_value = DEFAULT_SERVER_URL)]
    pub server: String,

    /// Print the raw JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `status` command.
///
/// # Errors
///
/// Returns an error if the server cannot be queried.
pub fn execute(args: &StatusArgs) -> anyhow::Result<()> {
    let manifests = ApiClient::new(&args.server).status()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&manifests)?);
        return Ok(());
    }

    if manifests.is_empty() {
        println!("No manifests registered.");
        return Ok(());
    }

    print!("{}", output::status_table(&manifests));
    Ok(())
}
