//! `manifestd apply` — Register a manifest file with a running server.

use std::path::PathBuf;

use clap::Args;
use manifestd_common::constants::DEFAULT_SERVER_URL;
use manifestd_common::manifest::Manifest;

use super::client::ApiClient;

/// Arguments for the `apply` command.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Manifest file (.json, .yaml or .yml).
    pub file: PathBuf,

    /// Base URL of the control plane.
    #[arg(long, env = "MANIFESTD_SERVER", default_value = DEFAULT_SERVER_URL)]
    pub server: String,
}

/// Executes the `apply` command.
///
/// The manifest is validated locally before anything is sent.
///
/// # Errors
///
/// Returns an error if the file is invalid or the server rejects it.
pub fn execute(args: &ApplyArgs) -> anyhow::Result<()> {
    let manifest = Manifest::load(&args.file)?;
    manifest.validate()?;

    let response = ApiClient::new(&args.server).register(&manifest)?;
    match response.port {
        Some(port) => println!("{} (port {port})", response.message),
        None => println!("{}", response.message),
    }
    Ok(())
}
