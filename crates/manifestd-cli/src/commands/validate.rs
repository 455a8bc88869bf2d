//! `manifestd validate` — Check a manifest file offline.

use std::path::PathBuf;

use clap::Args;
use manifestd_common::manifest::Manifest;

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Manifest file (.json, .yaml or .yml).
    pub file: PathBuf,
}

/// Executes the `validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed or fails validation.
pub fn execute(args: &ValidateArgs) -> anyhow::Result<()> {
    let manifest = check(&args.file)?;
    println!(
        "{}: manifest {} with image {} is valid",
        args.file.display(),
        manifest.name(),
        manifest.image()
    );
    Ok(())
}

fn check(path: &std::path::Path) -> anyhow::Result<Manifest> {
    let manifest = Manifest::load(path)?;
    manifest.validate()?;
    Ok(manifest)
}
