//! CLI command definitions and dispatch.

pub mod apply;
pub mod client;
pub mod serve;
pub mod status;
pub mod validate;

use clap::{Parser, Subcommand};

/// manifestd — register manifests and run their images as containers.
#[derive(Parser, Debug)]
#[command(name = "manifestd", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "MANIFESTD_LOG_JSON")]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP control plane.
    Serve(serve::ServeArgs),
    /// Register a manifest file with a running server.
    Apply(apply::ApplyArgs),
    /// Show the manifests registered with a running server.
    Status(status::StatusArgs),
    /// Check a manifest file without contacting a server.
    Validate(validate::ValidateArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => serve::execute(args),
        Command::Apply(args) => apply::execute(&args),
        Command::Status(args) => status::execute(&args),
        Command::Validate(args) => validate::execute(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_apply_with_server() {
        let cli = Cli::try_parse_from([
            "manifestd",
            "apply",
            "app.yaml",
            "--server",
            "http://10.0.0.2:42113",
        ])
        .expect("parse");
        match cli.command {
            Command::Apply(args) => {
                assert_eq!(args.file.to_str(), Some("app.yaml"));
                assert_eq!(args.server, "http://10.0.0.2:42113");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
