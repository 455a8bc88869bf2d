//! Synchronous execution of runtime commands.

use std::process::{Command, Stdio};

use crate::error::{Result, RuntimeError};

/// Output of a successful runtime command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Rendered command line, for logging.
    pub command: String,
    /// Stdout followed by stderr.
    pub output: String,
}

/// Runs `program` with `args`, blocking until it exits.
///
/// The command line and its combined output are logged. There is no
/// timeout: a hung runtime blocks the caller.
///
/// # Errors
///
/// Returns [`RuntimeError::Spawn`] if the program cannot be started and
/// [`RuntimeError::CommandFailed`] if it exits unsuccessfully.
pub fn run_command(program: &str, args: &[String]) -> Result<CommandOutput> {
    let command = render_command(program, args);
    tracing::info!(%command, "running command");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| RuntimeError::Spawn {
            program: program.to_owned(),
            source: e,
        })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    tracing::info!(%command, status = %output.status, output = %combined.trim_end(), "command finished");

    if !output.status.success() {
        return Err(RuntimeError::CommandFailed {
            command,
            status: output.status.to_string(),
            output: combined,
        });
    }

    Ok(CommandOutput {
        command,
        output: combined,
    })
}

fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".into(), script.into()]
    }

    #[test]
    fn combines_stdout_and_stderr() {
        let out = run_command("sh", &sh("echo out; echo err >&2")).expect("run");
        assert!(out.output.contains("out"));
        assert!(out.output.contains("err"));
        assert_eq!(out.command, "sh -c echo out; echo err >&2");
    }

    #[test]
    fn non_zero_exit_is_command_failed() {
        let err = run_command("sh", &sh("echo boom; exit 3")).unwrap_err();
        match err {
            RuntimeError::CommandFailed { output, status, .. } => {
                assert!(output.contains("boom"));
                assert!(status.contains('3'));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let err = run_command("manifestd-no-such-binary", &[]).unwrap_err();
        assert!(matches!(err, RuntimeError::Spawn { .. }));
    }

    #[test]
    fn command_line_is_rendered_with_spaces() {
        assert_eq!(
            render_command("docker", &["pull".into(), "nginx:latest".into()]),
            "docker pull nginx:latest"
        );
    }
}
