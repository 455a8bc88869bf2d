//! Backend that shells out to a Docker-compatible CLI.
//!
//! Works with any executable that accepts `pull`, `rm -f`, and
//! `run -d --name -p` the way `docker` and `podman` do.

use super::ContainerRuntime;
use crate::error::Result;
use crate::exec::{self, CommandOutput};

/// Runtime driven through a Docker-compatible command line tool.
#[derive(Debug, Clone)]
pub struct CliRuntime {
    binary: String,
    container_port: u16,
}

impl CliRuntime {
    /// Creates a backend invoking `binary`, publishing host ports to
    /// `container_port` inside each container.
    #[must_use]
    pub fn new(binary: impl Into<String>, container_port: u16) -> Self {
        Self {
            binary: binary.into(),
            container_port,
        }
    }

    /// Returns the runtime executable.
    #[must_use]
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Force-removes the container called `name`.
    ///
    /// Callers ignore the result: when no such container exists the
    /// runtime fails, and that is the common case.
    fn remove_existing(&self, name: &str) -> Result<CommandOutput> {
        exec::run_command(&self.binary, &remove_args(name))
    }
}

impl ContainerRuntime for CliRuntime {
    fn pull(&self, image: &str) -> Result<CommandOutput> {
        tracing::info!(image, binary = %self.binary, "pulling image");
        exec::run_command(&self.binary, &pull_args(image))
    }

    fn replace_and_run(&self, name: &str, image: &str, host_port: u16) -> Result<CommandOutput> {
        // Errors are intentionally ignored, logged only.
        if let Err(e) = self.remove_existing(name) {
            tracing::debug!(name, error = %e, "no previous container removed");
        }

        tracing::info!(name, image, host_port, "starting container");
        exec::run_command(
            &self.binary,
            &run_args(name, image, host_port, self.container_port),
        )
    }

    fn is_available(&self) -> bool {
        which::which(&self.binary).is_ok()
    }
}

fn pull_args(image: &str) -> Vec<String> {
    vec!["pull".into(), image.into()]
}

fn remove_args(name: &str) -> Vec<String> {
    vec!["rm".into(), "-f".into(), name.into()]
}

fn run_args(name: &str, image: &str, host_port: u16, container_port: u16) -> Vec<String> {
    vec![
        "run".into(),
        "-d".into(),
        "--name".into(),
        name.into(),
        "-p".into(),
        format!("{host_port}:{container_port}"),
        image.into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    #[test]
    fn pull_arguments() {
        assert_eq!(pull_args("nginx:latest"), vec!["pull", "nginx:latest"]);
    }

    #[test]
    fn remove_arguments_force() {
        assert_eq!(remove_args("web"), vec!["rm", "-f", "web"]);
    }

    #[test]
    fn run_arguments_publish_host_port_to_container_port() {
        assert_eq!(
            run_args("web", "nginx:latest", 8081, 80),
            vec!["run", "-d", "--name", "web", "-p", "8081:80", "nginx:latest"]
        );
    }

    #[test]
    fn missing_binary_is_unavailable() {
        assert!(!CliRuntime::new("manifestd-no-such-runtime", 80).is_available());
    }

    #[cfg(unix)]
    #[test]
    fn successful_runtime_reports_success() {
        let runtime = CliRuntime::new("true", 80);
        assert!(runtime.is_available());
        assert!(runtime.pull("nginx").is_ok());
        assert!(runtime.replace_and_run("web", "nginx", 8081).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn failing_runtime_surfaces_pull_and_run_errors() {
        let runtime = CliRuntime::new("false", 80);
        assert!(matches!(
            runtime.pull("nginx"),
            Err(RuntimeError::CommandFailed { .. })
        ));
        assert!(matches!(
            runtime.replace_and_run("web", "nginx", 8081),
            Err(RuntimeError::CommandFailed { .. })
        ));
    }

    /// Writes a runtime stand-in that appends its arguments to a log, fails
    /// `rm`, and succeeds at everything else.
    #[cfg(unix)]
    fn logging_runtime(dir: &std::path::Path) -> (CliRuntime, std::path::PathBuf) {
        use std::os::unix::fs::PermissionsExt;

        let log = dir.join("calls.log");
        let script = dir.join("runtime.sh");
        std::fs::write(
            &script,
            format!(
                "#!/bin/sh\necho \"$*\" >> '{}'\ncase \"$1\" in rm) exit 1;; esac\nexit 0\n",
                log.display()
            ),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        (CliRuntime::new(script.to_string_lossy(), 80), log)
    }

    #[cfg(unix)]
    #[test]
    fn failed_cleanup_is_swallowed_before_run() {
        let dir = tempfile::tempdir().unwrap();
        let (runtime, log) = logging_runtime(dir.path());

        let started = runtime.replace_and_run("web", "nginx", 8081).unwrap();
        assert!(started.command.ends_with("run -d --name web -p 8081:80 nginx"));

        let calls = std::fs::read_to_string(log).unwrap();
        assert_eq!(
            calls.lines().collect::<Vec<_>>(),
            vec!["rm -f web", "run -d --name web -p 8081:80 nginx"]
        );
    }

    #[test]
    fn unreachable_runtime_is_spawn_error() {
        let runtime = CliRuntime::new("manifestd-no-such-runtime", 80);
        assert!(matches!(
            runtime.pull("nginx"),
            Err(RuntimeError::Spawn { .. })
        ));
    }
}
