//! System-wide constants and defaults.

/// Default address the HTTP control plane listens on.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:42113";

/// Default server URL used by the client subcommands.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:42113";

/// First host port handed out to a registered manifest.
pub const DEFAULT_PORT_BASE: u16 = 8081;

/// Port every launched container is expected to listen on internally.
pub const DEFAULT_CONTAINER_PORT: u16 = 80;

/// Container runtime executable used when none is configured.
pub const DEFAULT_RUNTIME_BINARY: &str = "docker";

/// Directory served under [`WEB_PREFIX`].
pub const DEFAULT_WEB_DIR: &str = "web";

/// Path prefix for static assets.
pub const WEB_PREFIX: &str = "/web";

/// Registration endpoint.
pub const MANIFESTS_PATH: &str = "/api/v1/manifests";

/// Registry status endpoint.
pub const STATUS_PATH: &str = "/api/v1/status";
