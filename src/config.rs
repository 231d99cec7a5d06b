//! Session configuration: daemon address plus the label-to-index map.

use std::path::PathBuf;

use crate::registry::IndexRegistry;
use crate::transport::ServerAddr;

/// Configuration for a [`SearchSession`](crate::session::SearchSession).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Daemon host name or IP.
    pub host: String,
    /// Daemon TCP port.
    pub port: u16,
    /// Unix socket the daemon listens on; overrides host/port when set.
    pub socket_path: Option<PathBuf>,
    /// Index labels callers may search.
    pub indexes: IndexRegistry,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 9312,
            socket_path: None,
            indexes: IndexRegistry::new(),
        }
    }
}

impl SessionConfig {
    /// Load address overrides from environment variables.
    ///
    /// Recognized: `SEARCHD_HOST`, `SEARCHD_PORT`, `SEARCHD_SOCKET`.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(host) = dotenvy::var("SEARCHD_HOST") {
            cfg.host = host;
        }

        if let Ok(val) = dotenvy::var("SEARCHD_PORT")
            && let Ok(port) = val.parse::<u16>()
        {
            cfg.port = port;
        }

        if let Ok(path) = dotenvy::var("SEARCHD_SOCKET") {
            cfg.socket_path = Some(PathBuf::from(path));
        }

        cfg
    }

    pub fn with_indexes(mut self, indexes: IndexRegistry) -> Self {
        self.indexes = indexes;
        self
    }

    /// Resolved connection target; the socket path wins over host/port.
    pub fn server_addr(&self) -> ServerAddr {
        ServerAddr::from_parts(self.host.clone(), self.port, self.socket_path.clone())
    }
}
