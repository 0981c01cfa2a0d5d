//! Server configuration
//!
//! All settings live in [`ServerConfig`], which is handed to
//! [`crate::server::serve`]. Nothing is read from process-wide state after
//! startup.

use std::env;
use std::path::{Path, PathBuf};

/// Default listen port
pub const DEFAULT_PORT: u16 = 4174;

/// Default listen host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// File the summary is extracted from, relative to the root
pub const INDEX_FILE: &str = "index.html";

/// Environment variable for the listen port
pub const PORT_ENV: &str = "PORT";

/// Environment variable for the listen host
pub const HOST_ENV: &str = "HOST";

/// Environment variable for the project root
pub const ROOT_ENV: &str = "SITE_ROOT";

/// Settings for one server instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host or address to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Directory holding `index.html` and the static assets
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            root: PathBuf::from("."),
        }
    }
}

impl ServerConfig {
    /// Create a configuration for `root` with the default host and port
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Create configuration from environment variables
    ///
    /// # Environment Variables
    ///
    /// - `PORT` (optional): listen port (default: 4174)
    /// - `HOST` (optional): listen host (default: 127.0.0.1)
    /// - `SITE_ROOT` (optional): project root (default: current directory)
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = match env::var(PORT_ENV) {
            Ok(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "ignoring invalid {}", PORT_ENV);
                DEFAULT_PORT
            }),
            Err(_) => defaults.port,
        };

        let host = env::var(HOST_ENV)
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);

        let root = env::var_os(ROOT_ENV)
            .map(PathBuf::from)
            .unwrap_or(defaults.root);

        Self { host, port, root }
    }

    /// Builder-style host override
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Builder-style port override
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Path of the summary source file
    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    /// Project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `host:port` string suitable for binding and display
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            // bare IPv6 literal
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Base URL announced in the startup log
    pub fn base_url(&self) -> String {
        format!("http://{}", self.bind_address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 4174);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.bind_address(), "127.0.0.1:4174");
        assert_eq!(config.base_url(), "http://127.0.0.1:4174");
    }

    #[test]
    fn test_index_path() {
        let config = ServerConfig::new("/srv/landing");
        assert_eq!(config.index_path(), PathBuf::from("/srv/landing/index.html"));
    }

    #[test]
    fn test_builders() {
        let config = ServerConfig::new("site").with_host("0.0.0.0").with_port(8080);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.root(), Path::new("site"));
    }

    #[test]
    fn test_ipv6_bind_address() {
        let config = ServerConfig::default().with_host("::1");
        assert_eq!(config.bind_address(), "[::1]:4174");
    }
}
