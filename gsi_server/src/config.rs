use std::{
    env, fmt, fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PATH: &str = "/";
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Environment variable naming a JSON config file for [`ServerConfig::load`].
pub const CONFIG_PATH_ENV: &str = "GSI_CONFIG_PATH";

// optional scheme (ignored), host up to the first colon or slash, numeric
// port, then everything from the first slash as the path
static LISTEN_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(.+?)://)?([^/:]*)(:[0-9]+)?(/.*)?$").expect("listen address pattern compiles")
});

/// Where the listener binds and which path it serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenAddress {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl ListenAddress {
    /// `host:port`, suitable for binding.
    pub fn bind_target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenAddress {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
        }
    }
}

impl fmt::Display for ListenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.host, self.port, self.path)
    }
}

/// Parse any portion of a URL into a [`ListenAddress`].
///
/// `"http://localhost:3000"`, `"localhost:3000"`, `":3000"` and `""` are all
/// equivalent. Missing parts default to `localhost`, port 3000 and `/`. The
/// scheme is accepted but not validated.
pub fn parse_listen_address(input: &str) -> Result<ListenAddress, ConfigError> {
    let captures = LISTEN_ADDRESS
        .captures(input)
        .ok_or_else(|| ConfigError::InvalidListenAddress(input.to_string()))?;

    let host = captures
        .get(2)
        .map(|m| m.as_str())
        .filter(|host| !host.is_empty())
        .unwrap_or(DEFAULT_HOST);

    let port = match captures.get(3) {
        Some(m) => {
            let digits = m.as_str().trim_start_matches(':');
            digits
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(digits.to_string()))?
        }
        None => DEFAULT_PORT,
    };

    let path = captures
        .get(4)
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_PATH);

    Ok(ListenAddress {
        host: host.to_string(),
        port,
        path: path.to_string(),
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    listen: String,
    max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: String::new(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let config = ServerConfig::from_json_str(&contents)?;
        Ok(config)
    }

    /// Read the file named by `GSI_CONFIG_PATH`, or fall back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                let config = Self::from_file(&path)?;
                tracing::info!(
                    target: "gsi::config",
                    path = %path.display(),
                    "server_config.loaded=file"
                );
                Ok(config)
            }
            None => {
                tracing::info!(target: "gsi::config", "server_config.loaded=builtin");
                Ok(Self::default())
            }
        }
    }

    pub fn with_listen(mut self, listen: impl Into<String>) -> Self {
        self.listen = listen.into();
        self
    }

    pub fn listen(&self) -> &str {
        &self.listen
    }

    pub fn listen_address(&self) -> Result<ListenAddress, ConfigError> {
        parse_listen_address(&self.listen)
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes.max(1)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse server config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read server config from {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid listen address '{0}'")]
    InvalidListenAddress(String),
    #[error("invalid port '{0}'")]
    InvalidPort(String),
}
