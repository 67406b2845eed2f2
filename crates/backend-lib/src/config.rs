// ============================
// accounts-backend/src/config.rs
// ============================
//! Configuration management.
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};


/// Environment variable prefix, e.g. `ACCOUNTS_SERVER__PORT`
pub const ENV_PREFIX: &str = "ACCOUNTS_";

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub auth: AuthSettings,
    pub log: LogSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Where records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local tables, lost on restart
    Memory,
    /// JSON snapshot under `storage.path`
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Data directory used by the file backend
    pub path: PathBuf,
}

/// Credential and token settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Minimum accepted password length
    pub min_password_length: usize,
    /// Random bytes per issued API token
    pub token_bytes: usize,
    /// scrypt CPU/memory cost exponent used for new hashes
    pub scrypt_log_n: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3333,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: PathBuf::from("data"),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            min_password_length: 4,
            token_bytes: 32,
            scrypt_log_n: 15,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` (if present) and `ACCOUNTS_*` env vars
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load settings from an explicit file, still honouring env overrides
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let settings: Settings = Self::figment(path)
            .extract()
            .with_context(|| format!("failed to load settings from {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Layered provider: defaults, then file, then environment
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log.level.to_ascii_lowercase().as_str()) {
            return Err(anyhow!("invalid log level: {}", self.log.level));
        }
        if self.server.port == 0 {
            return Err(anyhow!("server port must be non-zero"));
        }
        if self.auth.min_password_length == 0 {
            return Err(anyhow!("min_password_length must be at least 1"));
        }
        if self.auth.token_bytes < 16 {
            return Err(anyhow!(
                "token_bytes must be at least 16, got {}",
                self.auth.token_bytes
            ));
        }
        if !(1..=20).contains(&self.auth.scrypt_log_n) {
            return Err(anyhow!(
                "scrypt_log_n must be within 1..=20, got {}",
                self.auth.scrypt_log_n
            ));
        }
        Ok(())
    }

    /// Resolve `server.host:server.port` to a socket address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        (self.server.host.as_str(), self.server.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| anyhow!("could not resolve {}:{}", self.server.host, self.server.port))
    }
}
