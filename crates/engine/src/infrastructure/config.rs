//! Engine configuration read from the process environment.

use std::net::SocketAddr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PLAYER_DB: &str = "players.db";

/// Which storage adapter backs the player registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerStore {
    Memory,
    Sqlite { path: String },
}

/// Runtime settings for the engine binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub player_store: PlayerStore,
    /// Raw `CORS_ALLOWED_ORIGINS`; `None` disables the CORS layer.
    pub cors_allowed_origins: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} is not a valid port: '{value}'")]
    InvalidPort { key: &'static str, value: String },
    #[error("PLAYER_STORE must be 'memory' or 'sqlite', got '{0}'")]
    UnknownStore(String),
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_host = get("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.into());

        let server_port = match get("SERVER_PORT")
            .map(|v| ("SERVER_PORT", v))
            .or_else(|| get("PORT").map(|v| ("PORT", v)))
        {
            Some((key, value)) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort { key, value })?,
            None => DEFAULT_PORT,
        };

        let player_store = match get("PLAYER_STORE")
            .map(|v| v.to_ascii_lowercase())
            .as_deref()
        {
            None | Some("memory") => PlayerStore::Memory,
            Some("sqlite") => PlayerStore::Sqlite {
                path: get("PLAYER_DB").unwrap_or_else(|| DEFAULT_PLAYER_DB.into()),
            },
            Some(other) => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        Ok(Self {
            server_host,
            server_port,
            player_store,
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS"),
        })
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.server_host, self.server_port).parse()?)
    }
}

/// Load `.env.local` then `.env` from the repository root, if present.
///
/// Values already set in the process environment win.
pub fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
