use std::{fmt, net::SocketAddr};

use solana_sdk::signature::Keypair;

use crate::error::ClientError;

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEFAULT_LISTEN: &str = "0.0.0.0:3000";
pub const DEFAULT_STATS_URL: &str = "http://localhost:8080/update-stats";
pub const DEFAULT_AUTH_URL: &str = "http://localhost:8080/login";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Process configuration, read once from the environment.
#[derive(Clone)]
pub struct Config {
    /// Solana RPC endpoint.
    pub rpc_url: String,

    /// Base58 encoded keypair the server signs with.
    pub private_key: Option<String>,

    /// Address the duel routes are served on.
    pub listen: SocketAddr,

    /// Address of the session service, if it should run.
    pub session_listen: Option<SocketAddr>,

    /// Where fetched stats are forwarded.
    pub stats_url: String,

    /// Where logins are posted.
    pub auth_url: String,

    /// Whether a login provisions a missing player record.
    pub auto_initialize: bool,

    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let listen = get("LISTEN").unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen = parse_addr("LISTEN", &listen)?;
        let session_listen = get("SESSION_LISTEN")
            .map(|value| parse_addr("SESSION_LISTEN", &value))
            .transpose()?;
        let auto_initialize = get("AUTO_INITIALIZE")
            .map(|value| parse_bool("AUTO_INITIALIZE", &value))
            .transpose()?
            .unwrap_or(true);
        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            rpc_url: get("RPC").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            private_key: get("PRIVATE_KEY"),
            listen,
            session_listen,
            stats_url: get("STATS_URL").unwrap_or_else(|| DEFAULT_STATS_URL.to_string()),
            auth_url: get("AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            auto_initialize,
            cors_origins,
        })
    }

    /// Decodes the server keypair.
    pub fn keypair(&self) -> Result<Keypair, ClientError> {
        let private_key = self
            .private_key
            .as_deref()
            .ok_or(ClientError::MissingSigningKey)?;
        let bytes = bs58::decode(private_key.trim())
            .into_vec()
            .map_err(|_| ClientError::InvalidSigningKey)?;
        Keypair::try_from(bytes.as_slice()).map_err(|_| ClientError::InvalidSigningKey)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("listen", &self.listen)
            .field("session_listen", &self.session_listen)
            .field("stats_url", &self.stats_url)
            .field("auth_url", &self.auth_url)
            .field("auto_initialize", &self.auto_initialize)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

fn parse_addr(key: &'static str, value: &str) -> Result<SocketAddr, ClientError> {
    value.trim().parse().map_err(|_| ClientError::InvalidConfig {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ClientError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ClientError::InvalidConfig {
            key,
            value: value.to_string(),
        }),
    }
}
