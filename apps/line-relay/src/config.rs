//! Process configuration, read once at start-up.

use std::{env, fmt, net::SocketAddr};

const DEFAULT_BIND: &str = "0.0.0.0:1323";
pub const DEFAULT_API_BASE: &str = "https://api.line.me";

const REPLY_PATH: &str = "v2/bot/message/reply";
const PUSH_PATH: &str = "v2/bot/message/push";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid BIND address `{value}`: {source}")]
    InvalidBind {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub bind: SocketAddr,
    pub api_base: String,
    access_token: String,
}

impl RelayConfig {
    pub fn new(bind: SocketAddr, api_base: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            bind,
            api_base: api_base.into(),
            access_token: access_token.into(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("BIND").unwrap_or_else(|| DEFAULT_BIND.into());
        let bind = bind_raw
            .parse()
            .map_err(|source| ConfigError::InvalidBind {
                value: bind_raw.clone(),
                source,
            })?;
        let api_base = lookup("LINE_API_BASE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.into());
        let access_token = lookup("ACCESS_TOKEN")
            .filter(|v| !v.trim().is_empty())
            .or_else(|| lookup("LINE_CHANNEL_ACCESS_TOKEN"))
            .unwrap_or_default();

        Ok(Self::new(bind, api_base, access_token.trim()))
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn has_access_token(&self) -> bool {
        !self.access_token.is_empty()
    }

    pub fn reply_url(&self) -> String {
        self.endpoint(REPLY_PATH)
    }

    pub fn push_url(&self) -> String {
        self.endpoint(PUSH_PATH)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path)
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("bind", &self.bind)
            .field("api_base", &self.api_base)
            .field("access_token", &if self.has_access_token() { "<redacted>" } else { "<unset>" })
            .finish()
    }
}
