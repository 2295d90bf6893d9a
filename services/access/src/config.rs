use serde::Deserialize;

use bodegix_core::config::Config;

use crate::domain::types::{
    DEFAULT_CODE_ATTEMPTS, DEFAULT_PUBLIC_BASE_URL, DEFAULT_QR_TTL_SECS, MAX_QR_TTL_SECS, QrPolicy,
};

/// Where QR sessions live. Lockers and access events are always read from
/// and written to Postgres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStoreKind {
    #[default]
    Postgres,
    /// Process-local; sessions are lost on restart and not shared between replicas.
    Memory,
}

/// Access service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct AccessConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret shared with the login flow that signs bearer tokens.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3114). Env var: `ACCESS_PORT`.
    #[serde(default = "default_port")]
    pub access_port: u16,
    #[serde(default = "default_ttl")]
    pub qr_ttl_secs: u32,
    #[serde(default = "default_max_ttl")]
    pub qr_max_ttl_secs: u32,
    /// Issue attempts before giving up on code collisions.
    #[serde(default = "default_code_attempts")]
    pub qr_code_attempts: u32,
    #[serde(default)]
    pub qr_session_store: SessionStoreKind,
    /// Origin used for `asUrl` payloads (e.g. "https://bodegix.app").
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Locker controller base URL. Unset means unlocks are only logged.
    pub unlock_url: Option<String>,
}

fn default_port() -> u16 {
    3114
}

fn default_ttl() -> u32 {
    DEFAULT_QR_TTL_SECS
}

fn default_max_ttl() -> u32 {
    MAX_QR_TTL_SECS
}

fn default_code_attempts() -> u32 {
    DEFAULT_CODE_ATTEMPTS
}

fn default_public_base_url() -> String {
    DEFAULT_PUBLIC_BASE_URL.to_owned()
}

impl Config for AccessConfig {}

impl AccessConfig {
    pub fn policy(&self) -> QrPolicy {
        QrPolicy {
            default_ttl_secs: self.qr_ttl_secs,
            max_ttl_secs: self.qr_max_ttl_secs,
            code_attempts: self.qr_code_attempts.max(1),
            public_base_url: self.public_base_url.clone(),
        }
    }

    /// `UNLOCK_URL`, ignoring an empty value.
    pub fn unlock_url(&self) -> Option<&str> {
        self.unlock_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}
