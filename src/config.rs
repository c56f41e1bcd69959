//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 5000)
//! - `STATIC_ROOT` - Directory the storefront pages are served from (default: public)
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD` - Admin panel credentials
//! - `NATS_URL` - Optional NATS server for domain events
//! - `STORE_NAME`, `STORE_ADDRESS`, `STORE_CONTACT`, `STORE_EMAIL` - Initial store settings

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::settings::StoreProfile;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_ADMIN_USERNAME: &str = "admin@shoestore.local";
const DEFAULT_ADMIN_PASSWORD: &str = "shoestore-admin";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub static_root: PathBuf,
    pub admin_username: String,
    pub admin_password: String,
    pub nats_url: Option<String>,
    pub store: StoreProfile,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("static_root", &self.static_root)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"[REDACTED]")
            .field("nats_url", &self.nats_url)
            .field("store", &self.store)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            static_root: PathBuf::from("public"),
            admin_username: DEFAULT_ADMIN_USERNAME.into(),
            admin_password: DEFAULT_ADMIN_PASSWORD.into(),
            nats_url: None,
            store: StoreProfile::default(),
        }
    }
}

impl Config {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = match var("HOST") {
            Some(h) => h.parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidEnvVar("HOST".into(), e.to_string()))?,
            None => defaults.host,
        };
        let port = match var("PORT") {
            Some(p) => p.parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidEnvVar("PORT".into(), e.to_string()))?,
            None => defaults.port,
        };

        Ok(Self {
            host,
            port,
            static_root: var("STATIC_ROOT").map_or(defaults.static_root, PathBuf::from),
            admin_username: var("ADMIN_USERNAME").unwrap_or(defaults.admin_username),
            admin_password: var("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
            nats_url: var("NATS_URL"),
            store: StoreProfile {
                name: var("STORE_NAME").unwrap_or(defaults.store.name),
                address: var("STORE_ADDRESS").unwrap_or(defaults.store.address),
                contact: var("STORE_CONTACT").unwrap_or(defaults.store.contact),
                email: var("STORE_EMAIL").unwrap_or(defaults.store.email),
            },
        })
    }

    pub fn socket_addr(&self) -> SocketAddr { SocketAddr::new(self.host, self.port) }
}
