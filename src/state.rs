//! Application state shared across handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::{CredentialVerifier, StaticCredentials};
use crate::config::Config;
use crate::domain::aggregates::{Catalog, OrderBook};
use crate::domain::events::EventPublisher;
use crate::settings::Settings;

/// Every store the router touches. Clones share the same underlying data.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub orders: OrderBook,
    pub settings: Settings,
    pub auth: Arc<dyn CredentialVerifier>,
    pub events: EventPublisher,
    pub static_root: PathBuf,
}

impl AppState {
    pub fn new(config: &Config, nats: Option<async_nats::Client>) -> Self {
        Self {
            catalog: Catalog::seeded(),
            orders: OrderBook::new(),
            settings: Settings::new(&config.store),
            auth: Arc::new(StaticCredentials::new(config.admin_username.clone(), config.admin_password.clone())),
            events: EventPublisher::new(nats),
            static_root: config.static_root.clone(),
        }
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
        self.auth = verifier;
        self
    }
}
