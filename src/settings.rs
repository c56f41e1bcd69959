//! Store settings shown on the contact and payment pages.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::{EcommerceError, Result};

/// Initial store profile, normally taken from the environment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreProfile {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub email: String,
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self { name: "ShoeStore".into(), address: String::new(), contact: String::new(), email: String::new() }
    }
}

/// Free-form settings object; the admin panel may add keys of its own.
#[derive(Clone, Debug, Default)]
pub struct Settings { values: Arc<RwLock<Map<String, Value>>> }

impl Settings {
    pub fn new(profile: &StoreProfile) -> Self {
        let values = match serde_json::to_value(profile) { Ok(Value::Object(map)) => map, _ => Map::new() };
        Self { values: Arc::new(RwLock::new(values)) }
    }

    pub async fn get(&self) -> Map<String, Value> { self.values.read().await.clone() }

    /// Shallow merge: top-level keys in `patch` overwrite or extend the current settings.
    pub async fn merge(&self, patch: Value) -> Result<()> {
        let Value::Object(patch) = patch else { return Err(EcommerceError::InvalidSettings) };
        let mut values = self.values.write().await;
        tracing::info!(keys = ?patch.keys().collect::<Vec<_>>(), "settings updated");
        values.extend(patch);
        Ok(())
    }
}
