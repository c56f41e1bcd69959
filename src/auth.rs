//! Admin gate.
//!
//! Credential checks sit behind [`CredentialVerifier`] so the static pair used today
//! can be swapped for a real backend. Issued tokens are opaque and are not checked on
//! later admin requests.
//!
//! The pair is not hardcoded: it comes from `ADMIN_USERNAME` / `ADMIN_PASSWORD`, and
//! falls back to `admin@shoestore.local` / `shoestore-admin` when those are unset
//! (see [`crate::config`]). The token stays the fixed [`PLACEHOLDER_TOKEN`].

use serde::{Deserialize, Serialize};

/// Token handed back by [`StaticCredentials`].
pub const PLACEHOLDER_TOKEN: &str = "fake-jwt-token";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self { Self(value.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)] pub username: Option<String>,
    #[serde(default)] pub password: Option<String>,
}

pub trait CredentialVerifier: Send + Sync {
    /// Returns a session token when the pair is accepted.
    fn verify(&self, username: &str, password: &str) -> Option<SessionToken>;
}

/// A single fixed username/password pair.
#[derive(Clone)]
pub struct StaticCredentials { username: String, password: String }

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials").field("username", &self.username).field("password", &"[REDACTED]").finish()
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> Option<SessionToken> {
        (username == self.username && password == self.password).then(|| SessionToken::new(PLACEHOLDER_TOKEN))
    }
}
