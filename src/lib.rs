//! ShoeStore - in-memory storefront backend
//!
//! ## Features
//! - Product catalog with admin CRUD and sold-out toggling
//! - Cookie-held shopping cart (no server-side session)
//! - Order placement with manual payment verification and approval
//! - Store settings for the contact and payment pages
//! - Static storefront pages served from a sandboxed root

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use thiserror::Error;

pub mod auth;
pub mod config;
pub mod domain;
pub mod routes;
pub mod settings;
pub mod state;

pub use config::Config;
pub use state::AppState;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum EcommerceError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid price")]
    InvalidPrice,

    #[error("Product not found")]
    ProductNotFound,

    #[error("Order not found")]
    OrderNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Malformed cart cookie: {0}")]
    MalformedCart(String),

    #[error("Settings must be a JSON object")]
    InvalidSettings,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EcommerceError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::InvalidPrice | Self::MalformedCart(_) | Self::InvalidSettings => StatusCode::BAD_REQUEST,
            Self::ProductNotFound | Self::OrderNotFound => StatusCode::NOT_FOUND,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EcommerceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::InvalidCredentials => json!({"success": false, "error": self.to_string()}),
            Self::MalformedCart(detail) => {
                tracing::warn!(%detail, "rejecting malformed cart cookie");
                json!({"error": "Malformed cart cookie"})
            }
            Self::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                json!({"error": "Internal server error"})
            }
            _ => json!({"error": self.to_string()}),
        };
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, EcommerceError>;
