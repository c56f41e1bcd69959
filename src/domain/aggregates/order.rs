//! Order Aggregate and the in-memory order book

use std::fmt;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::events::{DomainEvent, OrderEvent};
use crate::{EcommerceError, Result};

/// Order status. Admins may set arbitrary strings, which round-trip through `Other`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus { #[default] PendingVerification, Approved, Other(String) }

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() { "pending_verification" => Self::PendingVerification, "approved" => Self::Approved, _ => Self::Other(s) }
    }
}

impl From<OrderStatus> for String {
    fn from(s: OrderStatus) -> Self { s.to_string() }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::PendingVerification => f.write_str("pending_verification"), Self::Approved => f.write_str("approved"), Self::Other(s) => f.write_str(s) }
    }
}

/// Checkout payload. Shapes are whatever the storefront sends.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderRequest {
    #[serde(default)] pub items: Value,
    #[serde(default)] pub total: Value,
    #[serde(default)] pub customer_info: Value,
    #[serde(default)] pub payment_method: Value,
    /// Transaction id and payment screenshot reference.
    #[serde(default)] pub verification: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub items: Value,
    pub total: Value,
    pub customer_info: Value,
    pub payment_method: Value,
    pub verification: Value,
    pub date: String,
    pub status: OrderStatus,
}

impl Order {
    pub fn place(id: u64, r: OrderRequest) -> Self {
        Self {
            id, items: r.items, total: r.total, customer_info: r.customer_info, payment_method: r.payment_method,
            verification: r.verification, date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true), status: OrderStatus::PendingVerification,
        }
    }

    pub fn customer_email(&self) -> Option<&str> { self.customer_info.get("email").and_then(Value::as_str) }

    /// Overwrites the status and returns the events the change raises.
    pub fn set_status(&mut self, status: OrderStatus) -> Vec<DomainEvent> {
        self.status = status;
        let mut events = vec![DomainEvent::Order(OrderEvent::StatusChanged { order_id: self.id, status: self.status.to_string() })];
        if self.status == OrderStatus::Approved {
            match self.customer_email() {
                Some(email) => events.push(DomainEvent::Order(OrderEvent::Approved { order_id: self.id, email: email.to_string() })),
                None => tracing::warn!(order_id = self.id, "order approved without a customer email, skipping notification"),
            }
        }
        events
    }
}

/// Append-only order collection; ids are 1-based positions.
#[derive(Clone, Debug, Default)]
pub struct OrderBook { orders: Arc<RwLock<Vec<Order>>> }

impl OrderBook {
    pub fn new() -> Self { Self::default() }

    pub async fn place(&self, request: OrderRequest) -> Order {
        let mut orders = self.orders.write().await;
        let order = Order::place(orders.len() as u64 + 1, request);
        orders.push(order.clone());
        tracing::info!(order_id = order.id, "order placed");
        order
    }

    pub async fn list(&self) -> Vec<Order> { self.orders.read().await.clone() }

    pub async fn get(&self, id: u64) -> Result<Order> {
        self.orders.read().await.iter().find(|o| o.id == id).cloned().ok_or(EcommerceError::OrderNotFound)
    }

    pub async fn update_status(&self, id: u64, status: OrderStatus) -> Result<Vec<DomainEvent>> {
        let mut orders = self.orders.write().await;
        let order = orders.iter_mut().find(|o| o.id == id).ok_or(EcommerceError::OrderNotFound)?;
        tracing::info!(order_id = id, status = %status, "order status updated");
        Ok(order.set_status(status))
    }
}
