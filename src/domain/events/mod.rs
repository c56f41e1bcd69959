//! Domain events and their delivery
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DomainEvent {
    Product(ProductEvent),
    Order(OrderEvent),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProductEvent {
    Created { product_id: i64, name: String },
    Updated { product_id: i64 },
    Deleted { product_id: i64 },
    SoldToggled { product_id: i64, sold: bool },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OrderEvent {
    Placed { order_id: u64 },
    StatusChanged { order_id: u64, status: String },
    Approved { order_id: u64, email: String },
}

impl DomainEvent {
    /// NATS subject, e.g. `shoestore.order.approved`.
    pub fn subject(&self) -> String {
        let (aggregate, name) = match self {
            Self::Product(ProductEvent::Created { .. }) => ("product", "created"),
            Self::Product(ProductEvent::Updated { .. }) => ("product", "updated"),
            Self::Product(ProductEvent::Deleted { .. }) => ("product", "deleted"),
            Self::Product(ProductEvent::SoldToggled { .. }) => ("product", "sold_toggled"),
            Self::Order(OrderEvent::Placed { .. }) => ("order", "placed"),
            Self::Order(OrderEvent::StatusChanged { .. }) => ("order", "status_changed"),
            Self::Order(OrderEvent::Approved { .. }) => ("order", "approved"),
        };
        format!("shoestore.{aggregate}.{name}")
    }
}

/// Logs every event and forwards it to NATS when a client is configured.
#[derive(Clone, Default)]
pub struct EventPublisher { nats: Option<async_nats::Client> }

impl EventPublisher {
    pub fn new(nats: Option<async_nats::Client>) -> Self { Self { nats } }

    pub async fn publish(&self, event: DomainEvent) {
        match &event {
            DomainEvent::Order(OrderEvent::Approved { order_id, email }) => {
                // Customer notification stand-in; delivery happens downstream of NATS if at all.
                tracing::info!(order_id, email = %email, "Order {} approved for customer {}", order_id, email);
            }
            other => tracing::debug!(subject = %other.subject(), ?other, "domain event"),
        }

        let Some(client) = &self.nats else { return };
        let payload = match serde_json::to_vec(&event) {
            Ok(p) => p,
            Err(e) => { tracing::warn!(error = %e, "failed to encode domain event"); return; }
        };
        if let Err(e) = client.publish(event.subject(), payload.into()).await {
            tracing::warn!(error = %e, subject = %event.subject(), "failed to publish domain event");
        }
    }
}
