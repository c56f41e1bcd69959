//! Cart Aggregate
//!
//! The cart lives entirely in the client's `cart` cookie as a JSON array. The cookie
//! jar handles percent-encoding on the wire; this codec only sees the plain JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::value_objects::Quantity;
use crate::{EcommerceError, Result};

pub const CART_COOKIE: &str = "cart";

/// One cart line. Fields beyond `id` and `quantity` are kept verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    #[serde(default)]
    pub quantity: Quantity,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart { items: Vec<CartItem> }

impl Cart {
    /// Parses the decoded cookie value; an absent cookie is an empty cart.
    pub fn from_cookie(value: Option<&str>) -> Result<Self> {
        let Some(value) = value else { return Ok(Self::default()) };
        serde_json::from_str(value).map_err(|e| EcommerceError::MalformedCart(e.to_string()))
    }

    pub fn to_cookie_value(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| EcommerceError::Internal(e.to_string()))
    }

    pub fn item_count(&self) -> usize { self.items.len() }

    /// Bumps the quantity of the line with the same id, or appends the item as sent.
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.add(item.quantity);
        } else {
            self.items.push(item);
        }
    }
}
