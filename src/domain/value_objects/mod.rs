//! Value Objects for the storefront

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Product price as sent by the admin panel: a JSON number or a numeric string.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() { return Err(PriceError::NotANumber); }
        if value == 0.0 { return Err(PriceError::Zero); }
        Ok(Self(value))
    }
    pub fn value(&self) -> f64 { self.0 }
}

impl TryFrom<&Value> for Price {
    type Error = PriceError;
    fn try_from(raw: &Value) -> Result<Self, Self::Error> {
        match raw {
            Value::Number(n) => Self::new(n.as_f64().ok_or(PriceError::NotANumber)?),
            Value::String(s) if s.trim().is_empty() => Err(PriceError::Zero),
            Value::String(s) => Self::new(s.trim().parse::<f64>().map_err(|_| PriceError::NotANumber)?),
            Value::Null => Err(PriceError::Zero),
            _ => Err(PriceError::NotANumber),
        }
    }
}

/// `Zero` covers the falsy inputs (`0`, `""`, `null`) that count as a missing field.
#[derive(Debug, Clone, PartialEq, Eq)] pub enum PriceError { Zero, NotANumber }
impl std::error::Error for PriceError {}
impl fmt::Display for PriceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::Zero => write!(f, "Price missing"), Self::NotANumber => write!(f, "Price is not a number") }
    }
}

/// Cart line quantity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    pub fn new(value: i64) -> Self { Self(value) }
    pub fn value(&self) -> i64 { self.0 }
    pub fn add(&self, other: Quantity) -> Self { Self(self.0.saturating_add(other.0)) }
}

impl Default for Quantity { fn default() -> Self { Self(1) } }
