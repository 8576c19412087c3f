// core/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a server-created order. The storefront only ever reads these;
/// transitions happen backend-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
  Pending,
  Confirmed,
  Shipping,
  Delivered,
  Cancelled,
  /// Forward compatibility with statuses this client does not know about.
  #[serde(other)]
  Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
  pub product_id: String,
  pub product_name: String,
  #[serde(default)]
  pub image: Option<String>,
  pub unit_name: String,
  #[serde(with = "crate::models::money::price_vnd")]
  pub price: i64,
  pub quantity: u32,
}

/// A server-created order with its line items, fetched read-only after an
/// external checkout submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
  pub id: String,
  /// Human-facing order code, when the backend issues one.
  #[serde(default)]
  pub code: Option<String>,
  pub status: OrderStatus,
  pub customer_name: String,
  pub phone: String,
  pub address: String,
  #[serde(default)]
  pub note: Option<String>,
  #[serde(default, with = "crate::models::money::price_vnd")]
  pub shipping_fee: i64,
  #[serde(with = "crate::models::money::price_vnd")]
  pub total: i64,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub items: Vec<OrderItem>,
}
