// core/src/models/cart_item.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One persisted cart row.
///
/// `id` identifies the row itself, not the product: the same product can sit
/// on several rows with different variants, and repeated adds of the same
/// product+variant pair create separate rows (no dedup is performed).
///
/// `product_id`/`variant_id` reference catalog entities on the backend and
/// are not validated locally; validity is only established when the cart is
/// reconciled against the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
  pub id: Uuid,
  pub product_id: String,
  pub variant_id: String,
  pub name: String,
  pub image: String,
  /// Unit/variant label shown on the row, e.g. "Hộp" or "Vỉ".
  pub unit_name: String,
  /// Price snapshot (VND) taken at add time; refreshed for display during
  /// reconciliation but only written back on an explicit variant change.
  pub price: i64,
  /// Always >= 1; decrements below 1 are clamped.
  pub quantity: u32,
  pub added_at: DateTime<Utc>,
}

/// Input for `CartContext::add_to_cart`.
#[derive(Debug, Clone)]
pub struct NewCartLine {
  pub product_id: String,
  pub variant_id: String,
  pub name: String,
  pub image: String,
  pub unit_name: String,
  pub price: i64,
  pub quantity: u32,
}

/// Variant-replacement payload for `CartContext::update_variant`.
/// A full replace of the variant-related fields; `id` and `quantity` are
/// never touched by it.
#[derive(Debug, Clone)]
pub struct VariantChange {
  pub variant_id: String,
  pub unit_name: String,
  pub price: i64,
}

impl CartLineItem {
  pub fn from_new(line: NewCartLine) -> Self {
    Self {
      id: Uuid::new_v4(),
      product_id: line.product_id,
      variant_id: line.variant_id,
      name: line.name,
      image: line.image,
      unit_name: line.unit_name,
      price: line.price,
      quantity: line.quantity.max(1),
      added_at: Utc::now(),
    }
  }
}
