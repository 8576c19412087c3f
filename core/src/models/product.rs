// core/src/models/product.rs

use serde::{Deserialize, Serialize};

/// One sellable unit of a product ("Hộp", "Vỉ", "Chai", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
  pub id: String,
  pub unit_name: String,
  #[serde(with = "crate::models::money::price_vnd")]
  pub price: i64,
  #[serde(default, with = "crate::models::money::price_vnd_opt")]
  pub original_price: Option<i64>,
}

/// Authoritative catalog product as returned by the backend, used both for
/// listings/search and for cart reconciliation. Transient: never persisted
/// client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: String,
  pub name: String,
  pub slug: String,
  #[serde(default)]
  pub images: Vec<String>,
  #[serde(default)]
  pub variants: Vec<ProductVariant>,
}

impl Product {
  /// First catalog image, if any. Cart rows fall back to their cached image
  /// when the catalog has none.
  pub fn primary_image(&self) -> Option<&str> {
    self.images.first().map(String::as_str)
  }

  /// Looks up a variant by its unit label (exact match).
  pub fn variant_by_unit(&self, unit_name: &str) -> Option<&ProductVariant> {
    self.variants.iter().find(|v| v.unit_name == unit_name)
  }

  pub fn variant_by_id(&self, variant_id: &str) -> Option<&ProductVariant> {
    self.variants.iter().find(|v| v.id == variant_id)
  }
}
