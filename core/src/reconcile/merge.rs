// core/src/reconcile/merge.rs

//! Pure merge of persisted cart lines with authoritative catalog data.
//!
//! The merge never writes anywhere: the persisted store is only ever touched
//! by explicit user actions through the cart context. Running the merge any
//! number of times on the same inputs yields the same output.

use crate::models::{CartLineItem, Product, ProductVariant};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// What to do with a cart line whose product id has no match in the
/// reconciled catalog data (deleted/discontinued server-side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedPolicy {
  /// Omit the row from display; the persisted line is left untouched and
  /// reappears if the product is later restored.
  #[default]
  Drop,
  /// Keep the row, marked unavailable, so the UI can tell the user the item
  /// is no longer sold. Unavailable rows are excluded from totals.
  Flag,
}

/// One rendered cart row: a line item refreshed with live catalog fields.
/// Derived, recomputed on every reconciliation; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayCartItem {
  pub line_id: Uuid,
  pub product_id: String,
  pub variant_id: String,
  pub name: String,
  pub image: String,
  pub slug: Option<String>,
  pub unit_name: String,
  /// Live price (VND) for the stored unit, falling back to the line's cached
  /// price when the catalog no longer offers that unit.
  pub price: i64,
  pub quantity: u32,
  /// All units the product currently offers, for the variant-switch UI.
  pub variants: Vec<ProductVariant>,
  /// False only under `UnmatchedPolicy::Flag`.
  pub available: bool,
}

impl DisplayCartItem {
  fn matched(line: &CartLineItem, product: &Product) -> Self {
    let price = product
      .variant_by_unit(&line.unit_name)
      .map(|v| v.price)
      .unwrap_or(line.price);
    Self {
      line_id: line.id,
      product_id: line.product_id.clone(),
      variant_id: line.variant_id.clone(),
      name: product.name.clone(),
      image: product
        .primary_image()
        .map(str::to_string)
        .unwrap_or_else(|| line.image.clone()),
      slug: Some(product.slug.clone()),
      unit_name: line.unit_name.clone(),
      price,
      quantity: line.quantity,
      variants: product.variants.clone(),
      available: true,
    }
  }

  fn unavailable(line: &CartLineItem) -> Self {
    Self {
      line_id: line.id,
      product_id: line.product_id.clone(),
      variant_id: line.variant_id.clone(),
      name: line.name.clone(),
      image: line.image.clone(),
      slug: None,
      unit_name: line.unit_name.clone(),
      price: line.price,
      quantity: line.quantity,
      variants: Vec::new(),
      available: false,
    }
  }
}

/// Merges cart lines with reconciled products into display rows, in cart
/// order. Lookup is by exact product id through a prebuilt index, so the
/// cost stays linear in lines + products.
pub fn merge_cart_with_products(
  items: &[CartLineItem],
  products: &[Product],
  policy: UnmatchedPolicy,
) -> Vec<DisplayCartItem> {
  let by_id: HashMap<&str, &Product> = products.iter().map(|p| (p.id.as_str(), p)).collect();

  items
    .iter()
    .filter_map(|line| match by_id.get(line.product_id.as_str()) {
      Some(product) => Some(DisplayCartItem::matched(line, product)),
      None => match policy {
        UnmatchedPolicy::Drop => {
          debug!(line_id = %line.id, product_id = %line.product_id, "Product missing server-side; dropping row from display.");
          None
        }
        UnmatchedPolicy::Flag => Some(DisplayCartItem::unavailable(line)),
      },
    })
    .collect()
}
