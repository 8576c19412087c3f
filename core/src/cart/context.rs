// core/src/cart/context.rs

//! The cart context: the single mutation gateway over the persisted store.
//!
//! Constructed once at application startup and passed by reference wherever
//! cart access is needed; nothing else writes to the repository. Every
//! mutation synchronously persists the full list.
//!
//! Lock guards are internal and never escape a method, so they cannot be
//! held across `.await` points by callers.

use crate::cart::repository::CartRepository;
use crate::error::{StorefrontError, StorefrontResult};
use crate::models::{CartLineItem, NewCartLine, VariantChange};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

pub struct CartContext {
  items: RwLock<Vec<CartLineItem>>,
  repo: Arc<dyn CartRepository>,
}

impl CartContext {
  /// Loads whatever the repository holds; a missing or corrupt store starts
  /// the session with an empty cart.
  pub fn new(repo: Arc<dyn CartRepository>) -> Self {
    let items = repo.load();
    debug!(line_count = items.len(), "Cart context initialized from store.");
    Self {
      items: RwLock::new(items),
      repo,
    }
  }

  /// Appends a new line item and returns it.
  ///
  /// Deliberately performs no dedup: adding the same product+variant twice
  /// creates two rows, matching the storefront's observed behavior.
  #[instrument(name = "cart::add_to_cart", skip(self, line), fields(product_id = %line.product_id, variant_id = %line.variant_id))]
  pub fn add_to_cart(&self, line: NewCartLine) -> CartLineItem {
    let item = CartLineItem::from_new(line);
    let mut guard = self.items.write();
    guard.push(item.clone());
    self.persist(&guard);
    debug!(line_id = %item.id, quantity = item.quantity, "Line item added to cart.");
    item
  }

  /// Sets an absolute quantity for one line. Requests outside `1..=u32::MAX`
  /// are clamped to the nearest bound, so the `quantity >= 1` invariant holds
  /// no matter how wild the caller's arithmetic went.
  #[instrument(name = "cart::update_quantity", skip(self))]
  pub fn update_quantity(&self, line_id: Uuid, quantity: i64) -> StorefrontResult<()> {
    let clamped = Self::clamp_quantity(quantity);
    let mut guard = self.items.write();
    let item = guard
      .iter_mut()
      .find(|i| i.id == line_id)
      .ok_or(StorefrontError::LineItemNotFound { line_id })?;
    item.quantity = clamped;
    self.persist(&guard);
    Ok(())
  }

  /// Replaces the variant-related fields of one line in place. A full
  /// replace, not a merge: `variant_id`, `unit_name` and `price` all change
  /// together; `id` and `quantity` are untouched.
  #[instrument(name = "cart::update_variant", skip(self, change), fields(variant_id = %change.variant_id))]
  pub fn update_variant(&self, line_id: Uuid, change: VariantChange) -> StorefrontResult<()> {
    let mut guard = self.items.write();
    let item = guard
      .iter_mut()
      .find(|i| i.id == line_id)
      .ok_or(StorefrontError::LineItemNotFound { line_id })?;
    item.variant_id = change.variant_id;
    item.unit_name = change.unit_name;
    item.price = change.price;
    self.persist(&guard);
    Ok(())
  }

  #[instrument(name = "cart::remove_from_cart", skip(self))]
  pub fn remove_from_cart(&self, line_id: Uuid) -> StorefrontResult<()> {
    let mut guard = self.items.write();
    let before = guard.len();
    guard.retain(|i| i.id != line_id);
    if guard.len() == before {
      return Err(StorefrontError::LineItemNotFound { line_id });
    }
    self.persist(&guard);
    Ok(())
  }

  /// Removes every line whose id is in `ids` with a single store write.
  /// Unknown ids are ignored.
  #[instrument(name = "cart::remove_selected", skip(self, ids), fields(requested = ids.len()))]
  pub fn remove_selected(&self, ids: &HashSet<Uuid>) {
    if ids.is_empty() {
      return;
    }
    let mut guard = self.items.write();
    let before = guard.len();
    guard.retain(|i| !ids.contains(&i.id));
    if guard.len() != before {
      self.persist(&guard);
      debug!(removed = before - guard.len(), "Selected lines removed from cart.");
    }
  }

  /// Sum of quantities across all rows (the header badge number), not the
  /// count of distinct rows.
  pub fn item_count(&self) -> u64 {
    self.items.read().iter().map(|i| u64::from(i.quantity)).sum()
  }

  /// Quantity requests saturate into `1..=u32::MAX`. A plain `as u32` cast
  /// would wrap `2^32` around to 0 and break the invariant.
  pub fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
  }

  /// Snapshot of the current line items.
  pub fn items(&self) -> Vec<CartLineItem> {
    self.items.read().clone()
  }

  pub fn is_empty(&self) -> bool {
    self.items.read().is_empty()
  }

  // A failed write keeps the in-memory cart authoritative for the session;
  // there is no user-visible error path for it.
  fn persist(&self, items: &[CartLineItem]) {
    if let Err(e) = self.repo.save(items) {
      warn!(error = %e, "Persisting cart to store failed; in-memory state retained.");
    }
  }
}
