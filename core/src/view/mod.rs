// core/src/view/mod.rs

//! Cart-view state: merged display rows, the selection set and derived
//! totals, plus the row-level edit operations the cart page exposes.
//!
//! All catalog data flowing through here is display-only. The persisted
//! store changes exclusively through the injected `CartContext`, and only on
//! explicit user actions (quantity steps, variant switches, removals).

pub mod selection;
pub mod totals;

pub use selection::SelectionSet;
pub use totals::{compute_totals, CartTotals};

use crate::cart::CartContext;
use crate::error::{StorefrontError, StorefrontResult};
use crate::models::VariantChange;
use crate::reconcile::{
  merge_cart_with_products, DisplayCartItem, ReconcileFetcher, ReconcileResponse, UnmatchedPolicy,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

pub struct CartView {
  cart: Arc<CartContext>,
  fetcher: ReconcileFetcher,
  policy: UnmatchedPolicy,
  shipping_flat_fee: i64,
  rows: Vec<DisplayCartItem>,
  selection: SelectionSet,
  applied_generation: u64,
  /// Generic error state surfaced inline on the cart page after a failed
  /// reconciliation; cleared by the next response that actually applies.
  last_error: Option<String>,
}

impl CartView {
  pub fn new(cart: Arc<CartContext>, fetcher: ReconcileFetcher, policy: UnmatchedPolicy, shipping_flat_fee: i64) -> Self {
    Self {
      cart,
      fetcher,
      policy,
      shipping_flat_fee,
      rows: Vec::new(),
      selection: SelectionSet::new(),
      applied_generation: 0,
      last_error: None,
    }
  }

  /// Re-runs reconciliation against the current cart contents and applies
  /// the result unless a newer fetch has started in the meantime. Called on
  /// mount and whenever the cart line set changes.
  ///
  /// On failure the previous rows stay on screen, an inline error message is
  /// set, and the persisted store is untouched.
  #[instrument(name = "view::refresh", skip(self))]
  pub async fn refresh(&mut self) {
    let items = self.cart.items();
    match self.fetcher.fetch(&items).await {
      Ok(response) => {
        self.apply_reconciliation(response);
      }
      Err(e) => {
        warn!(error = %e, "Cart reconciliation failed; keeping previous rows.");
        self.last_error = Some("Không thể tải dữ liệu giỏ hàng. Vui lòng thử lại.".to_string());
      }
    }
  }

  /// Merges a reconciliation response into display rows. Returns false and
  /// changes nothing when the response is stale, i.e. an older request
  /// landed after a newer one already applied.
  pub fn apply_reconciliation(&mut self, response: ReconcileResponse) -> bool {
    if response.generation <= self.applied_generation
      || response.generation < self.fetcher.latest_generation()
    {
      debug!(
        response_generation = response.generation,
        applied_generation = self.applied_generation,
        latest_generation = self.fetcher.latest_generation(),
        "Discarding stale reconciliation response."
      );
      return false;
    }
    self.applied_generation = response.generation;
    let items = self.cart.items();
    self.rows = merge_cart_with_products(&items, &response.products, self.policy);
    // New list identity: selection defaults back to "all selected".
    self.selection.reset_all(&self.rows);
    // Whatever set the inline error is older than this response.
    self.last_error = None;
    true
  }

  pub fn rows(&self) -> &[DisplayCartItem] {
    &self.rows
  }

  pub fn last_error(&self) -> Option<&str> {
    self.last_error.as_deref()
  }

  pub fn totals(&self) -> CartTotals {
    compute_totals(&self.rows, &self.selection, self.shipping_flat_fee)
  }

  // --- selection ---

  pub fn toggle_selection(&mut self, line_id: Uuid) {
    self.selection.toggle(line_id, &self.rows);
  }

  pub fn set_all_selected(&mut self, on: bool) {
    self.selection.set_all(&self.rows, on);
  }

  pub fn all_selected(&self) -> bool {
    self.selection.all_selected(&self.rows)
  }

  pub fn is_selected(&self, line_id: Uuid) -> bool {
    self.selection.is_selected(line_id)
  }

  // --- row edits (each one writes through the cart context) ---

  /// Quantity stepper "+": no upper bound.
  pub fn increment_quantity(&mut self, line_id: Uuid) -> StorefrontResult<()> {
    let current = self.row_quantity(line_id)?;
    self.set_quantity(line_id, i64::from(current) + 1)
  }

  /// Quantity stepper "−": clamped at 1.
  pub fn decrement_quantity(&mut self, line_id: Uuid) -> StorefrontResult<()> {
    let current = self.row_quantity(line_id)?;
    self.set_quantity(line_id, i64::from(current) - 1)
  }

  pub fn set_quantity(&mut self, line_id: Uuid, quantity: i64) -> StorefrontResult<()> {
    self.cart.update_quantity(line_id, quantity)?;
    let clamped = CartContext::clamp_quantity(quantity);
    if let Some(row) = self.rows.iter_mut().find(|r| r.line_id == line_id) {
      row.quantity = clamped;
    }
    Ok(())
  }

  /// Variant-switch button on a row: a full replace of the line's variant
  /// fields with the chosen unit's id/label/price.
  #[instrument(name = "view::switch_variant", skip(self))]
  pub fn switch_variant(&mut self, line_id: Uuid, variant_id: &str) -> StorefrontResult<()> {
    let row = self
      .rows
      .iter_mut()
      .find(|r| r.line_id == line_id)
      .ok_or(StorefrontError::LineItemNotFound { line_id })?;
    let variant = row
      .variants
      .iter()
      .find(|v| v.id == variant_id)
      .ok_or_else(|| StorefrontError::VariantNotOffered {
        line_id,
        variant_id: variant_id.to_string(),
      })?
      .clone();

    self.cart.update_variant(
      line_id,
      VariantChange {
        variant_id: variant.id.clone(),
        unit_name: variant.unit_name.clone(),
        price: variant.price,
      },
    )?;

    row.variant_id = variant.id;
    row.unit_name = variant.unit_name;
    row.price = variant.price;
    Ok(())
  }

  /// Trash icon on a single row.
  pub fn remove_row(&mut self, line_id: Uuid) -> StorefrontResult<()> {
    self.cart.remove_from_cart(line_id)?;
    self.rows.retain(|r| r.line_id != line_id);
    self.selection.reset_all(&self.rows);
    Ok(())
  }

  /// "Remove selected": one atomic store write for the whole checked set.
  #[instrument(name = "view::remove_selected", skip(self), fields(selected = self.selection.len()))]
  pub fn remove_selected(&mut self) {
    let ids = self.selection.selected_ids().clone();
    if ids.is_empty() {
      return;
    }
    self.cart.remove_selected(&ids);
    self.rows.retain(|r| !ids.contains(&r.line_id));
    self.selection.reset_all(&self.rows);
  }

  fn row_quantity(&self, line_id: Uuid) -> StorefrontResult<u32> {
    self
      .rows
      .iter()
      .find(|r| r.line_id == line_id)
      .map(|r| r.quantity)
      .ok_or(StorefrontError::LineItemNotFound { line_id })
  }
}
