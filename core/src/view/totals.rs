// core/src/view/totals.rs

use crate::reconcile::DisplayCartItem;
use crate::view::selection::SelectionSet;

/// Derived money summary for the checkout panel. All amounts in VND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
  /// Σ price × quantity over the *selected* rows only.
  pub subtotal: i64,
  /// Flat fee when anything is being bought, zero otherwise. Not derived
  /// from weight or distance.
  pub shipping_fee: i64,
  pub total: i64,
}

pub fn compute_totals(rows: &[DisplayCartItem], selection: &SelectionSet, shipping_flat_fee: i64) -> CartTotals {
  let subtotal: i64 = rows
    .iter()
    .filter(|r| r.available && selection.is_selected(r.line_id))
    .map(|r| r.price * i64::from(r.quantity))
    .sum();
  let shipping_fee = if subtotal > 0 { shipping_flat_fee } else { 0 };
  CartTotals {
    subtotal,
    shipping_fee,
    total: subtotal + shipping_fee,
  }
}
