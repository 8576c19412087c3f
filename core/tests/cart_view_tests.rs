// tests/cart_view_tests.rs
mod common; // Reference the common module

use common::*;
use nhathuoc::{CartContext, CartView, InMemoryCartRepository, ReconcileFetcher, StorefrontError, UnmatchedPolicy};
use serial_test::serial;
use std::sync::Arc;

const SHIPPING: i64 = 15_000;

async fn view_with(cart: Arc<CartContext>, source: Arc<StaticProductSource>) -> CartView {
  let mut view = CartView::new(cart, ReconcileFetcher::new(source), UnmatchedPolicy::Drop, SHIPPING);
  view.refresh().await;
  view
}

#[tokio::test]
#[serial]
async fn totals_for_the_reference_cart() {
  setup_tracing();
  let cart = Arc::new(CartContext::new(Arc::new(InMemoryCartRepository::new())));
  // 2 × Panadol "Hộp" at 125 000 ₫.
  cart.add_to_cart(new_line("2", "2", "Hộp", 125_000, 2));

  let view = view_with(cart, Arc::new(StaticProductSource::new(vec![panadol()]))).await;

  assert!(view.all_selected()); // everything selected by default
  let totals = view.totals();
  assert_eq!(totals.subtotal, 250_000);
  assert_eq!(totals.shipping_fee, SHIPPING);
  assert_eq!(totals.total, 265_000);
}

#[tokio::test]
#[serial]
async fn empty_cart_has_all_zero_totals() {
  setup_tracing();
  let cart = Arc::new(CartContext::new(Arc::new(InMemoryCartRepository::new())));
  let source = Arc::new(StaticProductSource::new(vec![panadol()]));
  let view = view_with(cart, source.clone()).await;

  assert!(view.rows().is_empty());
  assert_eq!(source.call_count(), 0); // no fetch for an empty cart
  let totals = view.totals();
  assert_eq!(totals.subtotal, 0);
  assert_eq!(totals.shipping_fee, 0); // no shipping on an empty selection
  assert_eq!(totals.total, 0);
}

#[tokio::test]
#[serial]
async fn deselecting_never_increases_the_subtotal() {
  setup_tracing();
  let cart = Arc::new(CartContext::new(Arc::new(InMemoryCartRepository::new())));
  cart.add_to_cart(new_line("2", "2", "Hộp", 125_000, 2));
  cart.add_to_cart(new_line("5", "7", "Chai", 40_000, 1));
  let catalog = vec![
    panadol(),
    product("5", "Nước muối sinh lý", "nuoc-muoi-sinh-ly", vec![variant("7", "Chai", 40_000)]),
  ];
  let mut view = view_with(cart, Arc::new(StaticProductSource::new(catalog))).await;

  let full = view.totals();
  assert_eq!(full.subtotal, 290_000);

  let second_row = view.rows()[1].line_id;
  view.toggle_selection(second_row);
  let partial = view.totals();
  assert_eq!(partial.subtotal, 250_000);
  assert!(partial.subtotal <= full.subtotal);
  assert!(!view.all_selected()); // "select all" reflects partial selection

  // Re-selecting restores the full subtotal and the select-all state.
  view.toggle_selection(second_row);
  assert_eq!(view.totals().subtotal, full.subtotal);
  assert!(view.all_selected());
}

#[tokio::test]
#[serial]
async fn deselecting_everything_drops_shipping_to_zero() {
  setup_tracing();
  let cart = Arc::new(CartContext::new(Arc::new(InMemoryCartRepository::new())));
  cart.add_to_cart(new_line("2", "2", "Hộp", 125_000, 2));
  let mut view = view_with(cart, Arc::new(StaticProductSource::new(vec![panadol()]))).await;

  view.set_all_selected(false);
  let totals = view.totals();
  assert_eq!(totals.subtotal, 0);
  assert_eq!(totals.shipping_fee, 0);
  assert_eq!(totals.total, 0);
}

#[tokio::test]
#[serial]
async fn switching_variant_updates_row_store_and_totals() {
  setup_tracing();
  let cart = Arc::new(CartContext::new(Arc::new(InMemoryCartRepository::new())));
  cart.add_to_cart(new_line("2", "2", "Hộp", 125_000, 2));
  let mut view = view_with(cart.clone(), Arc::new(StaticProductSource::new(vec![panadol()]))).await;

  let line_id = view.rows()[0].line_id;
  view.switch_variant(line_id, "3").unwrap(); // Hộp -> Vỉ

  let row = &view.rows()[0];
  assert_eq!(row.variant_id, "3");
  assert_eq!(row.unit_name, "Vỉ");
  assert_eq!(row.price, 13_000);
  assert_eq!(row.quantity, 2); // quantity survives the switch

  // The store saw the same full replace.
  let stored = &cart.items()[0];
  assert_eq!(stored.variant_id, "3");
  assert_eq!(stored.unit_name, "Vỉ");
  assert_eq!(stored.price, 13_000);
  assert_eq!(stored.quantity, 2);

  assert_eq!(view.totals().subtotal, 26_000);
}

#[tokio::test]
#[serial]
async fn switching_to_an_unknown_variant_is_rejected() {
  setup_tracing();
  let cart = Arc::new(CartContext::new(Arc::new(InMemoryCartRepository::new())));
  cart.add_to_cart(new_line("2", "2", "Hộp", 125_000, 1));
  let mut view = view_with(cart.clone(), Arc::new(StaticProductSource::new(vec![panadol()]))).await;

  let line_id = view.rows()[0].line_id;
  assert!(matches!(
    view.switch_variant(line_id, "99"),
    Err(StorefrontError::VariantNotOffered { .. })
  ));
  // Nothing changed anywhere.
  assert_eq!(view.rows()[0].variant_id, "2");
  assert_eq!(cart.items()[0].variant_id, "2");
}

#[tokio::test]
#[serial]
async fn quantity_stepper_clamps_at_one_and_grows_unbounded() {
  setup_tracing();
  let cart = Arc::new(CartContext::new(Arc::new(InMemoryCartRepository::new())));
  cart.add_to_cart(new_line("2", "2", "Hộp", 125_000, 2));
  let mut view = view_with(cart.clone(), Arc::new(StaticProductSource::new(vec![panadol()]))).await;
  let line_id = view.rows()[0].line_id;

  view.decrement_quantity(line_id).unwrap(); // 2 -> 1
  view.decrement_quantity(line_id).unwrap(); // clamped
  view.decrement_quantity(line_id).unwrap(); // clamped
  assert_eq!(view.rows()[0].quantity, 1);
  assert_eq!(cart.items()[0].quantity, 1);

  for _ in 0..100 {
    view.increment_quantity(line_id).unwrap();
  }
  assert_eq!(view.rows()[0].quantity, 101);
  assert_eq!(view.totals().subtotal, 125_000 * 101);
}

#[tokio::test]
#[serial]
async fn set_quantity_saturates_row_and_store_alike() {
  setup_tracing();
  let cart = Arc::new(CartContext::new(Arc::new(InMemoryCartRepository::new())));
  cart.add_to_cart(new_line("2", "2", "Hộp", 125_000, 2));
  let mut view = view_with(cart.clone(), Arc::new(StaticProductSource::new(vec![panadol()]))).await;
  let line_id = view.rows()[0].line_id;

  // 2^32 would cast to 0; both the row and the store must saturate instead.
  view.set_quantity(line_id, 1_i64 << 32).unwrap();
  assert_eq!(view.rows()[0].quantity, u32::MAX);
  assert_eq!(cart.items()[0].quantity, u32::MAX);

  view.set_quantity(line_id, -4).unwrap();
  assert_eq!(view.rows()[0].quantity, 1);
  assert_eq!(cart.items()[0].quantity, 1);
}

#[tokio::test]
#[serial]
async fn remove_selected_clears_rows_and_store_together() {
  setup_tracing();
  let cart = Arc::new(CartContext::new(Arc::new(InMemoryCartRepository::new())));
  cart.add_to_cart(new_line("2", "2", "Hộp", 125_000, 2));
  cart.add_to_cart(new_line("5", "7", "Chai", 40_000, 1));
  let catalog = vec![
    panadol(),
    product("5", "Nước muối sinh lý", "nuoc-muoi-sinh-ly", vec![variant("7", "Chai", 40_000)]),
  ];
  let mut view = view_with(cart.clone(), Arc::new(StaticProductSource::new(catalog))).await;

  // Uncheck the first row, then remove the (remaining) selection.
  let first = view.rows()[0].line_id;
  view.toggle_selection(first);
  view.remove_selected();

  assert_eq!(view.rows().len(), 1);
  assert_eq!(view.rows()[0].line_id, first);
  assert_eq!(cart.items().len(), 1);
  // The surviving row is selected again by default.
  assert!(view.all_selected());
}

#[tokio::test]
#[serial]
async fn removing_a_single_row_updates_totals() {
  setup_tracing();
  let cart = Arc::new(CartContext::new(Arc::new(InMemoryCartRepository::new())));
  cart.add_to_cart(new_line("2", "2", "Hộp", 125_000, 2));
  let mut view = view_with(cart.clone(), Arc::new(StaticProductSource::new(vec![panadol()]))).await;

  let line_id = view.rows()[0].line_id;
  view.remove_row(line_id).unwrap();

  assert!(view.rows().is_empty());
  assert!(cart.is_empty());
  assert_eq!(view.totals().total, 0);
}

#[tokio::test]
#[serial]
async fn flagged_rows_are_excluded_from_selection_and_totals() {
  setup_tracing();
  let cart = Arc::new(CartContext::new(Arc::new(InMemoryCartRepository::new())));
  cart.add_to_cart(new_line("2", "2", "Hộp", 125_000, 2));
  let ghost = cart.add_to_cart(new_line("404", "1", "Hộp", 50_000, 1));

  let mut view = CartView::new(
    cart,
    ReconcileFetcher::new(Arc::new(StaticProductSource::new(vec![panadol()]))),
    UnmatchedPolicy::Flag,
    SHIPPING,
  );
  view.refresh().await;

  assert_eq!(view.rows().len(), 2);
  assert!(!view.is_selected(ghost.id));
  // Toggling an unavailable row is a no-op.
  view.toggle_selection(ghost.id);
  assert!(!view.is_selected(ghost.id));

  let totals = view.totals();
  assert_eq!(totals.subtotal, 250_000); // the flagged 50 000 ₫ line does not count
  assert_eq!(totals.total, 265_000);
}
