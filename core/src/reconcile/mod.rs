// core/src/reconcile/mod.rs

//! Fetching authoritative product data for the cart.
//!
//! Reconciliation re-runs whenever the set of cart lines changes. Requests
//! are not cancelled mid-flight; instead each fetch is stamped with a
//! monotonically increasing generation and the view applies a response only
//! if no newer fetch has started since, so a slow stale response can never
//! overwrite fresher data.

pub mod merge;

pub use merge::{merge_cart_with_products, DisplayCartItem, UnmatchedPolicy};

use crate::error::StorefrontResult;
use crate::models::{CartLineItem, Product};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Where reconciled product data comes from. Implemented by `ApiClient`;
/// tests substitute fakes.
#[async_trait]
pub trait ProductSource: Send + Sync {
  async fn products_by_ids(&self, product_ids: &[String]) -> StorefrontResult<Vec<Product>>;
}

/// A fetch result stamped with the generation of the request that produced
/// it. Consumers compare generations before applying.
#[derive(Debug, Clone)]
pub struct ReconcileResponse {
  pub generation: u64,
  pub products: Vec<Product>,
}

pub struct ReconcileFetcher {
  source: Arc<dyn ProductSource>,
  generation: AtomicU64,
}

impl ReconcileFetcher {
  pub fn new(source: Arc<dyn ProductSource>) -> Self {
    Self {
      source,
      generation: AtomicU64::new(0),
    }
  }

  /// Generation of the newest fetch started so far.
  pub fn latest_generation(&self) -> u64 {
    self.generation.load(Ordering::SeqCst)
  }

  /// Fetches catalog data for the distinct product ids in `items` as one
  /// batched request. An empty cart issues no request at all and resolves to
  /// an empty product list.
  #[instrument(name = "reconcile::fetch", skip(self, items), fields(line_count = items.len()))]
  pub async fn fetch(&self, items: &[CartLineItem]) -> StorefrontResult<ReconcileResponse> {
    let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

    if items.is_empty() {
      debug!(generation, "Cart is empty; skipping reconciliation request.");
      return Ok(ReconcileResponse {
        generation,
        products: Vec::new(),
      });
    }

    let ids = distinct_product_ids(items);
    let products = self.source.products_by_ids(&ids).await?;
    debug!(
      generation,
      requested = ids.len(),
      returned = products.len(),
      "Reconciliation fetch completed."
    );
    Ok(ReconcileResponse { generation, products })
  }
}

/// Distinct product ids in first-seen order.
fn distinct_product_ids(items: &[CartLineItem]) -> Vec<String> {
  let mut seen = HashSet::new();
  items
    .iter()
    .filter(|line| seen.insert(line.product_id.clone()))
    .map(|line| line.product_id.clone())
    .collect()
}
