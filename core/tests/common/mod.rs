// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use nhathuoc::{
  CartLineItem, CartRepository, NewCartLine, Product, ProductSource, ProductVariant, StorefrontError,
  StorefrontResult,
};
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

static TRACING: Lazy<()> = Lazy::new(|| {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING);
}

// --- Catalog fixtures ---

pub fn variant(id: &str, unit_name: &str, price: i64) -> ProductVariant {
  ProductVariant {
    id: id.to_string(),
    unit_name: unit_name.to_string(),
    price,
    original_price: None,
  }
}

pub fn product(id: &str, name: &str, slug: &str, variants: Vec<ProductVariant>) -> Product {
  Product {
    id: id.to_string(),
    name: name.to_string(),
    slug: slug.to_string(),
    images: vec![format!("https://cdn.nhathuoc.example.vn/products/{}.jpg", slug)],
    variants,
  }
}

/// The running example from the cart page: product 2 sold per box ("Hộp")
/// or per blister ("Vỉ").
pub fn panadol() -> Product {
  product(
    "2",
    "Panadol Extra 500mg",
    "panadol-extra-500mg",
    vec![variant("2", "Hộp", 125_000), variant("3", "Vỉ", 13_000)],
  )
}

pub fn new_line(product_id: &str, variant_id: &str, unit_name: &str, price: i64, quantity: u32) -> NewCartLine {
  NewCartLine {
    product_id: product_id.to_string(),
    variant_id: variant_id.to_string(),
    name: format!("Sản phẩm {}", product_id),
    image: format!("cached/{}.jpg", product_id),
    unit_name: unit_name.to_string(),
    price,
    quantity,
  }
}

// --- Cart store doubles ---

/// Counts store writes so tests can assert "one save per mutation" and
/// "bulk remove writes once".
#[derive(Default)]
pub struct CountingCartRepository {
  items: Mutex<Vec<CartLineItem>>,
  pub saves: AtomicUsize,
}

impl CountingCartRepository {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn save_count(&self) -> usize {
    self.saves.load(Ordering::SeqCst)
  }
}

impl CartRepository for CountingCartRepository {
  fn load(&self) -> Vec<CartLineItem> {
    self.items.lock().unwrap().clone()
  }

  fn save(&self, items: &[CartLineItem]) -> StorefrontResult<()> {
    self.saves.fetch_add(1, Ordering::SeqCst);
    *self.items.lock().unwrap() = items.to_vec();
    Ok(())
  }
}

/// A store whose writes always fail, to exercise the "mutations survive a
/// broken store for the session" behavior.
#[derive(Default)]
pub struct FailingCartRepository;

impl CartRepository for FailingCartRepository {
  fn load(&self) -> Vec<CartLineItem> {
    Vec::new()
  }

  fn save(&self, _items: &[CartLineItem]) -> StorefrontResult<()> {
    Err(StorefrontError::Storage {
      source: anyhow::anyhow!("disk on fire"),
    })
  }
}

// --- Product source doubles ---

/// Serves a fixed catalog and records every batched lookup. Can be switched
/// into a failing mode mid-test to simulate the backend going away.
pub struct StaticProductSource {
  products: Mutex<Vec<Product>>,
  failing: AtomicBool,
  pub calls: AtomicUsize,
  pub requested_ids: Mutex<Vec<Vec<String>>>,
}

impl StaticProductSource {
  pub fn new(products: Vec<Product>) -> Self {
    Self {
      products: Mutex::new(products),
      failing: AtomicBool::new(false),
      calls: AtomicUsize::new(0),
      requested_ids: Mutex::new(Vec::new()),
    }
  }

  pub fn set_failing(&self, failing: bool) {
    self.failing.store(failing, Ordering::SeqCst);
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  pub fn set_products(&self, products: Vec<Product>) {
    *self.products.lock().unwrap() = products;
  }

  pub fn last_requested_ids(&self) -> Option<Vec<String>> {
    self.requested_ids.lock().unwrap().last().cloned()
  }
}

#[async_trait]
impl ProductSource for StaticProductSource {
  async fn products_by_ids(&self, product_ids: &[String]) -> StorefrontResult<Vec<Product>> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.requested_ids.lock().unwrap().push(product_ids.to_vec());
    if self.failing.load(Ordering::SeqCst) {
      return Err(StorefrontError::Api {
        message: "backend returned HTTP 502".to_string(),
      });
    }
    Ok(self.products.lock().unwrap().clone())
  }
}

/// A source that always fails, for the error-state path.
pub struct FailingProductSource;

#[async_trait]
impl ProductSource for FailingProductSource {
  async fn products_by_ids(&self, _product_ids: &[String]) -> StorefrontResult<Vec<Product>> {
    Err(StorefrontError::Api {
      message: "backend returned HTTP 502".to_string(),
    })
  }
}
