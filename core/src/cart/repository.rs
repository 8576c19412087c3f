// core/src/cart/repository.rs

//! Durable storage behind the cart context.
//!
//! The store is a plain ordered list of line items behind a small load/save
//! interface, so the business logic never cares whether it is backed by a
//! JSON file, an in-memory vector, or anything else.

use crate::error::{StorefrontError, StorefrontResult};
use crate::models::CartLineItem;
use anyhow::Context as AnyhowContext;
use parking_lot::RwLock;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

pub trait CartRepository: Send + Sync {
  /// Reads the persisted list. A missing or corrupt store is treated as an
  /// empty cart, never as an error.
  fn load(&self) -> Vec<CartLineItem>;

  /// Replaces the persisted list with `items` in one write.
  fn save(&self, items: &[CartLineItem]) -> StorefrontResult<()>;
}

/// File-backed store: one JSON document holding the full line-item list.
/// The client-side analog of the browser's localStorage cart key.
pub struct JsonFileCartRepository {
  path: PathBuf,
}

impl JsonFileCartRepository {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

impl CartRepository for JsonFileCartRepository {
  fn load(&self) -> Vec<CartLineItem> {
    let raw = match fs::read_to_string(&self.path) {
      Ok(raw) => raw,
      Err(_) => return Vec::new(), // no store yet
    };
    match serde_json::from_str(&raw) {
      Ok(items) => items,
      Err(e) => {
        warn!(path = %self.path.display(), error = %e, "Cart store is corrupt; starting from an empty cart.");
        Vec::new()
      }
    }
  }

  fn save(&self, items: &[CartLineItem]) -> StorefrontResult<()> {
    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
          .with_context(|| format!("creating cart store directory {}", parent.display()))
          .map_err(|source| StorefrontError::Storage { source })?;
      }
    }
    let json = serde_json::to_string_pretty(items)?;
    fs::write(&self.path, json)
      .with_context(|| format!("writing cart store {}", self.path.display()))
      .map_err(|source| StorefrontError::Storage { source })?;
    Ok(())
  }
}

/// Volatile store for tests and ephemeral sessions.
#[derive(Default)]
pub struct InMemoryCartRepository {
  items: RwLock<Vec<CartLineItem>>,
}

impl InMemoryCartRepository {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_items(items: Vec<CartLineItem>) -> Self {
    Self {
      items: RwLock::new(items),
    }
  }
}

impl CartRepository for InMemoryCartRepository {
  fn load(&self) -> Vec<CartLineItem> {
    self.items.read().clone()
  }

  fn save(&self, items: &[CartLineItem]) -> StorefrontResult<()> {
    *self.items.write() = items.to_vec();
    Ok(())
  }
}
