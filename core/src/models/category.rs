// core/src/models/category.rs

use serde::{Deserialize, Serialize};

use super::Product;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
  pub id: String,
  pub name: String,
  pub slug: String,
  #[serde(default)]
  pub image: Option<String>,
  #[serde(default)]
  pub parent_id: Option<String>,
}

/// Payload of the category-page endpoint: the category itself plus the
/// products listed under it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryListing {
  #[serde(default)]
  pub category: Option<Category>,
  #[serde(default)]
  pub products: Vec<Product>,
}
