// core/src/models/post.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news/advice article from the storefront's posts section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
  pub id: String,
  pub title: String,
  pub slug: String,
  #[serde(default)]
  pub excerpt: Option<String>,
  /// Full HTML body; only present on the detail endpoint.
  #[serde(default)]
  pub content: Option<String>,
  #[serde(default)]
  pub image: Option<String>,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}
