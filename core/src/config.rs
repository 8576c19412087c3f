// core/src/config.rs

use crate::error::{StorefrontError, StorefrontResult};
use crate::reconcile::UnmatchedPolicy;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Flat shipping fee (VND) applied whenever the selected subtotal is positive.
/// Overridable through `SHIPPING_FLAT_FEE`.
pub const DEFAULT_SHIPPING_FLAT_FEE: i64 = 15_000;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)] // Clone is useful when parts of the config are passed around
pub struct AppConfig {
  /// Base URL of the PHP backend, e.g. `https://api.nhathuoc.example.vn`.
  pub api_base_url: String,
  pub request_timeout: Duration,

  /// Durable storage for cart line items (the browser-localStorage analog).
  pub cart_storage_path: PathBuf,
  /// Durable storage for the bearer-token session.
  pub auth_storage_path: PathBuf,

  pub shipping_flat_fee: i64,
  /// What to do with a cart line whose product no longer exists server-side.
  pub unmatched_policy: UnmatchedPolicy,
}

impl AppConfig {
  pub fn from_env() -> StorefrontResult<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name)
        .map_err(|e| StorefrontError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let api_base_url = get_env("API_BASE_URL")?;

    let request_timeout_secs = get_env("REQUEST_TIMEOUT_SECS")
      .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
      .parse::<u64>()
      .map_err(|e| StorefrontError::Config(format!("Invalid REQUEST_TIMEOUT_SECS: {}", e)))?;

    let cart_storage_path =
      PathBuf::from(get_env("CART_STORAGE_PATH").unwrap_or_else(|_| "nhathuoc_cart.json".to_string()));
    let auth_storage_path =
      PathBuf::from(get_env("AUTH_STORAGE_PATH").unwrap_or_else(|_| "nhathuoc_auth.json".to_string()));

    let shipping_flat_fee = get_env("SHIPPING_FLAT_FEE")
      .unwrap_or_else(|_| DEFAULT_SHIPPING_FLAT_FEE.to_string())
      .parse::<i64>()
      .map_err(|e| StorefrontError::Config(format!("Invalid SHIPPING_FLAT_FEE: {}", e)))?;

    let unmatched_policy = match get_env("UNMATCHED_ITEM_POLICY")
      .unwrap_or_else(|_| "drop".to_string())
      .to_ascii_lowercase()
      .as_str()
    {
      "drop" => UnmatchedPolicy::Drop,
      "flag" => UnmatchedPolicy::Flag,
      other => {
        return Err(StorefrontError::Config(format!(
          "Invalid UNMATCHED_ITEM_POLICY '{}', expected 'drop' or 'flag'",
          other
        )));
      }
    };

    tracing::info!("Storefront configuration loaded successfully.");

    Ok(Self {
      api_base_url,
      request_timeout: Duration::from_secs(request_timeout_secs),
      cart_storage_path,
      auth_storage_path,
      shipping_flat_fee,
      unmatched_policy,
    })
  }
}
