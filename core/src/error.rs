// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorefrontError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("HTTP request failed: {source}")]
  Http {
    #[from]
    source: reqwest::Error,
  },

  #[error("Backend rejected the request: {message}")]
  Api { message: String },

  #[error("Malformed backend payload: {source}")]
  Payload {
    #[from]
    source: serde_json::Error,
  },

  #[error("Authentication token is missing")]
  MissingToken,

  #[error("Cart line item not found: {line_id}")]
  LineItemNotFound { line_id: Uuid },

  #[error("Variant '{variant_id}' is not offered by the product on line {line_id}")]
  VariantNotOffered { line_id: Uuid, variant_id: String },

  #[error("Order not found: {order_id}")]
  OrderNotFound { order_id: String },

  #[error("Cart storage failure. Source: {source}")]
  Storage {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal storefront error: {0}")]
  Internal(String),
}

// Opaque errors bubbling out of storage backends land in Storage rather than
// panicking the caller.
impl From<AnyhowError> for StorefrontError {
  fn from(err: AnyhowError) -> Self {
    if err.downcast_ref::<StorefrontError>().is_some() {
      // Already one of ours wrapped by an intermediate anyhow layer; flatten
      // instead of double-nesting the variant.
      return StorefrontError::Internal(err.to_string());
    }
    StorefrontError::Storage { source: err }
  }
}

pub type StorefrontResult<T, E = StorefrontError> = std::result::Result<T, E>;
