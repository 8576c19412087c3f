// core/src/models/money.rs

//! Serde helpers for VND amounts.
//!
//! The PHP backend emits prices as strings like `"125000.00"` on most
//! endpoints and as bare JSON numbers on a few others. Amounts are whole
//! đồng; the fractional part is always `.00` and is discarded.

use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
  Number(f64),
  Text(String),
}

fn parse_vnd(raw: &str) -> Result<i64, String> {
  let whole = raw.trim().split('.').next().unwrap_or("0");
  if whole.is_empty() {
    return Ok(0);
  }
  whole
    .parse::<i64>()
    .map_err(|e| format!("invalid VND amount '{}': {}", raw, e))
}

impl RawPrice {
  fn into_vnd(self) -> Result<i64, String> {
    match self {
      RawPrice::Number(n) => Ok(n as i64),
      RawPrice::Text(s) => parse_vnd(&s),
    }
  }
}

/// `#[serde(with = "crate::models::money::price_vnd")]` for required prices.
pub mod price_vnd {
  use super::RawPrice;
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
  where
    D: Deserializer<'de>,
  {
    RawPrice::deserialize(deserializer)?
      .into_vnd()
      .map_err(serde::de::Error::custom)
  }

  pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_i64(*value)
  }
}

/// `#[serde(default, with = "crate::models::money::price_vnd_opt")]` for
/// prices the backend omits or nulls (e.g. `original_price`).
pub mod price_vnd_opt {
  use super::RawPrice;
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
  where
    D: Deserializer<'de>,
  {
    match Option::<RawPrice>::deserialize(deserializer)? {
      Some(raw) => raw.into_vnd().map(Some).map_err(serde::de::Error::custom),
      None => Ok(None),
    }
  }

  pub fn serialize<S>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    match value {
      Some(v) => serializer.serialize_some(v),
      None => serializer.serialize_none(),
    }
  }
}
