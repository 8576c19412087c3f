// core/src/api/envelope.rs

use serde::Deserialize;

/// Standard `{success, message, data}` wrapper every backend endpoint uses.
///
/// An unsuccessful envelope (`success: false`) or one with no `data` decodes
/// to "nothing": the UI shows an empty/"no results" state rather than an
/// error. Only transport and JSON-shape failures are real errors.
// The explicit bound keeps the derived impl at `T: Deserialize` only; the
// `#[serde(default)]` fields would otherwise infer an extra `T: Default`
// requirement, which the order/profile payloads cannot meet.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
  #[serde(default)]
  pub success: bool,
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
  pub fn into_data(self) -> Option<T> {
    if self.success {
      self.data
    } else {
      None
    }
  }

  pub fn into_data_or_default(self) -> T
  where
    T: Default,
  {
    self.into_data().unwrap_or_default()
  }
}
