// core/src/models/user.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub phone: Option<String>,
  #[serde(default)]
  pub address: Option<String>,
  #[serde(default)]
  pub avatar: Option<String>,
}

/// Editable subset of the profile, posted back to the backend.
/// `None` fields are left out of the request and keep their server value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
  pub name: Option<String>,
  pub phone: Option<String>,
  pub address: Option<String>,
}

impl ProfileUpdate {
  /// Form fields for the update request, skipping untouched values.
  pub(crate) fn form_fields(&self) -> Vec<(&'static str, String)> {
    let mut fields = Vec::new();
    if let Some(name) = &self.name {
      fields.push(("name", name.clone()));
    }
    if let Some(phone) = &self.phone {
      fields.push(("phone", phone.clone()));
    }
    if let Some(address) = &self.address {
      fields.push(("address", address.clone()));
    }
    fields
  }
}

/// In-memory avatar payload for the multipart profile update.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
  pub file_name: String,
  pub mime_type: String,
  pub bytes: Vec<u8>,
}
