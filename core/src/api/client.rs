// core/src/api/client.rs

//! Typed client over the storefront's PHP/REST backend.
//!
//! Every endpoint is a `<resource>.php?action=<vietnamese_action>` call
//! returning an `ApiEnvelope`. The client decodes envelopes but attaches no
//! retry, caching or cancellation behavior; callers own those policies.

use crate::api::envelope::ApiEnvelope;
use crate::config::AppConfig;
use crate::error::{StorefrontError, StorefrontResult};
use crate::models::{AvatarUpload, Category, CategoryListing, Order, Post, Product, ProfileUpdate, UserProfile};
use crate::reconcile::ProductSource;
use async_trait::async_trait;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use tracing::instrument;

pub struct ApiClient {
  http: reqwest::Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(config: &AppConfig) -> StorefrontResult<Self> {
    let http = reqwest::Client::builder()
      .timeout(config.request_timeout)
      .build()?;
    Ok(Self::from_parts(config.api_base_url.clone(), http))
  }

  /// Assembles a client around an existing `reqwest::Client`; used by tests
  /// to point at a mock server.
  pub fn from_parts(base_url: impl Into<String>, http: reqwest::Client) -> Self {
    let mut base_url = base_url.into();
    while base_url.ends_with('/') {
      base_url.pop();
    }
    Self { http, base_url }
  }

  fn endpoint(&self, file: &str) -> String {
    format!("{}/{}", self.base_url, file)
  }

  /// Decodes an envelope whose absence of data means "empty result".
  async fn decode_or_default<T>(response: reqwest::Response) -> StorefrontResult<T>
  where
    T: DeserializeOwned + Default,
  {
    Ok(Self::decode::<T>(response).await?.unwrap_or_default())
  }

  /// Decodes an envelope, mapping `success:false`/missing data to `None`.
  async fn decode<T>(response: reqwest::Response) -> StorefrontResult<Option<T>>
  where
    T: DeserializeOwned,
  {
    let status = response.status();
    if !status.is_success() {
      return Err(StorefrontError::Api {
        message: format!("backend returned HTTP {}", status),
      });
    }
    let envelope: ApiEnvelope<T> = response.json().await?;
    Ok(envelope.into_data())
  }

  // --- products.php ---

  /// Category page payload: the category plus its product listing.
  #[instrument(name = "api::category_products", skip(self))]
  pub async fn category_products(&self, category_slug: &str) -> StorefrontResult<CategoryListing> {
    let response = self
      .http
      .get(self.endpoint("products.php"))
      .query(&[("action", "lay_du_lieu_danh_muc"), ("category_slug", category_slug)])
      .send()
      .await?;
    Self::decode_or_default(response).await
  }

  #[instrument(name = "api::search_products", skip(self))]
  pub async fn search_products(&self, query: &str) -> StorefrontResult<Vec<Product>> {
    let response = self
      .http
      .get(self.endpoint("products.php"))
      .query(&[("action", "tim_kiem_san_pham"), ("q", query)])
      .send()
      .await?;
    Self::decode_or_default(response).await
  }

  /// Batched lookup of the distinct products currently in the cart; one
  /// form-encoded POST regardless of how many ids are sent.
  #[instrument(name = "api::products_for_cart", skip(self, product_ids), fields(id_count = product_ids.len()))]
  pub async fn products_for_cart(&self, product_ids: &[String]) -> StorefrontResult<Vec<Product>> {
    let form: Vec<(&str, &str)> = product_ids
      .iter()
      .map(|id| ("product_ids[]", id.as_str()))
      .collect();
    let response = self
      .http
      .post(self.endpoint("products.php"))
      .query(&[("action", "lay_san_pham_tu_gio_hang")])
      .form(&form)
      .send()
      .await?;
    Self::decode_or_default(response).await
  }

  // --- orders.php ---

  /// One order with its line items; the order-confirmation read path.
  /// `token` is the access token embedded in the confirmation URL.
  #[instrument(name = "api::order_detail", skip(self, token))]
  pub async fn order_detail(&self, order_id: &str, token: &str) -> StorefrontResult<Option<Order>> {
    let response = self
      .http
      .get(self.endpoint("orders.php"))
      .query(&[("action", "chi_tiet_don_hang"), ("id", order_id), ("token", token)])
      .send()
      .await?;
    Self::decode(response).await
  }

  /// The signed-in user's order history (Bearer auth).
  #[instrument(name = "api::my_orders", skip(self, token))]
  pub async fn my_orders(&self, token: &str) -> StorefrontResult<Vec<Order>> {
    let response = self
      .http
      .get(self.endpoint("orders.php"))
      .query(&[("action", "don_hang_cua_toi")])
      .bearer_auth(token)
      .send()
      .await?;
    Self::decode_or_default(response).await
  }

  // --- categories.php ---

  #[instrument(name = "api::subcategories", skip(self))]
  pub async fn subcategories(&self, slug: &str) -> StorefrontResult<Vec<Category>> {
    let response = self
      .http
      .get(self.endpoint("categories.php"))
      .query(&[("action", "doc_danh_muc_con"), ("slug", slug)])
      .send()
      .await?;
    Self::decode_or_default(response).await
  }

  // --- posts.php ---

  #[instrument(name = "api::post_detail", skip(self))]
  pub async fn post_detail(&self, slug: &str) -> StorefrontResult<Option<Post>> {
    let response = self
      .http
      .get(self.endpoint("posts.php"))
      .query(&[("action", "doc_chi_tiet"), ("slug", slug)])
      .send()
      .await?;
    Self::decode(response).await
  }

  #[instrument(name = "api::all_posts", skip(self))]
  pub async fn all_posts(&self) -> StorefrontResult<Vec<Post>> {
    let response = self
      .http
      .get(self.endpoint("posts.php"))
      .query(&[("action", "doc_tat_ca")])
      .send()
      .await?;
    Self::decode_or_default(response).await
  }

  // --- users.php ---

  #[instrument(name = "api::profile", skip(self, token))]
  pub async fn profile(&self, token: &str) -> StorefrontResult<Option<UserProfile>> {
    let response = self
      .http
      .get(self.endpoint("users.php"))
      .query(&[("action", "cap_nhat_thong_tin")])
      .bearer_auth(token)
      .send()
      .await?;
    Self::decode(response).await
  }

  /// Form-encoded profile update; the backend echoes the updated profile.
  #[instrument(name = "api::update_profile", skip(self, token, update))]
  pub async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> StorefrontResult<Option<UserProfile>> {
    let response = self
      .http
      .post(self.endpoint("users.php"))
      .query(&[("action", "cap_nhat_thong_tin")])
      .bearer_auth(token)
      .form(&update.form_fields())
      .send()
      .await?;
    Self::decode(response).await
  }

  /// Multipart variant of the profile update, carrying an avatar image next
  /// to the text fields.
  #[instrument(name = "api::update_profile_with_avatar", skip(self, token, update, avatar), fields(avatar_bytes = avatar.bytes.len()))]
  pub async fn update_profile_with_avatar(
    &self,
    token: &str,
    update: &ProfileUpdate,
    avatar: AvatarUpload,
  ) -> StorefrontResult<Option<UserProfile>> {
    let part = multipart::Part::bytes(avatar.bytes)
      .file_name(avatar.file_name)
      .mime_str(&avatar.mime_type)
      .map_err(|e| StorefrontError::Internal(format!("invalid avatar mime type: {}", e)))?;
    let mut form = multipart::Form::new().part("avatar", part);
    for (key, value) in update.form_fields() {
      form = form.text(key, value);
    }
    let response = self
      .http
      .post(self.endpoint("users.php"))
      .query(&[("action", "cap_nhat_thong_tin")])
      .bearer_auth(token)
      .multipart(form)
      .send()
      .await?;
    Self::decode(response).await
  }
}

#[async_trait]
impl ProductSource for ApiClient {
  async fn products_by_ids(&self, product_ids: &[String]) -> StorefrontResult<Vec<Product>> {
    self.products_for_cart(product_ids).await
  }
}
