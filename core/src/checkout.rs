// core/src/checkout.rs

//! Read-only order views.
//!
//! Orders are created server-side by the (external) checkout submission; the
//! storefront only ever fetches and renders them. Nothing here mutates cart
//! state.

use crate::api::ApiClient;
use crate::auth::AuthContext;
use crate::error::{StorefrontError, StorefrontResult};
use crate::models::Order;
use std::sync::Arc;
use tracing::instrument;

pub struct OrderReader {
  api: Arc<ApiClient>,
}

impl OrderReader {
  pub fn new(api: Arc<ApiClient>) -> Self {
    Self { api }
  }

  /// The order-confirmation page: order id and access token both come from
  /// the confirmation URL.
  #[instrument(name = "checkout::order_detail", skip(self, token))]
  pub async fn order_detail(&self, order_id: &str, token: &str) -> StorefrontResult<Order> {
    self
      .api
      .order_detail(order_id, token)
      .await?
      .ok_or_else(|| StorefrontError::OrderNotFound {
        order_id: order_id.to_string(),
      })
  }

  /// Order history for the signed-in user. Fails with `MissingToken` before
  /// any request is made when there is no session.
  #[instrument(name = "checkout::order_history", skip(self, auth))]
  pub async fn order_history(&self, auth: &AuthContext) -> StorefrontResult<Vec<Order>> {
    let token = auth.require_token()?;
    self.api.my_orders(&token).await
  }
}
