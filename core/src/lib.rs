// src/lib.rs

//! Nhà Thuốc storefront engine: the headless core of a Vietnamese pharmacy
//! e-commerce client.
//!
//! What it covers:
//!  - A durable cart store behind a small repository interface, with the
//!    cart context as the single mutation gateway.
//!  - Batched reconciliation of cart lines against authoritative catalog
//!    data, with a generation guard so stale responses never win.
//!  - Cart-view state: merged display rows, the checkout selection set and
//!    selection-scoped subtotal/shipping/total.
//!  - Read-only order views (confirmation page, order history).
//!  - A typed client for the store's PHP/REST backend (catalog, search,
//!    orders, categories, posts, profile).
//!
//! Rendering, routing, checkout submission and token issuance live outside
//! this crate.

pub mod api;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod view;

// --- Re-exports for the Public API ---

pub use crate::api::{ApiClient, ApiEnvelope};
pub use crate::auth::{AuthContext, AuthSession, InMemoryTokenRepository, JsonFileTokenRepository, TokenRepository};
pub use crate::cart::{CartContext, CartRepository, InMemoryCartRepository, JsonFileCartRepository};
pub use crate::checkout::OrderReader;
pub use crate::config::{AppConfig, DEFAULT_SHIPPING_FLAT_FEE};
pub use crate::error::{StorefrontError, StorefrontResult};
pub use crate::models::{
  AvatarUpload, CartLineItem, Category, CategoryListing, NewCartLine, Order, OrderItem, OrderStatus, Post,
  Product, ProductVariant, ProfileUpdate, UserProfile, VariantChange,
};
pub use crate::reconcile::{
  merge_cart_with_products, DisplayCartItem, ProductSource, ReconcileFetcher, ReconcileResponse, UnmatchedPolicy,
};
pub use crate::view::{compute_totals, CartTotals, CartView, SelectionSet};
