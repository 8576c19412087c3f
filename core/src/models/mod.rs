// core/src/models/mod.rs

//! Data structures exchanged with the backend and persisted client-side.

pub mod cart_item;
pub mod category;
pub mod money;
pub mod order;
pub mod post;
pub mod product;
pub mod user;

// Re-export the model structs for convenient access
pub use cart_item::{CartLineItem, NewCartLine, VariantChange};
pub use category::{Category, CategoryListing};
pub use order::{Order, OrderItem, OrderStatus};
pub use post::Post;
pub use product::{Product, ProductVariant};
pub use user::{AvatarUpload, ProfileUpdate, UserProfile};
