// core/src/cart/mod.rs

pub mod context;
pub mod repository;

pub use context::CartContext;
pub use repository::{CartRepository, InMemoryCartRepository, JsonFileCartRepository};
