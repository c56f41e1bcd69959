//! Aggregates module
pub mod product;
pub mod order;
pub mod cart;

pub use product::{Catalog, Product, ProductDraft, ProductInput};
pub use order::{Order, OrderBook, OrderRequest, OrderStatus};
pub use cart::{Cart, CartItem, CART_COOKIE};
