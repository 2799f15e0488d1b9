//! Entity structs for the storefront domain.
//!
//! Server-owned records (`Product`, `User`, `CartItem`, `Order`) mirror the
//! backend's camelCase JSON. [`Session`] and [`UserSummary`] are the only
//! client-owned state.

mod cart;
mod order;
mod page;
mod product;
mod session;
mod user;

pub use cart::{CartItem, cart_total};
pub use order::{Order, OrderItem};
pub use page::Page;
pub use product::Product;
pub use session::Session;
pub use user::{User, UserSummary};
