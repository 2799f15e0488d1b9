pub mod auth;
pub mod cart;
pub mod dispatch;
pub mod orders;
pub mod products;
pub mod schema;
pub mod users;
