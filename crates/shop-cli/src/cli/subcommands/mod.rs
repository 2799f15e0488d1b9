pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

pub use auth::AuthCommands;
pub use cart::CartCommands;
pub use orders::OrderCommands;
pub use products::ProductCommands;
pub use users::UserCommands;
