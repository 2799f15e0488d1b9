use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AuthCommands, CartCommands, OrderCommands, ProductCommands, UserCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, register, sign out.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Product catalogue.
    Products {
        #[command(subcommand)]
        action: ProductCommands,
    },
    /// User administration and profiles.
    Users {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Shopping cart.
    Cart {
        #[command(subcommand)]
        action: CartCommands,
    },
    /// Orders and checkout.
    Orders {
        #[command(subcommand)]
        action: OrderCommands,
    },
    /// Print the JSON Schema of a wire type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name: product, user, cart-item, order, session, new-product, new-order.
    pub type_name: String,
}
