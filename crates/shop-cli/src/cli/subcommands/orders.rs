use clap::Subcommand;
use shop_core::enums::{OrderStatus, PaymentMethod};

/// Order commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OrderCommands {
    /// List your orders.
    List,
    /// Get an order by ID.
    Get { id: String },
    /// Place an order from the current cart.
    Checkout {
        #[arg(long)]
        address: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "card")]
        payment: PaymentMethod,
    },
    /// Move an order to a new status (admin).
    SetStatus { id: String, status: OrderStatus },
}
