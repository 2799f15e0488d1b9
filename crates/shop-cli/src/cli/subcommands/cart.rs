use clap::Subcommand;

/// Cart commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CartCommands {
    /// Show the cart and its total.
    List,
    /// Add a product to the cart.
    Add {
        product_id: String,
        /// Defaults to 1.
        #[arg(long)]
        quantity: Option<u32>,
    },
    /// Change the quantity of a cart line.
    Update { item_id: String, quantity: u32 },
    /// Remove a cart line.
    Remove { item_id: String },
    /// Empty the cart.
    Clear,
}
