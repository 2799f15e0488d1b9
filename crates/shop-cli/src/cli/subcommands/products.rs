use clap::{Args, Subcommand};
use shop_core::enums::{ProductBrand, ProductCategory};

/// Product catalogue commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProductCommands {
    /// List products, one page at a time.
    List(ProductListArgs),
    /// Get a product by ID.
    Get { id: String },
    /// Create a product (admin).
    Create {
        /// Product as JSON: name, description, price, category, brand, power, inStock, images.
        #[arg(long)]
        json: String,
    },
    /// Update a product (admin).
    Update {
        id: String,
        /// Fields to change, as JSON.
        #[arg(long)]
        json: String,
    },
    /// Delete a product (admin).
    Delete { id: String },
}

#[derive(Clone, Debug, Default, Args)]
pub struct ProductListArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub category: Option<ProductCategory>,
    #[arg(long)]
    pub brand: Option<ProductBrand>,
    #[arg(long)]
    pub min_price: Option<f64>,
    #[arg(long)]
    pub max_price: Option<f64>,
    /// Only products in stock.
    #[arg(long)]
    pub in_stock: bool,
}
