use serde::Serialize;
use shop_auth::Route;
use shop_core::entities::{CartItem, cart_total};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CartCommands;
use crate::context::AppContext;
use crate::output::{output, output_collection};

#[derive(Serialize)]
struct CartView {
    items: Vec<CartItem>,
    total: f64,
}

/// Handle `shop cart <subcommand>`.
pub async fn handle(action: &CartCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.enter(Route::Cart)?;
    match action {
        CartCommands::List => {
            let items = ctx.storefront.cart().await?;
            let view = CartView {
                total: cart_total(&items),
                items,
            };
            let footer = format!("{} line(s), total {:.2}", view.items.len(), view.total);
            output_collection(&view, &view.items, &footer, flags.format, flags.quiet)
        }
        CartCommands::Add {
            product_id,
            quantity,
        } => output(
            &ctx.storefront.add_to_cart(product_id, *quantity).await?,
            flags.format,
        ),
        CartCommands::Update { item_id, quantity } => output(
            &ctx.storefront.update_cart_item(item_id, *quantity).await?,
            flags.format,
        ),
        CartCommands::Remove { item_id } => {
            ctx.storefront.remove_from_cart(item_id).await?;
            output(&serde_json::json!({ "removed": item_id }), flags.format)
        }
        CartCommands::Clear => {
            ctx.storefront.clear_cart().await?;
            output(&serde_json::json!({ "cleared": true }), flags.format)
        }
    }
}
