use shop_auth::{Access, Route};
use shop_core::enums::Role;
use shop_core::requests::NewOrder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OrderCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `shop orders <subcommand>`.
pub async fn handle(action: &OrderCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        OrderCommands::List => {
            ctx.enter(Route::Orders)?;
            output(&ctx.storefront.orders().await?, flags.format)
        }
        OrderCommands::Get { id } => {
            ctx.enter(Route::OrderDetail)?;
            output(&ctx.storefront.order(id).await?, flags.format)
        }
        OrderCommands::Checkout {
            address,
            phone,
            payment,
        } => {
            ctx.enter(Route::Checkout)?;
            let order = NewOrder {
                shipping_address: address.clone(),
                phone: phone.clone(),
                payment_method: *payment,
            };
            output(&ctx.storefront.create_order(&order).await?, flags.format)
        }
        OrderCommands::SetStatus { id, status } => {
            ctx.enter(Route::OrderDetail)?;
            ctx.require(Access::Roles(vec![Role::Admin]), "changing order status")?;
            output(
                &ctx.storefront.update_order_status(id, *status).await?,
                flags.format,
            )
        }
    }
}
