use anyhow::Context;
use shop_auth::Route;
use shop_core::requests::{NewProduct, ProductPatch, ProductQuery};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProductCommands;
use crate::cli::subcommands::products::ProductListArgs;
use crate::context::AppContext;
use crate::output::{output, output_collection};

/// Handle `shop products <subcommand>`.
pub async fn handle(action: &ProductCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ProductCommands::List(args) => {
            ctx.enter(Route::Catalog)?;
            let page = ctx.storefront.products(&query_from(args)).await?;
            let footer = format!(
                "page {} of {} ({} products)",
                page.page,
                page.total_pages(),
                page.total
            );
            output_collection(&page, &page.data, &footer, flags.format, flags.quiet)
        }
        ProductCommands::Get { id } => {
            ctx.enter(Route::ProductDetail)?;
            output(&ctx.storefront.product(id).await?, flags.format)
        }
        ProductCommands::Create { json } => {
            ctx.enter(Route::AdminProducts)?;
            let product: NewProduct =
                serde_json::from_str(json).context("invalid product JSON")?;
            output(&ctx.storefront.create_product(&product).await?, flags.format)
        }
        ProductCommands::Update { id, json } => {
            ctx.enter(Route::AdminProducts)?;
            let patch: ProductPatch = serde_json::from_str(json).context("invalid product JSON")?;
            output(&ctx.storefront.update_product(id, &patch).await?, flags.format)
        }
        ProductCommands::Delete { id } => {
            ctx.enter(Route::AdminProducts)?;
            ctx.storefront.delete_product(id).await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
    }
}

/// `--in-stock` is a switch: leaving it off means "any", not "out of stock".
fn query_from(args: &ProductListArgs) -> ProductQuery {
    ProductQuery {
        page: args.page,
        limit: args.limit,
        category: args.category,
        brand: args.brand,
        min_price: args.min_price,
        max_price: args.max_price,
        in_stock: args.in_stock.then_some(true),
    }
}
