use anyhow::bail;
use schemars::schema_for;
use shop_core::entities::{CartItem, Order, Product, Session, User};
use shop_core::requests::{NewOrder, NewProduct};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

const TYPE_NAMES: &str = "product, user, cart-item, order, session, new-product, new-order";

/// Handle `shop schema <type>`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema(&args.type_name)?, flags.format)
}

fn schema(type_name: &str) -> anyhow::Result<schemars::Schema> {
    let schema = match type_name.to_ascii_lowercase().replace('_', "-").as_str() {
        "product" => schema_for!(Product),
        "user" => schema_for!(User),
        "cart-item" => schema_for!(CartItem),
        "order" => schema_for!(Order),
        "session" => schema_for!(Session),
        "new-product" => schema_for!(NewProduct),
        "new-order" => schema_for!(NewOrder),
        _ => bail!("unknown type '{type_name}' (expected one of: {TYPE_NAMES})"),
    };
    Ok(schema)
}
