use anyhow::bail;
use shop_auth::Route;
use shop_auth::guard::can_edit_profile;
use shop_core::requests::UserPatch;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `shop users <subcommand>`.
pub async fn handle(action: &UserCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        UserCommands::List => {
            ctx.enter(Route::AdminUsers)?;
            output(&ctx.storefront.users().await?, flags.format)
        }
        UserCommands::Get { id } => {
            ctx.enter(Route::Profile)?;
            output(&ctx.storefront.user(id).await?, flags.format)
        }
        UserCommands::Update {
            id,
            username,
            email,
        } => {
            ctx.enter(Route::Profile)?;
            if !can_edit_profile(&ctx.auth().session(), id) {
                bail!("you can only edit your own profile");
            }
            let patch = UserPatch {
                username: username.clone(),
                email: email.clone(),
                role: None,
            };
            output(&ctx.storefront.update_user(id, &patch).await?, flags.format)
        }
        UserCommands::SetRole { id, role } => {
            ctx.enter(Route::AdminUsers)?;
            output(
                &ctx.storefront.update_user(id, &UserPatch::role(*role)).await?,
                flags.format,
            )
        }
        UserCommands::Delete { id } => {
            ctx.enter(Route::AdminUsers)?;
            ctx.storefront.delete_user(id).await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
    }
}
