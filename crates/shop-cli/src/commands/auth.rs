use serde::Serialize;
use shop_auth::Route;
use shop_core::entities::{User, UserSummary};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user: User,
}

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user: Option<UserSummary>,
    session_backend: &'static str,
}

/// Handle `shop auth <subcommand>`.
pub async fn handle(action: &AuthCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => {
            ctx.enter(Route::Login)?;
            let user = ctx.storefront.login(&args.email, &args.password).await?;
            output(
                &AuthLoginResponse {
                    authenticated: true,
                    user,
                },
                flags.format,
            )
        }
        AuthCommands::Register(args) => {
            ctx.enter(Route::Register)?;
            let user = ctx
                .storefront
                .register(&args.username, &args.email, &args.password)
                .await?;
            output(
                &AuthLoginResponse {
                    authenticated: true,
                    user,
                },
                flags.format,
            )
        }
        AuthCommands::Logout => {
            ctx.storefront.logout();
            output(&AuthLogoutResponse { cleared: true }, flags.format)
        }
        AuthCommands::Status => {
            let auth = ctx.auth();
            output(
                &AuthStatusResponse {
                    authenticated: auth.is_authenticated(),
                    user: auth.user(),
                    session_backend: auth.backend_name(),
                },
                flags.format,
            )
        }
    }
}
