use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Products { action } => commands::products::handle(&action, ctx, flags).await,
        Commands::Users { action } => commands::users::handle(&action, ctx, flags).await,
        Commands::Cart { action } => commands::cart::handle(&action, ctx, flags).await,
        Commands::Orders { action } => commands::orders::handle(&action, ctx, flags).await,
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
