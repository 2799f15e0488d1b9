use clap::Subcommand;
use shop_core::enums::Role;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// List all users (admin).
    List,
    /// Get a user profile.
    Get { id: String },
    /// Edit a profile (own profile, or any as admin).
    Update {
        id: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change a user's role (admin).
    SetRole { id: String, role: Role },
    /// Delete a user (admin).
    Delete { id: String },
}
