use crate::cli::actions::{Action, get, login, logout, session};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => login::execute(args).await,
        Action::Logout(globals) => logout::execute(&globals),
        Action::Session(globals) => session::execute(&globals),
        Action::Get(args) => get::execute(args).await,
    }
}
