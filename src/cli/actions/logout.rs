use crate::cli::globals::GlobalArgs;
use anyhow::{Context, Result};

/// Execute the logout action.
/// # Errors
/// Returns an error if the storage file cannot be updated.
pub fn execute(globals: &GlobalArgs) -> Result<()> {
    let auth = globals.auth();
    let was_signed_in = auth.is_authenticated();
    auth.logout().with_context(|| {
        format!(
            "failed to clear session in {}",
            globals.storage_path.display()
        )
    })?;

    if was_signed_in {
        println!("Signed out.");
    } else {
        println!("No session to clear.");
    }
    Ok(())
}
