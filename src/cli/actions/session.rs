use crate::cli::globals::GlobalArgs;
use crate::components::AuthNavbar;
use anyhow::Result;

/// Execute the session action.
/// # Errors
/// Returns an error if the user value cannot be printed.
pub fn execute(globals: &GlobalArgs) -> Result<()> {
    println!("{}", AuthNavbar.render());
    match globals.auth().user() {
        Some(user) => {
            println!("Signed in as:");
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        None => println!("Not signed in."),
    }
    Ok(())
}
