use crate::cli::globals::GlobalArgs;
use anyhow::Result;
use serde_json::Value;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub path: String,
}

/// Execute the get action. The body is printed as pretty JSON when it parses,
/// otherwise as text. Failures print the normalized error.
/// # Errors
/// Returns the normalized error if the request fails.
pub async fn execute(args: Args) -> Result<()> {
    let client = args.globals.client(args.globals.session_store())?;

    match client.get(&args.path).await {
        Ok(response) => {
            debug!(status = response.status().as_u16(), "response received");
            match response.json::<Value>() {
                Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
                Err(_) => println!("{}", response.text()),
            }
            Ok(())
        }
        Err(error) => {
            println!("{}", serde_json::to_string_pretty(&error)?);
            Err(error.into())
        }
    }
}
