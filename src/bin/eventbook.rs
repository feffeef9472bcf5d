use anyhow::Result;
use eventbook::cli::start;

#[tokio::main]
async fn main() -> Result<()> {
    let action = start()?;
    action.execute().await?;
    Ok(())
}
