use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    influscope::cli::run().await
}
