use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    paysync_cli::app::run().await
}
