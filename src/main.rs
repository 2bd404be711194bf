use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    deckview_cli::run_cli().await
}
