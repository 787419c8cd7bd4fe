#[tokio::main]
async fn main() -> anyhow::Result<()> {
    samvidhan_server::start().await
}
