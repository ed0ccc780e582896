use bookstore_stub::{StubConfig, StubServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for BOOK_PORT / ORDER_PORT when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = StubConfig::from_env()?;
    StubServer::new(config).run().await
}
