use bookstore_e2e::{run_suite, BookFixture, E2eConfig, LifecycleParams};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for BOOK_SERVICE_URL / ORDER_SERVICE_URL when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = E2eConfig::from_env()?;
    tracing::info!(
        books = %config.book_service_url,
        orders = %config.order_service_url,
        "running order lifecycle"
    );
    let books = config.book_client()?;
    let orders = config.order_client()?;

    let report = run_suite(
        &books,
        &orders,
        &BookFixture::default(),
        &LifecycleParams::default(),
    )
    .await?;
    tracing::info!(
        order_id = report.order_id,
        total = report.total_amount,
        stock_before = report.stock_before,
        stock_after = report.stock_after,
        status = %report.final_status,
        "order lifecycle passed"
    );
    Ok(())
}
