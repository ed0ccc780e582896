//! Runs the suite against the services named by `BOOK_SERVICE_URL` and
//! `ORDER_SERVICE_URL`. They must already be running:
//!
//!   cargo test -p bookstore-e2e --test live_services -- --ignored

use std::sync::OnceLock;

use bookstore_e2e::{reset_state, run_suite, BookFixture, E2eConfig, LifecycleParams};
use bookstore_types::OrderStatus;
use tokio::sync::Mutex;

// Both tests reset shared remote state.
fn serial() -> &'static Mutex<()> {
    static SERIAL: OnceLock<Mutex<()>> = OnceLock::new();
    SERIAL.get_or_init(|| Mutex::new(()))
}

fn live_config() -> E2eConfig {
    let _ = dotenvy::dotenv();
    E2eConfig::from_env().expect("e2e config")
}

#[tokio::test]
#[ignore = "needs running book and order services"]
async fn create_update_delete_order() {
    let _guard = serial().lock().await;
    let config = live_config();
    let books = config.book_client().unwrap();
    let orders = config.order_client().unwrap();

    let report = run_suite(
        &books,
        &orders,
        &BookFixture::default(),
        &LifecycleParams::default(),
    )
    .await
    .unwrap();
    assert_eq!(report.total_amount, 29.99);
    assert_eq!(report.stock_after, 9);
    assert_eq!(report.final_status, OrderStatus::Accepted);
}

#[tokio::test]
#[ignore = "needs running book and order services"]
async fn reset_is_repeatable() {
    let _guard = serial().lock().await;
    let config = live_config();
    let books = config.book_client().unwrap();
    let orders = config.order_client().unwrap();

    for _ in 0..2 {
        let book = reset_state(&books, &orders, &BookFixture::default())
            .await
            .unwrap();
        assert_eq!(book.stock_quantity, 10);
    }
}
