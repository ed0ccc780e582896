use std::future::Future;

use bookstore_client::{BookClient, OrderClient};
use bookstore_types::money::line_total;
use bookstore_types::{Book, CreateOrderRequest, OrderStatus};
use tracing::Instrument;

use crate::errors::{ensure_amount, ensure_eq, AtStep, ScenarioError, Step};
use crate::fixtures::{reset_state, BookFixture};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleParams {
    pub user_id: i64,
    pub quantity: i32,
    pub target_status: OrderStatus,
}

impl Default for LifecycleParams {
    fn default() -> Self {
        Self {
            user_id: 11111,
            quantity: 1,
            target_status: OrderStatus::Accepted,
        }
    }
}

/// What the scenario observed on its way through.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleReport {
    pub book_id: i64,
    pub order_id: i64,
    pub total_amount: f64,
    pub stock_before: i32,
    pub stock_after: i32,
    pub final_status: OrderStatus,
}

/// Runs `fut` inside a span named after `step` and logs the outcome.
pub(crate) async fn in_step<T, F>(step: Step, fut: F) -> Result<T, ScenarioError>
where
    F: Future<Output = Result<T, ScenarioError>>,
{
    let res = fut
        .instrument(tracing::info_span!("step", step = %step))
        .await;
    match &res {
        Ok(_) => tracing::info!(%step, "step passed"),
        Err(e) => tracing::error!(%step, error = %e, "step failed"),
    }
    res
}

/// Drives one order for `book` from creation to deletion.
///
/// 1. create: status is `PENDING`, total is price × quantity
/// 2. the book's stock dropped by exactly the quantity
/// 3. the status update to `params.target_status` is echoed back
/// 4. the order deletes with `204`
/// 5. the user's listing is empty afterwards
///
/// `book` must be the freshly seeded book; its stock is the baseline for
/// step 2.
pub async fn run_order_lifecycle(
    books: &BookClient,
    orders: &OrderClient,
    book: &Book,
    params: &LifecycleParams,
) -> Result<LifecycleReport, ScenarioError> {
    let expected_total = line_total(book.price, params.quantity);

    let order = in_step(Step::CreateOrder, async {
        let req = CreateOrderRequest::single(params.user_id, book.id, params.quantity);
        let order = orders.create_order(&req).await.at(Step::CreateOrder)?;
        ensure_eq(Step::CreateOrder, "status", OrderStatus::Pending, order.status)?;
        ensure_amount(
            Step::CreateOrder,
            "totalAmount",
            expected_total,
            order.total_amount,
        )?;
        tracing::info!(order_id = order.id, total = order.total_amount, "order created");
        Ok(order)
    })
    .await?;

    let stock_after = in_step(Step::VerifyStock, async {
        let fresh = books.get_book(book.id).await.at(Step::VerifyStock)?;
        ensure_eq(
            Step::VerifyStock,
            "stockQuantity",
            book.stock_quantity - params.quantity,
            fresh.stock_quantity,
        )?;
        Ok(fresh.stock_quantity)
    })
    .await?;

    let updated = in_step(Step::UpdateStatus, async {
        let updated = orders
            .update_status(order.id, params.target_status)
            .await
            .at(Step::UpdateStatus)?;
        ensure_eq(Step::UpdateStatus, "status", params.target_status, updated.status)?;
        Ok(updated)
    })
    .await?;

    in_step(Step::DeleteOrder, async {
        orders.delete_order(order.id).await.at(Step::DeleteOrder)
    })
    .await?;

    in_step(Step::VerifyDeletion, async {
        let remaining = orders
            .list_user_orders(params.user_id)
            .await
            .at(Step::VerifyDeletion)?;
        let ids: Vec<i64> = remaining.iter().map(|o| o.id).collect();
        ensure_eq(Step::VerifyDeletion, "user orders", Vec::<i64>::new(), ids)
    })
    .await?;

    Ok(LifecycleReport {
        book_id: book.id,
        order_id: order.id,
        total_amount: order.total_amount,
        stock_before: book.stock_quantity,
        stock_after,
        final_status: updated.status,
    })
}

/// Reset followed by one lifecycle run.
pub async fn run_suite(
    books: &BookClient,
    orders: &OrderClient,
    fixture: &BookFixture,
    params: &LifecycleParams,
) -> Result<LifecycleReport, ScenarioError> {
    let book = reset_state(books, orders, fixture).await?;
    run_order_lifecycle(books, orders, &book, params).await
}
