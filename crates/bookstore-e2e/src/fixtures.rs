use bookstore_client::{BookClient, OrderClient};
use bookstore_types::money::to_decimal;
use bookstore_types::{Book, NewBook};

use crate::errors::{ensure_amount, ensure_eq, AtStep, ScenarioError, Step};
use crate::scenario::in_step;

/// The one book every scenario starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct BookFixture {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub stock_quantity: i32,
}

impl Default for BookFixture {
    fn default() -> Self {
        Self {
            title: "Test Book".into(),
            author: "Test Author".into(),
            price: 29.99,
            stock_quantity: 10,
        }
    }
}

impl BookFixture {
    pub fn to_new_book(&self) -> NewBook {
        NewBook {
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
            stock_quantity: self.stock_quantity,
        }
    }
}

/// Empties both services, then seeds `fixture` and returns the stored book.
///
/// Orders are cleared before books so no order is left pointing at a missing
/// book. The first failing call aborts the reset.
pub async fn reset_state(
    books: &BookClient,
    orders: &OrderClient,
    fixture: &BookFixture,
) -> Result<Book, ScenarioError> {
    in_step(Step::ResetOrders, async {
        orders.delete_all_orders().await.at(Step::ResetOrders)
    })
    .await?;

    in_step(Step::ResetBooks, async {
        books.delete_all_books().await.at(Step::ResetBooks)
    })
    .await?;

    in_step(Step::SeedBook, async {
        let book = books
            .create_book(&fixture.to_new_book())
            .await
            .at(Step::SeedBook)?;
        ensure_eq(Step::SeedBook, "title", fixture.title.as_str(), book.title.as_str())?;
        ensure_eq(Step::SeedBook, "author", fixture.author.as_str(), book.author.as_str())?;
        ensure_amount(Step::SeedBook, "price", to_decimal(fixture.price), book.price)?;
        ensure_eq(
            Step::SeedBook,
            "stockQuantity",
            fixture.stock_quantity,
            book.stock_quantity,
        )?;
        tracing::info!(book_id = book.id, "seeded book");
        Ok(book)
    })
    .await
}
