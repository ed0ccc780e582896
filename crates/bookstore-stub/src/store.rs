use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use bookstore_types::money::{line_total, to_f64};
use bookstore_types::{Book, CreateOrderRequest, NewBook, Order, OrderStatus};
use dashmap::DashMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::errors::StubError;

/// Shared in-memory state behind both stub services.
///
/// Orders take stock from the same book map the book service reads, so a
/// created order is immediately visible as a stock decrement.
#[derive(Clone, Default)]
pub struct Catalog {
    books: Arc<DashMap<i64, Book>>,
    orders: Arc<DashMap<i64, Order>>,
    next_book_id: Arc<AtomicI64>,
    next_order_id: Arc<AtomicI64>,
    // Held from the stock check until the stock is taken.
    stock_lock: Arc<Mutex<()>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_book(&self, new: NewBook) -> Result<Book, StubError> {
        if new.title.trim().is_empty() {
            return Err(StubError::BadRequest("title empty".into()));
        }
        if !new.price.is_finite() || new.price < 0.0 {
            return Err(StubError::BadRequest("price must be >= 0".into()));
        }
        if new.stock_quantity < 0 {
            return Err(StubError::BadRequest("stockQuantity must be >= 0".into()));
        }
        let id = self.next_book_id.fetch_add(1, Ordering::SeqCst) + 1;
        let book = Book::from_new(id, new);
        self.books.insert(id, book.clone());
        Ok(book)
    }

    pub fn get_book(&self, id: i64) -> Result<Book, StubError> {
        self.books
            .get(&id)
            .map(|b| b.clone())
            .ok_or_else(|| StubError::NotFound(format!("book {id}")))
    }

    pub fn clear_books(&self) {
        self.books.clear();
    }

    /// Validates every line item against current stock, then takes the stock.
    pub fn create_order(&self, req: CreateOrderRequest) -> Result<Order, StubError> {
        if req.items.is_empty() {
            return Err(StubError::BadRequest("items empty".into()));
        }
        let mut wanted: BTreeMap<i64, i32> = BTreeMap::new();
        for item in &req.items {
            if item.quantity <= 0 {
                return Err(StubError::BadRequest("item quantity must be > 0".into()));
            }
            let entry = wanted.entry(item.book_id).or_default();
            *entry = entry.checked_add(item.quantity).ok_or_else(|| {
                StubError::BadRequest(format!("quantity for book {} overflows", item.book_id))
            })?;
        }

        let _stock = self.stock_lock.lock();
        let mut total = Decimal::ZERO;
        for (book_id, quantity) in &wanted {
            let book = self
                .books
                .get(book_id)
                .ok_or_else(|| StubError::NotFound(format!("book {book_id}")))?;
            if book.stock_quantity < *quantity {
                return Err(StubError::BadRequest(format!(
                    "insufficient stock for book {book_id}: {} left, {quantity} requested",
                    book.stock_quantity
                )));
            }
            total += line_total(book.price, *quantity);
        }
        for (book_id, quantity) in &wanted {
            if let Some(mut book) = self.books.get_mut(book_id) {
                book.stock_quantity -= quantity;
            }
        }

        let id = self.next_order_id.fetch_add(1, Ordering::SeqCst) + 1;
        let order = Order {
            id,
            user_id: req.user_id,
            items: req.items,
            total_amount: to_f64(total),
            status: OrderStatus::Pending,
        };
        self.orders.insert(id, order.clone());
        Ok(order)
    }

    pub fn get_order(&self, id: i64) -> Result<Order, StubError> {
        self.orders
            .get(&id)
            .map(|o| o.clone())
            .ok_or_else(|| StubError::NotFound(format!("order {id}")))
    }

    pub fn list_orders(&self, user_id: Option<i64>) -> Vec<Order> {
        let mut list: Vec<Order> = self
            .orders
            .iter()
            .filter(|kv| user_id.map_or(true, |u| kv.value().user_id == u))
            .map(|kv| kv.value().clone())
            .collect();
        list.sort_by_key(|o| o.id);
        list
    }

    pub fn update_status(&self, id: i64, status: OrderStatus) -> Result<Order, StubError> {
        let mut order = self
            .orders
            .get_mut(&id)
            .ok_or_else(|| StubError::NotFound(format!("order {id}")))?;
        order.status = status;
        Ok(order.clone())
    }

    pub fn delete_order(&self, id: i64) -> Result<(), StubError> {
        self.orders
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StubError::NotFound(format!("order {id}")))
    }

    pub fn clear_orders(&self) {
        self.orders.clear();
    }
}
