//! bookstore-types: wire DTOs shared by the book and order service clients,
//! the in-process stub and the e2e scenario.

pub mod domain;
pub mod money;

pub use domain::book::{Book, NewBook};
pub use domain::order::{CreateOrderRequest, Order, OrderItem, OrderStatus, ParseStatusError};
