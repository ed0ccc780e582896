//! bookstore-stub: in-process stand-ins for the book and order services.
//!
//! Both services share one [`store::Catalog`], so order creation takes stock
//! the book service reports. Used by the client and e2e tests, and runnable
//! on its own for local suite runs.

pub mod config;
pub mod errors;
pub mod server;
pub mod store;

pub use config::StubConfig;
pub use server::{book_router, order_router, RunningStub, StubServer};
pub use store::Catalog;
