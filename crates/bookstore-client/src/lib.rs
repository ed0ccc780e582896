//! Thin reqwest wrappers over the book and order services.
//!
//! Every call is a single attempt that must answer with one exact status
//! code; anything else comes back as [`ClientError::UnexpectedStatus`].

mod book;
mod error;
mod http;
mod order;

pub use book::BookClient;
pub use error::{ClientError, ClientResult};
pub use http::{ClientBuilder, FromHttp, Http};
pub use order::{OrderClient, StatusUpdateMode};
pub use reqwest::StatusCode;
