use serde::{Deserialize, Serialize};

/// Body of `POST /books`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub stock_quantity: i32,
}

/// A book record as returned by the book service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub stock_quantity: i32,
}

impl Book {
    pub fn from_new(id: i64, new: NewBook) -> Self {
        Self {
            id,
            title: new.title,
            author: new.author,
            price: new.price,
            stock_quantity: new.stock_quantity,
        }
    }
}
