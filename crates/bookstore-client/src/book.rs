use bookstore_types::{Book, NewBook};
use reqwest::StatusCode;

use crate::error::ClientResult;
use crate::http::{ClientBuilder, FromHttp, Http};

/// Client for the book catalog service.
#[derive(Clone, Debug)]
pub struct BookClient {
    http: Http,
}

impl FromHttp for BookClient {
    fn from_http(http: Http) -> Self {
        Self { http }
    }
}

impl BookClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> ClientResult<ClientBuilder<Self>> {
        ClientBuilder::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        self.http.base().as_str()
    }

    /// `POST /books`, expecting `200 OK`.
    pub async fn create_book(&self, book: &NewBook) -> ClientResult<Book> {
        let req = self.http.client().post(self.http.url("books")?).json(book);
        self.http.send_json("create book", req, StatusCode::OK).await
    }

    pub async fn get_book(&self, id: i64) -> ClientResult<Book> {
        let req = self.http.client().get(self.http.url(&format!("books/{id}"))?);
        self.http.send_json("get book", req, StatusCode::OK).await
    }

    /// `DELETE /books`, expecting `204 No Content`.
    pub async fn delete_all_books(&self) -> ClientResult<()> {
        let req = self.http.client().delete(self.http.url("books")?);
        self.http
            .send("delete all books", req, StatusCode::NO_CONTENT)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use httpmock::prelude::*;

    fn sample_book() -> Book {
        Book {
            id: 3,
            title: "Test Book".into(),
            author: "Test Author".into(),
            price: 29.99,
            stock_quantity: 10,
        }
    }

    #[tokio::test]
    async fn create_and_get_book() {
        let server = MockServer::start();
        let book = sample_book();

        let create_mock = server.mock(|when, then| {
            when.method(POST).path("/books").json_body(serde_json::json!({
                "title": "Test Book",
                "author": "Test Author",
                "price": 29.99,
                "stockQuantity": 10
            }));
            then.status(200).json_body_obj(&book);
        });
        let get_mock = server.mock(|when, then| {
            when.method(GET).path("/books/3");
            then.status(200).json_body_obj(&book);
        });

        let client = BookClient::new(&server.base_url()).unwrap();
        let created = client
            .create_book(&NewBook {
                title: "Test Book".into(),
                author: "Test Author".into(),
                price: 29.99,
                stock_quantity: 10,
            })
            .await
            .unwrap();
        assert_eq!(created, book);

        let fetched = client.get_book(3).await.unwrap();
        assert_eq!(fetched.stock_quantity, 10);

        create_mock.assert();
        get_mock.assert();
    }

    #[tokio::test]
    async fn delete_all_requires_no_content() {
        let server = MockServer::start();
        let ok = server.mock(|when, then| {
            when.method(DELETE).path("/books");
            then.status(204);
        });

        let client = BookClient::new(&server.base_url()).unwrap();
        client.delete_all_books().await.unwrap();
        client.delete_all_books().await.unwrap();
        ok.assert_hits(2);
    }

    #[tokio::test]
    async fn wrong_status_is_reported_with_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path("/books");
            then.status(200).body("deleted");
        });
        server.mock(|when, then| {
            when.method(GET).path("/books/9");
            then.status(404).body("{\"error\":\"book 9\"}");
        });

        let client = BookClient::new(&server.base_url()).unwrap();
        let err = client.delete_all_books().await.unwrap_err();
        match err {
            ClientError::UnexpectedStatus {
                operation,
                expected,
                actual,
                body,
            } => {
                assert_eq!(operation, "delete all books");
                assert_eq!(expected, StatusCode::NO_CONTENT);
                assert_eq!(actual, StatusCode::OK);
                assert_eq!(body, "deleted");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = client.get_book(9).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/books/1");
            then.status(200).json_body(serde_json::json!({ "id": 1, "title": "T" }));
        });

        let client = BookClient::new(&server.base_url()).unwrap();
        let err = client.get_book(1).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Decode {
                operation: "get book",
                ..
            }
        ));
    }
}
