use std::str::FromStr;

use bookstore_types::{CreateOrderRequest, Order, OrderStatus};
use reqwest::StatusCode;
use serde::Serialize;

use crate::error::ClientResult;
use crate::http::{ClientBuilder, FromHttp, Http};

/// How a status change is carried to the order service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusUpdateMode {
    /// `PATCH /orders/{id}/status` with `{"status": "..."}`.
    #[default]
    PatchJson,
    /// `PUT /orders/{id}/status?status=...` without a body.
    PutQuery,
}

impl FromStr for StatusUpdateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patch-json" | "patch" => Ok(StatusUpdateMode::PatchJson),
            "put-query" | "put" => Ok(StatusUpdateMode::PutQuery),
            other => Err(format!(
                "unknown status transport {other:?}, expected patch-json or put-query"
            )),
        }
    }
}

#[derive(Serialize)]
struct UpdateStatusRequest {
    status: OrderStatus,
}

/// Client for the order service.
#[derive(Clone, Debug)]
pub struct OrderClient {
    http: Http,
    status_mode: StatusUpdateMode,
}

impl FromHttp for OrderClient {
    fn from_http(http: Http) -> Self {
        Self {
            http,
            status_mode: StatusUpdateMode::default(),
        }
    }
}

impl OrderClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> ClientResult<ClientBuilder<Self>> {
        ClientBuilder::new(base_url)
    }

    pub fn with_status_update_mode(mut self, mode: StatusUpdateMode) -> Self {
        self.status_mode = mode;
        self
    }

    pub fn base_url(&self) -> &str {
        self.http.base().as_str()
    }

    /// `POST /orders`, expecting `200 OK`.
    pub async fn create_order(&self, req: &CreateOrderRequest) -> ClientResult<Order> {
        let req = self.http.client().post(self.http.url("orders")?).json(req);
        self.http.send_json("create order", req, StatusCode::OK).await
    }

    pub async fn get_order(&self, id: i64) -> ClientResult<Order> {
        let req = self.http.client().get(self.http.url(&format!("orders/{id}"))?);
        self.http.send_json("get order", req, StatusCode::OK).await
    }

    /// `GET /orders?userId={user_id}`.
    pub async fn list_user_orders(&self, user_id: i64) -> ClientResult<Vec<Order>> {
        let req = self
            .http
            .client()
            .get(self.http.url("orders")?)
            .query(&[("userId", user_id)]);
        self.http.send_json("list user orders", req, StatusCode::OK).await
    }

    pub async fn update_status(&self, id: i64, status: OrderStatus) -> ClientResult<Order> {
        let url = self.http.url(&format!("orders/{id}/status"))?;
        let req = match self.status_mode {
            StatusUpdateMode::PatchJson => self
                .http
                .client()
                .patch(url)
                .json(&UpdateStatusRequest { status }),
            StatusUpdateMode::PutQuery => self
                .http
                .client()
                .put(url)
                .query(&[("status", status.as_str())]),
        };
        self.http.send_json("update order status", req, StatusCode::OK).await
    }

    /// `DELETE /orders/{id}`, expecting `204 No Content`.
    pub async fn delete_order(&self, id: i64) -> ClientResult<()> {
        let req = self.http.client().delete(self.http.url(&format!("orders/{id}"))?);
        self.http
            .send("delete order", req, StatusCode::NO_CONTENT)
            .await?;
        Ok(())
    }

    /// `DELETE /orders`, expecting `204 No Content`.
    pub async fn delete_all_orders(&self) -> ClientResult<()> {
        let req = self.http.client().delete(self.http.url("orders")?);
        self.http
            .send("delete all orders", req, StatusCode::NO_CONTENT)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_types::OrderItem;
    use httpmock::prelude::*;

    fn sample_order(status: OrderStatus) -> Order {
        Order {
            id: 42,
            user_id: 11111,
            items: vec![OrderItem {
                book_id: 3,
                quantity: 1,
            }],
            total_amount: 29.99,
            status,
        }
    }

    #[tokio::test]
    async fn create_and_get_order() {
        let server = MockServer::start();
        let order = sample_order(OrderStatus::Pending);

        let create_mock = server.mock(|when, then| {
            when.method(POST).path("/orders").json_body(serde_json::json!({
                "userId": 11111,
                "items": [{ "bookId": 3, "quantity": 1 }]
            }));
            then.status(200).json_body_obj(&order);
        });
        let get_mock = server.mock(|when, then| {
            when.method(GET).path("/orders/42");
            then.status(200).json_body_obj(&order);
        });

        let client = OrderClient::new(&server.base_url()).unwrap();
        let created = client
            .create_order(&CreateOrderRequest::single(11111, 3, 1))
            .await
            .unwrap();
        assert_eq!(created.status, OrderStatus::Pending);
        assert_eq!(created.total_amount, 29.99);

        let fetched = client.get_order(42).await.unwrap();
        assert_eq!(fetched, order);

        create_mock.assert();
        get_mock.assert();
    }

    #[tokio::test]
    async fn update_list_delete() {
        let server = MockServer::start();
        let accepted = sample_order(OrderStatus::Accepted);

        let update_mock = server.mock(|when, then| {
            when.method(httpmock::Method::PATCH)
                .path("/orders/42/status")
                .json_body(serde_json::json!({ "status": "ACCEPTED" }));
            then.status(200).json_body_obj(&accepted);
        });
        let delete_mock = server.mock(|when, then| {
            when.method(DELETE).path("/orders/42");
            then.status(204);
        });
        let list_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/orders")
                .query_param("userId", "11111");
            then.status(200).json_body(serde_json::json!([]));
        });
        let clear_mock = server.mock(|when, then| {
            when.method(DELETE).path("/orders");
            then.status(204);
        });

        let client = OrderClient::new(&server.base_url()).unwrap();
        let updated = client
            .update_status(42, OrderStatus::Accepted)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Accepted);

        client.delete_order(42).await.unwrap();
        assert!(client.list_user_orders(11111).await.unwrap().is_empty());
        client.delete_all_orders().await.unwrap();

        update_mock.assert();
        delete_mock.assert();
        list_mock.assert();
        clear_mock.assert();
    }

    #[tokio::test]
    async fn put_query_status_transport() {
        let server = MockServer::start();
        let accepted = sample_order(OrderStatus::Accepted);
        let put_mock = server.mock(|when, then| {
            when.method(httpmock::Method::PUT)
                .path("/orders/42/status")
                .query_param("status", "ACCEPTED");
            then.status(200).json_body_obj(&accepted);
        });

        let client = OrderClient::builder(&server.base_url())
            .unwrap()
            .with_header("x-suite", "bookstore-e2e")
            .unwrap()
            .build()
            .unwrap()
            .with_status_update_mode(StatusUpdateMode::PutQuery);
        let updated = client
            .update_status(42, OrderStatus::Accepted)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Accepted);
        put_mock.assert();
    }

    #[tokio::test]
    async fn rejected_order_surfaces_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/orders");
            then.status(400)
                .json_body(serde_json::json!({ "error": "insufficient stock" }));
        });

        let client = OrderClient::new(&server.base_url()).unwrap();
        let err = client
            .create_order(&CreateOrderRequest::single(1, 1, 50))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert!(err.to_string().contains("insufficient stock"));
    }

    #[test]
    fn status_mode_parsing() {
        assert_eq!(
            "patch-json".parse::<StatusUpdateMode>(),
            Ok(StatusUpdateMode::PatchJson)
        );
        assert_eq!("PUT".parse::<StatusUpdateMode>(), Ok(StatusUpdateMode::PutQuery));
        assert!("post".parse::<StatusUpdateMode>().is_err());
    }
}
