use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    serve, Json, Router,
};
use bookstore_types::{Book, CreateOrderRequest, NewBook, Order, OrderStatus};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::StubConfig;
use crate::errors::StubError;
use crate::store::Catalog;

pub fn book_router(catalog: Catalog) -> Router {
    let app = Router::new()
        .route("/books", axum::routing::post(create_book).delete(clear_books))
        .route("/books/{id}", get(get_book))
        .with_state(catalog);
    with_tracing(app, "book")
}

pub fn order_router(catalog: Catalog) -> Router {
    let app = Router::new()
        .route(
            "/orders",
            axum::routing::post(create_order)
                .get(list_orders)
                .delete(clear_orders),
        )
        .route("/orders/{id}", get(get_order).delete(delete_order))
        .route(
            "/orders/{id}/status",
            patch(update_status_json).put(update_status_query),
        )
        .with_state(catalog);
    with_tracing(app, "order")
}

fn with_tracing(app: Router, service: &'static str) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(move |request: &axum::extract::Request<_>| {
            let request_id = Uuid::new_v4();
            tracing::info_span!(
                "http_request",
                service,
                %request_id,
                method = %request.method(),
                uri = %request.uri()
            )
        })
        .on_response(
            |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                tracing::info!(
                    parent: span,
                    status = %response.status(),
                    latency_ms = %latency.as_millis(),
                    "response"
                );
            },
        );
    app.layer(trace_layer)
}

/// Both stub services over one shared [`Catalog`].
pub struct StubServer {
    catalog: Catalog,
    config: StubConfig,
}

/// A stub that is accepting connections. Dropping it stops both services.
pub struct RunningStub {
    pub book_addr: SocketAddr,
    pub order_addr: SocketAddr,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl RunningStub {
    pub fn book_url(&self) -> String {
        format!("http://{}/", self.book_addr)
    }

    pub fn order_url(&self) -> String {
        format!("http://{}/", self.order_addr)
    }

    pub async fn wait(mut self) -> anyhow::Result<()> {
        (&mut self.handle).await?
    }
}

impl Drop for RunningStub {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl StubServer {
    pub fn new(config: StubConfig) -> Self {
        Self {
            catalog: Catalog::new(),
            config,
        }
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog.clone()
    }

    /// Binds both listeners, then serves them on a background task.
    pub async fn spawn(self) -> anyhow::Result<RunningStub> {
        let book_listener =
            TcpListener::bind((self.config.host.as_str(), self.config.book_port)).await?;
        let order_listener =
            TcpListener::bind((self.config.host.as_str(), self.config.order_port)).await?;
        let book_addr = book_listener.local_addr()?;
        let order_addr = order_listener.local_addr()?;
        tracing::info!(%book_addr, %order_addr, "stub services listening");

        let books = book_router(self.catalog.clone());
        let orders = order_router(self.catalog);
        let handle = tokio::spawn(async move {
            tokio::try_join!(
                serve(book_listener, books.into_make_service()).into_future(),
                serve(order_listener, orders.into_make_service()).into_future(),
            )?;
            Ok::<(), anyhow::Error>(())
        });

        Ok(RunningStub {
            book_addr,
            order_addr,
            handle,
        })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        self.spawn().await?.wait().await
    }
}

async fn create_book(
    State(catalog): State<Catalog>,
    Json(payload): Json<NewBook>,
) -> Result<Json<Book>, StubError> {
    Ok(Json(catalog.create_book(payload)?))
}

async fn get_book(
    State(catalog): State<Catalog>,
    Path(id): Path<i64>,
) -> Result<Json<Book>, StubError> {
    Ok(Json(catalog.get_book(id)?))
}

async fn clear_books(State(catalog): State<Catalog>) -> StatusCode {
    catalog.clear_books();
    StatusCode::NO_CONTENT
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    user_id: Option<i64>,
}

#[derive(Deserialize)]
struct StatusBody {
    status: String,
}

async fn create_order(
    State(catalog): State<Catalog>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<Order>, StubError> {
    Ok(Json(catalog.create_order(payload)?))
}

async fn get_order(
    State(catalog): State<Catalog>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, StubError> {
    Ok(Json(catalog.get_order(id)?))
}

async fn list_orders(
    State(catalog): State<Catalog>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Order>> {
    Json(catalog.list_orders(query.user_id))
}

async fn update_status_json(
    State(catalog): State<Catalog>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusBody>,
) -> Result<Json<Order>, StubError> {
    let status = parse_status(&payload.status)?;
    Ok(Json(catalog.update_status(id, status)?))
}

async fn update_status_query(
    State(catalog): State<Catalog>,
    Path(id): Path<i64>,
    Query(payload): Query<StatusBody>,
) -> Result<Json<Order>, StubError> {
    let status = parse_status(&payload.status)?;
    Ok(Json(catalog.update_status(id, status)?))
}

fn parse_status(raw: &str) -> Result<OrderStatus, StubError> {
    raw.parse()
        .map_err(|e: bookstore_types::ParseStatusError| StubError::BadRequest(e.to_string()))
}

async fn delete_order(
    State(catalog): State<Catalog>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StubError> {
    catalog.delete_order(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_orders(State(catalog): State<Catalog>) -> StatusCode {
    catalog.clear_orders();
    StatusCode::NO_CONTENT
}
