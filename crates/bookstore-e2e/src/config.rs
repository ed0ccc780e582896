use std::env;
use std::time::Duration;

use anyhow::Context;
use bookstore_client::{BookClient, OrderClient, StatusUpdateMode};

pub const DEFAULT_BOOK_SERVICE_URL: &str = "http://localhost:8081/";
pub const DEFAULT_ORDER_SERVICE_URL: &str = "http://localhost:8082/";

/// Where the services under test live and how to talk to them.
#[derive(Debug, Clone)]
pub struct E2eConfig {
    pub book_service_url: String,
    pub order_service_url: String,
    pub request_timeout: Option<Duration>,
    pub status_update: StatusUpdateMode,
}

impl E2eConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let book_service_url =
            lookup("BOOK_SERVICE_URL").unwrap_or_else(|| DEFAULT_BOOK_SERVICE_URL.into());
        let order_service_url =
            lookup("ORDER_SERVICE_URL").unwrap_or_else(|| DEFAULT_ORDER_SERVICE_URL.into());
        let request_timeout = match lookup("E2E_TIMEOUT_MS") {
            Some(ms) => Some(Duration::from_millis(
                ms.parse()
                    .with_context(|| format!("E2E_TIMEOUT_MS={ms:?} is not a number"))?,
            )),
            None => None,
        };
        let status_update = match lookup("ORDER_STATUS_TRANSPORT") {
            Some(mode) => mode
                .parse()
                .map_err(anyhow::Error::msg)
                .context("ORDER_STATUS_TRANSPORT")?,
            None => StatusUpdateMode::default(),
        };
        Ok(Self {
            book_service_url,
            order_service_url,
            request_timeout,
            status_update,
        })
    }

    pub fn for_urls(
        book_service_url: impl Into<String>,
        order_service_url: impl Into<String>,
    ) -> Self {
        Self {
            book_service_url: book_service_url.into(),
            order_service_url: order_service_url.into(),
            request_timeout: None,
            status_update: StatusUpdateMode::default(),
        }
    }

    pub fn book_client(&self) -> anyhow::Result<BookClient> {
        let mut builder = BookClient::builder(&self.book_service_url)
            .with_context(|| format!("book service url {}", self.book_service_url))?;
        if let Some(t) = self.request_timeout {
            builder = builder.with_timeout(t);
        }
        Ok(builder.build()?)
    }

    pub fn order_client(&self) -> anyhow::Result<OrderClient> {
        let mut builder = OrderClient::builder(&self.order_service_url)
            .with_context(|| format!("order service url {}", self.order_service_url))?;
        if let Some(t) = self.request_timeout {
            builder = builder.with_timeout(t);
        }
        Ok(builder.build()?.with_status_update_mode(self.status_update))
    }
}
