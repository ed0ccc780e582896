use std::marker::PhantomData;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::{ClientError, ClientResult};

/// Base url plus the reqwest client shared by both service clients.
#[derive(Clone, Debug)]
pub struct Http {
    base: Url,
    client: reqwest::Client,
}

impl Http {
    pub(crate) fn url(&self, path: &str) -> ClientResult<Url> {
        self.base
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{}{path}: {e}", self.base)))
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Sends `req` once and checks the answer carries exactly `expected`.
    pub(crate) async fn send(
        &self,
        operation: &'static str,
        req: RequestBuilder,
        expected: StatusCode,
    ) -> ClientResult<Response> {
        let res = req.send().await?;
        let actual = res.status();
        tracing::debug!(operation, url = %res.url(), status = %actual, "response");
        if actual != expected {
            let body = res.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus {
                operation,
                expected,
                actual,
                body,
            });
        }
        Ok(res)
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        req: RequestBuilder,
        expected: StatusCode,
    ) -> ClientResult<T> {
        let res = self.send(operation, req, expected).await?;
        let bytes = res.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { operation, source })
    }
}

/// Built from an [`Http`] by [`ClientBuilder::build`].
pub trait FromHttp: Sized {
    fn from_http(http: Http) -> Self;
}

#[derive(Clone)]
pub struct ClientBuilder<C> {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
    _client: PhantomData<fn() -> C>,
}

impl<C: FromHttp> ClientBuilder<C> {
    pub(crate) fn new(base_url: &str) -> ClientResult<Self> {
        Ok(Self {
            base: parse_base(base_url)?,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
            _client: PhantomData,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> ClientResult<Self> {
        let name = HeaderName::from_bytes(key.as_ref().as_bytes())
            .map_err(|e| ClientError::InvalidHeader(e.to_string()))?;
        let value = HeaderValue::from_str(value.as_ref())
            .map_err(|e| ClientError::InvalidHeader(e.to_string()))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Uses `client` as is. Headers and timeouts must then be set on `client`
    /// itself; [`build`](Self::build) rejects them on the builder.
    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> ClientResult<C> {
        if let Some(client) = self.client {
            if !self.headers.is_empty() || self.timeout.is_some() {
                return Err(ClientError::Builder(
                    "headers and timeout cannot be applied to an injected reqwest client".into(),
                ));
            }
            return Ok(C::from_http(Http {
                base: self.base,
                client,
            }));
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        Ok(C::from_http(Http {
            base: self.base,
            client: builder.build()?,
        }))
    }
}

// A base without a trailing slash would lose its last segment on join.
fn parse_base(base_url: &str) -> ClientResult<Url> {
    let mut url =
        Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(base_url.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
