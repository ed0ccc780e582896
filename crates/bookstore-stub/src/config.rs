use std::env;

use anyhow::Context;

/// Where the two stub services listen. Port `0` asks the OS for a free one.
#[derive(Debug, Clone)]
pub struct StubConfig {
    pub host: String,
    pub book_port: u16,
    pub order_port: u16,
}

impl StubConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("STUB_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        Ok(Self {
            host,
            book_port: port_var("BOOK_PORT", 8081)?,
            order_port: port_var("ORDER_PORT", 8082)?,
        })
    }

    /// Loopback on ephemeral ports, for tests.
    pub fn ephemeral() -> Self {
        Self {
            host: "127.0.0.1".into(),
            book_port: 0,
            order_port: 0,
        }
    }
}

fn port_var(name: &str, default: u16) -> anyhow::Result<u16> {
    match env::var(name) {
        Ok(v) => v.parse().with_context(|| format!("{name}={v:?} is not a port")),
        Err(_) => Ok(default),
    }
}
