//! Transport to the server-authoritative cart.
//!
//! [`CartTransport`] is the seam between the mirror and the network, so the
//! reconciliation logic can be exercised against an in-memory fake.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clothy_core::CartLineId;

use crate::session::SessionContext;

/// Cookie name the server issues sessions under.
const SESSION_COOKIE: &str = "clothy_session";

/// Errors from talking to the cart API.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never completed (network, DNS, timeout).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned status {0}")]
    Status(u16),
}

/// A cart line as the server reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCartLine {
    pub id: CartLineId,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    /// The owner's display name, denormalized onto the line server-side.
    pub display_name: String,
}

/// Operations the mirror needs from the server.
#[allow(async_fn_in_trait)]
pub trait CartTransport {
    /// Fetch the authoritative cart list.
    async fn fetch_lines(
        &self,
        ctx: &SessionContext,
    ) -> Result<Vec<RemoteCartLine>, TransportError>;

    /// Add a product (or increment its existing line).
    async fn add_line(
        &self,
        ctx: &SessionContext,
        product_name: &str,
        price: Decimal,
    ) -> Result<(), TransportError>;

    /// Remove one line by its server id.
    async fn remove_line(&self, ctx: &SessionContext, id: CartLineId)
    -> Result<(), TransportError>;

    /// Clear the whole cart.
    async fn clear(&self, ctx: &SessionContext) -> Result<(), TransportError>;
}

/// Reqwest-backed transport against a running Clothy server.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the given base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn cookie_header(ctx: &SessionContext) -> Option<String> {
        ctx.credential()
            .map(|credential| format!("{SESSION_COOKIE}={credential}"))
    }

    fn check(response: &reqwest::Response) -> Result<(), TransportError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Status(status.as_u16()))
        }
    }
}

impl CartTransport for HttpTransport {
    async fn fetch_lines(
        &self,
        ctx: &SessionContext,
    ) -> Result<Vec<RemoteCartLine>, TransportError> {
        let mut request = self.client.get(format!("{}/api/cart", self.base_url));
        if let Some(cookie) = Self::cookie_header(ctx) {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let response = request.send().await?;
        Self::check(&response)?;
        Ok(response.json().await?)
    }

    async fn add_line(
        &self,
        ctx: &SessionContext,
        product_name: &str,
        price: Decimal,
    ) -> Result<(), TransportError> {
        let mut request = self
            .client
            .post(format!("{}/api/cart", self.base_url))
            .json(&serde_json::json!({
                "productName": product_name,
                "price": price,
                "quantity": 1,
            }));
        if let Some(cookie) = Self::cookie_header(ctx) {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let response = request.send().await?;
        Self::check(&response)
    }

    async fn remove_line(
        &self,
        ctx: &SessionContext,
        id: CartLineId,
    ) -> Result<(), TransportError> {
        let mut request = self
            .client
            .delete(format!("{}/api/cart/{id}", self.base_url));
        if let Some(cookie) = Self::cookie_header(ctx) {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let response = request.send().await?;
        Self::check(&response)
    }

    async fn clear(&self, ctx: &SessionContext) -> Result<(), TransportError> {
        let mut request = self.client.delete(format!("{}/api/cart", self.base_url));
        if let Some(cookie) = Self::cookie_header(ctx) {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let response = request.send().await?;
        Self::check(&response)
    }
}
