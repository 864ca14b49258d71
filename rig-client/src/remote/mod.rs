//! Remote cart API client
//!
//! HTTP client for the authoritative remote cart. The engine only talks
//! to it through the sync outbox; presentation code may call
//! `get_my_cart` directly for an initial reconciliation view.

mod error;

pub use error::{ClientError, ClientResult};

use crate::sync::CartApi;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::remote::{AddToCartRequest, RemoteCart, UpdateCartItemRequest};
use std::time::Duration;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Network client for the remote cart endpoints
#[derive(Debug, Clone)]
pub struct RemoteCartClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RemoteCartClient {
    /// Create a new client with the default timeout
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new client with an explicit request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Set the bearer token
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Base URL this client targets
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.get(&url);

        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let resp = req.send().await?;
        Self::check_status(resp).await?.json().await.map_err(Into::into)
    }

    async fn send_json<B: Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> ClientResult<()> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url).json(body);

        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let resp = req.send().await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.delete(&url);

        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let resp = req.send().await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    async fn check_status(resp: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST => ClientError::Validation(text),
            _ => ClientError::Internal(text),
        })
    }
}

#[async_trait]
impl CartApi for RemoteCartClient {
    async fn get_my_cart(&self) -> ClientResult<RemoteCart> {
        self.get("/api/cart").await
    }

    async fn add_to_cart(&self, request: AddToCartRequest) -> ClientResult<()> {
        self.send_json(reqwest::Method::POST, "/api/cart/items", &request)
            .await
    }

    async fn update_cart_item(&self, request: UpdateCartItemRequest) -> ClientResult<()> {
        self.send_json(reqwest::Method::PUT, "/api/cart/items", &request)
            .await
    }

    async fn delete_cart_item(&self, product_id: i64) -> ClientResult<()> {
        self.delete(&format!("/api/cart/items/{}", product_id)).await
    }
}
