//! # HTTP Transport
//!
//! [`MarketApi`] over plain HTTP/JSON with hyper.
//!
//! ## Call Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list_seller_books(UserId(2))                                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  url("api/books/seller/2")  ── joined onto base_url                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  GET + Accept: application/json (+ Authorization: Bearer <token>)       │
//! │        │                                                                │
//! │        ├── 2xx ──► serde_json::from_slice::<Vec<Book>>                  │
//! │        │                                                                │
//! │        └── 4xx/5xx ──► ClientError::Backend { status, body.error }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No timeouts, no retries: a failed call is reported once and the caller
//! decides what to do with it.

use std::sync::RwLock;

use async_trait::async_trait;
use hyper::body::Bytes;
use hyper::client::HttpConnector;
use hyper::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use hyper::{Body, Client, Method, Request};
use hyper_tls::HttpsConnector;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use bookmart_core::{Book, BookId, BookPayload, Order, OrderId, UserId};

use crate::api::{
    AuthResponse, ErrorBody, LoginRequest, MarketApi, PurchaseRequest, RegisterRequest,
};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

const JSON: &str = "application/json";

/// Backend client over HTTP(S).
pub struct HttpMarketApi {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    base: Url,
    token: RwLock<Option<String>>,
}

impl HttpMarketApi {
    /// Creates a client rooted at `base`. A path prefix on `base` is kept.
    pub fn new(mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder().build::<_, Body>(HttpsConnector::new());

        HttpMarketApi {
            client,
            base,
            token: RwLock::new(None),
        }
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(config.base_url()?))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    fn bearer(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(|t| format!("Bearer {}", t))
    }

    /// Issues one request and returns the body of a 2xx response.
    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<Bytes>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url(path)?;
        debug!(method = %method, url = %url, "backend call");

        let mut builder = Request::builder()
            .method(method.clone())
            .uri(url.as_str())
            .header(ACCEPT, JSON);
        if let Some(bearer) = self.bearer() {
            builder = builder.header(AUTHORIZATION, bearer);
        }

        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, JSON)
                .body(Body::from(serde_json::to_vec(body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.client.request(request).await?;
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await?;

        if status.is_success() {
            debug!(method = %method, path, status = status.as_u16(), "backend call ok");
            return Ok(bytes);
        }

        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|b| b.error);
        warn!(
            method = %method,
            path,
            status = status.as_u16(),
            message = message.as_deref().unwrap_or(""),
            "backend call rejected"
        );
        Err(ClientError::Backend {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let bytes = self.send::<()>(Method::GET, path, None).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let bytes = self.send(method, path, Some(body)).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl MarketApi for HttpMarketApi {
    fn set_token(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        self.send_json(Method::POST, "api/users/register", request).await
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        self.send_json(Method::POST, "api/users/login", request).await
    }

    async fn list_books(&self) -> ClientResult<Vec<Book>> {
        self.get_json("api/books").await
    }

    async fn list_available_books(&self) -> ClientResult<Vec<Book>> {
        self.get_json("api/books/available").await
    }

    async fn list_seller_books(&self, seller: UserId) -> ClientResult<Vec<Book>> {
        self.get_json(&format!("api/books/seller/{}", seller)).await
    }

    async fn get_book(&self, id: BookId) -> ClientResult<Book> {
        self.get_json(&format!("api/books/{}", id)).await
    }

    async fn create_book(&self, payload: &BookPayload) -> ClientResult<Book> {
        self.send_json(Method::POST, "api/books", payload).await
    }

    async fn update_book(&self, id: BookId, payload: &BookPayload) -> ClientResult<Book> {
        self.send_json(Method::PUT, &format!("api/books/{}", id), payload)
            .await
    }

    async fn delete_book(&self, id: BookId) -> ClientResult<()> {
        self.send::<()>(Method::DELETE, &format!("api/books/{}", id), None)
            .await
            .map(|_| ())
    }

    async fn purchase(&self, request: &PurchaseRequest) -> ClientResult<Order> {
        self.send_json(Method::POST, "api/orders/purchase", request).await
    }

    async fn buyer_orders(&self, buyer: UserId) -> ClientResult<Vec<Order>> {
        self.get_json(&format!("api/orders/buyer/{}", buyer)).await
    }

    async fn seller_orders(&self, seller: UserId) -> ClientResult<Vec<Order>> {
        self.get_json(&format!("api/orders/seller/{}", seller)).await
    }

    async fn get_order(&self, id: OrderId) -> ClientResult<Order> {
        self.get_json(&format!("api/orders/{}", id)).await
    }
}
