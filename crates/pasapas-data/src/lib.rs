//! REST client for the Pas à Pas backend.
//!
//! [`FetchClient`] is a thin builder over `reqwest` that joins paths onto a
//! base URL and unwraps the backend's response envelope. [`StorefrontApi`]
//! names every endpoint the storefront calls; [`HttpStorefrontApi`] is its
//! HTTP implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use pasapas_data::{ApiConfig, HttpStorefrontApi, StorefrontApi};
//!
//! let api = HttpStorefrontApi::new(ApiConfig::default())?;
//! let products = api.list_products().await?;
//! ```

mod api;
mod error;
mod request;
mod response;

pub use api::{ApiConfig, AuthReply, HttpStorefrontApi, StorefrontApi};
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::{message_of, payload, Response};

use std::collections::HashMap;
use std::time::Duration;

/// HTTP client for the backend.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: String,
    default_headers: HashMap<String, String>,
}

impl FetchClient {
    /// Create a client rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            default_headers: HashMap::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Create a GET request.
    pub fn get(&self, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Get, path)
    }

    /// Create a POST request.
    pub fn post(&self, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Post, path)
    }

    /// Create a PUT request.
    pub fn put(&self, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Put, path)
    }

    /// Create a PATCH request.
    pub fn patch(&self, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Patch, path)
    }

    /// Create a DELETE request.
    pub fn delete(&self, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Delete, path)
    }

    /// Send the request. Non-2xx statuses become [`FetchError::HttpError`].
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let url = request.url(&self.base_url);
        tracing::debug!(method = request.method.as_str(), %url, "sending request");

        let mut builder = self.http.request(request.method.into(), &url);
        for (key, value) in self.default_headers.iter().chain(request.headers.iter()) {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        let response = Response::new(status, headers, body);
        if !response.is_success() {
            tracing::debug!(status, %url, "backend returned an error status");
        }
        response.error_for_status()
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ApiConfig, AuthReply, FetchClient, FetchError, HttpStorefrontApi, Method, Response,
        StorefrontApi,
    };
}
