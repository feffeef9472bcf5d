//! Request client shared by every caller. It applies two cross-cutting steps to
//! all traffic: the stored credential is attached as a bearer token before a
//! request leaves, and any failure is normalized into [`NormalizedError`]
//! before it reaches the caller. Nothing is retried and there is no timeout; a
//! request runs until it settles.

mod config;
mod errors;

pub use config::{ClientConfig, DEFAULT_API_BASE_URL};
pub use errors::{FALLBACK_MESSAGE, NormalizedError, normalize};

use crate::storage::SessionStore;
use anyhow::{Context, Result};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

/// A successful (2xx) response, passed through untouched.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    status: StatusCode,
    body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    /// Returns `NormalizedError` when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, NormalizedError> {
        serde_json::from_str(&self.body).map_err(|err| {
            NormalizedError::new(format!("Failed to decode response: {err}"), None)
        })
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: SessionStore,
}

impl ApiClient {
    /// Builds a client for the configured base URL, reading credentials from `store`.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, store: SessionStore) -> Result<Self> {
        let base_url = config.api_base_url.trim().to_string();
        Url::parse(&base_url).with_context(|| format!("invalid API base URL: {base_url}"))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url,
            store,
        })
    }

    /// Issues a GET request.
    ///
    /// # Errors
    /// Returns `NormalizedError` on any failure.
    pub async fn get(&self, path: &str) -> Result<ApiResponse, NormalizedError> {
        self.send(Method::GET, path, None).await
    }

    /// Issues a POST request with a JSON body.
    ///
    /// # Errors
    /// Returns `NormalizedError` on any failure, including body encoding.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, NormalizedError> {
        let body = serde_json::to_value(body).map_err(|err| {
            NormalizedError::new(format!("Failed to encode request: {err}"), None)
        })?;
        self.send(Method::POST, path, Some(&body)).await
    }

    /// Sends a request through both interceptors.
    ///
    /// # Errors
    /// Returns `NormalizedError` if the credential cannot be read, the server
    /// cannot be reached, or the response status is not 2xx.
    #[instrument(skip(self, method, body), fields(method = %method))]
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, NormalizedError> {
        let url = config::build_url_with_base(&self.base_url, path);
        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let request = self.authorize(request)?;

        let response = request.send().await.map_err(|err| {
            warn!("request failed before a response: {err}");
            normalize(None, Some(&err.to_string()), None)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            normalize(None, Some(&err.to_string()), Some(status.as_u16()))
        })?;

        if status.is_success() {
            debug!(status = status.as_u16(), "request succeeded");
            Ok(ApiResponse { status, body })
        } else {
            let error = normalize(
                errors::server_message(&body).as_deref(),
                Some(&errors::status_message(status.as_u16())),
                Some(status.as_u16()),
            );
            debug!(status = status.as_u16(), message = %error.message, "request rejected");
            Err(error)
        }
    }

    /// Attaches `Authorization: Bearer <token>` when a credential is stored.
    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, NormalizedError> {
        match self.store.get() {
            Ok(Some(token)) => Ok(request.bearer_auth(token.expose_secret())),
            Ok(None) => Ok(request),
            Err(err) => Err(normalize(None, Some(&err.to_string()), None)),
        }
    }
}
