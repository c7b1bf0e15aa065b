//! Authenticated REST client
//!
//! Every call goes through [`ApiClient`], which:
//! - prefixes the configured base URL
//! - attaches `Authorization: Bearer <token>` when the session holds a token
//! - maps non-2xx responses to [`ApiError`]
//! - clears the session on `401`, unless it was replaced while the request was in flight
//!
//! Domain services in [`crate::services`] sit on top of it and never catch errors.

pub mod error;
pub mod session;

pub use error::ApiError;
pub use session::{AuthSession, SessionStore};

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::ApiConfig;

/// HTTP client wrapper shared by all domain services
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a client for the configured API
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` when the base URL does not parse and
    /// `ApiError::Network` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        url::Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .gzip(true)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session this client reads tokens from
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// GET a JSON resource
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let (request, token) = self.request(Method::GET, path).await;
        self.execute(request, token).await
    }

    /// GET a JSON resource with query parameters
    ///
    /// `None` fields of `query` are omitted from the query string.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let (request, token) = self.request(Method::GET, path).await;
        self.execute(request.query(query), token).await
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let (request, token) = self.request(Method::POST, path).await;
        self.execute(request.json(body), token).await
    }

    /// POST without a body and decode the JSON response
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let (request, token) = self.request(Method::POST, path).await;
        self.execute(request, token).await
    }

    /// POST a JSON body and discard whatever the server answers
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let (request, token) = self.request(Method::POST, path).await;
        self.dispatch(request.json(body), token).await.map(|_| ())
    }

    /// PUT a JSON body and decode the JSON response
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let (request, token) = self.request(Method::PUT, path).await;
        self.execute(request.json(body), token).await
    }

    /// PUT a JSON body and discard whatever the server answers
    pub async fn put_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let (request, token) = self.request(Method::PUT, path).await;
        self.dispatch(request.json(body), token).await.map(|_| ())
    }

    /// PATCH a JSON body and decode the JSON response
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let (request, token) = self.request(Method::PATCH, path).await;
        self.execute(request.json(body), token).await
    }

    /// DELETE a resource, discarding the response body
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let (request, token) = self.request(Method::DELETE, path).await;
        self.dispatch(request, token).await.map(|_| ())
    }

    /// Builder for `path` plus the token it was signed with
    async fn request(&self, method: Method, path: &str) -> (RequestBuilder, Option<String>) {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = %method, url = %url, "API request");

        let builder = self.http.request(method, url);
        let token = self.session.token().await;
        let builder = match &token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        };
        (builder, token)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: Option<String>,
    ) -> Result<T, ApiError> {
        let response = self.dispatch(request, token).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn dispatch(
        &self,
        request: RequestBuilder,
        token: Option<String>,
    ) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_status(status.as_u16(), &body);

        match &error {
            ApiError::Unauthorized { .. } => {
                // A newer session may have replaced the one this request was signed with
                let cleared = match &token {
                    Some(token) => self.session.clear_if_token(token).await,
                    None => false,
                };
                if cleared {
                    tracing::warn!(url = %url, "Unauthorized response, session cleared");
                } else {
                    tracing::debug!(url = %url, "Unauthorized response for a replaced or absent session");
                }
            }
            ApiError::Forbidden { .. } => {
                tracing::warn!(url = %url, "Forbidden: you do not have permission");
            }
            ApiError::RateLimited => {
                tracing::warn!(url = %url, "Too many requests");
            }
            ApiError::Server { status, .. } => {
                tracing::error!(url = %url, status = %status, "Server error");
            }
            _ => {
                tracing::debug!(url = %url, status = %status.as_u16(), "API request failed");
            }
        }

        Err(error)
    }
}
