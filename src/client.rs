//! Miro API client.
//!
//! Low-level HTTP client that handles authentication, request dispatch and
//! rate-limit bookkeeping. Resource operations live on the service handles
//! returned by [`MiroClient::boards`], [`MiroClient::users`] and friends.

use std::env;
use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::{HeaderMap, CONTENT_TYPE, USER_AGENT};
use reqwest::multipart::Form;
use reqwest::{Client, Method, Request, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use url::Url;

use crate::context::CallContext;
use crate::decode::{self, Decode};
use crate::error::{MiroError, Result};
use crate::models::ApiErrorBody;
use crate::rate_limit::{
    self, RateLimit, RATE_LIMIT_LIMIT_HEADER, RATE_LIMIT_REMAINING_HEADER,
};

const DEFAULT_API_URL: &str = "https://api.miro.com/";
const API_VERSION: &str = "v1/";

/// Low-level Miro API client.
///
/// Handles authentication, HTTP requests and rate-limit tracking. This struct
/// is cheaply cloneable; clones share the connection pool and the rate-limit
/// snapshot.
///
/// # Example
///
/// ```no_run
/// use miroapi::MiroClient;
///
/// # fn example() -> miroapi::Result<()> {
/// // Create from environment variables
/// let client = MiroClient::from_env()?;
///
/// // Or configure manually
/// let client = MiroClient::new("your-access-key", "https://api.miro.com")?
///     .with_user_agent("my-app/1.0");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MiroClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
    user_agent: Option<String>,
    rate_limit: Arc<RwLock<RateLimit>>,
}

impl std::fmt::Debug for MiroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiroClient")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl MiroClient {
    /// Create a client from environment variables.
    ///
    /// Uses `MIRO_ACCESS_KEY` for authentication, optionally `MIRO_API_URL`
    /// for the base URL (defaults to `https://api.miro.com/`) and
    /// `MIRO_USER_AGENT` for the user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if `MIRO_ACCESS_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("MIRO_ACCESS_KEY").map_err(|_| {
            MiroError::ConfigMissing("MIRO_ACCESS_KEY environment variable not set".to_string())
        })?;

        let base_url = env::var("MIRO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let client = Self::new(&token, &base_url)?;
        Ok(match env::var("MIRO_USER_AGENT") {
            Ok(ua) => client.with_user_agent(ua),
            Err(_) => client,
        })
    }

    /// Create a new client with the provided access key and base URL.
    ///
    /// # Arguments
    ///
    /// * `token` - Miro access key, sent as a bearer token
    /// * `base_url` - API root without the version segment (e.g., `https://api.miro.com`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(MiroError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
            user_agent: None,
            rate_limit: Arc::new(RwLock::new(RateLimit::default())),
        })
    }

    /// Send `User-Agent` on every request. An empty string sends none.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        let user_agent = user_agent.into();
        self.user_agent = (!user_agent.is_empty()).then_some(user_agent);
        self
    }

    /// Start from `initial` instead of the default rate-limit snapshot.
    #[must_use]
    pub fn with_rate_limit(mut self, initial: RateLimit) -> Self {
        self.rate_limit = Arc::new(RwLock::new(initial));
        self
    }

    /// Dispatch requests through a caller-configured HTTP client.
    #[must_use]
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// A copy of the latest rate-limit snapshot.
    pub fn rate_limit(&self) -> RateLimit {
        *self.rate_limit.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Build an authenticated request for `path`, relative to the versioned
    /// API root.
    ///
    /// When `body` is given it is sent as JSON. `serde_json` never escapes
    /// `<`, `>` or `&`, so the body goes out as written.
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Request> {
        let mut builder = self.request_builder(method, path)?;

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body)?;
            builder = builder.header(CONTENT_TYPE, "application/json").body(bytes);
        }

        builder.build().map_err(MiroError::HttpError)
    }

    /// Build a GET request.
    pub fn get_request(&self, path: &str) -> Result<Request> {
        self.build_request::<()>(Method::GET, path, None)
    }

    /// Build a POST request with a JSON body.
    pub fn post_request<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Request> {
        self.build_request(Method::POST, path, Some(body))
    }

    /// Build a PATCH request with a JSON body.
    pub fn patch_request<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Request> {
        self.build_request(Method::PATCH, path, Some(body))
    }

    /// Build a DELETE request.
    pub fn delete_request(&self, path: &str) -> Result<Request> {
        self.build_request::<()>(Method::DELETE, path, None)
    }

    /// Build a request carrying a `multipart/form-data` body.
    pub fn multipart_request(&self, method: Method, path: &str, form: Form) -> Result<Request> {
        self.request_builder(method, path)?
            .multipart(form)
            .build()
            .map_err(MiroError::HttpError)
    }

    fn request_builder(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(API_VERSION)?.join(path)?;

        let mut builder = self.http.request(method, url).bearer_auth(&self.token);
        if let Some(ua) = &self.user_agent {
            builder = builder.header(USER_AGENT, ua);
        }
        Ok(builder)
    }

    /// Send a request and record the rate-limit headers of its response.
    ///
    /// Transport failures are returned as reported by reqwest. The status is
    /// not inspected; see [`MiroClient::expect_status`].
    #[tracing::instrument(skip(self, ctx, request), fields(method = %request.method(), path = %request.url().path()))]
    pub async fn execute(&self, ctx: &CallContext, request: Request) -> Result<Response> {
        let response = ctx.run(self.http.execute(request)).await?;
        tracing::debug!(status = response.status().as_u16(), "received response");

        if let Err(e) = self.record_rate_limit(response.headers()) {
            tracing::warn!(error = %e, "malformed rate-limit header");
            return Err(e);
        }

        Ok(response)
    }

    /// Each header is parsed and written on its own, under its own lock.
    /// An invalid header stops the update; fields written before it stay.
    fn record_rate_limit(&self, headers: &HeaderMap) -> Result<()> {
        if let Some(limit) = rate_limit::integer_header(headers, RATE_LIMIT_LIMIT_HEADER)? {
            self.update_rate_limit(|rl| rl.limit = limit);
        }

        if let Some(remaining) = rate_limit::integer_header(headers, RATE_LIMIT_REMAINING_HEADER)? {
            self.update_rate_limit(|rl| rl.remaining = remaining);
        }

        if let Some(reset) = rate_limit::reset_header(headers)? {
            self.update_rate_limit(|rl| rl.reset = Some(reset));
        }

        Ok(())
    }

    fn update_rate_limit(&self, update: impl FnOnce(&mut RateLimit)) {
        let mut rate_limit = self.rate_limit.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut rate_limit);
        tracing::debug!(
            limit = rate_limit.limit,
            remaining = rate_limit.remaining,
            "rate limit updated"
        );
    }

    /// Pass the response through when its status is one of `expected`.
    ///
    /// Otherwise the body is decoded as an [`ApiErrorBody`] and returned as
    /// [`MiroError::UnexpectedStatus`]. A body that does not decode yields
    /// the decode error instead.
    pub async fn expect_status(
        &self,
        ctx: &CallContext,
        response: Response,
        expected: &[StatusCode],
    ) -> Result<Response> {
        let status = response.status();

        if expected.contains(&status) {
            return Ok(response);
        }

        let bytes = ctx.run(response.bytes()).await?;
        let body = ApiErrorBody::from_slice(&bytes)?;
        tracing::warn!(
            status = status.as_u16(),
            message = %body.message,
            "unexpected response status"
        );
        Err(MiroError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }

    /// Execute, check the status and decode the body as `T`.
    pub(crate) async fn fetch<T: Decode>(
        &self,
        ctx: &CallContext,
        request: Request,
        expected: &[StatusCode],
    ) -> Result<T> {
        let response = self.fetch_response(ctx, request, expected).await?;
        let bytes = ctx.run(response.bytes()).await?;
        Ok(T::from_slice(&bytes)?)
    }

    /// Like [`MiroClient::fetch`] for bodies that are a JSON array of `T`.
    pub(crate) async fn fetch_list<T: Decode>(
        &self,
        ctx: &CallContext,
        request: Request,
        expected: &[StatusCode],
    ) -> Result<Vec<T>> {
        let response = self.fetch_response(ctx, request, expected).await?;
        let bytes = ctx.run(response.bytes()).await?;
        Ok(decode::list_from_slice(&bytes)?)
    }

    /// Execute and check the status, discarding the body.
    pub(crate) async fn fetch_empty(
        &self,
        ctx: &CallContext,
        request: Request,
        expected: &[StatusCode],
    ) -> Result<()> {
        self.fetch_response(ctx, request, expected).await?;
        Ok(())
    }

    async fn fetch_response(
        &self,
        ctx: &CallContext,
        request: Request,
        expected: &[StatusCode],
    ) -> Result<Response> {
        let response = self.execute(ctx, request).await?;
        self.expect_status(ctx, response, expected).await
    }
}
