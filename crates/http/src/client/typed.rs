//! Type-safe API clients that enforce authentication requirements at compile time

use super::envelope::{normalize_body, normalize_error_body};
use super::notify::{Notifier, TracingNotifier};
use super::ClientError;
use crate::session::SessionStore;
use cockpit_core::Settings;
use cockpit_core::config::DEFAULT_TIMEOUT_SECS;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, header};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = concat!("cockpit-client/", env!("CARGO_PKG_VERSION"));

/// Transport shared by both client kinds: base URL, timeout and the
/// envelope/notification contract
#[derive(Clone)]
struct Transport {
    client: Client,
    base_url: String,
    notifier: Arc<dyn Notifier>,
}

impl Transport {
    fn new(
        base_url: &str,
        timeout: Duration,
        user_agent: Option<String>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base_url is required".into()));
        }

        let client = ClientBuilder::new()
            .user_agent(user_agent.unwrap_or_else(|| USER_AGENT.to_string()))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            notifier,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Send, normalize and decode; every failure is notified exactly once
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        self.dispatch(request).await.map_err(|err| self.report(err))
    }

    /// Log and notify a failure, handing the error back
    fn report(&self, err: ClientError) -> ClientError {
        warn!(error = %err, "Request failed");
        self.notifier.error(&err.user_message());
        err
    }

    async fn dispatch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "Response received");
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(normalize_error_body(status.as_u16(), &body));
        }

        let data = normalize_body(&body)?;
        Ok(serde_json::from_value(data)?)
    }
}

/// Client for public endpoints that never carries a credential
#[derive(Clone)]
pub struct PublicClient {
    transport: Transport,
}

/// Client for admin endpoints; attaches the session token to every call
#[derive(Clone)]
pub struct AuthenticatedClient {
    transport: Transport,
    session: Arc<SessionStore>,
}

impl PublicClient {
    /// Create a public client with default timeout and notifier
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the transport cannot be built
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        TypedClientBuilder::new().base_url(base_url).build_public()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.transport.base_url
    }

    /// Create a request builder without authentication
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.transport.request(method, path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// Execute a request and unwrap the response envelope
    ///
    /// # Errors
    ///
    /// Any transport, HTTP, envelope or decoding failure, after it was notified
    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        self.transport.execute(request).await
    }

    /// Upgrade to an authenticated client reading its token from `session`
    pub fn authenticate(self, session: Arc<SessionStore>) -> AuthenticatedClient {
        AuthenticatedClient {
            transport: self.transport,
            session,
        }
    }
}

impl AuthenticatedClient {
    /// Create an authenticated client with default timeout and notifier
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the transport cannot be built
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Result<Self, ClientError> {
        TypedClientBuilder::new()
            .base_url(base_url)
            .build_authenticated(session)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.transport.base_url
    }

    /// Session the token is read from
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Create a request builder with the current token attached
    ///
    /// While the session is anonymous no `Authorization` header is sent.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.transport.request(method, path);
        match self.session.token() {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// Execute a request and unwrap the response envelope
    ///
    /// # Errors
    ///
    /// Any transport, HTTP, envelope or decoding failure, after it was notified
    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        self.transport.execute(request).await
    }

    /// Notify a failure detected before any request was sent
    pub(crate) fn report(&self, err: ClientError) -> ClientError {
        self.transport.report(err)
    }

    /// Create a public client sharing the transport but never the token
    pub fn to_public(&self) -> PublicClient {
        PublicClient {
            transport: self.transport.clone(),
        }
    }
}

/// Type-safe builder that creates the appropriate client type
pub struct TypedClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
    notifier: Arc<dyn Notifier>,
}

impl TypedClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Builder preloaded with the API root and timeout from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new()
            .base_url(settings.api_base())
            .timeout(settings.timeout())
    }

    /// Set the API root, including the `/api` prefix
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the sink for error notifications
    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    fn transport(self) -> Result<Transport, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        Transport::new(&base_url, self.timeout, self.user_agent, self.notifier)
    }

    /// Build a public client
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL was set or the transport cannot be built
    pub fn build_public(self) -> Result<PublicClient, ClientError> {
        Ok(PublicClient {
            transport: self.transport()?,
        })
    }

    /// Build an authenticated client over `session`
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL was set or the transport cannot be built
    pub fn build_authenticated(
        self,
        session: Arc<SessionStore>,
    ) -> Result<AuthenticatedClient, ClientError> {
        Ok(AuthenticatedClient {
            transport: self.transport()?,
            session,
        })
    }
}

impl Default for TypedClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
