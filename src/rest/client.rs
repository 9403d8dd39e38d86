//! Temu seller platform REST client implementation.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use reqwest::header::{
    ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, LOCATION, RETRY_AFTER, USER_AGENT,
};
use reqwest::cookie::Jar;
use reqwest::redirect::Policy;
use reqwest::{Method, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryDecision, RetryPolicy};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{ANTI_CONTENT_HEADER, AntiContentProvider, SignatureError};
use crate::config::{ClientConfig, RetryConfig};
use crate::error::SellerError;
use crate::rest::envelope::{Envelope, MarketplaceEnvelope, Outcome, SellerCentralEnvelope};
use crate::rest::retry;

/// Redirect hops followed before giving up. A 302 is never followed.
const MAX_REDIRECTS: usize = 10;

/// The Temu seller platform REST client.
///
/// One client serves both upstream sub-systems. It signs every attempt with a
/// fresh `Anti-Content` header, retries rate-limited and "system exception"
/// responses, and decodes each endpoint's envelope into a typed result.
///
/// Clones share the connection pool, the session cookie jar and the
/// configuration, so a single client can be handed to many tasks. Cookies
/// set by `login` are sent back on every later call to the same host.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use temu_seller_client::auth::EnvAntiContent;
/// use temu_seller_client::rest::SellerClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SellerClient::builder()
///         .anti_content(Arc::new(EnvAntiContent::from_env()))
///         .build()?;
///
///     let key = client.get_public_key().await?;
///     println!("Login key version: {}", key.version);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SellerClient {
    http_client: ClientWithMiddleware,
    base_url: Url,
    seller_central_base_url: Url,
    anti_content: Arc<dyn AntiContentProvider>,
    cookies: Arc<Jar>,
    retry: RetryConfig,
    debug: bool,
}

/// A response handed back without envelope decoding.
///
/// Redirects answered with 302 arrive here unfollowed, so `location` shows
/// where the platform wanted to send the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// `Location` header, if any.
    pub location: Option<String>,
    /// Body decoded as UTF-8 (lossy).
    pub body: String,
}

impl RawResponse {
    /// Whether the platform answered with a redirect.
    pub fn is_redirect(&self) -> bool {
        self.status.is_redirection()
    }
}

/// One completed HTTP attempt.
struct Exchange {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

/// The sub-system an endpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Upstream {
    Marketplace,
    SellerCentral,
}

impl SellerClient {
    /// Create a new client builder.
    pub fn builder() -> SellerClientBuilder {
        SellerClientBuilder::new()
    }

    /// Create a client from a complete configuration.
    pub fn from_config(
        config: ClientConfig,
        anti_content: Arc<dyn AntiContentProvider>,
    ) -> Result<Self, SellerError> {
        SellerClientBuilder::new()
            .config(config)
            .anti_content(anti_content)
            .build()
    }

    /// Base URL of the marketplace sub-system.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL of the seller console sub-system.
    pub fn seller_central_base_url(&self) -> &Url {
        &self.seller_central_base_url
    }

    /// The session cookie jar.
    ///
    /// Seed it with [`Jar::add_cookie_str`] to resume a session captured
    /// elsewhere.
    pub fn cookie_jar(&self) -> &Arc<Jar> {
        &self.cookies
    }

    /// POST a JSON body to a marketplace endpoint.
    pub(crate) async fn marketplace_post<T, P>(
        &self,
        endpoint: &str,
        params: &P,
    ) -> Result<Option<T>, SellerError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(params)?;
        self.call::<MarketplaceEnvelope<T>>(Upstream::Marketplace, endpoint, Some(body))
            .await
    }

    /// POST to a marketplace endpoint without a body.
    pub(crate) async fn marketplace_post_empty<T>(
        &self,
        endpoint: &str,
    ) -> Result<Option<T>, SellerError>
    where
        T: DeserializeOwned,
    {
        self.call::<MarketplaceEnvelope<T>>(Upstream::Marketplace, endpoint, None)
            .await
    }

    /// POST a JSON body to a seller console endpoint.
    pub(crate) async fn seller_central_post<T, P>(
        &self,
        endpoint: &str,
        params: &P,
    ) -> Result<Option<T>, SellerError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(params)?;
        self.call::<SellerCentralEnvelope<T>>(Upstream::SellerCentral, endpoint, Some(body))
            .await
    }

    /// GET a path or absolute URL and return the response as-is.
    ///
    /// Relative targets resolve against the marketplace base URL.
    pub(crate) async fn get_raw(&self, target: &str) -> Result<RawResponse, SellerError> {
        let url = self.endpoint_url(Upstream::Marketplace, target)?;
        let exchange = self.execute(Method::GET, url, None).await?;

        Ok(RawResponse {
            status: exchange.status,
            location: exchange
                .headers
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: String::from_utf8_lossy(&exchange.body).into_owned(),
        })
    }

    async fn call<E>(
        &self,
        upstream: Upstream,
        endpoint: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Option<E::Payload>, SellerError>
    where
        E: Envelope,
    {
        let url = self.endpoint_url(upstream, endpoint)?;
        let exchange = self.execute(Method::POST, url, body).await?;
        parse_envelope::<E>(exchange)
    }

    fn endpoint_url(&self, upstream: Upstream, endpoint: &str) -> Result<Url, SellerError> {
        let base = match upstream {
            Upstream::Marketplace => &self.base_url,
            Upstream::SellerCentral => &self.seller_central_base_url,
        };
        Ok(base.join(endpoint)?)
    }

    /// Run one logical request, retrying transient failures.
    ///
    /// Each attempt is a new request built from the same body bytes and a
    /// freshly computed `Anti-Content`. A signing failure before the first
    /// attempt is an error; a signing failure before a retry ends the retries
    /// and returns the last response.
    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Exchange, SellerError> {
        let policy = self.retry.policy();
        let started_at = SystemTime::now();
        let mut anti_content = self.sign(body.as_deref())?;
        let mut past_retries: u32 = 0;

        loop {
            let exchange = self
                .send_once(&method, &url, body.as_deref(), anti_content)
                .await?;

            let Some(reason) = retry::classify(exchange.status, &exchange.body) else {
                return Ok(exchange);
            };

            let wait = match policy.should_retry(started_at, past_retries) {
                RetryDecision::Retry { execute_after } => execute_after
                    .duration_since(SystemTime::now())
                    .unwrap_or(Duration::ZERO),
                RetryDecision::DoNotRetry => {
                    warn!(%url, ?reason, attempts = past_retries + 1, "Retries exhausted");
                    return Ok(exchange);
                }
            };

            past_retries += 1;
            warn!(%url, ?reason, retry = past_retries, ?wait, "Retrying request");
            tokio::time::sleep(wait).await;

            anti_content = match self.sign(body.as_deref()) {
                Ok(value) => value,
                Err(e) => {
                    warn!(%url, error = %e, "Failed to refresh Anti-Content, not retrying");
                    return Ok(exchange);
                }
            };
        }
    }

    async fn send_once(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&[u8]>,
        anti_content: HeaderValue,
    ) -> Result<Exchange, SellerError> {
        let mut request = self
            .http_client
            .request(method.clone(), url.clone())
            .header(ANTI_CONTENT_HEADER, anti_content);

        if self.debug {
            let logged = body.map(String::from_utf8_lossy).unwrap_or_default();
            debug!(%method, %url, body = %logged, "Sending request");
        }
        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        if self.debug {
            debug!(%url, %status, body = %String::from_utf8_lossy(&body), "Received response");
        }

        Ok(Exchange {
            status,
            headers,
            body,
        })
    }

    fn sign(&self, body: Option<&[u8]>) -> Result<HeaderValue, SignatureError> {
        let value = self.anti_content.anti_content(body)?;
        HeaderValue::from_str(&value)
            .map_err(|e| SignatureError::with_source("Anti-Content is not a valid header value", e))
    }
}

/// Map an attempt's response onto the envelope an endpoint is bound to.
fn parse_envelope<E>(exchange: Exchange) -> Result<Option<E::Payload>, SellerError>
where
    E: Envelope,
{
    let status = exchange.status;

    match serde_json::from_slice::<E>(&exchange.body) {
        Ok(envelope) if !envelope.is_success() => Err(SellerError::Api(envelope.api_error())),
        Ok(_) if status == StatusCode::TOO_MANY_REQUESTS => {
            Err(rate_limit_error(&exchange.headers))
        }
        Ok(envelope) if status.is_client_error() || status.is_server_error() => {
            Err(SellerError::Api(envelope.api_error()))
        }
        Ok(envelope) => Ok(envelope.into_payload()),
        Err(_) if status == StatusCode::TOO_MANY_REQUESTS => {
            Err(rate_limit_error(&exchange.headers))
        }
        Err(e) => {
            let body = String::from_utf8_lossy(&exchange.body);
            if status.is_success() {
                Err(SellerError::InvalidResponse(format!(
                    "Failed to parse response: {}. Body: {}",
                    e, body
                )))
            } else {
                Err(SellerError::InvalidResponse(format!("HTTP {}: {}", status, body)))
            }
        }
    }
}

fn rate_limit_error(headers: &HeaderMap) -> SellerError {
    SellerError::RateLimitExceeded {
        retry_after_secs: headers
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok()),
    }
}

/// Unwrap a payload that the endpoint requires.
pub(crate) fn required<T>(payload: Option<T>) -> Result<T, SellerError> {
    payload.ok_or_else(|| SellerError::InvalidResponse("Response missing 'result' field".to_string()))
}

fn redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.status() == StatusCode::FOUND {
            attempt.stop()
        } else if attempt.previous().len() > MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else {
            attempt.follow()
        }
    })
}

impl std::fmt::Debug for SellerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SellerClient")
            .field("base_url", &self.base_url.as_str())
            .field("seller_central_base_url", &self.seller_central_base_url.as_str())
            .field("retry", &self.retry)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Builder for [`SellerClient`].
pub struct SellerClientBuilder {
    config: ClientConfig,
    anti_content: Option<Arc<dyn AntiContentProvider>>,
    cookies: Option<Arc<Jar>>,
}

impl SellerClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            anti_content: None,
            cookies: None,
        }
    }

    /// Replace every setting with `config`.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the marketplace base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the seller console base URL.
    pub fn seller_central_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.seller_central_base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Log request and response bodies at debug level.
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Enable or disable TLS certificate verification.
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.config.verify_ssl = verify;
        self
    }

    /// Route all traffic through a proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy.into());
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the retry bounds for transient failures.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Set the maximum number of retries for transient failures.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.retry.max_retries = retries;
        self
    }

    /// Set the `Anti-Content` provider. Required.
    pub fn anti_content(mut self, provider: Arc<dyn AntiContentProvider>) -> Self {
        self.anti_content = Some(provider);
        self
    }

    /// Share a cookie jar instead of starting with an empty one.
    pub fn cookie_jar(mut self, jar: Arc<Jar>) -> Self {
        self.cookies = Some(jar);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<SellerClient, SellerError> {
        let config = self.config;
        let anti_content = self.anti_content.ok_or_else(|| {
            SellerError::Config("an Anti-Content provider is required".to_string())
        })?;
        config.retry.validate()?;
        let cookies = self.cookies.unwrap_or_default();

        let base_url = Url::parse(&config.base_url)?;
        let seller_central_base_url = Url::parse(&config.seller_central_base_url)?;

        // Build default headers.
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|_| {
            SellerError::Config(format!("invalid user agent: {:?}", config.user_agent))
        })?;
        headers.insert(USER_AGENT, user_agent);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .cookie_provider(cookies.clone())
            .redirect(redirect_policy())
            .danger_accept_invalid_certs(!config.verify_ssl);
        if let Some(proxy) = config.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        let reqwest_client = builder.build()?;

        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        debug!(
            base_url = %base_url,
            seller_central_base_url = %seller_central_base_url,
            verify_ssl = config.verify_ssl,
            proxied = config.proxy.is_some(),
            "Built seller client"
        );

        Ok(SellerClient {
            http_client,
            base_url,
            seller_central_base_url,
            anti_content,
            cookies,
            retry: config.retry,
            debug: config.debug,
        })
    }
}

impl Default for SellerClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
