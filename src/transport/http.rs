//! HTTP transport implementation over reqwest.

use std::sync::LazyLock;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use super::{Transport, config::HttpConfig, sealed};
use crate::error::{GatewayError, Result};

/// Default HTTP client with connection pooling enabled.
///
/// A singleton avoids recreating the client per transport instance, so all
/// default transports share one connection pool.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(10)
        .timeout(HttpConfig::default().timeout())
        .connect_timeout(HttpConfig::default().connect_timeout())
        .build()
        .expect("failed to create default HTTP client")
});

/// Validates the gateway endpoint URL.
///
/// Card data and credentials travel in the request body, so only HTTPS
/// endpoints are accepted, and loopback hosts are rejected.
fn validate_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint).map_err(|e| GatewayError::Connection {
        guidance: format!("invalid gateway endpoint '{endpoint}': {e}"),
        source: None,
    })?;

    if url.scheme() != "https" {
        return Err(GatewayError::Connection {
            guidance: "gateway endpoint must use HTTPS".to_owned(),
            source: None,
        });
    }

    if let Some(host) = url.host_str()
        && (host == "localhost" || host == "127.0.0.1" || host == "::1" || host == "[::1]")
    {
        return Err(GatewayError::Connection {
            guidance: "gateway endpoint must not be a loopback address".to_owned(),
            source: None,
        });
    }

    Ok(url)
}

/// Form-POST transport over reqwest.
///
/// The gateway replies 200 with a form-encoded body for approved and declined
/// transactions alike, so any non-success HTTP status is a transport-level
/// failure, not a decodable reply.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl sealed::private::Sealed for HttpTransport {}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    /// Creates a transport backed by the shared default client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: DEFAULT_HTTP_CLIENT.clone() }
    }

    /// Creates a transport with custom HTTP tuning.
    ///
    /// # Errors
    ///
    /// Returns a connection error when the configuration is out of bounds or
    /// the client cannot be built.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(GatewayError::from_transport)?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, params), fields(param_count = params.len()))]
    async fn post_form<'a>(
        &'a self,
        endpoint: &'a str,
        params: &'a [(String, String)],
    ) -> Result<String> {
        let url = validate_endpoint(endpoint)?;

        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(GatewayError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Connection {
                guidance: format!("gateway returned HTTP status {status}"),
                source: None,
            });
        }

        let body = response.text().await.map_err(GatewayError::from_transport)?;
        debug!(bytes = body.len(), "gateway reply received");
        Ok(body)
    }

    fn protocol_name(&self) -> &'static str {
        "https"
    }
}
