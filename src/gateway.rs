//! Gateway client.
//!
//! [`Gateway`] owns the three collaborators a submission needs (endpoint
//! configuration, account credentials, and a transport) and drives the
//! process flow: validate the transaction, merge credential parameters into
//! its request attributes, post the form, and decode the reply.

use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::{
    credentials::Credentials,
    error::{GatewayError, Result},
    response::Response,
    transaction::TransactionRequest,
    transport::{HttpConfig, HttpTransport, Transport},
};

/// Production gateway endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://secure.paygate.example.com/api/transact.php";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

/// Gateway configuration.
///
/// TOML-deserializable; every field has a default, so an empty document is a
/// valid configuration pointing at the production endpoint.
///
/// # Examples
///
/// ```
/// use paygate::gateway::GatewayConfig;
///
/// let config: GatewayConfig = toml::from_str(
///     r#"
///     endpoint = "https://sandbox.paygate.example.com/api/transact.php"
///
///     [http]
///     timeout_secs = 60
/// "#,
/// )
/// .unwrap();
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Gateway endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// HTTP transport tuning.
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { endpoint: default_endpoint(), http: HttpConfig::default() }
    }
}

impl GatewayConfig {
    /// Validates the configuration.
    ///
    /// The endpoint must parse as a URL, use HTTPS, and not point at a
    /// loopback host; the HTTP tuning must be within bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Connection`] describing the first problem
    /// found.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint).map_err(|e| GatewayError::Connection {
            guidance: format!("invalid endpoint '{}': {e}", self.endpoint),
            source: None,
        })?;

        if url.scheme() != "https" {
            return Err(GatewayError::Connection {
                guidance: format!("endpoint must use HTTPS, got: {}", url.scheme()),
                source: None,
            });
        }

        if let Some(host) = url.host_str() {
            let host = host.to_lowercase();
            if host == "localhost" || host.starts_with("127.") || host == "::1" || host == "[::1]"
            {
                return Err(GatewayError::Connection {
                    guidance: format!("endpoint must not be a loopback address: {host}"),
                    source: None,
                });
            }
        }

        self.http.validate()
    }
}

/// Client for the gateway's single transact endpoint.
///
/// Generic over the transport so tests can substitute
/// [`crate::transport::MockTransport`]; production code uses the default
/// [`HttpTransport`].
///
/// # Examples
///
/// ```rust,no_run
/// use std::str::FromStr;
///
/// use paygate::{
///     credentials::Credentials,
///     gateway::Gateway,
///     transaction::{Sale, TransactionRequest},
/// };
/// use rust_decimal::Decimal;
///
/// # async fn example() -> paygate::error::Result<()> {
/// let gateway = Gateway::new(Credentials::username_password("demo", "password")?)?;
///
/// let mut sale = Sale::new();
/// sale.set("amount", Decimal::from_str("10.00").unwrap())?;
/// sale.set("card_number", "4111111111111111")?;
/// sale.set("expiration_date", "1229")?;
///
/// let response = gateway.process(&sale).await?;
/// if response.is_approved() {
///     println!("approved: {}", response.transaction_id().unwrap_or("?"));
/// } else {
///     println!("failed: {}", response.message());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Gateway<T: Transport = HttpTransport> {
    config: GatewayConfig,
    credentials: Credentials,
    transport: T,
}

impl Gateway<HttpTransport> {
    /// Creates a client for the production endpoint with default HTTP tuning.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Credential`] when the credentials fail shape
    /// validation.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, GatewayConfig::default())
    }

    /// Creates a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns the credential or configuration validation failure, if any.
    pub fn with_config(credentials: Credentials, config: GatewayConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(&config.http)?;
        Self::with_transport(credentials, config, transport)
    }
}

impl<T: Transport> Gateway<T> {
    /// Creates a client over a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns the credential or configuration validation failure, if any.
    pub fn with_transport(
        credentials: Credentials,
        config: GatewayConfig,
        transport: T,
    ) -> Result<Self> {
        credentials.validate()?;
        config.validate()?;
        Ok(Self { config, credentials, transport })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submits a transaction and decodes the gateway's reply.
    ///
    /// Runs the transaction's own validation first; the network is touched
    /// only after validation passes. The reply is decoded unconditionally:
    /// declines and gateway errors are ordinary [`Response`] values, not
    /// `Err`.
    ///
    /// # Errors
    ///
    /// Returns the transaction's validation failure, or
    /// [`GatewayError::Connection`] when the network attempt fails.
    #[instrument(skip(self, transaction), fields(kind = transaction.kind()))]
    pub async fn process(&self, transaction: &impl TransactionRequest) -> Result<Response> {
        transaction.validate()?;

        let mut params = transaction.request_attributes();
        params.extend(self.credentials.wire_params());

        debug!(
            params = params.len(),
            protocol = self.transport.protocol_name(),
            "submitting transaction"
        );
        let body = self.transport.post_form(&self.config.endpoint, &params).await?;

        let response = Response::parse(&body);
        info!(approved = response.is_approved(), code = response.code(), "gateway replied");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    fn credentials() -> Credentials {
        Credentials::username_password("demo", "password").unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = GatewayConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_empty_toml() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_config_rejects_http_endpoint() {
        let config = GatewayConfig {
            endpoint: "http://secure.paygate.example.com/api/transact.php".to_owned(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        let GatewayError::Connection { guidance, .. } = err else {
            panic!("expected Connection, got {err:?}");
        };
        assert!(guidance.contains("HTTPS"));
    }

    #[test]
    fn test_config_rejects_loopback_endpoint() {
        for endpoint in ["https://localhost/api", "https://127.0.0.1/api"] {
            let config = GatewayConfig { endpoint: endpoint.to_owned(), ..Default::default() };
            assert!(config.validate().is_err(), "{endpoint} should be rejected");
        }
    }

    #[test]
    fn test_gateway_rejects_invalid_credentials() {
        let bad = Credentials::UsernamePassword {
            username: "demo".to_owned(),
            password: String::new(),
        };
        let result = Gateway::with_transport(bad, GatewayConfig::default(), MockTransport::new());
        assert!(matches!(result.unwrap_err(), GatewayError::Credential(_)));
    }

    #[test]
    fn test_gateway_rejects_invalid_config() {
        let config = GatewayConfig { endpoint: "not-a-url".to_owned(), ..Default::default() };
        let result = Gateway::with_transport(credentials(), config, MockTransport::new());
        assert!(matches!(result.unwrap_err(), GatewayError::Connection { .. }));
    }

    #[tokio::test]
    async fn test_process_validates_before_posting() {
        let transport = MockTransport::replying("response=1");
        let gateway =
            Gateway::with_transport(credentials(), GatewayConfig::default(), transport).unwrap();

        let sale = crate::transaction::Sale::new();
        let err = gateway.process(&sale).await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));

        // Validation failed, so nothing was posted.
        assert!(gateway.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_process_merges_credentials() {
        let transport = MockTransport::replying("response=1&response_code=100");
        let gateway =
            Gateway::with_transport(credentials(), GatewayConfig::default(), transport).unwrap();

        let void = crate::transaction::Void::for_transaction("42");
        let response = gateway.process(&void).await.unwrap();
        assert!(response.is_approved());

        let (endpoint, params) = gateway.transport.last_request().unwrap();
        assert_eq!(endpoint, DEFAULT_ENDPOINT);
        assert!(params.contains(&("username".to_owned(), "demo".to_owned())));
        assert!(params.contains(&("password".to_owned(), "password".to_owned())));
        assert!(params.contains(&("transactionid".to_owned(), "42".to_owned())));
        assert!(params.contains(&("type".to_owned(), "void".to_owned())));
    }
}
