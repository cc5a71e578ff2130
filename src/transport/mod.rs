//! Transport abstraction for the gateway's single endpoint.
//!
//! The gateway exposes exactly one operation shape: POST a flat
//! form-encoded parameter set, receive a flat form-encoded text body. The
//! sealed [`Transport`] trait captures that shape so the rest of the crate
//! never touches HTTP machinery directly:
//!
//! - [`HttpTransport`]: production implementation over reqwest
//! - [`MockTransport`]: canned-reply implementation for tests
//!
//! The trait is sealed; the crate's error mapping guarantees (every transport
//! failure surfaces as [`crate::error::GatewayError::Connection`]) hold for
//! all implementations.
//!
//! # Examples
//!
//! ```rust,no_run
//! use paygate::transport::{HttpTransport, Transport};
//!
//! # async fn example() -> paygate::error::Result<()> {
//! let transport = HttpTransport::new();
//! let params = vec![("type".to_owned(), "sale".to_owned())];
//! let body = transport
//!     .post_form("https://secure.paygate.example.com/api/transact.php", &params)
//!     .await?;
//! println!("raw reply: {body}");
//! # Ok(())
//! # }
//! ```

use crate::error::Result;

pub mod config;
mod http;
mod mock;
mod sealed;

pub use config::HttpConfig;
pub use http::HttpTransport;
pub use mock::MockTransport;

/// One-shot form POST against the gateway endpoint.
///
/// This trait is sealed: only implementations inside this crate exist, so the
/// error contract (all transport failures map to
/// [`crate::error::GatewayError::Connection`]) cannot be bypassed.
pub trait Transport: sealed::private::Sealed + Send + Sync {
    /// Posts the parameter set as an `application/x-www-form-urlencoded` body
    /// and returns the raw reply text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GatewayError::Connection`] for endpoint
    /// validation failures, network failures, and non-success HTTP statuses.
    fn post_form<'a>(
        &'a self,
        endpoint: &'a str,
        params: &'a [(String, String)],
    ) -> impl Future<Output = Result<String>> + Send + 'a;

    /// Protocol name for logging and diagnostics.
    fn protocol_name(&self) -> &'static str;
}
