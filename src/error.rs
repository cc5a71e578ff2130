//! Error types for the Paygate client.
//!
//! This module defines all error types that can occur while building,
//! validating, and submitting gateway transactions. All errors implement the
//! standard [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Attribute errors** ([`GatewayError::InvalidAttributeValue`],
//!   [`GatewayError::InvalidAttributeFormat`],
//!   [`GatewayError::InvalidAttributeType`]): a single field write was rejected
//!   by its declared constraints
//! - **Entity errors** ([`GatewayError::Validation`],
//!   [`GatewayError::InvalidObject`]): a transaction is not fit for submission
//! - **Credential errors** ([`GatewayError::Credential`]): the account
//!   credentials are missing or malformed
//! - **Transport errors** ([`GatewayError::Connection`]): the network attempt
//!   itself failed
//!
//! # Examples
//!
//! ```
//! use paygate::error::{GatewayError, Result};
//!
//! fn require_id(id: &str) -> Result<()> {
//!     if id.is_empty() {
//!         return Err(GatewayError::InvalidObject("transaction_id is blank".to_owned()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias for gateway operations.
///
/// This is a convenience type that uses [`GatewayError`] as the error type.
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur while building or submitting gateway transactions.
///
/// Attribute-level variants carry the offending value and the constraint that
/// rejected it, so callers can report precisely which write failed and why.
///
/// # Error Recovery
///
/// - **Attribute errors**: fix the value and retry the write; the instance is
///   unchanged (the rejected write never lands)
/// - **Entity errors** ([`Validation`](Self::Validation),
///   [`InvalidObject`](Self::InvalidObject)): fill the named field and resubmit
/// - **Credential errors** ([`Credential`](Self::Credential)): check account
///   configuration
/// - **Transport errors** ([`Connection`](Self::Connection)): transient; the
///   guidance message distinguishes timeouts from likely DNS problems
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A field write supplied a value outside the declared allowed set.
    ///
    /// Raised synchronously at the point of assignment. The write does not
    /// happen, so the previous value (if any) remains readable.
    #[error("invalid value for '{field}': '{value}' is not one of [{allowed}]")]
    InvalidAttributeValue {
        /// Internal name of the rejected field.
        field: &'static str,
        /// The offending value, in wire rendering.
        value: String,
        /// Comma-joined allowed values.
        allowed: String,
    },

    /// A field write supplied a value that does not match the declared format
    /// pattern.
    #[error("invalid format for '{field}': '{value}' does not match /{pattern}/")]
    InvalidAttributeFormat {
        /// Internal name of the rejected field.
        field: &'static str,
        /// The offending value, in wire rendering.
        value: String,
        /// The declared regex pattern.
        pattern: String,
    },

    /// A field write supplied a value of the wrong kind.
    ///
    /// Fields may constrain the value kind (text, integer, amount); a value of
    /// any other kind is rejected here after the allowed-values and format
    /// checks have passed.
    #[error("invalid type for '{field}': got {value}, expected {expected}")]
    InvalidAttributeType {
        /// Internal name of the rejected field.
        field: &'static str,
        /// Kind of the offending value.
        value: String,
        /// Comma-joined accepted kinds.
        expected: String,
    },

    /// A transaction failed entity-level validation before submission.
    ///
    /// Carries a message naming the first unmet required field, or the unknown
    /// field name for writes that target a name absent from the schema. Raised
    /// at `process()` time (or at the offending write), always before any
    /// network call is made.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A specifically named required attribute is blank.
    ///
    /// Used by transaction types whose own logic checks a single key
    /// attribute explicitly (e.g. `transaction_id` on an update) rather than
    /// running the general required-field walk.
    #[error("invalid object: {0}")]
    InvalidObject(String),

    /// The supplied credentials are empty or not a recognized key pair.
    ///
    /// Detected when the gateway client is constructed, before any network
    /// call.
    #[error("invalid credentials: {0}")]
    Credential(String),

    /// The network attempt to reach the gateway failed.
    ///
    /// Wraps the transport-level cause with a guidance message:
    /// - timeout or connection reset: check your internet connection
    /// - connect/socket failure: DNS is likely misconfigured
    /// - anything else: a generic transport failure notice
    ///
    /// Connection errors are raised only after a network attempt was made;
    /// they are never retried automatically.
    #[error("connection to gateway failed: {guidance}")]
    Connection {
        /// Human-readable guidance for the failure class.
        guidance: String,
        /// The underlying transport error, when one exists.
        #[source]
        source: Option<reqwest::Error>,
    },
}

impl GatewayError {
    /// Builds a [`Connection`](Self::Connection) error from a transport
    /// failure, selecting the guidance message from the failure class.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        let guidance = if err.is_timeout() {
            "the request timed out; please check your internet connection and try again".to_owned()
        } else if err.is_connect() {
            "could not open a connection to the gateway; DNS resolution or routing is likely \
             broken"
                .to_owned()
        } else {
            format!("unexpected transport failure ({err}); please try again")
        };
        Self::Connection { guidance, source: Some(err) }
    }
}
