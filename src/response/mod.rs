//! Gateway response decoding.
//!
//! The gateway replies with a flat `application/x-www-form-urlencoded` body:
//! `&`-joined `key=value` pairs, no nesting. [`Response::parse`] decodes that
//! payload into an immutable record exposing the normalized fields, the
//! approved/declined/error classification, and human-readable lookups against
//! the static code tables.
//!
//! # Examples
//!
//! ```
//! use paygate::response::Response;
//!
//! let response =
//!     Response::parse("response=1&response_code=100&transactionid=2303767426&authcode=083319");
//!
//! assert!(response.is_approved());
//! assert_eq!(response.code(), Some("100"));
//! assert_eq!(response.message(), "Transaction was approved");
//! assert_eq!(response.transaction_id(), Some("2303767426"));
//! ```

use std::collections::HashMap;

pub mod codes;

/// Outcome classification of a gateway reply.
///
/// Decoded from the `response` field: `"1"` approved, `"2"` declined, `"3"`
/// error. Anything else (including an absent field) is [`Outcome::Unknown`]
/// and treated as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The gateway approved the transaction.
    Approved,
    /// The gateway or issuer declined the transaction.
    Declined,
    /// The gateway reported a processing error.
    Error,
    /// The reply carried no recognizable classification.
    Unknown,
}

/// Decoded gateway reply.
///
/// Immutable once constructed. An empty or unparseable payload produces a
/// record with every field absent, which classifies as [`Outcome::Unknown`].
#[derive(Debug, Clone)]
pub struct Response {
    fields: HashMap<String, String>,
}

impl Response {
    /// Parses a raw form-encoded reply body.
    ///
    /// Pairs split on `&`, each pair splits on the first `=`, and both sides
    /// are URL-decoded. When a key occurs more than once, the last occurrence
    /// wins. Parsing never fails; garbage in means fields absent, not an
    /// error.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut fields = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(raw.trim().as_bytes()) {
            fields.insert(key.into_owned(), value.into_owned());
        }
        Self { fields }
    }

    /// Raw access to any parsed field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// A parsed field, with blank values treated as absent.
    fn nonblank(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// The reply's outcome classification.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self.get("response") {
            Some("1") => Outcome::Approved,
            Some("2") => Outcome::Declined,
            Some("3") => Outcome::Error,
            _ => Outcome::Unknown,
        }
    }

    /// True when the gateway approved the transaction.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.outcome() == Outcome::Approved
    }

    /// True when the gateway or issuer declined the transaction.
    #[must_use]
    pub fn is_declined(&self) -> bool {
        self.outcome() == Outcome::Declined
    }

    /// True when the gateway reported a processing error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.outcome() == Outcome::Error
    }

    /// Convenience failure check: anything that is not an approval.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.is_approved()
    }

    /// The gateway's numeric `response_code`, verbatim.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.get("response_code")
    }

    /// The gateway-assigned transaction id.
    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        self.get("transactionid")
    }

    /// The caller-supplied order id, echoed back.
    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        self.get("orderid")
    }

    /// The issuer's authorization code, verbatim (may be blank on declines).
    #[must_use]
    pub fn auth_code(&self) -> Option<&str> {
        self.get("authcode")
    }

    /// The gateway's short response text, verbatim.
    #[must_use]
    pub fn response_text(&self) -> Option<&str> {
        self.get("responsetext")
    }

    /// Human-readable message for the `response_code`.
    ///
    /// Unknown or absent codes resolve to
    /// [`codes::UNKNOWN_MESSAGE`] rather than failing.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.code().map_or(codes::UNKNOWN_MESSAGE, codes::message)
    }

    /// Issuer description of the authorization code.
    ///
    /// `None` when the reply carried no auth code (or a blank one); unknown
    /// non-blank codes resolve to [`codes::UNKNOWN_AUTH_CODE`].
    #[must_use]
    pub fn auth_code_message(&self) -> Option<&'static str> {
        self.nonblank("authcode").map(codes::auth_code_message)
    }

    /// Description of the card-verification (CVV) result.
    ///
    /// `None` when the reply carried no code; a blank code means the check
    /// did not run, which is different from an unknown code (those resolve to
    /// [`codes::UNKNOWN_CVV_CODE`]).
    #[must_use]
    pub fn cvv_response(&self) -> Option<&'static str> {
        self.nonblank("cvvresponse").map(codes::cvv_message)
    }

    /// Description of the address-verification (AVS) result.
    ///
    /// `None` when the reply carried no code; unknown non-blank codes resolve
    /// to [`codes::UNKNOWN_AVS_CODE`].
    #[must_use]
    pub fn avs_response(&self) -> Option<&'static str> {
        self.nonblank("avsresponse").map(codes::avs_message)
    }
}
