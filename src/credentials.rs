//! Gateway account credentials.
//!
//! The gateway authenticates each request with form parameters: either a
//! `username`/`password` pair or a `merchant_id`/`merchant_key` pair. Both
//! halves are validated non-empty before use, and secret material is zeroized
//! when the value is dropped.

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{GatewayError, Result};

/// Account credentials posted with every transaction.
///
/// Construct with [`Credentials::username_password`] or
/// [`Credentials::merchant_key`] (both validate), or deserialize from
/// configuration and call [`Credentials::validate`] before use.
///
/// The `Debug` implementation redacts secret halves, and secrets are wiped
/// from memory on drop.
///
/// # Examples
///
/// ```
/// use paygate::credentials::Credentials;
///
/// let credentials = Credentials::username_password("demo", "s3cret")?;
/// let params = credentials.wire_params();
/// assert_eq!(params[0], ("username".to_owned(), "demo".to_owned()));
/// # Ok::<(), paygate::error::GatewayError>(())
/// ```
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(untagged)]
pub enum Credentials {
    /// Classic account login pair.
    UsernamePassword {
        /// Account username.
        username: String,
        /// Account password (secret).
        password: String,
    },
    /// API key pair issued per merchant.
    MerchantKey {
        /// Merchant identifier.
        merchant_id: String,
        /// Merchant API key (secret).
        merchant_key: String,
    },
}

impl Credentials {
    /// Creates a username/password credential pair.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Credential`] when either half is empty.
    pub fn username_password(username: &str, password: &str) -> Result<Self> {
        let credentials = Self::UsernamePassword {
            username: username.to_owned(),
            password: password.to_owned(),
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Creates a merchant id/key credential pair.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Credential`] when either half is empty.
    pub fn merchant_key(merchant_id: &str, merchant_key: &str) -> Result<Self> {
        let credentials = Self::MerchantKey {
            merchant_id: merchant_id.to_owned(),
            merchant_key: merchant_key.to_owned(),
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Builds credentials from a key/value mapping.
    ///
    /// The mapping must be non-empty and contain one recognized key pair:
    /// `username` + `password`, or `merchant_id` + `merchant_key`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Credential`] for an empty mapping, an
    /// unrecognized key set, or empty values.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self> {
        if pairs.is_empty() {
            return Err(GatewayError::Credential("credential mapping is empty".to_owned()));
        }

        let find = |key: &str| {
            pairs.iter().find(|(name, _)| name == key).map(|(_, value)| value.as_str())
        };

        if let (Some(username), Some(password)) = (find("username"), find("password")) {
            return Self::username_password(username, password);
        }
        if let (Some(id), Some(key)) = (find("merchant_id"), find("merchant_key")) {
            return Self::merchant_key(id, key);
        }

        Err(GatewayError::Credential(
            "expected a username/password or merchant_id/merchant_key pair".to_owned(),
        ))
    }

    /// Checks both halves are present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Credential`] naming the empty half.
    pub fn validate(&self) -> Result<()> {
        let (public_half, secret_half, pair) = match self {
            Self::UsernamePassword { username, password } => {
                (username, password, ("username", "password"))
            }
            Self::MerchantKey { merchant_id, merchant_key } => {
                (merchant_id, merchant_key, ("merchant_id", "merchant_key"))
            }
        };
        if public_half.is_empty() {
            return Err(GatewayError::Credential(format!("{} is empty", pair.0)));
        }
        if secret_half.is_empty() {
            return Err(GatewayError::Credential(format!("{} is empty", pair.1)));
        }
        Ok(())
    }

    /// The credential parameters merged into every request.
    #[must_use]
    pub fn wire_params(&self) -> Vec<(String, String)> {
        match self {
            Self::UsernamePassword { username, password } => vec![
                ("username".to_owned(), username.clone()),
                ("password".to_owned(), password.clone()),
            ],
            Self::MerchantKey { merchant_id, merchant_key } => vec![
                ("merchant_id".to_owned(), merchant_id.clone()),
                ("merchant_key".to_owned(), merchant_key.clone()),
            ],
        }
    }
}

// Secrets never appear in logs or debug output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UsernamePassword { username, .. } => f
                .debug_struct("Credentials::UsernamePassword")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::MerchantKey { merchant_id, .. } => f
                .debug_struct("Credentials::MerchantKey")
                .field("merchant_id", merchant_id)
                .field("merchant_key", &"<redacted>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_password_wire_params() {
        let credentials = Credentials::username_password("demo", "s3cret").unwrap();
        assert_eq!(
            credentials.wire_params(),
            vec![
                ("username".to_owned(), "demo".to_owned()),
                ("password".to_owned(), "s3cret".to_owned()),
            ]
        );
    }

    #[test]
    fn test_merchant_key_wire_params() {
        let credentials = Credentials::merchant_key("m-1", "key-abc").unwrap();
        assert_eq!(
            credentials.wire_params(),
            vec![
                ("merchant_id".to_owned(), "m-1".to_owned()),
                ("merchant_key".to_owned(), "key-abc".to_owned()),
            ]
        );
    }

    #[test]
    fn test_empty_halves_rejected() {
        assert!(Credentials::username_password("", "pw").is_err());
        assert!(Credentials::username_password("user", "").is_err());
        assert!(Credentials::merchant_key("", "key").is_err());
        assert!(Credentials::merchant_key("id", "").is_err());
    }

    #[test]
    fn test_from_pairs_recognized() {
        let pairs = vec![
            ("username".to_owned(), "demo".to_owned()),
            ("password".to_owned(), "pw".to_owned()),
        ];
        let credentials = Credentials::from_pairs(&pairs).unwrap();
        assert!(matches!(credentials, Credentials::UsernamePassword { .. }));

        let pairs = vec![
            ("merchant_id".to_owned(), "m".to_owned()),
            ("merchant_key".to_owned(), "k".to_owned()),
        ];
        let credentials = Credentials::from_pairs(&pairs).unwrap();
        assert!(matches!(credentials, Credentials::MerchantKey { .. }));
    }

    #[test]
    fn test_from_pairs_rejects_empty_and_unrecognized() {
        assert!(Credentials::from_pairs(&[]).is_err());

        let pairs = vec![("api_token".to_owned(), "x".to_owned())];
        let err = Credentials::from_pairs(&pairs).unwrap_err();
        assert!(matches!(err, GatewayError::Credential(_)));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let credentials: Credentials =
            toml::from_str("username = \"demo\"\npassword = \"pw\"").unwrap();
        assert!(credentials.validate().is_ok());
        assert!(matches!(credentials, Credentials::UsernamePassword { .. }));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::username_password("demo", "s3cret").unwrap();
        let debug_str = format!("{credentials:?}");
        assert!(debug_str.contains("demo"));
        assert!(!debug_str.contains("s3cret"));
        assert!(debug_str.contains("<redacted>"));
    }
}
