//! Transaction-id–keyed operations: capture, void, and refund.
//!
//! These types reference a prior gateway transaction instead of carrying card
//! data. Capture and refund take an optional amount (partial capture/refund);
//! void has no amount at all.

use std::sync::LazyLock;

use super::{BASE, TransactionRequest};
use crate::{
    error::Result,
    schema::{FieldDef, Instance, Schema, Value, ValueKind},
};

fn keyed_schema(entity: &'static str, tx_type: &'static str, with_amount: bool) -> Schema {
    let builder = BASE
        .derive(entity)
        .field(FieldDef::new("type").default_value(tx_type).writable(false))
        .field(FieldDef::new("transaction_id").required());
    if with_amount {
        builder.field(FieldDef::new("amount").kind(ValueKind::Amount)).build()
    } else {
        builder.remove("amount").build()
    }
}

static CAPTURE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| keyed_schema("capture", "capture", true));
static VOID_SCHEMA: LazyLock<Schema> = LazyLock::new(|| keyed_schema("void", "void", false));
static REFUND_SCHEMA: LazyLock<Schema> = LazyLock::new(|| keyed_schema("refund", "refund", true));

macro_rules! keyed_transaction {
    ($(#[$doc:meta])* $name:ident, $schema:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            inner: Instance,
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $name {
            /// Creates an empty transaction of this type.
            #[must_use]
            pub fn new() -> Self {
                Self { inner: Instance::new(&$schema) }
            }

            /// Creates a transaction keyed to a prior gateway transaction id.
            #[must_use]
            pub fn for_transaction(transaction_id: &str) -> Self {
                let mut tx = Self::new();
                tx.inner
                    .set("transaction_id", transaction_id)
                    .expect("transaction_id is declared without constraints");
                tx
            }

            /// Creates a transaction from field overrides, applied in order.
            ///
            /// # Errors
            ///
            /// Returns the first rejected write.
            pub fn with<I, V>(overrides: I) -> Result<Self>
            where
                I: IntoIterator<Item = (&'static str, V)>,
                V: Into<Value>,
            {
                Ok(Self { inner: Instance::with(&$schema, overrides)? })
            }

            /// The schema shared by all transactions of this type.
            #[must_use]
            pub fn schema() -> &'static Schema {
                &$schema
            }

            /// The referenced transaction id, if set.
            #[must_use]
            pub fn transaction_id(&self) -> Option<&str> {
                self.inner.text("transaction_id")
            }
        }

        impl TransactionRequest for $name {
            fn instance(&self) -> &Instance {
                &self.inner
            }

            fn instance_mut(&mut self) -> &mut Instance {
                &mut self.inner
            }
        }
    };
}

keyed_transaction!(
    /// Captures a previously authorized amount.
    ///
    /// Requires `transaction_id`; an `amount` smaller than the authorization
    /// captures partially.
    ///
    /// # Examples
    ///
    /// ```
    /// use paygate::transaction::{Capture, TransactionRequest};
    ///
    /// let capture = Capture::for_transaction("2303767426");
    /// assert!(capture.validate().is_ok());
    /// ```
    Capture,
    CAPTURE_SCHEMA
);

keyed_transaction!(
    /// Cancels a transaction that has not yet settled. Requires
    /// `transaction_id` only.
    Void,
    VOID_SCHEMA
);

keyed_transaction!(
    /// Returns settled funds to the cardholder. Requires `transaction_id`;
    /// an `amount` smaller than the original refunds partially.
    Refund,
    REFUND_SCHEMA
);

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;
    use crate::error::GatewayError;

    #[test]
    fn test_fixed_type_discriminators() {
        assert_eq!(Capture::new().kind(), "capture");
        assert_eq!(Void::new().kind(), "void");
        assert_eq!(Refund::new().kind(), "refund");
    }

    #[test]
    fn test_transaction_id_required() {
        let void = Void::new();
        let err = void.validate().unwrap_err();
        let GatewayError::Validation(msg) = err else {
            panic!("expected Validation, got {err:?}");
        };
        assert!(msg.contains("transaction_id"));

        assert!(Void::for_transaction("12345").validate().is_ok());
    }

    #[test]
    fn test_blank_transaction_id_counts_as_missing() {
        let capture = Capture::for_transaction("");
        assert!(capture.validate().is_err());
    }

    #[test]
    fn test_void_has_no_amount() {
        let mut void = Void::new();
        assert!(!Void::schema().has("amount"));
        assert!(void.set("amount", Decimal::ONE).is_err());
    }

    #[test]
    fn test_partial_capture_round_trip() {
        let mut capture = Capture::for_transaction("999");
        capture.set("amount", Decimal::from_str("5.00").unwrap()).unwrap();

        let params = capture.request_attributes();
        assert!(params.contains(&("type".to_owned(), "capture".to_owned())));
        assert!(params.contains(&("transactionid".to_owned(), "999".to_owned())));
        assert!(params.contains(&("amount".to_owned(), "5.00".to_owned())));
    }

    #[test]
    fn test_request_attribute_key_set() {
        // A transaction holding only transaction_id and po_number serializes
        // to exactly the three wire keys, fixed type included.
        let mut void = Void::for_transaction("2303767426");
        void.set("po_number", "po-77").unwrap();

        let mut keys: Vec<_> =
            void.request_attributes().into_iter().map(|(key, _)| key).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["ponumber", "transactionid", "type"]);
    }

    #[test]
    fn test_transaction_id_accessor() {
        assert_eq!(Refund::for_transaction("abc").transaction_id(), Some("abc"));
        assert_eq!(Refund::new().transaction_id(), None);
    }
}
