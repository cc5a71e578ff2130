//! Post-sale update transaction.

use std::sync::LazyLock;

use super::{BASE, TransactionRequest};
use crate::{
    entity::DATE_YYYYMMDD,
    error::{GatewayError, Result},
    schema::{FieldDef, Instance, Schema, Value},
};

static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    BASE.derive("update")
        .field(FieldDef::new("type").default_value("update").writable(false))
        .remove("amount")
        .field(FieldDef::new("shipping_carrier").allowed(&["ups", "fedex", "dhl", "usps"]))
        .field(FieldDef::new("tracking_number"))
        .field(FieldDef::new("shipping_date").format(DATE_YYYYMMDD))
        .field(FieldDef::new("order_description"))
        .field(FieldDef::new("order_date").format(DATE_YYYYMMDD))
        .wire("order_description", "orderdescription")
        .wire("order_date", "orderdate")
        .build()
});

/// Amends shipping and order metadata on a prior transaction.
///
/// Keyed off `transaction_id`, which this type checks explicitly in
/// [`TransactionRequest::validate`]: update has no other universally
/// required field, so the general required-field walk is deliberately
/// bypassed. `shipping_carrier` accepts `ups`, `fedex`, `dhl`, or `usps`;
/// date fields post as `YYYYMMDD`.
///
/// # Examples
///
/// ```
/// use paygate::transaction::{TransactionRequest, Update};
///
/// let mut update = Update::for_transaction("2303767426");
/// update.set("shipping_carrier", "ups")?;
/// update.set("tracking_number", "1Z999AA10123456784")?;
/// assert!(update.validate().is_ok());
/// # Ok::<(), paygate::error::GatewayError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Update {
    inner: Instance,
}

impl Default for Update {
    fn default() -> Self {
        Self::new()
    }
}

impl Update {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Instance::new(&SCHEMA) }
    }

    /// Creates an update keyed to a prior gateway transaction id.
    #[must_use]
    pub fn for_transaction(transaction_id: &str) -> Self {
        let mut update = Self::new();
        update
            .inner
            .set("transaction_id", transaction_id)
            .expect("transaction_id is declared without constraints");
        update
    }

    /// Creates an update from field overrides, applied in order.
    ///
    /// # Errors
    ///
    /// Returns the first rejected write.
    pub fn with<I, V>(overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'static str, V)>,
        V: Into<Value>,
    {
        Ok(Self { inner: Instance::with(&SCHEMA, overrides)? })
    }

    /// The update schema shared by all instances.
    #[must_use]
    pub fn schema() -> &'static Schema {
        &SCHEMA
    }

    /// The referenced transaction id, if set.
    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        self.inner.text("transaction_id")
    }
}

impl TransactionRequest for Update {
    fn instance(&self) -> &Instance {
        &self.inner
    }

    fn instance_mut(&mut self) -> &mut Instance {
        &mut self.inner
    }

    // Update's key attribute is checked explicitly rather than through the
    // required-field walk; no other field is universally required.
    fn validate(&self) -> Result<()> {
        match self.inner.get("transaction_id") {
            Some(id) if !id.is_blank() => Ok(()),
            _ => Err(GatewayError::InvalidObject(
                "transaction_id must be set before an update can be submitted".to_owned(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_transaction_id_is_invalid_object() {
        let update = Update::new();
        let err = update.validate().unwrap_err();
        let GatewayError::InvalidObject(msg) = err else {
            panic!("expected InvalidObject, got {err:?}");
        };
        assert!(msg.contains("transaction_id"));
    }

    #[test]
    fn test_blank_transaction_id_is_invalid_object() {
        let update = Update::for_transaction("");
        assert!(matches!(update.validate().unwrap_err(), GatewayError::InvalidObject(_)));
    }

    #[test]
    fn test_transaction_id_alone_passes_validation() {
        assert!(Update::for_transaction("2303767426").validate().is_ok());
    }

    #[test]
    fn test_carrier_allowed_values() {
        let mut update = Update::for_transaction("1");
        for carrier in ["ups", "fedex", "dhl", "usps"] {
            assert!(update.set("shipping_carrier", carrier).is_ok());
        }

        let err = update.set("shipping_carrier", "ground").unwrap_err();
        let GatewayError::InvalidAttributeValue { field, value, .. } = err else {
            panic!("expected InvalidAttributeValue, got {err:?}");
        };
        assert_eq!(field, "shipping_carrier");
        assert_eq!(value, "ground");
    }

    #[test]
    fn test_date_fields_reject_impossible_digits() {
        let mut update = Update::for_transaction("1");
        assert!(update.set("shipping_date", "20260807").is_ok());
        assert!(update.set("shipping_date", "20260832").is_err());
        assert!(update.set("order_date", "20261301").is_err());
    }

    #[test]
    fn test_request_attributes() {
        let mut update = Update::for_transaction("555");
        update.set("shipping_carrier", "fedex").unwrap();
        update.set("order_description", "replacement part").unwrap();

        let params = update.request_attributes();
        assert!(params.contains(&("type".to_owned(), "update".to_owned())));
        assert!(params.contains(&("transactionid".to_owned(), "555".to_owned())));
        assert!(params.contains(&("shipping_carrier".to_owned(), "fedex".to_owned())));
        assert!(params.contains(&("orderdescription".to_owned(), "replacement part".to_owned())));
    }

    #[test]
    fn test_update_has_no_amount() {
        assert!(!Update::schema().has("amount"));
    }
}
