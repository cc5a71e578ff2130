//! Order metadata entity.

use std::sync::LazyLock;

use crate::{
    entity::DATE_YYYYMMDD,
    error::Result,
    schema::{FieldDef, Instance, Schema, Value, ValueKind},
};

static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("order")
        .field(FieldDef::new("order_id"))
        .field(FieldDef::new("order_description"))
        .field(FieldDef::new("order_date").format(DATE_YYYYMMDD))
        .field(FieldDef::new("currency").format(r"^[A-Z]{3}$"))
        .field(FieldDef::new("tax").kind(ValueKind::Amount))
        .field(FieldDef::new("shipping_cost").kind(ValueKind::Amount))
        .wire("order_id", "orderid")
        .wire("order_description", "orderdescription")
        .wire("order_date", "orderdate")
        .wire("shipping_cost", "shipping")
        .build()
});

/// Order metadata attached to a transaction.
///
/// Dates post as `YYYYMMDD`; currency is an upper-case ISO 4217 code; tax and
/// shipping cost carry the amount value kind so they render with decimal
/// scale.
#[derive(Debug, Clone)]
pub struct Order {
    inner: Instance,
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

impl Order {
    /// Creates an empty order entity.
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Instance::new(&SCHEMA) }
    }

    /// Creates an order entity from field overrides, applied in order.
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

    /// The order schema shared by all instances.
    #[must_use]
    pub fn schema() -> &'static Schema {
        &SCHEMA
    }

    /// Writes a field value through the validation pipeline.
    ///
    /// # Errors
    ///
    /// Returns the attribute-level rejection, if any.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.inner.set(name, value)
    }

    /// Reads the current value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.inner.get(name)
    }

    /// This entity's contribution to the request parameter set.
    #[must_use]
    pub fn wire_params(&self) -> Vec<(String, String)> {
        self.inner.wire_params()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;
    use crate::error::GatewayError;

    #[test]
    fn test_wire_names() {
        let order = Order::with(vec![
            ("order_id", Value::from("ord-1")),
            ("order_description", Value::from("two widgets")),
            ("shipping_cost", Value::from(Decimal::from_str("4.95").unwrap())),
        ])
        .unwrap();

        let params = order.wire_params();
        assert!(params.contains(&("orderid".to_owned(), "ord-1".to_owned())));
        assert!(params.contains(&("orderdescription".to_owned(), "two widgets".to_owned())));
        assert!(params.contains(&("shipping".to_owned(), "4.95".to_owned())));
    }

    #[test]
    fn test_order_date_pattern() {
        let mut order = Order::new();
        assert!(order.set("order_date", "20260807").is_ok());
        let err = order.set("order_date", "20261301").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidAttributeFormat { field: "order_date", .. }));
    }

    #[test]
    fn test_currency_code() {
        let mut order = Order::new();
        assert!(order.set("currency", "USD").is_ok());
        assert!(order.set("currency", "usd").is_err());
        assert!(order.set("currency", "USDX").is_err());
    }

    #[test]
    fn test_tax_requires_amount_kind() {
        let mut order = Order::new();
        let err = order.set("tax", "1.00").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidAttributeType { field: "tax", .. }));
        assert!(order.set("tax", Decimal::from_str("1.00").unwrap()).is_ok());
    }
}
