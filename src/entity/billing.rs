//! Billing address entity.

use std::sync::LazyLock;

use crate::{
    error::Result,
    schema::{FieldDef, Instance, Schema, Value},
};

static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("billing")
        .field(FieldDef::new("first_name"))
        .field(FieldDef::new("last_name"))
        .field(FieldDef::new("company"))
        .field(FieldDef::new("address_1"))
        .field(FieldDef::new("address_2"))
        .field(FieldDef::new("city"))
        .field(FieldDef::new("state"))
        .field(FieldDef::new("zip"))
        .field(FieldDef::new("country"))
        .field(FieldDef::new("phone"))
        .field(FieldDef::new("fax"))
        .field(FieldDef::new("email").format(r"^[^@\s]+@[^@\s]+\.[^@\s]+$"))
        .field(FieldDef::new("website"))
        .wire("first_name", "firstname")
        .wire("last_name", "lastname")
        .wire("address_1", "address1")
        .wire("address_2", "address2")
        .build()
});

/// Cardholder billing details.
///
/// All fields are optional free text except `email`, which must look like an
/// email address when present. Wire names follow the gateway's concatenated
/// style (`first_name` posts as `firstname`).
///
/// # Examples
///
/// ```
/// use paygate::entity::Billing;
///
/// let mut billing = Billing::new();
/// billing.set("first_name", "Ada")?;
/// billing.set("zip", "94025")?;
/// # Ok::<(), paygate::error::GatewayError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Billing {
    inner: Instance,
}

impl Default for Billing {
    fn default() -> Self {
        Self::new()
    }
}

impl Billing {
    /// Creates an empty billing entity.
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Instance::new(&SCHEMA) }
    }

    /// Creates a billing entity from field overrides, applied in order.
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

    /// The billing schema shared by all instances.
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
    use super::*;
    use crate::error::GatewayError;

    #[test]
    fn test_wire_names() {
        let billing = Billing::with(vec![
            ("first_name", "Ada"),
            ("last_name", "Lovelace"),
            ("address_1", "1 Main St"),
            ("city", "Menlo Park"),
        ])
        .unwrap();

        let params = billing.wire_params();
        assert!(params.contains(&("firstname".to_owned(), "Ada".to_owned())));
        assert!(params.contains(&("lastname".to_owned(), "Lovelace".to_owned())));
        assert!(params.contains(&("address1".to_owned(), "1 Main St".to_owned())));
        assert!(params.contains(&("city".to_owned(), "Menlo Park".to_owned())));
    }

    #[test]
    fn test_email_format_enforced() {
        let mut billing = Billing::new();
        let err = billing.set("email", "not-an-email").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidAttributeFormat { field: "email", .. }));
        assert!(billing.set("email", "ada@example.com").is_ok());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut billing = Billing::new();
        assert!(billing.set("shipping_carrier", "ups").is_err());
    }
}
