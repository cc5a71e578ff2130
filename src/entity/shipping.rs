//! Shipping address entity.

use std::sync::LazyLock;

use crate::{
    error::Result,
    schema::{FieldDef, Instance, Schema, Value},
};

static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("shipping")
        .field(FieldDef::new("first_name"))
        .field(FieldDef::new("last_name"))
        .field(FieldDef::new("company"))
        .field(FieldDef::new("address_1"))
        .field(FieldDef::new("address_2"))
        .field(FieldDef::new("city"))
        .field(FieldDef::new("state"))
        .field(FieldDef::new("zip"))
        .field(FieldDef::new("country"))
        .field(FieldDef::new("email").format(r"^[^@\s]+@[^@\s]+\.[^@\s]+$"))
        .wire("first_name", "shipping_firstname")
        .wire("last_name", "shipping_lastname")
        .wire("company", "shipping_company")
        .wire("address_1", "shipping_address1")
        .wire("address_2", "shipping_address2")
        .wire("city", "shipping_city")
        .wire("state", "shipping_state")
        .wire("zip", "shipping_zip")
        .wire("country", "shipping_country")
        .wire("email", "shipping_email")
        .build()
});

/// Shipping destination details.
///
/// Shares the billing entity's field shape, but every field posts under the
/// gateway's `shipping_` parameter prefix.
#[derive(Debug, Clone)]
pub struct Shipping {
    inner: Instance,
}

impl Default for Shipping {
    fn default() -> Self {
        Self::new()
    }
}

impl Shipping {
    /// Creates an empty shipping entity.
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Instance::new(&SCHEMA) }
    }

    /// Creates a shipping entity from field overrides, applied in order.
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

    /// The shipping schema shared by all instances.
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
