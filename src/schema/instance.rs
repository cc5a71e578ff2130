//! Per-instance value store.
//!
//! An [`Instance`] pairs a schema reference with the current field values of
//! one entity. All reads and writes are table-driven against the schema; a
//! write routes through the field's validation pipeline, so an instance never
//! holds a value its schema rejects.

use std::collections::HashMap;

use super::{Schema, Value};
use crate::error::{GatewayError, Result};

/// Field values of one entity instance.
///
/// Construction applies schema defaults first (in declaration order), then
/// any caller-supplied overrides (in the order given). Writes to non-writable
/// fields are silently ignored; writes to undeclared names fail with
/// [`GatewayError::Validation`]; all other writes run the field's validation
/// pipeline and leave the instance untouched on rejection.
#[derive(Debug, Clone)]
pub struct Instance {
    schema: &'static Schema,
    values: HashMap<&'static str, Value>,
}

impl Instance {
    /// Creates an instance holding only the schema's defaults.
    #[must_use]
    pub fn new(schema: &'static Schema) -> Self {
        let mut values = HashMap::new();
        for def in schema.fields() {
            if let Some(default) = def.default() {
                values.insert(def.name(), default.clone());
            }
        }
        Self { schema, values }
    }

    /// Creates an instance from defaults plus caller overrides, applied in
    /// the order given.
    ///
    /// Overrides targeting non-writable fields are dropped without error,
    /// matching [`Instance::set`].
    ///
    /// # Errors
    ///
    /// Returns the first attribute-level rejection, or
    /// [`GatewayError::Validation`] for an override naming an undeclared
    /// field.
    pub fn with<I, V>(schema: &'static Schema, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'static str, V)>,
        V: Into<Value>,
    {
        let mut instance = Self::new(schema);
        for (name, value) in overrides {
            instance.set(name, value)?;
        }
        Ok(instance)
    }

    /// The schema this instance is bound to.
    #[must_use]
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Reads the current value of a field, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Reads a field as text, if set and textual.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_text)
    }

    /// Writes a field value.
    ///
    /// The write runs the field's validation pipeline (allowed values, then
    /// format, then kind); a rejected write does not happen, so the previous
    /// value stays readable. Writes to non-writable fields return `Ok` and do
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for an undeclared field name, or
    /// the attribute-level error from the failing pipeline stage.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let Some(def) = self.schema.field(name) else {
            return Err(GatewayError::Validation(format!(
                "unknown attribute '{name}' on entity '{}'",
                self.schema.entity()
            )));
        };
        if !def.is_writable() {
            return Ok(());
        }
        let value = value.into();
        def.check(&value)?;
        self.values.insert(def.name(), value);
        Ok(())
    }

    /// Clears a field back to unset. Non-writable fields keep their value;
    /// undeclared names are a no-op.
    pub fn unset(&mut self, name: &str) {
        if let Some(def) = self.schema.field(name)
            && def.is_writable()
        {
            self.values.remove(def.name());
        }
    }

    /// Snapshot of every declared field and its current value (including
    /// unset fields), in schema declaration order.
    #[must_use]
    pub fn as_mapping(&self) -> Vec<(&'static str, Option<&Value>)> {
        self.schema
            .fields()
            .iter()
            .map(|def| (def.name(), self.values.get(def.name())))
            .collect()
    }

    /// Snapshot of the fields currently holding a value, in schema
    /// declaration order.
    #[must_use]
    pub fn filled_mapping(&self) -> Vec<(&'static str, &Value)> {
        self.schema
            .fields()
            .iter()
            .filter_map(|def| self.values.get(def.name()).map(|value| (def.name(), value)))
            .collect()
    }

    /// True iff every required field holds a non-blank value.
    #[must_use]
    pub fn all_required_filled(&self) -> bool {
        self.first_missing_required().is_none()
    }

    /// Name of the first required field (in declaration order) that is unset
    /// or blank, if any.
    #[must_use]
    pub fn first_missing_required(&self) -> Option<&'static str> {
        self.schema
            .fields()
            .iter()
            .filter(|def| def.is_required())
            .find(|def| self.values.get(def.name()).is_none_or(Value::is_blank))
            .map(super::FieldDef::name)
    }

    /// The filled mapping rendered as gateway request parameters, with
    /// internal names replaced by their wire names.
    #[must_use]
    pub fn wire_params(&self) -> Vec<(String, String)> {
        self.filled_mapping()
            .into_iter()
            .map(|(name, value)| (self.schema.wire_name(name).to_owned(), value.to_wire()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;
    use crate::schema::{FieldDef, ValueKind};

    static TEST_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
        Schema::builder("test")
            .field(FieldDef::new("kind").default_value("fixed").writable(false))
            .field(FieldDef::new("name").required())
            .field(FieldDef::new("carrier").allowed(&["ups", "fedex", "dhl", "usps"]))
            .field(FieldDef::new("count").kind(ValueKind::Integer))
            .field(FieldDef::new("note").default_value("n/a"))
            .wire("name", "customername")
            .build()
    });

    #[test]
    fn test_defaults_applied_on_construction() {
        let instance = Instance::new(&TEST_SCHEMA);
        assert_eq!(instance.text("kind"), Some("fixed"));
        assert_eq!(instance.text("note"), Some("n/a"));
        assert!(instance.get("name").is_none());
    }

    #[test]
    fn test_overrides_applied_in_order() {
        let instance = Instance::with(
            &TEST_SCHEMA,
            vec![("name", "first"), ("note", "custom"), ("name", "second")],
        )
        .unwrap();
        assert_eq!(instance.text("name"), Some("second"));
        assert_eq!(instance.text("note"), Some("custom"));
    }

    #[test]
    fn test_override_to_non_writable_dropped_silently() {
        let instance = Instance::with(&TEST_SCHEMA, vec![("kind", "other")]).unwrap();
        assert_eq!(instance.text("kind"), Some("fixed"));
    }

    #[test]
    fn test_set_unknown_field_fails() {
        let mut instance = Instance::new(&TEST_SCHEMA);
        let err = instance.set("bogus", "x").unwrap_err();
        let crate::error::GatewayError::Validation(msg) = err else {
            panic!("expected Validation, got {err:?}");
        };
        assert!(msg.contains("bogus"));
        assert!(msg.contains("test"));
    }

    #[test]
    fn test_rejected_write_leaves_previous_value() {
        let mut instance = Instance::new(&TEST_SCHEMA);
        instance.set("carrier", "ups").unwrap();
        assert!(instance.set("carrier", "ground").is_err());
        assert_eq!(instance.text("carrier"), Some("ups"));
    }

    #[test]
    fn test_kind_check_on_write() {
        let mut instance = Instance::new(&TEST_SCHEMA);
        assert!(instance.set("count", 5).is_ok());
        assert!(instance.set("count", "five").is_err());
        assert_eq!(instance.get("count"), Some(&Value::Integer(5)));
    }

    #[test]
    fn test_unset() {
        let mut instance = Instance::new(&TEST_SCHEMA);
        instance.set("name", "x").unwrap();
        instance.unset("name");
        assert!(instance.get("name").is_none());

        // Non-writable fields keep their default.
        instance.unset("kind");
        assert_eq!(instance.text("kind"), Some("fixed"));
    }

    #[test]
    fn test_as_mapping_lists_every_declared_field() {
        let instance = Instance::new(&TEST_SCHEMA);
        let mapping = instance.as_mapping();
        let names: Vec<_> = mapping.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["kind", "name", "carrier", "count", "note"]);
        assert!(mapping.iter().any(|(name, value)| *name == "name" && value.is_none()));
    }

    #[test]
    fn test_filled_mapping_has_no_unset_entries() {
        let mut instance = Instance::new(&TEST_SCHEMA);
        instance.set("name", "abc").unwrap();
        let filled = instance.filled_mapping();
        assert_eq!(filled.len(), 3); // kind, name, note
        assert!(filled.iter().all(|(_, value)| !value.is_blank()));
    }

    #[test]
    fn test_required_tracking() {
        let mut instance = Instance::new(&TEST_SCHEMA);
        assert!(!instance.all_required_filled());
        assert_eq!(instance.first_missing_required(), Some("name"));

        // Blank text counts as missing.
        instance.set("name", "").unwrap();
        assert_eq!(instance.first_missing_required(), Some("name"));

        instance.set("name", "abc").unwrap();
        assert!(instance.all_required_filled());
    }

    #[test]
    fn test_wire_params_renames_and_skips_unset() {
        let mut instance = Instance::new(&TEST_SCHEMA);
        instance.set("name", "abc").unwrap();
        let params = instance.wire_params();
        assert!(params.contains(&("customername".to_owned(), "abc".to_owned())));
        assert!(params.contains(&("kind".to_owned(), "fixed".to_owned())));
        assert!(!params.iter().any(|(key, _)| key == "carrier"));
    }
}
