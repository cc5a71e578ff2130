//! Declarative field schemas for gateway entities.
//!
//! Every entity in this crate (billing, shipping, order, and each transaction
//! type) is described by a [`Schema`]: an ordered registry of [`FieldDef`]s
//! plus a [`WireMap`] for request serialization. Schemas are built once with
//! [`SchemaBuilder`], stored in process-wide `LazyLock` statics, and shared
//! read-only by every instance of the entity.
//!
//! Field writes run a three-stage validation pipeline, in order:
//! allowed-values check, format check, value-kind check. Each stage fails
//! independently with its own error variant carrying the offending value and
//! the constraint that rejected it.
//!
//! Deriving one schema from another copies the parent's registry at
//! derivation time; the derived builder owns its copy, so later changes on
//! either side never leak across the hierarchy.
//!
//! # Examples
//!
//! ```
//! use paygate::schema::{FieldDef, Schema, ValueKind};
//!
//! let schema = Schema::builder("example")
//!     .field(FieldDef::new("amount").kind(ValueKind::Amount).required())
//!     .field(FieldDef::new("carrier").allowed(&["ups", "fedex", "dhl", "usps"]))
//!     .wire("amount", "amount")
//!     .build();
//!
//! assert!(schema.has("carrier"));
//! assert_eq!(schema.required_fields(), vec!["amount"]);
//! ```

use std::fmt;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{GatewayError, Result};

mod instance;
pub mod wire;

pub use instance::Instance;
pub use wire::WireMap;

/// Kind constraint for a field value.
///
/// The gateway's wire format is flat text, so the value space is small: free
/// text, whole numbers, and monetary amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Arbitrary text.
    Text,
    /// Whole number.
    Integer,
    /// Monetary amount with decimal scale.
    Amount,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Integer => write!(f, "integer"),
            Self::Amount => write!(f, "amount"),
        }
    }
}

/// A field value held by an entity instance.
///
/// Every value has a canonical wire rendering used both for constraint checks
/// (allowed values, format patterns match against the rendering) and for the
/// posted parameter set.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Arbitrary text.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Monetary amount; renders with its declared scale (`10.00`, not `10`).
    Amount(Decimal),
}

impl Value {
    /// Returns the kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Integer(_) => ValueKind::Integer,
            Self::Amount(_) => ValueKind::Amount,
        }
    }

    /// Renders the value as it would appear in a posted parameter.
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.to_string()
    }

    /// Returns the text content when this is a [`Value::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for an empty text value; required-field checks treat these the
    /// same as absent values.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Amount(d) => write!(f, "{d}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Amount(d)
    }
}

/// Declarative definition of a single entity field.
///
/// A definition belongs to exactly one schema. Options mirror the gateway's
/// needs: an optional kind constraint, an optional closed value set, an
/// optional format pattern, an optional default, a writability flag (default
/// writable), and a required flag (default optional).
///
/// Constraint methods that take schema-shaping input (`allowed`, `format`)
/// treat bad input as a programmer error and panic at declaration time;
/// schemas live in statics, so these surface as startup faults rather than
/// submission-time failures.
#[derive(Debug, Clone)]
pub struct FieldDef {
    name: &'static str,
    kinds: Option<Vec<ValueKind>>,
    allowed: Option<Vec<&'static str>>,
    format: Option<Regex>,
    default: Option<Value>,
    writable: bool,
    required: bool,
}

impl FieldDef {
    /// Starts a definition for the named field with no constraints, writable,
    /// and optional.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            kinds: None,
            allowed: None,
            format: None,
            default: None,
            writable: true,
            required: false,
        }
    }

    /// Adds an accepted value kind. May be called more than once to accept
    /// several kinds.
    #[must_use]
    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kinds.get_or_insert_with(Vec::new).push(kind);
        self
    }

    /// Restricts the field to a closed set of wire-rendered values.
    ///
    /// # Panics
    ///
    /// Panics when `values` is empty; an empty allowed set would make the
    /// field unwritable by accident and is always a declaration mistake.
    #[must_use]
    pub fn allowed(mut self, values: &[&'static str]) -> Self {
        assert!(!values.is_empty(), "field '{}': allowed value set must not be empty", self.name);
        self.allowed = Some(values.to_vec());
        self
    }

    /// Restricts the field's wire rendering to a regex pattern.
    ///
    /// # Panics
    ///
    /// Panics when `pattern` is not a valid regex.
    #[must_use]
    pub fn format(mut self, pattern: &str) -> Self {
        let compiled = Regex::new(pattern).unwrap_or_else(|e| {
            panic!("field '{}': invalid format pattern /{pattern}/: {e}", self.name)
        });
        self.format = Some(compiled);
        self
    }

    /// Sets the default value applied at instance construction.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets whether instance writes may change the field. Non-writable fields
    /// keep their default; writes to them are silently ignored.
    #[must_use]
    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    /// Marks the field as required at submission time.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The field's internal name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field's default value, when declared.
    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// True when the field must be filled before submission.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// True when instance writes may change the field.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Runs the validation pipeline against a candidate value.
    ///
    /// Order matters: allowed-values check, then format check, then kind
    /// check. The first failing stage rejects the value with its own error
    /// variant; later stages never run.
    pub(crate) fn check(&self, value: &Value) -> Result<()> {
        let rendered = value.to_wire();

        if let Some(allowed) = &self.allowed
            && !allowed.iter().any(|candidate| *candidate == rendered)
        {
            return Err(GatewayError::InvalidAttributeValue {
                field: self.name,
                value: rendered,
                allowed: allowed.join(", "),
            });
        }

        if let Some(format) = &self.format
            && !format.is_match(&rendered)
        {
            return Err(GatewayError::InvalidAttributeFormat {
                field: self.name,
                value: rendered,
                pattern: format.as_str().to_owned(),
            });
        }

        if let Some(kinds) = &self.kinds
            && !kinds.contains(&value.kind())
        {
            let expected =
                kinds.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
            return Err(GatewayError::InvalidAttributeType {
                field: self.name,
                value: value.kind().to_string(),
                expected,
            });
        }

        Ok(())
    }
}

/// Ordered field registry for one entity type.
///
/// Built once per entity with [`Schema::builder`] (or [`Schema::derive`] for
/// entities extending another), then held in a `LazyLock` static and shared
/// read-only by every instance.
#[derive(Debug, Clone)]
pub struct Schema {
    entity: &'static str,
    fields: Vec<FieldDef>,
    wire: WireMap,
}

impl Schema {
    /// Starts an empty schema for the named entity.
    #[must_use]
    pub fn builder(entity: &'static str) -> SchemaBuilder {
        SchemaBuilder { entity, fields: Vec::new(), wire: WireMap::new() }
    }

    /// Starts a schema for a derived entity, seeded with a copy of this
    /// schema's field definitions and wire mappings.
    ///
    /// The copy is taken now; changes made later through either builder (or
    /// to either built schema's statics) never affect the other side.
    #[must_use]
    pub fn derive(&self, entity: &'static str) -> SchemaBuilder {
        SchemaBuilder { entity, fields: self.fields.clone(), wire: self.wire.clone() }
    }

    /// The entity name this schema describes.
    #[must_use]
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// True when the named field is declared on this schema.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Looks up a field definition by internal name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|def| def.name == name)
    }

    /// All field definitions, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Names of the fields declared required, in declaration order.
    #[must_use]
    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields.iter().filter(|def| def.required).map(|def| def.name).collect()
    }

    /// Resolves an internal field name to its gateway wire name.
    #[must_use]
    pub fn wire_name<'a>(&self, internal: &'a str) -> &'a str {
        self.wire.resolve(internal)
    }
}

/// Builder assembling a [`Schema`].
///
/// Field declaration order is preserved; it drives default application order
/// and the required-field walk.
#[derive(Debug)]
pub struct SchemaBuilder {
    entity: &'static str,
    fields: Vec<FieldDef>,
    wire: WireMap,
}

impl SchemaBuilder {
    /// Declares a field on this schema.
    ///
    /// Re-declaring an existing name replaces the prior definition in place,
    /// leaving no residual constraints from it.
    ///
    /// # Panics
    ///
    /// Panics when the definition's default value violates its own
    /// constraints; a schema whose defaults cannot be assigned is a
    /// declaration mistake.
    #[must_use]
    pub fn field(mut self, def: FieldDef) -> Self {
        if let Some(default) = &def.default
            && let Err(e) = def.check(default)
        {
            panic!("schema '{}': default for field '{}' is invalid: {e}", self.entity, def.name);
        }

        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == def.name) {
            *existing = def;
        } else {
            self.fields.push(def);
        }
        self
    }

    /// Removes a declared field and its wire mapping; no-op when the name is
    /// not declared on this schema.
    #[must_use]
    pub fn remove(mut self, name: &str) -> Self {
        self.fields.retain(|def| def.name != name);
        self.wire.remove(name);
        self
    }

    /// Maps an internal field name to the gateway parameter name it posts as.
    #[must_use]
    pub fn wire(mut self, internal: &'static str, wire: &'static str) -> Self {
        self.wire.insert(internal, wire);
        self
    }

    /// Finalizes the schema.
    #[must_use]
    pub fn build(self) -> Schema {
        Schema { entity: self.entity, fields: self.fields, wire: self.wire }
    }
}
