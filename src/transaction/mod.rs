//! Gateway transaction types.
//!
//! Every gateway operation is a transaction entity: a schema-backed request
//! object with a fixed `type` discriminator, per-type required fields, and a
//! serialization into the gateway's flat parameter set.
//!
//! All types derive their schema from a shared base (transaction id, amount,
//! purchase-order number); the derivation copies the base registry, so each
//! type owns its fields independently.
//!
//! - [`Sale`], [`Auth`], [`Credit`]: card-keyed; require amount and card data
//! - [`Validate`]: card-keyed zero-value verification; no amount at all
//! - [`Capture`], [`Void`], [`Refund`]: keyed off a prior `transaction_id`
//! - [`Update`]: keyed off a prior `transaction_id`, with shipping/order
//!   metadata; validates its key explicitly instead of the required-field walk

use std::sync::LazyLock;

use crate::{
    entity::{Billing, Order, Shipping},
    error::{GatewayError, Result},
    schema::{FieldDef, Instance, Schema, Value, ValueKind},
};

mod card;
mod keyed;
mod update;

pub use card::{Auth, Credit, Sale, Validate};
pub use keyed::{Capture, Refund, Void};
pub use update::Update;

/// Fields shared by every transaction type.
///
/// `type` is declared non-writable here; each derived schema re-declares it
/// with that type's fixed discriminator as the default.
pub(crate) static BASE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::builder("transaction")
        .field(FieldDef::new("type").writable(false))
        .field(FieldDef::new("transaction_id"))
        .field(FieldDef::new("amount").kind(ValueKind::Amount))
        .field(FieldDef::new("po_number"))
        .wire("transaction_id", "transactionid")
        .wire("po_number", "ponumber")
        .build()
});

/// A request object for one gateway operation.
///
/// The trait supplies the shared behavior: table-driven field access,
/// required-field validation, and serialization to the posted parameter set.
/// Types carrying attached [`Order`]/[`Billing`]/[`Shipping`] entities
/// override the accessors so their parameters merge into the request.
pub trait TransactionRequest {
    /// The transaction's value store.
    fn instance(&self) -> &Instance;

    /// Mutable access to the transaction's value store.
    fn instance_mut(&mut self) -> &mut Instance;

    /// Attached order metadata, when the type supports it.
    fn order(&self) -> Option<&Order> {
        None
    }

    /// Attached billing details, when the type supports it.
    fn billing(&self) -> Option<&Billing> {
        None
    }

    /// Attached shipping details, when the type supports it.
    fn shipping(&self) -> Option<&Shipping> {
        None
    }

    /// The fixed `type` discriminator (`"sale"`, `"void"`, ...).
    fn kind(&self) -> &str {
        self.instance().text("type").unwrap_or("")
    }

    /// Writes a field value through the schema's validation pipeline.
    ///
    /// # Errors
    ///
    /// Returns the attribute-level rejection, if any.
    fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()>
    where
        Self: Sized,
    {
        self.instance_mut().set(name, value)
    }

    /// Reads the current value of a field.
    fn get(&self, name: &str) -> Option<&Value> {
        self.instance().get(name)
    }

    /// Checks the transaction is fit for submission.
    ///
    /// The default walks the schema's required fields in declaration order
    /// and reports the first one that is unset or blank.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] naming the first unmet required
    /// field.
    fn validate(&self) -> Result<()> {
        if let Some(missing) = self.instance().first_missing_required() {
            return Err(GatewayError::Validation(format!(
                "required field '{missing}' is missing on '{}'",
                self.instance().schema().entity()
            )));
        }
        Ok(())
    }

    /// The exact parameter set to post for this transaction: the filled
    /// mapping renamed per the wire map, plus any attached entity's
    /// parameters.
    fn request_attributes(&self) -> Vec<(String, String)> {
        let mut params = self.instance().wire_params();
        if let Some(order) = self.order() {
            params.extend(order.wire_params());
        }
        if let Some(billing) = self.billing() {
            params.extend(billing.wire_params());
        }
        if let Some(shipping) = self.shipping() {
            params.extend(shipping.wire_params());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_schema_fields() {
        assert!(BASE.has("type"));
        assert!(BASE.has("transaction_id"));
        assert!(BASE.has("amount"));
        assert!(BASE.has("po_number"));
        assert!(BASE.required_fields().is_empty());
    }

    #[test]
    fn test_base_wire_names() {
        assert_eq!(BASE.wire_name("transaction_id"), "transactionid");
        assert_eq!(BASE.wire_name("po_number"), "ponumber");
        assert_eq!(BASE.wire_name("amount"), "amount");
    }

    #[test]
    fn test_type_not_writable_on_base() {
        assert!(!BASE.field("type").unwrap().is_writable());
    }
}
