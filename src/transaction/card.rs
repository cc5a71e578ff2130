//! Card-keyed transactions: sale, auth, credit, and validate.
//!
//! These four types submit full card data. Sale, auth, and credit require an
//! amount; validate is the gateway's zero-value card verification and carries
//! no amount field at all.

use std::sync::LazyLock;

use super::{BASE, TransactionRequest};
use crate::{
    entity::{Billing, Order, Shipping},
    error::Result,
    schema::{FieldDef, Instance, Schema, Value, ValueKind},
};

const CARD_NUMBER_FORMAT: &str = r"^\d{12,19}$";
const EXPIRATION_FORMAT: &str = r"^(0[1-9]|1[0-2])\d{2}$";
const CVV_FORMAT: &str = r"^\d{3,4}$";

fn card_schema(entity: &'static str, tx_type: &'static str) -> Schema {
    BASE.derive(entity)
        .field(FieldDef::new("type").default_value(tx_type).writable(false))
        .field(FieldDef::new("amount").kind(ValueKind::Amount).required())
        .field(FieldDef::new("card_number").format(CARD_NUMBER_FORMAT).required())
        .field(FieldDef::new("expiration_date").format(EXPIRATION_FORMAT).required())
        .field(FieldDef::new("cvv").format(CVV_FORMAT))
        .wire("card_number", "ccnumber")
        .wire("expiration_date", "ccexp")
        .build()
}

static SALE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| card_schema("sale", "sale"));
static AUTH_SCHEMA: LazyLock<Schema> = LazyLock::new(|| card_schema("auth", "auth"));
static CREDIT_SCHEMA: LazyLock<Schema> = LazyLock::new(|| card_schema("credit", "credit"));

// Validate is a card verification with no money movement; the amount field is
// removed outright rather than left optional.
static VALIDATE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    BASE.derive("validate")
        .field(FieldDef::new("type").default_value("validate").writable(false))
        .remove("amount")
        .field(FieldDef::new("card_number").format(CARD_NUMBER_FORMAT).required())
        .field(FieldDef::new("expiration_date").format(EXPIRATION_FORMAT).required())
        .field(FieldDef::new("cvv").format(CVV_FORMAT))
        .wire("card_number", "ccnumber")
        .wire("expiration_date", "ccexp")
        .build()
});

macro_rules! card_transaction {
    ($(#[$doc:meta])* $name:ident, $schema:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            inner: Instance,
            order: Option<Order>,
            billing: Option<Billing>,
            shipping: Option<Shipping>,
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
                Self {
                    inner: Instance::new(&$schema),
                    order: None,
                    billing: None,
                    shipping: None,
                }
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
                Ok(Self {
                    inner: Instance::with(&$schema, overrides)?,
                    order: None,
                    billing: None,
                    shipping: None,
                })
            }

            /// The schema shared by all transactions of this type.
            #[must_use]
            pub fn schema() -> &'static Schema {
                &$schema
            }

            /// Attaches order metadata; its parameters merge into the request.
            pub fn set_order(&mut self, order: Order) {
                self.order = Some(order);
            }

            /// Attaches billing details; their parameters merge into the
            /// request.
            pub fn set_billing(&mut self, billing: Billing) {
                self.billing = Some(billing);
            }

            /// Attaches shipping details; their parameters merge into the
            /// request.
            pub fn set_shipping(&mut self, shipping: Shipping) {
                self.shipping = Some(shipping);
            }
        }

        impl TransactionRequest for $name {
            fn instance(&self) -> &Instance {
                &self.inner
            }

            fn instance_mut(&mut self) -> &mut Instance {
                &mut self.inner
            }

            fn order(&self) -> Option<&Order> {
                self.order.as_ref()
            }

            fn billing(&self) -> Option<&Billing> {
                self.billing.as_ref()
            }

            fn shipping(&self) -> Option<&Shipping> {
                self.shipping.as_ref()
            }
        }
    };
}

card_transaction!(
    /// Immediate charge: authorization and capture in one step.
    ///
    /// Requires `amount`, `card_number`, and `expiration_date`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str::FromStr;
    ///
    /// use paygate::transaction::{Sale, TransactionRequest};
    /// use rust_decimal::Decimal;
    ///
    /// let mut sale = Sale::new();
    /// sale.set("amount", Decimal::from_str("10.00")?)?;
    /// sale.set("card_number", "4111111111111111")?;
    /// sale.set("expiration_date", "1229")?;
    /// assert!(sale.validate().is_ok());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    Sale,
    SALE_SCHEMA
);

card_transaction!(
    /// Authorization only; funds are held until a later [`super::Capture`].
    Auth,
    AUTH_SCHEMA
);

card_transaction!(
    /// Stand-alone credit: pushes funds to a card without a prior
    /// transaction.
    Credit,
    CREDIT_SCHEMA
);

card_transaction!(
    /// Zero-value card verification. Carries no amount; useful for checking
    /// card and address data before storing it.
    Validate,
    VALIDATE_SCHEMA
);
