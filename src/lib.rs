//! Paygate: client library for a form-encoded payment gateway.
//!
//! The gateway exposes one HTTPS endpoint. Requests are flat
//! `application/x-www-form-urlencoded` parameter sets; replies are flat
//! form-encoded key/value text. This crate supplies:
//!
//! - **Schema engine** ([`schema`]): declarative per-field definitions
//!   (allowed values, format patterns, value kinds, defaults, writability,
//!   required flags) with a three-stage validation pipeline on every write
//! - **Domain entities** ([`entity`]): billing, shipping, and order metadata
//!   with per-entity wire-name mappings
//! - **Transactions** ([`transaction`]): sale, auth, capture, void, refund,
//!   credit, update, and validate, each with its own derived schema and fixed
//!   `type` discriminator
//! - **Response decoding** ([`response`]): outcome classification plus
//!   human-readable lookups for response, authorization, CVV, and AVS codes
//! - **Glue** ([`gateway`], [`credentials`], [`transport`]): the client that
//!   validates, posts, and decodes
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │    Caller       │  builds a transaction entity
//! └────────┬────────┘
//!          │ validate() → request_attributes()
//! ┌────────▼────────────────────────────────────┐
//! │            Gateway (this crate)             │
//! │  ┌──────────────┐      ┌─────────────────┐  │
//! │  │ Transaction  │──────│  Credentials    │  │
//! │  │ schemas      │      │  (merged params)│  │
//! │  └──────────────┘      └─────────────────┘  │
//! └────────┬────────────────────────────────────┘
//!          │ HTTPS form POST
//! ┌────────▼────────┐
//! │ Payment gateway │  flat key/value reply → Response
//! └─────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::str::FromStr;
//!
//! use paygate::{
//!     Credentials, Gateway,
//!     transaction::{Sale, TransactionRequest},
//! };
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> paygate::error::Result<()> {
//! let gateway = Gateway::new(Credentials::username_password("demo", "password")?)?;
//!
//! let mut sale = Sale::new();
//! sale.set("amount", Decimal::from_str("10.00").unwrap())?;
//! sale.set("card_number", "4111111111111111")?;
//! sale.set("expiration_date", "1229")?;
//! sale.set("cvv", "999")?;
//!
//! let response = gateway.process(&sale).await?;
//! if response.is_approved() {
//!     println!("transaction {}", response.transaction_id().unwrap_or("?"));
//! } else {
//!     println!("{}: {}", response.code().unwrap_or("?"), response.message());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Validation model
//!
//! Field writes fail fast: a rejected value never lands, so an entity cannot
//! hold data its schema rejects. Entity-level validation (required fields,
//! the update transaction's id check) runs at [`Gateway::process`] time,
//! before any network call. Transport failures surface as
//! [`error::GatewayError::Connection`] with guidance distinguishing timeouts
//! from likely DNS breakage.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod credentials;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod response;
pub mod schema;
pub mod transaction;
pub mod transport;

pub use credentials::Credentials;
pub use error::{GatewayError, Result};
pub use gateway::{Gateway, GatewayConfig};
pub use response::Response;
pub use transaction::TransactionRequest;
