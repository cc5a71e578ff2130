//! Static gateway code tables.
//!
//! The tables ship embedded as TOML (`codes.toml`) and are parsed once into
//! process-wide maps on first use. Lookups never fail: unknown codes resolve
//! to a documented fallback string, so a gateway rolling out new codes cannot
//! break response decoding. Callers distinguish "no code supplied" from
//! "unknown code" before the lookup (see [`crate::response::Response`]).

use std::{collections::HashMap, sync::LazyLock};

use serde::Deserialize;

/// Fallback for a `response_code` missing from the message table.
pub const UNKNOWN_MESSAGE: &str = "Unrecognized gateway response code";

/// Fallback for an authorization code missing from the issuer table.
pub const UNKNOWN_AUTH_CODE: &str = "Unrecognized authorization code";

/// Fallback for a CVV code missing from the verification table.
pub const UNKNOWN_CVV_CODE: &str = "Unrecognized card security code response";

/// Fallback for an AVS code missing from the verification table.
pub const UNKNOWN_AVS_CODE: &str = "Unrecognized address verification response";

#[derive(Debug, Deserialize)]
struct CodeTables {
    messages: HashMap<String, String>,
    auth_codes: HashMap<String, String>,
    cvv: HashMap<String, String>,
    avs: HashMap<String, String>,
}

static TABLES: LazyLock<CodeTables> = LazyLock::new(|| {
    toml::from_str(include_str!("codes.toml")).expect("embedded code tables must parse")
});

fn lookup(table: &'static HashMap<String, String>, code: &str, fallback: &'static str) -> &'static str {
    table.get(code).map_or(fallback, String::as_str)
}

/// Human-readable message for a gateway `response_code`.
pub(crate) fn message(code: &str) -> &'static str {
    let tables: &'static CodeTables = &TABLES;
    lookup(&tables.messages, code, UNKNOWN_MESSAGE)
}

/// Issuer description for an authorization code.
pub(crate) fn auth_code_message(code: &str) -> &'static str {
    let tables: &'static CodeTables = &TABLES;
    lookup(&tables.auth_codes, code, UNKNOWN_AUTH_CODE)
}

/// Description for a CVV verification code.
pub(crate) fn cvv_message(code: &str) -> &'static str {
    let tables: &'static CodeTables = &TABLES;
    lookup(&tables.cvv, code, UNKNOWN_CVV_CODE)
}

/// Description for an AVS verification code.
pub(crate) fn avs_message(code: &str) -> &'static str {
    let tables: &'static CodeTables = &TABLES;
    lookup(&tables.avs, code, UNKNOWN_AVS_CODE)
}
