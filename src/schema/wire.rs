//! Wire-name mapping.
//!
//! This module translates internal field names into the parameter names the
//! gateway expects (e.g. `transaction_id` posts as `transactionid`).

/// Static mapping from internal field names to gateway parameter names.
///
/// Fields without an explicit entry use their own name as the wire name, so
/// an empty map behaves as the identity mapping.
#[derive(Debug, Clone, Default)]
pub struct WireMap {
    entries: Vec<(&'static str, &'static str)>,
}

impl WireMap {
    /// Creates an empty wire map (identity mapping for every field).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mapping, replacing any prior entry for the same internal
    /// name.
    pub(crate) fn insert(&mut self, internal: &'static str, wire: &'static str) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == internal) {
            entry.1 = wire;
        } else {
            self.entries.push((internal, wire));
        }
    }

    /// Drops the mapping for an internal name; no-op when absent.
    pub(crate) fn remove(&mut self, internal: &str) {
        self.entries.retain(|(name, _)| *name != internal);
    }

    /// Resolves an internal field name to its wire name.
    ///
    /// Returns the mapped name when one is registered, otherwise the internal
    /// name unchanged.
    #[must_use]
    pub fn resolve<'a>(&self, internal: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(name, _)| *name == internal)
            .map_or(internal, |(_, wire)| *wire)
    }

    /// Returns true if any custom mapping is registered.
    #[must_use]
    pub fn has_mappings(&self) -> bool {
        !self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_map_is_identity() {
        let map = WireMap::new();
        assert_eq!(map.resolve("transaction_id"), "transaction_id");
        assert!(!map.has_mappings());
    }

    #[test]
    fn test_resolve_mapped_name() {
        let mut map = WireMap::new();
        map.insert("transaction_id", "transactionid");
        map.insert("po_number", "ponumber");

        assert_eq!(map.resolve("transaction_id"), "transactionid");
        assert_eq!(map.resolve("po_number"), "ponumber");
        assert_eq!(map.resolve("amount"), "amount");
        assert!(map.has_mappings());
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut map = WireMap::new();
        map.insert("order_id", "order");
        map.insert("order_id", "orderid");

        assert_eq!(map.resolve("order_id"), "orderid");
    }

    #[test]
    fn test_remove_restores_identity() {
        let mut map = WireMap::new();
        map.insert("order_id", "orderid");
        map.remove("order_id");

        assert_eq!(map.resolve("order_id"), "order_id");
        assert!(!map.has_mappings());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut map = WireMap::new();
        map.insert("order_id", "orderid");
        map.remove("unknown");

        assert_eq!(map.resolve("order_id"), "orderid");
    }
}
