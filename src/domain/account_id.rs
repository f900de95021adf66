//! Type-safe account identifier.
//!
//! [`AccountId`] is a newtype wrapper around the account's address string
//! so that account identifiers cannot be confused with token symbols or
//! other free-form strings flowing through the gateway.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of an account as known by the asset ledgers.
///
/// Used for the pool manager, the pool's own custody account, and every
/// trader. Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Creates an `AccountId` from any string-like address.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for AccountId {
    fn from(address: String) -> Self {
        Self(address)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_is_raw_address() {
        let id = AccountId::new("0xabc");
        assert_eq!(format!("{id}"), "0xabc");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = AccountId::new("0xabc");
        let Ok(json) = serde_json::to_string(&id) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"0xabc\"");
    }

    #[test]
    fn equality_is_case_sensitive() {
        assert_ne!(AccountId::new("0xABC"), AccountId::new("0xabc"));
        assert_eq!(AccountId::from("0xabc"), AccountId::from("0xabc".to_string()));
    }

    #[test]
    fn hash_works_in_hashmap() {
        use std::collections::HashMap;
        let id = AccountId::new("trader");
        let mut map = HashMap::new();
        map.insert(id.clone(), 7u128);
        assert_eq!(map.get(&id), Some(&7));
    }
}
