//! Keyed numeric bundles: the common shape of resource stockpiles and
//! ship compositions.
//!
//! A [`Bundle`] maps a closed key set (an enum) to signed 64-bit counts.
//! Missing keys are zero. The arithmetic over bundles lives in the
//! `abyssal-ledger` crate; this module only defines the container and its
//! access operations.
//!
//! Counts are signed so that ledger subtraction can report deficits without
//! clamping -- callers decide whether a negative result is an error (see the
//! ledger's `is_negative` / `sufficient` checks). All engine stages produce
//! non-negative bundles by construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::ShipKind;
use crate::enums::Resource;

/// A map from a closed key set to counts, with missing-key-is-zero semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bundle<K: Ord>(BTreeMap<K, i64>);

/// A station's resource stockpile or a build cost.
pub type ResourceBundle = Bundle<Resource>;

/// The ships held by a fleet, counted per kind.
pub type ShipComposition = Bundle<ShipKind>;

impl<K: Ord> Default for Bundle<K> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<K: Ord + Copy> Bundle<K> {
    /// Create an empty bundle (all keys zero).
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Return the count for `key`, zero if absent.
    pub fn get(&self, key: K) -> i64 {
        self.0.get(&key).copied().unwrap_or(0)
    }

    /// Set the count for `key`. A zero value is stored explicitly; stored
    /// zeroes and absent keys are indistinguishable through [`Bundle::get`].
    pub fn set(&mut self, key: K, value: i64) {
        self.0.insert(key, value);
    }

    /// Iterate over the explicitly stored `(key, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (K, i64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    /// Return whether the bundle stores no entries at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of explicitly stored entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Remove every entry, returning the bundle to all-zero.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<K: Ord + Copy> FromIterator<(K, i64)> for Bundle<K> {
    fn from_iter<T: IntoIterator<Item = (K, i64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<K: Ord + Copy, const N: usize> From<[(K, i64); N]> for Bundle<K> {
    fn from(entries: [(K, i64); N]) -> Self {
        entries.into_iter().collect()
    }
}
