//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every entity in the game has a strongly-typed ID to prevent accidental
//! mixing of identifiers at compile time. All IDs use UUID v7 (time-ordered)
//! for efficient database indexing.
//!
//! The `new()` constructors exist for app-side generation (tests, seed data);
//! production rows usually arrive with IDs already assigned by the request
//! layer that created them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a player.
    PlayerId
}

define_id! {
    /// Unique identifier for a station.
    StationId
}

define_id! {
    /// Unique identifier for a fleet.
    FleetId
}

define_id! {
    /// Unique identifier for a build order.
    BuildOrderId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let player = PlayerId::new();
        let station = StationId::new();
        // These are different types -- the compiler enforces no mixing.
        assert_ne!(player.into_inner(), Uuid::nil());
        assert_ne!(station.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_roundtrips_through_uuid() {
        let id = FleetId::new();
        let raw: Uuid = id.into();
        assert_eq!(FleetId::from(raw), id);
    }

    #[test]
    fn ids_serialize_as_plain_uuids() {
        let id = BuildOrderId::new();
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json, serde_json::to_string(&id.into_inner()).ok());
    }
}
