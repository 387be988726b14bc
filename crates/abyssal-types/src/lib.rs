//! Shared type definitions for the Abyssal world engine.
//!
//! This crate is the single source of truth for all types used across the
//! Abyssal workspace: entity structs, identifier newtypes, the keyed
//! bundle container and the static ship catalog.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- Enumeration types (resources, fleet actions, ship classes)
//! - [`bundle`] -- Keyed numeric bundles for stockpiles and compositions
//! - [`catalog`] -- The static ship catalog and its per-kind reference data
//! - [`entities`] -- Persistent world entities (players, stations, fleets, orders)

pub mod bundle;
pub mod catalog;
pub mod entities;
pub mod enums;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use bundle::{Bundle, ResourceBundle, ShipComposition};
pub use catalog::{ShipKind, ShipSpec};
pub use entities::{BuildOrder, BuildTarget, Coordinates, Fleet, Player, Station};
pub use enums::{FleetAction, Resource, ShipClass};
pub use ids::{BuildOrderId, FleetId, PlayerId, StationId};
