//! Enumeration types shared across the Abyssal workspace.
//!
//! Both key sets of the game's bundle arithmetic are closed enumerations:
//! [`Resource`] for station stockpiles and build costs, and the ship kinds
//! defined in [`catalog`](crate::catalog). Keeping them as enums (rather
//! than free-form strings) makes catalog lookups exhaustive at compile time.

use serde::{Deserialize, Serialize};

/// A resource kind held by stations and consumed by construction.
///
/// The set is closed; missing keys in a bundle are treated as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// Hull plating and light construction material.
    Aluminium,
    /// Heavy construction material.
    Steel,
    /// Reactor fuel.
    Plutonium,
    /// Station power reserve.
    Energy,
}

impl Resource {
    /// All resource kinds, in canonical order.
    pub const ALL: [Self; 4] = [Self::Aluminium, Self::Steel, Self::Plutonium, Self::Energy];

    /// Return the canonical lowercase name (database/config representation).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aluminium => "aluminium",
            Self::Steel => "steel",
            Self::Plutonium => "plutonium",
            Self::Energy => "energy",
        }
    }

    /// Parse a canonical lowercase name back into a [`Resource`].
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == name)
    }
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The mission a dispatched fleet is flying.
///
/// The base fleet never carries an action; non-base fleets receive one at
/// dispatch time and lose it when they arrive back home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FleetAction {
    /// Attack the target player's fleets.
    Attack,
    /// Reinforce the target player's defense.
    Defend,
}

impl FleetAction {
    /// Return the canonical database representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attack => "ATTACK",
            Self::Defend => "DEFEND",
        }
    }

    /// Parse the canonical database representation.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "ATTACK" => Some(Self::Attack),
            "DEFEND" => Some(Self::Defend),
            _ => None,
        }
    }
}

impl core::fmt::Display for FleetAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Combat class of a ship kind.
///
/// Reserved for future combat-rule refinement (EMP disables, first-strike
/// rounds); the core loss formula does not branch on it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipClass {
    /// Conventional combat vessel.
    Normal,
    /// Electromagnetic-pulse vessel.
    Emp,
    /// Opens fire before the regular exchange.
    FirstStrike,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_names_roundtrip() {
        for resource in Resource::ALL {
            assert_eq!(Resource::parse(resource.as_str()), Some(resource));
        }
        assert_eq!(Resource::parse("unobtainium"), None);
    }

    #[test]
    fn fleet_action_names_roundtrip() {
        assert_eq!(FleetAction::parse("ATTACK"), Some(FleetAction::Attack));
        assert_eq!(FleetAction::parse("DEFEND"), Some(FleetAction::Defend));
        assert_eq!(FleetAction::parse("attack"), None);
    }

    #[test]
    fn resource_serializes_lowercase() {
        let json = serde_json::to_string(&Resource::Plutonium).ok();
        assert_eq!(json.as_deref(), Some("\"plutonium\""));
    }
}
