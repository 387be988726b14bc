//! The static ship catalog: reference data for every buildable ship kind.
//!
//! The catalog is a closed, versioned reference table baked into the binary
//! and never mutated at runtime. Because [`ShipKind`] is an enum and
//! [`ShipKind::spec`] is an exhaustive match, a composition can never
//! reference a kind the catalog does not know -- the "unknown ship kind"
//! failure mode is unrepresentable.

use serde::{Deserialize, Serialize};

use crate::bundle::ResourceBundle;
use crate::enums::{Resource, ShipClass};

/// Static reference data for one ship kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipSpec {
    /// Combat class tag (reserved for future rule refinement).
    pub class: ShipClass,
    /// Build cost as a partial resource bundle.
    pub cost: &'static [(Resource, i64)],
    /// Travel speed in map units per tick.
    pub speed: u32,
    /// Per-unit energy cost of dispatching the ship.
    pub travel_cost: i64,
    /// Hit points per catalog entry.
    pub health: u32,
    /// Number of cannons per ship.
    pub cannons: u32,
    /// Damage dealt per cannon per combat round.
    pub fire_power: u32,
    /// Ticks a build order for this kind takes to complete.
    pub build_time: u32,
}

/// A buildable ship kind. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipKind {
    /// Cheap first-strike skirmisher.
    Piranha,
    /// Light EMP vessel.
    Jellyfish,
    /// Standard line vessel.
    Shark,
    /// Unarmed electronic-warfare boat.
    Hackboat,
    /// Multi-cannon mid-weight vessel.
    Taifun,
    /// Heavy EMP vessel.
    Blizzard,
    /// First-strike cruiser.
    Hurricane,
    /// High-damage cruiser.
    Tsunami,
    /// Capital carrier.
    Enterprise,
    /// EMP capital vessel.
    Bermuda,
    /// First-strike capital vessel.
    Kittyhawk,
    /// Flagship bristling with point-defense cannons.
    Atlantis,
}

const PIRANHA: ShipSpec = ShipSpec {
    class: ShipClass::FirstStrike,
    cost: &[(Resource::Aluminium, 1250)],
    speed: 5,
    travel_cost: 3,
    health: 3,
    cannons: 1,
    fire_power: 2,
    build_time: 4,
};

const JELLYFISH: ShipSpec = ShipSpec {
    class: ShipClass::Emp,
    cost: &[(Resource::Steel, 1250)],
    speed: 5,
    travel_cost: 2,
    health: 5,
    cannons: 1,
    fire_power: 0,
    build_time: 4,
};

const SHARK: ShipSpec = ShipSpec {
    class: ShipClass::Normal,
    cost: &[(Resource::Aluminium, 2000), (Resource::Steel, 1000)],
    speed: 5,
    travel_cost: 3,
    health: 10,
    cannons: 2,
    fire_power: 7,
    build_time: 8,
};

const HACKBOAT: ShipSpec = ShipSpec {
    class: ShipClass::Normal,
    cost: &[(Resource::Aluminium, 2000), (Resource::Steel, 750)],
    speed: 5,
    travel_cost: 3,
    health: 15,
    cannons: 0,
    fire_power: 0,
    build_time: 12,
};

const TAIFUN: ShipSpec = ShipSpec {
    class: ShipClass::Normal,
    cost: &[(Resource::Aluminium, 6750), (Resource::Steel, 2000)],
    speed: 5,
    travel_cost: 3,
    health: 40,
    cannons: 6,
    fire_power: 4,
    build_time: 9,
};

const BLIZZARD: ShipSpec = ShipSpec {
    class: ShipClass::Emp,
    cost: &[(Resource::Aluminium, 2000), (Resource::Steel, 8000)],
    speed: 5,
    travel_cost: 3,
    health: 30,
    cannons: 3,
    fire_power: 0,
    build_time: 12,
};

const HURRICANE: ShipSpec = ShipSpec {
    class: ShipClass::FirstStrike,
    cost: &[(Resource::Aluminium, 10_000), (Resource::Steel, 3000)],
    speed: 5,
    travel_cost: 3,
    health: 50,
    cannons: 4,
    fire_power: 6,
    build_time: 12,
};

const TSUNAMI: ShipSpec = ShipSpec {
    class: ShipClass::Normal,
    cost: &[(Resource::Aluminium, 12_000), (Resource::Steel, 4000)],
    speed: 5,
    travel_cost: 3,
    health: 150,
    cannons: 3,
    fire_power: 25,
    build_time: 16,
};

const ENTERPRISE: ShipSpec = ShipSpec {
    class: ShipClass::Normal,
    cost: &[(Resource::Aluminium, 24_000), (Resource::Steel, 6000)],
    speed: 5,
    travel_cost: 3,
    health: 250,
    cannons: 8,
    fire_power: 15,
    build_time: 20,
};

const BERMUDA: ShipSpec = ShipSpec {
    class: ShipClass::Emp,
    cost: &[(Resource::Aluminium, 14_000), (Resource::Steel, 12_000)],
    speed: 5,
    travel_cost: 3,
    health: 250,
    cannons: 5,
    fire_power: 0,
    build_time: 4,
};

const KITTYHAWK: ShipSpec = ShipSpec {
    class: ShipClass::FirstStrike,
    cost: &[(Resource::Aluminium, 36_000), (Resource::Steel, 9000)],
    speed: 5,
    travel_cost: 3,
    health: 300,
    cannons: 5,
    fire_power: 20,
    build_time: 20,
};

const ATLANTIS: ShipSpec = ShipSpec {
    class: ShipClass::Normal,
    cost: &[(Resource::Aluminium, 70_000), (Resource::Steel, 16_000)],
    speed: 5,
    travel_cost: 3,
    health: 500,
    cannons: 100,
    fire_power: 5,
    build_time: 24,
};

impl ShipKind {
    /// All ship kinds, in catalog order.
    pub const ALL: [Self; 12] = [
        Self::Piranha,
        Self::Jellyfish,
        Self::Shark,
        Self::Hackboat,
        Self::Taifun,
        Self::Blizzard,
        Self::Hurricane,
        Self::Tsunami,
        Self::Enterprise,
        Self::Bermuda,
        Self::Kittyhawk,
        Self::Atlantis,
    ];

    /// Look up the static catalog entry for this kind.
    pub const fn spec(self) -> &'static ShipSpec {
        match self {
            Self::Piranha => &PIRANHA,
            Self::Jellyfish => &JELLYFISH,
            Self::Shark => &SHARK,
            Self::Hackboat => &HACKBOAT,
            Self::Taifun => &TAIFUN,
            Self::Blizzard => &BLIZZARD,
            Self::Hurricane => &HURRICANE,
            Self::Tsunami => &TSUNAMI,
            Self::Enterprise => &ENTERPRISE,
            Self::Bermuda => &BERMUDA,
            Self::Kittyhawk => &KITTYHAWK,
            Self::Atlantis => &ATLANTIS,
        }
    }

    /// Build cost as an owned [`ResourceBundle`].
    pub fn cost_bundle(self) -> ResourceBundle {
        self.spec().cost.iter().copied().collect()
    }

    /// Return the canonical lowercase name (database/config representation).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Piranha => "piranha",
            Self::Jellyfish => "jellyfish",
            Self::Shark => "shark",
            Self::Hackboat => "hackboat",
            Self::Taifun => "taifun",
            Self::Blizzard => "blizzard",
            Self::Hurricane => "hurricane",
            Self::Tsunami => "tsunami",
            Self::Enterprise => "enterprise",
            Self::Bermuda => "bermuda",
            Self::Kittyhawk => "kittyhawk",
            Self::Atlantis => "atlantis",
        }
    }

    /// Parse a canonical lowercase name back into a [`ShipKind`].
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl core::fmt::Display for ShipKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
