//! The persistent world entities the tick engine operates on.
//!
//! These are plain data carriers. All simulation behavior lives in the
//! `abyssal-core` stages; the only logic here is the handful of fleet
//! state-machine predicates that the stages share.

use serde::{Deserialize, Serialize};

use crate::bundle::{ResourceBundle, ShipComposition};
use crate::enums::FleetAction;
use crate::ids::{BuildOrderId, FleetId, PlayerId, StationId};

/// A participant in the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique player identifier.
    pub id: PlayerId,
    /// Display name, used in engagement reports and logs.
    pub name: String,
}

impl core::fmt::Display for Player {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A position on the world map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Horizontal map coordinate.
    pub x: i32,
    /// Vertical map coordinate.
    pub y: i32,
}

/// A player's home station: the holder of resources and harvesters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Unique station identifier.
    pub id: StationId,
    /// Owning player.
    pub owner: Player,
    /// Station display name.
    pub name: String,
    /// Map position. Unique per station.
    pub coordinates: Coordinates,
    /// Current resource stockpile.
    pub resources: ResourceBundle,
    /// Number of completed harvesters attached to this station.
    pub harvesters: u32,
}

/// A group of ships, either parked at home or flying a mission.
///
/// State machine: idle (no action) -> outbound (action set, remaining time
/// counting down) -> arrived (remaining time zero) -> engaged (action ticks
/// counting down) -> returning -> idle again. The base fleet never leaves
/// the idle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    /// Unique fleet identifier.
    pub id: FleetId,
    /// Owning player.
    pub owner: Player,
    /// The player this fleet was dispatched against, if any.
    pub target: Option<Player>,
    /// Whether this is the owner's permanent home fleet.
    pub base_fleet: bool,
    /// Mission being flown, `None` while idle.
    pub action: Option<FleetAction>,
    /// One-way travel duration in ticks, fixed at dispatch.
    pub travel_time: Option<u32>,
    /// Ticks left on the current leg of the journey.
    pub remaining_time: Option<u32>,
    /// Ticks the fleet will stay on station before turning around.
    pub action_ticks: Option<u32>,
    /// Whether the fleet is on its way home.
    pub returning: bool,
    /// Ships in the fleet, counted per kind.
    pub ships: ShipComposition,
}

impl Fleet {
    /// Whether the fleet is parked at home with no mission.
    pub const fn is_idle(&self) -> bool {
        self.action.is_none()
    }

    /// Whether the fleet is still flying towards its destination
    /// (in either direction).
    pub fn in_transit(&self) -> bool {
        self.action.is_some() && self.remaining_time.unwrap_or(0) > 0
    }

    /// Whether the fleet is at its target with engagement time left.
    /// Spent and returning fleets carry zero engagement ticks, which
    /// takes them out of the fight.
    pub fn combat_ready(&self) -> bool {
        self.action.is_some()
            && self.action_ticks.unwrap_or(0) > 0
            && self.remaining_time.unwrap_or(0) == 0
    }

    /// Whether the fleet holds any ships at all.
    pub fn has_ships(&self) -> bool {
        self.ships.iter().any(|(_, count)| count > 0)
    }

    /// Clear all mission state, returning the fleet to idle at home.
    pub fn reset(&mut self) {
        self.target = None;
        self.action = None;
        self.travel_time = None;
        self.remaining_time = None;
        self.action_ticks = None;
        self.returning = false;
    }
}

/// What a build order produces on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "kind")]
pub enum BuildTarget {
    /// Ships of the given kind, delivered to the owner's base fleet.
    Ship(crate::catalog::ShipKind),
    /// Harvesters, attached to the owner's station.
    Harvester,
}

/// An in-progress construction job at a player's station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOrder {
    /// Unique order identifier.
    pub id: BuildOrderId,
    /// Owning player; completion delivers to this player's holdings.
    pub owner: Player,
    /// What the order produces.
    pub target: BuildTarget,
    /// Number of units produced on completion.
    pub quantity: u32,
    /// Ticks left until the order completes.
    pub remaining_time: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ShipKind;

    fn player(name: &str) -> Player {
        Player {
            id: PlayerId::new(),
            name: name.to_owned(),
        }
    }

    fn idle_fleet(owner: Player) -> Fleet {
        Fleet {
            id: FleetId::new(),
            owner,
            target: None,
            base_fleet: false,
            action: None,
            travel_time: None,
            remaining_time: None,
            action_ticks: None,
            returning: false,
            ships: ShipComposition::new(),
        }
    }

    #[test]
    fn idle_fleet_is_neither_in_transit_nor_combat_ready() {
        let fleet = idle_fleet(player("nemo"));
        assert!(fleet.is_idle());
        assert!(!fleet.in_transit());
        assert!(!fleet.combat_ready());
    }

    #[test]
    fn arrived_fleet_is_combat_ready_until_it_turns_around() {
        let mut fleet = idle_fleet(player("nemo"));
        fleet.action = Some(FleetAction::Attack);
        fleet.target = Some(player("dakkar"));
        fleet.travel_time = Some(4);
        fleet.remaining_time = Some(2);
        fleet.action_ticks = Some(3);
        assert!(fleet.in_transit());
        assert!(!fleet.combat_ready());

        fleet.remaining_time = Some(0);
        assert!(!fleet.in_transit());
        assert!(fleet.combat_ready());

        // The combat stage zeroes the counter as it turns the fleet
        // around; a spent fleet never fights again.
        fleet.action_ticks = Some(0);
        assert!(!fleet.combat_ready());

        fleet.returning = true;
        fleet.remaining_time = Some(4);
        assert!(!fleet.combat_ready());
    }

    #[test]
    fn reset_clears_every_mission_field() {
        let mut fleet = idle_fleet(player("nemo"));
        fleet.action = Some(FleetAction::Defend);
        fleet.target = Some(player("dakkar"));
        fleet.travel_time = Some(6);
        fleet.remaining_time = Some(0);
        fleet.action_ticks = Some(3);
        fleet.returning = true;
        fleet.ships.set(ShipKind::Shark, 2);

        fleet.reset();

        assert!(fleet.is_idle());
        assert_eq!(fleet.target, None);
        assert_eq!(fleet.travel_time, None);
        assert_eq!(fleet.remaining_time, None);
        assert_eq!(fleet.action_ticks, None);
        assert!(!fleet.returning);
        // Surviving ships stay on board; reset only touches mission state.
        assert_eq!(fleet.ships.get(ShipKind::Shark), 2);
    }

    #[test]
    fn has_ships_ignores_zero_counts() {
        let mut fleet = idle_fleet(player("nemo"));
        assert!(!fleet.has_ships());
        fleet.ships.set(ShipKind::Piranha, 0);
        assert!(!fleet.has_ships());
        fleet.ships.set(ShipKind::Piranha, 1);
        assert!(fleet.has_ships());
    }
}
