//! Fleet travel: the third stage of the tick pipeline.
//!
//! Fleets with a mission and distance left to cover move one tick closer.
//! A returning fleet that reaches home is fully reset to idle. Fleets that
//! have arrived at their target are left alone here; they are the combat
//! stage's input.

use tracing::debug;

use crate::stage::{TickData, TickError, TickStage};

/// The movement stage.
pub struct Movement;

impl TickStage for Movement {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn run(&mut self, data: &mut TickData) -> Result<(), TickError> {
        for fleet in &mut data.fleets {
            if !fleet.in_transit() {
                continue;
            }
            let remaining = fleet.remaining_time.unwrap_or(0).saturating_sub(1);
            fleet.remaining_time = Some(remaining);

            if fleet.returning && remaining == 0 {
                debug!(fleet = %fleet.id, owner = %fleet.owner, "Fleet arrived home");
                fleet.reset();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use abyssal_types::{Fleet, FleetAction, FleetId, Player, PlayerId, ShipComposition, ShipKind};

    use super::*;

    fn player(name: &str) -> Player {
        Player {
            id: PlayerId::new(),
            name: name.to_owned(),
        }
    }

    fn outbound_fleet(remaining: u32) -> Fleet {
        Fleet {
            id: FleetId::new(),
            owner: player("nemo"),
            target: Some(player("dakkar")),
            base_fleet: false,
            action: Some(FleetAction::Attack),
            travel_time: Some(4),
            remaining_time: Some(remaining),
            action_ticks: Some(3),
            returning: false,
            ships: ShipComposition::from([(ShipKind::Shark, 5)]),
        }
    }

    #[test]
    fn traveling_fleet_moves_one_tick_closer() {
        let mut data = TickData::new(Vec::new(), Vec::new(), vec![outbound_fleet(4)]);

        Movement.run(&mut data).unwrap();

        assert_eq!(data.fleets[0].remaining_time, Some(3));
        assert!(data.fleets[0].action.is_some());
    }

    #[test]
    fn arrived_fleet_is_left_untouched() {
        let mut data = TickData::new(Vec::new(), Vec::new(), vec![outbound_fleet(0)]);

        Movement.run(&mut data).unwrap();

        // Remaining time stays at zero; the combat stage takes over.
        assert_eq!(data.fleets[0].remaining_time, Some(0));
        assert!(!data.fleets[0].returning);
    }

    #[test]
    fn idle_fleet_is_ignored() {
        let mut fleet = outbound_fleet(2);
        fleet.reset();
        let mut data = TickData::new(Vec::new(), Vec::new(), vec![fleet]);

        Movement.run(&mut data).unwrap();

        assert_eq!(data.fleets[0].remaining_time, None);
    }

    #[test]
    fn returning_fleet_resets_on_arrival_home() {
        let mut fleet = outbound_fleet(1);
        fleet.returning = true;
        fleet.action_ticks = Some(0);
        let mut data = TickData::new(Vec::new(), Vec::new(), vec![fleet]);

        Movement.run(&mut data).unwrap();

        let home = &data.fleets[0];
        assert!(home.is_idle());
        assert_eq!(home.target, None);
        assert_eq!(home.travel_time, None);
        assert_eq!(home.remaining_time, None);
        assert_eq!(home.action_ticks, None);
        assert!(!home.returning);
        // The ships survive the journey.
        assert_eq!(home.ships.get(ShipKind::Shark), 5);
    }

    #[test]
    fn returning_fleet_mid_journey_keeps_flying() {
        let mut fleet = outbound_fleet(3);
        fleet.returning = true;
        fleet.action_ticks = Some(0);
        let mut data = TickData::new(Vec::new(), Vec::new(), vec![fleet]);

        Movement.run(&mut data).unwrap();

        assert_eq!(data.fleets[0].remaining_time, Some(2));
        assert!(data.fleets[0].returning);
    }
}
