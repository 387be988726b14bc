//! Ship and harvester construction: the second stage of the tick pipeline.
//!
//! Every build order counts down one tick. Orders that reach zero deliver
//! their product -- ships into the owner's base fleet, harvesters onto the
//! owner's station -- and move to the finished list so persistence can
//! delete them.

use abyssal_types::{BuildOrder, BuildTarget, ShipComposition, Station};
use tracing::debug;

use crate::stage::{TickData, TickError, TickStage};

/// The construction stage.
pub struct Construction;

impl TickStage for Construction {
    fn name(&self) -> &'static str {
        "construction"
    }

    fn run(&mut self, data: &mut TickData) -> Result<(), TickError> {
        let mut in_progress = Vec::with_capacity(data.build_orders.len());

        for mut order in std::mem::take(&mut data.build_orders) {
            order.remaining_time = order.remaining_time.saturating_sub(1);
            if order.remaining_time >= 1 {
                in_progress.push(order);
                continue;
            }

            deliver(&order, &mut data.fleets, &mut data.stations)?;
            debug!(
                order = %order.id,
                owner = %order.owner,
                target = ?order.target,
                quantity = order.quantity,
                "Build order completed"
            );
            data.finished_build_orders.push(order);
        }

        data.build_orders = in_progress;
        Ok(())
    }
}

/// Deliver a completed order into the owner's holdings.
fn deliver(
    order: &BuildOrder,
    fleets: &mut [abyssal_types::Fleet],
    stations: &mut [Station],
) -> Result<(), TickError> {
    match order.target {
        BuildTarget::Ship(kind) => {
            let fleet = fleets
                .iter_mut()
                .find(|f| f.base_fleet && f.owner.id == order.owner.id)
                .ok_or_else(|| TickError::MissingBaseFleet {
                    owner: order.owner.clone(),
                })?;
            let produced = ShipComposition::from([(kind, i64::from(order.quantity))]);
            fleet.ships = abyssal_ledger::add(&fleet.ships, &produced);
        }
        BuildTarget::Harvester => {
            let station = stations
                .iter_mut()
                .find(|s| s.owner.id == order.owner.id)
                .ok_or_else(|| TickError::MissingStation {
                    owner: order.owner.clone(),
                })?;
            station.harvesters = station.harvesters.saturating_add(order.quantity);
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use abyssal_types::{
        BuildOrderId, Coordinates, Fleet, FleetId, Player, PlayerId, ResourceBundle, ShipKind,
        StationId,
    };

    use super::*;

    fn player(name: &str) -> Player {
        Player {
            id: PlayerId::new(),
            name: name.to_owned(),
        }
    }

    fn base_fleet(owner: Player) -> Fleet {
        Fleet {
            id: FleetId::new(),
            owner,
            target: None,
            base_fleet: true,
            action: None,
            travel_time: None,
            remaining_time: None,
            action_ticks: None,
            returning: false,
            ships: ShipComposition::new(),
        }
    }

    fn station(owner: Player) -> Station {
        Station {
            id: StationId::new(),
            owner,
            name: String::from("Outpost"),
            coordinates: Coordinates { x: 0, y: 0 },
            resources: ResourceBundle::new(),
            harvesters: 1,
        }
    }

    fn ship_order(owner: Player, kind: ShipKind, quantity: u32, remaining: u32) -> BuildOrder {
        BuildOrder {
            id: BuildOrderId::new(),
            owner,
            target: BuildTarget::Ship(kind),
            quantity,
            remaining_time: remaining,
        }
    }

    #[test]
    fn orders_count_down_each_tick() {
        let owner = player("nemo");
        let mut data = TickData::new(
            Vec::new(),
            vec![ship_order(owner.clone(), ShipKind::Shark, 2, 3)],
            vec![base_fleet(owner)],
        );

        Construction.run(&mut data).unwrap();

        assert_eq!(data.build_orders.len(), 1);
        assert_eq!(data.build_orders[0].remaining_time, 2);
        assert!(data.finished_build_orders.is_empty());
    }

    #[test]
    fn finished_ship_order_lands_in_the_base_fleet() {
        let owner = player("nemo");
        let mut home = base_fleet(owner.clone());
        home.ships.set(ShipKind::Shark, 1);
        let mut data = TickData::new(
            Vec::new(),
            vec![ship_order(owner, ShipKind::Shark, 4, 1)],
            vec![home],
        );

        Construction.run(&mut data).unwrap();

        assert!(data.build_orders.is_empty());
        assert_eq!(data.finished_build_orders.len(), 1);
        assert_eq!(data.fleets[0].ships.get(ShipKind::Shark), 5);
    }

    #[test]
    fn ships_never_land_in_a_dispatched_fleet() {
        let owner = player("nemo");
        let mut away = base_fleet(owner.clone());
        away.base_fleet = false;
        let mut data = TickData::new(
            Vec::new(),
            vec![ship_order(owner.clone(), ShipKind::Piranha, 1, 1)],
            vec![away, base_fleet(owner)],
        );

        Construction.run(&mut data).unwrap();

        assert_eq!(data.fleets[0].ships.get(ShipKind::Piranha), 0);
        assert_eq!(data.fleets[1].ships.get(ShipKind::Piranha), 1);
    }

    #[test]
    fn missing_base_fleet_aborts_the_tick() {
        let owner = player("nemo");
        let mut data = TickData::new(
            Vec::new(),
            vec![ship_order(owner, ShipKind::Shark, 1, 1)],
            Vec::new(),
        );

        let result = Construction.run(&mut data);
        assert!(matches!(result, Err(TickError::MissingBaseFleet { .. })));
    }

    #[test]
    fn finished_harvester_order_attaches_to_the_station() {
        let owner = player("nemo");
        let mut data = TickData::new(
            vec![station(owner.clone())],
            vec![BuildOrder {
                id: BuildOrderId::new(),
                owner: owner.clone(),
                target: BuildTarget::Harvester,
                quantity: 3,
                remaining_time: 1,
            }],
            vec![base_fleet(owner)],
        );

        Construction.run(&mut data).unwrap();

        assert_eq!(data.stations[0].harvesters, 4);
        assert_eq!(data.finished_build_orders.len(), 1);
    }

    #[test]
    fn missing_station_aborts_a_harvester_delivery() {
        let owner = player("nemo");
        let mut data = TickData::new(
            Vec::new(),
            vec![BuildOrder {
                id: BuildOrderId::new(),
                owner,
                target: BuildTarget::Harvester,
                quantity: 1,
                remaining_time: 1,
            }],
            Vec::new(),
        );

        let result = Construction.run(&mut data);
        assert!(matches!(result, Err(TickError::MissingStation { .. })));
    }
}
