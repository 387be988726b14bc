//! Combat resolution: the final stage of the tick pipeline.
//!
//! Fleets that have arrived at their target and still have engagement time
//! left are grouped into one engagement per target player. The target's
//! idle fleets with ships aboard join the defending side automatically.
//!
//! Both sides fire simultaneously: losses are computed from the same
//! pre-battle aggregates, so resolution order cannot favor either side.
//! Per-kind survivor counts round up, which keeps a remnant of every ship
//! kind unless the side is wiped out completely.

use std::collections::BTreeMap;

use abyssal_types::{Fleet, FleetAction, Player, PlayerId, ShipComposition};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::stage::{TickData, TickError, TickStage};

/// The outcome of one engagement, for reporting and persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct EngagementReport {
    /// The player whose holdings were fought over.
    pub target: Player,
    /// Owner names of the attacking fleets, one entry per fleet.
    pub attacker_names: Vec<String>,
    /// Owner names of the defending fleets, one entry per fleet.
    pub defender_names: Vec<String>,
    /// Combined attacking composition before losses.
    pub attacking_ships: ShipComposition,
    /// Combined defending composition before losses.
    pub defending_ships: ShipComposition,
    /// Fraction of the attacking side destroyed, in `0.0..=1.0`.
    pub attacker_lost: f64,
    /// Fraction of the defending side destroyed, in `0.0..=1.0`.
    pub defender_lost: f64,
    /// When the engagement was resolved.
    pub resolved_at: DateTime<Utc>,
}

/// Pre-battle aggregate of one side's combined composition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidePower {
    /// Total number of ships across all kinds.
    pub ship_count: i64,
    /// Total cannons, weighted by ship count.
    pub cannons: i64,
    /// Total damage output, `cannons * fire_power` weighted by count.
    pub firepower: i64,
    /// Combined hull strength, summed once per ship kind present.
    pub health: i64,
}

/// Aggregate a combined composition into its combat power.
///
/// Kinds with a non-positive count are not present and contribute nothing.
#[must_use]
pub fn aggregate_power(ships: &ShipComposition) -> SidePower {
    let mut power = SidePower::default();
    for (kind, count) in ships.iter() {
        if count <= 0 {
            continue;
        }
        let spec = kind.spec();
        power.ship_count = power.ship_count.saturating_add(count);
        power.cannons = power
            .cannons
            .saturating_add(i64::from(spec.cannons).saturating_mul(count));
        power.firepower = power.firepower.saturating_add(
            i64::from(spec.cannons)
                .saturating_mul(i64::from(spec.fire_power))
                .saturating_mul(count),
        );
        power.health = power.health.saturating_add(i64::from(spec.health));
    }
    power
}

/// The fraction of `own` destroyed by `enemy` fire, in `0.0..=1.0`.
///
/// When enemy firepower covers this side's hull strength the side is
/// destroyed outright, unless the enemy has fewer cannons than this side
/// has ships; each cannon can finish at most one ship, capping the kill
/// fraction at `cannons / ship_count`. Otherwise losses are proportional
/// to firepower over hull strength.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn destruction_fraction(own: SidePower, enemy: SidePower) -> f64 {
    if own.health <= enemy.firepower {
        if enemy.cannons < own.ship_count {
            return enemy.cannons as f64 / own.ship_count as f64;
        }
        return 1.0;
    }
    enemy.firepower as f64 / own.health as f64
}

/// One engagement: fleet indices into the snapshot, grouped by target.
struct Engagement {
    target: Player,
    attackers: Vec<usize>,
    defenders: Vec<usize>,
}

/// The combat stage.
pub struct Combat;

impl TickStage for Combat {
    fn name(&self) -> &'static str {
        "combat"
    }

    fn run(&mut self, data: &mut TickData) -> Result<(), TickError> {
        for engagement in group_engagements(&data.fleets) {
            resolve(&engagement, data);
        }
        Ok(())
    }
}

/// Group fleets into engagements, one per target player.
fn group_engagements(fleets: &[Fleet]) -> Vec<Engagement> {
    let mut engagements: BTreeMap<PlayerId, Engagement> = BTreeMap::new();

    for (idx, fleet) in fleets.iter().enumerate() {
        if !fleet.combat_ready() {
            continue;
        }
        let Some(target) = &fleet.target else {
            continue;
        };
        let engagement = engagements
            .entry(target.id)
            .or_insert_with(|| Engagement {
                target: target.clone(),
                attackers: Vec::new(),
                defenders: Vec::new(),
            });
        match fleet.action {
            Some(FleetAction::Attack) => engagement.attackers.push(idx),
            _ => engagement.defenders.push(idx),
        }
    }

    // The target's idle fleets with ships aboard defend their home.
    for engagement in engagements.values_mut() {
        for (idx, fleet) in fleets.iter().enumerate() {
            if fleet.owner.id == engagement.target.id && fleet.is_idle() && fleet.has_ships() {
                engagement.defenders.push(idx);
            }
        }
    }

    engagements.into_values().collect()
}

/// Resolve one engagement: compute losses, apply them, file the report.
fn resolve(engagement: &Engagement, data: &mut TickData) {
    let attacking_ships = sum_ships(&data.fleets, &engagement.attackers);
    let defending_ships = sum_ships(&data.fleets, &engagement.defenders);

    let attacker = aggregate_power(&attacking_ships);
    let defender = aggregate_power(&defending_ships);

    let attacker_lost = destruction_fraction(attacker, defender);
    let defender_lost = destruction_fraction(defender, attacker);

    let report = EngagementReport {
        target: engagement.target.clone(),
        attacker_names: owner_names(&data.fleets, &engagement.attackers),
        defender_names: owner_names(&data.fleets, &engagement.defenders),
        attacking_ships,
        defending_ships,
        attacker_lost,
        defender_lost,
        resolved_at: Utc::now(),
    };
    info!(
        target = %report.target,
        attackers = ?report.attacker_names,
        defenders = ?report.defender_names,
        attacker_lost = report.attacker_lost,
        defender_lost = report.defender_lost,
        "Engagement resolved"
    );

    apply_losses(&mut data.fleets, &engagement.attackers, attacker_lost);
    apply_losses(&mut data.fleets, &engagement.defenders, defender_lost);
    data.reports.push(report);
}

/// Combine the compositions of the given fleets.
fn sum_ships(fleets: &[Fleet], indices: &[usize]) -> ShipComposition {
    indices
        .iter()
        .filter_map(|&idx| fleets.get(idx))
        .fold(ShipComposition::new(), |sum, fleet| {
            abyssal_ledger::add(&sum, &fleet.ships)
        })
}

/// Owner names of the given fleets, one entry per fleet.
fn owner_names(fleets: &[Fleet], indices: &[usize]) -> Vec<String> {
    indices
        .iter()
        .filter_map(|&idx| fleets.get(idx))
        .map(|fleet| fleet.owner.name.clone())
        .collect()
}

/// Scale each fleet's composition by its side's survival fraction, reset
/// destroyed fleets, and turn finished fleets around for the trip home.
fn apply_losses(fleets: &mut [Fleet], indices: &[usize], lost: f64) {
    for &idx in indices {
        let Some(fleet) = fleets.get_mut(idx) else {
            continue;
        };
        fleet.ships = abyssal_ledger::scale_ceil(&fleet.ships, 1.0 - lost);
        if !fleet.has_ships() {
            fleet.ships.clear();
            fleet.reset();
        }
        turn_around_when_done(fleet);
    }
}

/// Spend one engagement tick; at zero the fleet starts its return leg.
fn turn_around_when_done(fleet: &mut Fleet) {
    if fleet.action.is_none() {
        return;
    }
    let ticks = fleet.action_ticks.unwrap_or(0).saturating_sub(1);
    fleet.action_ticks = Some(ticks);
    if ticks == 0 {
        fleet.remaining_time = fleet.travel_time;
        fleet.returning = true;
    }
}
