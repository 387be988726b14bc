//! Resource income: the first stage of the tick pipeline.
//!
//! Every station earns resources each tick. How much is decided by a
//! pluggable [`IncomeModel`], so deployments can run flat stipends,
//! harvester-driven economies, or the randomized income used on test
//! worlds, without touching the stage itself.

use abyssal_types::{Resource, ResourceBundle, Station};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::config::{ConfigError, IncomeConfig};
use crate::stage::{TickData, TickError, TickStage};

/// Computes the per-tick income for a single station.
///
/// Models may carry mutable state across ticks (the random model keeps
/// its RNG here), hence `&mut self`.
pub trait IncomeModel: Send {
    /// The income `station` earns this tick.
    fn income_for(&mut self, station: &Station) -> ResourceBundle;
}

/// Every station earns the same fixed bundle each tick.
#[derive(Debug, Clone)]
pub struct FlatIncome {
    amounts: ResourceBundle,
}

impl FlatIncome {
    /// Create a flat model paying `amounts` per tick.
    pub const fn new(amounts: ResourceBundle) -> Self {
        Self { amounts }
    }
}

impl IncomeModel for FlatIncome {
    fn income_for(&mut self, _station: &Station) -> ResourceBundle {
        self.amounts.clone()
    }
}

/// Income scales with the number of harvesters attached to the station.
#[derive(Debug, Clone)]
pub struct HarvesterIncome {
    per_harvester: ResourceBundle,
}

impl HarvesterIncome {
    /// Create a harvester model paying `per_harvester` for each harvester.
    pub const fn new(per_harvester: ResourceBundle) -> Self {
        Self { per_harvester }
    }
}

impl IncomeModel for HarvesterIncome {
    fn income_for(&mut self, station: &Station) -> ResourceBundle {
        abyssal_ledger::scale(&self.per_harvester, i64::from(station.harvesters))
    }
}

/// Each resource earns a uniformly random amount below its ceiling.
///
/// Seedable for reproducible test worlds.
#[derive(Debug, Clone)]
pub struct RandomIncome {
    rng: StdRng,
    ceiling: ResourceBundle,
}

impl RandomIncome {
    /// Create a seeded random model with per-resource ceilings.
    pub fn seeded(seed: u64, ceiling: ResourceBundle) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ceiling,
        }
    }
}

impl IncomeModel for RandomIncome {
    fn income_for(&mut self, _station: &Station) -> ResourceBundle {
        let mut income = ResourceBundle::new();
        for (resource, max) in self.ceiling.iter() {
            if max > 0 {
                income.set(resource, self.rng.random_range(0..max));
            }
        }
        income
    }
}

/// Build the configured income model.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownIncomeModel`] for an unrecognized model
/// name and [`ConfigError::UnknownResource`] for an unrecognized resource
/// key in the amounts table.
pub fn from_config(config: &IncomeConfig) -> Result<Box<dyn IncomeModel>, ConfigError> {
    let mut amounts = ResourceBundle::new();
    for (name, value) in &config.amounts {
        let resource = Resource::parse(name)
            .ok_or_else(|| ConfigError::UnknownResource(name.clone()))?;
        amounts.set(resource, *value);
    }

    match config.model.as_str() {
        "flat" => Ok(Box::new(FlatIncome::new(amounts))),
        "harvester" => Ok(Box::new(HarvesterIncome::new(amounts))),
        "random" => Ok(Box::new(RandomIncome::seeded(config.seed, amounts))),
        other => Err(ConfigError::UnknownIncomeModel(other.to_owned())),
    }
}

/// The income stage: credits every station with its model-computed income.
pub struct ResourceIncome {
    model: Box<dyn IncomeModel>,
}

impl ResourceIncome {
    /// Create the stage around the given income model.
    pub const fn new(model: Box<dyn IncomeModel>) -> Self {
        Self { model }
    }
}

impl TickStage for ResourceIncome {
    fn name(&self) -> &'static str {
        "income"
    }

    fn run(&mut self, data: &mut TickData) -> Result<(), TickError> {
        for station in &mut data.stations {
            let income = self.model.income_for(station);
            trace!(station = %station.id, ?income, "Station income");
            station.resources = abyssal_ledger::add(&station.resources, &income);
        }
        Ok(())
    }
}
