//! Tick orchestration: load, run the stage pipeline, persist.
//!
//! [`TickEngine`] owns the store and the ordered stage list. A tick loads
//! the full world snapshot, runs every stage over it, and writes the
//! result back. Any stage or store error aborts the tick before
//! persistence, leaving the stored world exactly as the previous tick
//! left it.

use std::time::Instant;

use tracing::{debug, info};

use crate::combat::{Combat, EngagementReport};
use crate::construction::Construction;
use crate::income::{IncomeModel, ResourceIncome};
use crate::movement::Movement;
use crate::stage::{TickData, TickError, TickStage};
use crate::store::WorldStore;

/// Summary of one completed tick.
#[derive(Debug)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Number of stations in the snapshot.
    pub stations: usize,
    /// Number of fleets in the snapshot.
    pub fleets: usize,
    /// Build orders that completed this tick.
    pub orders_completed: usize,
    /// Battle reports produced this tick.
    pub reports: Vec<EngagementReport>,
}

/// The production stage pipeline, in execution order.
pub fn standard_stages(income: Box<dyn IncomeModel>) -> Vec<Box<dyn TickStage + Send>> {
    vec![
        Box::new(ResourceIncome::new(income)),
        Box::new(Construction),
        Box::new(Movement),
        Box::new(Combat),
    ]
}

/// Drives the tick pipeline against a [`WorldStore`].
pub struct TickEngine<S> {
    store: S,
    stages: Vec<Box<dyn TickStage + Send>>,
    tick: u64,
}

impl<S: WorldStore> TickEngine<S> {
    /// Create an engine over the given store and stage pipeline.
    pub const fn new(store: S, stages: Vec<Box<dyn TickStage + Send>>) -> Self {
        Self {
            store,
            stages,
            tick: 0,
        }
    }

    /// The number of completed ticks.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Access the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Execute one complete tick: gather, run all stages, persist.
    ///
    /// # Errors
    ///
    /// Returns the first stage or store error. On error nothing is
    /// persisted and the tick counter does not advance.
    pub async fn run_tick(&mut self) -> Result<TickSummary, TickError> {
        let tick = self.tick.saturating_add(1);
        let mut data = self.gather().await?;
        info!(
            tick,
            stations = data.stations.len(),
            build_orders = data.build_orders.len(),
            fleets = data.fleets.len(),
            "Tick started"
        );

        for stage in &mut self.stages {
            let started = Instant::now();
            stage.run(&mut data)?;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            debug!(tick, stage = stage.name(), elapsed_ms, "Stage finished");
        }

        self.persist(&data).await?;
        self.tick = tick;

        info!(
            tick,
            orders_completed = data.finished_build_orders.len(),
            engagements = data.reports.len(),
            "Tick finished"
        );
        Ok(TickSummary {
            tick,
            stations: data.stations.len(),
            fleets: data.fleets.len(),
            orders_completed: data.finished_build_orders.len(),
            reports: data.reports,
        })
    }

    async fn gather(&self) -> Result<TickData, TickError> {
        let stations = self.store.load_stations().await?;
        let build_orders = self.store.load_build_orders().await?;
        let fleets = self.store.load_fleets().await?;
        Ok(TickData::new(stations, build_orders, fleets))
    }

    async fn persist(&self, data: &TickData) -> Result<(), TickError> {
        self.store.save_stations(&data.stations).await?;
        self.store.save_build_orders(&data.build_orders).await?;
        let finished: Vec<_> = data
            .finished_build_orders
            .iter()
            .map(|order| order.id)
            .collect();
        self.store.delete_build_orders(&finished).await?;
        self.store.save_fleets(&data.fleets).await?;
        Ok(())
    }
}
