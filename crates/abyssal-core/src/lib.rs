//! Tick pipeline and orchestration for the Abyssal world engine.
//!
//! The engine advances a persistent multiplayer world in discrete ticks
//! fired on wall-clock boundaries. Each tick loads the full world
//! snapshot, runs the stage pipeline over it, and persists the result
//! atomically with respect to the tick:
//!
//! 1. [`income`] -- every station earns resources
//! 2. [`construction`] -- build orders count down and deliver
//! 3. [`movement`] -- traveling fleets advance, returners come home
//! 4. [`combat`] -- arrived fleets fight, survivors turn around
//!
//! # Modules
//!
//! - [`stage`] -- The [`TickStage`] contract and the [`TickData`] snapshot
//! - [`orchestrator`] -- The [`TickEngine`] driving the pipeline
//! - [`scheduler`] -- Wall-clock boundary scheduling
//! - [`store`] -- The [`WorldStore`] persistence port and test store
//! - [`config`] -- Typed YAML configuration
//! - [`income`] -- Pluggable income models and the income stage

pub mod combat;
pub mod config;
pub mod construction;
pub mod income;
pub mod movement;
pub mod orchestrator;
pub mod scheduler;
pub mod stage;
pub mod store;

// Re-export primary types at crate root.
pub use combat::{Combat, EngagementReport, SidePower};
pub use config::{ConfigError, EngineConfig};
pub use construction::Construction;
pub use income::{FlatIncome, HarvesterIncome, IncomeModel, RandomIncome, ResourceIncome};
pub use movement::Movement;
pub use orchestrator::{standard_stages, TickEngine, TickSummary};
pub use scheduler::{Scheduler, SchedulerError};
pub use stage::{TickData, TickError, TickStage};
pub use store::{MemoryStore, StoreError, WorldStore};
