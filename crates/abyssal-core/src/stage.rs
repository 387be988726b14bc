//! The tick stage contract and the mutable world snapshot stages operate on.
//!
//! A tick is a pipeline of [`TickStage`] values run in a fixed order over one
//! [`TickData`] snapshot. Stages mutate the snapshot in place; nothing is
//! persisted until every stage has finished, so a failing stage aborts the
//! whole tick with the world untouched.

use abyssal_types::{BuildOrder, Fleet, Player, Station};

use crate::combat::EngagementReport;
use crate::store::StoreError;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A finished ship order had no base fleet to deliver into.
    ///
    /// Every player is created with a base fleet, so this indicates
    /// corrupted world data rather than a gameplay situation.
    #[error("no base fleet found for {owner}")]
    MissingBaseFleet {
        /// The player whose base fleet is missing.
        owner: Player,
    },

    /// A finished harvester order had no station to attach to.
    #[error("no station found for {owner}")]
    MissingStation {
        /// The player whose station is missing.
        owner: Player,
    },

    /// Loading or persisting the snapshot failed.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },
}

/// The mutable world snapshot passed through the tick pipeline.
///
/// Loaded in full at the start of a tick and written back in full at the
/// end. Completed build orders move from `build_orders` into
/// `finished_build_orders` so persistence knows which rows to delete.
#[derive(Debug, Clone, Default)]
pub struct TickData {
    /// All stations, with owners resolved.
    pub stations: Vec<Station>,
    /// Build orders still in progress.
    pub build_orders: Vec<BuildOrder>,
    /// Build orders completed this tick, pending deletion.
    pub finished_build_orders: Vec<BuildOrder>,
    /// All fleets, with owners and targets resolved.
    pub fleets: Vec<Fleet>,
    /// Battle reports produced by the combat stage this tick.
    pub reports: Vec<EngagementReport>,
}

impl TickData {
    /// Build a fresh snapshot from loaded world state.
    pub const fn new(
        stations: Vec<Station>,
        build_orders: Vec<BuildOrder>,
        fleets: Vec<Fleet>,
    ) -> Self {
        Self {
            stations,
            build_orders,
            finished_build_orders: Vec::new(),
            fleets,
            reports: Vec::new(),
        }
    }
}

/// One stage of the tick pipeline.
///
/// Stages receive the snapshot by exclusive reference and may carry their
/// own state across ticks (the random income model keeps its RNG here).
pub trait TickStage {
    /// Stable stage name for logs and timing spans.
    fn name(&self) -> &'static str;

    /// Apply this stage's rules to the snapshot.
    fn run(&mut self, data: &mut TickData) -> Result<(), TickError>;
}
