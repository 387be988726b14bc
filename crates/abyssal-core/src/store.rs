//! The persistence boundary of the engine.
//!
//! [`WorldStore`] is the port the orchestrator loads snapshots from and
//! writes them back to. Production uses the `PostgreSQL` adapter from
//! `abyssal-db`; tests use the in-memory [`MemoryStore`] defined here.

use std::sync::Mutex;

use abyssal_types::{BuildOrder, BuildOrderId, Fleet, Station};

/// Errors produced by a world store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store failed to execute an operation.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Load and persistence operations over the world state.
///
/// Saves are full upserts of the rows passed in; the delete operation
/// removes completed build orders by ID.
// The engine drives the store from a single task, so no Send bound is
// required on the returned futures.
#[allow(async_fn_in_trait)]
pub trait WorldStore {
    /// Load all stations, with owners resolved.
    async fn load_stations(&self) -> Result<Vec<Station>, StoreError>;

    /// Load all build orders, with owners resolved.
    async fn load_build_orders(&self) -> Result<Vec<BuildOrder>, StoreError>;

    /// Load all fleets, with owners and targets resolved.
    async fn load_fleets(&self) -> Result<Vec<Fleet>, StoreError>;

    /// Upsert the given stations.
    async fn save_stations(&self, stations: &[Station]) -> Result<(), StoreError>;

    /// Upsert the given build orders.
    async fn save_build_orders(&self, orders: &[BuildOrder]) -> Result<(), StoreError>;

    /// Delete the build orders with the given IDs.
    async fn delete_build_orders(&self, ids: &[BuildOrderId]) -> Result<(), StoreError>;

    /// Upsert the given fleets.
    async fn save_fleets(&self, fleets: &[Fleet]) -> Result<(), StoreError>;
}

/// World state held by a [`MemoryStore`].
#[derive(Debug, Default)]
struct MemoryWorld {
    stations: Vec<Station>,
    build_orders: Vec<BuildOrder>,
    fleets: Vec<Fleet>,
}

/// In-memory [`WorldStore`] used by engine tests and local experiments.
///
/// Saves replace rows by ID. The `fail_saves` switch makes every save
/// operation fail, for exercising the abort-before-persist path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    world: Mutex<MemoryWorld>,
    fail_saves: Mutex<bool>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given world state.
    pub fn with_world(
        stations: Vec<Station>,
        build_orders: Vec<BuildOrder>,
        fleets: Vec<Fleet>,
    ) -> Self {
        Self {
            world: Mutex::new(MemoryWorld {
                stations,
                build_orders,
                fleets,
            }),
            fail_saves: Mutex::new(false),
        }
    }

    /// Make all subsequent save operations fail.
    pub fn fail_saves(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_saves.lock() {
            *flag = fail;
        }
    }

    fn check_saves(&self) -> Result<(), StoreError> {
        let failing = self.fail_saves.lock().map(|flag| *flag).unwrap_or(true);
        if failing {
            return Err(StoreError::Backend(String::from(
                "simulated save failure",
            )));
        }
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&MemoryWorld) -> T) -> Result<T, StoreError> {
        self.world
            .lock()
            .map(|world| f(&world))
            .map_err(|_| StoreError::Backend(String::from("memory store poisoned")))
    }

    fn write(&self, f: impl FnOnce(&mut MemoryWorld)) -> Result<(), StoreError> {
        self.world
            .lock()
            .map(|mut world| f(&mut world))
            .map_err(|_| StoreError::Backend(String::from("memory store poisoned")))
    }

    /// Snapshot of the stored stations, for assertions.
    pub fn stations(&self) -> Vec<Station> {
        self.read(|world| world.stations.clone()).unwrap_or_default()
    }

    /// Snapshot of the stored build orders, for assertions.
    pub fn build_orders(&self) -> Vec<BuildOrder> {
        self.read(|world| world.build_orders.clone())
            .unwrap_or_default()
    }

    /// Snapshot of the stored fleets, for assertions.
    pub fn fleets(&self) -> Vec<Fleet> {
        self.read(|world| world.fleets.clone()).unwrap_or_default()
    }
}

impl WorldStore for MemoryStore {
    async fn load_stations(&self) -> Result<Vec<Station>, StoreError> {
        self.read(|world| world.stations.clone())
    }

    async fn load_build_orders(&self) -> Result<Vec<BuildOrder>, StoreError> {
        self.read(|world| world.build_orders.clone())
    }

    async fn load_fleets(&self) -> Result<Vec<Fleet>, StoreError> {
        self.read(|world| world.fleets.clone())
    }

    async fn save_stations(&self, stations: &[Station]) -> Result<(), StoreError> {
        self.check_saves()?;
        self.write(|world| {
            for station in stations {
                match world.stations.iter_mut().find(|s| s.id == station.id) {
                    Some(existing) => *existing = station.clone(),
                    None => world.stations.push(station.clone()),
                }
            }
        })
    }

    async fn save_build_orders(&self, orders: &[BuildOrder]) -> Result<(), StoreError> {
        self.check_saves()?;
        self.write(|world| {
            for order in orders {
                match world.build_orders.iter_mut().find(|o| o.id == order.id) {
                    Some(existing) => *existing = order.clone(),
                    None => world.build_orders.push(order.clone()),
                }
            }
        })
    }

    async fn delete_build_orders(&self, ids: &[BuildOrderId]) -> Result<(), StoreError> {
        self.check_saves()?;
        self.write(|world| {
            world.build_orders.retain(|order| !ids.contains(&order.id));
        })
    }

    async fn save_fleets(&self, fleets: &[Fleet]) -> Result<(), StoreError> {
        self.check_saves()?;
        self.write(|world| {
            for fleet in fleets {
                match world.fleets.iter_mut().find(|f| f.id == fleet.id) {
                    Some(existing) => *existing = fleet.clone(),
                    None => world.fleets.push(fleet.clone()),
                }
            }
        })
    }
}
