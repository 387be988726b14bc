//! The `PostgreSQL` implementation of the engine's [`WorldStore`] port.
//!
//! Loads resolve owner and target names with joins against `players`, so
//! the engine never sees a bare foreign key. Saves are multi-row UNNEST
//! upserts, one transaction per collection; bundle columns are stored as
//! JSONB keyed by canonical resource and ship names.

use abyssal_core::store::{StoreError, WorldStore};
use abyssal_types::{
    BuildOrder, BuildOrderId, BuildTarget, Coordinates, Fleet, FleetAction, FleetId, Player,
    PlayerId, ShipKind, Station, StationId,
};
use uuid::Uuid;

use crate::error::DbError;
use crate::postgres::PostgresPool;

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        Self::Backend(err.to_string())
    }
}

/// World persistence backed by `PostgreSQL`.
#[derive(Clone)]
pub struct PgWorldStore {
    pool: PostgresPool,
}

impl PgWorldStore {
    /// Create a store over an established connection pool.
    pub const fn new(pool: PostgresPool) -> Self {
        Self { pool }
    }

    /// Return the underlying connection pool handle.
    pub const fn pool(&self) -> &PostgresPool {
        &self.pool
    }

    async fn load_stations_inner(&self) -> Result<Vec<Station>, DbError> {
        let rows = sqlx::query_as::<_, StationRow>(
            r"SELECT s.id, s.player_id, p.name AS player_name, s.name, s.x, s.y,
                     s.resources, s.harvesters
              FROM stations s
              JOIN players p ON p.id = s.player_id
              ORDER BY s.id",
        )
        .fetch_all(self.pool.pool())
        .await?;

        rows.into_iter().map(StationRow::into_station).collect()
    }

    async fn load_build_orders_inner(&self) -> Result<Vec<BuildOrder>, DbError> {
        let rows = sqlx::query_as::<_, BuildOrderRow>(
            r"SELECT b.id, b.player_id, p.name AS player_name, b.target_type,
                     b.ship_kind, b.quantity, b.remaining_time
              FROM build_orders b
              JOIN players p ON p.id = b.player_id
              ORDER BY b.id",
        )
        .fetch_all(self.pool.pool())
        .await?;

        rows.into_iter().map(BuildOrderRow::into_order).collect()
    }

    async fn load_fleets_inner(&self) -> Result<Vec<Fleet>, DbError> {
        let rows = sqlx::query_as::<_, FleetRow>(
            r"SELECT f.id, f.player_id, p.name AS player_name, f.target_id,
                     t.name AS target_name, f.base_fleet, f.action, f.travel_time,
                     f.remaining_time, f.action_ticks, f.returning, f.ships
              FROM fleets f
              JOIN players p ON p.id = f.player_id
              LEFT JOIN players t ON t.id = f.target_id
              ORDER BY f.id",
        )
        .fetch_all(self.pool.pool())
        .await?;

        rows.into_iter().map(FleetRow::into_fleet).collect()
    }

    async fn save_stations_inner(&self, stations: &[Station]) -> Result<(), DbError> {
        if stations.is_empty() {
            return Ok(());
        }

        let len = stations.len();
        let mut ids = Vec::with_capacity(len);
        let mut player_ids = Vec::with_capacity(len);
        let mut names = Vec::with_capacity(len);
        let mut xs = Vec::with_capacity(len);
        let mut ys = Vec::with_capacity(len);
        let mut resources = Vec::with_capacity(len);
        let mut harvesters = Vec::with_capacity(len);

        for station in stations {
            ids.push(station.id.into_inner());
            player_ids.push(station.owner.id.into_inner());
            names.push(station.name.clone());
            xs.push(station.coordinates.x);
            ys.push(station.coordinates.y);
            resources.push(serde_json::to_value(&station.resources)?);
            harvesters.push(i32::try_from(station.harvesters).unwrap_or(i32::MAX));
        }

        let mut tx = self.pool.pool().begin().await?;
        sqlx::query(
            r"INSERT INTO stations (id, player_id, name, x, y, resources, harvesters)
              SELECT * FROM UNNEST($1::UUID[], $2::UUID[], $3::TEXT[], $4::INT[],
                                   $5::INT[], $6::JSONB[], $7::INT[])
              ON CONFLICT (id) DO UPDATE SET
                  name = EXCLUDED.name,
                  resources = EXCLUDED.resources,
                  harvesters = EXCLUDED.harvesters",
        )
        .bind(&ids)
        .bind(&player_ids)
        .bind(&names)
        .bind(&xs)
        .bind(&ys)
        .bind(&resources)
        .bind(&harvesters)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::debug!(count = len, "Saved stations");
        Ok(())
    }

    async fn save_build_orders_inner(&self, orders: &[BuildOrder]) -> Result<(), DbError> {
        if orders.is_empty() {
            return Ok(());
        }

        let len = orders.len();
        let mut ids = Vec::with_capacity(len);
        let mut player_ids = Vec::with_capacity(len);
        let mut target_types = Vec::with_capacity(len);
        let mut ship_kinds: Vec<Option<String>> = Vec::with_capacity(len);
        let mut quantities = Vec::with_capacity(len);
        let mut remaining = Vec::with_capacity(len);

        for order in orders {
            ids.push(order.id.into_inner());
            player_ids.push(order.owner.id.into_inner());
            match order.target {
                BuildTarget::Ship(kind) => {
                    target_types.push("ship".to_owned());
                    ship_kinds.push(Some(kind.as_str().to_owned()));
                }
                BuildTarget::Harvester => {
                    target_types.push("harvester".to_owned());
                    ship_kinds.push(None);
                }
            }
            quantities.push(i32::try_from(order.quantity).unwrap_or(i32::MAX));
            remaining.push(i32::try_from(order.remaining_time).unwrap_or(i32::MAX));
        }

        let mut tx = self.pool.pool().begin().await?;
        sqlx::query(
            r"INSERT INTO build_orders (id, player_id, target_type, ship_kind, quantity, remaining_time)
              SELECT * FROM UNNEST($1::UUID[], $2::UUID[], $3::TEXT[], $4::TEXT[],
                                   $5::INT[], $6::INT[])
              ON CONFLICT (id) DO UPDATE SET
                  remaining_time = EXCLUDED.remaining_time",
        )
        .bind(&ids)
        .bind(&player_ids)
        .bind(&target_types)
        .bind(&ship_kinds)
        .bind(&quantities)
        .bind(&remaining)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::debug!(count = len, "Saved build orders");
        Ok(())
    }

    async fn delete_build_orders_inner(&self, ids: &[BuildOrderId]) -> Result<(), DbError> {
        if ids.is_empty() {
            return Ok(());
        }

        let raw: Vec<Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        sqlx::query(r"DELETE FROM build_orders WHERE id = ANY($1)")
            .bind(&raw)
            .execute(self.pool.pool())
            .await?;

        tracing::debug!(count = raw.len(), "Deleted completed build orders");
        Ok(())
    }

    async fn save_fleets_inner(&self, fleets: &[Fleet]) -> Result<(), DbError> {
        if fleets.is_empty() {
            return Ok(());
        }

        let len = fleets.len();
        let mut ids = Vec::with_capacity(len);
        let mut player_ids = Vec::with_capacity(len);
        let mut target_ids: Vec<Option<Uuid>> = Vec::with_capacity(len);
        let mut base_flags = Vec::with_capacity(len);
        let mut actions: Vec<Option<String>> = Vec::with_capacity(len);
        let mut travel_times: Vec<Option<i32>> = Vec::with_capacity(len);
        let mut remaining_times: Vec<Option<i32>> = Vec::with_capacity(len);
        let mut action_ticks: Vec<Option<i32>> = Vec::with_capacity(len);
        let mut returning = Vec::with_capacity(len);
        let mut ships = Vec::with_capacity(len);

        for fleet in fleets {
            ids.push(fleet.id.into_inner());
            player_ids.push(fleet.owner.id.into_inner());
            target_ids.push(fleet.target.as_ref().map(|t| t.id.into_inner()));
            base_flags.push(fleet.base_fleet);
            actions.push(fleet.action.map(|a| a.as_str().to_owned()));
            travel_times.push(to_db_ticks(fleet.travel_time));
            remaining_times.push(to_db_ticks(fleet.remaining_time));
            action_ticks.push(to_db_ticks(fleet.action_ticks));
            returning.push(fleet.returning);
            ships.push(serde_json::to_value(&fleet.ships)?);
        }

        let mut tx = self.pool.pool().begin().await?;
        sqlx::query(
            r"INSERT INTO fleets (id, player_id, target_id, base_fleet, action, travel_time,
                                  remaining_time, action_ticks, returning, ships)
              SELECT * FROM UNNEST($1::UUID[], $2::UUID[], $3::UUID[], $4::BOOLEAN[],
                                   $5::TEXT[], $6::INT[], $7::INT[], $8::INT[],
                                   $9::BOOLEAN[], $10::JSONB[])
              ON CONFLICT (id) DO UPDATE SET
                  target_id = EXCLUDED.target_id,
                  action = EXCLUDED.action,
                  travel_time = EXCLUDED.travel_time,
                  remaining_time = EXCLUDED.remaining_time,
                  action_ticks = EXCLUDED.action_ticks,
                  returning = EXCLUDED.returning,
                  ships = EXCLUDED.ships",
        )
        .bind(&ids)
        .bind(&player_ids)
        .bind(&target_ids)
        .bind(&base_flags)
        .bind(&actions)
        .bind(&travel_times)
        .bind(&remaining_times)
        .bind(&action_ticks)
        .bind(&returning)
        .bind(&ships)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::debug!(count = len, "Saved fleets");
        Ok(())
    }
}

impl WorldStore for PgWorldStore {
    async fn load_stations(&self) -> Result<Vec<Station>, StoreError> {
        Ok(self.load_stations_inner().await?)
    }

    async fn load_build_orders(&self) -> Result<Vec<BuildOrder>, StoreError> {
        Ok(self.load_build_orders_inner().await?)
    }

    async fn load_fleets(&self) -> Result<Vec<Fleet>, StoreError> {
        Ok(self.load_fleets_inner().await?)
    }

    async fn save_stations(&self, stations: &[Station]) -> Result<(), StoreError> {
        Ok(self.save_stations_inner(stations).await?)
    }

    async fn save_build_orders(&self, orders: &[BuildOrder]) -> Result<(), StoreError> {
        Ok(self.save_build_orders_inner(orders).await?)
    }

    async fn delete_build_orders(&self, ids: &[BuildOrderId]) -> Result<(), StoreError> {
        Ok(self.delete_build_orders_inner(ids).await?)
    }

    async fn save_fleets(&self, fleets: &[Fleet]) -> Result<(), StoreError> {
        Ok(self.save_fleets_inner(fleets).await?)
    }
}

/// Clamp an optional tick counter into the `INT` column range.
fn to_db_ticks(ticks: Option<u32>) -> Option<i32> {
    ticks.map(|t| i32::try_from(t).unwrap_or(i32::MAX))
}

/// Widen an optional `INT` column back to a tick counter.
fn from_db_ticks(ticks: Option<i32>) -> Option<u32> {
    ticks.map(|t| u32::try_from(t).unwrap_or(0))
}

/// A row from `stations` joined with its owner.
#[derive(Debug, Clone, sqlx::FromRow)]
struct StationRow {
    id: Uuid,
    player_id: Uuid,
    player_name: String,
    name: String,
    x: i32,
    y: i32,
    resources: serde_json::Value,
    harvesters: i32,
}

impl StationRow {
    fn into_station(self) -> Result<Station, DbError> {
        Ok(Station {
            id: StationId::from(self.id),
            owner: Player {
                id: PlayerId::from(self.player_id),
                name: self.player_name,
            },
            name: self.name,
            coordinates: Coordinates {
                x: self.x,
                y: self.y,
            },
            resources: serde_json::from_value(self.resources)?,
            harvesters: u32::try_from(self.harvesters).unwrap_or(0),
        })
    }
}

/// A row from `build_orders` joined with its owner.
#[derive(Debug, Clone, sqlx::FromRow)]
struct BuildOrderRow {
    id: Uuid,
    player_id: Uuid,
    player_name: String,
    target_type: String,
    ship_kind: Option<String>,
    quantity: i32,
    remaining_time: i32,
}

impl BuildOrderRow {
    fn into_order(self) -> Result<BuildOrder, DbError> {
        let target = match self.target_type.as_str() {
            "ship" => {
                let name = self
                    .ship_kind
                    .ok_or_else(|| DbError::Decode(String::from("ship order without a kind")))?;
                let kind = ShipKind::parse(&name)
                    .ok_or_else(|| DbError::Decode(format!("unknown ship kind `{name}`")))?;
                BuildTarget::Ship(kind)
            }
            "harvester" => BuildTarget::Harvester,
            other => {
                return Err(DbError::Decode(format!("unknown build target `{other}`")));
            }
        };

        Ok(BuildOrder {
            id: BuildOrderId::from(self.id),
            owner: Player {
                id: PlayerId::from(self.player_id),
                name: self.player_name,
            },
            target,
            quantity: u32::try_from(self.quantity).unwrap_or(0),
            remaining_time: u32::try_from(self.remaining_time).unwrap_or(0),
        })
    }
}

/// A row from `fleets` joined with its owner and optional target.
#[derive(Debug, Clone, sqlx::FromRow)]
struct FleetRow {
    id: Uuid,
    player_id: Uuid,
    player_name: String,
    target_id: Option<Uuid>,
    target_name: Option<String>,
    base_fleet: bool,
    action: Option<String>,
    travel_time: Option<i32>,
    remaining_time: Option<i32>,
    action_ticks: Option<i32>,
    returning: bool,
    ships: serde_json::Value,
}

impl FleetRow {
    fn into_fleet(self) -> Result<Fleet, DbError> {
        let action = self
            .action
            .as_deref()
            .map(|name| {
                FleetAction::parse(name)
                    .ok_or_else(|| DbError::Decode(format!("unknown fleet action `{name}`")))
            })
            .transpose()?;

        let target = match (self.target_id, self.target_name) {
            (Some(id), Some(name)) => Some(Player {
                id: PlayerId::from(id),
                name,
            }),
            _ => None,
        };

        Ok(Fleet {
            id: FleetId::from(self.id),
            owner: Player {
                id: PlayerId::from(self.player_id),
                name: self.player_name,
            },
            target,
            base_fleet: self.base_fleet,
            action,
            travel_time: from_db_ticks(self.travel_time),
            remaining_time: from_db_ticks(self.remaining_time),
            action_ticks: from_db_ticks(self.action_ticks),
            returning: self.returning,
            ships: serde_json::from_value(self.ships)?,
        })
    }
}
