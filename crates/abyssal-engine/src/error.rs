//! Error types for the world engine binary.

/// Top-level error for the engine binary.
///
/// Each variant wraps a subsystem error, giving `main` a single type
/// to propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: abyssal_core::config::ConfigError,
    },

    /// Database connection or migration failed.
    #[error("database error: {source}")]
    Database {
        /// The underlying database error.
        #[from]
        source: abyssal_db::DbError,
    },

    /// The tick scheduler failed.
    #[error("scheduler error: {source}")]
    Scheduler {
        /// The underlying scheduler error.
        #[from]
        source: abyssal_core::scheduler::SchedulerError,
    },
}
