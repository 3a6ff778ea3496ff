use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::MediaStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pawhaven_db::DbPool,
    /// Immutable server configuration.
    pub config: Arc<ServerConfig>,
    /// Where uploaded pet photos and gallery images are written.
    pub storage: Arc<dyn MediaStorage>,
}
