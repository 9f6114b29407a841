use std::sync::Arc;

use labsite_db::research_store::ResearchStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and everything else sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: labsite_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Storage for research areas, directions and features.
    pub research: Arc<dyn ResearchStore>,
}

impl AppState {
    /// Assemble state, opening the configured research store backend.
    pub fn new(pool: labsite_db::DbPool, config: ServerConfig) -> Self {
        let research = labsite_db::research_store::open_research_store(
            config.research_backend,
            &pool,
            &config.data_dir,
        );
        Self {
            pool,
            config: Arc::new(config),
            research,
        }
    }
}
