use std::sync::Arc;

use shared_config::AppConfig;

use crate::{Database, DbResult};

/// State shared by every router: configuration plus the store handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }

    /// Opens the store the configuration points at.
    pub fn from_config(config: AppConfig) -> DbResult<Self> {
        let db = Database::from_config(&config)?;
        Ok(Self::new(config, db))
    }
}
