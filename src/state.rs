use std::sync::Arc;

use tracing::info;

use crate::auth::JwtKeys;
use crate::config::{AppConfig, StoreKind};
use crate::db::PgStore;
use crate::store::{MemoryStore, Store};

/// Shared per-request dependencies. Built once at startup and cloned into
/// every handler; nothing here is mutable.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub keys: JwtKeys,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn Store> = match config.store {
            StoreKind::Postgres => {
                let pg = PgStore::connect(config).await?;
                pg.migrate().await?;
                info!("postgres store ready");
                Arc::new(pg)
            }
            StoreKind::Memory => {
                info!("using in-memory store; data is lost on exit");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::from_parts(store, JwtKeys::from_secret(&config.jwt.secret)))
    }

    pub fn from_parts(store: Arc<dyn Store>, keys: JwtKeys) -> Self {
        Self { store, keys }
    }

    /// Empty in-memory store signed with `secret`.
    pub fn in_memory(secret: &str) -> Self {
        Self::from_parts(Arc::new(MemoryStore::new()), JwtKeys::from_secret(secret))
    }
}
