use std::fmt;
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Settings;
use crate::db::store::PgStore;
use crate::services::moderation::TargetLocks;

/// Shared data available to all commands and handlers
pub struct Data {
    pub pool: PgPool,
    pub settings: Settings,
    /// Guild configuration and case ledger
    pub store: PgStore,
    /// Serializes moderation actions per (guild, member)
    pub target_locks: TargetLocks,
}

impl Data {
    pub fn new(pool: PgPool, settings: Settings) -> Self {
        Self {
            store: PgStore::new(pool.clone()),
            pool,
            settings,
            target_locks: TargetLocks::new(),
        }
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("target_locks_count", &self.target_locks.len())
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Arc<Data>, crate::bot::error::Error>;
