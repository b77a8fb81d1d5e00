use async_trait::async_trait;
use serenity::all::{ChannelId, GuildId, RoleId};
use sqlx::PgPool;

use crate::db::models::Case;
use crate::db::queries::{case, guild_config};
use crate::services::moderation::error::PersistenceError;
use crate::services::moderation::traits::{CaseStore, GuildConfigStore, NewCase};

/// Postgres-backed guild configuration and case ledger
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn read_failed(e: sqlx::Error) -> PersistenceError {
    PersistenceError::ReadFailed(e.to_string())
}

/// Stored ids are BIGINT; Discord never hands out 0
fn snowflake(id: Option<i64>) -> Option<u64> {
    id.and_then(|id| u64::try_from(id).ok()).filter(|id| *id != 0)
}

#[async_trait]
impl GuildConfigStore for PgStore {
    async fn jail_role(&self, guild_id: GuildId) -> Result<Option<RoleId>, PersistenceError> {
        let config = guild_config::get(&self.pool, guild_id.get() as i64)
            .await
            .map_err(read_failed)?;
        Ok(snowflake(config.and_then(|c| c.jail_role_id)).map(RoleId::new))
    }

    async fn jail_channel(&self, guild_id: GuildId) -> Result<Option<ChannelId>, PersistenceError> {
        let config = guild_config::get(&self.pool, guild_id.get() as i64)
            .await
            .map_err(read_failed)?;
        Ok(snowflake(config.and_then(|c| c.jail_channel_id)).map(ChannelId::new))
    }

    async fn mod_log_channel(&self, guild_id: GuildId) -> Result<Option<ChannelId>, PersistenceError> {
        let config = guild_config::get(&self.pool, guild_id.get() as i64)
            .await
            .map_err(read_failed)?;
        Ok(snowflake(config.and_then(|c| c.mod_log_channel_id)).map(ChannelId::new))
    }

    async fn permission_level_roles(&self, guild_id: GuildId) -> Result<Vec<(u8, RoleId)>, PersistenceError> {
        let rows = guild_config::list_permission_level_roles(&self.pool, guild_id.get() as i64)
            .await
            .map_err(read_failed)?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let level = u8::try_from(row.level).ok()?;
                let role = snowflake(Some(row.role_id))?;
                Some((level, RoleId::new(role)))
            })
            .collect())
    }
}

#[async_trait]
impl CaseStore for PgStore {
    async fn insert_case(&self, new_case: NewCase) -> Result<Case, PersistenceError> {
        let target_roles: Vec<i64> = new_case.target_roles.iter().map(|r| r.get() as i64).collect();

        case::insert(
            &self.pool,
            new_case.guild_id.get() as i64,
            new_case.target_id.get() as i64,
            new_case.moderator_id.get() as i64,
            new_case.case_type,
            &new_case.reason,
            &target_roles,
        )
        .await
        .map_err(|e| PersistenceError::WriteFailed(e.to_string()))
    }
}
