use async_trait::async_trait;
use serenity::all::{ChannelId, GuildId, RoleId, UserId};

use crate::db::models::{Case, CaseType};
use crate::services::moderation::error::{ExternalApiError, PersistenceError};
use crate::services::moderation::types::RoleInfo;

/// Read-only view of a guild's moderation settings
#[async_trait]
pub trait GuildConfigStore: Send + Sync {
    async fn jail_role(&self, guild_id: GuildId) -> Result<Option<RoleId>, PersistenceError>;

    async fn jail_channel(&self, guild_id: GuildId) -> Result<Option<ChannelId>, PersistenceError>;

    async fn mod_log_channel(&self, guild_id: GuildId) -> Result<Option<ChannelId>, PersistenceError>;

    /// Configured (level, role) pairs, any order
    async fn permission_level_roles(&self, guild_id: GuildId) -> Result<Vec<(u8, RoleId)>, PersistenceError>;
}

/// Guild roles and member role mutation
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// A member's roles in the member's own order
    async fn list_roles(&self, guild_id: GuildId, user_id: UserId) -> Result<Vec<RoleInfo>, ExternalApiError>;

    async fn role_exists(&self, guild_id: GuildId, role_id: RoleId) -> Result<bool, ExternalApiError>;

    async fn guild_owner(&self, guild_id: GuildId) -> Result<UserId, ExternalApiError>;

    async fn remove_roles(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_ids: &[RoleId],
        reason: &str,
    ) -> Result<(), ExternalApiError>;

    async fn add_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), ExternalApiError>;
}

/// A case about to be written; the store assigns number, id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCase {
    pub guild_id: GuildId,
    pub target_id: UserId,
    pub moderator_id: UserId,
    pub case_type: CaseType,
    pub reason: String,
    pub target_roles: Vec<RoleId>,
}

#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Atomically allocate the guild's next case number and persist the case
    async fn insert_case(&self, new_case: NewCase) -> Result<Case, PersistenceError>;
}

/// A structured moderation-log entry, rendered by the channel implementation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationLogEntry {
    pub title: String,
    pub fields: Vec<(String, String, bool)>,
}

#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Returns false if the user could not be messaged (closed DMs etc.)
    async fn send_direct_message(&self, user_id: UserId, text: &str) -> bool;

    async fn post_moderation_embed(
        &self,
        channel_id: ChannelId,
        entry: &ModerationLogEntry,
    ) -> Result<(), ExternalApiError>;
}
