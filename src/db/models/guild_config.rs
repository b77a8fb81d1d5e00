use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GuildConfig {
    pub guild_id: i64,
    pub jail_role_id: Option<i64>,
    pub jail_channel_id: Option<i64>,
    pub mod_log_channel_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GuildConfig {
    /// Check if both the jail role and the jail channel are set
    pub fn is_jail_configured(&self) -> bool {
        self.jail_role_id.is_some() && self.jail_channel_id.is_some()
    }
}

/// A role granting a permission level in a guild
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PermissionLevelRole {
    pub guild_id: i64,
    pub level: i16,
    pub role_id: i64,
    pub updated_at: DateTime<Utc>,
}
