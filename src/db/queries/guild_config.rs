use sqlx::PgPool;

use crate::db::models::{GuildConfig, PermissionLevelRole};

/// Columns of `guild_configs` that `/setup` may change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    JailRole,
    JailChannel,
    ModLogChannel,
}

impl ConfigField {
    fn column(&self) -> &'static str {
        match self {
            ConfigField::JailRole => "jail_role_id",
            ConfigField::JailChannel => "jail_channel_id",
            ConfigField::ModLogChannel => "mod_log_channel_id",
        }
    }
}

pub async fn get_or_create(pool: &PgPool, guild_id: i64) -> Result<GuildConfig, sqlx::Error> {
    if let Some(config) = get(pool, guild_id).await? {
        return Ok(config);
    }

    sqlx::query_as::<_, GuildConfig>(
        r#"
        INSERT INTO guild_configs (guild_id)
        VALUES ($1)
        ON CONFLICT (guild_id) DO UPDATE SET guild_id = EXCLUDED.guild_id
        RETURNING *
        "#
    )
    .bind(guild_id)
    .fetch_one(pool)
    .await
}

pub async fn get(pool: &PgPool, guild_id: i64) -> Result<Option<GuildConfig>, sqlx::Error> {
    sqlx::query_as::<_, GuildConfig>(
        "SELECT * FROM guild_configs WHERE guild_id = $1"
    )
    .bind(guild_id)
    .fetch_optional(pool)
    .await
}

pub async fn set_field(
    pool: &PgPool,
    guild_id: i64,
    field: ConfigField,
    value: i64,
) -> Result<GuildConfig, sqlx::Error> {
    // Ensure config exists
    get_or_create(pool, guild_id).await?;

    let query = format!(
        r#"
        UPDATE guild_configs
        SET {} = $2, updated_at = NOW()
        WHERE guild_id = $1
        RETURNING *
        "#,
        field.column()
    );

    sqlx::query_as::<_, GuildConfig>(&query)
        .bind(guild_id)
        .bind(value)
        .fetch_one(pool)
        .await
}

/// Forget the jail role if it is the given role. Returns true if it was.
pub async fn clear_jail_role_if(
    pool: &PgPool,
    guild_id: i64,
    role_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE guild_configs
        SET jail_role_id = NULL, updated_at = NOW()
        WHERE guild_id = $1 AND jail_role_id = $2
        "#
    )
    .bind(guild_id)
    .bind(role_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn set_permission_level_role(
    pool: &PgPool,
    guild_id: i64,
    level: i16,
    role_id: i64,
) -> Result<PermissionLevelRole, sqlx::Error> {
    sqlx::query_as::<_, PermissionLevelRole>(
        r#"
        INSERT INTO guild_permission_levels (guild_id, level, role_id)
        VALUES ($1, $2, $3)
        ON CONFLICT (guild_id, level)
        DO UPDATE SET role_id = EXCLUDED.role_id, updated_at = NOW()
        RETURNING *
        "#
    )
    .bind(guild_id)
    .bind(level)
    .bind(role_id)
    .fetch_one(pool)
    .await
}

pub async fn list_permission_level_roles(
    pool: &PgPool,
    guild_id: i64,
) -> Result<Vec<PermissionLevelRole>, sqlx::Error> {
    sqlx::query_as::<_, PermissionLevelRole>(
        r#"
        SELECT * FROM guild_permission_levels
        WHERE guild_id = $1
        ORDER BY level ASC
        "#
    )
    .bind(guild_id)
    .fetch_all(pool)
    .await
}
