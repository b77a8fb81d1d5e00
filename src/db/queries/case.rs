use sqlx::PgPool;

use crate::db::models::{Case, CaseType};

/// Insert a case with the next case number for its guild.
///
/// The counter upsert and the insert share one transaction. The counter row
/// lock serializes concurrent writers of the same guild, so two inserts can
/// never observe the same number. Other guilds use other rows and never wait.
pub async fn insert(
    pool: &PgPool,
    guild_id: i64,
    target_id: i64,
    moderator_id: i64,
    case_type: CaseType,
    reason: &str,
    target_roles: &[i64],
) -> Result<Case, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let (case_number,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO guild_case_counters (guild_id, last_case_number)
        VALUES ($1, 1)
        ON CONFLICT (guild_id)
        DO UPDATE SET last_case_number = guild_case_counters.last_case_number + 1
        RETURNING last_case_number
        "#
    )
    .bind(guild_id)
    .fetch_one(&mut *tx)
    .await?;

    let case = sqlx::query_as::<_, Case>(
        r#"
        INSERT INTO cases (guild_id, case_number, target_id, moderator_id, case_type, reason, target_roles)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#
    )
    .bind(guild_id)
    .bind(case_number)
    .bind(target_id)
    .bind(moderator_id)
    .bind(case_type)
    .bind(reason)
    .bind(target_roles)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(case)
}

pub async fn get_by_number(
    pool: &PgPool,
    guild_id: i64,
    case_number: i64,
) -> Result<Option<Case>, sqlx::Error> {
    sqlx::query_as::<_, Case>(
        "SELECT * FROM cases WHERE guild_id = $1 AND case_number = $2"
    )
    .bind(guild_id)
    .bind(case_number)
    .fetch_optional(pool)
    .await
}

pub async fn list_for_target(
    pool: &PgPool,
    guild_id: i64,
    target_id: i64,
    limit: i64,
) -> Result<Vec<Case>, sqlx::Error> {
    sqlx::query_as::<_, Case>(
        r#"
        SELECT * FROM cases
        WHERE guild_id = $1 AND target_id = $2
        ORDER BY case_number DESC
        LIMIT $3
        "#
    )
    .bind(guild_id)
    .bind(target_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}
