use poise::serenity_prelude::{User, UserId};

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds::{self, quoted};
use crate::constants::limits::{CASE_HISTORY_LIMIT, MAX_EMBED_FIELD_LENGTH};
use crate::db::queries::case as case_queries;
use crate::utils::formatting::{format_role_list, mention_user, truncate};

/// Look up recorded moderation cases
#[poise::command(
    slash_command,
    subcommands("view", "history"),
    required_permissions = "MODERATE_MEMBERS",
    guild_only
)]
pub async fn case(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `/case view`, `/case history`").await?;
    Ok(())
}

/// Show one case by number
#[poise::command(slash_command, guild_only)]
pub async fn view(
    ctx: Context<'_>,
    #[description = "Case number"]
    #[min = 1]
    number: i64,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let embed = match case_queries::get_by_number(&ctx.data().pool, guild_id.get() as i64, number).await? {
        Some(case) => embeds::case_embed()
            .title(case.title("recorded"))
            .field("Moderator", mention_user(UserId::new(case.moderator_id as u64)), true)
            .field("Target", mention_user(UserId::new(case.target_id as u64)), true)
            .field("Reason", truncate(&quoted(&case.reason), MAX_EMBED_FIELD_LENGTH), false)
            .field(
                "Removed Roles",
                truncate(&format_role_list(&case.target_roles), MAX_EMBED_FIELD_LENGTH),
                false,
            )
            .field("Created", format!("<t:{}:F>", case.created_at.timestamp()), false),
        None => embeds::error_embed()
            .title("Case Not Found")
            .description(format!("There is no case #{} in this server.", number)),
    };

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// List the most recent cases for a member
#[poise::command(slash_command, guild_only)]
pub async fn history(
    ctx: Context<'_>,
    #[description = "Member to look up"] user: User,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let cases = case_queries::list_for_target(
        &ctx.data().pool,
        guild_id.get() as i64,
        user.id.get() as i64,
        CASE_HISTORY_LIMIT,
    )
    .await?;

    let description = if cases.is_empty() {
        format!("{} has no cases.", mention_user(user.id))
    } else {
        cases
            .iter()
            .map(|c| {
                format!(
                    "**#{}** {} <t:{}:R> {}",
                    c.case_number,
                    c.case_type,
                    c.created_at.timestamp(),
                    truncate(&c.reason, 80)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let embed = embeds::info_embed()
        .title(format!("Cases for {}", user.name))
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
