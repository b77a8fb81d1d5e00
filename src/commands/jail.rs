use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter, User};
use tracing::error;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds::{self, identity_field, quoted};
use crate::constants::limits::MAX_EMBED_FIELD_LENGTH;
use crate::services::moderation::discord::DiscordBackend;
use crate::services::moderation::error::{ExternalApiError, PersistenceError};
use crate::services::moderation::{JailError, JailOptions, JailOutcome, JailRequest, Jailer};
use crate::utils::formatting::{mention_role, mention_user, truncate};

/// Jail a member: strip their roles and give them the jail role
#[poise::command(slash_command, guild_only)]
pub async fn jail(
    ctx: Context<'_>,
    #[description = "Member to jail"] user: User,
    #[description = "Reason for the jail"]
    #[max_length = 512]
    reason: Option<String>,
    #[description = "Don't DM the member"] silent: Option<bool>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let guild_name = ctx
        .guild()
        .map(|g| g.name.clone())
        .unwrap_or_else(|| guild_id.to_string());

    ctx.defer_ephemeral().await?;

    let request = JailRequest {
        guild_id,
        guild_name,
        moderator_id: ctx.author().id,
        moderator_name: ctx.author().name.clone(),
        target_id: user.id,
        target_name: user.name.clone(),
        options: JailOptions::new(reason.as_deref(), silent.unwrap_or(false)),
    };

    let backend = DiscordBackend::new(ctx.serenity_context().clone());
    let data = ctx.data();
    let jailer = Jailer {
        config: &data.store,
        roles: &backend,
        cases: &data.store,
        notifications: &backend,
        locks: &data.target_locks,
    };

    let embed = match jailer.jail(&request).await {
        Ok(outcome) => success_embed(&request, &outcome),
        Err(e) => {
            if e.mutated_roles() {
                error!(
                    "Jail of user {} in guild {} by {} needs manual correction: {}",
                    request.target_id, guild_id, request.moderator_id, e
                );
            }
            failure_embed(&request, &e)
        }
    };

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

fn success_embed(request: &JailRequest, outcome: &JailOutcome) -> CreateEmbed {
    let mut embed = embeds::case_embed()
        .title(outcome.case.title("created"))
        .field(
            "Moderator",
            identity_field(&request.moderator_name, request.moderator_id.get()),
            true,
        )
        .field(
            "Target",
            identity_field(&request.target_name, request.target_id.get()),
            true,
        )
        .field(
            "Reason",
            truncate(&quoted(&outcome.case.reason), MAX_EMBED_FIELD_LENGTH),
            false,
        );

    let mut notes = Vec::new();
    if !request.options.silent && !outcome.notification.dm_sent {
        notes.push(format!("Could not DM {}.", mention_user(request.target_id)));
    }
    if !outcome.notification.logged {
        notes.push("Case was not posted to a mod log channel.".to_string());
    }
    if !notes.is_empty() {
        embed = embed.footer(CreateEmbedFooter::new(notes.join(" ")));
    }

    embed
}

fn failure_embed(request: &JailRequest, err: &JailError) -> CreateEmbed {
    match err {
        JailError::ExternalApi(ExternalApiError::PartialFailure { removed, .. }) => {
            let roles = removed
                .iter()
                .map(|id| mention_role(id.get()))
                .collect::<Vec<_>>()
                .join(" ");

            embeds::error_embed()
                .title("Jail Incomplete")
                .description(format!(
                    "{}\n\n{} has lost their roles but does not have the jail role. \
                    No case was recorded. Please fix their roles manually.",
                    err,
                    mention_user(request.target_id)
                ))
                .field("Removed Roles", truncate(&roles, MAX_EMBED_FIELD_LENGTH), false)
        }
        JailError::Persistence(PersistenceError::WriteFailed(_)) => embeds::error_embed()
            .title("Case Not Recorded")
            .description(format!(
                "{} was jailed, but the case could not be saved: {}\n\nPlease record this action manually.",
                mention_user(request.target_id),
                err
            )),
        JailError::ExternalApi(api_err) => {
            let hint = if api_err.is_transient() {
                " This looks temporary, try again in a moment."
            } else {
                ""
            };

            embeds::error_embed()
                .title("Jail Failed")
                .description(format!(
                    "Failed to jail {}. {}\n\nNo roles were changed.{}",
                    mention_user(request.target_id),
                    err,
                    hint
                ))
        }
        _ => embeds::error_embed()
            .title("Cannot Jail")
            .description(err.to_string()),
    }
}
