use poise::serenity_prelude::{Channel, Role};

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::permissions::MAX_PERMISSION_LEVEL;
use crate::db::models::GuildConfig;
use crate::db::queries::guild_config::{self, ConfigField};
use crate::utils::formatting::{mention_channel, mention_role};

/// Setup commands for configuring moderation
#[poise::command(
    slash_command,
    subcommands("jail_role", "jail_channel", "mod_log", "permission_level"),
    required_permissions = "ADMINISTRATOR",
    guild_only
)]
pub async fn setup(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `/setup jail-role`, `/setup jail-channel`, `/setup mod-log`, `/setup permission-level`").await?;
    Ok(())
}

/// Set the role given to jailed members
#[poise::command(slash_command, rename = "jail-role", guild_only)]
pub async fn jail_role(
    ctx: Context<'_>,
    #[description = "Role that replaces a jailed member's roles"] role: Role,
) -> Result<(), Error> {
    let config = set(ctx, ConfigField::JailRole, role.id.get()).await?;
    reply(ctx, "Jail Role Set", format!("Jailed members will get {}", mention_role(role.id.get())), &config).await
}

/// Set the channel jailed members can still see
#[poise::command(slash_command, rename = "jail-channel", guild_only)]
pub async fn jail_channel(
    ctx: Context<'_>,
    #[description = "Channel left open to jailed members"]
    #[channel_types("Text")]
    channel: Channel,
) -> Result<(), Error> {
    let config = set(ctx, ConfigField::JailChannel, channel.id().get()).await?;
    reply(ctx, "Jail Channel Set", format!("Jail channel set to {}", mention_channel(channel.id().get())), &config).await
}

/// Set the channel where cases are logged
#[poise::command(slash_command, rename = "mod-log", guild_only)]
pub async fn mod_log(
    ctx: Context<'_>,
    #[description = "Channel for moderation case logs"]
    #[channel_types("Text")]
    channel: Channel,
) -> Result<(), Error> {
    let config = set(ctx, ConfigField::ModLogChannel, channel.id().get()).await?;
    reply(ctx, "Mod Log Set", format!("Cases will be logged in {}", mention_channel(channel.id().get())), &config).await
}

/// Grant a permission level to holders of a role
#[poise::command(slash_command, rename = "permission-level", guild_only)]
pub async fn permission_level(
    ctx: Context<'_>,
    #[description = "Permission level (0-7)"]
    #[min = 0]
    #[max = 7]
    level: u8,
    #[description = "Role granting this level"] role: Role,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    if level > MAX_PERMISSION_LEVEL {
        return Err(Error::custom(format!("Permission level must be between 0 and {}", MAX_PERMISSION_LEVEL)));
    }

    guild_config::set_permission_level_role(
        &ctx.data().pool,
        guild_id.get() as i64,
        level as i16,
        role.id.get() as i64,
    )
    .await?;

    let embed = embeds::success_embed()
        .title("Permission Level Set")
        .description(format!("{} now grants permission level {}", mention_role(role.id.get()), level));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

async fn set(ctx: Context<'_>, field: ConfigField, id: u64) -> Result<GuildConfig, Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let config = guild_config::set_field(&ctx.data().pool, guild_id.get() as i64, field, id as i64).await?;
    Ok(config)
}

async fn reply(ctx: Context<'_>, title: &str, description: String, config: &GuildConfig) -> Result<(), Error> {
    let description = if config.is_jail_configured() {
        format!("{}\n\nJail is fully configured.", description)
    } else {
        format!("{}\n\nJail still needs both a jail role and a jail channel.", description)
    };

    let embed = embeds::success_embed().title(title).description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}
