use std::collections::HashMap;

use async_trait::async_trait;
use serenity::all::{
    ChannelId, Context, CreateMessage, EditMember, GuildId, Permissions, Role, RoleId, Timestamp, UserId,
};
use tracing::debug;

use crate::constants::embeds;
use crate::services::moderation::error::ExternalApiError;
use crate::services::moderation::traits::{ModerationLogEntry, NotificationChannel, RoleDirectory};
use crate::services::moderation::types::{RoleFlags, RoleInfo};

/// Role directory and notification channel backed by the live gateway
/// connection. Reads prefer the cache and fall back to HTTP.
pub struct DiscordBackend {
    ctx: Context,
}

impl DiscordBackend {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    async fn guild_roles(&self, guild_id: GuildId) -> Result<HashMap<RoleId, Role>, ExternalApiError> {
        let cached = self.ctx.cache.guild(guild_id).map(|g| g.roles.clone());
        if let Some(roles) = cached {
            return Ok(roles);
        }

        guild_id
            .roles(&self.ctx)
            .await
            .map_err(|e| ExternalApiError::from_serenity(&e))
    }

    async fn member_role_ids(&self, guild_id: GuildId, user_id: UserId) -> Result<Vec<RoleId>, ExternalApiError> {
        let member = guild_id
            .member(&self.ctx, user_id)
            .await
            .map_err(|e| ExternalApiError::from_serenity(&e))?;
        Ok(member.roles)
    }
}

/// What the bot itself may do with roles in a guild
struct BotReach {
    can_manage_roles: bool,
    is_owner: bool,
    top_position: u16,
}

impl BotReach {
    fn new(bot_roles: &[RoleId], guild_roles: &HashMap<RoleId, Role>, everyone: RoleId, is_owner: bool) -> Self {
        let held = bot_roles
            .iter()
            .chain(std::iter::once(&everyone))
            .filter_map(|id| guild_roles.get(id));

        let mut permissions = Permissions::empty();
        let mut top_position = 0;
        for role in held {
            permissions |= role.permissions;
            top_position = top_position.max(role.position);
        }

        Self {
            can_manage_roles: permissions.administrator() || permissions.manage_roles(),
            is_owner,
            top_position,
        }
    }

    fn can_assign(&self, role: &Role, is_default: bool) -> bool {
        !role.managed
            && !is_default
            && (self.is_owner || (self.can_manage_roles && role.position < self.top_position))
    }
}

fn role_info(role: &Role, everyone: RoleId, reach: &BotReach) -> RoleInfo {
    let is_default = role.id == everyone;

    RoleInfo {
        id: role.id,
        position: role.position,
        flags: RoleFlags {
            bot_managed: role.tags.bot_id.is_some(),
            premium_subscriber: role.tags.premium_subscriber,
            integration_managed: role.tags.integration_id.is_some(),
            is_default,
            assignable: reach.can_assign(role, is_default),
        },
    }
}

#[async_trait]
impl RoleDirectory for DiscordBackend {
    async fn list_roles(&self, guild_id: GuildId, user_id: UserId) -> Result<Vec<RoleInfo>, ExternalApiError> {
        let guild_roles = self.guild_roles(guild_id).await?;
        let everyone = RoleId::new(guild_id.get());

        let bot_id = self.ctx.cache.current_user().id;
        let owner_id = self.guild_owner(guild_id).await?;
        let bot_roles = self.member_role_ids(guild_id, bot_id).await?;
        let reach = BotReach::new(&bot_roles, &guild_roles, everyone, bot_id == owner_id);

        // @everyone first, then the member's roles in the order Discord lists them
        let member_roles = self.member_role_ids(guild_id, user_id).await?;
        let roles = std::iter::once(everyone)
            .chain(member_roles)
            .filter_map(|id| guild_roles.get(&id))
            .map(|role| role_info(role, everyone, &reach))
            .collect();

        Ok(roles)
    }

    async fn role_exists(&self, guild_id: GuildId, role_id: RoleId) -> Result<bool, ExternalApiError> {
        Ok(self.guild_roles(guild_id).await?.contains_key(&role_id))
    }

    async fn guild_owner(&self, guild_id: GuildId) -> Result<UserId, ExternalApiError> {
        let cached = self.ctx.cache.guild(guild_id).map(|g| g.owner_id);
        if let Some(owner_id) = cached {
            return Ok(owner_id);
        }

        let guild = guild_id
            .to_partial_guild(&self.ctx)
            .await
            .map_err(|e| ExternalApiError::from_serenity(&e))?;
        Ok(guild.owner_id)
    }

    async fn remove_roles(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_ids: &[RoleId],
        reason: &str,
    ) -> Result<(), ExternalApiError> {
        // One PATCH with the remaining roles, so removal is all or nothing
        let remaining: Vec<RoleId> = self
            .member_role_ids(guild_id, user_id)
            .await?
            .into_iter()
            .filter(|id| !role_ids.contains(id))
            .collect();

        let edit = EditMember::new().roles(remaining).audit_log_reason(reason);
        guild_id
            .edit_member(&self.ctx, user_id, edit)
            .await
            .map_err(|e| ExternalApiError::from_serenity(&e))?;

        debug!("Removed roles {:?} from user {} in guild {}", role_ids, user_id, guild_id);
        Ok(())
    }

    async fn add_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), ExternalApiError> {
        self.ctx
            .http
            .add_member_role(guild_id, user_id, role_id, Some(reason))
            .await
            .map_err(|e| ExternalApiError::from_serenity(&e))?;

        debug!("Added role {} to user {} in guild {}", role_id, user_id, guild_id);
        Ok(())
    }
}

#[async_trait]
impl NotificationChannel for DiscordBackend {
    async fn send_direct_message(&self, user_id: UserId, text: &str) -> bool {
        let message = CreateMessage::new().content(text);

        // DMs are often closed; that is not an error
        match user_id.create_dm_channel(&self.ctx).await {
            Ok(dm_channel) => match dm_channel.send_message(&self.ctx, message).await {
                Ok(_) => true,
                Err(e) => {
                    debug!("Could not DM user {}: {:?}", user_id, e);
                    false
                }
            },
            Err(e) => {
                debug!("Could not create DM channel for user {}: {:?}", user_id, e);
                false
            }
        }
    }

    async fn post_moderation_embed(
        &self,
        channel_id: ChannelId,
        entry: &ModerationLogEntry,
    ) -> Result<(), ExternalApiError> {
        let embed = embeds::case_embed()
            .title(&entry.title)
            .fields(entry.fields.clone())
            .timestamp(Timestamp::now());

        channel_id
            .send_message(&self.ctx, CreateMessage::new().embed(embed))
            .await
            .map_err(|e| ExternalApiError::from_serenity(&e))?;

        Ok(())
    }
}
