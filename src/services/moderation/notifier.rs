use serenity::all::{GuildId, UserId};
use tracing::{debug, warn};

use crate::constants::embeds::{identity_field, quoted};
use crate::constants::limits::MAX_EMBED_FIELD_LENGTH;
use crate::db::models::Case;
use crate::services::moderation::traits::{GuildConfigStore, ModerationLogEntry, NotificationChannel};
use crate::utils::formatting::{format_role_list, truncate};

/// Who a notice is about, with display names for rendering
#[derive(Debug, Clone)]
pub struct Party<'a> {
    pub id: UserId,
    pub name: &'a str,
}

/// What reached its destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyOutcome {
    pub dm_sent: bool,
    pub logged: bool,
}

/// Best-effort announcements after a case is recorded. Nothing here can fail
/// the action: errors are logged and reported back as `false` flags.
pub struct NotificationDispatcher<'a> {
    channel: &'a dyn NotificationChannel,
    config: &'a dyn GuildConfigStore,
}

impl<'a> NotificationDispatcher<'a> {
    pub fn new(channel: &'a dyn NotificationChannel, config: &'a dyn GuildConfigStore) -> Self {
        Self { channel, config }
    }

    pub async fn notify(
        &self,
        case: &Case,
        guild_name: &str,
        target: &Party<'_>,
        silent: bool,
        moderator: &Party<'_>,
    ) -> NotifyOutcome {
        let dm_sent = if silent {
            debug!("Silent jail, not messaging user {}", target.id);
            false
        } else {
            self.send_notice(case, guild_name, target).await
        };

        let logged = self.post_log(case, target, moderator).await;

        NotifyOutcome { dm_sent, logged }
    }

    async fn send_notice(&self, case: &Case, guild_name: &str, target: &Party<'_>) -> bool {
        let text = direct_notice(guild_name, &case.reason);
        let sent = self.channel.send_direct_message(target.id, &text).await;
        if !sent {
            warn!("Could not DM user {} about case #{}", target.id, case.case_number);
        }
        sent
    }

    async fn post_log(&self, case: &Case, target: &Party<'_>, moderator: &Party<'_>) -> bool {
        let guild_id = GuildId::new(case.guild_id as u64);

        let channel_id = match self.config.mod_log_channel(guild_id).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                debug!("No mod log channel for guild {}", guild_id);
                return false;
            }
            Err(e) => {
                warn!("Could not look up mod log channel for guild {}: {}", guild_id, e);
                return false;
            }
        };

        let entry = log_entry(case, target, moderator);
        match self.channel.post_moderation_embed(channel_id, &entry).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Failed to post case #{} to mod log {} in guild {}: {}",
                    case.case_number, channel_id, guild_id, e
                );
                false
            }
        }
    }
}

/// Text of the DM sent to a jailed member
pub fn direct_notice(guild_name: &str, reason: &str) -> String {
    format!(
        "You have been jailed from {} for the following reason:\n{}",
        guild_name,
        quoted(reason)
    )
}

/// The moderation-log record for a case
pub fn log_entry(case: &Case, target: &Party<'_>, moderator: &Party<'_>) -> ModerationLogEntry {
    let roles = format_role_list(&case.target_roles);

    ModerationLogEntry {
        title: case.title("created"),
        fields: vec![
            ("Moderator".to_string(), identity_field(moderator.name, moderator.id.get()), true),
            ("Target".to_string(), identity_field(target.name, target.id.get()), true),
            ("Reason".to_string(), truncate(&quoted(&case.reason), MAX_EMBED_FIELD_LENGTH), false),
            ("Removed Roles".to_string(), truncate(&roles, MAX_EMBED_FIELD_LENGTH), false),
        ],
    }
}
