use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, FullEvent};
use tracing::{error, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::db::queries::guild_config;

pub async fn event_handler(
    _ctx: &serenity::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Arc<Data>, Error>,
    data: &Arc<Data>,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot, .. } => {
            info!("Bot ready as {}", data_about_bot.user.name);
        }

        FullEvent::GuildRoleDelete { guild_id, removed_role_id, .. } => {
            // Forget a deleted jail role so /jail reports it as unconfigured
            match guild_config::clear_jail_role_if(
                &data.pool,
                guild_id.get() as i64,
                removed_role_id.get() as i64,
            )
            .await
            {
                Ok(true) => {
                    warn!("Jail role {} was deleted in guild {}, cleared from config", removed_role_id, guild_id);
                }
                Ok(false) => {}
                Err(e) => {
                    error!("Failed to clear deleted jail role {} in guild {}: {:?}", removed_role_id, guild_id, e);
                }
            }
        }

        _ => {}
    }

    Ok(())
}
