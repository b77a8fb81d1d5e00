use serenity::all::{GuildId, RoleId, UserId};
use tracing::info;

use crate::db::models::{Case, CaseType};
use crate::services::moderation::error::PersistenceError;
use crate::services::moderation::traits::{CaseStore, NewCase};

/// Append-only, per-guild numbered record of moderation actions
pub struct CaseLedger<'a> {
    store: &'a dyn CaseStore,
}

impl<'a> CaseLedger<'a> {
    pub fn new(store: &'a dyn CaseStore) -> Self {
        Self { store }
    }

    /// Record an action that already happened. Numbering is left to the
    /// store, which allocates it atomically per guild.
    pub async fn insert(
        &self,
        guild_id: GuildId,
        target_id: UserId,
        moderator_id: UserId,
        case_type: CaseType,
        reason: &str,
        target_roles: &[RoleId],
    ) -> Result<Case, PersistenceError> {
        let case = self
            .store
            .insert_case(NewCase {
                guild_id,
                target_id,
                moderator_id,
                case_type,
                reason: reason.to_string(),
                target_roles: target_roles.to_vec(),
            })
            .await?;

        info!(
            "Recorded case #{} ({}) in guild {} for user {}",
            case.case_number, case.case_type, guild_id, target_id
        );

        Ok(case)
    }
}
