use std::sync::Arc;

use dashmap::DashMap;
use serenity::all::{GuildId, UserId};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{error, info};

use crate::constants::permissions::JAIL_PERMISSION_LEVEL;
use crate::db::models::{Case, CaseType};
use crate::services::moderation::case_ledger::CaseLedger;
use crate::services::moderation::error::{ConfigurationError, JailError};
use crate::services::moderation::notifier::{NotificationDispatcher, NotifyOutcome, Party};
use crate::services::moderation::permission_gate::authorize;
use crate::services::moderation::role_snapshot::{compute_removable_roles, role_ids};
use crate::services::moderation::role_transition;
use crate::services::moderation::traits::{CaseStore, GuildConfigStore, NotificationChannel, RoleDirectory};
use crate::services::moderation::types::{top_position, Actor, JailRequest, Target};
use crate::utils::permissions::permission_level;

/// One async mutex per (guild, member) so two jails of the same member
/// never interleave. Different members and guilds never wait on each other.
#[derive(Default)]
pub struct TargetLocks {
    locks: DashMap<(GuildId, UserId), Arc<Mutex<()>>>,
}

impl TargetLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, guild_id: GuildId, user_id: UserId) -> TargetGuard<'_> {
        let key = (guild_id, user_id);
        // Clone the Arc out so the shard lock is released before awaiting
        let lock = self
            .locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        TargetGuard {
            guard: Some(lock.lock_owned().await),
            locks: self,
            key,
        }
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Held for the duration of one jail. The map entry is dropped with the
/// last guard so idle members don't accumulate.
pub struct TargetGuard<'a> {
    guard: Option<OwnedMutexGuard<()>>,
    locks: &'a TargetLocks,
    key: (GuildId, UserId),
}

impl Drop for TargetGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        // Anyone still waiting holds a clone of the Arc
        self.locks
            .locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Result of a completed jail
#[derive(Debug, Clone)]
pub struct JailOutcome {
    pub case: Case,
    pub notification: NotifyOutcome,
}

/// The collaborators one jail invocation runs against
pub struct Jailer<'a> {
    pub config: &'a dyn GuildConfigStore,
    pub roles: &'a dyn RoleDirectory,
    pub cases: &'a dyn CaseStore,
    pub notifications: &'a dyn NotificationChannel,
    pub locks: &'a TargetLocks,
}

impl<'a> Jailer<'a> {
    /// Jail a member: check authority, strip their roles, add the jail role,
    /// record a case, then notify.
    ///
    /// Anything failing before the case is written leaves no case and sends
    /// nothing. Notification failures never fail the jail.
    pub async fn jail(&self, request: &JailRequest) -> Result<JailOutcome, JailError> {
        let guild_id = request.guild_id;
        let _guard = self.locks.acquire(guild_id, request.target_id).await;

        let owner_id = self.roles.guild_owner(guild_id).await?;
        let actor = self.load_actor(guild_id, request.moderator_id, owner_id).await?;
        let target = self.load_target(guild_id, request.target_id, owner_id).await?;

        authorize(&actor, &target, JAIL_PERMISSION_LEVEL)?;

        let jail_role = self
            .config
            .jail_role(guild_id)
            .await?
            .ok_or(ConfigurationError::MissingJailRole)?;
        if !self.roles.role_exists(guild_id, jail_role).await? {
            return Err(ConfigurationError::JailRoleDeleted(jail_role).into());
        }
        if self.config.jail_channel(guild_id).await?.is_none() {
            return Err(ConfigurationError::MissingJailChannel.into());
        }

        if target.has_role(jail_role) {
            return Err(JailError::AlreadyJailed);
        }

        // Captured once: the mutation below empties the live role set
        let snapshot = role_ids(&compute_removable_roles(&target, jail_role));

        role_transition::apply(
            self.roles,
            guild_id,
            &target,
            &snapshot,
            Some(jail_role),
            &request.options.reason,
        )
        .await?;

        let case = CaseLedger::new(self.cases)
            .insert(
                guild_id,
                target.id,
                actor.id,
                CaseType::Jail,
                &request.options.reason,
                &snapshot,
            )
            .await
            .map_err(|e| {
                error!(
                    "User {} in guild {} was jailed (removed {:?}) but no case was recorded: {}",
                    target.id, guild_id, snapshot, e
                );
                JailError::from(e)
            })?;

        info!(
            "User {} jailed user {} in guild {} as case #{} (removed roles: {:?})",
            actor.id, target.id, guild_id, case.case_number, snapshot
        );

        let notification = NotificationDispatcher::new(self.notifications, self.config)
            .notify(
                &case,
                &request.guild_name,
                &Party {
                    id: target.id,
                    name: &request.target_name,
                },
                request.options.silent,
                &Party {
                    id: actor.id,
                    name: &request.moderator_name,
                },
            )
            .await;

        Ok(JailOutcome { case, notification })
    }

    async fn load_actor(&self, guild_id: GuildId, user_id: UserId, owner_id: UserId) -> Result<Actor, JailError> {
        let roles = self.roles.list_roles(guild_id, user_id).await?;
        let level_roles = self.config.permission_level_roles(guild_id).await?;
        let is_owner = user_id == owner_id;

        Ok(Actor {
            id: user_id,
            permission_level: permission_level(&roles, is_owner, &level_roles),
            top_role_position: top_position(&roles),
        })
    }

    async fn load_target(&self, guild_id: GuildId, user_id: UserId, owner_id: UserId) -> Result<Target, JailError> {
        let roles = self.roles.list_roles(guild_id, user_id).await?;
        Ok(Target::new(user_id, roles, user_id == owner_id))
    }
}
