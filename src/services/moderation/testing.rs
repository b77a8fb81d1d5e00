//! In-memory collaborators for exercising the jail pipeline without Discord
//! or Postgres.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serenity::all::{ChannelId, GuildId, RoleId, UserId};
use uuid::Uuid;

use crate::db::models::Case;
use crate::services::moderation::error::{ExternalApiError, PersistenceError};
use crate::services::moderation::traits::{
    CaseStore, GuildConfigStore, ModerationLogEntry, NewCase, NotificationChannel, RoleDirectory,
};
use crate::services::moderation::types::{RoleFlags, RoleInfo};

pub struct FakeConfig {
    jail_role: Mutex<Option<RoleId>>,
    jail_channel: Mutex<Option<ChannelId>>,
    mod_log: Mutex<Option<ChannelId>>,
    level_roles: Mutex<Vec<(u8, RoleId)>>,
}

impl FakeConfig {
    pub const JAIL_ROLE: u64 = 999;
    pub const JAIL_CHANNEL: u64 = 500;
    pub const MOD_LOG: u64 = 501;

    pub fn configured() -> Self {
        Self {
            jail_role: Mutex::new(Some(RoleId::new(Self::JAIL_ROLE))),
            jail_channel: Mutex::new(Some(ChannelId::new(Self::JAIL_CHANNEL))),
            mod_log: Mutex::new(Some(ChannelId::new(Self::MOD_LOG))),
            level_roles: Mutex::new(Vec::new()),
        }
    }

    pub fn set_jail_role(&self, role: Option<RoleId>) {
        *self.jail_role.lock().unwrap() = role;
    }

    pub fn set_jail_channel(&self, channel: Option<ChannelId>) {
        *self.jail_channel.lock().unwrap() = channel;
    }

    pub fn set_mod_log(&self, channel: Option<ChannelId>) {
        *self.mod_log.lock().unwrap() = channel;
    }

    pub fn set_level_role(&self, level: u8, role: RoleId) {
        self.level_roles.lock().unwrap().push((level, role));
    }

    pub fn clear_level_roles(&self) {
        self.level_roles.lock().unwrap().clear();
    }
}

#[async_trait]
impl GuildConfigStore for FakeConfig {
    async fn jail_role(&self, _: GuildId) -> Result<Option<RoleId>, PersistenceError> {
        Ok(*self.jail_role.lock().unwrap())
    }

    async fn jail_channel(&self, _: GuildId) -> Result<Option<ChannelId>, PersistenceError> {
        Ok(*self.jail_channel.lock().unwrap())
    }

    async fn mod_log_channel(&self, _: GuildId) -> Result<Option<ChannelId>, PersistenceError> {
        Ok(*self.mod_log.lock().unwrap())
    }

    async fn permission_level_roles(&self, _: GuildId) -> Result<Vec<(u8, RoleId)>, PersistenceError> {
        Ok(self.level_roles.lock().unwrap().clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryCall {
    Remove(UserId, Vec<RoleId>, String),
    Add(UserId, RoleId, String),
}

/// A single guild's members and roles
pub struct FakeDirectory {
    owner: Mutex<UserId>,
    guild_roles: Mutex<HashSet<RoleId>>,
    members: Mutex<HashMap<UserId, Vec<RoleInfo>>>,
    calls: Mutex<Vec<DirectoryCall>>,
    remove_error: Mutex<Option<ExternalApiError>>,
    add_error: Mutex<Option<ExternalApiError>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self {
            owner: Mutex::new(UserId::new(1)),
            guild_roles: Mutex::new(HashSet::new()),
            members: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            remove_error: Mutex::new(None),
            add_error: Mutex::new(None),
        }
    }

    pub fn set_owner(&self, owner: UserId) {
        *self.owner.lock().unwrap() = owner;
    }

    pub fn add_guild_role(&self, role: RoleId) {
        self.guild_roles.lock().unwrap().insert(role);
    }

    pub fn set_member(&self, user_id: UserId, roles: Vec<RoleInfo>) {
        let mut guild_roles = self.guild_roles.lock().unwrap();
        guild_roles.extend(roles.iter().map(|r| r.id));
        self.members.lock().unwrap().insert(user_id, roles);
    }

    pub fn member_roles(&self, user_id: UserId) -> Vec<RoleInfo> {
        self.members.lock().unwrap().get(&user_id).cloned().unwrap_or_default()
    }

    pub fn fail_remove(&self, error: ExternalApiError) {
        *self.remove_error.lock().unwrap() = Some(error);
    }

    pub fn fail_add(&self, error: ExternalApiError) {
        *self.add_error.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<DirectoryCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutated(&self) -> bool {
        !self.calls.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl RoleDirectory for FakeDirectory {
    async fn list_roles(&self, _: GuildId, user_id: UserId) -> Result<Vec<RoleInfo>, ExternalApiError> {
        Ok(self.member_roles(user_id))
    }

    async fn role_exists(&self, _: GuildId, role_id: RoleId) -> Result<bool, ExternalApiError> {
        Ok(self.guild_roles.lock().unwrap().contains(&role_id))
    }

    async fn guild_owner(&self, _: GuildId) -> Result<UserId, ExternalApiError> {
        Ok(*self.owner.lock().unwrap())
    }

    async fn remove_roles(
        &self,
        _: GuildId,
        user_id: UserId,
        role_ids: &[RoleId],
        reason: &str,
    ) -> Result<(), ExternalApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(DirectoryCall::Remove(user_id, role_ids.to_vec(), reason.to_string()));

        if let Some(e) = self.remove_error.lock().unwrap().clone() {
            return Err(e);
        }

        if let Some(roles) = self.members.lock().unwrap().get_mut(&user_id) {
            roles.retain(|r| !role_ids.contains(&r.id));
        }
        Ok(())
    }

    async fn add_role(
        &self,
        _: GuildId,
        user_id: UserId,
        role_id: RoleId,
        reason: &str,
    ) -> Result<(), ExternalApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(DirectoryCall::Add(user_id, role_id, reason.to_string()));

        if let Some(e) = self.add_error.lock().unwrap().clone() {
            return Err(e);
        }

        self.members
            .lock()
            .unwrap()
            .entry(user_id)
            .or_default()
            .push(RoleInfo {
                id: role_id,
                position: 1,
                flags: RoleFlags {
                    assignable: true,
                    ..Default::default()
                },
            });
        Ok(())
    }
}

/// Numbers cases the way the Postgres counter does: max + 1 per guild,
/// under one lock
pub struct MemoryCaseStore {
    cases: Mutex<Vec<Case>>,
    fail: Mutex<bool>,
}

impl MemoryCaseStore {
    pub fn new() -> Self {
        Self {
            cases: Mutex::new(Vec::new()),
            fail: Mutex::new(false),
        }
    }

    pub fn fail_writes(&self) {
        *self.fail.lock().unwrap() = true;
    }

    pub fn cases(&self) -> Vec<Case> {
        self.cases.lock().unwrap().clone()
    }
}

#[async_trait]
impl CaseStore for MemoryCaseStore {
    async fn insert_case(&self, new_case: NewCase) -> Result<Case, PersistenceError> {
        if *self.fail.lock().unwrap() {
            return Err(PersistenceError::WriteFailed("database unavailable".to_string()));
        }

        let guild_id = new_case.guild_id.get() as i64;
        let mut cases = self.cases.lock().unwrap();
        let case_number = cases
            .iter()
            .filter(|c| c.guild_id == guild_id)
            .map(|c| c.case_number)
            .max()
            .unwrap_or(0)
            + 1;

        let case = Case {
            id: Uuid::new_v4(),
            guild_id,
            case_number,
            target_id: new_case.target_id.get() as i64,
            moderator_id: new_case.moderator_id.get() as i64,
            case_type: new_case.case_type,
            reason: new_case.reason,
            target_roles: new_case.target_roles.iter().map(|r| r.get() as i64).collect(),
            created_at: Utc::now(),
        };
        cases.push(case.clone());

        Ok(case)
    }
}

pub struct FakeNotifier {
    dms_open: Mutex<bool>,
    post_error: Mutex<Option<ExternalApiError>>,
    direct_messages: Mutex<Vec<(UserId, String)>>,
    posts: Mutex<Vec<(ChannelId, ModerationLogEntry)>>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self {
            dms_open: Mutex::new(true),
            post_error: Mutex::new(None),
            direct_messages: Mutex::new(Vec::new()),
            posts: Mutex::new(Vec::new()),
        }
    }

    pub fn close_dms(&self) {
        *self.dms_open.lock().unwrap() = false;
    }

    pub fn fail_posts(&self, error: ExternalApiError) {
        *self.post_error.lock().unwrap() = Some(error);
    }

    /// Delivered DMs only
    pub fn direct_messages(&self) -> Vec<(UserId, String)> {
        self.direct_messages.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<(ChannelId, ModerationLogEntry)> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationChannel for FakeNotifier {
    async fn send_direct_message(&self, user_id: UserId, text: &str) -> bool {
        if !*self.dms_open.lock().unwrap() {
            return false;
        }
        self.direct_messages
            .lock()
            .unwrap()
            .push((user_id, text.to_string()));
        true
    }

    async fn post_moderation_embed(
        &self,
        channel_id: ChannelId,
        entry: &ModerationLogEntry,
    ) -> Result<(), ExternalApiError> {
        if let Some(e) = self.post_error.lock().unwrap().clone() {
            return Err(e);
        }
        self.posts.lock().unwrap().push((channel_id, entry.clone()));
        Ok(())
    }
}
