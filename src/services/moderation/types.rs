use serenity::all::{GuildId, RoleId, UserId};

use crate::constants::limits::{DEFAULT_REASON, MAX_REASON_LENGTH};
use crate::utils::formatting::truncate;

/// Properties of a role that decide whether it may be stripped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleFlags {
    pub bot_managed: bool,
    pub premium_subscriber: bool,
    pub integration_managed: bool,
    /// The @everyone role
    pub is_default: bool,
    /// The bot itself is able to add/remove this role
    pub assignable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInfo {
    pub id: RoleId,
    pub position: u16,
    pub flags: RoleFlags,
}

/// The moderator invoking a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub permission_level: u8,
    pub top_role_position: u16,
}

/// The member a moderation action is aimed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: UserId,
    /// Current roles in the member's own order
    pub roles: Vec<RoleInfo>,
    pub top_role_position: u16,
    pub is_owner: bool,
}

impl Target {
    pub fn new(id: UserId, roles: Vec<RoleInfo>, is_owner: bool) -> Self {
        let top_role_position = top_position(&roles);
        Self {
            id,
            roles,
            top_role_position,
            is_owner,
        }
    }

    pub fn has_role(&self, role_id: RoleId) -> bool {
        self.roles.iter().any(|r| r.id == role_id)
    }
}

/// Highest position among a member's roles; 0 when they only have @everyone
pub fn top_position(roles: &[RoleInfo]) -> u16 {
    roles.iter().map(|r| r.position).max().unwrap_or(0)
}

/// Validated `/jail` arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JailOptions {
    pub reason: String,
    pub silent: bool,
}

impl JailOptions {
    /// Normalize raw command input: blank reasons fall back to the default,
    /// long ones are cut to the audit log limit.
    pub fn new(reason: Option<&str>, silent: bool) -> Self {
        let reason = match reason.map(str::trim) {
            Some(r) if !r.is_empty() => truncate(r, MAX_REASON_LENGTH),
            _ => DEFAULT_REASON.to_string(),
        };

        Self { reason, silent }
    }
}

/// Everything the jail pipeline needs to know about one invocation
#[derive(Debug, Clone)]
pub struct JailRequest {
    pub guild_id: GuildId,
    pub guild_name: String,
    pub moderator_id: UserId,
    pub moderator_name: String,
    pub target_id: UserId,
    pub target_name: String,
    pub options: JailOptions,
}
