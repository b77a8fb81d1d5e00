use serenity::all::RoleId;

use crate::services::moderation::types::{RoleInfo, Target};

/// Roles the jail may strip from `target`, in the target's own order.
///
/// Skips roles the bot cannot hand back later (managed by a bot, an
/// integration or server boosting), @everyone, and the jail role itself.
/// The result doubles as the case snapshot, so compute it once before
/// mutating and reuse it.
pub fn compute_removable_roles(target: &Target, jail_role: RoleId) -> Vec<RoleInfo> {
    target
        .roles
        .iter()
        .filter(|role| is_removable(role, jail_role))
        .cloned()
        .collect()
}

fn is_removable(role: &RoleInfo, jail_role: RoleId) -> bool {
    let flags = &role.flags;
    !(flags.bot_managed
        || flags.premium_subscriber
        || flags.integration_managed
        || flags.is_default
        || role.id == jail_role)
        && flags.assignable
}

/// Ids of a role list, order preserved
pub fn role_ids(roles: &[RoleInfo]) -> Vec<RoleId> {
    roles.iter().map(|r| r.id).collect()
}
