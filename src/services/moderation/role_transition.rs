use serenity::all::{GuildId, RoleId};
use tracing::{debug, error};

use crate::services::moderation::error::{ConfigurationError, ExternalApiError, JailError};
use crate::services::moderation::traits::RoleDirectory;
use crate::services::moderation::types::Target;

/// Roles actually changed by a successful transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub removed: Vec<RoleId>,
    pub added: RoleId,
}

/// Swap a member's roles for the jail role.
///
/// Two separate calls, removal first so privileges go before the jail role
/// lands. There is no atomicity across them:
/// - removal fails: nothing changed, the error is returned as is and the
///   jail role is not added
/// - addition fails after removal: the member is left without roles and
///   without the jail role. This is reported as `PartialFailure` and must be
///   fixed by hand; callers must not retry or write a case.
pub async fn apply(
    directory: &dyn RoleDirectory,
    guild_id: GuildId,
    target: &Target,
    roles_to_remove: &[RoleId],
    jail_role: Option<RoleId>,
    reason: &str,
) -> Result<Applied, JailError> {
    let jail_role = jail_role.ok_or(ConfigurationError::MissingJailRole)?;

    if roles_to_remove.is_empty() {
        debug!("User {} has no removable roles, only adding jail role", target.id);
    } else {
        directory
            .remove_roles(guild_id, target.id, roles_to_remove, reason)
            .await?;
    }

    if let Err(e) = directory.add_role(guild_id, target.id, jail_role, reason).await {
        if roles_to_remove.is_empty() {
            return Err(e.into());
        }

        error!(
            "User {} in guild {} lost roles {:?} but did not receive jail role {}: {}. Manual correction required",
            target.id, guild_id, roles_to_remove, jail_role, e
        );
        return Err(ExternalApiError::PartialFailure {
            removed: roles_to_remove.to_vec(),
            reason: e.to_string(),
        }
        .into());
    }

    Ok(Applied {
        removed: roles_to_remove.to_vec(),
        added: jail_role,
    })
}

#[cfg(test)]
mod tests {
    use serenity::all::UserId;

    use super::*;
    use crate::services::moderation::testing::{DirectoryCall, FakeDirectory};

    const GUILD: u64 = 100;
    const JAIL: u64 = 999;

    fn target() -> Target {
        Target::new(UserId::new(2), Vec::new(), false)
    }

    #[tokio::test]
    async fn test_removes_then_adds() {
        let directory = FakeDirectory::new();
        let removed = vec![RoleId::new(10), RoleId::new(11)];

        let applied = apply(
            &directory,
            GuildId::new(GUILD),
            &target(),
            &removed,
            Some(RoleId::new(JAIL)),
            "spam",
        )
        .await
        .unwrap();

        assert_eq!(applied.removed, removed);
        assert_eq!(applied.added, RoleId::new(JAIL));
        assert_eq!(
            directory.calls(),
            vec![
                DirectoryCall::Remove(UserId::new(2), removed.clone(), "spam".to_string()),
                DirectoryCall::Add(UserId::new(2), RoleId::new(JAIL), "spam".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_jail_role_mutates_nothing() {
        let directory = FakeDirectory::new();

        let err = apply(&directory, GuildId::new(GUILD), &target(), &[RoleId::new(10)], None, "spam")
            .await
            .unwrap_err();

        assert_eq!(err, JailError::Configuration(ConfigurationError::MissingJailRole));
        assert!(directory.calls().is_empty());
    }

    #[tokio::test]
    async fn test_removal_failure_skips_addition() {
        let directory = FakeDirectory::new();
        directory.fail_remove(ExternalApiError::Permanent("Missing Permissions".into()));

        let err = apply(
            &directory,
            GuildId::new(GUILD),
            &target(),
            &[RoleId::new(10)],
            Some(RoleId::new(JAIL)),
            "spam",
        )
        .await
        .unwrap_err();

        assert_eq!(
            err,
            JailError::ExternalApi(ExternalApiError::Permanent("Missing Permissions".into()))
        );
        assert!(directory
            .calls()
            .iter()
            .all(|c| !matches!(c, DirectoryCall::Add(..))));
    }

    #[tokio::test]
    async fn test_addition_failure_is_partial() {
        let directory = FakeDirectory::new();
        directory.fail_add(ExternalApiError::Transient("503".into()));

        let err = apply(
            &directory,
            GuildId::new(GUILD),
            &target(),
            &[RoleId::new(10)],
            Some(RoleId::new(JAIL)),
            "spam",
        )
        .await
        .unwrap_err();

        match err {
            JailError::ExternalApi(ExternalApiError::PartialFailure { removed, .. }) => {
                assert_eq!(removed, vec![RoleId::new(10)]);
            }
            other => panic!("expected partial failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_removal_only_adds() {
        let directory = FakeDirectory::new();

        let applied = apply(&directory, GuildId::new(GUILD), &target(), &[], Some(RoleId::new(JAIL)), "spam")
            .await
            .unwrap();

        assert!(applied.removed.is_empty());
        assert_eq!(
            directory.calls(),
            vec![DirectoryCall::Add(UserId::new(2), RoleId::new(JAIL), "spam".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_removal_add_failure_is_not_partial() {
        let directory = FakeDirectory::new();
        directory.fail_add(ExternalApiError::Transient("503".into()));

        let err = apply(&directory, GuildId::new(GUILD), &target(), &[], Some(RoleId::new(JAIL)), "spam")
            .await
            .unwrap_err();

        assert!(!err.mutated_roles());
    }
}
