use crate::services::moderation::error::AuthorizationError;
use crate::services::moderation::types::{Actor, Target};

/// Proof that an actor passed every check for one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorization {
    pub required_level: u8,
}

type Check = fn(&Actor, &Target, u8) -> Result<(), AuthorizationError>;

/// Evaluated in order; the first failure wins.
const CHECKS: [Check; 4] = [not_self, outranks_target, not_owner, has_level];

/// Decide whether `actor` may jail `target` with a command of `required_level`.
/// Pure: reads ranks and levels only.
pub fn authorize(actor: &Actor, target: &Target, required_level: u8) -> Result<Authorization, AuthorizationError> {
    for check in CHECKS {
        check(actor, target, required_level)?;
    }

    Ok(Authorization { required_level })
}

fn not_self(actor: &Actor, target: &Target, _: u8) -> Result<(), AuthorizationError> {
    if actor.id == target.id {
        return Err(AuthorizationError::SelfTarget);
    }
    Ok(())
}

fn outranks_target(actor: &Actor, target: &Target, _: u8) -> Result<(), AuthorizationError> {
    if target.top_role_position >= actor.top_role_position {
        return Err(AuthorizationError::InsufficientRank);
    }
    Ok(())
}

fn not_owner(_: &Actor, target: &Target, _: u8) -> Result<(), AuthorizationError> {
    if target.is_owner {
        return Err(AuthorizationError::OwnerProtected);
    }
    Ok(())
}

fn has_level(actor: &Actor, _: &Target, required_level: u8) -> Result<(), AuthorizationError> {
    if actor.permission_level < required_level {
        return Err(AuthorizationError::InsufficientPermission {
            required: required_level,
            actual: actor.permission_level,
        });
    }
    Ok(())
}
