use serenity::all::RoleId;

use crate::constants::permissions::MAX_PERMISSION_LEVEL;
use crate::services::moderation::types::RoleInfo;

/// A member's permission level: the highest configured level whose role
/// they hold, 0 if none. The guild owner always has the maximum.
pub fn permission_level(roles: &[RoleInfo], is_owner: bool, level_roles: &[(u8, RoleId)]) -> u8 {
    if is_owner {
        return MAX_PERMISSION_LEVEL;
    }

    level_roles
        .iter()
        .filter(|(level, _)| *level <= MAX_PERMISSION_LEVEL)
        .filter(|(_, role_id)| roles.iter().any(|r| r.id == *role_id))
        .map(|(level, _)| *level)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::moderation::types::RoleFlags;

    fn roles(ids: &[u64]) -> Vec<RoleInfo> {
        ids.iter()
            .map(|id| RoleInfo {
                id: RoleId::new(*id),
                position: 1,
                flags: RoleFlags::default(),
            })
            .collect()
    }

    #[test]
    fn test_highest_held_level_wins() {
        let levels = [(2, RoleId::new(20)), (5, RoleId::new(50)), (3, RoleId::new(30))];
        assert_eq!(permission_level(&roles(&[20, 30]), false, &levels), 3);
        assert_eq!(permission_level(&roles(&[50]), false, &levels), 5);
    }

    #[test]
    fn test_no_level_roles() {
        let levels = [(2, RoleId::new(20))];
        assert_eq!(permission_level(&roles(&[1, 2]), false, &levels), 0);
        assert_eq!(permission_level(&[], false, &[]), 0);
    }

    #[test]
    fn test_owner_is_max() {
        assert_eq!(permission_level(&[], true, &[]), MAX_PERMISSION_LEVEL);
    }

    #[test]
    fn test_out_of_range_levels_ignored() {
        let levels = [(9, RoleId::new(90)), (1, RoleId::new(10))];
        assert_eq!(permission_level(&roles(&[90, 10]), false, &levels), 1);
    }
}
