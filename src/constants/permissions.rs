/// Highest configurable permission level; the guild owner always has it
pub const MAX_PERMISSION_LEVEL: u8 = 7;

/// Level required to jail a member
pub const JAIL_PERMISSION_LEVEL: u8 = 2;
