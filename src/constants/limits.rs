/// Discord rejects audit log reasons longer than this
pub const MAX_REASON_LENGTH: usize = 512;

/// Reason recorded when the moderator gives none
pub const DEFAULT_REASON: &str = "No reason provided";

pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// Embed field values are capped by Discord at 1024 characters
pub const MAX_EMBED_FIELD_LENGTH: usize = 1024;

/// Cases shown by `/case` history lookups
pub const CASE_HISTORY_LIMIT: i64 = 10;
