use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "case_type", rename_all = "UPPERCASE")]
pub enum CaseType {
    Ban,
    Unban,
    Kick,
    Timeout,
    Untimeout,
    Warn,
    Jail,
    Unjail,
}

impl CaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseType::Ban => "BAN",
            CaseType::Unban => "UNBAN",
            CaseType::Kick => "KICK",
            CaseType::Timeout => "TIMEOUT",
            CaseType::Untimeout => "UNTIMEOUT",
            CaseType::Warn => "WARN",
            CaseType::Jail => "JAIL",
            CaseType::Unjail => "UNJAIL",
        }
    }
}

impl std::fmt::Display for CaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An audit record of one moderation action. Rows are append-only.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Case {
    pub id: Uuid,
    pub guild_id: i64,
    /// Per-guild sequence, starting at 1
    pub case_number: i64,
    pub target_id: i64,
    pub moderator_id: i64,
    pub case_type: CaseType,
    pub reason: String,
    /// Roles removed from the target, in the target's original order
    pub target_roles: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

impl Case {
    /// Embed title, e.g. "Case #4 (JAIL) created"
    pub fn title(&self, action: &str) -> String {
        format!("Case #{} ({}) {}", self.case_number, self.case_type, action)
    }
}
