mod case;
mod guild_config;

pub use case::{Case, CaseType};
pub use guild_config::{GuildConfig, PermissionLevelRole};
