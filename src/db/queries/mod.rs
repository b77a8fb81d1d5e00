pub mod case;
pub mod guild_config;
