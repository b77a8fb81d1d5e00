use std::env;

use crate::constants::limits::DEFAULT_DATABASE_MAX_CONNECTIONS;

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub database_url: String,
    /// Register commands in this guild only instead of globally
    pub guild_id: Option<u64>,
    pub database_max_connections: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| "DISCORD_TOKEN environment variable not set")?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable not set")?;

        let guild_id = env::var("GUILD_ID")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS);

        Ok(Self {
            discord_token,
            database_url,
            guild_id,
            database_max_connections,
        })
    }
}
