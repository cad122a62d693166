use crate::errors::{JournalError, JournalResult};
use chrono_tz::Tz;
use std::path::PathBuf;

const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    /// Calendar basis for month filtering and day grouping
    pub timezone: Tz,
    /// Overrides the built-in fixture when set
    pub fixtures_path: Option<PathBuf>,
    pub mentor_share_id: String,
    pub current_user: String,
}

impl AppConfig {
    pub fn from_env() -> JournalResult<Self> {
        dotenvy::dotenv().ok();

        let server_port = env_var_or("SERVER_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| JournalError::Config(format!("SERVER_PORT: {e}")))?;

        let timezone = env_var_or("JOURNAL_TIMEZONE", DEFAULT_TIMEZONE)
            .parse::<Tz>()
            .map_err(|e| JournalError::Config(format!("JOURNAL_TIMEZONE: {e}")))?;

        Ok(Self {
            server_port,
            timezone,
            fixtures_path: env_var_opt("JOURNAL_FIXTURES").map(PathBuf::from),
            mentor_share_id: env_var_opt("MENTOR_SHARE_ID")
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            current_user: env_var_or("CURRENT_USER", "demo"),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 3001,
            timezone: chrono_tz::America::Sao_Paulo,
            fixtures_path: None,
            mentor_share_id: uuid::Uuid::new_v4().to_string(),
            current_user: "demo".into(),
        }
    }
}

fn env_var_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
