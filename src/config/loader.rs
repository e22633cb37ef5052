use std::env;

use chrono_tz::Tz;

use super::env::{
    ApiConfig, AppConfig, ConfigError, DirectoryConfig, HealthConfig, LoggingConfig,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api = ApiConfig {
            host: env_or("SPAM_API_HOST", "localhost"),
            base_override: env::var("SPAM_API_BASE")
                .ok()
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty()),
        };

        let directories = DirectoryConfig {
            logs_dir: env_or("LOGS_DIR", "logs"),
            data_dir: env_or("DATA_DIR", "data"),
            exports_dir: env_or("EXPORTS_DIR", "exports"),
            db_filename: env_or("DB_FILENAME", "spam_scan.db"),
        };

        let logging = LoggingConfig {
            level: env_or("LOG_LEVEL", "info"),
        };

        let timezone = env_or("DISPLAY_TIMEZONE", "UTC");
        if timezone.parse::<Tz>().is_err() {
            return Err(ConfigError::Invalid {
                key: "DISPLAY_TIMEZONE",
                value: timezone,
            });
        }

        let health = HealthConfig {
            poll_cron: env_or("HEALTH_POLL_CRON", "0/30 * * * * *"),
        };

        Ok(Self {
            api,
            directories,
            logging,
            timezone,
            health,
        })
    }

    pub fn display_tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(chrono_tz::UTC)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
