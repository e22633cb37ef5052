use std::net::IpAddr;

use thiserror::Error;

pub const LOCAL_API_BASE: &str = "http://localhost:8000";
pub const DEPLOYED_API_BASE: &str = "https://email-spam-detection-rdtq.onrender.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
    pub timezone: String,
    pub health: HealthConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host the client believes it runs on; drives base URL selection.
    pub host: String,
    pub base_override: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
    pub data_dir: String,
    pub exports_dir: String,
    pub db_filename: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone)]
pub struct HealthConfig {
    pub poll_cron: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

impl ApiConfig {
    /// Local development endpoint for loopback hosts, the deployed one otherwise.
    pub fn base_url(&self) -> &str {
        if let Some(base) = &self.base_override {
            return base;
        }
        if is_loopback_host(&self.host) {
            LOCAL_API_BASE
        } else {
            DEPLOYED_API_BASE
        }
    }
}

pub fn is_loopback_host(host: &str) -> bool {
    let host = host.trim().trim_start_matches('[').trim_end_matches(']');
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.parse::<IpAddr>()
        .map(|ip| ip.is_loopback())
        .unwrap_or(false)
}
