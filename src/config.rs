use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

pub const DEFAULT_HR_API_BASE_URL: &str = "https://hr-desk-backend.onrender.com";
pub const DEFAULT_AFFINDA_API_URL: &str = "https://api.affinda.com/v2/resumes";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub session_secret: String,
    pub hr_api_base_url: String,
    pub affinda_api_key: Option<String>,
    pub affinda_api_url: String,
    pub session_ttl_minutes: i64,
    pub draft_ttl_minutes: i64,
    pub http_timeout_secs: u64,
    pub public_rps: u32,
    pub dashboard_rps: u32,
    pub max_upload_mb: usize,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            session_secret: get_env("SESSION_SECRET")?,
            hr_api_base_url: get_env_or("HR_API_BASE_URL", DEFAULT_HR_API_BASE_URL),
            affinda_api_key: env::var("AFFINDA_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            affinda_api_url: get_env_or("AFFINDA_API_URL", DEFAULT_AFFINDA_API_URL),
            session_ttl_minutes: get_env_parse_or("SESSION_TTL_MINUTES", 480)?,
            draft_ttl_minutes: get_env_parse_or("DRAFT_TTL_MINUTES", 120)?,
            http_timeout_secs: get_env_parse_or("HTTP_TIMEOUT_SECS", 30)?,
            public_rps: get_env_parse_or("PUBLIC_RPS", 20)?,
            dashboard_rps: get_env_parse_or("DASHBOARD_RPS", 50)?,
            max_upload_mb: get_env_parse_or("MAX_UPLOAD_MB", 10)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        _ => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
