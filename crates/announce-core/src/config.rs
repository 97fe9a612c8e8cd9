/// Application configuration loaded from environment variables
use crate::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_DATABASE_URL, DEFAULT_EMAIL_FROM, DEFAULT_MAX_UPLOAD_BYTES,
    DEFAULT_MEDIA_ROOT,
};
use crate::error::AnnounceError;
use crate::routing::RecipientPolicy;
use crate::utils::validation::is_valid_email;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Which transport delivers notifications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailBackend {
    #[default]
    Log,
    Ses,
}

impl FromStr for EmailBackend {
    type Err = AnnounceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" => Ok(Self::Log),
            "ses" => Ok(Self::Ses),
            other => Err(AnnounceError::Config(format!(
                "Unknown email backend: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub media_root: PathBuf,
    pub email_from: String,
    pub email_backend: EmailBackend,
    pub recipient_policy: RecipientPolicy,
    pub max_upload_bytes: usize,
    pub admin_api: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            media_root: PathBuf::from(DEFAULT_MEDIA_ROOT),
            email_from: DEFAULT_EMAIL_FROM.to_string(),
            email_backend: EmailBackend::default(),
            recipient_policy: RecipientPolicy::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            admin_api: false,
        }
    }
}

impl AppConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, AnnounceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup; unset or blank keys use defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AnnounceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                AnnounceError::Config(format!("Invalid MAX_UPLOAD_BYTES '{}': {}", raw, e))
            })?,
            None => defaults.max_upload_bytes,
        };

        let admin_api = match get("ADMIN_API_ENABLED") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                AnnounceError::Config(format!("Invalid ADMIN_API_ENABLED '{}'", raw))
            })?,
            None => defaults.admin_api,
        };

        let config = Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            media_root: get("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.media_root),
            email_from: get("EMAIL_FROM")
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.email_from),
            email_backend: get("EMAIL_BACKEND")
                .map(|v| v.parse::<EmailBackend>())
                .transpose()?
                .unwrap_or_default(),
            recipient_policy: get("RECIPIENT_POLICY")
                .map(|v| v.parse::<RecipientPolicy>())
                .transpose()?
                .unwrap_or_default(),
            max_upload_bytes,
            admin_api,
        };

        config.validate()?;

        tracing::info!(
            backend = ?config.email_backend,
            policy = %config.recipient_policy,
            admin_api = config.admin_api,
            "Configuration validated successfully"
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnnounceError> {
        if !is_valid_email(&self.email_from) {
            return Err(AnnounceError::Config(format!(
                "EMAIL_FROM is not a valid address: {}",
                self.email_from
            )));
        }

        if self.max_upload_bytes == 0 {
            return Err(AnnounceError::Config(
                "MAX_UPLOAD_BYTES must be > 0".to_string(),
            ));
        }

        if self.bind_addr.trim().is_empty() {
            return Err(AnnounceError::Config("BIND_ADDR is empty".to_string()));
        }

        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
