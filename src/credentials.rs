//! PagerDuty credential resolution.
//!
//! The lookup client never reads the environment itself: it is handed a
//! [`CredentialSource`] so tests can swap in fixed values.

use log::debug;
use secrecy::SecretString;
use std::env;
use thiserror::Error;

pub const API_KEY_ENV_VAR: &str = "PAGER_DUTY_API_KEY";
pub const SCHEDULE_ENV_VAR: &str = "PAGER_DUTY_SCHEDULE";

/// A required setting is absent. The process cannot do anything useful
/// without it, so callers treat this as fatal.
#[derive(Debug, Error)]
#[error("{label} env not set ({var})")]
pub struct ConfigMissing {
    pub label: &'static str,
    pub var: String,
}

/// API key and schedule id used for one lookup.
#[derive(Debug)]
pub struct Credentials {
    pub api_key: SecretString,
    pub schedule_id: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, schedule_id: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            schedule_id: schedule_id.into(),
        }
    }
}

pub trait CredentialSource: Send + Sync {
    fn resolve(&self) -> Result<Credentials, ConfigMissing>;
}

/// Reads credentials from process environment variables.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    api_key_var: String,
    schedule_var: String,
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::with_vars(API_KEY_ENV_VAR, SCHEDULE_ENV_VAR)
    }
}

impl EnvCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read from differently named variables.
    pub fn with_vars(api_key_var: impl Into<String>, schedule_var: impl Into<String>) -> Self {
        Self {
            api_key_var: api_key_var.into(),
            schedule_var: schedule_var.into(),
        }
    }
}

impl CredentialSource for EnvCredentials {
    fn resolve(&self) -> Result<Credentials, ConfigMissing> {
        let api_key = required_var(&self.api_key_var, "API key")?;
        let schedule_id = required_var(&self.schedule_var, "Schedule")?;
        debug!("Resolved PagerDuty schedule {} from {}", schedule_id, self.schedule_var);
        Ok(Credentials {
            api_key: SecretString::from(api_key),
            schedule_id,
        })
    }
}

fn required_var(var: &str, label: &'static str) -> Result<String, ConfigMissing> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigMissing {
            label,
            var: var.to_string(),
        }),
    }
}
