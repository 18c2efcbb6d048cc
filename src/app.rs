use crate::config::Config;
use crate::credentials::{CredentialSource, EnvCredentials};
use crate::pager_duty::{LookupError, OnCallClient};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::io::Write;

pub struct Application<S> {
    config: Config,
    client: OnCallClient<S>,
}

impl Application<EnvCredentials> {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_credentials(config, EnvCredentials::new())
    }
}

impl<S: CredentialSource> Application<S> {
    pub fn with_credentials(config: Config, credentials: S) -> Result<Self> {
        let client = OnCallClient::new(&config.pager_duty, credentials)?;
        Ok(Self { config, client })
    }

    /// Write the region clocks followed by the on-call line.
    ///
    /// A failed lookup is written out like a result. Missing credentials are
    /// returned as an error after the clocks have been written.
    pub async fn run(&self, now: DateTime<Utc>, out: &mut impl Write) -> Result<()> {
        for region in &self.config.regions {
            writeln!(out, "{}", region.render(now)).context("Failed to write region time")?;
        }

        let line = match self.client.lookup(now).await {
            Ok(on_call) => on_call,
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                log::debug!("On-call lookup failed: {:?}", e);
                e.to_string()
            }
        };
        writeln!(out, "{}", line).context("Failed to write on-call result")?;

        Ok(())
    }
}

/// Did `run` stop because of missing credentials?
pub fn is_config_missing(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<LookupError>(), Some(LookupError::ConfigMissing(_)))
}
