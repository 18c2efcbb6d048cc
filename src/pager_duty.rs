//! PagerDuty on-call lookup.
//!
//! One call to [`OnCallClient::lookup`] asks the schedule's users endpoint
//! who was on call during the hour ending at the reference time and returns
//! the first user's email as `"On-Call SIRT {email}"`.

use crate::config::PagerDutyConfig;
use crate::credentials::{ConfigMissing, CredentialSource};
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use log::{debug, info, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use url::Url;

pub const ACCEPT_HEADER_TYPE: &str = "application/vnd.pagerduty+json;version=2";
pub const RESULT_PREFIX: &str = "On-Call SIRT ";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    ConfigMissing(#[from] ConfigMissing),
    #[error("error making http request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("response status code is not 200. status code: {0}")]
    Status(u16),
    #[error("failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),
    #[error("error parsing json: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LookupError {
    /// Only missing configuration should stop the program; everything else
    /// is reported and the run carries on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LookupError::ConfigMissing(_))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct ScheduleUsers {
    // A `null` entry counts as a user with no email.
    #[serde(default, deserialize_with = "null_as_default")]
    users: Vec<Option<User>>,
}

/// Treat an explicit JSON `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The hour ending at a reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl TimeWindow {
    pub fn ending_at(until: DateTime<Utc>) -> Self {
        Self {
            since: until - Duration::hours(1),
            until,
        }
    }

    pub fn since_param(&self) -> String {
        format_rfc3339(self.since)
    }

    pub fn until_param(&self) -> String {
        format_rfc3339(self.until)
    }
}

/// RFC 3339 with whole seconds and `Z` for UTC, e.g. `2024-11-17T20:34:58Z`.
pub fn format_rfc3339(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub struct OnCallClient<S> {
    http: Client,
    base_url: Url,
    credentials: S,
}

impl<S: CredentialSource> OnCallClient<S> {
    pub fn new(config: &PagerDutyConfig, credentials: S) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid PagerDuty base URL: {}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("PagerDuty base URL cannot carry a path: {}", base_url));
        }
        if config.timeout_secs == 0 {
            return Err(anyhow!("PagerDuty timeout_secs must be greater than zero"));
        }

        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// `{base}/schedules/{schedule_id}/users?since=..&until=..`
    pub fn users_url(&self, schedule_id: &str, window: &TimeWindow) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["schedules", schedule_id, "users"]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("since", &window.since_param())
            .append_pair("until", &window.until_param());
        url
    }

    pub async fn lookup(&self, reference_time: DateTime<Utc>) -> Result<String, LookupError> {
        let credentials = self.credentials.resolve()?;
        let window = TimeWindow::ending_at(reference_time);
        let url = self.users_url(&credentials.schedule_id, &window);
        debug!("Requesting on-call users: {}", url);

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Token token={}", credentials.api_key.expose_secret()))
            .header(ACCEPT, ACCEPT_HEADER_TYPE)
            .send()
            .await
            .map_err(LookupError::Request)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LookupError::Status(status.as_u16()));
        }

        // Consumes the response; the connection is released whether or not
        // the body arrives intact.
        let body = response.bytes().await.map_err(LookupError::BodyRead)?;
        let parsed: ScheduleUsers = serde_json::from_slice(&body)?;

        let email = match parsed.users.into_iter().next() {
            Some(user) => user.unwrap_or_default().email,
            None => {
                warn!("No users on call for schedule {}", credentials.schedule_id);
                String::new()
            }
        };
        info!("On-call lookup for schedule {} succeeded", credentials.schedule_id);

        Ok(format!("{}{}", RESULT_PREFIX, email))
    }
}
