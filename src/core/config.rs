use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::FixedOffset;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Process-wide configuration loaded once at startup. Credentials are
/// immutable for the process lifetime; every tool handler receives them
/// through the shared Garoon client rather than reading the environment.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// UTC offset applied when expanding `YYYY-MM-DD` dates into
    /// Garoon's `rangeStart`/`rangeEnd` datetimes, e.g. `+09:00`.
    pub tz_offset: String,
    pub timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var("GAROON_BASE_URL").context("Missing env var GAROON_BASE_URL")?;
        let username =
            env::var("GAROON_USERNAME").context("Missing env var GAROON_USERNAME")?;
        let password =
            env::var("GAROON_PASSWORD").context("Missing env var GAROON_PASSWORD")?;

        let tz_offset = env::var("GAROON_TZ_OFFSET").unwrap_or_else(|_| "+00:00".to_string());
        tz_offset
            .parse::<FixedOffset>()
            .with_context(|| format!("Invalid GAROON_TZ_OFFSET '{tz_offset}'"))?;

        let timeout = match env::var("GAROON_TIMEOUT_SECS") {
            Ok(val) => Duration::from_secs(
                val.parse()
                    .with_context(|| format!("Invalid GAROON_TIMEOUT_SECS '{val}'"))?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
            tz_offset,
            timeout,
        })
    }
}
