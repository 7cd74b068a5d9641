//! Environment driven configuration
//!
//! wit has no config file. The few knobs it exposes are read from the
//! environment once per invocation:
//!
//! - `WIT_COMMIT_DATE`: fixed commit date, `%Y-%m-%d %H:%M:%S %z` or RFC 2822
//! - `WIT_LOG`: tracing filter directive for the binary (see `main.rs`)

use anyhow::Context;
use chrono::{DateTime, FixedOffset};
use derive_new::new;

pub const COMMIT_DATE_ENV: &str = "WIT_COMMIT_DATE";
pub const LOG_ENV: &str = "WIT_LOG";

const COMMIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct Config {
    commit_date: Option<DateTime<FixedOffset>>,
}

impl Config {
    pub fn load_from_env() -> anyhow::Result<Self> {
        let commit_date = match std::env::var(COMMIT_DATE_ENV) {
            Ok(date_str) => Some(
                Self::parse_date(&date_str)
                    .with_context(|| format!("{COMMIT_DATE_ENV} is not a valid date"))?,
            ),
            Err(_) => None,
        };

        Ok(Config { commit_date })
    }

    fn parse_date(date_str: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc2822(date_str)
            .or_else(|_| DateTime::parse_from_str(date_str, COMMIT_DATE_FORMAT))
            .with_context(|| format!("unable to parse date {date_str:?}"))
    }

    /// The timestamp to stamp on the next commit
    pub fn commit_date(&self) -> DateTime<FixedOffset> {
        self.commit_date
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }
}
