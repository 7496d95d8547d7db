use anyhow::{Context, Result, bail};
use std::time::Duration;

use crate::username::Username;

pub const DEFAULT_ENDPOINT: &str = "https://leetcode.com/graphql";
pub const DEFAULT_PROFILE_BASE: &str = "https://leetcode.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const ENDPOINT_VAR: &str = "LEETCODE_GRAPHQL_URL";
const PROFILE_BASE_VAR: &str = "LEETCODE_PROFILE_URL";
const TIMEOUT_VAR: &str = "LEETCODE_TIMEOUT_SECS";

/// Where and how to reach the LeetCode GraphQL API.
#[derive(Debug, Clone)]
pub struct Config {
    /// GraphQL endpoint the profile query is POSTed to.
    pub endpoint: String,
    /// Base of the public profile URL; the referer is `<base>/<username>/`.
    pub profile_base: String,
    /// Upper bound for the whole request, connect included.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            profile_base: DEFAULT_PROFILE_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Defaults overridden by `LEETCODE_GRAPHQL_URL`, `LEETCODE_PROFILE_URL`
    /// and `LEETCODE_TIMEOUT_SECS` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            config.endpoint = endpoint;
        }
        if let Some(base) = lookup(PROFILE_BASE_VAR) {
            config.profile_base = base;
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{TIMEOUT_VAR} must be a whole number of seconds, got {raw:?}"))?;
            config
                .set_timeout_secs(secs)
                .with_context(|| format!("Invalid {TIMEOUT_VAR}"))?;
        }

        Ok(config)
    }

    /// A zero timeout would fail every request at once, so it is refused.
    pub fn set_timeout_secs(&mut self, secs: u64) -> Result<()> {
        if secs == 0 {
            bail!("timeout must be at least one second");
        }
        self.timeout = Duration::from_secs(secs);
        Ok(())
    }

    /// Referer header LeetCode expects for a profile query.
    pub fn referer_for(&self, username: &Username) -> String {
        format!("{}/{}/", self.profile_base.trim_end_matches('/'), username)
    }
}
