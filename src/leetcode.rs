use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use reqwest::header::{CONTENT_TYPE, REFERER};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{FetchFailure, StatsError};
use crate::stats::{ALL_DIFFICULTIES, DifficultyCount, ProfileStats};
use crate::username::Username;

const OPERATION_NAME: &str = "getUserProfile";

const PROFILE_QUERY: &str = r#"
    query getUserProfile($username: String!) {
      matchedUser(username: $username) {
        submitStatsGlobal {
          acSubmissionNum {
            difficulty
            count
          }
        }
        profile {
          ranking
        }
      }
    }
"#;

#[derive(Deserialize)]
struct ProfileResponse {
    data: Option<ProfileData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Deserialize)]
struct ProfileData {
    #[serde(rename = "matchedUser")]
    matched_user: Option<MatchedUser>,
}

#[derive(Deserialize)]
struct MatchedUser {
    #[serde(rename = "submitStatsGlobal")]
    submit_stats_global: Option<SubmitStats>,
    profile: Option<Profile>,
}

#[derive(Deserialize)]
struct SubmitStats {
    #[serde(rename = "acSubmissionNum")]
    ac_submission_num: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct Profile {
    #[serde(default)]
    ranking: Option<u64>,
}

/// Client for the public LeetCode GraphQL API.
#[derive(Clone)]
pub struct LeetCodeClient {
    config: Arc<Config>,
    http: Arc<Client>,
}

impl LeetCodeClient {
    /// Build a client; the configured timeout bounds every request.
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            config: Arc::new(config),
            http: Arc::new(http),
        })
    }

    /// Solved counts and global rank for `username`.
    ///
    /// Exactly one request is made. Any failure (transport, HTTP status,
    /// unknown user, unexpected response shape) is logged and reported as the
    /// same [`FetchFailure`].
    pub async fn fetch(&self, username: &Username) -> Result<ProfileStats, FetchFailure> {
        match self.try_fetch(username).await {
            Ok(stats) => {
                debug!(
                    %username,
                    total_solved = stats.total_solved(),
                    ranking = ?stats.ranking(),
                    "fetched profile stats"
                );
                Ok(stats)
            }
            Err(e) => {
                warn!(%username, error = %e, "could not fetch profile stats");
                Err(e.into())
            }
        }
    }

    async fn try_fetch(&self, username: &Username) -> Result<ProfileStats, StatsError> {
        let body = self.graphql(username).await?;
        parse_profile(username, &body)
    }

    /// POST the profile query and return the raw body of a 200 response.
    async fn graphql(&self, username: &Username) -> Result<String, StatsError> {
        let payload = serde_json::json!({
            "operationName": OPERATION_NAME,
            "variables": { "username": username.as_str() },
            "query": PROFILE_QUERY,
        });

        debug!(endpoint = %self.config.endpoint, %username, "sending profile query");

        let resp = self
            .http
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(REFERER, self.config.referer_for(username))
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(StatsError::Status(status));
        }

        Ok(resp.text().await?)
    }
}

/// Walk `data.matchedUser` down to the submission counts and ranking.
fn parse_profile(username: &Username, body: &str) -> Result<ProfileStats, StatsError> {
    let parsed: ProfileResponse = serde_json::from_str(body)?;

    let data = parsed.data.ok_or(StatsError::MissingField("data"))?;

    let user = data
        .matched_user
        .ok_or_else(|| StatsError::UserNotFound {
            username: username.to_string(),
            errors: parsed.errors.into_iter().map(|e| e.message).collect(),
        })?;

    let submissions = user
        .submit_stats_global
        .ok_or(StatsError::MissingField("submitStatsGlobal"))?
        .ac_submission_num
        .ok_or(StatsError::MissingField("acSubmissionNum"))?;

    let ranking = user
        .profile
        .ok_or(StatsError::MissingField("profile"))?
        .ranking;

    let mut entries = Vec::with_capacity(submissions.len());
    for (index, entry) in submissions.iter().enumerate() {
        if let Some(count) = difficulty_count(index, entry)? {
            entries.push(count);
        }
    }

    Ok(ProfileStats::from_submissions(
        username.as_str(),
        entries,
        ranking,
    ))
}

/// `None` for the aggregate entry, whose count is never read.
fn difficulty_count(index: usize, entry: &Value) -> Result<Option<DifficultyCount>, StatsError> {
    let difficulty = entry
        .get("difficulty")
        .and_then(Value::as_str)
        .ok_or(StatsError::InvalidEntry {
            index,
            reason: "difficulty is not a string",
        })?;

    if difficulty == ALL_DIFFICULTIES {
        return Ok(None);
    }

    let count = entry
        .get("count")
        .and_then(Value::as_u64)
        .ok_or(StatsError::InvalidEntry {
            index,
            reason: "count is not a non-negative integer",
        })?;

    Ok(Some(DifficultyCount::new(difficulty, count)))
}
