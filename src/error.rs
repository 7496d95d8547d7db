use thiserror::Error;

/// Why a lookup failed. Only logged; callers see [`FetchFailure`].
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("request to LeetCode failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LeetCode returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("response is not the expected JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("no matched user for {username}{}", graphql_detail(.errors))]
    UserNotFound {
        username: String,
        errors: Vec<String>,
    },

    #[error("response is missing `{0}`")]
    MissingField(&'static str),

    #[error("malformed acSubmissionNum entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: &'static str },
}

fn graphql_detail(errors: &[String]) -> String {
    if errors.is_empty() {
        String::new()
    } else {
        format!(" ({})", errors.join("; "))
    }
}

/// No usable statistics could be obtained, for whatever reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("could not retrieve profile statistics")]
pub struct FetchFailure;

impl From<StatsError> for FetchFailure {
    fn from(_: StatsError) -> Self {
        FetchFailure
    }
}
