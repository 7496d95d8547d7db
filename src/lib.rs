pub mod config;
pub mod error;
pub mod leetcode;
pub mod logger;
pub mod report;
pub mod stats;
pub mod svg;
pub mod username;

pub use config::Config;
pub use error::{FetchFailure, StatsError};
pub use leetcode::LeetCodeClient;
pub use stats::{DifficultyCount, ProfileStats};
pub use username::Username;
