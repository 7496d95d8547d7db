use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Difficulty label upstream uses for the all-difficulties aggregate.
pub const ALL_DIFFICULTIES: &str = "All";

/// Accepted submissions for one difficulty label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyCount {
    pub difficulty: String,
    pub count: u64,
}

impl DifficultyCount {
    pub fn new(difficulty: impl Into<String>, count: u64) -> Self {
        Self {
            difficulty: difficulty.into(),
            count,
        }
    }
}

/// Normalized statistics for one user.
///
/// `total_solved` is always the sum of `counts_by_difficulty`; the fields are
/// private so the two cannot drift apart.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileStats {
    username: String,
    #[serde(serialize_with = "serialize_counts")]
    counts_by_difficulty: Vec<DifficultyCount>,
    total_solved: u64,
    ranking: Option<u64>,
}

impl ProfileStats {
    /// Folds upstream `(difficulty, count)` entries into per-difficulty counts.
    ///
    /// The `"All"` aggregate is skipped. A label seen twice keeps the later
    /// count, in the position where it first appeared.
    pub fn from_submissions<I>(username: impl Into<String>, entries: I, ranking: Option<u64>) -> Self
    where
        I: IntoIterator<Item = DifficultyCount>,
    {
        let counts = entries
            .into_iter()
            .filter(|entry| entry.difficulty != ALL_DIFFICULTIES)
            .fold(Vec::<DifficultyCount>::new(), |mut acc, entry| {
                match acc.iter_mut().find(|c| c.difficulty == entry.difficulty) {
                    Some(existing) => existing.count = entry.count,
                    None => acc.push(entry),
                }
                acc
            });

        let total_solved = counts
            .iter()
            .fold(0u64, |sum, c| sum.saturating_add(c.count));

        Self {
            username: username.into(),
            counts_by_difficulty: counts,
            total_solved,
            ranking,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Per-difficulty counts in the order upstream listed them.
    pub fn counts(&self) -> &[DifficultyCount] {
        &self.counts_by_difficulty
    }

    pub fn count(&self, difficulty: &str) -> Option<u64> {
        self.counts_by_difficulty
            .iter()
            .find(|c| c.difficulty == difficulty)
            .map(|c| c.count)
    }

    pub fn total_solved(&self) -> u64 {
        self.total_solved
    }

    pub fn ranking(&self) -> Option<u64> {
        self.ranking
    }
}

// Counts behave as a map: order does not take part in equality.
impl PartialEq for ProfileStats {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
            && self.total_solved == other.total_solved
            && self.ranking == other.ranking
            && self.counts_by_difficulty.len() == other.counts_by_difficulty.len()
            && self
                .counts_by_difficulty
                .iter()
                .all(|c| other.count(&c.difficulty) == Some(c.count))
    }
}

impl Eq for ProfileStats {}

fn serialize_counts<S>(counts: &[DifficultyCount], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(counts.len()))?;
    for c in counts {
        map.serialize_entry(&c.difficulty, &c.count)?;
    }
    map.end()
}
