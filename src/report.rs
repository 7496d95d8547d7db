//! Terminal rendering of a [`ProfileStats`].

use crate::stats::ProfileStats;

/// Shown whenever a lookup fails, whatever the cause.
pub const FAILURE_NOTICE: &str = "Could not retrieve data. Please check the username.";

const BAR_WIDTH: usize = 30;

/// `#12,345`, or `N/A` when upstream has no (or a zero) ranking.
pub fn format_rank(ranking: Option<u64>) -> String {
    match ranking {
        Some(rank) if rank > 0 => format!("#{}", group_thousands(rank)),
        _ => "N/A".to_string(),
    }
}

pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Percentage of `total` that `count` represents; 0 when `total` is 0.
pub fn share(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

/// Metrics, a proportion chart and the per-difficulty breakdown.
pub fn render(stats: &ProfileStats) -> String {
    let total = stats.total_solved();
    let label_width = stats
        .counts()
        .iter()
        .map(|c| c.difficulty.len())
        .max()
        .unwrap_or(0);

    let mut out = format!("Stats found for {}\n\n", stats.username());
    out.push_str(&format!("  Total Solved: {}\n", group_thousands(total)));
    out.push_str(&format!("  Global Rank:  {}\n\n", format_rank(stats.ranking())));

    out.push_str("Problems by Difficulty\n");
    for c in stats.counts() {
        let pct = share(c.count, total);
        let filled = (((pct / 100.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        out.push_str(&format!(
            "  {:<label_width$}  {}{}  {:>5.1}%\n",
            c.difficulty,
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
            pct,
        ));
    }

    out.push_str("\nBreakdown\n");
    for c in stats.counts() {
        out.push_str(&format!("  {}: {}\n", c.difficulty, c.count));
    }

    out
}
