//! One-line result strings for sharing a finished run.
use puzzle_core::{PuzzleScore, RankTier};

pub fn rank_emoji(rank: RankTier) -> &'static str {
    match rank {
        RankTier::Gold => "🥇",
        RankTier::Silver => "🥈",
        RankTier::Bronze => "🥉",
    }
}

fn plural(count: u32, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// `🥇 Gold | First Blood | 1 character, 2 turns | 1450 pts`
pub fn format_share_line(puzzle_name: &str, score: &PuzzleScore) -> String {
    format!(
        "{} {} | {} | {}, {} | {} pts",
        rank_emoji(score.rank),
        score.rank,
        puzzle_name,
        plural(score.stats.characters_used, "character"),
        plural(score.stats.turns_used, "turn"),
        score.total_points
    )
}
