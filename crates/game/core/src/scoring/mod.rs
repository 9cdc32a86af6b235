//! Par-based scoring of finished runs.
//!
//! [`calculate_score`] is a pure function of the final state and the lives
//! counters kept by the caller; it never mutates anything.
mod quests;

pub use quests::side_quest_completed;

use crate::state::{GameState, RunStats};

pub const BASE_POINTS: i64 = 1000;
pub const CHAR_BONUS_PER_UNDER_PAR: i64 = 200;
pub const CHAR_PENALTY_PER_OVER_PAR: i64 = 100;
pub const TURN_BONUS_PER_UNDER_PAR: i64 = 50;
pub const TURN_PENALTY_PER_OVER_PAR: i64 = 25;
pub const LIFE_BONUS: i64 = 100;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "title_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RankTier {
    Bronze,
    Silver,
    Gold,
}

/// Signed contribution of each scoring source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBreakdown {
    pub base: i64,
    pub characters: i64,
    pub turns: i64,
    pub lives: i64,
    pub side_quests: i64,
}

impl ScoreBreakdown {
    pub fn sum(&self) -> i64 {
        self.base + self.characters + self.turns + self.lives + self.side_quests
    }
}

/// Which par targets the run met. A missing par counts as met.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParMet {
    pub characters: bool,
    pub turns: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreStats {
    pub characters_used: u32,
    pub turns_used: u32,
    pub lives_remaining: u32,
    pub run: RunStats,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PuzzleScore {
    pub rank: RankTier,
    /// Sum of the breakdown, floored at zero.
    pub total_points: u32,
    pub breakdown: ScoreBreakdown,
    pub completed_side_quests: Vec<String>,
    pub par_met: ParMet,
    pub stats: ScoreStats,
}

/// Scores a finished run.
///
/// Gold needs both pars met and no lives lost; silver needs both pars met
/// with lives lost, or exactly one par met; anything else is bronze.
pub fn calculate_score(state: &GameState, lives_remaining: u32, lives_total: u32) -> PuzzleScore {
    let par = state.puzzle.par;
    let characters_used = state.characters_used();
    let turns_used = state.current_turn;

    let characters = par_delta(
        characters_used,
        par.characters,
        CHAR_BONUS_PER_UNDER_PAR,
        CHAR_PENALTY_PER_OVER_PAR,
    );
    let turns = par_delta(
        turns_used,
        par.turns,
        TURN_BONUS_PER_UNDER_PAR,
        TURN_PENALTY_PER_OVER_PAR,
    );

    let mut completed_side_quests = Vec::new();
    let mut side_quests = 0;
    for quest in &state.puzzle.side_quests {
        if side_quest_completed(state, quest) {
            side_quests += i64::from(quest.bonus_points);
            completed_side_quests.push(quest.id.clone());
        }
    }

    let breakdown = ScoreBreakdown {
        base: BASE_POINTS,
        characters,
        turns,
        lives: LIFE_BONUS * i64::from(lives_remaining),
        side_quests,
    };

    let par_met = ParMet {
        characters: par.characters.is_none_or(|target| characters_used <= target),
        turns: par.turns.is_none_or(|target| turns_used <= target),
    };
    let lives_lost = lives_remaining < lives_total;
    let rank = match (par_met.characters, par_met.turns) {
        (true, true) if !lives_lost => RankTier::Gold,
        (true, true) | (true, false) | (false, true) => RankTier::Silver,
        (false, false) => RankTier::Bronze,
    };

    PuzzleScore {
        rank,
        total_points: u32::try_from(breakdown.sum().max(0)).unwrap_or(u32::MAX),
        breakdown,
        completed_side_quests,
        par_met,
        stats: ScoreStats {
            characters_used,
            turns_used,
            lives_remaining,
            run: state.stats,
        },
    }
}

fn par_delta(used: u32, par: Option<u32>, bonus: i64, penalty: i64) -> i64 {
    let Some(par) = par else {
        return 0;
    };
    let diff = i64::from(par) - i64::from(used);
    if diff >= 0 { diff * bonus } else { diff * penalty }
}
