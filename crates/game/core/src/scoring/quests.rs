use crate::puzzle::{SideQuest, SideQuestKind};
use crate::state::GameState;

/// Whether `quest` was completed by the run captured in `state`.
///
/// Custom quests are judged outside the engine and never complete here.
pub fn side_quest_completed(state: &GameState, quest: &SideQuest) -> bool {
    let used = |id: &str| {
        state
            .characters
            .iter()
            .any(|character| character.definition_id == id)
    };

    match &quest.kind {
        SideQuestKind::CollectAll => state.collectibles.iter().all(|item| item.collected),
        SideQuestKind::NoDamageTaken => state.stats.damage_taken == 0,
        SideQuestKind::UseCharacter { character_id } => used(character_id.as_str()),
        SideQuestKind::AvoidCharacter { character_id } => !used(character_id.as_str()),
        SideQuestKind::SpeedRun { max_turns } => state.current_turn <= *max_turns,
        SideQuestKind::Minimalist { max_characters } => state.characters_used() <= *max_characters,
        SideQuestKind::NoDeaths => state.stats.character_deaths == 0,
        SideQuestKind::Custom { .. } => false,
    }
}
