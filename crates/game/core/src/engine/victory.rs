use crate::puzzle::{TileKind, WinCondition};
use crate::state::{Faction, GameState, GameStatus};

/// Outcome of the end-of-turn checks, before the turn counter advances.
///
/// Victory needs every win condition to hold; an empty list never wins.
/// Victory is checked first, so a turn that both wins and loses the last
/// character still counts as a win.
pub(crate) fn evaluate(state: &GameState) -> Option<GameStatus> {
    let conditions = &state.puzzle.win_conditions;
    if !conditions.is_empty() && conditions.iter().all(|condition| holds(state, condition)) {
        return Some(GameStatus::Victory);
    }
    if state.living(Faction::Character).next().is_none() {
        return Some(GameStatus::Defeat);
    }
    None
}

fn holds(state: &GameState, condition: &WinCondition) -> bool {
    match condition {
        WinCondition::DefeatAllEnemies => state.living(Faction::Enemy).next().is_none(),
        WinCondition::CollectAll => state.collectibles.iter().all(|item| item.collected),
        WinCondition::ReachGoal => state.living(Faction::Character).any(|(_, character)| {
            state
                .puzzle
                .tile(character.position)
                .is_some_and(|tile| tile.kind == TileKind::Goal)
        }),
        WinCondition::SurviveTurns { turns } => state.current_turn + 1 >= *turns,
    }
}
