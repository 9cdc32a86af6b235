use super::Condition;
use super::targeting::trace_line;
use crate::state::{Cell, EntityRef, GameState};

/// Evaluates `condition` from `actor`'s point of view.
///
/// Hostile means the opposing faction. Missing actors never satisfy anything.
pub fn evaluate_condition(state: &GameState, actor: EntityRef, condition: Condition) -> bool {
    let Some(entity) = state.entity(actor) else {
        return false;
    };
    let hostile = actor.faction.opponent();

    match condition {
        Condition::EnemyAdjacent => state
            .living(hostile)
            .any(|(_, other)| other.position.chebyshev(entity.position) == 1),
        Condition::WallAhead => matches!(
            state.cell(entity.position.step(entity.facing)),
            Cell::Edge | Cell::Wall
        ),
        Condition::HealthBelowHalf => entity.health * 2 < entity.max_health,
        Condition::EnemyInLine { range } => trace_line(state, entity.position, entity.facing, range)
            .into_iter()
            .any(|tile| state.living(hostile).any(|(_, other)| other.position == tile)),
    }
}
