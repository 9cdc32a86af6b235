use crate::state::{Cell, Direction, EntityRef, Faction, GameState, Position};

/// Tiles along `direction` up to `range`, stopping before walls and edges.
///
/// Occupied tiles are included; whoever stands there is a potential victim.
pub(crate) fn trace_line(
    state: &GameState,
    from: Position,
    direction: Direction,
    range: u32,
) -> Vec<Position> {
    let mut tiles = Vec::new();
    let mut at = from;
    for _ in 0..range {
        at = at.step(direction);
        match state.cell(at) {
            Cell::Edge | Cell::Wall => break,
            Cell::Occupied(_) | Cell::Free => tiles.push(at),
        }
    }
    tiles
}

/// Existing tiles within `radius` (king-move distance) of `center`.
pub(crate) fn area_tiles(state: &GameState, center: Position, radius: u32) -> Vec<Position> {
    state
        .puzzle
        .tiles()
        .map(|(position, _)| position)
        .filter(|position| position.chebyshev(center) <= radius)
        .collect()
}

/// Closest living member of `faction` within `range`, excluding the caster.
///
/// Ties go to the lower entity index.
pub(crate) fn nearest(
    state: &GameState,
    caster: EntityRef,
    faction: Faction,
    range: u32,
) -> Option<Position> {
    let origin = state.entity(caster)?.position;
    state
        .living(faction)
        .filter(|(entity, _)| *entity != caster)
        .map(|(entity, placed)| (placed.position.chebyshev(origin), entity, placed.position))
        .filter(|(distance, _, _)| *distance <= range)
        .min_by_key(|(distance, entity, _)| (*distance, *entity))
        .map(|(_, _, position)| position)
}
