use super::{Puzzle, TileKind};
use crate::env::DefinitionRepository;
use crate::state::Position;

/// Tiles a character may start on, in row-major scan order.
///
/// Excludes holes, walls (authored or through a custom type), tiles whose
/// custom type forbids placement, starting tiles of non-dormant enemies and
/// tiles covered by placement-blocking collectibles or objects.
pub fn valid_placement_tiles<R>(puzzle: &Puzzle, repo: &R) -> Vec<Position>
where
    R: DefinitionRepository + ?Sized,
{
    puzzle
        .tiles()
        .map(|(position, _)| position)
        .filter(|&position| is_valid_placement(puzzle, repo, position))
        .collect()
}

pub fn is_valid_placement<R>(puzzle: &Puzzle, repo: &R, position: Position) -> bool
where
    R: DefinitionRepository + ?Sized,
{
    let Some(tile) = puzzle.tile(position) else {
        return false;
    };
    if tile.kind == TileKind::Wall && tile.starts_enabled {
        return false;
    }
    if let Some(def) = tile.custom_type.as_deref().and_then(|id| repo.tile_type(id))
        && (def.blocks_movement || def.prevents_placement)
    {
        return false;
    }
    if puzzle
        .enemies
        .iter()
        .any(|enemy| !enemy.dormant && enemy.position == position)
    {
        return false;
    }
    let collectible_blocks = puzzle.collectibles.iter().any(|placement| {
        placement.position == position
            && repo
                .collectible(&placement.collectible_id)
                .is_some_and(|def| def.prevents_placement)
    });
    let object_blocks = puzzle.objects.iter().any(|placement| {
        placement.position == position
            && repo
                .object(&placement.object_id)
                .is_some_and(|def| def.blocks_movement || def.prevents_placement)
    });
    !collectible_blocks && !object_blocks
}
