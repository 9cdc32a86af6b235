//! Puzzle loader.
//!
//! RON puzzles use an authoring layout: the grid is drawn as rows of glyphs
//! and only tiles with behaviors need explicit entries. JSON puzzles are the
//! canonical [`Puzzle`] serialization, as written by export tooling.
//!
//! Layout glyphs:
//!
//! ```text
//! .  empty      #  wall      G  goal
//! T  teleport   _  hole (also space, and the padding of short rows)
//! ```

use std::path::Path;

use puzzle_core::{
    CollectiblePlacement, EnemyPlacement, ObjectPlacement, ParTargets, Position, Puzzle,
    SideQuest, Tile, TileKind, WinCondition,
};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Puzzle structure for RON files.
#[derive(Debug, Deserialize)]
struct PuzzleRon {
    id: String,
    #[serde(default)]
    name: String,
    layout: Vec<String>,
    #[serde(default)]
    tiles: Vec<TileOverride>,
    #[serde(default)]
    enemies: Vec<EnemyPlacement>,
    #[serde(default)]
    collectibles: Vec<CollectiblePlacement>,
    #[serde(default)]
    objects: Vec<ObjectPlacement>,
    win_conditions: Vec<WinCondition>,
    available_characters: Vec<String>,
    max_characters: u32,
    #[serde(default)]
    max_turns: Option<u32>,
    #[serde(default)]
    par: ParTargets,
    #[serde(default)]
    side_quests: Vec<SideQuest>,
}

/// Full tile description replacing the layout glyph at `at`.
#[derive(Debug, Deserialize)]
struct TileOverride {
    at: Position,
    tile: Tile,
}

/// Loader for puzzles; the format follows the file extension.
pub struct PuzzleLoader;

impl PuzzleLoader {
    pub fn load(path: &Path) -> LoadResult<Puzzle> {
        let content = read_file(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let puzzle = match extension.as_deref() {
            Some("ron") => Self::from_ron_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => anyhow::bail!(
                "Unsupported puzzle format {} (expected .ron or .json)",
                path.display()
            ),
        };
        puzzle.map_err(|e| anyhow::anyhow!("Invalid puzzle {}: {}", path.display(), e))
    }

    pub fn from_json_str(content: &str) -> LoadResult<Puzzle> {
        let puzzle: Puzzle = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse puzzle JSON: {}", e))?;
        check_grid(&puzzle)?;
        Ok(puzzle)
    }

    pub fn from_ron_str(content: &str) -> LoadResult<Puzzle> {
        let data: PuzzleRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse puzzle RON: {}", e))?;

        let height = data.layout.len();
        let width = data
            .layout
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0);
        if width == 0 {
            anyhow::bail!("puzzle '{}' has an empty layout", data.id);
        }

        let mut tiles = Vec::with_capacity(height);
        for (y, row) in data.layout.iter().enumerate() {
            let mut cells: Vec<Option<Tile>> = Vec::with_capacity(width);
            for (x, glyph) in row.chars().enumerate() {
                let cell = match glyph {
                    '.' => Some(Tile::empty()),
                    '#' => Some(Tile::wall()),
                    'G' => Some(Tile::goal()),
                    'T' => Some(Tile::new(TileKind::Teleport)),
                    '_' | ' ' => None,
                    other => anyhow::bail!("unknown layout glyph '{}' at ({}, {})", other, x, y),
                };
                cells.push(cell);
            }
            cells.resize(width, None);
            tiles.push(cells);
        }

        for TileOverride { at, tile } in data.tiles {
            let (Ok(x), Ok(y)) = (usize::try_from(at.x), usize::try_from(at.y)) else {
                anyhow::bail!("tile override at {} is outside the layout", at);
            };
            match tiles.get_mut(y).and_then(|row| row.get_mut(x)) {
                Some(cell) => *cell = Some(tile),
                None => anyhow::bail!("tile override at {} is outside the layout", at),
            }
        }

        let puzzle = Puzzle {
            name: if data.name.is_empty() {
                data.id.clone()
            } else {
                data.name
            },
            id: data.id,
            width: width as u32,
            height: height as u32,
            tiles,
            enemies: data.enemies,
            collectibles: data.collectibles,
            objects: data.objects,
            win_conditions: data.win_conditions,
            available_characters: data.available_characters,
            max_characters: data.max_characters,
            max_turns: data.max_turns,
            par: data.par,
            side_quests: data.side_quests,
        };
        check_grid(&puzzle)?;
        Ok(puzzle)
    }
}

/// Rejects grids whose shape disagrees with the declared dimensions, and
/// placements that fall outside the grid.
fn check_grid(puzzle: &Puzzle) -> LoadResult<()> {
    if puzzle.tiles.len() != puzzle.height as usize
        || puzzle
            .tiles
            .iter()
            .any(|row| row.len() != puzzle.width as usize)
    {
        anyhow::bail!(
            "puzzle '{}' grid does not match {}x{}",
            puzzle.id,
            puzzle.width,
            puzzle.height
        );
    }
    let placements = puzzle
        .enemies
        .iter()
        .map(|enemy| enemy.position)
        .chain(puzzle.collectibles.iter().map(|item| item.position))
        .chain(puzzle.objects.iter().map(|object| object.position));
    for position in placements {
        if !puzzle.contains(position) {
            anyhow::bail!("placement at {} is not on the grid", position);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle_core::{Direction, TileBehavior};

    const ARENA: &str = r#"(
        id: "arena",
        layout: [
            "..#G",
            ".T_",
        ],
        tiles: [
            (at: (x: 0, y: 1), tile: (behaviors: [Ice])),
        ],
        enemies: [
            (enemy_id: "slime", position: (x: 1, y: 0), facing: West),
        ],
        win_conditions: [DefeatAllEnemies, ReachGoal],
        available_characters: ["knight"],
        max_characters: 1,
        par: (characters: Some(1), turns: Some(4)),
    )"#;

    #[test]
    fn layout_glyphs_become_tiles() {
        let puzzle = PuzzleLoader::from_ron_str(ARENA).expect("arena parses");

        assert_eq!((puzzle.width, puzzle.height), (4, 2));
        assert_eq!(puzzle.name, "arena");
        assert_eq!(puzzle.tile(Position::new(2, 0)).map(|t| t.kind), Some(TileKind::Wall));
        assert_eq!(puzzle.tile(Position::new(3, 0)).map(|t| t.kind), Some(TileKind::Goal));
        assert_eq!(
            puzzle.tile(Position::new(1, 1)).map(|t| t.kind),
            Some(TileKind::Teleport)
        );
        assert!(puzzle.tile(Position::new(2, 1)).is_none());
        assert!(puzzle.tile(Position::new(3, 1)).is_none(), "short rows pad with holes");
        assert_eq!(
            puzzle.tile(Position::new(0, 1)).map(|t| t.behaviors.to_vec()),
            Some(vec![TileBehavior::Ice])
        );
        assert_eq!(puzzle.enemies[0].facing, Direction::West);
        assert_eq!(puzzle.par.turns, Some(4));
    }

    #[test]
    fn json_round_trips_canonical_form() {
        let puzzle = PuzzleLoader::from_ron_str(ARENA).expect("arena parses");
        let json = serde_json::to_string(&puzzle).expect("puzzle serializes");
        assert_eq!(PuzzleLoader::from_json_str(&json).expect("json parses"), puzzle);
    }

    #[test]
    fn unknown_glyphs_are_rejected() {
        let source = ARENA.replace("..#G", "..?G");
        assert!(PuzzleLoader::from_ron_str(&source).is_err());
    }

    #[test]
    fn off_grid_placements_are_rejected() {
        let source = ARENA.replace("(x: 1, y: 0), facing", "(x: 2, y: 1), facing");
        assert!(PuzzleLoader::from_ron_str(&source).is_err());
    }
}
