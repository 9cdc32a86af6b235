//! Authored puzzle definitions.
//!
//! A [`Puzzle`] is read-only input to the simulation. The engine works on
//! its own copy inside [`GameState`](crate::state::GameState), so the
//! caller's puzzle is never touched by a run.
mod placement;
mod tile;

pub use placement::{is_valid_placement, valid_placement_tiles};
pub use tile::{Cadence, PlateEffect, Tile, TileBehavior, TileBehaviors, TileKind};

use crate::state::{Direction, Position};

/// Complete authored puzzle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Puzzle {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Row-major grid, `tiles[y][x]`. `None` marks a hole in the map.
    pub tiles: Vec<Vec<Option<Tile>>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemies: Vec<EnemyPlacement>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub collectibles: Vec<CollectiblePlacement>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub objects: Vec<ObjectPlacement>,
    pub win_conditions: Vec<WinCondition>,
    pub available_characters: Vec<String>,
    pub max_characters: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_turns: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub par: ParTargets,
    #[cfg_attr(feature = "serde", serde(default))]
    pub side_quests: Vec<SideQuest>,
}

impl Puzzle {
    /// Tile at `position`, or `None` for holes and out-of-bounds positions.
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        self.tiles
            .get(position.y as usize)?
            .get(position.x as usize)?
            .as_ref()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.tile(position).is_some()
    }

    /// Existing tiles in row-major scan order.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().filter_map(move |(x, cell)| {
                cell.as_ref()
                    .map(|tile| (Position::new(x as i32, y as i32), tile))
            })
        })
    }

    pub fn has_goal(&self) -> bool {
        self.tiles().any(|(_, tile)| tile.kind == TileKind::Goal)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyPlacement {
    pub enemy_id: String,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub facing: Direction,
    /// Starts off the board until a pressure plate spawns it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dormant: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectiblePlacement {
    pub collectible_id: String,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectPlacement {
    pub object_id: String,
    pub position: Position,
}

/// Victory predicates. A puzzle is won when every listed condition holds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WinCondition {
    DefeatAllEnemies,
    CollectAll,
    ReachGoal,
    SurviveTurns { turns: u32 },
}

/// Author targets that drive scoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParTargets {
    #[cfg_attr(feature = "serde", serde(default))]
    pub characters: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub turns: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideQuest {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    pub kind: SideQuestKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_points: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SideQuestKind {
    CollectAll,
    NoDamageTaken,
    UseCharacter { character_id: String },
    AvoidCharacter { character_id: String },
    SpeedRun { max_turns: u32 },
    Minimalist { max_characters: u32 },
    NoDeaths,
    /// Judged outside the engine; never completed automatically.
    Custom { description: String },
}

/// Incremental construction of puzzles, mostly for tests and tooling.
#[derive(Clone, Debug)]
pub struct PuzzleBuilder {
    puzzle: Puzzle,
}

impl PuzzleBuilder {
    /// Starts a fully-populated `width`×`height` grid of empty tiles.
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        let id = id.into();
        let tiles = (0..height)
            .map(|_| (0..width).map(|_| Some(Tile::empty())).collect())
            .collect();
        Self {
            puzzle: Puzzle {
                name: id.clone(),
                id,
                width,
                height,
                tiles,
                enemies: Vec::new(),
                collectibles: Vec::new(),
                objects: Vec::new(),
                win_conditions: Vec::new(),
                available_characters: Vec::new(),
                max_characters: 1,
                max_turns: None,
                par: ParTargets::default(),
                side_quests: Vec::new(),
            },
        }
    }

    /// Replaces the cell at `position`; `None` punches a hole.
    pub fn tile(mut self, position: Position, tile: Option<Tile>) -> Self {
        if let Some(cell) = self
            .puzzle
            .tiles
            .get_mut(position.y as usize)
            .and_then(|row| row.get_mut(position.x as usize))
        {
            *cell = tile;
        }
        self
    }

    pub fn wall(self, position: Position) -> Self {
        self.tile(position, Some(Tile::wall()))
    }

    pub fn enemy(mut self, enemy_id: impl Into<String>, position: Position) -> Self {
        self.puzzle.enemies.push(EnemyPlacement {
            enemy_id: enemy_id.into(),
            position,
            facing: Direction::default(),
            dormant: false,
        });
        self
    }

    pub fn dormant_enemy(mut self, enemy_id: impl Into<String>, position: Position) -> Self {
        self.puzzle.enemies.push(EnemyPlacement {
            enemy_id: enemy_id.into(),
            position,
            facing: Direction::default(),
            dormant: true,
        });
        self
    }

    pub fn enemy_facing(mut self, facing: Direction) -> Self {
        if let Some(last) = self.puzzle.enemies.last_mut() {
            last.facing = facing;
        }
        self
    }

    pub fn collectible(mut self, collectible_id: impl Into<String>, position: Position) -> Self {
        self.puzzle.collectibles.push(CollectiblePlacement {
            collectible_id: collectible_id.into(),
            position,
        });
        self
    }

    pub fn object(mut self, object_id: impl Into<String>, position: Position) -> Self {
        self.puzzle.objects.push(ObjectPlacement {
            object_id: object_id.into(),
            position,
        });
        self
    }

    pub fn win(mut self, condition: WinCondition) -> Self {
        self.puzzle.win_conditions.push(condition);
        self
    }

    pub fn character(mut self, character_id: impl Into<String>) -> Self {
        self.puzzle.available_characters.push(character_id.into());
        self
    }

    pub fn max_characters(mut self, max: u32) -> Self {
        self.puzzle.max_characters = max;
        self
    }

    pub fn max_turns(mut self, max: u32) -> Self {
        self.puzzle.max_turns = Some(max);
        self
    }

    pub fn par(mut self, characters: u32, turns: u32) -> Self {
        self.puzzle.par = ParTargets {
            characters: Some(characters),
            turns: Some(turns),
        };
        self
    }

    pub fn side_quest(mut self, quest: SideQuest) -> Self {
        self.puzzle.side_quests.push(quest);
        self
    }

    pub fn build(self) -> Puzzle {
        self.puzzle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holes_and_bounds_have_no_tile() {
        let puzzle = PuzzleBuilder::new("holes", 3, 2)
            .tile(Position::new(1, 0), None)
            .build();

        assert!(puzzle.tile(Position::new(0, 0)).is_some());
        assert!(puzzle.tile(Position::new(1, 0)).is_none());
        assert!(puzzle.tile(Position::new(3, 0)).is_none());
        assert!(puzzle.tile(Position::new(-1, 1)).is_none());
        assert_eq!(puzzle.tiles().count(), 5);
    }

    #[test]
    fn tiles_iterate_in_row_major_order() {
        let puzzle = PuzzleBuilder::new("scan", 2, 2).build();
        let order: Vec<Position> = puzzle.tiles().map(|(pos, _)| pos).collect();
        assert_eq!(
            order,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ]
        );
    }
}
