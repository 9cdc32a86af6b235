//! Mutable run state.
//!
//! A [`GameState`] is the root of one simulation run: it owns a private copy
//! of the puzzle, every placed entity, the board overlay and the turn
//! bookkeeping. Nothing outside the engine mutates it once the run starts.
mod board;
mod common;
mod entities;

pub use board::{BoardState, RunStats, TurnEvent};
pub use common::{Direction, Position};
pub use entities::{
    CollectibleState, EntityRef, Faction, PlacedCharacter, PlacedEnemy, PlacedEntity,
};

use crate::config::GameConfig;
use crate::env::{CollisionFlags, DefinitionRepository};
use crate::error::PlacementError;
use crate::puzzle::{Puzzle, TileBehavior, TileKind, is_valid_placement};

/// Lifecycle of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    #[default]
    Setup,
    Running,
    Victory,
    Defeat,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// What a moving entity finds on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// Off the grid or a hole.
    Edge,
    /// A wall, blocking object or wall-like corpse.
    Wall,
    /// Held by a living entity or a blocking corpse.
    Occupied(EntityRef),
    Free,
}

impl Cell {
    pub const fn is_free(self) -> bool {
        matches!(self, Cell::Free)
    }
}

/// Canonical state of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Private copy with custom tile types folded into each tile.
    pub puzzle: Puzzle,
    pub config: GameConfig,
    pub characters: Vec<PlacedCharacter>,
    pub enemies: Vec<PlacedEnemy>,
    pub collectibles: Vec<CollectibleState>,
    /// Number of completed turns.
    pub current_turn: u32,
    pub status: GameStatus,
    /// Resolve animated effects instantly and skip the presentation trace.
    pub headless: bool,
    pub board: BoardState,
    pub stats: RunStats,
    /// Presentation trace of the most recent turn; empty in headless mode.
    pub events: Vec<TurnEvent>,
}

impl GameState {
    /// Builds the setup-phase state for `puzzle`.
    ///
    /// Enemies whose definition cannot be resolved stay inactive for the
    /// whole run instead of failing initialization.
    pub fn new<R>(puzzle: &Puzzle, repo: &R) -> Self
    where
        R: DefinitionRepository + ?Sized,
    {
        let mut puzzle = puzzle.clone();
        fold_custom_tiles(&mut puzzle, repo);

        let enemies = puzzle
            .enemies
            .iter()
            .map(|placement| match repo.enemy(&placement.enemy_id) {
                Some(def) => {
                    let mut enemy = PlacedEntity::new(
                        def.id.clone(),
                        placement.position,
                        placement.facing,
                        def.health,
                    );
                    enemy.collision = def.collision;
                    enemy.active = !placement.dormant;
                    enemy
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(enemy = %placement.enemy_id, "enemy definition missing; left inactive");
                    let mut enemy = PlacedEntity::new(
                        placement.enemy_id.clone(),
                        placement.position,
                        placement.facing,
                        0,
                    );
                    enemy.active = false;
                    enemy.collision = CollisionFlags::empty();
                    enemy
                }
            })
            .collect();

        let collectibles = puzzle
            .collectibles
            .iter()
            .map(|placement| CollectibleState {
                collectible_id: placement.collectible_id.clone(),
                position: placement.position,
                collected: false,
            })
            .collect();

        let obstacles = puzzle
            .objects
            .iter()
            .filter(|placement| {
                repo.object(&placement.object_id)
                    .is_some_and(|def| def.blocks_movement)
            })
            .map(|placement| placement.position)
            .collect();

        Self {
            puzzle,
            config: GameConfig::default(),
            characters: Vec::new(),
            enemies,
            collectibles,
            current_turn: 0,
            status: GameStatus::Setup,
            headless: false,
            board: BoardState {
                obstacles,
                ..BoardState::default()
            },
            stats: RunStats::default(),
            events: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Installs a character before the run starts and returns its index.
    ///
    /// `facing` falls back to the definition's default facing.
    pub fn place_character<R>(
        &mut self,
        repo: &R,
        character_id: &str,
        position: Position,
        facing: Option<Direction>,
    ) -> Result<usize, PlacementError>
    where
        R: DefinitionRepository + ?Sized,
    {
        if self.status != GameStatus::Setup {
            return Err(PlacementError::NotInSetup {
                status: self.status,
            });
        }
        let def = repo
            .character(character_id)
            .ok_or_else(|| PlacementError::UnknownCharacter {
                id: character_id.to_owned(),
            })?;
        if !self
            .puzzle
            .available_characters
            .iter()
            .any(|id| id == character_id)
        {
            return Err(PlacementError::NotInRoster {
                id: character_id.to_owned(),
            });
        }
        if self
            .characters
            .iter()
            .any(|placed| placed.definition_id == character_id)
        {
            return Err(PlacementError::AlreadyPlaced {
                id: character_id.to_owned(),
            });
        }
        if self.characters.len() >= self.puzzle.max_characters as usize {
            return Err(PlacementError::TooManyCharacters {
                max: self.puzzle.max_characters,
            });
        }
        if !is_valid_placement(&self.puzzle, repo, position) {
            return Err(PlacementError::InvalidTile { position });
        }
        if self
            .characters
            .iter()
            .any(|placed| placed.position == position)
        {
            return Err(PlacementError::Occupied { position });
        }

        let facing = facing.unwrap_or(def.default_facing);
        self.characters.push(PlacedEntity::new(
            def.id.clone(),
            position,
            facing,
            def.health,
        ));
        Ok(self.characters.len() - 1)
    }

    pub fn entities(&self, faction: Faction) -> &[PlacedEntity] {
        match faction {
            Faction::Character => &self.characters,
            Faction::Enemy => &self.enemies,
        }
    }

    pub fn entity(&self, entity: EntityRef) -> Option<&PlacedEntity> {
        self.entities(entity.faction).get(entity.index)
    }

    pub fn entity_mut(&mut self, entity: EntityRef) -> Option<&mut PlacedEntity> {
        match entity.faction {
            Faction::Character => self.characters.get_mut(entity.index),
            Faction::Enemy => self.enemies.get_mut(entity.index),
        }
    }

    /// Every entity handle in turn order.
    pub fn entity_refs(&self) -> Vec<EntityRef> {
        (0..self.characters.len())
            .map(EntityRef::character)
            .chain((0..self.enemies.len()).map(EntityRef::enemy))
            .collect()
    }

    /// Living, active entities of one faction.
    pub fn living(&self, faction: Faction) -> impl Iterator<Item = (EntityRef, &PlacedEntity)> {
        self.entities(faction)
            .iter()
            .enumerate()
            .filter(|(_, entity)| entity.is_alive())
            .map(move |(index, entity)| (EntityRef { faction, index }, entity))
    }

    /// Living entities standing on `position`, characters first.
    pub fn occupants(&self, position: Position) -> Vec<EntityRef> {
        self.living(Faction::Character)
            .chain(self.living(Faction::Enemy))
            .filter(|(_, entity)| entity.position == position)
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Whether the tile exists and its trigger group is currently enabled.
    pub fn tile_enabled(&self, position: Position) -> bool {
        self.puzzle.tile(position).is_some_and(|tile| {
            let flipped = tile
                .trigger_group
                .as_ref()
                .is_some_and(|group| self.board.flipped_groups.contains(group));
            tile.starts_enabled != flipped
        })
    }

    pub fn is_wall(&self, position: Position) -> bool {
        let Some(tile) = self.puzzle.tile(position) else {
            return false;
        };
        if self.board.obstacles.contains(&position) {
            return true;
        }
        let authored = tile.kind == TileKind::Wall && self.tile_enabled(position);
        authored != self.board.flipped_walls.contains(&position)
    }

    /// Behaviors of the tile that are live on the current turn.
    pub fn active_behaviors(&self, position: Position) -> &[TileBehavior] {
        match self.puzzle.tile(position) {
            Some(tile)
                if self.tile_enabled(position)
                    && tile
                        .cadence
                        .as_ref()
                        .is_none_or(|cadence| cadence.is_on(self.current_turn)) =>
            {
                &tile.behaviors
            }
            _ => &[],
        }
    }

    /// Classifies `position` for movement.
    pub fn cell(&self, position: Position) -> Cell {
        if !self.puzzle.contains(position) {
            return Cell::Edge;
        }
        if self.is_wall(position) {
            return Cell::Wall;
        }
        for (index, entity) in self.characters.iter().enumerate() {
            if entity.is_alive() && entity.position == position {
                return Cell::Occupied(EntityRef::character(index));
            }
        }
        for (index, enemy) in self.enemies.iter().enumerate() {
            if !enemy.active || enemy.position != position {
                continue;
            }
            if enemy.dead {
                if enemy.collision.contains(CollisionFlags::BEHAVES_LIKE_WALL_DEAD) {
                    return Cell::Wall;
                }
                if enemy.collision.contains(CollisionFlags::BLOCKS_MOVEMENT_DEAD) {
                    return Cell::Occupied(EntityRef::enemy(index));
                }
            } else if enemy.collision.contains(CollisionFlags::BLOCKS_MOVEMENT) {
                return Cell::Occupied(EntityRef::enemy(index));
            }
        }
        Cell::Free
    }

    pub fn characters_used(&self) -> u32 {
        self.characters.len() as u32
    }

    /// Appends to the presentation trace unless running headless.
    pub(crate) fn record(&mut self, event: impl FnOnce() -> TurnEvent) {
        if !self.headless {
            self.events.push(event());
        }
    }

    /// SHA-256 over the bincode encoding of the whole state.
    ///
    /// Two runs of the same placement produce identical fingerprints.
    #[cfg(feature = "serde")]
    pub fn fingerprint(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}

/// Merges custom tile type definitions into the tiles that reference them.
fn fold_custom_tiles<R>(puzzle: &mut Puzzle, repo: &R)
where
    R: DefinitionRepository + ?Sized,
{
    for tile in puzzle.tiles.iter_mut().flatten().flatten() {
        let Some(def) = tile.custom_type.as_deref().and_then(|id| repo.tile_type(id)) else {
            continue;
        };
        let room = tile.behaviors.remaining_capacity();
        if def.behaviors.len() > room {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                tile_type = %def.id,
                dropped = def.behaviors.len() - room,
                "tile behavior limit reached; inherited behaviors dropped"
            );
        }
        tile.behaviors.extend(def.behaviors.iter().take(room).cloned());
        if tile.cadence.is_none() {
            tile.cadence = def.cadence.clone();
        }
        if def.blocks_movement {
            tile.kind = TileKind::Wall;
        }
    }
}
