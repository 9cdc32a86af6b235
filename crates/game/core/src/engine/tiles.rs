//! Tile effect resolution.
//!
//! Runs after every entity has acted. Entry effects (direction change,
//! teleport, ice) fire only for entities that moved this turn. Damage applies
//! only to the tile an entity ends the turn on; tiles crossed mid-move or
//! mid-slide never burn, though collectibles along the path are picked up.
//! Pressure plates are evaluated last, by occupancy, in scan order.

use super::TurnContext;
use super::combat::{apply_damage, apply_heal};
use crate::config::GameConfig;
use crate::env::DefinitionRepository;
use crate::puzzle::{PlateEffect, TileBehavior, TileKind};
use crate::state::{Direction, EntityRef, Faction, GameState, Position, TurnEvent};

pub(crate) fn resolve_tiles<R>(state: &mut GameState, repo: &R, ctx: &TurnContext)
where
    R: DefinitionRepository + ?Sized,
{
    for entity in state.entity_refs() {
        let Some(position) = state
            .entity(entity)
            .filter(|placed| placed.is_alive())
            .map(|placed| placed.position)
        else {
            continue;
        };

        let visited = match ctx.movements.get(&entity) {
            Some(movement) => {
                let mut visited = movement.entered.clone();
                resolve_entry(state, entity, movement.heading, &mut visited);
                visited
            }
            None => vec![position],
        };

        let Some(resting) = state.entity(entity).map(|placed| placed.position) else {
            continue;
        };
        burn(state, entity, resting);
        if entity.faction == Faction::Character {
            collect(state, repo, entity, &visited);
        }
    }

    resolve_plates(state);
}

/// Entry behaviors of a tile, including the implicit unnamed teleport group
/// of bare teleport pads.
fn entry_behaviors(state: &GameState, position: Position) -> Vec<TileBehavior> {
    let mut behaviors = state.active_behaviors(position).to_vec();
    let bare_pad = state
        .puzzle
        .tile(position)
        .is_some_and(|tile| tile.kind == TileKind::Teleport)
        && state.tile_enabled(position)
        && !behaviors
            .iter()
            .any(|behavior| matches!(behavior, TileBehavior::Teleport { .. }));
    if bare_pad {
        behaviors.push(TileBehavior::Teleport {
            group: String::new(),
        });
    }
    behaviors
}

fn resolve_entry(
    state: &mut GameState,
    entity: EntityRef,
    mut heading: Direction,
    visited: &mut Vec<Position>,
) {
    let area = (state.puzzle.width as usize).saturating_mul(state.puzzle.height as usize);
    let budget = GameConfig::MAX_SLIDE_STEPS.min(area);
    let mut slides = 0;

    loop {
        let Some(position) = state.entity(entity).map(|placed| placed.position) else {
            return;
        };
        let mut slid = false;

        for behavior in entry_behaviors(state, position) {
            match behavior {
                TileBehavior::DirectionChange { direction } => {
                    heading = direction;
                    if let Some(placed) = state.entity_mut(entity) {
                        placed.facing = direction;
                    }
                    state.record(|| TurnEvent::Turned {
                        entity,
                        facing: direction,
                    });
                }
                TileBehavior::Teleport { group } => {
                    if let Some(destination) = teleport_destination(state, position, &group) {
                        if let Some(placed) = state.entity_mut(entity) {
                            placed.position = destination;
                        }
                        visited.push(destination);
                        state.record(|| TurnEvent::Teleported {
                            entity,
                            from: position,
                            to: destination,
                        });
                        return;
                    }
                }
                TileBehavior::Ice => {
                    let mut at = position;
                    while slides < budget && state.cell(at.step(heading)).is_free() {
                        at = at.step(heading);
                        slides += 1;
                        visited.push(at);
                    }
                    if at != position {
                        if let Some(placed) = state.entity_mut(entity) {
                            placed.position = at;
                        }
                        state.record(|| TurnEvent::Slid {
                            entity,
                            from: position,
                            to: at,
                        });
                        slid = true;
                        break;
                    }
                }
                TileBehavior::Damage { .. } | TileBehavior::PressurePlate { .. } => {}
            }
        }

        if !slid {
            return;
        }
    }
}

/// Next free member of `group` after `source` in row-major order, wrapping.
fn teleport_destination(state: &GameState, source: Position, group: &str) -> Option<Position> {
    let members: Vec<Position> = state
        .puzzle
        .tiles()
        .map(|(position, _)| position)
        .filter(|&position| state.tile_enabled(position))
        .filter(|&position| {
            entry_behaviors(state, position).iter().any(|behavior| {
                matches!(behavior, TileBehavior::Teleport { group: member } if member == group)
            })
        })
        .collect();

    let start = members.iter().position(|&member| member == source)?;
    (1..members.len())
        .map(|offset| members[(start + offset) % members.len()])
        .find(|&candidate| state.cell(candidate).is_free())
}

fn burn(state: &mut GameState, entity: EntityRef, tile: Position) {
    let damage: Vec<(i32, bool)> = state
        .active_behaviors(tile)
        .iter()
        .filter_map(|behavior| match behavior {
            TileBehavior::Damage { amount, once } => Some((*amount, *once)),
            _ => None,
        })
        .collect();

    for (amount, once) in damage {
        if !state.entity(entity).is_some_and(|placed| placed.is_alive()) {
            return;
        }
        if once && !state.board.mark_burned(entity, tile) {
            continue;
        }
        apply_damage(state, entity, amount);
    }
}

fn collect<R>(state: &mut GameState, repo: &R, entity: EntityRef, tiles: &[Position])
where
    R: DefinitionRepository + ?Sized,
{
    for &tile in tiles {
        for index in 0..state.collectibles.len() {
            let item = &state.collectibles[index];
            if item.collected || item.position != tile {
                continue;
            }
            if !state.entity(entity).is_some_and(|placed| placed.is_alive()) {
                return;
            }
            let heal = repo
                .collectible(&item.collectible_id)
                .map_or(0, |def| def.heal);

            state.collectibles[index].collected = true;
            state.stats.collectibles_collected += 1;
            state.record(|| TurnEvent::Collected {
                entity,
                collectible: index,
            });
            if heal > 0 {
                apply_heal(state, entity, heal);
            }
        }
    }
}

fn resolve_plates(state: &mut GameState) {
    let plates: Vec<(Position, Vec<(Vec<PlateEffect>, bool)>)> = state
        .puzzle
        .tiles()
        .filter_map(|(position, tile)| {
            let plates: Vec<(Vec<PlateEffect>, bool)> = tile
                .behaviors
                .iter()
                .filter_map(|behavior| match behavior {
                    TileBehavior::PressurePlate {
                        effects,
                        stay_pressed,
                    } => Some((effects.clone(), *stay_pressed)),
                    _ => None,
                })
                .collect();
            (!plates.is_empty()).then_some((position, plates))
        })
        .collect();

    for (position, behaviors) in plates {
        let live = state
            .active_behaviors(position)
            .iter()
            .any(|behavior| matches!(behavior, TileBehavior::PressurePlate { .. }));
        let occupied = live && !state.occupants(position).is_empty();
        let was_pressed = state.board.pressed_plates.contains(&position);

        if occupied && !was_pressed {
            state.board.pressed_plates.insert(position);
            state.record(|| TurnEvent::PlatePressed { at: position });
            for (effects, _) in &behaviors {
                for effect in effects {
                    apply_plate_effect(state, position, effect, false);
                }
            }
        } else if !occupied && was_pressed {
            state.board.pressed_plates.remove(&position);
            state.record(|| TurnEvent::PlateReleased { at: position });
            for (effects, _) in behaviors.iter().filter(|(_, stay_pressed)| *stay_pressed) {
                for effect in effects.iter().rev() {
                    apply_plate_effect(state, position, effect, true);
                }
            }
        }
    }
}

fn apply_plate_effect(state: &mut GameState, plate: Position, effect: &PlateEffect, revert: bool) {
    match effect {
        PlateEffect::ToggleWall { at } => {
            state.board.toggle_wall(*at);
            state.record(|| TurnEvent::WallToggled { at: *at });
        }
        PlateEffect::ToggleTriggerGroup { group } => {
            state.board.toggle_group(group);
            state.record(|| TurnEvent::GroupToggled {
                group: group.clone(),
            });
        }
        PlateEffect::SpawnEnemy { at } if revert => despawn_enemy(state, *at),
        PlateEffect::SpawnEnemy { at } => spawn_enemy(state, *at),
        PlateEffect::DespawnEnemy { at } if revert => spawn_enemy(state, *at),
        PlateEffect::DespawnEnemy { at } => despawn_enemy(state, *at),
        PlateEffect::Teleport { .. } if revert => {}
        PlateEffect::Teleport { to } => {
            let Some(&occupant) = state.occupants(plate).first() else {
                return;
            };
            if !state.cell(*to).is_free() {
                return;
            }
            if let Some(placed) = state.entity_mut(occupant) {
                placed.position = *to;
            }
            state.record(|| TurnEvent::Teleported {
                entity: occupant,
                from: plate,
                to: *to,
            });
        }
    }
}

fn spawn_enemy(state: &mut GameState, at: Position) {
    if !state.cell(at).is_free() {
        return;
    }
    let Some(index) = state
        .enemies
        .iter()
        .position(|enemy| enemy.position == at && !enemy.active && !enemy.dead && enemy.max_health > 0)
    else {
        return;
    };
    state.enemies[index].active = true;
    state.record(|| TurnEvent::EnemySpawned {
        entity: EntityRef::enemy(index),
    });
}

fn despawn_enemy(state: &mut GameState, at: Position) {
    let Some(index) = state
        .enemies
        .iter()
        .position(|enemy| enemy.position == at && enemy.is_alive())
    else {
        return;
    };
    state.enemies[index].active = false;
    state.record(|| TurnEvent::EnemyDespawned {
        entity: EntityRef::enemy(index),
    });
}
