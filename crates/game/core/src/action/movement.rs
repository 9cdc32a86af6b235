use super::{RelativeDirection, WallPolicy};
use crate::engine::TurnContext;
use crate::state::{Cell, Direction, EntityRef, GameState, Position, TurnEvent};

/// Walks up to `tiles` steps relative to the current facing.
///
/// Edges, walls and blocking entities all trigger `policy` once per blocked
/// step. Turning policies re-aim the rest of the move from the new facing;
/// `Continue` crosses walls and occupants but never the grid edge, and the
/// walker ends on the last free tile it crossed.
pub(crate) fn walk(
    state: &mut GameState,
    actor: EntityRef,
    relative: RelativeDirection,
    tiles: u8,
    policy: WallPolicy,
    ctx: &mut TurnContext,
) {
    let Some(entity) = state.entity(actor) else {
        return;
    };
    let mut facing = entity.facing;
    let mut landed = entity.position;
    let mut cursor = landed;
    let mut heading = relative.resolve(facing);

    for _ in 0..tiles {
        let next = cursor.step(heading);
        let cell = state.cell(next);
        if cell.is_free() {
            relocate(state, actor, landed, next, heading, ctx);
            cursor = next;
            landed = next;
            continue;
        }

        state.record(|| TurnEvent::Bumped {
            entity: actor,
            at: next,
        });
        match policy {
            WallPolicy::Stop => break,
            WallPolicy::Continue if cell == Cell::Edge => break,
            WallPolicy::Continue => cursor = next,
            turning => {
                if let Some(rotation) = turning.rotation() {
                    facing = facing.rotate(rotation.degrees());
                    face(state, actor, facing);
                    heading = relative.resolve(facing);
                }
            }
        }
    }
}

/// Rotates in place by `degrees` clockwise.
pub(crate) fn turn(state: &mut GameState, actor: EntityRef, degrees: i32) {
    if let Some(facing) = state.entity(actor).map(|entity| entity.facing.rotate(degrees)) {
        face(state, actor, facing);
    }
}

/// Jumps `distance` tiles, ignoring whatever lies between. Fails silently
/// when the destination is not free.
pub(crate) fn blink(
    state: &mut GameState,
    actor: EntityRef,
    relative: RelativeDirection,
    distance: u8,
    ctx: &mut TurnContext,
) {
    let Some(entity) = state.entity(actor) else {
        return;
    };
    if distance == 0 {
        return;
    }
    let heading = relative.resolve(entity.facing);
    let from = entity.position;
    let to = from.step_by(heading, i32::from(distance));
    if !state.cell(to).is_free() {
        return;
    }
    if let Some(entity) = state.entity_mut(actor) {
        entity.position = to;
    }
    ctx.entered(actor, to, heading);
    state.record(|| TurnEvent::Teleported {
        entity: actor,
        from,
        to,
    });
}

fn relocate(
    state: &mut GameState,
    actor: EntityRef,
    from: Position,
    to: Position,
    heading: Direction,
    ctx: &mut TurnContext,
) {
    if let Some(entity) = state.entity_mut(actor) {
        entity.position = to;
    }
    ctx.entered(actor, to, heading);
    state.record(|| TurnEvent::Moved {
        entity: actor,
        from,
        to,
    });
}

fn face(state: &mut GameState, actor: EntityRef, facing: Direction) {
    if let Some(entity) = state.entity_mut(actor) {
        entity.facing = facing;
    }
    state.record(|| TurnEvent::Turned {
        entity: actor,
        facing,
    });
}
