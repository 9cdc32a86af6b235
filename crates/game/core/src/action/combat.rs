use super::targeting::{area_tiles, nearest, trace_line};
use super::{AutoTarget, RelativeDirection, SpellCast};
use crate::engine::{Reach, Strike, StrikeEffect, TurnContext};
use crate::env::{ActorProfile, SpellEffect, SpellShape};
use crate::state::{EntityRef, Faction, GameState, TurnEvent};

/// Queues a basic attack along a line of the actor's reach.
pub(crate) fn attack(
    state: &mut GameState,
    actor: EntityRef,
    profile: &ActorProfile<'_>,
    relative: RelativeDirection,
    ctx: &mut TurnContext,
) {
    let Some(entity) = state.entity(actor) else {
        return;
    };
    let direction = relative.resolve(entity.facing);
    let tiles = trace_line(state, entity.position, direction, profile.attack_range.max(1));

    state.record(|| TurnEvent::Attacked {
        entity: actor,
        tiles: tiles.clone(),
    });
    ctx.strikes.push(Strike {
        source: actor,
        tiles,
        reach: Reach::First,
        effect: StrikeEffect::Damage(profile.attack_damage),
    });
}

/// Queues a spell. Unknown spells and auto-targets with nobody in range
/// fizzle without effect.
///
/// Auto-targeting names absolute factions: `NearestEnemy` picks from the
/// enemy side and `NearestCharacter` from the character side, whoever casts.
pub(crate) fn cast_spell(
    state: &mut GameState,
    actor: EntityRef,
    profile: &ActorProfile<'_>,
    cast: &SpellCast,
    ctx: &mut TurnContext,
) {
    let Some(spell) = profile.spell(&cast.spell) else {
        return;
    };
    let Some(entity) = state.entity(actor) else {
        return;
    };
    let origin = entity.position;
    let direction = cast.direction.resolve(entity.facing);

    let target = match cast.target {
        AutoTarget::None => None,
        AutoTarget::NearestEnemy => match nearest(state, actor, Faction::Enemy, spell.range) {
            Some(position) => Some(position),
            None => return,
        },
        AutoTarget::NearestCharacter => {
            match nearest(state, actor, Faction::Character, spell.range) {
                Some(position) => Some(position),
                None => return,
            }
        }
    };

    let (tiles, reach) = match (spell.shape, target) {
        (SpellShape::Area { radius }, center) => {
            (area_tiles(state, center.unwrap_or(origin), radius), Reach::All)
        }
        (_, Some(position)) => (vec![position], Reach::First),
        (SpellShape::Melee, None) => (trace_line(state, origin, direction, 1), Reach::First),
        (SpellShape::Projectile, None) => (
            trace_line(state, origin, direction, spell.range.max(1)),
            Reach::First,
        ),
    };

    if spell.shape == SpellShape::Projectile {
        state.record(|| TurnEvent::Projectile {
            entity: actor,
            path: tiles.clone(),
        });
    }
    state.record(|| TurnEvent::SpellCast {
        entity: actor,
        spell: spell.id.clone(),
        tiles: tiles.clone(),
    });

    let effect = match spell.effect {
        SpellEffect::Damage(amount) => StrikeEffect::Damage(amount),
        SpellEffect::Heal(amount) => StrikeEffect::Heal(amount),
    };
    ctx.strikes.push(Strike {
        source: actor,
        tiles,
        reach,
        effect,
    });
}
