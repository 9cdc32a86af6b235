use super::combat::{attack, cast_spell};
use super::condition::evaluate_condition;
use super::movement::{blink, turn, walk};
use super::{CharacterAction, ExecutionMode, SpellCast, TriggerConfig};
use crate::engine::TurnContext;
use crate::env::{ActorProfile, DefinitionRepository, actor_profile};
use crate::state::{EntityRef, GameState};

/// Effect of an executed step on the action pointer.
enum Flow {
    Advance,
    /// A nested `Repeat` fired inside a branch.
    Restart,
}

/// Runs one turn of `actor`'s behavior program.
///
/// Background casts are checked first, every turn, independent of the
/// pointer. Then the pointer runs exactly one turn-consuming step. A `Repeat`
/// jumps back to the start without using the turn; hitting a second one in
/// the same turn, or one right after a parallel cast already fired, idles
/// instead of spinning. Once the pointer runs past the end the entity idles for good.
pub(crate) fn act<R>(state: &mut GameState, repo: &R, actor: EntityRef, ctx: &mut TurnContext)
where
    R: DefinitionRepository + ?Sized,
{
    let Some(entity) = state.entity(actor).filter(|entity| entity.is_alive()) else {
        return;
    };
    let Some(profile) = actor_profile(repo, actor.faction, &entity.definition_id) else {
        #[cfg(feature = "tracing")]
        tracing::debug!(%actor, id = %entity.definition_id, "no behavior profile; skipping");
        return;
    };

    run_background(state, actor, &profile, ctx);
    run_program(state, actor, &profile, ctx);
}

fn run_background(
    state: &mut GameState,
    actor: EntityRef,
    profile: &ActorProfile<'_>,
    ctx: &mut TurnContext,
) {
    for step in profile.behavior {
        if let Some(cast) = step.background_cast() {
            cast_when_triggered(state, actor, profile, cast, ctx);
        }
    }
}

fn run_program(
    state: &mut GameState,
    actor: EntityRef,
    profile: &ActorProfile<'_>,
    ctx: &mut TurnContext,
) {
    let program = profile.behavior;
    let Some(mut index) = state.entity(actor).map(|entity| entity.action_index) else {
        return;
    };
    let mut wrapped = false;

    let next = loop {
        let Some(step) = program.get(index) else {
            break index;
        };
        if step.background_cast().is_some() {
            index += 1;
            continue;
        }

        match step {
            CharacterAction::Repeat if wrapped => break 0,
            CharacterAction::Repeat => {
                wrapped = true;
                index = 0;
            }
            CharacterAction::Spell(cast) if cast.mode == ExecutionMode::ParallelWithNext => {
                cast_when_triggered(state, actor, profile, cast, ctx);
                // A following `Repeat` must not loop back into this cast.
                wrapped = true;
                index += 1;
            }
            _ => {
                if let Flow::Restart = execute(state, actor, profile, step, ctx) {
                    break 0;
                }
                index += 1;
                while let Some(CharacterAction::Spell(cast)) = program.get(index)
                    && cast.mode == ExecutionMode::ParallelWithPrevious
                    && !cast.is_background()
                {
                    cast_when_triggered(state, actor, profile, cast, ctx);
                    index += 1;
                }
                break index;
            }
        }
    };

    if let Some(entity) = state.entity_mut(actor) {
        entity.action_index = next;
    }
}

fn execute(
    state: &mut GameState,
    actor: EntityRef,
    profile: &ActorProfile<'_>,
    step: &CharacterAction,
    ctx: &mut TurnContext,
) -> Flow {
    match step {
        CharacterAction::Move {
            direction,
            tiles,
            on_wall,
        } => walk(state, actor, *direction, *tiles, *on_wall, ctx),
        CharacterAction::Turn { rotation } => turn(state, actor, rotation.degrees()),
        CharacterAction::Attack { direction } => attack(state, actor, profile, *direction, ctx),
        CharacterAction::Spell(cast) => cast_when_triggered(state, actor, profile, cast, ctx),
        CharacterAction::Conditional {
            condition,
            then,
            otherwise,
        } => {
            let branch = if evaluate_condition(state, actor, *condition) {
                Some(then.as_ref())
            } else {
                otherwise.as_deref()
            };
            if let Some(branch) = branch {
                return execute(state, actor, profile, branch, ctx);
            }
        }
        CharacterAction::Wait => {}
        CharacterAction::Teleport {
            direction,
            distance,
        } => blink(state, actor, *direction, *distance, ctx),
        CharacterAction::Repeat => return Flow::Restart,
    }
    Flow::Advance
}

fn cast_when_triggered(
    state: &mut GameState,
    actor: EntityRef,
    profile: &ActorProfile<'_>,
    cast: &SpellCast,
    ctx: &mut TurnContext,
) {
    if trigger_fires(state, actor, cast.trigger.as_ref()) {
        cast_spell(state, actor, profile, cast, ctx);
    }
}

/// Interval triggers fire on turns where `(turn + 1)` is a multiple of the
/// interval expressed in turns; event triggers fire while their condition holds.
fn trigger_fires(state: &GameState, actor: EntityRef, trigger: Option<&TriggerConfig>) -> bool {
    match trigger {
        None => true,
        Some(TriggerConfig::Interval { interval_ms }) => {
            let every = state.config.turns_for_interval(*interval_ms);
            (state.current_turn + 1) % every == 0
        }
        Some(TriggerConfig::OnEvent(condition)) => evaluate_condition(state, actor, *condition),
    }
}
