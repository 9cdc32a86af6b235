use crate::state::{EntityRef, Faction, GameState, Position, TurnEvent};

/// How a strike picks victims among the tiles it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reach {
    /// The first tile, in order, holding a valid target; one victim.
    First,
    /// Every valid target on every tile.
    All,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrikeEffect {
    /// Hurts the source's opponents.
    Damage(i32),
    /// Restores the source's allies.
    Heal(i32),
}

/// An attack or spell queued during the action phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Strike {
    pub source: EntityRef,
    pub tiles: Vec<Position>,
    pub reach: Reach,
    pub effect: StrikeEffect,
}

impl Strike {
    fn target_faction(&self) -> Faction {
        match self.effect {
            StrikeEffect::Damage(_) => self.source.faction.opponent(),
            StrikeEffect::Heal(_) => self.source.faction,
        }
    }

    fn victims(&self, state: &GameState) -> Vec<EntityRef> {
        let faction = self.target_faction();
        match self.reach {
            Reach::First => self
                .tiles
                .iter()
                .find_map(|&tile| targets_on(state, faction, tile).into_iter().next())
                .into_iter()
                .collect(),
            Reach::All => {
                let mut victims: Vec<EntityRef> = self
                    .tiles
                    .iter()
                    .flat_map(|&tile| targets_on(state, faction, tile))
                    .collect();
                victims.sort();
                victims.dedup();
                victims
            }
        }
    }
}

fn targets_on(state: &GameState, faction: Faction, tile: Position) -> Vec<EntityRef> {
    state
        .living(faction)
        .filter(|(_, entity)| entity.position == tile)
        .map(|(entity, _)| entity)
        .collect()
}

/// Applies queued strikes in the order they were queued.
///
/// Victims are chosen against positions at resolution time, so every strike
/// of a turn sees the board after movement and tile effects.
pub(crate) fn resolve_strikes(state: &mut GameState, strikes: Vec<Strike>) {
    for strike in strikes {
        for victim in strike.victims(state) {
            match strike.effect {
                StrikeEffect::Damage(amount) => apply_damage(state, victim, amount),
                StrikeEffect::Heal(amount) => apply_heal(state, victim, amount),
            }
        }
    }
}

/// Shared damage path for strikes and damage tiles; keeps run stats current.
pub(crate) fn apply_damage(state: &mut GameState, victim: EntityRef, amount: i32) {
    let Some(entity) = state.entity_mut(victim) else {
        return;
    };
    if !entity.is_alive() || amount <= 0 {
        return;
    }
    let killed = entity.take_damage(amount);
    let health = entity.health;

    match victim.faction {
        Faction::Character => {
            state.stats.damage_taken = state.stats.damage_taken.saturating_add(amount as u32);
            if killed {
                state.stats.character_deaths += 1;
            }
        }
        Faction::Enemy if killed => state.stats.enemies_defeated += 1,
        Faction::Enemy => {}
    }

    state.record(|| TurnEvent::Damaged {
        entity: victim,
        amount,
        health,
    });
    if killed {
        state.record(|| TurnEvent::Died { entity: victim });
    }
}

pub(crate) fn apply_heal(state: &mut GameState, target: EntityRef, amount: i32) {
    let Some(entity) = state.entity_mut(target) else {
        return;
    };
    let applied = entity.heal(amount);
    let health = entity.health;
    if applied > 0 {
        state.record(|| TurnEvent::Healed {
            entity: target,
            amount: applied,
            health,
        });
    }
}
