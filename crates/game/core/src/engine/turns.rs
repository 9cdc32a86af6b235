use super::combat::resolve_strikes;
use super::tiles::resolve_tiles;
use super::victory;
use super::{GameEngine, TurnContext};
use crate::action::act;
use crate::env::{DefinitionRepository, EnemyBehaviorType};
use crate::state::{EntityRef, Faction, GameStatus};

impl<R> GameEngine<'_, R>
where
    R: DefinitionRepository + ?Sized,
{
    /// Executes one full turn and returns the resulting status.
    pub fn execute_turn(&mut self) -> GameStatus {
        match self.state.status {
            GameStatus::Setup => self.state.status = GameStatus::Running,
            GameStatus::Running => {}
            GameStatus::Victory | GameStatus::Defeat => return self.state.status,
        }
        self.state.events.clear();

        let mut ctx = TurnContext::default();
        for actor in self.turn_order() {
            act(self.state, self.repo, actor, &mut ctx);
        }

        resolve_tiles(self.state, self.repo, &ctx);
        resolve_strikes(self.state, ctx.strikes);

        if let Some(outcome) = victory::evaluate(self.state) {
            self.state.status = outcome;
        }

        self.state.current_turn += 1;
        if self.state.status == GameStatus::Running
            && self
                .state
                .puzzle
                .max_turns
                .is_some_and(|limit| self.state.current_turn >= limit)
        {
            self.state.status = GameStatus::Defeat;
        }

        self.state.status
    }

    /// Living characters, then active enemies that run their programs.
    fn turn_order(&self) -> Vec<EntityRef> {
        let characters = self
            .state
            .living(Faction::Character)
            .map(|(entity, _)| entity);
        let enemies = self
            .state
            .living(Faction::Enemy)
            .filter(|(_, enemy)| {
                self.repo
                    .enemy(&enemy.definition_id)
                    .is_some_and(|def| def.behavior_type == EnemyBehaviorType::Active)
            })
            .map(|(entity, _)| entity);
        characters.chain(enemies).collect()
    }
}
