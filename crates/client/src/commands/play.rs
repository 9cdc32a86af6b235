use std::str::FromStr;

use anyhow::{Result, anyhow};
use clap::Parser;
use puzzle_core::{
    Direction, GameEngine, GameError, GameState, GameStatus, PlacementError, Position, TurnEvent,
    calculate_score,
};

use super::load;
use crate::config::ClientConfig;
use crate::share::format_share_line;

/// Play a puzzle with a fixed placement and print the result
#[derive(Parser, Debug)]
pub struct Play {
    /// Puzzle name (file stem under puzzles/)
    pub puzzle: String,

    /// Placement as `id@x,y` or `id@x,y:facing`; repeat for more characters
    #[arg(long = "place", required = true)]
    pub placements: Vec<PlacementArg>,

    /// Stop after this many turns if the game has not ended
    #[arg(long, default_value_t = 100)]
    pub turns: u32,

    /// Lives already spent on this puzzle, for scoring
    #[arg(long, default_value_t = 0)]
    pub lives_lost: u32,

    /// Print every event, not just the turn summary
    #[arg(long)]
    pub events: bool,
}

/// `id@x,y[:facing]` parsed from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementArg {
    pub character_id: String,
    pub position: Position,
    pub facing: Option<Direction>,
}

impl FromStr for PlacementArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (character_id, rest) = s
            .split_once('@')
            .ok_or_else(|| format!("expected id@x,y[:facing], got '{}'", s))?;
        let (coords, facing) = match rest.split_once(':') {
            Some((coords, facing)) => (coords, Some(facing)),
            None => (rest, None),
        };
        let (x, y) = coords
            .split_once(',')
            .ok_or_else(|| format!("expected x,y coordinates, got '{}'", coords))?;
        let x = x.trim().parse::<i32>().map_err(|e| format!("bad x '{}': {}", x, e))?;
        let y = y.trim().parse::<i32>().map_err(|e| format!("bad y '{}': {}", y, e))?;
        let facing = facing
            .map(|name| {
                Direction::from_str(name.trim()).map_err(|_| format!("unknown facing '{}'", name))
            })
            .transpose()?;
        Ok(Self {
            character_id: character_id.trim().to_owned(),
            position: Position::new(x, y),
            facing,
        })
    }
}

impl Play {
    pub fn execute(self, config: &ClientConfig) -> Result<()> {
        let loaded = load(config, &self.puzzle)?;
        let repo = &loaded.catalog;

        let mut state = GameState::new(&loaded.puzzle, repo).with_config(loaded.game_config);
        for placement in &self.placements {
            state
                .place_character(repo, &placement.character_id, placement.position, placement.facing)
                .map_err(|error| placement_failure(&placement.character_id, &error))?;
        }

        let mut engine = GameEngine::new(&mut state, repo);
        for _ in 0..self.turns {
            let status = engine.execute_turn();
            let state = engine.state();
            println!(
                "turn {:>3}: {} ({} event(s))",
                state.current_turn,
                status,
                state.events.len()
            );
            if self.events {
                for event in &state.events {
                    println!("    {}", describe(event));
                }
            }
            if status.is_terminal() {
                break;
            }
        }

        match state.status {
            GameStatus::Victory => {
                let lives_remaining = config.lives.saturating_sub(self.lives_lost);
                let score = calculate_score(&state, lives_remaining, config.lives);
                println!("{}", format_share_line(&state.puzzle.name, &score));
                if !score.completed_side_quests.is_empty() {
                    println!("side quests: {}", score.completed_side_quests.join(", "));
                }
            }
            GameStatus::Defeat => println!("Defeat on turn {}", state.current_turn),
            GameStatus::Setup | GameStatus::Running => {
                println!("Still running after {} turns", state.current_turn)
            }
        }
        Ok(())
    }
}

/// Tags a placement error with its code; recoverable ones hint at a retry.
fn placement_failure(character_id: &str, error: &PlacementError) -> anyhow::Error {
    let hint = if error.severity().is_recoverable() {
        " (choose another tile)"
    } else {
        ""
    };
    anyhow!(
        "placing {}: {} [{}]{}",
        character_id,
        error,
        error.error_code(),
        hint
    )
}

fn describe(event: &TurnEvent) -> String {
    match event {
        TurnEvent::Moved { entity, from, to } => format!("{} moved {} -> {}", entity, from, to),
        TurnEvent::Turned { entity, facing } => format!("{} turned {}", entity, facing),
        TurnEvent::Bumped { entity, at } => format!("{} bumped into {}", entity, at),
        TurnEvent::Attacked { entity, tiles } => format!("{} attacked {:?}", entity, tiles),
        TurnEvent::SpellCast {
            entity,
            spell,
            tiles,
        } => format!("{} cast {} on {:?}", entity, spell, tiles),
        TurnEvent::Projectile { entity, path } => {
            format!("{} projectile over {} tile(s)", entity, path.len())
        }
        TurnEvent::Damaged {
            entity,
            amount,
            health,
        } => format!("{} took {} damage ({} left)", entity, amount, health),
        TurnEvent::Healed {
            entity,
            amount,
            health,
        } => format!("{} healed {} ({} now)", entity, amount, health),
        TurnEvent::Died { entity } => format!("{} died", entity),
        TurnEvent::Teleported { entity, from, to } => {
            format!("{} teleported {} -> {}", entity, from, to)
        }
        TurnEvent::Slid { entity, from, to } => format!("{} slid {} -> {}", entity, from, to),
        TurnEvent::Collected {
            entity,
            collectible,
        } => format!("{} collected item #{}", entity, collectible),
        TurnEvent::PlatePressed { at } => format!("plate at {} pressed", at),
        TurnEvent::PlateReleased { at } => format!("plate at {} released", at),
        TurnEvent::WallToggled { at } => format!("wall at {} toggled", at),
        TurnEvent::GroupToggled { group } => format!("group '{}' toggled", group),
        TurnEvent::EnemySpawned { entity } => format!("{} spawned", entity),
        TurnEvent::EnemyDespawned { entity } => format!("{} despawned", entity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_placement_with_facing() {
        let arg: PlacementArg = "knight@3,1:west".parse().expect("valid placement");
        assert_eq!(arg.character_id, "knight");
        assert_eq!(arg.position, Position::new(3, 1));
        assert_eq!(arg.facing, Some(Direction::West));
    }

    #[test]
    fn facing_is_optional() {
        let arg: PlacementArg = "mage@0,2".parse().expect("valid placement");
        assert_eq!(arg.facing, None);
    }

    #[test]
    fn placement_failures_carry_error_codes() {
        let occupied = PlacementError::Occupied {
            position: Position::new(1, 0),
        };
        assert_eq!(
            placement_failure("knight", &occupied).to_string(),
            "placing knight: tile (1, 0) is already occupied [PLACEMENT_OCCUPIED] (choose another tile)"
        );

        let unknown = PlacementError::UnknownCharacter { id: "ghost".into() };
        assert_eq!(
            placement_failure("ghost", &unknown).to_string(),
            "placing ghost: character 'ghost' has no definition [PLACEMENT_UNKNOWN_CHARACTER]"
        );
    }

    #[test]
    fn rejects_malformed_placements() {
        assert!("knight".parse::<PlacementArg>().is_err());
        assert!("knight@3".parse::<PlacementArg>().is_err());
        assert!("knight@a,1".parse::<PlacementArg>().is_err());
        assert!("knight@1,1:up".parse::<PlacementArg>().is_err());
    }
}
