use puzzle_core::{
    Cadence, CharacterAction, CharacterDefinition, DefinitionSnapshot, Direction,
    EnemyDefinition, GameState, GameStatus, PlateEffect, Position, Puzzle, PuzzleBuilder,
    RelativeDirection, Tile, TileBehavior, WallPolicy, WinCondition, execute_turn,
};

fn walker(id: &str, health: i32, program: Vec<CharacterAction>) -> DefinitionSnapshot {
    DefinitionSnapshot::new()
        .with_character(CharacterDefinition::new(id, health, program))
        .with_enemy(EnemyDefinition::stationary("slime", 5))
}

fn start(puzzle: &Puzzle, repo: &DefinitionSnapshot, at: Position, facing: Direction) -> GameState {
    let mut state = GameState::new(puzzle, repo).headless(true);
    let id = puzzle.available_characters[0].clone();
    state
        .place_character(repo, &id, at, Some(facing))
        .expect("placement should succeed");
    state
}

fn turns(state: &mut GameState, repo: &DefinitionSnapshot, count: u32) -> GameStatus {
    for _ in 0..count {
        execute_turn(state, repo);
    }
    state.status
}

fn with(behavior: TileBehavior) -> Option<Tile> {
    Some(Tile::empty().with_behavior(behavior))
}

#[test]
fn ice_slide_stops_at_grid_boundary() {
    let repo = walker("skater", 3, vec![CharacterAction::forward()]);
    let mut builder = PuzzleBuilder::new("rink", 5, 1)
        .win(WinCondition::SurviveTurns { turns: 100 })
        .character("skater");
    for x in 1..5 {
        builder = builder.tile(Position::new(x, 0), with(TileBehavior::Ice));
    }
    let puzzle = builder.build();
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    assert_eq!(turns(&mut state, &repo, 1), GameStatus::Running);
    assert_eq!(state.characters[0].position, Position::new(4, 0));
}

#[test]
fn ice_slide_stops_before_walls() {
    let repo = walker("skater", 3, vec![CharacterAction::forward()]);
    let puzzle = PuzzleBuilder::new("rink", 5, 1)
        .tile(Position::new(1, 0), with(TileBehavior::Ice))
        .wall(Position::new(3, 0))
        .win(WinCondition::SurviveTurns { turns: 100 })
        .character("skater")
        .build();
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 1);
    assert_eq!(state.characters[0].position, Position::new(2, 0));
}

fn teleport_puzzle(blocked: bool) -> Puzzle {
    let pad = || with(TileBehavior::Teleport { group: "a".into() });
    let mut builder = PuzzleBuilder::new("portals", 4, 3)
        .tile(Position::new(1, 0), pad())
        .tile(Position::new(3, 0), pad())
        .tile(Position::new(0, 2), pad())
        .win(WinCondition::SurviveTurns { turns: 100 })
        .character("hopper");
    if blocked {
        builder = builder.enemy("slime", Position::new(3, 0));
    }
    builder.build()
}

#[test]
fn teleport_picks_next_member_in_scan_order() {
    let repo = walker("hopper", 3, vec![CharacterAction::forward()]);
    let puzzle = teleport_puzzle(false);
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 1);
    assert_eq!(state.characters[0].position, Position::new(3, 0));
}

#[test]
fn teleport_skips_occupied_members() {
    let repo = walker("hopper", 3, vec![CharacterAction::forward()]);
    let puzzle = teleport_puzzle(true);
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 1);
    assert_eq!(state.characters[0].position, Position::new(0, 2));
}

#[test]
fn bare_teleport_pads_share_the_unnamed_group() {
    let repo = walker("hopper", 3, vec![CharacterAction::forward()]);
    let puzzle = PuzzleBuilder::new("pads", 3, 2)
        .tile(Position::new(1, 0), Some(Tile::new(puzzle_core::TileKind::Teleport)))
        .tile(Position::new(2, 1), Some(Tile::new(puzzle_core::TileKind::Teleport)))
        .win(WinCondition::SurviveTurns { turns: 100 })
        .character("hopper")
        .build();
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 1);
    assert_eq!(state.characters[0].position, Position::new(2, 1));
}

#[test]
fn direction_change_redirects_facing() {
    let repo = walker(
        "runner",
        3,
        vec![CharacterAction::forward(), CharacterAction::forward()],
    );
    let puzzle = PuzzleBuilder::new("arrows", 3, 3)
        .tile(
            Position::new(1, 0),
            with(TileBehavior::DirectionChange {
                direction: Direction::South,
            }),
        )
        .win(WinCondition::SurviveTurns { turns: 100 })
        .character("runner")
        .build();
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 1);
    assert_eq!(state.characters[0].facing, Direction::South);
    turns(&mut state, &repo, 1);
    assert_eq!(state.characters[0].position, Position::new(1, 1));
}

#[test]
fn damage_once_burns_each_entity_a_single_time() {
    let program = vec![
        CharacterAction::forward(),
        CharacterAction::Wait,
        CharacterAction::Wait,
    ];
    let repo = walker("knight", 3, program);
    let puzzle = PuzzleBuilder::new("embers", 3, 1)
        .tile(
            Position::new(1, 0),
            with(TileBehavior::Damage {
                amount: 1,
                once: true,
            }),
        )
        .win(WinCondition::SurviveTurns { turns: 100 })
        .character("knight")
        .build();
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 3);
    assert_eq!(state.characters[0].health, 2);
    assert_eq!(state.stats.damage_taken, 1);
}

#[test]
fn damage_tile_burns_every_turn_without_once() {
    let program = vec![
        CharacterAction::forward(),
        CharacterAction::Wait,
        CharacterAction::Wait,
    ];
    let repo = walker("knight", 3, program);
    let puzzle = PuzzleBuilder::new("lava", 3, 1)
        .tile(
            Position::new(1, 0),
            with(TileBehavior::Damage {
                amount: 1,
                once: false,
            }),
        )
        .win(WinCondition::SurviveTurns { turns: 100 })
        .character("knight")
        .build();
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    assert_eq!(turns(&mut state, &repo, 3), GameStatus::Defeat);
    assert_eq!(state.stats.character_deaths, 1);
}

#[test]
fn cadence_gates_tile_behaviors() {
    let repo = walker("knight", 3, vec![CharacterAction::Wait; 3]);
    let puzzle = PuzzleBuilder::new("vents", 2, 1)
        .tile(
            Position::ORIGIN,
            Some(
                Tile::empty()
                    .with_behavior(TileBehavior::Damage {
                        amount: 1,
                        once: false,
                    })
                    .with_cadence(Cadence::Alternating { starts_on: false }),
            ),
        )
        .win(WinCondition::SurviveTurns { turns: 100 })
        .character("knight")
        .build();
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 3);
    assert_eq!(state.characters[0].health, 2);
}

fn plate_puzzle(stay_pressed: bool) -> Puzzle {
    PuzzleBuilder::new("plates", 3, 2)
        .tile(
            Position::new(1, 0),
            with(TileBehavior::PressurePlate {
                effects: vec![PlateEffect::ToggleWall {
                    at: Position::new(1, 1),
                }],
                stay_pressed,
            }),
        )
        .win(WinCondition::SurviveTurns { turns: 100 })
        .character("runner")
        .build()
}

#[test]
fn held_plate_reverts_when_released() {
    let repo = walker(
        "runner",
        3,
        vec![CharacterAction::forward(), CharacterAction::forward()],
    );
    let puzzle = plate_puzzle(true);
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 1);
    assert!(state.is_wall(Position::new(1, 1)));
    turns(&mut state, &repo, 1);
    assert!(!state.is_wall(Position::new(1, 1)));
}

#[test]
fn latching_plate_keeps_its_effect() {
    let repo = walker(
        "runner",
        3,
        vec![CharacterAction::forward(), CharacterAction::forward()],
    );
    let puzzle = plate_puzzle(false);
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 2);
    assert!(state.is_wall(Position::new(1, 1)));
}

#[test]
fn plate_opens_gate_group() {
    let repo = walker(
        "runner",
        3,
        vec![
            CharacterAction::forward(),
            CharacterAction::Move {
                direction: RelativeDirection::Backward,
                tiles: 1,
                on_wall: WallPolicy::Stop,
            },
            CharacterAction::Move {
                direction: RelativeDirection::Left,
                tiles: 2,
                on_wall: WallPolicy::Stop,
            },
        ],
    );
    let puzzle = PuzzleBuilder::new("gate", 3, 2)
        .tile(Position::new(1, 0), Some(Tile::wall().in_group("gate", true)))
        .tile(Position::new(2, 0), Some(Tile::goal()))
        .tile(
            Position::new(0, 1),
            with(TileBehavior::PressurePlate {
                effects: vec![PlateEffect::ToggleTriggerGroup {
                    group: "gate".into(),
                }],
                stay_pressed: false,
            }),
        )
        .win(WinCondition::ReachGoal)
        .character("runner")
        .build();
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::South);

    assert!(state.is_wall(Position::new(1, 0)));
    assert_eq!(turns(&mut state, &repo, 3), GameStatus::Victory);
    assert_eq!(state.current_turn, 3);
}

#[test]
fn plate_spawns_dormant_enemy() {
    let repo = walker("runner", 3, vec![CharacterAction::forward()]);
    let puzzle = PuzzleBuilder::new("trap", 3, 1)
        .tile(
            Position::new(1, 0),
            with(TileBehavior::PressurePlate {
                effects: vec![PlateEffect::SpawnEnemy {
                    at: Position::new(2, 0),
                }],
                stay_pressed: false,
            }),
        )
        .dormant_enemy("slime", Position::new(2, 0))
        .win(WinCondition::DefeatAllEnemies)
        .character("runner")
        .build();
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    assert_eq!(turns(&mut state, &repo, 1), GameStatus::Running);
    assert!(state.enemies[0].is_alive());
}

#[test]
fn crossing_a_damage_tile_mid_move_does_not_burn() {
    let repo = walker(
        "knight",
        3,
        vec![CharacterAction::Move {
            direction: RelativeDirection::Forward,
            tiles: 2,
            on_wall: WallPolicy::Stop,
        }],
    );
    let puzzle = PuzzleBuilder::new("embers", 4, 1)
        .tile(
            Position::new(1, 0),
            with(TileBehavior::Damage {
                amount: 1,
                once: false,
            }),
        )
        .win(WinCondition::SurviveTurns { turns: 100 })
        .character("knight")
        .build();
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 1);
    assert_eq!(state.characters[0].position, Position::new(2, 0));
    assert_eq!(state.characters[0].health, 3);
    assert_eq!(state.stats.damage_taken, 0);
}

#[test]
fn sliding_over_a_damage_tile_does_not_burn() {
    let repo = walker("skater", 3, vec![CharacterAction::forward()]);
    let puzzle = PuzzleBuilder::new("rink", 4, 1)
        .tile(Position::new(1, 0), with(TileBehavior::Ice))
        .tile(
            Position::new(2, 0),
            with(TileBehavior::Damage {
                amount: 1,
                once: false,
            }),
        )
        .win(WinCondition::SurviveTurns { turns: 100 })
        .character("skater")
        .build();
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 1);
    assert_eq!(state.characters[0].position, Position::new(3, 0));
    assert_eq!(state.characters[0].health, 3);
}

#[test]
fn teleport_arrival_does_not_trigger_the_destination() {
    let repo = walker("hopper", 3, vec![CharacterAction::forward()]);
    let arrival = Tile::empty()
        .with_behavior(TileBehavior::Teleport { group: "a".into() })
        .with_behavior(TileBehavior::DirectionChange {
            direction: Direction::South,
        });
    let puzzle = PuzzleBuilder::new("portals", 5, 2)
        .tile(
            Position::new(1, 0),
            with(TileBehavior::Teleport { group: "a".into() }),
        )
        .tile(Position::new(3, 0), Some(arrival))
        .win(WinCondition::SurviveTurns { turns: 100 })
        .character("hopper")
        .build();
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 2);
    assert_eq!(state.characters[0].position, Position::new(3, 0));
    assert_eq!(state.characters[0].facing, Direction::East);
}

fn vent(cadence: Cadence) -> Puzzle {
    PuzzleBuilder::new("vents", 2, 1)
        .tile(
            Position::ORIGIN,
            Some(
                Tile::empty()
                    .with_behavior(TileBehavior::Damage {
                        amount: 1,
                        once: false,
                    })
                    .with_cadence(cadence),
            ),
        )
        .win(WinCondition::SurviveTurns { turns: 100 })
        .character("knight")
        .build()
}

#[test]
fn pattern_cadence_repeats_through_turns() {
    let repo = walker("knight", 5, vec![CharacterAction::Wait]);
    let puzzle = vent(Cadence::Pattern(vec![true, false, false]));
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 1);
    assert_eq!(state.characters[0].health, 4);
    turns(&mut state, &repo, 2);
    assert_eq!(state.characters[0].health, 4);
    turns(&mut state, &repo, 1);
    assert_eq!(state.characters[0].health, 3);
}

#[test]
fn interval_cadence_honors_offset() {
    let repo = walker("knight", 5, vec![CharacterAction::Wait]);
    let puzzle = vent(Cadence::Interval {
        on_turns: 1,
        off_turns: 2,
        offset: 1,
    });
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 2);
    assert_eq!(state.characters[0].health, 5);
    turns(&mut state, &repo, 1);
    assert_eq!(state.characters[0].health, 4);
    turns(&mut state, &repo, 3);
    assert_eq!(state.characters[0].health, 3);
}

#[test]
fn plate_teleports_its_occupant_and_release_keeps_it_there() {
    let repo = walker("runner", 3, vec![CharacterAction::forward()]);
    let puzzle = PuzzleBuilder::new("lift", 3, 2)
        .tile(
            Position::new(1, 0),
            with(TileBehavior::PressurePlate {
                effects: vec![PlateEffect::Teleport {
                    to: Position::new(2, 1),
                }],
                stay_pressed: true,
            }),
        )
        .win(WinCondition::SurviveTurns { turns: 100 })
        .character("runner")
        .build();
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 1);
    assert_eq!(state.characters[0].position, Position::new(2, 1));
    assert!(state.board.pressed_plates.contains(&Position::new(1, 0)));

    turns(&mut state, &repo, 1);
    assert_eq!(state.characters[0].position, Position::new(2, 1));
    assert!(state.board.pressed_plates.is_empty());
}

fn despawn_puzzle(stay_pressed: bool) -> Puzzle {
    PuzzleBuilder::new("lure", 4, 1)
        .tile(
            Position::new(1, 0),
            with(TileBehavior::PressurePlate {
                effects: vec![PlateEffect::DespawnEnemy {
                    at: Position::new(3, 0),
                }],
                stay_pressed,
            }),
        )
        .enemy("slime", Position::new(3, 0))
        .win(WinCondition::SurviveTurns { turns: 100 })
        .character("runner")
        .build()
}

fn step_on_and_off() -> Vec<CharacterAction> {
    vec![
        CharacterAction::forward(),
        CharacterAction::Move {
            direction: RelativeDirection::Backward,
            tiles: 1,
            on_wall: WallPolicy::Stop,
        },
    ]
}

#[test]
fn held_despawn_plate_restores_the_enemy_on_release() {
    let repo = walker("runner", 3, step_on_and_off());
    let puzzle = despawn_puzzle(true);
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 1);
    assert!(!state.enemies[0].is_alive());
    assert!(state.cell(Position::new(3, 0)).is_free());

    turns(&mut state, &repo, 1);
    assert_eq!(state.characters[0].position, Position::ORIGIN);
    assert!(state.enemies[0].is_alive());
}

#[test]
fn latching_despawn_plate_keeps_the_enemy_away() {
    let repo = walker("runner", 3, step_on_and_off());
    let puzzle = despawn_puzzle(false);
    let mut state = start(&puzzle, &repo, Position::ORIGIN, Direction::East);

    turns(&mut state, &repo, 2);
    assert_eq!(state.characters[0].position, Position::ORIGIN);
    assert!(!state.enemies[0].is_alive());
    assert!(!state.enemies[0].dead);
}
