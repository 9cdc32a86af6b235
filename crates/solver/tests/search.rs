use puzzle_core::{
    CharacterAction, CharacterDefinition, DefinitionSnapshot, Direction, EnemyDefinition,
    ObjectDefinition, PlacementError, Position, Puzzle, PuzzleBuilder, WinCondition,
};
use solver::{
    CharacterPlacement, SimulationOutcome, SolverError, SolverOptions, SolverResult,
    cancellation, simulate_placement, solve_puzzle, solve_puzzle_async,
};

fn knight(id: &str, facing: Direction, behavior: Vec<CharacterAction>) -> CharacterDefinition {
    CharacterDefinition::new(id, 3, behavior).facing(facing)
}

fn striker(id: &str, facing: Direction) -> CharacterDefinition {
    knight(
        id,
        facing,
        vec![CharacterAction::attack_forward(), CharacterAction::Repeat],
    )
}

/// 3×1 corridor, slime on the east end, one east-facing striker.
fn duel(slime_health: i32) -> (Puzzle, DefinitionSnapshot) {
    let repo = DefinitionSnapshot::new()
        .with_character(striker("knight", Direction::East))
        .with_enemy(EnemyDefinition::stationary("slime", slime_health));
    let puzzle = PuzzleBuilder::new("duel", 3, 1)
        .enemy("slime", Position::new(2, 0))
        .win(WinCondition::DefeatAllEnemies)
        .character("knight")
        .build();
    (puzzle, repo)
}

/// Enemies on both ends of a 4×1 corridor: one striker can only ever kill one.
fn pincer() -> (Puzzle, DefinitionSnapshot) {
    let repo = DefinitionSnapshot::new()
        .with_character(striker("east", Direction::East))
        .with_character(striker("west", Direction::West))
        .with_enemy(EnemyDefinition::stationary("slime", 1));
    let puzzle = PuzzleBuilder::new("pincer", 4, 1)
        .enemy("slime", Position::new(0, 0))
        .enemy("slime", Position::new(3, 0))
        .win(WinCondition::DefeatAllEnemies)
        .character("east")
        .character("west")
        .max_characters(2)
        .build();
    (puzzle, repo)
}

/// A walker that wins from every tile, sooner the closer it starts.
/// The tile next to the slime is covered by a rug, so no first-turn win exists.
fn approach() -> (Puzzle, DefinitionSnapshot) {
    let repo = DefinitionSnapshot::new()
        .with_character(knight(
            "walker",
            Direction::East,
            vec![
                CharacterAction::attack_forward(),
                CharacterAction::forward(),
                CharacterAction::Repeat,
            ],
        ))
        .with_enemy(EnemyDefinition::stationary("slime", 1))
        .with_object(ObjectDefinition {
            id: "rug".into(),
            blocks_movement: false,
            prevents_placement: true,
        });
    let puzzle = PuzzleBuilder::new("approach", 5, 1)
        .enemy("slime", Position::new(4, 0))
        .object("rug", Position::new(3, 0))
        .win(WinCondition::DefeatAllEnemies)
        .character("walker")
        .build();
    (puzzle, repo)
}

fn assert_same_search(left: &SolverResult, right: &SolverResult) {
    assert_eq!(left.solvable, right.solvable);
    assert_eq!(left.min_characters_needed, right.min_characters_needed);
    assert_eq!(left.solution, right.solution);
    assert_eq!(left.combinations_tested, right.combinations_tested);
    assert_eq!(left.error, right.error);
    assert_eq!(left.limit_reached, right.limit_reached);
}

#[test]
fn adjacent_striker_solves_duel_in_one_turn() {
    let (puzzle, repo) = duel(1);
    let result = solve_puzzle(&puzzle, &repo, &SolverOptions::default());

    assert!(result.solvable);
    assert_eq!(result.min_characters_needed, Some(1));
    assert_eq!(result.error, None);
    let solution = result.solution.expect("solution recorded");
    assert_eq!(solution.turns_to_win, 1);
    assert_eq!(
        solution.placements,
        vec![CharacterPlacement {
            character_id: "knight".into(),
            position: Position::new(1, 0),
            facing: Direction::East,
        }]
    );
    assert_eq!(result.combinations_tested, 2);
}

#[test]
fn unkillable_enemy_is_proven_unsolvable() {
    let (puzzle, repo) = duel(1_000);
    let result = solve_puzzle(&puzzle, &repo, &SolverOptions::default());

    assert!(!result.solvable);
    assert!(result.is_proven_unsolvable());
    assert_eq!(result.error, None);
    assert!(!result.limit_reached);
    assert_eq!(result.min_characters_needed, None);
    // Both free tiles, one character.
    assert_eq!(result.combinations_tested, 2);
}

#[test]
fn minimum_character_count_is_reported() {
    let (puzzle, repo) = pincer();
    let result = solve_puzzle(
        &puzzle,
        &repo,
        &SolverOptions::default().with_max_simulation_turns(20),
    );

    assert!(result.solvable);
    assert_eq!(result.min_characters_needed, Some(2));
    // Four single-character candidates fail before the pairs are tried.
    assert_eq!(result.combinations_tested, 6);
    let solution = result.solution.expect("solution recorded");
    assert_eq!(solution.turns_to_win, 1);
    let positions: Vec<(String, Position)> = solution
        .placements
        .iter()
        .map(|placement| (placement.character_id.clone(), placement.position))
        .collect();
    assert_eq!(
        positions,
        vec![
            ("east".to_owned(), Position::new(2, 0)),
            ("west".to_owned(), Position::new(1, 0)),
        ]
    );
}

#[test]
fn find_fastest_keeps_the_quickest_win() {
    let (puzzle, repo) = approach();
    let result = solve_puzzle(&puzzle, &repo, &SolverOptions::default());

    let solution = result.solution.expect("solution recorded");
    assert_eq!(solution.placements[0].position, Position::new(2, 0));
    assert_eq!(solution.turns_to_win, 3);
    assert_eq!(result.combinations_tested, 3);
}

#[test]
fn first_solution_is_returned_without_find_fastest() {
    let (puzzle, repo) = approach();
    let options = SolverOptions::default().with_find_fastest(false);
    let result = solve_puzzle(&puzzle, &repo, &options);

    let solution = result.solution.expect("solution recorded");
    assert_eq!(solution.placements[0].position, Position::ORIGIN);
    assert_eq!(solution.turns_to_win, 7);
    assert_eq!(result.combinations_tested, 1);
}

#[test]
fn solving_leaves_the_puzzle_untouched() {
    let (puzzle, repo) = approach();
    let before = puzzle.clone();
    solve_puzzle(&puzzle, &repo, &SolverOptions::default());
    assert_eq!(puzzle, before);
}

#[test]
fn combination_cap_is_not_unsolvability() {
    let (puzzle, repo) = duel(1_000);
    let options = SolverOptions::default().with_max_combinations(1);
    let result = solve_puzzle(&puzzle, &repo, &options);

    assert!(!result.solvable);
    assert!(result.limit_reached);
    assert!(!result.is_proven_unsolvable());
    assert_eq!(result.error, Some(SolverError::SearchLimitReached { limit: 1 }));
    assert_eq!(result.combinations_tested, 1);
}

#[test]
fn cap_after_a_solution_keeps_the_solution() {
    let (puzzle, repo) = approach();
    let options = SolverOptions::default().with_max_combinations(2);
    let result = solve_puzzle(&puzzle, &repo, &options);

    assert!(result.solvable);
    assert!(result.limit_reached);
    assert_eq!(result.error, None);
    assert_eq!(result.solution.map(|solution| solution.turns_to_win), Some(5));
}

#[test]
fn rejected_placements_are_reported() {
    let (puzzle, repo) = duel(1);
    let outcome = simulate_placement(
        &puzzle,
        &repo,
        &Default::default(),
        &[CharacterPlacement {
            character_id: "ghost".into(),
            position: Position::ORIGIN,
            facing: Direction::East,
        }],
        10,
    );
    assert_eq!(
        outcome,
        SimulationOutcome::Rejected(PlacementError::UnknownCharacter { id: "ghost".into() })
    );
}

#[test]
fn stalled_candidates_time_out() {
    let (puzzle, repo) = duel(1);
    let outcome = simulate_placement(
        &puzzle,
        &repo,
        &Default::default(),
        &[CharacterPlacement {
            character_id: "knight".into(),
            position: Position::ORIGIN,
            facing: Direction::East,
        }],
        10,
    );
    assert_eq!(outcome, SimulationOutcome::Timeout);
}

#[tokio::test]
async fn async_search_matches_blocking_search() {
    let (puzzle, repo) = approach();
    let options = SolverOptions::for_async().with_find_fastest(true).with_yield_every(1);
    let (_handle, token) = cancellation();

    let blocking = solve_puzzle(&puzzle, &repo, &options);
    let cooperative = solve_puzzle_async(&puzzle, &repo, &options, &token).await;
    assert_same_search(&blocking, &cooperative);

    let (puzzle, repo) = pincer();
    let options = SolverOptions::for_async().with_max_simulation_turns(20);
    let blocking = solve_puzzle(&puzzle, &repo, &options);
    let cooperative = solve_puzzle_async(&puzzle, &repo, &options, &token).await;
    assert_same_search(&blocking, &cooperative);
}

#[tokio::test]
async fn async_defaults_stop_at_first_solution() {
    let (puzzle, repo) = approach();
    let options = SolverOptions::for_async();
    assert!(!options.find_fastest);
    let result =
        solve_puzzle_async(&puzzle, &repo, &options, &solver::CancellationToken::never()).await;
    assert_eq!(result.solution.map(|solution| solution.turns_to_win), Some(7));
}

#[tokio::test]
async fn cancelled_search_reports_cancellation() {
    let (puzzle, repo) = duel(1_000);
    let (handle, token) = cancellation();
    handle.cancel();

    let result = solve_puzzle_async(&puzzle, &repo, &SolverOptions::for_async(), &token).await;
    assert!(!result.solvable);
    assert_eq!(result.error, Some(SolverError::Cancelled { tested: 0 }));
    assert_eq!(result.combinations_tested, 0);
}

#[tokio::test]
async fn cancellation_lands_between_candidates() {
    let repo = DefinitionSnapshot::new()
        .with_character(striker("knight", Direction::East))
        .with_enemy(EnemyDefinition::stationary("golem", 1_000));
    let puzzle = PuzzleBuilder::new("long_hall", 12, 1)
        .enemy("golem", Position::new(11, 0))
        .win(WinCondition::DefeatAllEnemies)
        .character("knight")
        .build();
    let options = SolverOptions::for_async()
        .with_max_simulation_turns(10)
        .with_yield_every(1);
    let (handle, token) = cancellation();

    let (result, ()) = tokio::join!(
        solve_puzzle_async(&puzzle, &repo, &options, &token),
        async { handle.cancel() }
    );

    match result.error {
        Some(SolverError::Cancelled { tested }) => {
            assert_eq!(tested, result.combinations_tested);
            assert!(tested < 11);
        }
        other => panic!("expected cancellation, got {:?}", other),
    }
}
