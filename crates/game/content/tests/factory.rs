use std::fs;
use std::path::Path;

use puzzle_content::ContentFactory;
use puzzle_core::{
    DefinitionRepository, GameConfig, Position, TileKind, WinCondition, missing_definitions,
    valid_placement_tiles,
};
use tempfile::TempDir;

const CATALOG: &str = r#"(
    characters: [
        (id: "knight", name: "Knight", health: 3, behavior: [Attack(direction: Forward), Repeat]),
    ],
    enemies: [
        (id: "slime", name: "Slime", health: 1),
    ],
)"#;

const PUZZLE: &str = r#"(
    id: "corridor",
    layout: ["...."],
    enemies: [(enemy_id: "slime", position: (x: 3, y: 0))],
    win_conditions: [DefeatAllEnemies],
    available_characters: ["knight"],
    max_characters: 1,
)"#;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write fixture");
}

fn fixture() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "catalog.ron", CATALOG);
    write(dir.path(), "puzzles/corridor.ron", PUZZLE);
    dir
}

#[test]
fn loads_catalog_and_puzzle() {
    let dir = fixture();
    let factory = ContentFactory::new(dir.path());

    let catalog = factory.load_catalog().expect("catalog loads");
    assert!(catalog.character("knight").is_some());

    let puzzle = factory.load_puzzle("corridor").expect("puzzle loads");
    assert_eq!((puzzle.width, puzzle.height), (4, 1));
    assert_eq!(puzzle.win_conditions, vec![WinCondition::DefeatAllEnemies]);
    assert!(missing_definitions(&puzzle, &catalog).is_empty());
}

#[test]
fn missing_config_uses_defaults() {
    let dir = fixture();
    let factory = ContentFactory::new(dir.path());
    assert_eq!(factory.load_config().expect("defaults"), GameConfig::default());

    write(dir.path(), "config.toml", "turn_duration_ms = 500\n");
    assert_eq!(factory.load_config().expect("config loads").turn_duration_ms, 500);
}

#[test]
fn json_puzzles_load_when_no_ron_exists() {
    let dir = fixture();
    let factory = ContentFactory::new(dir.path());
    let puzzle = factory.load_puzzle("corridor").expect("puzzle loads");
    let json = serde_json::to_string_pretty(&puzzle).expect("serialize");
    write(dir.path(), "puzzles/exported.json", &json);

    let exported = factory.load_puzzle("exported").expect("json loads");
    assert_eq!(exported, puzzle);
    assert_eq!(
        factory.list_puzzles().expect("list"),
        vec!["corridor".to_owned(), "exported".to_owned()]
    );
}

#[test]
fn unknown_puzzle_is_an_error() {
    let dir = fixture();
    let factory = ContentFactory::new(dir.path());
    let error = factory.load_puzzle("nowhere").expect_err("missing puzzle");
    assert!(error.to_string().contains("nowhere"));
}

#[test]
fn malformed_catalog_reports_path() {
    let dir = fixture();
    write(dir.path(), "catalog.ron", "(characters: [ (id: 3) ])");
    let factory = ContentFactory::new(dir.path());
    let error = factory.load_catalog().expect_err("bad catalog");
    assert!(error.to_string().contains("catalog.ron"));
}

#[test]
fn shipped_content_is_consistent() {
    let factory = ContentFactory::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"));
    factory.load_config().expect("shipped config");
    let catalog = factory.load_catalog().expect("shipped catalog");

    let names = factory.list_puzzles().expect("shipped puzzles");
    assert_eq!(names, vec!["first_blood".to_owned(), "frozen_gate".to_owned()]);

    for name in names {
        let puzzle = factory.load_puzzle(&name).expect("shipped puzzle");
        assert!(
            missing_definitions(&puzzle, &catalog).is_empty(),
            "{} references unknown definitions",
            name
        );
        assert!(!valid_placement_tiles(&puzzle, &catalog).is_empty());
    }

    let gate = factory.load_puzzle("frozen_gate").expect("frozen gate");
    assert!(gate.has_goal());
    assert_eq!(
        gate.tile(Position::new(4, 1)).map(|tile| tile.kind),
        Some(TileKind::Wall)
    );
}
