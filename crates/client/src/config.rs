//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Settings shared by every subcommand. Command-line flags override these.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub content_dir: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub max_simulation_turns: Option<u32>,
    pub max_combinations: Option<u64>,
    pub lives: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../game/content/data"
            )),
            log_dir: None,
            max_simulation_turns: None,
            max_combinations: None,
            lives: 3,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_CONTENT_DIR` - Directory holding catalog, config and puzzles
    /// - `TACTICS_LOG_DIR` - Also write logs to a daily file here (default: stderr only)
    /// - `TACTICS_LIVES` - Lives per attempt used for scoring (default: 3)
    /// - `SOLVER_MAX_TURNS` - Turns simulated per candidate
    /// - `SOLVER_MAX_COMBINATIONS` - Candidate cap for one search
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("TACTICS_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        config.log_dir = env::var("TACTICS_LOG_DIR").ok().map(PathBuf::from);
        if let Some(lives) = read_env::<u32>("TACTICS_LIVES") {
            config.lives = lives;
        }
        config.max_simulation_turns = read_env("SOLVER_MAX_TURNS");
        config.max_combinations = read_env("SOLVER_MAX_COMBINATIONS");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
