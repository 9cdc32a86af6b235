use puzzle_core::GameConfig;

/// Search bounds and tuning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverOptions {
    /// Turns simulated per candidate before it counts as a timeout.
    pub max_simulation_turns: u32,
    /// Hard cap on candidates tested across the whole search.
    pub max_combinations: u64,
    /// Keep scanning the minimum character count for a quicker win.
    pub find_fastest: bool,
    /// The async driver yields to the scheduler after this many candidates.
    pub yield_every: u64,
    /// Engine configuration installed into every candidate state.
    pub game_config: GameConfig,
}

impl SolverOptions {
    pub const DEFAULT_MAX_SIMULATION_TURNS: u32 = 200;
    pub const DEFAULT_MAX_COMBINATIONS: u64 = 100_000;
    pub const DEFAULT_YIELD_EVERY: u64 = 50;

    /// Defaults for the blocking solver: scan for the fastest solution.
    pub fn new() -> Self {
        Self {
            max_simulation_turns: Self::DEFAULT_MAX_SIMULATION_TURNS,
            max_combinations: Self::DEFAULT_MAX_COMBINATIONS,
            find_fastest: true,
            yield_every: Self::DEFAULT_YIELD_EVERY,
            game_config: GameConfig::default(),
        }
    }

    /// Defaults for the async solver: stop at the first solution.
    pub fn for_async() -> Self {
        Self {
            find_fastest: false,
            ..Self::new()
        }
    }

    pub fn with_max_simulation_turns(mut self, turns: u32) -> Self {
        self.max_simulation_turns = turns;
        self
    }

    pub fn with_max_combinations(mut self, limit: u64) -> Self {
        self.max_combinations = limit;
        self
    }

    pub fn with_find_fastest(mut self, find_fastest: bool) -> Self {
        self.find_fastest = find_fastest;
        self
    }

    pub fn with_yield_every(mut self, every: u64) -> Self {
        self.yield_every = every;
        self
    }

    pub fn with_game_config(mut self, config: GameConfig) -> Self {
        self.game_config = config;
        self
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self::new()
    }
}
