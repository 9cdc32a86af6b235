/// Simulation constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Wall-clock length of one turn in live play. Millisecond trigger
    /// intervals are mapped onto turn cadence through this value.
    #[cfg_attr(feature = "serde", serde(default = "default_turn_duration"))]
    pub turn_duration_ms: u32,
}

#[cfg(feature = "serde")]
fn default_turn_duration() -> u32 {
    GameConfig::DEFAULT_TURN_DURATION_MS
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_BEHAVIORS_PER_TILE: usize = 4;
    /// Upper bound on ice slide steps; the grid area bounds it in practice.
    pub const MAX_SLIDE_STEPS: usize = 1024;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TURN_DURATION_MS: u32 = 1000;

    pub fn new() -> Self {
        Self {
            turn_duration_ms: Self::DEFAULT_TURN_DURATION_MS,
        }
    }

    pub fn with_turn_duration(turn_duration_ms: u32) -> Self {
        Self { turn_duration_ms }
    }

    /// Number of turns between firings of an interval trigger (at least 1).
    pub fn turns_for_interval(&self, interval_ms: u32) -> u32 {
        let turn = self.turn_duration_ms.max(1);
        let rounded = interval_ms.saturating_add(turn / 2) / turn;
        rounded.max(1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_rounds_to_nearest_turn() {
        let config = GameConfig::with_turn_duration(500);
        assert_eq!(config.turns_for_interval(100), 1);
        assert_eq!(config.turns_for_interval(1000), 2);
        assert_eq!(config.turns_for_interval(1300), 3);
        assert_eq!(GameConfig::with_turn_duration(0).turns_for_interval(0), 1);
        assert_eq!(
            GameConfig::new().turns_for_interval(u32::MAX),
            u32::MAX / 1000
        );
        assert_eq!(GameConfig::with_turn_duration(1).turns_for_interval(u32::MAX), u32::MAX);
    }
}
