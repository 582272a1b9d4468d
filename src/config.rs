use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed parameters of a single run. The grid is square; `grid_size` is the
/// number of cells along each edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid_size: i16,
    pub initial_length: i16,
    pub food_reward: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_length: 3,
            food_reward: 10,
        }
    }
}

impl GameConfig {
    pub fn with_grid_size(grid_size: i16) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }
}

/// Difficulty only controls how often the driver ticks the simulation.
/// Never persisted; the high-score file records scores, not settings.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn tick_period(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(200),
            Difficulty::Medium => Duration::from_millis(150),
            Difficulty::Hard => Duration::from_millis(100),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_classic_board() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.initial_length, 3);
        assert_eq!(config.food_reward, 10);
    }

    #[test]
    fn harder_difficulties_tick_faster() {
        assert!(Difficulty::Easy.tick_period() > Difficulty::Medium.tick_period());
        assert!(Difficulty::Medium.tick_period() > Difficulty::Hard.tick_period());
    }
}
