use serde::Serialize;
use thiserror::Error;

use safety::AlarmConfig;
use sim::{PlantParams, DEFAULT_GAME_LENGTH};

pub const MIN_GAME_LENGTH: u32 = 5;
pub const MAX_GAME_LENGTH: u32 = 150;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("game length must be between 5 and 150 days, got {0}")]
    GameLength(u32),
}

/// Fixed for the whole run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GameConfig {
    game_length: u32,
    pub plant: PlantParams,
    pub alarms: AlarmConfig,
}

impl GameConfig {
    pub fn new(game_length: u32) -> Result<Self, ConfigError> {
        if !(MIN_GAME_LENGTH..=MAX_GAME_LENGTH).contains(&game_length) {
            return Err(ConfigError::GameLength(game_length));
        }
        Ok(Self {
            game_length,
            ..Default::default()
        })
    }

    pub fn game_length(&self) -> u32 {
        self.game_length
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_length: DEFAULT_GAME_LENGTH,
            plant: PlantParams::default(),
            alarms: AlarmConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_length_bounds() {
        assert_eq!(GameConfig::default().game_length(), 100);
        assert_eq!(GameConfig::new(5).unwrap().game_length(), 5);
        assert_eq!(GameConfig::new(150).unwrap().game_length(), 150);
        assert_eq!(GameConfig::new(4), Err(ConfigError::GameLength(4)));
        assert_eq!(GameConfig::new(151), Err(ConfigError::GameLength(151)));
    }
}
