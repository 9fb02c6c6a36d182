use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_LEVEL: u8 = 3;
pub const OPPONENT_WEIGHT: f64 = 1.5;
pub const VICTORY_SCORE: u32 = 5000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Search depth in plies.
    pub level: u8,
    /// Factor applied to the unfavourable side of every heuristic term.
    pub opponent_weight: f64,
    /// Divided by the ply of a decided position to reward early wins.
    pub victory_score: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            opponent_weight: OPPONENT_WEIGHT,
            victory_score: VICTORY_SCORE,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed engine config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level must be at least 1")]
    ZeroLevel,
    #[error("opponent weight must be finite and positive, got {0}")]
    BadWeight(f64),
    #[error("victory score must be at least 1")]
    ZeroVictoryScore,
}

impl EngineConfig {
    /// Parses a (possibly partial) JSON document over the defaults.
    pub fn load_from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level == 0 {
            return Err(ConfigError::ZeroLevel);
        }
        if !self.opponent_weight.is_finite() || self.opponent_weight <= 0.0 {
            return Err(ConfigError::BadWeight(self.opponent_weight));
        }
        if self.victory_score == 0 {
            return Err(ConfigError::ZeroVictoryScore);
        }
        Ok(())
    }
}
