use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Веса для уровня игрока и для очков в турнире.
///
/// Уровень:  (wins*6 + losses*(-10) + draws*2) / total_games
/// Очки:     wins*2 + draws*1 + losses*0
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScoringConfig {
    pub level_win_weight: i64,
    pub level_draw_weight: i64,
    pub level_loss_weight: i64,

    pub tournament_win_points: i64,
    pub tournament_draw_points: i64,
    pub tournament_loss_points: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            level_win_weight: 6,
            level_draw_weight: 2,
            level_loss_weight: -10,
            tournament_win_points: 2,
            tournament_draw_points: 1,
            tournament_loss_points: 0,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScoringConfigError {
    #[error("Invalid scoring config: {0}")]
    Invalid(String),

    #[error("Failed to parse scoring config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ScoringConfig {
    /// Очки в турнире должны строго упорядочивать исходы: победа > ничья >= поражение.
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        if self.tournament_win_points <= self.tournament_draw_points {
            return Err(ScoringConfigError::Invalid(
                "ScoringConfig: tournament_win_points <= tournament_draw_points".into(),
            ));
        }

        if self.tournament_draw_points < self.tournament_loss_points {
            return Err(ScoringConfigError::Invalid(
                "ScoringConfig: tournament_draw_points < tournament_loss_points".into(),
            ));
        }

        if self.tournament_loss_points < 0 {
            return Err(ScoringConfigError::Invalid(
                "ScoringConfig: tournament_loss_points < 0".into(),
            ));
        }

        if self.level_win_weight < self.level_loss_weight {
            return Err(ScoringConfigError::Invalid(
                "ScoringConfig: level_win_weight < level_loss_weight".into(),
            ));
        }

        Ok(())
    }

    /// Загрузить конфиг из JSON. Недостающие поля берутся из `Default`.
    pub fn from_json_str(json: &str) -> Result<Self, ScoringConfigError> {
        let config: ScoringConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Взвешенное среднее по исходам, 0 если партий не было.
    pub fn level(&self, wins: u32, draws: u32, losses: u32) -> f64 {
        let total = u64::from(wins) + u64::from(draws) + u64::from(losses);
        if total == 0 {
            return 0.0;
        }

        let weighted = self.level_win_weight * i64::from(wins)
            + self.level_loss_weight * i64::from(losses)
            + self.level_draw_weight * i64::from(draws);

        weighted as f64 / total as f64
    }
}
