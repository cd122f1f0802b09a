use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    DayLimitReached,
    PlantDestroyed,
    OperatorScram,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::DayLimitReached => {
                f.write_str("GAME OVER: Your days are up. Let's see how you did.")
            }
            GameOverReason::PlantDestroyed => f.write_str(
                "GAME OVER: You have destroyed the plant. Nearby gas turbine generators will take up \
                 the grid load, but thousands of families have been forced to evacuate the area.",
            ),
            GameOverReason::OperatorScram => {
                f.write_str("GAME OVER: The reactor has been SCRAMmed by the operator.")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Active,
    GameOver(GameOverReason),
}

/// Signal returned with every accepted turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Continue,
    RepairsComplete,
    DamageControlRecalled,
    GameOver { reason: GameOverReason },
}

impl TurnOutcome {
    pub fn game_over(reason: GameOverReason) -> Self {
        TurnOutcome::GameOver { reason }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, TurnOutcome::GameOver { .. })
    }
}

impl fmt::Display for TurnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnOutcome::Continue => f.write_str("Plant operating."),
            TurnOutcome::RepairsComplete => fmt::Display::fmt(&sim::RepairEvent::Complete, f),
            TurnOutcome::DamageControlRecalled => {
                fmt::Display::fmt(&sim::RepairEvent::Recalled, f)
            }
            TurnOutcome::GameOver { reason } => fmt::Display::fmt(reason, f),
        }
    }
}

/// End-of-run statistics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub days_played: u32,
    pub total_output: f64,
    pub final_damage: u32,
    pub fuel_remaining: f64,
    /// `None` while the run is still going.
    pub end_reason: Option<GameOverReason>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Days played:     {}", self.days_played)?;
        writeln!(f, "Total output:    {:.3} MWe", self.total_output)?;
        writeln!(f, "Final damage:    {} %", self.final_damage)?;
        write!(f, "Fuel remaining:  {:.2} %", self.fuel_remaining)
    }
}
