use serde::{Deserialize, Serialize};

use crate::input::ControlInputs;

pub const DEFAULT_GAME_LENGTH: u32 = 100;

/// Everything the plant carries from one day to the next.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantState {
    /// Settings the operator applied for the most recent day.
    pub controls: ControlInputs,
    /// °F, never below the core ambient.
    pub reactor_temp: f64,
    /// °F, never below the loop ambient.
    pub exchanger_temp: f64,
    /// °F, never below the loop ambient.
    pub condenser_temp: f64,
    pub damage: u32,
    /// Percent remaining. Not floored: it keeps falling past zero.
    pub fuel: f64,
    /// MWe generated on the most recent day.
    pub daily_output: f64,
    /// MWe generated over the whole run.
    pub total_output: f64,
    pub day: u32,
    pub game_length: u32,
    pub damage_control_active: bool,
    pub scrammed: bool,
}

impl PlantState {
    /// A cold plant with fresh fuel on day 1.
    pub fn new(game_length: u32) -> Self {
        Self {
            controls: ControlInputs::default(),
            reactor_temp: 70.0,
            exchanger_temp: 80.0,
            condenser_temp: 80.0,
            damage: 0,
            fuel: 100.0,
            daily_output: 0.0,
            total_output: 0.0,
            day: 1,
            game_length,
            damage_control_active: false,
            scrammed: false,
        }
    }
}

impl Default for PlantState {
    fn default() -> Self {
        Self::new(DEFAULT_GAME_LENGTH)
    }
}
