//! Run lifecycle for the plant: one accepted command advances one day.
//!
//! The controller owns the [`PlantState`]. Callers read snapshots and submit
//! [`TurnCommand`]s; a rejected command leaves the state exactly as it was.

mod config;
mod outcome;

pub use config::{ConfigError, GameConfig, MAX_GAME_LENGTH, MIN_GAME_LENGTH};
pub use outcome::{GameOverReason, RunStatus, RunSummary, TurnOutcome};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use safety::AlarmFlags;
use sim::{
    damage, ControlInputs, DamageControlResponse, InputError, PlantState, RawControls, RepairEvent,
};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("invalid control input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("the run is over ({0:?}); no further turns are accepted")]
    RunOver(GameOverReason),
}

/// Everything the operator submits for one day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCommand {
    pub controls: RawControls,
    /// Press the damage control button before the day runs.
    #[serde(default)]
    pub toggle_damage_control: bool,
    /// End the run now. Honoured even if the control values are invalid.
    #[serde(default)]
    pub request_scram: bool,
}

impl TurnCommand {
    pub fn new(controls: RawControls) -> Self {
        Self {
            controls,
            ..Default::default()
        }
    }

    pub fn with_damage_control_toggle(mut self) -> Self {
        self.toggle_damage_control = true;
        self
    }

    pub fn with_scram(mut self) -> Self {
        self.request_scram = true;
        self
    }
}

/// What the operator sees after a command is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub state: PlantState,
    pub alarms: AlarmFlags,
    pub outcome: TurnOutcome,
    /// Repair team event, reported even when a game over outranks it.
    pub repair: Option<RepairEvent>,
    /// Response to a damage control toggle carried by the command.
    pub damage_control: Option<DamageControlResponse>,
}

#[derive(Clone, Debug)]
pub struct TurnController {
    cfg: GameConfig,
    state: PlantState,
    status: RunStatus,
}

impl TurnController {
    pub fn new(cfg: GameConfig) -> Self {
        Self {
            state: PlantState::new(cfg.game_length()),
            cfg,
            status: RunStatus::Active,
        }
    }

    /// Resume from a saved snapshot. The run length always comes from `cfg`.
    /// A snapshot that is already terminal yields a finished controller.
    pub fn from_state(cfg: GameConfig, mut state: PlantState) -> Self {
        state.game_length = cfg.game_length();
        let status = match terminal_reason(&state, &cfg) {
            Some(reason) => RunStatus::GameOver(reason),
            None => RunStatus::Active,
        };
        Self { cfg, state, status }
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn state(&self) -> &PlantState {
        &self.state
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, RunStatus::GameOver(_))
    }

    /// Annunciator panel for the current state.
    pub fn alarms(&self) -> AlarmFlags {
        safety::evaluate(&self.cfg.alarms, &self.state)
    }

    /// Press the damage control button between days.
    pub fn toggle_damage_control(&mut self) -> Result<DamageControlResponse, TurnError> {
        self.ensure_active()?;
        let (next, response) = damage::toggle_damage_control(&self.state, &self.cfg.plant);
        self.state = next;
        info!("damage control: {response:?}");
        Ok(response)
    }

    /// Operator shutdown. Ends the run without running another day.
    pub fn scram(&mut self) -> Result<TurnReport, TurnError> {
        self.ensure_active()?;
        self.state.scrammed = true;
        self.status = RunStatus::GameOver(GameOverReason::OperatorScram);
        info!("day {}: operator SCRAM", self.state.day);
        Ok(self.report(TurnOutcome::game_over(GameOverReason::OperatorScram), None, None))
    }

    /// Validate and run one day.
    pub fn submit(&mut self, cmd: TurnCommand) -> Result<TurnReport, TurnError> {
        self.ensure_active()?;
        if cmd.request_scram {
            return self.scram();
        }
        let controls = ControlInputs::try_from(cmd.controls)?;

        let p = &self.cfg.plant;
        let mut next = self.state;
        let dc_response = if cmd.toggle_damage_control {
            let (toggled, response) = damage::toggle_damage_control(&next, p);
            next = toggled;
            Some(response)
        } else {
            None
        };

        let (mut next, repair) = sim::advance(&next, controls, p);
        next.total_output += next.daily_output;
        next.day += 1;

        debug!(
            "day {} accepted: damage {}, fuel {:.2}%, total {:.3} MWe",
            self.state.day, next.damage, next.fuel, next.total_output
        );

        let outcome = match terminal_reason(&next, &self.cfg) {
            Some(reason) => {
                self.status = RunStatus::GameOver(reason);
                info!("game over after day {}: {reason:?}", self.state.day);
                TurnOutcome::game_over(reason)
            }
            None => match repair {
                Some(RepairEvent::Complete) => TurnOutcome::RepairsComplete,
                Some(RepairEvent::Recalled) => TurnOutcome::DamageControlRecalled,
                None => TurnOutcome::Continue,
            },
        };

        self.state = next;
        Ok(self.report(outcome, repair, dc_response))
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            days_played: self.state.day.saturating_sub(1),
            total_output: self.state.total_output,
            final_damage: self.state.damage,
            fuel_remaining: self.state.fuel,
            end_reason: match self.status {
                RunStatus::GameOver(reason) => Some(reason),
                RunStatus::Active => None,
            },
        }
    }

    fn ensure_active(&self) -> Result<(), TurnError> {
        match self.status {
            RunStatus::Active => Ok(()),
            RunStatus::GameOver(reason) => Err(TurnError::RunOver(reason)),
        }
    }

    fn report(
        &self,
        outcome: TurnOutcome,
        repair: Option<RepairEvent>,
        damage_control: Option<DamageControlResponse>,
    ) -> TurnReport {
        TurnReport {
            state: self.state,
            alarms: self.alarms(),
            outcome,
            repair,
            damage_control,
        }
    }
}

/// Destruction outranks the day limit when both land on the same day.
fn terminal_reason(state: &PlantState, cfg: &GameConfig) -> Option<GameOverReason> {
    if state.scrammed {
        Some(GameOverReason::OperatorScram)
    } else if state.damage >= cfg.plant.destroyed_at_damage {
        Some(GameOverReason::PlantDestroyed)
    } else if state.day > cfg.game_length() {
        Some(GameOverReason::DayLimitReached)
    } else {
        None
    }
}
