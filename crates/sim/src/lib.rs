//! Day-by-day model of a small pressurized water reactor plant.
//!
//! The model is a tunable arithmetic approximation, not reactor physics.
//! A day is computed in two stages: [`thermal::step`] moves heat through the
//! core, exchangers and condensers, then [`damage::apply`] books overtemperature
//! damage and runs the repair teams. Both take a state by reference and
//! return the next one.

pub mod damage;
pub mod input;
pub mod params;
pub mod state;
pub mod thermal;

pub use damage::{DamageControlResponse, RepairEvent};
pub use input::{Control, ControlInputs, InputError, RawControls, CONTROL_MAX};
pub use params::PlantParams;
pub use state::{PlantState, DEFAULT_GAME_LENGTH};

/// Both model stages for one day, without totals or the day counter.
pub fn advance(
    state: &PlantState,
    controls: ControlInputs,
    p: &PlantParams,
) -> (PlantState, Option<RepairEvent>) {
    let heated = thermal::step(state, controls, p);
    damage::apply(&heated, p)
}
