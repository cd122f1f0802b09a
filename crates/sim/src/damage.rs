//! Overtemperature damage and the damage control repair teams.

use std::fmt;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::params::PlantParams;
use crate::state::PlantState;

/// What the repair teams did during a day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepairEvent {
    /// Damage reached zero and the teams stood down.
    Complete,
    /// The core was too hot for the teams; they were pulled out.
    Recalled,
}

impl fmt::Display for RepairEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepairEvent::Complete => f.write_str(
                "Repairs on the plant have been completed. Damage control measures deactivated.",
            ),
            RepairEvent::Recalled => f.write_str(
                "WARNING: Core temperatures exceeded 212F. All damage control teams have been recalled for safety.",
            ),
        }
    }
}

/// Result of the operator pressing the damage control button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageControlResponse {
    Activated,
    Deactivated,
    /// Core at or above the repair limit; teams were not sent in.
    RefusedCoreTooHot,
}

impl fmt::Display for DamageControlResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageControlResponse::Activated => f.write_str(
                "Damage control measures activated. Keep core temperatures below 212F for crew safety!",
            ),
            DamageControlResponse::Deactivated => {
                f.write_str("Damage control measures deactivated.")
            }
            DamageControlResponse::RefusedCoreTooHot => f.write_str(
                "Reactor core temperatures are too high to send in the repair crews. Lower temperatures to <212F and try again.",
            ),
        }
    }
}

/// Flip damage control on or off. Teams are only sent into a cool core.
pub fn toggle_damage_control(
    state: &PlantState,
    p: &PlantParams,
) -> (PlantState, DamageControlResponse) {
    let mut next = *state;
    let response = if state.damage_control_active {
        next.damage_control_active = false;
        DamageControlResponse::Deactivated
    } else if state.reactor_temp < p.repair_core_limit_f {
        next.damage_control_active = true;
        DamageControlResponse::Activated
    } else {
        DamageControlResponse::RefusedCoreTooHot
    };
    (next, response)
}

// Half-way values round to even: 75F over a limit is 2 points, 25F is 0.
fn damage_points(excess_f: f64, step_f: f64) -> u32 {
    (excess_f / step_f).round_ties_even() as u32
}

/// Damage accrued this day from the core, exchanger and condenser limits.
pub fn overtemp_damage(state: &PlantState, p: &PlantParams) -> u32 {
    let mut points: u32 = 0;
    if state.reactor_temp > p.core_damage_limit_f {
        points += damage_points(state.reactor_temp - p.core_damage_limit_f, p.damage_step_f)
            .saturating_add(1);
    }
    if state.exchanger_temp > p.exchanger_damage_limit_f {
        points = points.saturating_add(damage_points(
            state.exchanger_temp - p.exchanger_damage_limit_f,
            p.damage_step_f,
        ));
    }
    if state.condenser_temp > p.condenser_damage_limit_f {
        points = points.saturating_add(damage_points(
            state.condenser_temp - p.condenser_damage_limit_f,
            p.damage_step_f,
        ));
    }
    points
}

/// Apply overtemperature damage, then let any active repair teams work.
///
/// Expects the temperatures already produced by [`crate::thermal::step`].
pub fn apply(state: &PlantState, p: &PlantParams) -> (PlantState, Option<RepairEvent>) {
    let mut next = *state;

    let accrued = overtemp_damage(state, p);
    if accrued > 0 {
        next.damage = next.damage.saturating_add(accrued);
        warn!(
            "day {}: plant took {} damage (now {})",
            state.day, accrued, next.damage
        );
    }

    if !next.damage_control_active {
        return (next, None);
    }

    if next.reactor_temp < p.repair_core_limit_f {
        next.damage = next.damage.saturating_sub(p.repair_rate);
        if next.damage == 0 {
            next.damage_control_active = false;
            info!("day {}: repairs complete", state.day);
            return (next, Some(RepairEvent::Complete));
        }
        (next, None)
    } else {
        next.damage_control_active = false;
        warn!(
            "day {}: core at {:.2}F, damage control teams recalled",
            state.day, next.reactor_temp
        );
        (next, Some(RepairEvent::Recalled))
    }
}
