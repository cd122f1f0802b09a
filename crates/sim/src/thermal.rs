//! Heat flow from core to exchanger to condenser for a single day.

use log::debug;

use crate::input::ControlInputs;
use crate::params::PlantParams;
use crate::state::PlantState;

/// Linear remap of `v` from `[in_min, in_max]` onto `[out_min, out_max]`.
/// Values outside the input range extrapolate.
pub fn map_range(v: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (v - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Core temperature change from reactivity alone, before coolant flow.
///
/// The current temperature scales the whole term, so a hot core heats
/// (or cools) faster than a cold one.
pub fn reactivity_delta(state: &PlantState, controls: &ControlInputs, p: &PlantParams) -> f64 {
    if controls.rod_position() > 0 {
        let rods = map_range(
            f64::from(controls.rod_position()),
            0.0,
            100.0,
            p.rod_span.0,
            p.rod_span.1,
        );
        let fuel = map_range(state.fuel, 0.0, 100.0, p.fuel_span.0, p.fuel_span.1);
        (state.reactor_temp / p.reference_core_f) * (rods + fuel + f64::from(state.damage))
    } else if state.reactor_temp > p.core_ambient_f {
        -p.passive_cooldown_f
    } else {
        0.0
    }
}

/// Adjust a reactivity delta for coolant flow through the core.
///
/// High flow pulls the delta down whatever its sign; low flow pushes it up.
/// A hot core with no reactivity change is never left perfectly still.
pub fn coolant_adjusted_delta(
    delta: f64,
    reactor_temp: f64,
    controls: &ControlInputs,
    p: &PlantParams,
) -> f64 {
    let flow = controls.core_flow();
    if delta != 0.0 {
        if flow > p.flow_threshold {
            delta
                - map_range(
                    flow,
                    p.flow_threshold,
                    p.max_flow,
                    p.high_flow_span.0,
                    p.high_flow_span.1,
                )
        } else {
            delta
                + map_range(
                    flow,
                    0.0,
                    p.flow_threshold,
                    p.low_flow_span.0,
                    p.low_flow_span.1,
                )
        }
    } else if reactor_temp == p.core_ambient_f {
        delta
    } else if controls.primary_pump() > p.nudge_primary_above
        || controls.emergency_pump() > p.nudge_emergency_above
    {
        delta - p.stability_nudge_f
    } else {
        delta + p.stability_nudge_f
    }
}

/// Turbine efficiency for a given amount of accumulated damage.
pub fn turbine_efficiency(damage: u32, p: &PlantParams) -> f64 {
    p.turbine_base_efficiency - f64::from(damage) / p.efficiency_damage_divisor
}

/// Run one day of heat transfer: new temperatures, generated power and fuel burn.
///
/// Damage, repairs, totals and the day counter are left alone.
pub fn step(state: &PlantState, controls: ControlInputs, p: &PlantParams) -> PlantState {
    let raw = reactivity_delta(state, &controls, p);
    let delta = coolant_adjusted_delta(raw, state.reactor_temp, &controls, p);

    let mut next = *state;
    next.controls = controls;
    next.reactor_temp = (state.reactor_temp + delta).max(p.core_ambient_f);
    next.exchanger_temp = (next.reactor_temp
        - f64::from(controls.secondary_pump()) * p.secondary_draw_f)
        .max(p.loop_ambient_f);

    // Below boiling the generators are offline and yesterday's figure stands.
    if next.exchanger_temp >= p.boiling_point_f {
        next.daily_output = next.exchanger_temp * p.mwe_per_degree;
    }

    let efficiency = turbine_efficiency(state.damage, p);
    next.condenser_temp =
        (next.exchanger_temp - next.exchanger_temp * efficiency).max(p.loop_ambient_f);

    next.fuel -= f64::from(controls.rod_position()) / p.fuel_burn_divisor;

    debug!(
        "day {}: core {:.2}F (delta {:+.2}), exchanger {:.2}F, condenser {:.2}F, output {:.3} MWe",
        state.day,
        next.reactor_temp,
        delta,
        next.exchanger_temp,
        next.condenser_temp,
        next.daily_output
    );

    next
}
