use serde::{Deserialize, Serialize};

/// Tunable constants of the plant model. Temperatures are in °F.
///
/// `Default` gives the stock plant: a 500 MWe station whose core
/// settles at 15% rods, full fuel, no damage and 600 °F.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantParams {
    /// Floor for the reactor core temperature.
    pub core_ambient_f: f64,
    /// Floor for the exchanger and condenser temperatures.
    pub loop_ambient_f: f64,
    /// Core temperature at which the reactivity term has unit gain.
    pub reference_core_f: f64,
    /// Rod position 0..=100 is remapped onto this range.
    pub rod_span: (f64, f64),
    /// Fuel 0..=100 is remapped onto this range.
    pub fuel_span: (f64, f64),
    /// Core cooldown per day with rods fully inserted.
    pub passive_cooldown_f: f64,
    /// Primary + emergency flow above this counts as high flow.
    pub flow_threshold: f64,
    /// Largest possible primary + emergency flow.
    pub max_flow: f64,
    /// High flow (threshold..=max) subtracts a value from this range.
    pub high_flow_span: (f64, f64),
    /// Low flow (0..=threshold) adds a value from this range.
    pub low_flow_span: (f64, f64),
    /// Nudge applied when the core would otherwise sit still while hot.
    pub stability_nudge_f: f64,
    pub nudge_primary_above: u8,
    pub nudge_emergency_above: u8,
    /// Exchanger temperature drop per point of secondary flow.
    pub secondary_draw_f: f64,
    /// Exchanger temperature at which the generators come online.
    pub boiling_point_f: f64,
    /// MWe generated per °F of exchanger temperature.
    pub mwe_per_degree: f64,
    pub turbine_base_efficiency: f64,
    /// Efficiency lost per point of damage is `1 / efficiency_damage_divisor`.
    pub efficiency_damage_divisor: f64,
    pub core_damage_limit_f: f64,
    pub exchanger_damage_limit_f: f64,
    pub condenser_damage_limit_f: f64,
    /// One point of damage per this many °F above a limit.
    pub damage_step_f: f64,
    /// Damage removed per day by damage control teams.
    pub repair_rate: u32,
    /// Damage control teams only work while the core is below this.
    pub repair_core_limit_f: f64,
    /// Damage at which the plant is destroyed.
    pub destroyed_at_damage: u32,
    /// Fuel burned per day is `rod_position / fuel_burn_divisor`.
    pub fuel_burn_divisor: f64,
}

impl Default for PlantParams {
    fn default() -> Self {
        Self {
            core_ambient_f: 70.0,
            loop_ambient_f: 80.0,
            reference_core_f: 600.0,
            rod_span: (-100.0, 100.0),
            fuel_span: (-150.0, 70.0),
            passive_cooldown_f: 2.0,
            flow_threshold: 50.0,
            max_flow: 200.0,
            high_flow_span: (5.0, 25.0),
            low_flow_span: (25.0, 5.0),
            stability_nudge_f: 2.0,
            nudge_primary_above: 20,
            nudge_emergency_above: 40,
            secondary_draw_f: 1.5,
            boiling_point_f: 212.0,
            mwe_per_degree: 1.4,
            turbine_base_efficiency: 0.83,
            efficiency_damage_divisor: 200.0,
            core_damage_limit_f: 700.0,
            exchanger_damage_limit_f: 450.0,
            condenser_damage_limit_f: 212.0,
            damage_step_f: 50.0,
            repair_rate: 2,
            repair_core_limit_f: 212.0,
            destroyed_at_damage: 100,
            fuel_burn_divisor: 150.0,
        }
    }
}
