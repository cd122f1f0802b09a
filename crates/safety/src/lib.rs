use serde::{Deserialize, Serialize};
use sim::PlantState;

/// One light on the annunciator panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alarm {
    DamageControlActive,
    ReactorOvertemp,
    ExchangerOvertemp,
    CondenserOvertemp,
    OverPowerLimit,
    GeneratorsOffline,
    LowPrimaryFlow,
    LowSecondaryFlow,
    EmergencyCoolantOpen,
    LowFuel,
}

impl Alarm {
    /// Panel order: top row left to right, then bottom row.
    pub const ALL: [Alarm; 10] = [
        Alarm::DamageControlActive,
        Alarm::ReactorOvertemp,
        Alarm::ExchangerOvertemp,
        Alarm::CondenserOvertemp,
        Alarm::OverPowerLimit,
        Alarm::GeneratorsOffline,
        Alarm::LowPrimaryFlow,
        Alarm::LowSecondaryFlow,
        Alarm::EmergencyCoolantOpen,
        Alarm::LowFuel,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Alarm::DamageControlActive => "damage-control-active",
            Alarm::ReactorOvertemp => "reactor-overtemp",
            Alarm::ExchangerOvertemp => "exchanger-overtemp",
            Alarm::CondenserOvertemp => "condenser-overtemp",
            Alarm::OverPowerLimit => "over-power-limit",
            Alarm::GeneratorsOffline => "generators-offline",
            Alarm::LowPrimaryFlow => "low-primary-flow",
            Alarm::LowSecondaryFlow => "low-secondary-flow",
            Alarm::EmergencyCoolantOpen => "emergency-coolant-open",
            Alarm::LowFuel => "low-fuel",
        }
    }

    /// Text printed on the panel lamp.
    pub fn label(self) -> &'static str {
        match self {
            Alarm::DamageControlActive => "DAMAGE CONTROL",
            Alarm::ReactorOvertemp => "REACTOR OVERTEMP",
            Alarm::ExchangerOvertemp => "EXCHANGER OVERTEMP",
            Alarm::CondenserOvertemp => "CONDENSER OVERTEMP",
            Alarm::OverPowerLimit => "OVER POWER LIMIT",
            Alarm::GeneratorsOffline => "GENERATORS OFFLINE",
            Alarm::LowPrimaryFlow => "LOW PRIMARY FLOW",
            Alarm::LowSecondaryFlow => "LOW SECONDARY FLOW",
            Alarm::EmergencyCoolantOpen => "EMERGENCY COOLANT",
            Alarm::LowFuel => "LOW FISSION FUEL",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlarmConfig {
    pub reactor_overtemp_f: f64,
    pub exchanger_overtemp_f: f64,
    pub condenser_overtemp_f: f64,
    /// Lit at or above this daily output.
    pub power_limit_mwe: f64,
    /// Generators are offline below this exchanger temperature.
    pub generators_online_f: f64,
    /// Flow alarms light at or below this pump setting.
    pub low_flow_pct: u8,
    /// Lit at or below this much fuel.
    pub low_fuel_pct: f64,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            reactor_overtemp_f: 700.0,
            exchanger_overtemp_f: 450.0,
            condenser_overtemp_f: 212.0,
            power_limit_mwe: 500.0,
            generators_online_f: 212.0,
            low_flow_pct: 10,
            low_fuel_pct: 15.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmFlags {
    pub damage_control_active: bool,
    pub reactor_overtemp: bool,
    pub exchanger_overtemp: bool,
    pub condenser_overtemp: bool,
    pub over_power_limit: bool,
    pub generators_offline: bool,
    pub low_primary_flow: bool,
    pub low_secondary_flow: bool,
    pub emergency_coolant_open: bool,
    pub low_fuel: bool,
}

impl AlarmFlags {
    pub fn is_lit(&self, alarm: Alarm) -> bool {
        match alarm {
            Alarm::DamageControlActive => self.damage_control_active,
            Alarm::ReactorOvertemp => self.reactor_overtemp,
            Alarm::ExchangerOvertemp => self.exchanger_overtemp,
            Alarm::CondenserOvertemp => self.condenser_overtemp,
            Alarm::OverPowerLimit => self.over_power_limit,
            Alarm::GeneratorsOffline => self.generators_offline,
            Alarm::LowPrimaryFlow => self.low_primary_flow,
            Alarm::LowSecondaryFlow => self.low_secondary_flow,
            Alarm::EmergencyCoolantOpen => self.emergency_coolant_open,
            Alarm::LowFuel => self.low_fuel,
        }
    }

    /// Lit annunciators in panel order.
    pub fn active(&self) -> Vec<Alarm> {
        Alarm::ALL
            .into_iter()
            .filter(|a| self.is_lit(*a))
            .collect()
    }

    pub fn any(&self) -> bool {
        Alarm::ALL.into_iter().any(|a| self.is_lit(a))
    }
}

/// Light the annunciator panel from the current plant state.
/// Every lamp is decided afresh; nothing is latched.
pub fn evaluate(cfg: &AlarmConfig, state: &PlantState) -> AlarmFlags {
    let c = &state.controls;
    AlarmFlags {
        damage_control_active: state.damage_control_active,
        reactor_overtemp: state.reactor_temp > cfg.reactor_overtemp_f,
        exchanger_overtemp: state.exchanger_temp > cfg.exchanger_overtemp_f,
        condenser_overtemp: state.condenser_temp > cfg.condenser_overtemp_f,
        over_power_limit: state.daily_output >= cfg.power_limit_mwe,
        generators_offline: state.exchanger_temp < cfg.generators_online_f,
        low_primary_flow: c.primary_pump() <= cfg.low_flow_pct,
        low_secondary_flow: c.secondary_pump() <= cfg.low_flow_pct,
        emergency_coolant_open: c.emergency_pump() > 0,
        low_fuel: state.fuel <= cfg.low_fuel_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim::ControlInputs;

    fn with_controls(rod: i64, primary: i64, secondary: i64, emergency: i64) -> PlantState {
        PlantState {
            controls: ControlInputs::new(rod, primary, secondary, emergency).unwrap(),
            ..PlantState::default()
        }
    }

    #[test]
    fn cold_plant_lights_offline_and_flow_lamps() {
        let flags = evaluate(&AlarmConfig::default(), &PlantState::default());
        assert_eq!(
            flags.active(),
            vec![
                Alarm::GeneratorsOffline,
                Alarm::LowPrimaryFlow,
                Alarm::LowSecondaryFlow
            ]
        );
    }

    #[test]
    fn power_limit_is_inclusive() {
        let cfg = AlarmConfig::default();
        let mut s = PlantState::default();
        s.daily_output = 500.0;
        assert!(evaluate(&cfg, &s).over_power_limit);
        s.daily_output = 499.999;
        assert!(!evaluate(&cfg, &s).over_power_limit);
    }

    #[test]
    fn overtemp_lamps_are_strict() {
        let cfg = AlarmConfig::default();
        let mut s = PlantState {
            reactor_temp: 700.0,
            exchanger_temp: 450.0,
            condenser_temp: 212.0,
            ..PlantState::default()
        };
        let flags = evaluate(&cfg, &s);
        assert!(!flags.reactor_overtemp);
        assert!(!flags.exchanger_overtemp);
        assert!(!flags.condenser_overtemp);
        assert!(!flags.generators_offline);

        s.reactor_temp = 700.01;
        s.exchanger_temp = 450.01;
        s.condenser_temp = 212.01;
        let flags = evaluate(&cfg, &s);
        assert!(flags.reactor_overtemp);
        assert!(flags.exchanger_overtemp);
        assert!(flags.condenser_overtemp);
    }

    #[test]
    fn flow_lamps_follow_pump_settings() {
        let cfg = AlarmConfig::default();
        let flags = evaluate(&cfg, &with_controls(15, 10, 11, 1));
        assert!(flags.low_primary_flow);
        assert!(!flags.low_secondary_flow);
        assert!(flags.emergency_coolant_open);

        let flags = evaluate(&cfg, &with_controls(15, 11, 10, 0));
        assert!(!flags.low_primary_flow);
        assert!(flags.low_secondary_flow);
        assert!(!flags.emergency_coolant_open);
    }

    #[test]
    fn low_fuel_and_damage_control() {
        let cfg = AlarmConfig::default();
        let s = PlantState {
            fuel: 15.0,
            damage_control_active: true,
            ..PlantState::default()
        };
        let flags = evaluate(&cfg, &s);
        assert!(flags.low_fuel);
        assert!(flags.is_lit(Alarm::DamageControlActive));

        let s = PlantState {
            fuel: 15.01,
            ..PlantState::default()
        };
        assert!(!evaluate(&cfg, &s).low_fuel);
    }

    #[test]
    fn quiet_panel_has_nothing_lit() {
        let cfg = AlarmConfig::default();
        assert!(evaluate(&cfg, &PlantState::default()).any());

        let s = PlantState {
            exchanger_temp: 300.0,
            reactor_temp: 450.0,
            daily_output: 420.0,
            ..with_controls(15, 50, 50, 0)
        };
        let flags = evaluate(&cfg, &s);
        assert!(!flags.any());
        assert!(flags.active().is_empty());
    }

    #[test]
    fn every_alarm_has_distinct_id() {
        let mut ids: Vec<_> = Alarm::ALL.iter().map(|a| a.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), Alarm::ALL.len());
    }
}
