use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound of every control setting, in percent.
pub const CONTROL_MAX: i64 = 100;

/// One of the four operator controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Rod,
    Primary,
    Secondary,
    Emergency,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::Rod,
        Control::Primary,
        Control::Secondary,
        Control::Emergency,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Control::Rod => "Control Rods",
            Control::Primary => "Primary Coolant",
            Control::Secondary => "Secondary Coolant",
            Control::Emergency => "Emergency Coolant",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{control} must be an integer between 0 and 100, got {value}")]
    OutOfRange { control: Control, value: i64 },

    #[error("{control} must be an integer between 0 and 100, got {text:?}")]
    NotAnInteger { control: Control, text: String },
}

/// Control settings as submitted by the operator, not yet checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawControls {
    pub rod_position: i64,
    pub primary_pump: i64,
    pub secondary_pump: i64,
    pub emergency_pump: i64,
}

impl RawControls {
    pub fn new(
        rod_position: i64,
        primary_pump: i64,
        secondary_pump: i64,
        emergency_pump: i64,
    ) -> Self {
        Self {
            rod_position,
            primary_pump,
            secondary_pump,
            emergency_pump,
        }
    }

    /// Parse the four entry fields in panel order (rod, primary, secondary, emergency).
    pub fn parse(fields: [&str; 4]) -> Result<Self, InputError> {
        let mut values = [0i64; 4];
        for ((slot, text), control) in values.iter_mut().zip(fields).zip(Control::ALL) {
            *slot = text.trim().parse().map_err(|_| InputError::NotAnInteger {
                control,
                text: text.to_string(),
            })?;
        }
        let [rod, primary, secondary, emergency] = values;
        Ok(Self::new(rod, primary, secondary, emergency))
    }

    fn get(&self, control: Control) -> i64 {
        match control {
            Control::Rod => self.rod_position,
            Control::Primary => self.primary_pump,
            Control::Secondary => self.secondary_pump,
            Control::Emergency => self.emergency_pump,
        }
    }
}

/// Control settings known to lie in `0..=100`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawControls")]
pub struct ControlInputs {
    rod_position: u8,
    primary_pump: u8,
    secondary_pump: u8,
    emergency_pump: u8,
}

impl ControlInputs {
    pub fn new(
        rod_position: i64,
        primary_pump: i64,
        secondary_pump: i64,
        emergency_pump: i64,
    ) -> Result<Self, InputError> {
        Self::try_from(RawControls::new(
            rod_position,
            primary_pump,
            secondary_pump,
            emergency_pump,
        ))
    }

    pub fn rod_position(&self) -> u8 {
        self.rod_position
    }

    pub fn primary_pump(&self) -> u8 {
        self.primary_pump
    }

    pub fn secondary_pump(&self) -> u8 {
        self.secondary_pump
    }

    pub fn emergency_pump(&self) -> u8 {
        self.emergency_pump
    }

    /// Combined coolant flow through the core: primary plus emergency.
    pub fn core_flow(&self) -> f64 {
        f64::from(self.primary_pump) + f64::from(self.emergency_pump)
    }
}

impl TryFrom<RawControls> for ControlInputs {
    type Error = InputError;

    fn try_from(raw: RawControls) -> Result<Self, Self::Error> {
        let mut checked = [0u8; 4];
        for (slot, control) in checked.iter_mut().zip(Control::ALL) {
            let value = raw.get(control);
            if !(0..=CONTROL_MAX).contains(&value) {
                return Err(InputError::OutOfRange { control, value });
            }
            *slot = value as u8;
        }
        let [rod_position, primary_pump, secondary_pump, emergency_pump] = checked;
        Ok(Self {
            rod_position,
            primary_pump,
            secondary_pump,
            emergency_pump,
        })
    }
}
