//! Operating-speed derivation from machine class and grid frequency.
//!
//! Synchronous generators run at `120 * f / poles` RPM: a hydrogen-cooled
//! 2-pole unit turns at grid frequency, a nuclear 4-pole half-speed unit at
//! half of it. The derived speed anchors the resonance exclusion zones.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineClass {
    /// Hydrogen-cooled 2-pole turbo generator (full speed).
    Hydrogen,
    /// Nuclear 4-pole half-speed unit.
    Nuclear,
}

impl MachineClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hydrogen => "hydrogen",
            Self::Nuclear => "nuclear",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridFrequency {
    #[serde(rename = "50")]
    Hz50,
    #[serde(rename = "60")]
    Hz60,
}

impl GridFrequency {
    pub fn hz(self) -> f64 {
        match self {
            Self::Hz50 => 50.0,
            Self::Hz60 => 60.0,
        }
    }
}

/// Nominal operating speed in RPM for a machine class on a given grid.
pub fn operating_rpm(machine: MachineClass, grid: GridFrequency) -> f64 {
    match (machine, grid) {
        (MachineClass::Hydrogen, GridFrequency::Hz60) => 3600.0,
        (MachineClass::Hydrogen, GridFrequency::Hz50) => 3000.0,
        (MachineClass::Nuclear, GridFrequency::Hz60) => 1800.0,
        (MachineClass::Nuclear, GridFrequency::Hz50) => 1500.0,
    }
}
