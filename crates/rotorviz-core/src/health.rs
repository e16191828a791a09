//! System health classification for the running configuration.
//!
//! Two independent hazards are checked in priority order: vibration
//! amplitude (converted to mils through a fixed plant scale) and critical
//! speeds sitting inside the resonance exclusion zones. Trip beats
//! resonance beats alert.

use serde::Serialize;

use crate::model::{ModeShape, SimulationData};
use crate::response::SpeedBand;
use crate::sampler;

/// Plant scale: peak normalized displacement of 1.0 at full amplitude is
/// read as 5 mils.
pub const MILS_SCALE: f64 = 5.0;
pub const TRIP_MILS: f64 = 8.0;
pub const ALERT_MILS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Safe,
    Warning,
    Danger,
}

impl HealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Warning => "WARNING",
            Self::Danger => "DANGER",
        }
    }

    /// Process exit code used by the one-shot health command.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Safe => 0,
            Self::Warning => 1,
            Self::Danger => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub message: String,
    pub estimated_mils: f64,
    /// First critical speed found inside an exclusion zone, if any.
    pub resonant_rpm: Option<f64>,
    /// How many modes sit inside an exclusion zone.
    pub conflicts: usize,
}

/// Estimated vibration at the active mode's worst point, in mils. Damping
/// here applies at full strength (unlike the render modifier, which keeps
/// 20% residual motion so heavily damped modes still animate).
pub fn estimated_mils(mode: &ModeShape, amplitude_scale: f64, damping: f64) -> f64 {
    sampler::max_abs(mode) * amplitude_scale * MILS_SCALE * (1.0 - damping)
}

/// Classify the current configuration.
pub fn evaluate(
    data: &SimulationData,
    active_mode: usize,
    amplitude_scale: f64,
    damping: f64,
    operating_rpm: f64,
) -> HealthReport {
    let primary = SpeedBand::around(operating_rpm);
    let harmonic = SpeedBand::around(operating_rpm * 2.0);
    let conflicts: Vec<&ModeShape> = data
        .modes
        .iter()
        .filter(|m| primary.contains(m.rpm) || harmonic.contains(m.rpm))
        .collect();

    let mils = data
        .modes
        .get(active_mode)
        .map(|m| estimated_mils(m, amplitude_scale, damping))
        .unwrap_or(0.0);

    let (status, message, resonant_rpm) = if mils > TRIP_MILS {
        (
            HealthStatus::Danger,
            "HIGH VIBRATION TRIP (>8 MILS)".to_string(),
            None,
        )
    } else if let Some(first) = conflicts.first() {
        (
            HealthStatus::Danger,
            format!("CRITICAL RESONANCE ({:.0} RPM)", first.rpm),
            Some(first.rpm),
        )
    } else if mils > ALERT_MILS {
        (
            HealthStatus::Warning,
            "VIBRATION ALERT (>5 MILS)".to_string(),
            None,
        )
    } else {
        (HealthStatus::Safe, "SYSTEM TUNED".to_string(), None)
    };

    HealthReport {
        status,
        message,
        estimated_mils: mils,
        resonant_rpm,
        conflicts: conflicts.len(),
    }
}
