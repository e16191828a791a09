//! Unbalance response: amplification factor vs running speed.
//!
//! Classic SDOF superposition. Each mode contributes
//! `AF = r^2 / sqrt((1 - r^2)^2 + (2*zeta*r)^2)` with `r = rpm / mode rpm`
//! and `zeta = 1/(2Q)`, weighted `1/sqrt(order)` since higher modes couple
//! less to residual unbalance. The sweep also reports the API-style
//! exclusion bands around operating speed and its 2x harmonic.

use serde::Serialize;

use crate::model::ModeShape;

pub const SWEEP_STEPS: usize = 300;

/// Half-width of the exclusion bands as a fraction of the band center.
pub const EXCLUSION_MARGIN: f64 = 0.1;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResponsePoint {
    pub rpm: f64,
    pub amplitude: f64,
}

/// Closed speed band; `contains` is strict on both ends, matching the
/// resonance check of the health evaluator.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SpeedBand {
    pub low: f64,
    pub high: f64,
}

impl SpeedBand {
    pub fn around(center: f64) -> Self {
        Self {
            low: center * (1.0 - EXCLUSION_MARGIN),
            high: center * (1.0 + EXCLUSION_MARGIN),
        }
    }

    pub fn contains(&self, rpm: f64) -> bool {
        rpm > self.low && rpm < self.high
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseSweep {
    pub operating_rpm: f64,
    pub max_rpm: f64,
    pub points: Vec<ResponsePoint>,
    /// Bands around operating speed and its first harmonic.
    pub exclusion_zones: [SpeedBand; 2],
    /// Mode critical speeds, in mode order.
    pub critical_speeds: Vec<f64>,
}

/// Summed weighted amplification at one running speed. Exactly 0 at rest;
/// modes with a non-positive critical speed or Q are skipped rather than
/// dividing by zero.
pub fn amplitude_at(modes: &[ModeShape], rpm: f64) -> f64 {
    if rpm <= 0.0 {
        return 0.0;
    }
    let mut total = 0.0;
    for mode in modes {
        if mode.rpm <= 0.0 || mode.q_factor <= 0.0 {
            continue;
        }
        let r = rpm / mode.rpm;
        let zeta = mode.damping_ratio();
        let denom = ((1.0 - r * r).powi(2) + (2.0 * zeta * r).powi(2)).sqrt();
        let af = r * r / denom;
        total += af / (mode.order.max(1) as f64).sqrt();
    }
    total
}

/// Sweep from rest to `max(2.5x operating, 1.2x highest critical)` in
/// [`SWEEP_STEPS`] equal steps (inclusive of both ends).
pub fn sweep(modes: &[ModeShape], operating_rpm: f64) -> ResponseSweep {
    let max_mode_rpm = modes.iter().fold(0.0_f64, |acc, m| acc.max(m.rpm));
    let max_rpm = (operating_rpm * 2.5).max(max_mode_rpm * 1.2);
    let step = max_rpm / SWEEP_STEPS as f64;

    let points = (0..=SWEEP_STEPS)
        .map(|i| {
            let rpm = step * i as f64;
            ResponsePoint {
                rpm,
                amplitude: amplitude_at(modes, rpm),
            }
        })
        .collect();

    ResponseSweep {
        operating_rpm,
        max_rpm,
        points,
        exclusion_zones: [
            SpeedBand::around(operating_rpm),
            SpeedBand::around(operating_rpm * 2.0),
        ],
        critical_speeds: modes.iter().map(|m| m.rpm).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::default_simulation;

    fn single_mode(rpm: f64, q: f64, order: u32) -> Vec<ModeShape> {
        vec![ModeShape {
            order,
            frequency_hz: rpm / 60.0,
            rpm,
            q_factor: q,
            description: String::new(),
            displacements: vec![0.0, 1.0, 0.0],
        }]
    }

    #[test]
    fn test_amplitude_at_rest_is_exactly_zero() {
        let modes = default_simulation().modes;
        assert_eq!(amplitude_at(&modes, 0.0), 0.0);
        assert_eq!(amplitude_at(&modes, -100.0), 0.0);
    }

    #[test]
    fn test_resonance_peak_is_q_over_one() {
        // At r = 1 the factor collapses to 1/(2*zeta) = Q.
        let modes = single_mode(3000.0, 10.0, 1);
        let at_critical = amplitude_at(&modes, 3000.0);
        assert!((at_critical - 10.0).abs() < 1e-9, "got {at_critical}");
    }

    #[test]
    fn test_order_weighting_divides_by_sqrt_order() {
        let first = amplitude_at(&single_mode(3000.0, 10.0, 1), 3000.0);
        let fourth = amplitude_at(&single_mode(3000.0, 10.0, 4), 3000.0);
        assert!((first / fourth - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_shape_and_bounds() {
        let data = default_simulation();
        let sweep = sweep(&data.modes, 3600.0);
        assert_eq!(sweep.points.len(), SWEEP_STEPS + 1);
        assert_eq!(sweep.points[0].rpm, 0.0);
        assert_eq!(sweep.points[0].amplitude, 0.0);
        // 2.5 * 3600 = 9000 > 1.2 * 4944.
        assert_eq!(sweep.max_rpm, 9000.0);
        assert!((sweep.points.last().unwrap().rpm - 9000.0).abs() < 1e-9);
        assert_eq!(sweep.critical_speeds.len(), 5);
    }

    #[test]
    fn test_sweep_extends_past_highest_mode_when_needed() {
        let modes = single_mode(10_000.0, 8.0, 1);
        let sweep = sweep(&modes, 1800.0);
        // 1.2 * 10000 beats 2.5 * 1800.
        assert_eq!(sweep.max_rpm, 12_000.0);
    }

    #[test]
    fn test_exclusion_zones_bracket_operating_speed() {
        let data = default_simulation();
        let sweep = sweep(&data.modes, 3600.0);
        let [primary, harmonic] = sweep.exclusion_zones;
        assert_eq!((primary.low, primary.high), (3240.0, 3960.0));
        assert_eq!((harmonic.low, harmonic.high), (6480.0, 7920.0));
        assert!(primary.contains(3600.0));
        assert!(!primary.contains(3240.0), "bounds are exclusive");
        assert!(harmonic.contains(7000.0));
    }

    #[test]
    fn test_degenerate_modes_are_skipped() {
        let mut modes = single_mode(0.0, 10.0, 1);
        modes.extend(single_mode(3000.0, -1.0, 2));
        assert_eq!(amplitude_at(&modes, 3000.0), 0.0);
    }
}
