//! Built-in default dataset: a 100-segment hydrogen-cooled turbo generator
//! train (exciter, generator, LP and HP turbines on four bearings).
//!
//! Deterministic by construction so tests and demos always see the same
//! machine. Stations follow the usual train order from the exciter end.

use crate::materials::DEFAULT_MATERIAL_ID;
use crate::model::{
    BearingPhysics, ComponentKind, ModeShape, RotorComponent, ShaftSegment, SimulationData,
    SpeedCoefficient,
};

pub const SEGMENT_COUNT: usize = 100;

/// Complete default rotor train. Always passes [`SimulationData::validate`].
pub fn default_simulation() -> SimulationData {
    SimulationData {
        rotors: default_components(),
        shaft_segments: default_shaft(),
        modes: default_modes(),
    }
}

// ---------------------------------------------------------------------------
// Shaft profile
// ---------------------------------------------------------------------------

fn segment(
    index: usize,
    outer_diameter: f64,
    color: &str,
    label: Option<&str>,
) -> ShaftSegment {
    ShaftSegment {
        index,
        length: 1.0 / SEGMENT_COUNT as f64,
        outer_diameter,
        material_id: DEFAULT_MATERIAL_ID.to_string(),
        color: Some(color.to_string()),
        label: label.map(str::to_string),
    }
}

fn default_shaft() -> Vec<ShaftSegment> {
    let mut segments = Vec::with_capacity(SEGMENT_COUNT);
    for i in 0..SEGMENT_COUNT {
        let pos = i as f64 / SEGMENT_COUNT as f64;

        let seg = if pos < 0.1 {
            // Exciter overhang.
            segment(i, 0.45, "#ef4444", (i == 5).then_some("Exciter Core"))
        } else if pos < 0.12 {
            // Bearing 1 collar.
            segment(i, 0.25, "#f59e0b", None)
        } else if pos < 0.45 {
            // Generator main body.
            segment(i, 0.95, "#3b82f6", (i == 28).then_some("Rotor Body"))
        } else if pos < 0.50 {
            // Bearing 2 / coupling collar.
            segment(i, 0.25, "#f59e0b", None)
        } else if pos < 0.75 {
            // LP turbine: blade discs every fifth element, spacers between.
            let label = (i == 62).then_some("L-0 Stage");
            if i % 5 == 0 || i % 5 == 1 {
                segment(i, 1.0, "#10b981", label)
            } else {
                segment(i, 0.4, "#64748b", label)
            }
        } else if pos < 0.80 {
            // Bearing 3 collar.
            segment(i, 0.25, "#f59e0b", None)
        } else if pos < 0.95 {
            // HP turbine: stepped rotor.
            let label = (i == 87).then_some("HP Inlet");
            if i % 3 == 0 {
                segment(i, 0.8, "#8b5cf6", label)
            } else {
                segment(i, 0.6, "#7c3aed", label)
            }
        } else {
            // Bearing 4 stub.
            segment(i, 0.25, "#f59e0b", None)
        };
        segments.push(seg);
    }
    segments
}

// ---------------------------------------------------------------------------
// Bearings and coupling
// ---------------------------------------------------------------------------

/// Journal-bearing coefficients with mild per-station variation. Cross
/// stiffness carries the destabilizing sign convention (kyx < 0).
fn bearing_physics(station: usize) -> BearingPhysics {
    let s = 1.0 + 0.1 * station as f64;
    BearingPhysics {
        kxx: SpeedCoefficient {
            constant: 2.5e8 * s,
            linear: 1.5e4,
            quadratic: 0.0,
        },
        kxy: SpeedCoefficient {
            constant: 3.0e7 * s,
            linear: 8.0e3,
            quadratic: 0.0,
        },
        kyx: SpeedCoefficient {
            constant: -2.5e7 * s,
            linear: -6.0e3,
            quadratic: 0.0,
        },
        kyy: SpeedCoefficient {
            constant: 1.8e8 * s,
            linear: 1.2e4,
            quadratic: 0.0,
        },
        cxx: SpeedCoefficient::constant(1.2e5 * s),
        cxy: SpeedCoefficient::constant(0.0),
        cyx: SpeedCoefficient::constant(0.0),
        cyy: SpeedCoefficient::constant(1.0e5 * s),
    }
}

fn default_components() -> Vec<RotorComponent> {
    let bearing = |id: &str, name: &str, position: f64, station: usize| RotorComponent {
        id: id.to_string(),
        name: name.to_string(),
        kind: ComponentKind::Bearing,
        position,
        width: Some(0.05),
        diameter: Some(0.25),
        physics: Some(bearing_physics(station)),
    };
    vec![
        bearing("brg1", "Bearing #1", 0.11, 0),
        bearing("brg2", "Bearing #2", 0.48, 1),
        bearing("brg3", "Bearing #3", 0.78, 2),
        bearing("brg4", "Bearing #4", 0.98, 3),
        RotorComponent {
            id: "cpl1".to_string(),
            name: "GEN-LP Coupling".to_string(),
            kind: ComponentKind::Coupling,
            position: 0.46,
            width: Some(0.04),
            diameter: Some(0.3),
            physics: None,
        },
    ]
}

// ---------------------------------------------------------------------------
// Mode shapes
// ---------------------------------------------------------------------------

/// Half-sine family: `sin((i/99) * k * pi)` scaled per order.
fn sine_curve(k: f64, scale: f64) -> Vec<f64> {
    (0..100)
        .map(|i| (i as f64 / 99.0 * k * std::f64::consts::PI).sin() * scale)
        .collect()
}

fn default_modes() -> Vec<ModeShape> {
    vec![
        ModeShape {
            order: 1,
            frequency_hz: 12.5,
            rpm: 750.0,
            q_factor: 4.5,
            description: "First critical speed. Simple bending mode (U-shape) dominated by \
                          the heavy generator and LP turbine mass."
                .to_string(),
            displacements: sine_curve(1.0, 1.0),
        },
        ModeShape {
            order: 2,
            frequency_hz: 28.3,
            rpm: 1700.0,
            q_factor: 8.2,
            description: "Second critical speed. S-shape mode where the generator and LP \
                          turbine oscillate out of phase."
                .to_string(),
            displacements: sine_curve(2.0, 1.0),
        },
        ModeShape {
            order: 3,
            frequency_hz: 45.1,
            rpm: 2706.0,
            q_factor: 12.0,
            description: "Third mode involving significant excitation of the exciter \
                          overhang and HP turbine coupling."
                .to_string(),
            displacements: sine_curve(3.0, 0.8),
        },
        ModeShape {
            order: 4,
            frequency_hz: 60.0,
            rpm: 3600.0,
            q_factor: 25.0,
            description: "Operating speed resonance (high damping). Complex multi-nodal \
                          bending."
                .to_string(),
            displacements: sine_curve(4.0, 0.5),
        },
        ModeShape {
            order: 5,
            frequency_hz: 82.4,
            rpm: 4944.0,
            q_factor: 18.5,
            description: "High frequency shaft stiffness controlled mode.".to_string(),
            displacements: sine_curve(5.0, 0.4),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dataset_validates() {
        let data = default_simulation();
        assert!(data.validate().is_ok());
        assert_eq!(data.segment_count(), SEGMENT_COUNT);
        assert_eq!(data.modes.len(), 5);
    }

    #[test]
    fn test_labeled_stations_present() {
        let data = default_simulation();
        let labels: Vec<&str> = data
            .shaft_segments
            .iter()
            .filter_map(|s| s.label.as_deref())
            .collect();
        assert_eq!(
            labels,
            vec!["Exciter Core", "Rotor Body", "L-0 Stage", "HP Inlet"]
        );
    }

    #[test]
    fn test_four_bearings_and_one_coupling() {
        let data = default_simulation();
        let bearings: Vec<&RotorComponent> = data
            .rotors
            .iter()
            .filter(|c| c.kind == ComponentKind::Bearing)
            .collect();
        assert_eq!(bearings.len(), 4);
        let positions: Vec<f64> = bearings.iter().map(|b| b.position).collect();
        assert_eq!(positions, vec![0.11, 0.48, 0.78, 0.98]);
        assert!(bearings.iter().all(|b| b.physics.is_some()));
        assert_eq!(
            data.rotors
                .iter()
                .filter(|c| c.kind == ComponentKind::Coupling)
                .count(),
            1
        );
    }

    #[test]
    fn test_modes_have_positive_q_and_expected_criticals() {
        let data = default_simulation();
        assert!(data.modes.iter().all(|m| m.q_factor > 0.0));
        let rpms: Vec<f64> = data.modes.iter().map(|m| m.rpm).collect();
        assert_eq!(rpms, vec![750.0, 1700.0, 2706.0, 3600.0, 4944.0]);
        for mode in &data.modes {
            assert!((mode.frequency_hz - mode.rpm / 60.0).abs() < 0.3);
        }
    }

    #[test]
    fn test_blade_disc_pattern_in_lp_stage() {
        let data = default_simulation();
        // i = 50 and 51 are discs, 52 is a spacer.
        assert_eq!(data.shaft_segments[50].outer_diameter, 1.0);
        assert_eq!(data.shaft_segments[51].outer_diameter, 1.0);
        assert_eq!(data.shaft_segments[52].outer_diameter, 0.4);
    }

    #[test]
    fn test_first_mode_peaks_at_midspan() {
        let data = default_simulation();
        let curve = &data.modes[0].displacements;
        assert!(curve[49] > 0.99);
        assert!(curve[0].abs() < 1e-9);
        assert!(curve[99].abs() < 1e-9);
    }
}
