//! The rotor data model: shaft segments, components, mode shapes.
//!
//! `SimulationData` is the single shared root that everything else reads.
//! Wire format uses camelCase field names so files round-trip with the
//! desktop tooling that produced the original datasets.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shaft geometry
// ---------------------------------------------------------------------------

/// One axial element of the discretized shaft.
///
/// Segments form a dense, ordered sequence: `index` runs 0..N-1 and the
/// normalized axial span is split evenly (`length` is usually 1/N). Only the
/// edit engine mutates segments after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShaftSegment {
    pub index: usize,
    /// Normalized axial length of this element.
    pub length: f64,
    /// Outer diameter, normalized relative to the largest stage.
    pub outer_diameter: f64,
    pub material_id: String,
    /// Optional display override; when absent the material color is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Station annotation ("HP Inlet", "L-0 Stage", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

// ---------------------------------------------------------------------------
// Components and bearing physics
// ---------------------------------------------------------------------------

/// High-level machine element mounted on (or supporting) the shaft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Bearing,
    Disc,
    Shaft,
    Coupling,
    Seal,
}

impl ComponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bearing => "bearing",
            Self::Disc => "disc",
            Self::Shaft => "shaft",
            Self::Coupling => "coupling",
            Self::Seal => "seal",
        }
    }
}

/// One speed-dependent coefficient: `constant + linear*w + quadratic*w^2`
/// with `w` the shaft speed in rad/s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeedCoefficient {
    pub constant: f64,
    #[serde(default)]
    pub linear: f64,
    #[serde(default)]
    pub quadratic: f64,
}

impl SpeedCoefficient {
    pub const fn constant(value: f64) -> Self {
        Self {
            constant: value,
            linear: 0.0,
            quadratic: 0.0,
        }
    }

    /// Evaluate at a shaft speed given in RPM.
    pub fn eval(&self, rpm: f64) -> f64 {
        let w = rpm * 2.0 * std::f64::consts::PI / 60.0;
        self.constant + self.linear * w + self.quadratic * w * w
    }
}

/// Full 2x2 stiffness/damping matrix of a journal bearing, each entry
/// speed-dependent. Cross terms (`kxy`, `kyx`) model the oil-film forces
/// that drive whirl instability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BearingPhysics {
    pub kxx: SpeedCoefficient,
    pub kxy: SpeedCoefficient,
    pub kyx: SpeedCoefficient,
    pub kyy: SpeedCoefficient,
    pub cxx: SpeedCoefficient,
    pub cxy: SpeedCoefficient,
    pub cyx: SpeedCoefficient,
    pub cyy: SpeedCoefficient,
}

/// All eight coefficients evaluated at one shaft speed.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EffectiveCoefficients {
    pub rpm: f64,
    pub kxx: f64,
    pub kxy: f64,
    pub kyx: f64,
    pub kyy: f64,
    pub cxx: f64,
    pub cxy: f64,
    pub cyx: f64,
    pub cyy: f64,
}

impl BearingPhysics {
    pub fn evaluate(&self, rpm: f64) -> EffectiveCoefficients {
        EffectiveCoefficients {
            rpm,
            kxx: self.kxx.eval(rpm),
            kxy: self.kxy.eval(rpm),
            kyx: self.kyx.eval(rpm),
            kyy: self.kyy.eval(rpm),
            cxx: self.cxx.eval(rpm),
            cxy: self.cxy.eval(rpm),
            cyx: self.cyx.eval(rpm),
            cyy: self.cyy.eval(rpm),
        }
    }
}

/// Bearing, coupling, or other machine element at a normalized axial position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotorComponent {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// Normalized axial position in [0, 1], independent of segment indices.
    pub position: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physics: Option<BearingPhysics>,
}

impl RotorComponent {
    /// Bearings and couplings are drawn as shaft supports in every view.
    pub fn is_support(&self) -> bool {
        matches!(self.kind, ComponentKind::Bearing | ComponentKind::Coupling)
    }

    /// Index of the shaft segment closest to this component's position.
    pub fn nearest_segment(&self, segment_count: usize) -> usize {
        if segment_count == 0 {
            return 0;
        }
        let idx = (self.position * (segment_count - 1) as f64).round();
        (idx.max(0.0) as usize).min(segment_count - 1)
    }
}

// ---------------------------------------------------------------------------
// Mode shapes
// ---------------------------------------------------------------------------

/// One natural mode of the rotor: critical speed plus its deflection curve.
///
/// `displacements` holds normalized deflection magnitudes sampled along the
/// shaft. The curve length is independent of the segment count; use
/// [`crate::sampler::sample`] to read it at a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeShape {
    pub order: u32,
    pub frequency_hz: f64,
    pub rpm: f64,
    /// Quality factor; damping ratio is `1 / (2 * qFactor)`.
    pub q_factor: f64,
    pub description: String,
    pub displacements: Vec<f64>,
}

impl ModeShape {
    /// Modal damping ratio zeta = 1/(2Q).
    pub fn damping_ratio(&self) -> f64 {
        1.0 / (2.0 * self.q_factor)
    }
}

// ---------------------------------------------------------------------------
// Simulation root
// ---------------------------------------------------------------------------

/// The complete rotor model. Replaced wholesale on load, field-mutated by
/// the edit engine; every other module is a pure reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationData {
    /// High-level components (bearings, couplings) for supports and labels.
    pub rotors: Vec<RotorComponent>,
    /// The discretized shaft the renderers and sampler operate on.
    pub shaft_segments: Vec<ShaftSegment>,
    pub modes: Vec<ModeShape>,
}

impl SimulationData {
    pub fn segment_count(&self) -> usize {
        self.shaft_segments.len()
    }

    /// Components drawn as shaft supports (bearings and couplings), in order.
    pub fn supports(&self) -> impl Iterator<Item = &RotorComponent> {
        self.rotors.iter().filter(|c| c.is_support())
    }

    /// Structural validation applied to every loaded dataset.
    ///
    /// Rejects empty segment or mode lists and non-contiguous segment
    /// indices; the renderers and sampler assume all three.
    pub fn validate(&self) -> Result<(), String> {
        if self.shaft_segments.is_empty() {
            return Err("shaftSegments must not be empty".to_string());
        }
        if self.modes.is_empty() {
            return Err("modes must not be empty".to_string());
        }
        for (i, seg) in self.shaft_segments.iter().enumerate() {
            if seg.index != i {
                return Err(format!(
                    "segment at position {i} has index {} (indices must be contiguous from 0)",
                    seg.index
                ));
            }
        }
        for mode in &self.modes {
            if mode.q_factor <= 0.0 {
                return Err(format!(
                    "mode {} has non-positive qFactor {}",
                    mode.order, mode.q_factor
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_data() -> SimulationData {
        SimulationData {
            rotors: vec![],
            shaft_segments: vec![ShaftSegment {
                index: 0,
                length: 1.0,
                outer_diameter: 0.5,
                material_id: "steel".to_string(),
                color: None,
                label: None,
            }],
            modes: vec![ModeShape {
                order: 1,
                frequency_hz: 12.5,
                rpm: 750.0,
                q_factor: 4.5,
                description: "first bending".to_string(),
                displacements: vec![0.0, 1.0, 0.0],
            }],
        }
    }

    #[test]
    fn test_validate_accepts_minimal_data() {
        assert!(minimal_data().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_segments() {
        let mut data = minimal_data();
        data.shaft_segments.clear();
        let err = data.validate().unwrap_err();
        assert!(err.contains("shaftSegments"), "unexpected message: {err}");
    }

    #[test]
    fn test_validate_rejects_empty_modes() {
        let mut data = minimal_data();
        data.modes.clear();
        assert!(data.validate().unwrap_err().contains("modes"));
    }

    #[test]
    fn test_validate_rejects_non_contiguous_indices() {
        let mut data = minimal_data();
        data.shaft_segments[0].index = 7;
        let err = data.validate().unwrap_err();
        assert!(err.contains("contiguous"), "unexpected message: {err}");
    }

    #[test]
    fn test_validate_rejects_non_positive_q() {
        let mut data = minimal_data();
        data.modes[0].q_factor = 0.0;
        assert!(data.validate().unwrap_err().contains("qFactor"));
    }

    #[test]
    fn test_coefficient_eval_constant_only_at_zero_rpm() {
        let c = SpeedCoefficient::constant(2.5e8);
        assert_eq!(c.eval(0.0), 2.5e8);
        assert_eq!(c.eval(3600.0), 2.5e8);
    }

    #[test]
    fn test_coefficient_eval_linear_and_quadratic_terms() {
        let c = SpeedCoefficient {
            constant: 100.0,
            linear: 2.0,
            quadratic: 0.5,
        };
        // 60 RPM -> w = 2*pi rad/s.
        let w = 2.0 * std::f64::consts::PI;
        let expected = 100.0 + 2.0 * w + 0.5 * w * w;
        assert!((c.eval(60.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_segment_rounds_to_closest_station() {
        let comp = RotorComponent {
            id: "brg1".to_string(),
            name: "Bearing #1".to_string(),
            kind: ComponentKind::Bearing,
            position: 0.11,
            width: Some(0.05),
            diameter: Some(0.25),
            physics: None,
        };
        // 0.11 * 99 = 10.89 -> 11
        assert_eq!(comp.nearest_segment(100), 11);
        assert_eq!(comp.nearest_segment(1), 0);
        assert_eq!(comp.nearest_segment(0), 0);
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let json = serde_json::to_string(&minimal_data()).unwrap();
        assert!(json.contains("\"shaftSegments\""));
        assert!(json.contains("\"outerDiameter\""));
        assert!(json.contains("\"materialId\""));
        assert!(json.contains("\"frequencyHz\""));
        assert!(json.contains("\"qFactor\""));
    }

    #[test]
    fn test_component_kind_wire_names_are_lowercase() {
        let kind = serde_json::to_string(&ComponentKind::Bearing).unwrap();
        assert_eq!(kind, "\"bearing\"");
        let parsed: ComponentKind = serde_json::from_str("\"coupling\"").unwrap();
        assert_eq!(parsed, ComponentKind::Coupling);
    }

    #[test]
    fn test_missing_coefficient_terms_default_to_zero() {
        let c: SpeedCoefficient = serde_json::from_str(r#"{"constant": 4.0}"#).unwrap();
        assert_eq!(c.linear, 0.0);
        assert_eq!(c.quadratic, 0.0);
        assert_eq!(c.eval(1000.0), 4.0);
    }

    #[test]
    fn test_damping_ratio_from_q() {
        let mode = &minimal_data().modes[0];
        assert!((mode.damping_ratio() - 1.0 / 9.0).abs() < 1e-12);
    }
}
