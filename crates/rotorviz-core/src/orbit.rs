//! Per-bearing shaft orbit monitors.
//!
//! Each monitor tracks one support component, samples the active mode shape
//! at the nearest shaft station, and sweeps its own whirl phase to trace an
//! elliptical orbit plus a strip-chart waveform of the vertical probe. The
//! monitor phase is independent of the global animation clock so orbits keep
//! their own cadence, exactly like dedicated proximity-probe hardware.

use std::collections::VecDeque;
use std::f64::consts::TAU;

use crate::health::MILS_SCALE;
use crate::model::{ComponentKind, RotorComponent, SimulationData};
use crate::sampler;

/// Whirl phase advance per tick, radians.
pub const ORBIT_PHASE_STEP: f64 = 0.1;
/// Retained vertical-probe samples for the strip chart.
pub const WAVEFORM_CAPACITY: usize = 100;
/// Mils-to-plot-units gain for the orbit ellipse.
pub const PLOT_SCALE: f64 = 30.0;
/// Vertical semi-axis as a fraction of horizontal (bearing stiffness is
/// higher vertically, flattening the orbit).
pub const VERTICAL_RATIO: f64 = 0.8;

/// One tick's worth of orbit state, in plot units except `mils`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSample {
    pub mils: f64,
    pub x: f64,
    pub y: f64,
    pub semi_major: f64,
    pub semi_minor: f64,
}

#[derive(Debug, Clone)]
pub struct OrbitMonitor {
    component_id: String,
    name: String,
    segment_index: usize,
    phase: f64,
    waveform: VecDeque<f64>,
    mode: usize,
}

impl OrbitMonitor {
    pub fn new(component: &RotorComponent, segment_count: usize) -> Self {
        Self {
            component_id: component.id.clone(),
            name: component.name.clone(),
            segment_index: component.nearest_segment(segment_count),
            phase: 0.0,
            waveform: VecDeque::with_capacity(WAVEFORM_CAPACITY),
            mode: 0,
        }
    }

    /// Build monitors for every bearing in the dataset, in model order.
    pub fn for_bearings(data: &SimulationData) -> Vec<Self> {
        let count = data.segment_count();
        data.rotors
            .iter()
            .filter(|c| c.kind == ComponentKind::Bearing)
            .map(|c| Self::new(c, count))
            .collect()
    }

    /// Advance one frame and report the probe reading.
    ///
    /// Switching the active mode resets phase and waveform so the strip
    /// chart never mixes readings from two different deflection shapes.
    pub fn tick(
        &mut self,
        data: &SimulationData,
        active_mode: usize,
        amplitude_scale: f64,
        damping: f64,
        playing: bool,
    ) -> OrbitSample {
        if self.mode != active_mode {
            self.mode = active_mode;
            self.phase = 0.0;
            self.waveform.clear();
        }
        if playing {
            self.phase = (self.phase + ORBIT_PHASE_STEP) % TAU;
        }

        let displacement = data
            .modes
            .get(active_mode)
            .map(|m| sampler::sample(self.segment_index, m, data.segment_count()))
            .unwrap_or(0.0);
        let mils = (displacement * amplitude_scale * MILS_SCALE * (1.0 - damping)).abs();

        let semi_major = mils * PLOT_SCALE;
        let semi_minor = semi_major * VERTICAL_RATIO;
        let x = semi_major * self.phase.sin();
        let y = semi_minor * self.phase.cos();

        // Pausing freezes the strip chart rather than flat-lining it.
        if playing {
            self.waveform.push_back(y);
            while self.waveform.len() > WAVEFORM_CAPACITY {
                self.waveform.pop_front();
            }
        }

        OrbitSample {
            mils,
            x,
            y,
            semi_major,
            semi_minor,
        }
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn waveform(&self) -> impl Iterator<Item = f64> + '_ {
        self.waveform.iter().copied()
    }
}
