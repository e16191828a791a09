//! The shaft edit engine: the only writer of `SimulationData` after load.
//!
//! Geometry edits feed back into the mode table: adding material stiffens
//! the shaft, so every diameter change shifts all critical speeds by
//! `delta_dia * 5%` and rederives the mode frequencies from the new RPM.
//! Metadata edits (material, color, label) and component CRUD leave the
//! frequencies alone.

use uuid::Uuid;

use crate::model::{ComponentKind, ModeShape, RotorComponent, SimulationData};

/// Fractional RPM shift per unit of diameter change.
pub const FREQUENCY_SHIFT_PER_DIA: f64 = 0.05;

/// Hard diameter bounds; pointer drags use a narrower working range but
/// nothing ever writes outside these.
pub const DIA_MIN: f64 = 0.05;
pub const DIA_MAX: f64 = 2.0;

// ---------------------------------------------------------------------------
// Diameter edits
// ---------------------------------------------------------------------------

/// Set one segment's outer diameter (clamped) and retune every mode from
/// the resulting delta. Returns the applied delta, or `None` for an
/// out-of-range index.
pub fn resize_segment(data: &mut SimulationData, index: usize, new_diameter: f64) -> Option<f64> {
    resize_segments(data, index, &[index], new_diameter)
}

/// Multi-select lock resize: the pressed segment takes `new_diameter`
/// (clamped) and every other target shifts by the same delta, clamped per
/// segment. One atomic update, one retune from the pressed segment's delta.
pub fn resize_segments(
    data: &mut SimulationData,
    pressed: usize,
    targets: &[usize],
    new_diameter: f64,
) -> Option<f64> {
    let old = data.shaft_segments.get(pressed)?.outer_diameter;
    let delta = new_diameter.clamp(DIA_MIN, DIA_MAX) - old;
    if delta == 0.0 {
        return Some(0.0);
    }

    for &t in targets {
        if let Some(seg) = data.shaft_segments.get_mut(t) {
            seg.outer_diameter = (seg.outer_diameter + delta).clamp(DIA_MIN, DIA_MAX);
        }
    }
    // The pressed segment lands exactly on the clamped request even when a
    // previous edit left it off-grid.
    if let Some(seg) = data.shaft_segments.get_mut(pressed) {
        seg.outer_diameter = new_diameter.clamp(DIA_MIN, DIA_MAX);
    }

    let shift = delta * FREQUENCY_SHIFT_PER_DIA;
    retune_modes(&mut data.modes, shift);
    log::debug!(
        "resized segment {pressed} (+{} locked) by {delta:+.4}, critical speeds shifted {:+.2}%",
        targets.len().saturating_sub(1),
        shift * 100.0
    );
    Some(delta)
}

/// Shift the whole mode table by a fractional amount and keep the Hz column
/// consistent with the new RPM.
pub fn retune_modes(modes: &mut [ModeShape], shift_percent: f64) {
    for mode in modes {
        mode.rpm *= 1.0 + shift_percent;
        mode.frequency_hz = mode.rpm / 60.0;
    }
}

// ---------------------------------------------------------------------------
// Metadata edits (no frequency coupling)
// ---------------------------------------------------------------------------

pub fn update_segment_material(data: &mut SimulationData, index: usize, material_id: &str) -> bool {
    match data.shaft_segments.get_mut(index) {
        Some(seg) => {
            seg.material_id = material_id.to_string();
            true
        }
        None => false,
    }
}

pub fn update_segment_color(data: &mut SimulationData, index: usize, color: Option<String>) -> bool {
    match data.shaft_segments.get_mut(index) {
        Some(seg) => {
            seg.color = color;
            true
        }
        None => false,
    }
}

pub fn update_segment_label(data: &mut SimulationData, index: usize, label: Option<String>) -> bool {
    match data.shaft_segments.get_mut(index) {
        Some(seg) => {
            seg.label = label;
            true
        }
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Component CRUD
// ---------------------------------------------------------------------------

/// Add a component at a normalized position; the id is a fresh uuid v4.
/// Returns the id.
pub fn add_component(
    data: &mut SimulationData,
    name: &str,
    kind: ComponentKind,
    position: f64,
) -> String {
    let id = Uuid::new_v4().to_string();
    data.rotors.push(RotorComponent {
        id: id.clone(),
        name: name.to_string(),
        kind,
        position: position.clamp(0.0, 1.0),
        width: None,
        diameter: None,
        physics: None,
    });
    log::debug!("added {} component '{name}' at {position:.2}", kind.as_str());
    id
}

/// Apply an in-place update to the component with `id`; false if absent.
pub fn update_component(
    data: &mut SimulationData,
    id: &str,
    update: impl FnOnce(&mut RotorComponent),
) -> bool {
    match data.rotors.iter_mut().find(|c| c.id == id) {
        Some(component) => {
            update(component);
            component.position = component.position.clamp(0.0, 1.0);
            true
        }
        None => false,
    }
}

pub fn remove_component(data: &mut SimulationData, id: &str) -> bool {
    let before = data.rotors.len();
    data.rotors.retain(|c| c.id != id);
    data.rotors.len() != before
}
