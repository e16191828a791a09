//! Down-the-bore orbit view.
//!
//! The shaft is wound into a shallow helix receding from the viewer, so all
//! hundred stations stay visible inside one circular frame while each one
//! orbits its own base point with the whirl phase. Opacity and projection
//! scale both fall off with axial position, which is all the depth cueing a
//! single-axis perspective needs. Support housings ride their station's base
//! point with a dashed clearance connector to the deflected shaft.

use crate::projection::{project_radial, Projected};
use crate::sampler;
use crate::scene::{Primitive, Rgba, Scene};
use crate::views::{
    self, damping_modifier, push_danger_frame, RenderInput, RenderMode, ViewRenderer,
};

/// World-units of orbit radius per unit of normalized displacement.
pub const VISUAL_SCALE: f64 = 0.15;
/// Radians of helix twist over the full shaft length.
pub const HELIX_PITCH: f64 = 12.0;
/// In-plane radius of the helix coil.
pub const HELIX_RADIUS: f64 = 0.25;

const VIEWPORT_W: f64 = 600.0;
const VIEWPORT_H: f64 = 600.0;

/// Screen radius per unit of segment diameter, before projection scale.
const DISK_RADIUS_GAIN: f64 = 15.0;
/// Housing bore in world units, scaled by the station's projection.
const HOUSING_RADIUS: f64 = 0.12 * 400.0;
const DISK_FILL: Rgba = Rgba::new(0x0e, 0x74, 0x90);

const DEPTH_GRID: f64 = 1000.0;
const DEPTH_HOUSING: f64 = 500.0;
const DEPTH_SHAFT: f64 = 100.0;
const DEPTH_SUPPORT_DOT: f64 = 50.0;
const DEPTH_LEADING_EDGE: f64 = 40.0;
const DEPTH_TEXT: f64 = 30.0;

/// One station: undeflected helix point and deflected shaft point, both in
/// screen space, plus the projection scale at that depth.
struct Station {
    u: f64,
    base: (f64, f64),
    tip: (f64, f64),
    scale: f64,
}

#[derive(Default)]
pub struct RadialView;

impl RadialView {
    pub fn new() -> Self {
        Self
    }
}

impl ViewRenderer for RadialView {
    fn label(&self) -> &'static str {
        "radial"
    }

    fn viewport(&self) -> (f64, f64) {
        (VIEWPORT_W, VIEWPORT_H)
    }

    fn render(&mut self, input: &RenderInput<'_>) -> Scene {
        let mut scene = Scene::new(VIEWPORT_W, VIEWPORT_H);
        let pan = input.camera.pan;
        push_crosshair(&mut scene, pan);

        let stations = station_layout(input);
        push_housings(&mut scene, input, &stations);

        match input.settings.render_mode {
            RenderMode::Solid => push_disks(&mut scene, input, &stations),
            RenderMode::Line => push_segment_lines(&mut scene, &stations),
        }
        push_support_dots(&mut scene, input, &stations);
        push_leading_edge(&mut scene, &stations);

        if input.danger {
            push_danger_frame(&mut scene);
        }
        scene
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

fn station_layout(input: &RenderInput<'_>) -> Vec<Station> {
    let data = input.data;
    let settings = input.settings;
    let n = data.segment_count();
    let span = (n.saturating_sub(1)).max(1) as f64;
    let mode = data.modes.get(settings.active_mode);
    let gain = settings.amplitude_scale * VISUAL_SCALE * damping_modifier(settings.damping);
    let pan = input.camera.pan;
    let viewport = (VIEWPORT_W, VIEWPORT_H);
    let place = |p: Projected| (p.x + pan.0, p.y + pan.1);

    (0..n)
        .map(|i| {
            let u = i as f64 / span;
            // The coil itself turns with the phase so the whole shaft
            // appears to spin, not just the deflection.
            let angle = u * HELIX_PITCH - input.phase;
            let base = (HELIX_RADIUS * angle.cos(), HELIX_RADIUS * angle.sin());
            let radius = mode
                .map(|m| sampler::sample(i, m, n))
                .unwrap_or(0.0)
                * gain;
            let tip = (
                base.0 + radius * input.phase.sin(),
                base.1 + radius * input.phase.cos(),
            );
            let pb = project_radial(base.0, base.1, u, viewport);
            let pt = project_radial(tip.0, tip.1, u, viewport);
            Station {
                u,
                base: place(pb),
                tip: place(pt),
                scale: pt.scale,
            }
        })
        .collect()
}

/// Depth-cue opacity: front of the shaft fully opaque, rear at half.
fn axial_fade(u: f64) -> f64 {
    1.0 - u * 0.5
}

// ---------------------------------------------------------------------------
// Elements
// ---------------------------------------------------------------------------

fn push_crosshair(scene: &mut Scene, pan: (f64, f64)) {
    let (cx, cy) = (VIEWPORT_W / 2.0 + pan.0, VIEWPORT_H / 2.0 + pan.1);
    let horizontal = vec![(cx - VIEWPORT_W / 2.0, cy), (cx + VIEWPORT_W / 2.0, cy)];
    let vertical = vec![(cx, cy - VIEWPORT_H / 2.0), (cx, cy + VIEWPORT_H / 2.0)];
    scene.push(Primitive::polyline(horizontal, views::CROSSHAIR).at_depth(DEPTH_GRID));
    scene.push(Primitive::polyline(vertical, views::CROSSHAIR).at_depth(DEPTH_GRID));
    scene.push(
        Primitive::circle(cx, cy, VIEWPORT_W / 3.0, views::CROSSHAIR)
            .dashed()
            .at_depth(DEPTH_GRID),
    );
}

fn push_housings(scene: &mut Scene, input: &RenderInput<'_>, stations: &[Station]) {
    let n = input.data.segment_count();
    for support in input.data.supports() {
        let Some(station) = stations.get(support.nearest_segment(n)) else {
            continue;
        };
        let fade = axial_fade(station.u);
        let (hx, hy) = station.base;
        scene.push(
            Primitive::circle(hx, hy, HOUSING_RADIUS * station.scale, views::HOUSING.faded(0.4 * fade))
                .with_width(1.5)
                .at_depth(DEPTH_HOUSING),
        );
        scene.push(
            Primitive::circle(hx, hy, 2.0, views::HOUSING.faded(fade))
                .filled()
                .at_depth(DEPTH_HOUSING),
        );
        scene.push(
            Primitive::polyline(vec![(hx, hy), station.tip], views::HOUSING.faded(0.3 * fade))
                .dashed()
                .at_depth(DEPTH_HOUSING),
        );
        scene.push(
            Primitive::text(
                hx + 8.0,
                hy - 8.0,
                support.name.as_str(),
                views::HOUSING.faded(0.7 * fade),
            )
            .at_depth(DEPTH_TEXT),
        );
    }
}

fn push_disks(scene: &mut Scene, input: &RenderInput<'_>, stations: &[Station]) {
    for (segment, station) in input.data.shaft_segments.iter().zip(stations) {
        let fade = axial_fade(station.u);
        let radius = segment.outer_diameter * DISK_RADIUS_GAIN * station.scale;
        let depth = DEPTH_SHAFT + station.u * 100.0;
        let (x, y) = station.tip;
        scene.push(
            Primitive::circle(x, y, radius, DISK_FILL.faded(fade))
                .filled()
                .at_depth(depth),
        );
        scene.push(
            Primitive::circle(x, y, radius, views::ACCENT.faded(fade)).at_depth(depth - 0.5),
        );
        scene.push(
            Primitive::circle(x, y, radius * 0.6, views::ACCENT.faded(0.2 * fade))
                .at_depth(depth - 0.4),
        );
    }
}

fn push_segment_lines(scene: &mut Scene, stations: &[Station]) {
    for pair in stations.windows(2) {
        let fade = axial_fade(pair[0].u);
        let depth = DEPTH_SHAFT + pair[0].u * 100.0;
        scene.push(
            Primitive::polyline(vec![pair[0].tip, pair[1].tip], views::ACCENT.faded(fade))
                .with_width(3.0)
                .at_depth(depth),
        );
    }
}

fn push_support_dots(scene: &mut Scene, input: &RenderInput<'_>, stations: &[Station]) {
    let n = input.data.segment_count();
    for support in input.data.supports() {
        let Some(station) = stations.get(support.nearest_segment(n)) else {
            continue;
        };
        let (x, y) = station.tip;
        scene.push(
            Primitive::circle(x, y, 3.0, views::SHAFT_DOT)
                .filled()
                .at_depth(DEPTH_SUPPORT_DOT),
        );
        scene.push(Primitive::circle(x, y, 3.0, views::WHITE).at_depth(DEPTH_SUPPORT_DOT - 0.5));
    }
}

/// The governor-end station gets a red marker so spin direction and phase
/// stay readable even in line mode.
fn push_leading_edge(scene: &mut Scene, stations: &[Station]) {
    let Some(first) = stations.first() else {
        return;
    };
    let (x, y) = first.tip;
    scene.push(
        Primitive::circle(x, y, 3.0, views::ALERT)
            .filled()
            .at_depth(DEPTH_LEADING_EDGE),
    );
    scene.push(Primitive::circle(x, y, 3.0, views::WHITE).at_depth(DEPTH_LEADING_EDGE - 0.5));
}
