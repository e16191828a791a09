//! Orbiting 3D view of the whole rotor train.
//!
//! The shaft spans world x in [-0.5, 0.5] with the mode shape whirling the
//! centerline around it; segments become rings of their scaled diameter, and
//! the skin between consecutive rings is built in screen space by offsetting
//! along the normal of the projected centerline. A dashed ground grid, a
//! small axis triad, and one support pyramid per bearing anchor the model in
//! space. Painter depths reproduce fixed back-to-front segment order rather
//! than true per-camera sorting, which is indistinguishable in practice and
//! keeps frames allocation-light.

use crate::projection::project_iso;
use crate::sampler;
use crate::scene::{Primitive, Rgba, Scene};
use crate::trace::{TraceBuffer, TraceKey};
use crate::views::{self, damping_modifier, push_danger_frame, RenderInput, ViewRenderer};

/// World-units of centerline deflection per unit of normalized displacement.
pub const SCALE_ISOMETRIC: f64 = 0.2;

const VIEWPORT_W: f64 = 1200.0;
const VIEWPORT_H: f64 = 900.0;

/// Screen radius per unit of segment diameter, before projection scale.
const RING_RADIUS_GAIN: f64 = 20.0;
const FLOOR_Y: f64 = -0.6;
const FLOOR_HALF_X: f64 = 0.6;
const FLOOR_HALF_Z: f64 = 0.5;
const FLOOR_STEPS: usize = 10;
const AXIS_LEN: f64 = 0.1;
/// Support pyramids are 0.15 world units across at the base.
const MOUNT_HALF_WIDTH: f64 = 0.075;
/// Minimum pick radius around a ring center, in pixels.
const HIT_RADIUS_MIN: f64 = 18.0;

const DEPTH_FLOOR: f64 = 1000.0;
const DEPTH_MOUNT: f64 = 900.0;
const DEPTH_AXIS: f64 = 850.0;
const DEPTH_TRACE: f64 = 800.0;
const DEPTH_SKIN: f64 = 100.0;
const DEPTH_CENTERLINE: f64 = 0.0;

const AXIS_GREEN: Rgba = Rgba::new(0x22, 0xc5, 0x5e);
const AXIS_BLUE: Rgba = Rgba::new(0x3b, 0x82, 0xf6);

/// One shaft station after projection.
struct Ring {
    x: f64,
    y: f64,
    radius: f64,
    color: Rgba,
    selected: bool,
}

pub struct IsometricView {
    trace: TraceBuffer,
}

impl IsometricView {
    pub fn new() -> Self {
        Self {
            trace: TraceBuffer::new(),
        }
    }

    pub fn trace_len(&self) -> usize {
        self.trace.len()
    }
}

impl Default for IsometricView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer for IsometricView {
    fn label(&self) -> &'static str {
        "isometric"
    }

    fn viewport(&self) -> (f64, f64) {
        (VIEWPORT_W, VIEWPORT_H)
    }

    fn render(&mut self, input: &RenderInput<'_>) -> Scene {
        let mut scene = Scene::new(VIEWPORT_W, VIEWPORT_H);
        push_floor(&mut scene, input);
        push_axis_triad(&mut scene, input);
        push_mounts(&mut scene, input);

        let rings = ring_layout(input);
        let centerline: Vec<(f64, f64)> = rings.iter().map(|r| (r.x, r.y)).collect();

        // Whirl trail: ghost centerlines from previous frames, oldest
        // faintest. Any retune of mode/amplitude/damping restarts it.
        let settings = input.settings;
        if settings.show_trace {
            self.trace.retune(TraceKey {
                mode: settings.active_mode,
                amplitude: settings.amplitude_scale,
                damping: settings.damping,
            });
            if input.playing {
                self.trace.push(centerline.clone());
            }
            let capacity = self.trace.capacity() as f64;
            for (age, path) in self.trace.iter().enumerate() {
                let alpha = (age as f64 / capacity) * 0.3;
                scene.push(
                    Primitive::polyline(path.clone(), views::ACCENT.faded(alpha))
                        .with_width(4.0)
                        .at_depth(DEPTH_TRACE),
                );
            }
        } else {
            self.trace.clear();
        }

        push_skin(&mut scene, &rings);

        scene.push(
            Primitive::polyline(centerline, views::ACCENT.faded(0.4))
                .with_width(2.0)
                .at_depth(DEPTH_CENTERLINE),
        );

        if input.danger {
            push_danger_frame(&mut scene);
        }
        scene
    }

    fn segment_at(&self, point: (f64, f64), input: &RenderInput<'_>) -> Option<usize> {
        let rings = ring_layout(input);
        let mut best: Option<(usize, f64)> = None;
        for (index, ring) in rings.iter().enumerate() {
            let d = ((point.0 - ring.x).powi(2) + (point.1 - ring.y).powi(2)).sqrt();
            if d <= ring.radius.max(HIT_RADIUS_MIN)
                && best.map(|(_, bd)| d < bd).unwrap_or(true)
            {
                best = Some((index, d));
            }
        }
        best.map(|(index, _)| index)
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Project every shaft station for the current phase.
fn ring_layout(input: &RenderInput<'_>) -> Vec<Ring> {
    let data = input.data;
    let settings = input.settings;
    let n = data.segment_count();
    let span = (n.saturating_sub(1)).max(1) as f64;
    let mode = data.modes.get(settings.active_mode);
    let gain = settings.amplitude_scale * SCALE_ISOMETRIC * damping_modifier(settings.damping);

    data.shaft_segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let x = i as f64 / span - 0.5;
            let displacement = mode
                .map(|m| sampler::sample(i, m, n))
                .unwrap_or(0.0);
            let deflection = displacement * gain;
            let world = (
                x,
                deflection * input.phase.cos(),
                deflection * input.phase.sin(),
            );
            let p = project_iso(world, input.camera, (VIEWPORT_W, VIEWPORT_H));
            Ring {
                x: p.x,
                y: p.y,
                radius: segment.outer_diameter * RING_RADIUS_GAIN * p.scale,
                color: views::segment_color(segment),
                selected: input.selection.is_segment_selected(i),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Static furniture
// ---------------------------------------------------------------------------

fn push_floor(scene: &mut Scene, input: &RenderInput<'_>) {
    let color = views::GRID.faded(0.4);
    let viewport = (VIEWPORT_W, VIEWPORT_H);
    let mut grid_line = |a: (f64, f64, f64), b: (f64, f64, f64)| {
        let pa = project_iso(a, input.camera, viewport);
        let pb = project_iso(b, input.camera, viewport);
        scene.push(
            Primitive::polyline(vec![(pa.x, pa.y), (pb.x, pb.y)], color)
                .dashed()
                .at_depth(DEPTH_FLOOR),
        );
    };
    for i in 0..=FLOOR_STEPS {
        let t = i as f64 / FLOOR_STEPS as f64;
        let x = -FLOOR_HALF_X + t * 2.0 * FLOOR_HALF_X;
        grid_line((x, FLOOR_Y, -FLOOR_HALF_Z), (x, FLOOR_Y, FLOOR_HALF_Z));
        let z = -FLOOR_HALF_Z + t * 2.0 * FLOOR_HALF_Z;
        grid_line((-FLOOR_HALF_X, FLOOR_Y, z), (FLOOR_HALF_X, FLOOR_Y, z));
    }
}

fn push_axis_triad(scene: &mut Scene, input: &RenderInput<'_>) {
    let viewport = (VIEWPORT_W, VIEWPORT_H);
    let origin = (-FLOOR_HALF_X, FLOOR_Y, 0.0);
    let o = project_iso(origin, input.camera, viewport);
    let mut axis = |tip: (f64, f64, f64), color: Rgba| {
        let p = project_iso(tip, input.camera, viewport);
        scene.push(
            Primitive::polyline(vec![(o.x, o.y), (p.x, p.y)], color)
                .with_width(1.5)
                .at_depth(DEPTH_AXIS),
        );
    };
    axis((origin.0, origin.1, AXIS_LEN), views::ALERT);
    axis((origin.0, origin.1 + AXIS_LEN, origin.2), AXIS_GREEN);
    axis((origin.0 + AXIS_LEN, origin.1, origin.2), AXIS_BLUE);
    scene.push(
        Primitive::circle(o.x, o.y, 2.0, views::WHITE)
            .filled()
            .at_depth(DEPTH_AXIS),
    );
}

/// One pyramid per support, apex on the undeflected centerline, base on the
/// floor.
fn push_mounts(scene: &mut Scene, input: &RenderInput<'_>) {
    let viewport = (VIEWPORT_W, VIEWPORT_H);
    for support in input.data.supports() {
        let x = support.position - 0.5;
        let apex = (x, 0.0, 0.0);
        let base = [
            (x - MOUNT_HALF_WIDTH, FLOOR_Y, -MOUNT_HALF_WIDTH),
            (x + MOUNT_HALF_WIDTH, FLOOR_Y, -MOUNT_HALF_WIDTH),
            (x + MOUNT_HALF_WIDTH, FLOOR_Y, MOUNT_HALF_WIDTH),
            (x - MOUNT_HALF_WIDTH, FLOOR_Y, MOUNT_HALF_WIDTH),
        ];
        // Rear faces first so the nearer faces overdraw them.
        for (a, b) in [(2, 3), (3, 0), (1, 2), (0, 1)] {
            let face = [apex, base[a], base[b]];
            let pts: Vec<(f64, f64)> = face
                .iter()
                .map(|&w| {
                    let p = project_iso(w, input.camera, viewport);
                    (p.x, p.y)
                })
                .collect();
            let mut outline = pts.clone();
            outline.push(pts[0]);
            scene.push(
                Primitive::polygon(pts, views::HOUSING.faded(0.05))
                    .filled()
                    .at_depth(DEPTH_MOUNT),
            );
            scene.push(
                Primitive::polyline(outline, views::HOUSING.faded(0.3)).at_depth(DEPTH_MOUNT),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Shaft body
// ---------------------------------------------------------------------------

/// Solid skin: quads between consecutive rings, offset along the screen
/// normal of the centerline so the silhouette follows the whirl.
fn push_skin(scene: &mut Scene, rings: &[Ring]) {
    for i in 0..rings.len().saturating_sub(1) {
        let a = &rings[i];
        let b = &rings[i + 1];
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let dist = (dx * dx + dy * dy).sqrt();
        let d = if dist == 0.0 { 1.0 } else { dist };
        let (nx, ny) = (-dy / d, dx / d);

        let quad = vec![
            (a.x + nx * a.radius, a.y + ny * a.radius),
            (b.x + nx * b.radius, b.y + ny * b.radius),
            (b.x - nx * b.radius, b.y - ny * b.radius),
            (a.x - nx * a.radius, a.y - ny * a.radius),
        ];
        let depth = DEPTH_SKIN + i as f64;
        scene.push(
            Primitive::polygon(quad.clone(), a.color.faded(0.92))
                .filled()
                .at_depth(depth),
        );
        // Lit upper edge stands in for the radial gradient of a round body.
        scene.push(
            Primitive::polyline(vec![quad[0], quad[1]], a.color.lighten(0.3))
                .at_depth(depth - 0.5),
        );
        if a.selected {
            let mut outline = quad;
            outline.push(outline[0]);
            scene.push(
                Primitive::polyline(outline, views::ACCENT)
                    .with_width(1.5)
                    .at_depth(depth - 0.4),
            );
        }
    }
}
