//! Side elevation of the rotor train.
//!
//! Segments become rectangles whose height is the scaled outer diameter and
//! whose vertical offset follows the mode shape, so the machine reads as a
//! stepped beam bending in place. Outside of editing, consecutive segments
//! with identical diameter and color merge into one chunk to keep the
//! silhouette clean; editing splits the shaft back into individual
//! per-segment rectangles so each one can be grabbed and resized. Supports
//! are drawn as foundation pedestals below the centerline.

use crate::sampler;
use crate::scene::{Primitive, Rgba, Scene};
use crate::views::{self, damping_modifier, push_danger_frame, RenderInput, ViewRenderer};

const VIEWPORT_W: f64 = 1400.0;
const VIEWPORT_H: f64 = 600.0;
const PADDING_X: f64 = 30.0;
const CENTER_Y: f64 = 300.0;

/// Pixels of vertical deflection per unit of normalized displacement.
const DEFLECTION_GAIN: f64 = 40.0;
/// Full rectangle height per unit of segment diameter.
const HEIGHT_GAIN: f64 = 70.0;
const LABEL_CLEARANCE: f64 = 20.0;

const PEDESTAL_HEIGHT: f64 = 50.0;
const PEDESTAL_DROP: f64 = 30.0;
const PEDESTAL_FLARE: f64 = 5.0;
const PEDESTAL_MIN_WIDTH: f64 = 15.0;

const DEPTH_CENTERLINE: f64 = 1000.0;
const DEPTH_PEDESTAL: f64 = 900.0;
const DEPTH_SHAFT: f64 = 500.0;
const DEPTH_LABEL: f64 = 100.0;

#[derive(Default)]
pub struct LongitudinalView;

impl LongitudinalView {
    pub fn new() -> Self {
        Self
    }
}

impl ViewRenderer for LongitudinalView {
    fn label(&self) -> &'static str {
        "longitudinal"
    }

    fn viewport(&self) -> (f64, f64) {
        (VIEWPORT_W, VIEWPORT_H)
    }

    fn render(&mut self, input: &RenderInput<'_>) -> Scene {
        let mut scene = Scene::new(VIEWPORT_W, VIEWPORT_H);
        let pan = input.camera.pan;

        let axis = vec![
            (PADDING_X + pan.0, CENTER_Y + pan.1),
            (PADDING_X + draw_width() + pan.0, CENTER_Y + pan.1),
        ];
        scene.push(
            Primitive::polyline(axis, views::CENTERLINE)
                .dashed()
                .at_depth(DEPTH_CENTERLINE),
        );

        push_pedestals(&mut scene, input);
        if input.settings.editing {
            push_segments(&mut scene, input);
        } else {
            push_chunks(&mut scene, input);
        }
        push_labels(&mut scene, input);

        if input.danger {
            push_danger_frame(&mut scene);
        }
        scene
    }

    /// Segments tile the x axis, so the hit test is an x-band lookup plus a
    /// vertical tolerance of the segment's half-height and a grab margin.
    fn segment_at(&self, point: (f64, f64), input: &RenderInput<'_>) -> Option<usize> {
        let n = input.data.segment_count();
        if n == 0 {
            return None;
        }
        let pan = input.camera.pan;
        let x = point.0 - pan.0 - PADDING_X;
        if x < 0.0 {
            return None;
        }
        let index = (x / segment_width(n)) as usize;
        if index >= n {
            return None;
        }
        let half = input.data.shaft_segments[index].outer_diameter * HEIGHT_GAIN / 2.0;
        let center = station_y(input, index) + pan.1;
        ((point.1 - center).abs() <= half + LABEL_CLEARANCE).then_some(index)
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

fn draw_width() -> f64 {
    VIEWPORT_W - 2.0 * PADDING_X
}

fn segment_width(n: usize) -> f64 {
    draw_width() / n as f64
}

/// Centerline y of a station, before pan.
fn station_y(input: &RenderInput<'_>, index: usize) -> f64 {
    let settings = input.settings;
    let displacement = input
        .data
        .modes
        .get(settings.active_mode)
        .map(|m| sampler::sample(index, m, input.data.segment_count()))
        .unwrap_or(0.0);
    let y_scale = DEFLECTION_GAIN * settings.amplitude_scale * damping_modifier(settings.damping);
    CENTER_Y + displacement * y_scale * input.phase.cos()
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Vec<(f64, f64)> {
    vec![(x, y), (x + w, y), (x + w, y + h), (x, y + h)]
}

fn closed(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut outline = points.to_vec();
    outline.push(points[0]);
    outline
}

/// Text nudged left so it reads roughly centered on `x`.
fn centered_text(x: f64, y: f64, text: &str, color: Rgba) -> Primitive {
    Primitive::text(x - 3.0 * text.len() as f64, y, text, color)
}

// ---------------------------------------------------------------------------
// Shaft body
// ---------------------------------------------------------------------------

/// A run of consecutive segments with identical diameter and color.
struct Chunk {
    start: usize,
    end: usize,
    diameter: f64,
    color: Rgba,
}

fn merge_chunks(input: &RenderInput<'_>) -> Vec<Chunk> {
    let mut chunks: Vec<Chunk> = Vec::new();
    for (i, segment) in input.data.shaft_segments.iter().enumerate() {
        let color = views::segment_color(segment);
        match chunks.last_mut() {
            Some(last) if last.diameter == segment.outer_diameter && last.color == color => {
                last.end = i;
            }
            _ => chunks.push(Chunk {
                start: i,
                end: i,
                diameter: segment.outer_diameter,
                color,
            }),
        }
    }
    chunks
}

fn push_chunks(scene: &mut Scene, input: &RenderInput<'_>) {
    let n = input.data.segment_count();
    let seg_w = segment_width(n);
    let pan = input.camera.pan;
    for chunk in merge_chunks(input) {
        // The whole run rides the deflection of its middle station.
        let mid = (chunk.start + chunk.end) / 2;
        let height = chunk.diameter * HEIGHT_GAIN;
        let x = PADDING_X + chunk.start as f64 * seg_w + pan.0;
        let y = station_y(input, mid) - height / 2.0 + pan.1;
        let w = (chunk.end - chunk.start + 1) as f64 * seg_w;
        let body = rect(x, y, w, height);
        scene.push(
            Primitive::polygon(body.clone(), chunk.color.faded(0.9))
                .filled()
                .at_depth(DEPTH_SHAFT),
        );
        scene.push(
            Primitive::polyline(closed(&body), chunk.color.darken(0.7)).at_depth(DEPTH_SHAFT - 0.5),
        );
    }
}

fn push_segments(scene: &mut Scene, input: &RenderInput<'_>) {
    let n = input.data.segment_count();
    let seg_w = segment_width(n);
    let pan = input.camera.pan;
    for (i, segment) in input.data.shaft_segments.iter().enumerate() {
        let selected = input.selection.is_segment_selected(i);
        let height = segment.outer_diameter * HEIGHT_GAIN;
        let x = PADDING_X + i as f64 * seg_w + pan.0;
        let y = station_y(input, i) - height / 2.0 + pan.1;
        let body = rect(x, y, seg_w, height);
        let alpha = if selected { 1.0 } else { 0.8 };
        scene.push(
            Primitive::polygon(body.clone(), views::segment_color(segment).faded(alpha))
                .filled()
                .at_depth(DEPTH_SHAFT),
        );
        if selected {
            scene.push(
                Primitive::polyline(closed(&body), views::ACCENT)
                    .with_width(1.5)
                    .at_depth(DEPTH_SHAFT - 0.5),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Furniture
// ---------------------------------------------------------------------------

fn push_pedestals(scene: &mut Scene, input: &RenderInput<'_>) {
    let pan = input.camera.pan;
    for support in input.data.supports() {
        let x = PADDING_X + support.position * draw_width() + pan.0;
        let width = support.width.filter(|w| *w > 0.0).unwrap_or(0.05);
        let w = (width * draw_width()).max(PEDESTAL_MIN_WIDTH);
        let top = CENTER_Y + PEDESTAL_DROP + pan.1;
        let bottom = top + PEDESTAL_HEIGHT;

        let body = vec![
            (x - w / 2.0, top),
            (x + w / 2.0, top),
            (x + w / 2.0 + PEDESTAL_FLARE, bottom),
            (x - w / 2.0 - PEDESTAL_FLARE, bottom),
        ];
        scene.push(
            Primitive::polygon(body.clone(), views::HOUSING.faded(0.15))
                .filled()
                .at_depth(DEPTH_PEDESTAL),
        );
        scene.push(
            Primitive::polyline(closed(&body), views::HOUSING.faded(0.5))
                .at_depth(DEPTH_PEDESTAL - 0.5),
        );
        let plinth = rect(x - (w + 10.0) / 2.0, bottom, w + 10.0, 5.0);
        scene.push(
            Primitive::polygon(plinth, views::HOUSING)
                .filled()
                .at_depth(DEPTH_PEDESTAL - 0.4),
        );
        scene.push(
            centered_text(
                x,
                bottom + 15.0,
                &support.name,
                views::HOUSING.faded(0.8),
            )
            .at_depth(DEPTH_PEDESTAL - 0.3),
        );
    }
}

/// Named stations get a gold caption floating above the shaft with a short
/// leader line pointing down at it.
fn push_labels(scene: &mut Scene, input: &RenderInput<'_>) {
    let n = input.data.segment_count();
    let seg_w = segment_width(n);
    let pan = input.camera.pan;
    for (i, segment) in input.data.shaft_segments.iter().enumerate() {
        let Some(label) = segment.label.as_deref() else {
            continue;
        };
        let x = PADDING_X + i as f64 * seg_w + seg_w / 2.0 + pan.0;
        let y = station_y(input, i) - segment.outer_diameter * HEIGHT_GAIN / 2.0
            - LABEL_CLEARANCE
            + pan.1;
        scene.push(centered_text(x, y, label, views::LABEL_GOLD).at_depth(DEPTH_LABEL - 0.5));
        scene.push(
            Primitive::polyline(vec![(x, y + 10.0), (x, y + 30.0)], views::CONNECTOR)
                .at_depth(DEPTH_LABEL),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::default_simulation;
    use crate::interaction::SelectionState;
    use crate::model::SimulationData;
    use crate::projection::CameraState;
    use crate::scene::Shape;
    use crate::views::ViewSettings;

    struct Rig {
        data: SimulationData,
        camera: CameraState,
        settings: ViewSettings,
        selection: SelectionState,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                data: default_simulation(),
                camera: CameraState::default(),
                settings: ViewSettings::default(),
                selection: SelectionState::default(),
            }
        }

        fn input(&self) -> RenderInput<'_> {
            RenderInput {
                data: &self.data,
                camera: &self.camera,
                settings: &self.settings,
                phase: 0.0,
                playing: true,
                selection: &self.selection,
                danger: false,
            }
        }
    }

    // Centerline, five pedestals of 4 primitives, four labels of 2.
    const FURNITURE: usize = 1 + 5 * 4 + 4 * 2;

    #[test]
    fn test_display_mode_merges_uniform_runs() {
        let rig = Rig::new();
        let scene = LongitudinalView::new().render(&rig.input());
        // The default shaft merges into 27 constant-profile runs.
        assert_eq!(scene.len(), FURNITURE + 27 * 2);
    }

    #[test]
    fn test_editing_draws_every_segment() {
        let mut rig = Rig::new();
        rig.settings.editing = true;
        let scene = LongitudinalView::new().render(&rig.input());
        assert_eq!(scene.len(), FURNITURE + 100);

        rig.selection.select_segment(50, false);
        let scene = LongitudinalView::new().render(&rig.input());
        assert_eq!(scene.len(), FURNITURE + 100 + 1);
    }

    #[test]
    fn test_segment_at_maps_x_bands() {
        let rig = Rig::new();
        let view = LongitudinalView::new();
        let input = rig.input();

        let x = PADDING_X + 28.5 * segment_width(100);
        let y = station_y(&input, 28);
        assert_eq!(view.segment_at((x, y), &input), Some(28));

        // Far above the shaft: outside the grab band.
        assert_eq!(view.segment_at((x, y - 200.0), &input), None);
        // Off the right edge of the drawn shaft.
        assert_eq!(view.segment_at((PADDING_X + draw_width() + 20.0, y), &input), None);
        // Left gutter.
        assert_eq!(view.segment_at((5.0, y), &input), None);
    }

    #[test]
    fn test_segment_at_honors_pan() {
        let mut rig = Rig::new();
        rig.camera.pan = (100.0, 40.0);
        let view = LongitudinalView::new();
        let input = rig.input();

        let x = PADDING_X + 10.5 * segment_width(100) + 100.0;
        let y = station_y(&input, 10) + 40.0;
        assert_eq!(view.segment_at((x, y), &input), Some(10));
    }

    #[test]
    fn test_label_rides_the_deflected_shaft() {
        let rig = Rig::new();
        let input = rig.input();
        let scene = LongitudinalView::new().render(&input);

        let label_y = scene
            .primitives()
            .iter()
            .find_map(|p| match &p.shape {
                Shape::Text { y, text, .. } if text == "L-0 Stage" => Some(*y),
                _ => None,
            })
            .expect("station label missing");
        // Station 62 has diameter 0.4, so the caption floats half its
        // height plus clearance above the deflected centerline.
        let expected = station_y(&input, 62) - 0.4 * HEIGHT_GAIN / 2.0 - LABEL_CLEARANCE;
        assert!((label_y - expected).abs() < 1e-9);
    }
}
