//! View renderers and shared display state.
//!
//! Each view turns the dataset plus animation phase into a [`Scene`] of
//! depth-sorted primitives; backends only have to rasterize. The three
//! projections share settings, palette, and the [`ViewRenderer`] seam so the
//! composite view can drive them interchangeably.

pub mod isometric;
pub mod longitudinal;
pub mod radial;

pub use isometric::IsometricView;
pub use longitudinal::LongitudinalView;
pub use radial::RadialView;

use crate::interaction::SelectionState;
use crate::materials::material_by_id;
use crate::model::{ShaftSegment, SimulationData};
use crate::projection::CameraState;
use crate::scene::{Rgba, Scene};

// ---------------------------------------------------------------------------
// Palette (shared slate/cyan scheme; view-local tints stay in their modules)
// ---------------------------------------------------------------------------

pub(crate) const ACCENT: Rgba = Rgba::new(0x22, 0xd3, 0xee);
pub(crate) const HOUSING: Rgba = Rgba::new(0xfb, 0xbf, 0x24);
pub(crate) const ALERT: Rgba = Rgba::new(0xef, 0x44, 0x44);
pub(crate) const LABEL_GOLD: Rgba = Rgba::new(0xfc, 0xd3, 0x4d);
pub(crate) const SHAFT_DOT: Rgba = Rgba::new(0x06, 0xb6, 0xd4);
pub(crate) const GRID: Rgba = Rgba::new(0x47, 0x55, 0x69);
pub(crate) const CENTERLINE: Rgba = Rgba::new(0x33, 0x41, 0x55);
pub(crate) const CROSSHAIR: Rgba = Rgba::new(0x1e, 0x29, 0x3b);
pub(crate) const MUTED: Rgba = Rgba::new(0x64, 0x74, 0x8b);
pub(crate) const CONNECTOR: Rgba = Rgba::new(0x94, 0xa3, 0xb8);
pub(crate) const WHITE: Rgba = Rgba::new(0xff, 0xff, 0xff);

// ---------------------------------------------------------------------------
// Display settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Isometric,
    Radial,
    Longitudinal,
    All,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Isometric => "isometric",
            Self::Radial => "radial",
            Self::Longitudinal => "longitudinal",
            Self::All => "all",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "isometric" | "iso" => Some(Self::Isometric),
            "radial" => Some(Self::Radial),
            "longitudinal" | "long" => Some(Self::Longitudinal),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            Self::Isometric => Self::Radial,
            Self::Radial => Self::Longitudinal,
            Self::Longitudinal => Self::All,
            Self::All => Self::Isometric,
        }
    }
}

/// Line or shaded-disk drawing for the radial view; the other views ignore
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Line,
    Solid,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Solid => "solid",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Line => Self::Solid,
            Self::Solid => Self::Line,
        }
    }
}

pub const AMPLITUDE_MIN: f64 = 0.1;
pub const AMPLITUDE_MAX: f64 = 1.0;
pub const AMPLITUDE_STEP: f64 = 0.05;
pub const DAMPING_STEP: f64 = 0.05;

/// Everything the user can tune at runtime, minus the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    pub amplitude_scale: f64,
    pub damping: f64,
    pub active_mode: usize,
    pub view: ViewMode,
    pub render_mode: RenderMode,
    pub show_trace: bool,
    pub editing: bool,
    pub operating_rpm: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            amplitude_scale: 1.0,
            damping: 0.05,
            active_mode: 0,
            view: ViewMode::Isometric,
            render_mode: RenderMode::Line,
            show_trace: false,
            editing: false,
            operating_rpm: 3600.0,
        }
    }
}

impl ViewSettings {
    pub fn bump_amplitude(&mut self, up: bool) {
        let step = if up { AMPLITUDE_STEP } else { -AMPLITUDE_STEP };
        self.amplitude_scale = (self.amplitude_scale + step).clamp(AMPLITUDE_MIN, AMPLITUDE_MAX);
    }

    pub fn bump_damping(&mut self, up: bool) {
        let step = if up { DAMPING_STEP } else { -DAMPING_STEP };
        self.damping = (self.damping + step).clamp(0.0, 1.0);
    }

    /// Step to the next or previous mode shape, wrapping at the ends.
    pub fn cycle_mode(&mut self, mode_count: usize, forward: bool) {
        if mode_count == 0 {
            return;
        }
        self.active_mode = if forward {
            (self.active_mode + 1) % mode_count
        } else {
            (self.active_mode + mode_count - 1) % mode_count
        };
    }
}

/// Damping attenuates deflection but keeps 20% residual motion so fully
/// damped modes still read as alive on screen.
pub fn damping_modifier(damping: f64) -> f64 {
    1.0 - damping * 0.8
}

/// Display color for a segment: explicit override first, then material.
pub fn segment_color(segment: &ShaftSegment) -> Rgba {
    match &segment.color {
        Some(hex) => Rgba::from_hex(hex),
        None => Rgba::from_hex(material_by_id(&segment.material_id).color),
    }
}

// ---------------------------------------------------------------------------
// Renderer seam
// ---------------------------------------------------------------------------

/// Per-frame inputs common to all views.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub data: &'a SimulationData,
    pub camera: &'a CameraState,
    pub settings: &'a ViewSettings,
    pub phase: f64,
    pub playing: bool,
    pub selection: &'a SelectionState,
    /// Health is at Danger; views tint their frame as an alarm.
    pub danger: bool,
}

pub trait ViewRenderer {
    fn label(&self) -> &'static str;

    /// Native coordinate space the scene is produced in.
    fn viewport(&self) -> (f64, f64);

    fn render(&mut self, input: &RenderInput<'_>) -> Scene;

    /// Hit test: the segment under a viewport-space point, if any.
    fn segment_at(&self, _point: (f64, f64), _input: &RenderInput<'_>) -> Option<usize> {
        None
    }
}

/// Red alarm border drawn at the very front of a scene.
pub(crate) fn push_danger_frame(scene: &mut Scene) {
    let (w, h) = (scene.width, scene.height);
    let frame = vec![
        (4.0, 4.0),
        (w - 4.0, 4.0),
        (w - 4.0, h - 4.0),
        (4.0, h - 4.0),
        (4.0, 4.0),
    ];
    scene.push(
        crate::scene::Primitive::polyline(frame, ALERT.faded(0.8))
            .at_depth(-10.0)
            .with_width(2.0),
    );
}

// ---------------------------------------------------------------------------
// Composite view
// ---------------------------------------------------------------------------

const COMPOSITE_W: f64 = 1200.0;
const COMPOSITE_H: f64 = 900.0;
const INSET_BG: Rgba = Rgba::new(0x0f, 0x17, 0x2a);

/// Isometric view full-frame with radial and longitudinal insets layered on
/// top. Depth biases keep each layer's internal ordering while forcing the
/// insets to paint over the main scene.
pub fn compose_all(
    iso: &mut IsometricView,
    radial: &mut RadialView,
    longitudinal: &mut LongitudinalView,
    input: &RenderInput<'_>,
) -> Scene {
    let mut scene = Scene::new(COMPOSITE_W, COMPOSITE_H);
    scene.absorb(iso.render(input), 1.0, (0.0, 0.0), 20_000.0);

    let radial_rect = inset_rect(radial.viewport(), 0.45, (12.0, 12.0));
    push_inset_frame(&mut scene, radial_rect, "RADIAL", 15_000.0);
    scene.absorb(radial.render(input), 0.45, (12.0, 12.0), 10_000.0);

    let long_rect = inset_rect(longitudinal.viewport(), 0.35, (698.0, 678.0));
    push_inset_frame(&mut scene, long_rect, "LONGITUDINAL", 7_000.0);
    scene.absorb(longitudinal.render(input), 0.35, (698.0, 678.0), 0.0);

    scene
}

fn inset_rect(viewport: (f64, f64), scale: f64, offset: (f64, f64)) -> (f64, f64, f64, f64) {
    (offset.0, offset.1, viewport.0 * scale, viewport.1 * scale)
}

fn push_inset_frame(scene: &mut Scene, rect: (f64, f64, f64, f64), title: &str, depth: f64) {
    use crate::scene::Primitive;
    let (x, y, w, h) = rect;
    let corners = vec![(x, y), (x + w, y), (x + w, y + h), (x, y + h), (x, y)];
    scene.push(
        Primitive::polygon(corners.clone(), INSET_BG.faded(0.85))
            .filled()
            .at_depth(depth + 2.0),
    );
    scene.push(Primitive::polyline(corners, CENTERLINE).at_depth(depth + 1.0));
    scene.push(Primitive::text(x + 6.0, y + 10.0, title, MUTED.faded(0.9)).at_depth(depth));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::default_simulation;
    use crate::model::ShaftSegment;

    #[test]
    fn test_view_mode_cycle_covers_all() {
        let mut mode = ViewMode::Isometric;
        let mut seen = vec![mode];
        for _ in 0..3 {
            mode = mode.cycle();
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![
                ViewMode::Isometric,
                ViewMode::Radial,
                ViewMode::Longitudinal,
                ViewMode::All
            ]
        );
        assert_eq!(mode.cycle(), ViewMode::Isometric);
    }

    #[test]
    fn test_view_mode_names_round_trip() {
        for mode in [
            ViewMode::Isometric,
            ViewMode::Radial,
            ViewMode::Longitudinal,
            ViewMode::All,
        ] {
            assert_eq!(ViewMode::from_name(mode.as_str()), Some(mode));
        }
        assert_eq!(ViewMode::from_name("sideways"), None);
    }

    #[test]
    fn test_amplitude_clamps_to_slider_range() {
        let mut settings = ViewSettings::default();
        settings.bump_amplitude(true);
        assert_eq!(settings.amplitude_scale, AMPLITUDE_MAX);
        for _ in 0..40 {
            settings.bump_amplitude(false);
        }
        assert!((settings.amplitude_scale - AMPLITUDE_MIN).abs() < 1e-12);
    }

    #[test]
    fn test_mode_cycling_wraps_both_ways() {
        let mut settings = ViewSettings::default();
        settings.cycle_mode(5, false);
        assert_eq!(settings.active_mode, 4);
        settings.cycle_mode(5, true);
        assert_eq!(settings.active_mode, 0);
        settings.cycle_mode(0, true);
        assert_eq!(settings.active_mode, 0);
    }

    #[test]
    fn test_damping_modifier_keeps_residual_motion() {
        assert!((damping_modifier(0.0) - 1.0).abs() < 1e-12);
        assert!((damping_modifier(1.0) - 0.2).abs() < 1e-12);
        assert!((damping_modifier(0.05) - 0.96).abs() < 1e-12);
    }

    #[test]
    fn test_segment_color_prefers_override() {
        let mut segment = ShaftSegment {
            index: 0,
            length: 0.01,
            outer_diameter: 0.5,
            material_id: "steel".to_string(),
            color: Some("#ff0000".to_string()),
            label: None,
        };
        assert_eq!(segment_color(&segment), Rgba::new(255, 0, 0));
        segment.color = None;
        assert_eq!(segment_color(&segment), Rgba::from_hex("#94a3b8"));
    }

    #[test]
    fn test_composite_layers_all_three_views() {
        let data = default_simulation();
        let camera = CameraState::default();
        let settings = ViewSettings::default();
        let selection = SelectionState::default();
        let input = RenderInput {
            data: &data,
            camera: &camera,
            settings: &settings,
            phase: 0.7,
            playing: true,
            selection: &selection,
            danger: false,
        };

        let mut iso = IsometricView::new();
        let mut radial = RadialView::new();
        let mut longitudinal = LongitudinalView::new();
        let iso_len = iso.render(&input).len();
        let radial_len = radial.render(&input).len();
        let long_len = longitudinal.render(&input).len();

        let scene = compose_all(&mut iso, &mut radial, &mut longitudinal, &input);
        assert_eq!(scene.width, 1200.0);
        assert_eq!(scene.height, 900.0);
        // Everything from the three views plus two inset frames.
        assert_eq!(scene.len(), iso_len + radial_len + long_len + 6);
    }
}
