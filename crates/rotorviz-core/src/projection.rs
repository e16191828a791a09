//! Camera state and the two screen projections.
//!
//! Both projections are pure: identical inputs give identical outputs, so
//! a frozen clock means a frozen picture. World space is right-handed with
//! the shaft along x, y up, and z toward the viewer; screen space has y
//! growing downward.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

pub const ZOOM_MIN: f64 = 0.1;
pub const ZOOM_MAX: f64 = 10.0;
/// Pitch is clamped to a half turn so the model never flips overhead.
pub const PITCH_LIMIT: f64 = FRAC_PI_2;

/// Perspective tuning for the isometric projection.
const FOCAL: f64 = 750.0;
const DEPTH_OFFSET: f64 = 2.5;
const DEPTH_GAIN: f64 = 0.5;

/// Field of view for the radial single-axis projection.
const RADIAL_FOV: f64 = 400.0;

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

/// Orbit camera shared by the isometric views; the other views only read
/// `pan`/`zoom` where it makes sense for them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub yaw: f64,
    pub pitch: f64,
    pub zoom: f64,
    pub pan: (f64, f64),
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            yaw: -FRAC_PI_4,
            pitch: FRAC_PI_6,
            zoom: 2.1,
            pan: (0.0, 0.0),
        }
    }
}

impl CameraState {
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan.0 += dx;
        self.pan.1 += dy;
    }

    pub fn rotate_by(&mut self, d_yaw: f64, d_pitch: f64) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.zoom = (self.zoom + delta).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

/// A projected point: screen position, per-point size scale, and the
/// post-rotation depth used for painter ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub depth: f64,
}

/// Perspective projection used by the isometric view: yaw about the
/// vertical axis, pitch about the transverse axis, then a perspective
/// divide. Zoom and pan are folded in about the viewport center, and the
/// returned `scale` already includes zoom so radii multiply straight in.
pub fn project_iso(point: (f64, f64, f64), camera: &CameraState, viewport: (f64, f64)) -> Projected {
    let (x, y, z) = point;
    let (cos_yaw, sin_yaw) = (camera.yaw.cos(), camera.yaw.sin());
    let x1 = x * cos_yaw - z * sin_yaw;
    let z1 = x * sin_yaw + z * cos_yaw;

    let (cos_pitch, sin_pitch) = (camera.pitch.cos(), camera.pitch.sin());
    let y2 = y * cos_pitch - z1 * sin_pitch;
    let z2 = y * sin_pitch + z1 * cos_pitch;

    let p = 1.0 / (DEPTH_OFFSET + z2 * DEPTH_GAIN);
    let (cx, cy) = (viewport.0 / 2.0, viewport.1 / 2.0);
    Projected {
        x: cx + camera.pan.0 + camera.zoom * x1 * FOCAL * p,
        y: cy + camera.pan.1 - camera.zoom * y2 * FOCAL * p,
        scale: camera.zoom * p,
        depth: z2,
    }
}

/// Single-axis perspective used by the radial orbit view: an in-plane
/// offset `(x, y)` at normalized axial position `axial` in [0, 1], with
/// depth growing down the shaft.
pub fn project_radial(x: f64, y: f64, axial: f64, viewport: (f64, f64)) -> Projected {
    let depth = 1.0 + axial * 4.0;
    let s = 1.0 / depth;
    let (cx, cy) = (viewport.0 / 2.0, viewport.1 / 2.0);
    Projected {
        x: cx + x * s * RADIAL_FOV,
        y: cy - y * s * RADIAL_FOV,
        scale: s,
        depth: axial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    const VIEWPORT: (f64, f64) = (1200.0, 900.0);

    #[test]
    fn test_origin_projects_to_center_plus_pan() {
        let mut camera = CameraState::default();
        camera.pan = (15.0, -8.0);
        let p = project_iso((0.0, 0.0, 0.0), &camera, VIEWPORT);
        assert!((p.x - 615.0).abs() < 1e-9);
        assert!((p.y - 442.0).abs() < 1e-9);
        // Perspective factor at the origin is 1/2.5.
        assert!((p.scale - camera.zoom / 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_full_yaw_turn_returns_to_start() {
        let camera = CameraState::default();
        let mut turned = camera;
        turned.yaw += TAU;
        let point = (0.3, -0.12, 0.25);
        let a = project_iso(point, &camera, VIEWPORT);
        let b = project_iso(point, &turned, VIEWPORT);
        assert!((a.x - b.x).abs() < 1e-9);
        assert!((a.y - b.y).abs() < 1e-9);
        assert!((a.scale - b.scale).abs() < 1e-9);
    }

    #[test]
    fn test_pitch_clamps_at_half_turn() {
        let mut camera = CameraState::default();
        camera.rotate_by(0.0, 10.0);
        assert_eq!(camera.pitch, PITCH_LIMIT);
        camera.rotate_by(0.0, -30.0);
        assert_eq!(camera.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn test_zoom_clamps_to_bounds() {
        let mut camera = CameraState::default();
        camera.zoom_by(100.0);
        assert_eq!(camera.zoom, ZOOM_MAX);
        camera.zoom_by(-100.0);
        assert_eq!(camera.zoom, ZOOM_MIN);
    }

    #[test]
    fn test_radial_front_is_larger_than_back() {
        let front = project_radial(0.25, 0.0, 0.0, (600.0, 600.0));
        let back = project_radial(0.25, 0.0, 1.0, (600.0, 600.0));
        assert!(front.scale > back.scale);
        assert_eq!(front.scale, 1.0);
        assert_eq!(back.scale, 0.2);
        // Same world offset lands nearer the center when farther away.
        assert!((back.x - 300.0).abs() < (front.x - 300.0).abs());
    }

    #[test]
    fn test_radial_y_grows_downward_on_screen() {
        let p = project_radial(0.0, 0.1, 0.0, (600.0, 600.0));
        assert!(p.y < 300.0);
    }
}
