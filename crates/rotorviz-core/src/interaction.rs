//! Pointer, drag, and selection state shared by every view.
//!
//! The state machine is deliberately view-agnostic: views translate raw
//! input into abstract pointer events plus an optional segment hit, and this
//! module decides whether that becomes a camera orbit, a pan, a selection
//! click, or a diameter drag. Resize drags never mutate the model directly;
//! they emit [`ResizeRequest`]s for the caller to apply through
//! [`crate::edit`], keeping undo and retune policy in one place.

use std::collections::BTreeSet;

use crate::projection::CameraState;
use crate::views::ViewMode;

/// Radians of camera orbit per pixel of drag.
pub const ROTATE_SPEED: f64 = 0.005;
/// Diameter change per pixel of vertical drag.
pub const RESIZE_SENSITIVITY: f64 = 0.005;
/// Zoom change per wheel notch.
pub const ZOOM_STEP: f64 = 0.1;
/// Diameter bounds reachable by dragging. Tighter than the hard model
/// bounds so a runaway drag cannot produce a degenerate shaft.
pub const DRAG_DIA_MIN: f64 = 0.1;
pub const DRAG_DIA_MAX: f64 = 1.5;
/// Maximum press-to-release travel, in pixels, still counted as a click.
pub const CLICK_TOLERANCE: f64 = 3.0;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Selected shaft segments and/or rotor component.
///
/// Segment and component selection are mutually exclusive; picking one kind
/// clears the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    segments: BTreeSet<usize>,
    component: Option<String>,
}

impl SelectionState {
    /// Click a segment. A plain click selects exactly that segment; a
    /// multi-click toggles its membership, except that toggling off the
    /// last member re-selects it, so clicks never empty the selection.
    pub fn select_segment(&mut self, index: usize, multi: bool) {
        self.component = None;
        let mut next = if multi {
            self.segments.clone()
        } else {
            BTreeSet::new()
        };
        if !next.remove(&index) {
            next.insert(index);
        }
        if !multi || next.is_empty() {
            next = BTreeSet::from([index]);
        }
        self.segments = next;
    }

    pub fn select_component(&mut self, id: &str) {
        self.segments.clear();
        self.component = Some(id.to_string());
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.component = None;
    }

    pub fn is_segment_selected(&self, index: usize) -> bool {
        self.segments.contains(&index)
    }

    /// Selected segment indices in ascending order.
    pub fn segments(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments.iter().copied()
    }

    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.component.is_none()
    }
}

// ---------------------------------------------------------------------------
// Pointer events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerModifiers {
    pub shift: bool,
    pub ctrl: bool,
}

/// A segment under the pointer, as reported by a view's hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub diameter: f64,
}

/// Instruction to resize segments, produced by a diameter drag.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeRequest {
    /// Segment under the pointer when the drag started.
    pub pressed: usize,
    /// All segments the drag moves together.
    pub targets: Vec<usize>,
    /// Absolute diameter for the pressed segment.
    pub diameter: f64,
}

#[derive(Debug, Clone, PartialEq)]
enum DragState {
    Idle,
    Panning {
        last: (f64, f64),
    },
    Rotating {
        last: (f64, f64),
    },
    ResizingSegment {
        pressed: usize,
        targets: Vec<usize>,
        start_y: f64,
        start_diameter: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct Press {
    at: (f64, f64),
    moved: bool,
    hit: Option<Hit>,
    modifiers: PointerModifiers,
}

// ---------------------------------------------------------------------------
// Interaction state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Interaction {
    pub camera: CameraState,
    pub selection: SelectionState,
    drag: DragState,
    press: Option<Press>,
}

impl Default for Interaction {
    fn default() -> Self {
        Self {
            camera: CameraState::default(),
            selection: SelectionState::default(),
            drag: DragState::Idle,
            press: None,
        }
    }
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag. `hit` is the segment under the pointer, if the active
    /// view found one.
    ///
    /// While editing, pressing a segment starts a diameter drag: an
    /// unselected segment is selected first and dragged alone, while a
    /// segment already in the selection drags the whole group.
    pub fn pointer_down(
        &mut self,
        position: (f64, f64),
        button: PointerButton,
        modifiers: PointerModifiers,
        hit: Option<Hit>,
        view: ViewMode,
        editing: bool,
    ) {
        self.press = Some(Press {
            at: position,
            moved: false,
            hit,
            modifiers,
        });

        if editing && let Some(hit) = hit {
            let already = self.selection.is_segment_selected(hit.index);
            let targets = if already {
                self.selection.segments().collect()
            } else {
                vec![hit.index]
            };
            if !already {
                self.selection.select_segment(hit.index, modifiers.ctrl);
            }
            self.drag = DragState::ResizingSegment {
                pressed: hit.index,
                targets,
                start_y: position.1,
                start_diameter: hit.diameter,
            };
            return;
        }

        self.drag = match view {
            ViewMode::Isometric | ViewMode::All => {
                if button == PointerButton::Secondary || modifiers.shift {
                    DragState::Panning { last: position }
                } else {
                    DragState::Rotating { last: position }
                }
            }
            // Flat views have no orbit; any drag pans.
            ViewMode::Radial | ViewMode::Longitudinal => DragState::Panning { last: position },
        };
    }

    /// Move the pointer. Returns a resize instruction while a diameter drag
    /// is active.
    pub fn pointer_move(&mut self, position: (f64, f64)) -> Option<ResizeRequest> {
        if let Some(press) = &mut self.press
            && distance(press.at, position) > CLICK_TOLERANCE
        {
            press.moved = true;
        }

        match &mut self.drag {
            DragState::Idle => None,
            DragState::Panning { last } => {
                let (dx, dy) = (position.0 - last.0, position.1 - last.1);
                *last = position;
                self.camera.pan_by(dx, dy);
                None
            }
            DragState::Rotating { last } => {
                let (dx, dy) = (position.0 - last.0, position.1 - last.1);
                *last = position;
                self.camera.rotate_by(dx * ROTATE_SPEED, dy * ROTATE_SPEED);
                None
            }
            DragState::ResizingSegment {
                pressed,
                targets,
                start_y,
                start_diameter,
            } => {
                let diameter = (*start_diameter + (*start_y - position.1) * RESIZE_SENSITIVITY)
                    .clamp(DRAG_DIA_MIN, DRAG_DIA_MAX);
                Some(ResizeRequest {
                    pressed: *pressed,
                    targets: targets.clone(),
                    diameter,
                })
            }
        }
    }

    /// Release the pointer. A press that never travelled past the click
    /// tolerance and landed on a segment becomes a selection click.
    pub fn pointer_up(&mut self, position: (f64, f64)) {
        let was_resizing = matches!(self.drag, DragState::ResizingSegment { .. });
        if let Some(press) = self.press.take()
            && !was_resizing
            && !press.moved
            && distance(press.at, position) <= CLICK_TOLERANCE
            && let Some(hit) = press.hit
        {
            self.selection.select_segment(hit.index, press.modifiers.ctrl);
        }
        self.drag = DragState::Idle;
    }

    /// Pointer left the view; abandon any drag without a click.
    pub fn pointer_leave(&mut self) {
        self.press = None;
        self.drag = DragState::Idle;
    }

    /// Scroll wheel. Ignored while editing so a resize drag near the wheel
    /// cannot also change zoom.
    pub fn wheel(&mut self, up: bool, editing: bool) {
        if editing {
            return;
        }
        self.camera.zoom_by(if up { ZOOM_STEP } else { -ZOOM_STEP });
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != DragState::Idle
    }
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}
