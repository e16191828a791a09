//! # rotorviz-core
//!
//! **A steam turbine rotor train, live in your terminal.**
//!
//! `rotorviz-core` is the rotor dynamics engine behind the `rotorviz`
//! visualizer: mode-shape sampling, three projections of the deflected
//! shaft, live diameter editing coupled to critical-speed retuning,
//! unbalance response sweeps, health grading against resonance exclusion
//! zones, and per-bearing orbit monitors.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rotorviz_core::dataset::default_simulation;
//! use rotorviz_core::{edit, health};
//!
//! // Ship a 100-station turbine generator train out of the box.
//! let mut data = default_simulation();
//!
//! // Thicken one segment; every critical speed shifts with it.
//! edit::resize_segment(&mut data, 28, 1.1);
//!
//! // Grade the result against the resonance exclusion zones.
//! let report = health::evaluate(&data, 0, 1.0, 0.05, 3600.0);
//! println!("{}: {}", report.status.as_str(), report.message);
//! ```
//!
//! ## Architecture
//!
//! Dataset → sampler → views → [`scene::Scene`] → backend
//!
//! Three projections of one whirling centerline:
//! - **Isometric**: orbit camera, solid skin panels between stations, ghost
//!   whirl traces, support pyramids on a ground grid.
//! - **Radial**: down-the-bore helix so every station stays visible, with
//!   bearing housings and a red leading-edge marker.
//! - **Longitudinal**: side elevation of editable segment rectangles with
//!   foundation pedestals and station captions.
//!
//! Views emit display-agnostic draw lists; the TUI rasterizes them and
//! tests inspect them directly. Pointer input flows through
//! [`interaction::Interaction`], comes back as resize requests, and is
//! applied by [`edit`] so diameter-to-frequency coupling lives in exactly
//! one place.

pub mod clock;
pub mod dataset;
pub mod edit;
pub mod health;
pub mod interaction;
pub mod machine;
pub mod materials;
pub mod model;
pub mod orbit;
pub mod projection;
pub mod response;
pub mod sampler;
pub mod scene;
pub mod store;
pub mod trace;
pub mod views;

pub use clock::{AnimationClock, FrameScheduler, IntervalScheduler, ScriptedScheduler};
pub use dataset::{SEGMENT_COUNT, default_simulation};
pub use edit::{resize_segment, resize_segments, retune_modes};
pub use health::{HealthReport, HealthStatus};
pub use interaction::{
    Hit, Interaction, PointerButton, PointerModifiers, ResizeRequest, SelectionState,
};
pub use machine::{GridFrequency, MachineClass, operating_rpm};
pub use materials::{DEFAULT_MATERIAL_ID, MATERIALS, Material, material_by_id};
pub use model::{
    BearingPhysics, ComponentKind, EffectiveCoefficients, ModeShape, RotorComponent, ShaftSegment,
    SimulationData, SpeedCoefficient,
};
pub use orbit::{OrbitMonitor, OrbitSample};
pub use projection::{CameraState, Projected, project_iso, project_radial};
pub use response::{ResponsePoint, ResponseSweep, SpeedBand, amplitude_at, sweep};
pub use scene::{Primitive, Rgba, Scene, Shape};
pub use trace::{TraceBuffer, TraceKey};
pub use views::{
    IsometricView, LongitudinalView, RadialView, RenderInput, RenderMode, ViewMode, ViewRenderer,
    ViewSettings, compose_all,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
