//! Integration tests for rotorviz-core.
//!
//! These tests verify the full visualization pipeline:
//! dataset → views → pointer editing → retuning → health and persistence.

use rotorviz_core::{
    AnimationClock, FrameScheduler, Hit, Interaction, IsometricView, LongitudinalView,
    OrbitMonitor, PointerButton, PointerModifiers, RadialView, RenderInput, ScriptedScheduler,
    SelectionState, ViewMode, ViewRenderer, ViewSettings, compose_all, default_simulation,
};
use rotorviz_core::{clock, edit, health, response, store};

fn render_input<'a>(
    data: &'a rotorviz_core::SimulationData,
    camera: &'a rotorviz_core::CameraState,
    settings: &'a ViewSettings,
    selection: &'a SelectionState,
    phase: f64,
) -> RenderInput<'a> {
    RenderInput {
        data,
        camera,
        settings,
        phase,
        playing: true,
        selection,
        danger: false,
    }
}

#[test]
fn default_dataset_is_valid_and_renders_in_every_view() {
    let data = default_simulation();
    data.validate().expect("shipped dataset must validate");

    let camera = rotorviz_core::CameraState::default();
    let settings = ViewSettings::default();
    let selection = SelectionState::default();
    let input = render_input(&data, &camera, &settings, &selection, 0.9);

    let mut iso = IsometricView::new();
    let mut radial = RadialView::new();
    let mut longitudinal = LongitudinalView::new();
    for scene in [
        iso.render(&input),
        radial.render(&input),
        longitudinal.render(&input),
        compose_all(&mut iso, &mut radial, &mut longitudinal, &input),
    ] {
        assert!(scene.len() > 50, "view produced only {} primitives", scene.len());
    }
}

#[test]
fn editing_drag_flows_from_pointer_to_model() {
    let mut data = default_simulation();
    let rpm_before: Vec<f64> = data.modes.iter().map(|m| m.rpm).collect();

    let camera = rotorviz_core::CameraState::default();
    let mut settings = ViewSettings::default();
    settings.editing = true;
    settings.view = ViewMode::Longitudinal;
    let selection = SelectionState::default();

    // Find segment 28 on screen the way the TUI would.
    let view = LongitudinalView::new();
    let input = render_input(&data, &camera, &settings, &selection, 0.0);
    let probe = (30.0 + 28.5 * (1340.0 / 100.0), 300.0);
    let index = view.segment_at(probe, &input).expect("segment under pointer");
    assert_eq!(index, 28);

    let mut interaction = Interaction::new();
    let hit = Hit {
        index,
        diameter: data.shaft_segments[index].outer_diameter,
    };
    interaction.pointer_down(
        probe,
        PointerButton::Primary,
        PointerModifiers::default(),
        Some(hit),
        ViewMode::Longitudinal,
        true,
    );
    // Drag 40 px upward: +0.2 diameter at 0.005 per pixel.
    let request = interaction
        .pointer_move((probe.0, probe.1 - 40.0))
        .expect("resize request");
    interaction.pointer_up((probe.0, probe.1 - 40.0));

    let delta = edit::resize_segments(&mut data, request.pressed, &request.targets, request.diameter)
        .expect("resize applies");
    assert!((delta - 0.2).abs() < 1e-9);
    assert!((data.shaft_segments[28].outer_diameter - 1.15).abs() < 1e-9);

    // Every critical speed shifts by the same relative amount and the
    // frequency column stays the rpm / 60 identity.
    for (mode, before) in data.modes.iter().zip(rpm_before) {
        assert!((mode.rpm - before * 1.01).abs() < 1e-6);
        assert!((mode.frequency_hz - mode.rpm / 60.0).abs() < 1e-9);
    }
}

#[test]
fn group_resize_moves_targets_in_lock_step_with_one_retune() {
    let mut data = default_simulation();
    let rpm_before = data.modes[0].rpm;
    let d10 = data.shaft_segments[10].outer_diameter;
    let d20 = data.shaft_segments[20].outer_diameter;

    let mut interaction = Interaction::new();
    interaction.selection.select_segment(10, false);
    interaction.selection.select_segment(20, true);
    interaction.pointer_down(
        (200.0, 300.0),
        PointerButton::Primary,
        PointerModifiers::default(),
        Some(Hit {
            index: 10,
            diameter: d10,
        }),
        ViewMode::Longitudinal,
        true,
    );
    let request = interaction.pointer_move((200.0, 280.0)).expect("resize request");
    assert_eq!(request.targets, vec![10, 20]);

    edit::resize_segments(&mut data, request.pressed, &request.targets, request.diameter).unwrap();
    let delta = data.shaft_segments[10].outer_diameter - d10;
    assert!((delta - 0.1).abs() < 1e-9);
    assert!((data.shaft_segments[20].outer_diameter - (d20 + delta)).abs() < 1e-9);
    // One retune for the whole gesture, not one per target.
    let expected_rpm = rpm_before * (1.0 + delta * edit::FREQUENCY_SHIFT_PER_DIA);
    assert!((data.modes[0].rpm - expected_rpm).abs() < 1e-6);
}

#[test]
fn edited_dataset_survives_a_save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edited.json");

    let mut data = default_simulation();
    edit::resize_segment(&mut data, 50, 1.3).unwrap();
    edit::update_segment_label(&mut data, 50, Some("Ballast Ring".to_string()));
    store::save(&path, &data).unwrap();

    let loaded = store::load(&path).unwrap();
    assert_eq!(loaded.shaft_segments[50].outer_diameter, data.shaft_segments[50].outer_diameter);
    assert_eq!(loaded.shaft_segments[50].label.as_deref(), Some("Ballast Ring"));
    for (a, b) in loaded.modes.iter().zip(&data.modes) {
        assert_eq!(a.rpm, b.rpm);
        assert_eq!(a.frequency_hz, b.frequency_hz);
    }
}

#[test]
fn response_sweep_and_health_agree_on_resonance_conflicts() {
    let data = default_simulation();
    // Mode 4 ships at exactly the hydrogen-unit operating speed, inside the
    // primary exclusion zone.
    let sweep = response::sweep(&data.modes, 3600.0);
    assert!(sweep.exclusion_zones[0].contains(3600.0));
    assert!(sweep.critical_speeds.iter().any(|&rpm| rpm == 3600.0));

    let report = health::evaluate(&data, 0, 1.0, 0.05, 3600.0);
    assert_eq!(report.status, health::HealthStatus::Danger);
    assert!(report.message.contains("3600"));
    assert!(report.conflicts >= 1);
}

#[test]
fn orbit_monitor_readings_stay_under_the_peak_estimate() {
    let data = default_simulation();
    let settings = ViewSettings::default();
    let peak = health::estimated_mils(&data.modes[0], settings.amplitude_scale, settings.damping);

    let mut monitors = OrbitMonitor::for_bearings(&data);
    assert_eq!(monitors.len(), 4);
    for monitor in &mut monitors {
        let sample = monitor.tick(&data, 0, settings.amplitude_scale, settings.damping, true);
        assert!(
            sample.mils <= peak + 1e-9,
            "{} reads {} mils above the {} mils peak",
            monitor.name(),
            sample.mils,
            peak
        );
    }
}

#[test]
fn paused_clock_freezes_every_view() {
    let data = default_simulation();
    let camera = rotorviz_core::CameraState::default();
    let settings = ViewSettings::default();
    let selection = SelectionState::default();

    let mut clock = AnimationClock::new();
    clock.tick();
    clock.toggle();
    let frozen = clock.phase();
    clock.tick();
    assert_eq!(clock.phase(), frozen);

    let input = render_input(&data, &camera, &settings, &selection, frozen);
    let mut radial = RadialView::new();
    let first = radial.render(&input);
    let second = radial.render(&input);
    assert_eq!(first.primitives(), second.primitives());
}

#[test]
fn scripted_scheduler_drives_an_exact_frame_count() {
    let mut scheduler = ScriptedScheduler::new(8);
    let mut clock = AnimationClock::new();
    while scheduler.next_frame() {
        clock.tick();
    }
    assert!((clock.phase() - 8.0 * clock::PHASE_STEP).abs() < 1e-12);
}
