//! TUI application state and event loop.
//!
//! All simulation and rendering state lives in rotorviz-core; this loop only
//! translates terminal events into pointer and key calls, ticks the clock,
//! and hands the resulting scene to the rasterizer in `ui`. Mouse cells map
//! through the layout back into the active view's own coordinate space, so
//! the core hit tests never know they are running in a terminal.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::layout::Position;
use ratatui::prelude::*;

use rotorviz_core::views::ViewRenderer;
use rotorviz_core::{
    AnimationClock, FrameScheduler, HealthReport, Hit, Interaction, IntervalScheduler,
    IsometricView, LongitudinalView, OrbitMonitor, OrbitSample, PointerButton, PointerModifiers,
    RadialView, RenderInput, ResponseSweep, Scene, SimulationData, ViewMode, ViewSettings, edit,
    health, response,
};

/// Arrow-key camera nudges, tuned to feel like a short mouse drag.
const KEY_ROTATE_STEP: f64 = 0.05;
const KEY_PAN_STEP: f64 = 15.0;
/// Diameter change per arrow press while editing with a selection.
const KEY_RESIZE_STEP: f64 = 0.01;

pub struct App {
    data: SimulationData,
    settings: ViewSettings,
    clock: AnimationClock,
    scheduler: IntervalScheduler,
    interaction: Interaction,
    iso: IsometricView,
    radial: RadialView,
    longitudinal: LongitudinalView,
    monitors: Vec<OrbitMonitor>,
    samples: Vec<OrbitSample>,
    focused_bearing: usize,
    health: HealthReport,
    sweep: ResponseSweep,
    running: bool,
    /// Full terminal area of the last drawn frame, for mouse mapping.
    last_area: Rect,
}

impl App {
    pub fn new(
        data: SimulationData,
        view: ViewMode,
        mode: usize,
        operating_rpm: f64,
        fps: u32,
    ) -> Self {
        let settings = ViewSettings {
            view,
            active_mode: mode.min(data.modes.len().saturating_sub(1)),
            operating_rpm,
            ..ViewSettings::default()
        };
        let health = health::evaluate(
            &data,
            settings.active_mode,
            settings.amplitude_scale,
            settings.damping,
            operating_rpm,
        );
        let sweep = response::sweep(&data.modes, operating_rpm);
        let monitors = OrbitMonitor::for_bearings(&data);
        let samples = Vec::with_capacity(monitors.len());

        Self {
            data,
            settings,
            clock: AnimationClock::new(),
            scheduler: IntervalScheduler::from_fps(fps),
            interaction: Interaction::new(),
            iso: IsometricView::new(),
            radial: RadialView::new(),
            longitudinal: LongitudinalView::new(),
            monitors,
            samples,
            focused_bearing: 0,
            health,
            sweep,
            running: true,
            last_area: Rect::default(),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook that restores terminal before printing the panic.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(
                io::stdout(),
                LeaveAlternateScreen,
                DisableMouseCapture,
                crossterm::cursor::Show
            );
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error.
        let _ = std::panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        self.tick();

        while self.running {
            let frame = terminal.draw(|f| super::ui::draw(f, self))?;
            self.last_area = frame.area;

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code);
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            if self.scheduler.next_frame() {
                self.tick();
            }
        }

        Ok(())
    }

    /// Advance one frame: phase, orbit probes, health.
    fn tick(&mut self) {
        self.clock.tick();
        let playing = self.clock.playing();
        self.samples = self
            .monitors
            .iter_mut()
            .map(|m| {
                m.tick(
                    &self.data,
                    self.settings.active_mode,
                    self.settings.amplitude_scale,
                    self.settings.damping,
                    playing,
                )
            })
            .collect();
        self.health = health::evaluate(
            &self.data,
            self.settings.active_mode,
            self.settings.amplitude_scale,
            self.settings.damping,
            self.settings.operating_rpm,
        );
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char(' ') => self.clock.toggle(),
            KeyCode::Char('v') => {
                self.settings.view = self.settings.view.cycle();
                self.interaction.reset_camera();
            }
            KeyCode::Char('m') => self.settings.cycle_mode(self.data.modes.len(), true),
            KeyCode::Char('M') => self.settings.cycle_mode(self.data.modes.len(), false),
            KeyCode::Char('+') | KeyCode::Char('=') => self.settings.bump_amplitude(true),
            KeyCode::Char('-') => self.settings.bump_amplitude(false),
            KeyCode::Char('d') => self.settings.bump_damping(true),
            KeyCode::Char('D') => self.settings.bump_damping(false),
            KeyCode::Char('e') => self.settings.editing = !self.settings.editing,
            KeyCode::Char('r') => {
                self.settings.render_mode = self.settings.render_mode.toggle();
            }
            KeyCode::Char('t') => self.settings.show_trace = !self.settings.show_trace,
            KeyCode::Char('c') => self.interaction.reset_camera(),
            KeyCode::Char('b') => {
                if !self.monitors.is_empty() {
                    self.focused_bearing = (self.focused_bearing + 1) % self.monitors.len();
                }
            }
            KeyCode::Char('[') => self.interaction.wheel(false, self.settings.editing),
            KeyCode::Char(']') => self.interaction.wheel(true, self.settings.editing),
            KeyCode::Esc => self.interaction.selection.clear(),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => self.handle_arrow(key),
            _ => {}
        }
    }

    /// Arrows resize the selection while editing, otherwise move the camera.
    fn handle_arrow(&mut self, key: KeyCode) {
        if self.settings.editing && !self.interaction.selection.is_empty() {
            if let Some(step) = match key {
                KeyCode::Up => Some(KEY_RESIZE_STEP),
                KeyCode::Down => Some(-KEY_RESIZE_STEP),
                _ => None,
            } {
                self.nudge_selection(step);
            }
            return;
        }

        let orbiting = matches!(self.settings.view, ViewMode::Isometric | ViewMode::All);
        match key {
            KeyCode::Left if orbiting => self.interaction.camera.rotate_by(-KEY_ROTATE_STEP, 0.0),
            KeyCode::Right if orbiting => self.interaction.camera.rotate_by(KEY_ROTATE_STEP, 0.0),
            KeyCode::Up if orbiting => self.interaction.camera.rotate_by(0.0, KEY_ROTATE_STEP),
            KeyCode::Down if orbiting => self.interaction.camera.rotate_by(0.0, -KEY_ROTATE_STEP),
            KeyCode::Left => self.interaction.camera.pan_by(-KEY_PAN_STEP, 0.0),
            KeyCode::Right => self.interaction.camera.pan_by(KEY_PAN_STEP, 0.0),
            KeyCode::Up => self.interaction.camera.pan_by(0.0, -KEY_PAN_STEP),
            KeyCode::Down => self.interaction.camera.pan_by(0.0, KEY_PAN_STEP),
            _ => {}
        }
    }

    fn nudge_selection(&mut self, step: f64) {
        let targets: Vec<usize> = self.interaction.selection.segments().collect();
        let Some(&pressed) = targets.first() else {
            return;
        };
        let Some(segment) = self.data.shaft_segments.get(pressed) else {
            return;
        };
        let diameter = segment.outer_diameter + step;
        if edit::resize_segments(&mut self.data, pressed, &targets, diameter).is_some() {
            self.sweep = response::sweep(&self.data.modes, self.settings.operating_rpm);
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(point) = self.viewport_point(mouse.column, mouse.row) else {
            // Crossing out of the canvas mid-drag must not leave a stale drag.
            if matches!(mouse.kind, MouseEventKind::Up(_) | MouseEventKind::Moved) {
                self.interaction.pointer_leave();
            }
            return;
        };

        match mouse.kind {
            MouseEventKind::Down(button) => {
                let hit = self.hit_at(point);
                let modifiers = PointerModifiers {
                    shift: mouse.modifiers.contains(event::KeyModifiers::SHIFT),
                    ctrl: mouse.modifiers.contains(event::KeyModifiers::CONTROL),
                };
                let button = match button {
                    MouseButton::Right => PointerButton::Secondary,
                    _ => PointerButton::Primary,
                };
                self.interaction.pointer_down(
                    point,
                    button,
                    modifiers,
                    hit,
                    self.settings.view,
                    self.settings.editing,
                );
            }
            MouseEventKind::Drag(_) => {
                if let Some(request) = self.interaction.pointer_move(point)
                    && edit::resize_segments(
                        &mut self.data,
                        request.pressed,
                        &request.targets,
                        request.diameter,
                    )
                    .is_some()
                {
                    self.sweep = response::sweep(&self.data.modes, self.settings.operating_rpm);
                }
            }
            MouseEventKind::Up(_) => self.interaction.pointer_up(point),
            MouseEventKind::ScrollUp => self.interaction.wheel(true, self.settings.editing),
            MouseEventKind::ScrollDown => self.interaction.wheel(false, self.settings.editing),
            _ => {}
        }
    }

    /// Map a terminal cell onto the active view's viewport, or None when the
    /// cell is outside the scene canvas.
    fn viewport_point(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let canvas = super::ui::layout(self.last_area).scene_inner();
        if canvas.width == 0 || canvas.height == 0 {
            return None;
        }
        if !canvas.contains(Position::new(column, row)) {
            return None;
        }
        let (w, h) = self.active_viewport();
        let x = (column - canvas.x) as f64 / canvas.width as f64 * w;
        let y = (row - canvas.y) as f64 / canvas.height as f64 * h;
        Some((x, y))
    }

    fn active_viewport(&self) -> (f64, f64) {
        match self.settings.view {
            // The composite is isometric-sized with insets on top.
            ViewMode::Isometric | ViewMode::All => self.iso.viewport(),
            ViewMode::Radial => self.radial.viewport(),
            ViewMode::Longitudinal => self.longitudinal.viewport(),
        }
    }

    fn hit_at(&self, point: (f64, f64)) -> Option<Hit> {
        let input = self.render_input();
        let index = match self.settings.view {
            ViewMode::Isometric | ViewMode::All => self.iso.segment_at(point, &input),
            ViewMode::Radial => self.radial.segment_at(point, &input),
            ViewMode::Longitudinal => self.longitudinal.segment_at(point, &input),
        }?;
        let diameter = self.data.shaft_segments.get(index)?.outer_diameter;
        Some(Hit { index, diameter })
    }

    fn render_input(&self) -> RenderInput<'_> {
        RenderInput {
            data: &self.data,
            camera: &self.interaction.camera,
            settings: &self.settings,
            phase: self.clock.phase(),
            playing: self.clock.playing(),
            selection: &self.interaction.selection,
            danger: self.health.status == rotorviz_core::HealthStatus::Danger,
        }
    }

    /// Render the active view to a depth-sorted scene.
    pub fn render_scene(&mut self) -> Scene {
        let input = RenderInput {
            data: &self.data,
            camera: &self.interaction.camera,
            settings: &self.settings,
            phase: self.clock.phase(),
            playing: self.clock.playing(),
            selection: &self.interaction.selection,
            danger: self.health.status == rotorviz_core::HealthStatus::Danger,
        };
        let mut scene = match self.settings.view {
            ViewMode::Isometric => self.iso.render(&input),
            ViewMode::Radial => self.radial.render(&input),
            ViewMode::Longitudinal => self.longitudinal.render(&input),
            ViewMode::All => rotorviz_core::compose_all(
                &mut self.iso,
                &mut self.radial,
                &mut self.longitudinal,
                &input,
            ),
        };
        scene.sort_by_depth();
        scene
    }

    // -- read accessors for the ui module --

    pub fn data(&self) -> &SimulationData {
        &self.data
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn playing(&self) -> bool {
        self.clock.playing()
    }

    pub fn phase(&self) -> f64 {
        self.clock.phase()
    }

    pub fn health(&self) -> &HealthReport {
        &self.health
    }

    pub fn sweep(&self) -> &ResponseSweep {
        &self.sweep
    }

    pub fn monitors(&self) -> &[OrbitMonitor] {
        &self.monitors
    }

    pub fn samples(&self) -> &[OrbitSample] {
        &self.samples
    }

    pub fn focused_bearing(&self) -> usize {
        self.focused_bearing
    }

    pub fn selection_len(&self) -> usize {
        self.interaction.selection.segments().count()
    }
}
