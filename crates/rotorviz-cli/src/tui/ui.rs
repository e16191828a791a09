//! TUI rendering: braille scene canvas plus an instrument sidebar.
//!
//! ┌──────────────────────────────────────────────────────────┐
//! │  rotorviz   isometric   mode #1 First bending   3600 RPM │
//! ├───────────────────────────────────┬──────────────────────┤
//! │                                   │  Mode      #1        │
//! │        .  .──────────.  .         │  Critical  750 RPM   │
//! │   ╱╲  ╱ ╲(  shaft    ) ╱ ╲  ╱╲    │  Amplitude [████░░]  │
//! │  ╱  ╲╱   ╲`──────────'╱   ╲╱  ╲   │  ...                 │
//! │      │     │        │     │       ├──────────────────────┤
//! │      ┴     ┴        ┴     ┴       │  SYSTEM TUNED        │
//! │   (pedestals under bearings)      ├──────────────────────┤
//! │                                   │ ▸ Bearing #1  2.3 mils│
//! │                                   │   orbit / waveform   │
//! ├───────────────────────────────────┴──────────────────────┤
//! │  space: pause   v: view   m: mode   e: edit   q: quit    │
//! └──────────────────────────────────────────────────────────┘
//!
//! The scene arrives as a depth-sorted primitive list in view coordinates
//! (y down); painting flips y because the braille canvas grows upward.
//! Alpha premultiplies toward the dark background.

use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine};
use ratatui::{prelude::*, widgets::*};

use rotorviz_core::health::{ALERT_MILS, TRIP_MILS};
use rotorviz_core::{HealthStatus, Rgba, Scene, Shape};

use super::app::App;

const DASH_ON: f64 = 8.0;
const DASH_OFF: f64 = 6.0;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

pub struct Areas {
    pub title: Rect,
    pub scene: Rect,
    pub sidebar: Rect,
    pub keys: Rect,
}

impl Areas {
    /// Paintable region inside the scene block's border; mouse coordinates
    /// map against this rect.
    pub fn scene_inner(&self) -> Rect {
        self.scene.inner(Margin::new(1, 1))
    }
}

/// Pure split of the terminal area, shared with the mouse mapping in `app`.
pub fn layout(area: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(10),   // main
            Constraint::Length(1), // keys
        ])
        .split(area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(36)])
        .split(rows[1]);

    Areas {
        title: rows[0],
        scene: cols[0],
        sidebar: cols[1],
        keys: rows[2],
    }
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let areas = layout(f.area());
    draw_title(f, areas.title, app);
    draw_scene(f, areas.scene, app);
    draw_sidebar(f, areas.sidebar, app);
    draw_keys(f, areas.keys);
}

// ---------------------------------------------------------------------------
// Title and scene canvas
// ---------------------------------------------------------------------------

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let settings = app.settings();
    let mode = &app.data().modes[settings.active_mode];
    let state = if app.playing() { "playing" } else { "paused" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(" rotorviz ", Style::default().bold().fg(Color::Cyan)),
            Span::raw(format!(" {} ", settings.view.as_str())),
            Span::styled(
                format!(" mode #{} {} ", mode.order, mode.description),
                Style::default().bold().fg(Color::Yellow),
            ),
            Span::styled(
                format!(
                    " {:.0} RPM   phase {:.2}  {state} ",
                    settings.operating_rpm,
                    app.phase()
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

    f.render_widget(block, area);
}

fn draw_scene(f: &mut Frame, area: Rect, app: &mut App) {
    let scene = app.render_scene();
    let settings = app.settings();

    let mut title = format!(" {} ", settings.view.as_str().to_uppercase());
    if settings.editing {
        title.push_str("EDIT ");
    }
    let border_style = if app.health().status == HealthStatus::Danger {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    // Braille gives 4 dots per cell row; polygon fills scan at that pitch.
    let y_step = scene.height / (inner.height as f64 * 4.0);

    let canvas = Canvas::default()
        .marker(symbols::Marker::Braille)
        .x_bounds([0.0, scene.width])
        .y_bounds([0.0, scene.height])
        .paint(|ctx| paint_scene(ctx, &scene, y_step));
    f.render_widget(canvas, inner);
}

fn paint_scene(ctx: &mut Context, scene: &Scene, y_step: f64) {
    let h = scene.height;
    for prim in scene.primitives() {
        let color = to_color(prim.color);
        match &prim.shape {
            Shape::Polyline(points) => {
                if prim.dashed {
                    draw_dashed(ctx, points, h, color);
                } else {
                    draw_path(ctx, points, h, color);
                }
            }
            Shape::Polygon(points) => {
                if prim.filled {
                    fill_polygon(ctx, points, h, color, y_step);
                } else {
                    draw_path(ctx, points, h, color);
                    if points.len() > 2 && points.first() != points.last() {
                        let (first, last) = (points[0], points[points.len() - 1]);
                        ctx.draw(&CanvasLine {
                            x1: last.0,
                            y1: h - last.1,
                            x2: first.0,
                            y2: h - first.1,
                            color,
                        });
                    }
                }
            }
            Shape::Circle { cx, cy, r } => {
                ctx.draw(&Circle {
                    x: *cx,
                    y: h - *cy,
                    radius: *r,
                    color,
                });
            }
            Shape::Text { x, y, text } => {
                ctx.print(
                    *x,
                    h - *y,
                    Line::styled(text.clone(), Style::default().fg(color)),
                );
            }
        }
    }
}

fn draw_path(ctx: &mut Context, points: &[(f64, f64)], h: f64, color: Color) {
    for pair in points.windows(2) {
        ctx.draw(&CanvasLine {
            x1: pair[0].0,
            y1: h - pair[0].1,
            x2: pair[1].0,
            y2: h - pair[1].1,
            color,
        });
    }
}

fn draw_dashed(ctx: &mut Context, points: &[(f64, f64)], h: f64, color: Color) {
    for pair in points.windows(2) {
        let (x1, y1) = pair[0];
        let (x2, y2) = pair[1];
        let len = (x2 - x1).hypot(y2 - y1);
        if len < 1e-9 {
            continue;
        }
        let (ux, uy) = ((x2 - x1) / len, (y2 - y1) / len);
        let mut t = 0.0;
        while t < len {
            let end = (t + DASH_ON).min(len);
            ctx.draw(&CanvasLine {
                x1: x1 + ux * t,
                y1: h - (y1 + uy * t),
                x2: x1 + ux * end,
                y2: h - (y1 + uy * end),
                color,
            });
            t += DASH_ON + DASH_OFF;
        }
    }
}

/// Even-odd scanline fill at the canvas dot pitch.
fn fill_polygon(ctx: &mut Context, points: &[(f64, f64)], h: f64, color: Color, y_step: f64) {
    if points.len() < 3 {
        return;
    }
    let step = y_step.max(1e-3);
    let min_y = points.iter().map(|p| p.1).fold(f64::MAX, f64::min);
    let max_y = points.iter().map(|p| p.1).fold(f64::MIN, f64::max);

    let n = points.len();
    let mut y = min_y;
    while y <= max_y {
        let mut xs: Vec<f64> = Vec::new();
        for i in 0..n {
            let (x1, y1) = points[i];
            let (x2, y2) = points[(i + 1) % n];
            if (y1 <= y && y < y2) || (y2 <= y && y < y1) {
                let t = (y - y1) / (y2 - y1);
                xs.push(x1 + t * (x2 - x1));
            }
        }
        xs.sort_by(|a, b| a.total_cmp(b));
        for pair in xs.chunks(2) {
            if let [a, b] = pair {
                ctx.draw(&CanvasLine {
                    x1: *a,
                    y1: h - y,
                    x2: *b,
                    y2: h - y,
                    color,
                });
            }
        }
        y += step;
    }
}

fn to_color(color: Rgba) -> Color {
    let a = color.alpha.clamp(0.0, 1.0);
    Color::Rgb(
        (color.r as f64 * a) as u8,
        (color.g as f64 * a) as u8,
        (color.b as f64 * a) as u8,
    )
}

// ---------------------------------------------------------------------------
// Sidebar
// ---------------------------------------------------------------------------

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let bearing_rows = app.monitors().len().max(1) as u16 + 2;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),            // mode and settings
            Constraint::Length(3),            // health banner
            Constraint::Length(bearing_rows), // bearing list
            Constraint::Min(9),               // orbit plot
            Constraint::Length(4),            // probe waveform
            Constraint::Length(8),            // response sweep
        ])
        .split(area);

    draw_status(f, rows[0], app);
    draw_health(f, rows[1], app);
    draw_bearings(f, rows[2], app);
    draw_orbit(f, rows[3], app);
    draw_waveform(f, rows[4], app);
    draw_response(f, rows[5], app);
}

fn bar(value: f64, low: f64, high: f64, width: usize) -> String {
    let frac = ((value - low) / (high - low)).clamp(0.0, 1.0);
    let on = (frac * width as f64).round() as usize;
    let mut s = String::with_capacity(width);
    for i in 0..width {
        s.push(if i < on { '\u{2588}' } else { '\u{2591}' });
    }
    s
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let settings = app.settings();
    let mode = &app.data().modes[settings.active_mode];

    let edit_line = if settings.editing {
        Line::styled(
            format!("EDITING   {} selected", app.selection_len()),
            Style::default().bold().fg(Color::Yellow),
        )
    } else {
        Line::from(format!("Selected  {} segment(s)", app.selection_len()))
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Mode      ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("#{} {}", mode.order, mode.description),
                Style::default().bold().fg(Color::Cyan),
            ),
        ]),
        Line::from(format!(
            "Critical  {:.0} RPM ({:.1} Hz)",
            mode.rpm, mode.frequency_hz
        )),
        Line::from(format!(
            "Q         {:.1}   zeta {:.3}",
            mode.q_factor,
            mode.damping_ratio()
        )),
        Line::from(format!(
            "Amplitude {} {:.2}",
            bar(settings.amplitude_scale, 0.0, 1.0, 10),
            settings.amplitude_scale
        )),
        Line::from(format!(
            "Damping   {} {:.2}",
            bar(settings.damping, 0.0, 1.0, 10),
            settings.damping
        )),
        Line::from(format!(
            "Render    {}   trace {}",
            settings.render_mode.as_str(),
            if settings.show_trace { "on" } else { "off" }
        )),
        edit_line,
    ];

    let block = Block::default().borders(Borders::ALL).title(" Rotor ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_health(f: &mut Frame, area: Rect, app: &App) {
    let report = app.health();
    let (bg, fg) = match report.status {
        HealthStatus::Safe => (Color::Green, Color::Black),
        HealthStatus::Warning => (Color::Yellow, Color::Black),
        HealthStatus::Danger => (Color::Red, Color::White),
    };

    let text = format!(" {}  {:.2} mils ", report.message, report.estimated_mils);
    let p = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().bg(bg).fg(fg).bold())
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}

fn draw_bearings(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focused_bearing();
    let lines: Vec<Line> = app
        .monitors()
        .iter()
        .enumerate()
        .map(|(i, monitor)| {
            let mils = app.samples().get(i).map(|s| s.mils).unwrap_or(0.0);
            let pointer = if i == focused { "\u{25b8}" } else { " " };
            let style = if mils > TRIP_MILS {
                Style::default().fg(Color::Red)
            } else if mils > ALERT_MILS {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Green)
            };
            Line::from(vec![
                Span::raw(format!("{pointer} ")),
                Span::styled(format!("{:<14}", monitor.name()), style),
                Span::styled(format!("{mils:>5.2} mils"), style),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Bearings (b cycles) ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_orbit(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focused_bearing();
    let (title, sample, monitor) = match (app.monitors().get(focused), app.samples().get(focused)) {
        (Some(monitor), Some(sample)) => (format!(" Orbit {} ", monitor.name()), *sample, monitor),
        _ => {
            let block = Block::default().borders(Borders::ALL).title(" Orbit ");
            f.render_widget(
                Paragraph::new("no bearings in dataset")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                area,
            );
            return;
        }
    };

    let coefficients = app
        .data()
        .rotors
        .iter()
        .find(|c| c.id == monitor.component_id())
        .and_then(|c| c.physics.as_ref())
        .map(|p| p.evaluate(app.settings().operating_rpm));

    // Plot bounds fit the trip-limit ellipse so the orbit reads against it.
    let bound = (TRIP_MILS * MILS_TO_PLOT * 1.15).max(sample.semi_major * 1.25);
    let canvas = Canvas::default()
        .marker(symbols::Marker::Braille)
        .x_bounds([-bound, bound])
        .y_bounds([-bound, bound])
        .block(Block::default().borders(Borders::ALL).title(title))
        .paint(move |ctx| {
            ctx.draw(&CanvasLine {
                x1: -bound,
                y1: 0.0,
                x2: bound,
                y2: 0.0,
                color: Color::DarkGray,
            });
            ctx.draw(&CanvasLine {
                x1: 0.0,
                y1: -bound,
                x2: 0.0,
                y2: bound,
                color: Color::DarkGray,
            });

            dashed_ellipse(ctx, ALERT_MILS * MILS_TO_PLOT, Color::Yellow);
            dashed_ellipse(ctx, TRIP_MILS * MILS_TO_PLOT, Color::Red);
            ellipse(ctx, sample.semi_major, sample.semi_minor, Color::Cyan);

            ctx.draw(&Circle {
                x: sample.x,
                y: sample.y,
                radius: bound / 24.0,
                color: Color::Yellow,
            });

            // Effective coefficients at the operating point, same units as
            // the `modes --bearings` table.
            if let Some(c) = coefficients {
                ctx.print(
                    -bound * 0.95,
                    -bound * 0.78,
                    Line::styled(
                        format!("kxx {:.2e} kyy {:.2e}", c.kxx, c.kyy),
                        Style::default().fg(Color::DarkGray),
                    ),
                );
                ctx.print(
                    -bound * 0.95,
                    -bound * 0.95,
                    Line::styled(
                        format!("cxx {:.2e} cyy {:.2e}", c.cxx, c.cyy),
                        Style::default().fg(Color::DarkGray),
                    ),
                );
            }
        });
    f.render_widget(canvas, area);
}

const MILS_TO_PLOT: f64 = 30.0;

fn orbit_point(ax: f64, ay: f64, angle: f64) -> (f64, f64) {
    (ax * angle.sin(), ay * angle.cos())
}

fn ellipse(ctx: &mut Context, ax: f64, ay: f64, color: Color) {
    let steps = 64;
    for i in 0..steps {
        let a0 = i as f64 / steps as f64 * std::f64::consts::TAU;
        let a1 = (i + 1) as f64 / steps as f64 * std::f64::consts::TAU;
        let (x1, y1) = orbit_point(ax, ay, a0);
        let (x2, y2) = orbit_point(ax, ay, a1);
        ctx.draw(&CanvasLine { x1, y1, x2, y2, color });
    }
}

/// Limit ellipses use the same 0.8 vertical flattening as the orbits.
fn dashed_ellipse(ctx: &mut Context, ax: f64, color: Color) {
    let steps = 48;
    for i in (0..steps).step_by(2) {
        let a0 = i as f64 / steps as f64 * std::f64::consts::TAU;
        let a1 = (i + 1) as f64 / steps as f64 * std::f64::consts::TAU;
        let (x1, y1) = orbit_point(ax, ax * 0.8, a0);
        let (x2, y2) = orbit_point(ax, ax * 0.8, a1);
        ctx.draw(&CanvasLine { x1, y1, x2, y2, color });
    }
}

fn draw_waveform(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Probe Y ");
    let Some(monitor) = app.monitors().get(app.focused_bearing()) else {
        f.render_widget(block, area);
        return;
    };

    let values: Vec<f64> = monitor.waveform().collect();
    let peak = values.iter().fold(1e-9_f64, |acc, v| acc.max(v.abs()));
    let bars: Vec<u64> = values
        .iter()
        .map(|v| ((v + peak) / (2.0 * peak) * 100.0) as u64)
        .collect();

    let sparkline = Sparkline::default()
        .data(&bars)
        .style(Style::default().fg(Color::Cyan))
        .block(block);
    f.render_widget(sparkline, area);
}

fn draw_response(f: &mut Frame, area: Rect, app: &App) {
    let sweep = app.sweep();
    let data: Vec<(f64, f64)> = sweep.points.iter().map(|p| (p.rpm, p.amplitude)).collect();
    let y_max = data.iter().map(|p| p.1).fold(1e-9_f64, f64::max) * 1.1;

    let op_marker = [
        (sweep.operating_rpm, 0.0),
        (sweep.operating_rpm, y_max * 0.25),
        (sweep.operating_rpm, y_max * 0.5),
        (sweep.operating_rpm, y_max * 0.75),
        (sweep.operating_rpm, y_max),
    ];
    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(Color::Magenta))
            .data(&data),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(Color::DarkGray))
            .data(&op_marker),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Unbalance Response "),
        )
        .x_axis(Axis::default().bounds([0.0, sweep.max_rpm]).labels(vec![
            Line::from("0"),
            Line::from(format!("{:.0}", sweep.max_rpm)),
        ]))
        .y_axis(Axis::default().bounds([0.0, y_max]).labels(vec![
            Line::from("0"),
            Line::from(format!("{y_max:.1}")),
        ]));

    f.render_widget(chart, area);
}

// ---------------------------------------------------------------------------
// Key help
// ---------------------------------------------------------------------------

fn draw_keys(f: &mut Frame, area: Rect) {
    let bar = Paragraph::new(
        " space: pause   v: view   m: mode   +/-: amplitude   d: damping   e: edit   t: trace   r: solid   b: bearing   [/]: zoom   c: camera   q: quit",
    )
    .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}
