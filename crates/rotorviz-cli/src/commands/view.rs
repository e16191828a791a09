//! `rotorviz view`: the interactive dashboard.

pub struct ViewCommandConfig<'a> {
    pub data_path: Option<&'a str>,
    pub view: &'a str,
    pub mode: usize,
    pub machine: &'a str,
    pub grid: &'a str,
    pub fps: u32,
}

pub fn run(cfg: ViewCommandConfig<'_>) {
    let data = super::load_data(cfg.data_path);
    let operating_rpm = super::resolve_operating_rpm(cfg.machine, cfg.grid);
    let view = super::parse_view(cfg.view);

    if cfg.mode >= data.modes.len() {
        eprintln!(
            "Mode index {} out of range; dataset has {} modes",
            cfg.mode,
            data.modes.len()
        );
        std::process::exit(1);
    }

    let mut app = crate::tui::app::App::new(data, view, cfg.mode, operating_rpm, cfg.fps);
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
