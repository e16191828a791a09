//! `rotorviz health`: one-shot classification with a meaningful exit code.

use rotorviz_core::health;
use rotorviz_core::views::{AMPLITUDE_MAX, AMPLITUDE_MIN};

pub struct HealthCommandConfig<'a> {
    pub data_path: Option<&'a str>,
    pub mode: usize,
    pub amplitude: f64,
    pub damping: f64,
    pub machine: &'a str,
    pub grid: &'a str,
    pub json: bool,
}

pub fn run(cfg: HealthCommandConfig<'_>) {
    let data = super::load_data(cfg.data_path);
    let operating_rpm = super::resolve_operating_rpm(cfg.machine, cfg.grid);

    if cfg.mode >= data.modes.len() {
        eprintln!(
            "Mode index {} out of range; dataset has {} modes",
            cfg.mode,
            data.modes.len()
        );
        std::process::exit(1);
    }

    let amplitude = cfg.amplitude.clamp(AMPLITUDE_MIN, AMPLITUDE_MAX);
    let damping = cfg.damping.clamp(0.0, 1.0);
    let report = health::evaluate(&data, cfg.mode, amplitude, damping, operating_rpm);

    if cfg.json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Failed to serialize report: {e}");
                std::process::exit(1);
            }
        }
    } else {
        let mode = &data.modes[cfg.mode];
        println!("Status:     {}", report.status.as_str());
        println!("Message:    {}", report.message);
        println!(
            "Vibration:  {:.2} mils at mode {} ({:.0} RPM critical)",
            report.estimated_mils, mode.order, mode.rpm
        );
        println!("Operating:  {operating_rpm:.0} RPM");
        if let Some(rpm) = report.resonant_rpm {
            println!("Resonant:   {rpm:.0} RPM sits inside an exclusion zone");
        }
        if report.conflicts > 0 {
            println!("Conflicts:  {} mode(s) inside exclusion zones", report.conflicts);
        }
    }

    std::process::exit(report.status.exit_code());
}
