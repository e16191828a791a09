//! `rotorviz watch`: headless monitoring loop.
//!
//! Re-reads the dataset every interval so edits made by other tools (or a
//! `rotorviz view` session saving over the same file) show up live. Ctrl-C
//! sets a shared flag; sleeping happens in short chunks so the loop notices
//! promptly.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rotorviz_core::views::{AMPLITUDE_MAX, AMPLITUDE_MIN};
use rotorviz_core::{HealthStatus, health, store};

pub struct WatchCommandConfig<'a> {
    pub data_path: Option<&'a str>,
    pub interval: f64,
    pub mode: usize,
    pub amplitude: f64,
    pub damping: f64,
    pub machine: &'a str,
    pub grid: &'a str,
}

pub fn run(cfg: WatchCommandConfig<'_>) {
    let mut data = super::load_data(cfg.data_path);
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
    let interval = Duration::from_secs_f64(cfg.interval.max(0.1));

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&running);
    if let Err(e) = ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst)) {
        eprintln!("Failed to install Ctrl-C handler: {e}");
        std::process::exit(1);
    }

    println!(
        "Watching mode {} against {operating_rpm:.0} RPM every {:.1}s (Ctrl-C stops)\n",
        cfg.mode,
        interval.as_secs_f64()
    );

    let start = Instant::now();
    let mut worst = HealthStatus::Safe;

    while running.load(Ordering::SeqCst) {
        // Pick up on-disk edits between samples; keep the last good dataset
        // if a half-written file fails validation mid-save.
        if let Some(path) = cfg.data_path {
            match store::load(Path::new(path)) {
                Ok(fresh) => data = fresh,
                Err(e) => log::warn!("reload of {path} failed, keeping previous dataset: {e}"),
            }
        }

        let mode = cfg.mode.min(data.modes.len().saturating_sub(1));
        let report = health::evaluate(&data, mode, amplitude, damping, operating_rpm);
        if report.status.exit_code() > worst.exit_code() {
            worst = report.status;
        }

        let mark = match report.status {
            HealthStatus::Safe => "\u{2713}",
            HealthStatus::Warning => "!",
            HealthStatus::Danger => "\u{2717}",
        };
        println!(
            "[{:>7.1}s] {mark} {:<7} {:>5.2} mils  {}",
            start.elapsed().as_secs_f64(),
            report.status.as_str(),
            report.estimated_mils,
            report.message
        );

        let mut slept = Duration::ZERO;
        while slept < interval && running.load(Ordering::SeqCst) {
            let chunk = (interval - slept).min(Duration::from_millis(100));
            std::thread::sleep(chunk);
            slept += chunk;
        }
    }

    println!(
        "\nStopped after {:.1}s; worst status {}",
        start.elapsed().as_secs_f64(),
        worst.as_str()
    );
    std::process::exit(worst.exit_code());
}
