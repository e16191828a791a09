//! `rotorviz response`: print the unbalance response sweep.

use rotorviz_core::response::{self, ResponseSweep};

pub struct ResponseCommandConfig<'a> {
    pub data_path: Option<&'a str>,
    pub machine: &'a str,
    pub grid: &'a str,
    pub format: &'a str,
}

pub fn run(cfg: ResponseCommandConfig<'_>) {
    let data = super::load_data(cfg.data_path);
    let operating_rpm = super::resolve_operating_rpm(cfg.machine, cfg.grid);
    let sweep = response::sweep(&data.modes, operating_rpm);

    match cfg.format {
        "csv" => print_csv(&sweep),
        _ => print_table(&sweep),
    }
}

fn print_csv(sweep: &ResponseSweep) {
    println!("rpm,amplitude,in_exclusion_zone");
    for point in &sweep.points {
        let excluded = sweep
            .exclusion_zones
            .iter()
            .any(|zone| zone.contains(point.rpm));
        println!("{:.1},{:.6},{}", point.rpm, point.amplitude, excluded);
    }
}

/// Decimated table with a bar per row; every critical speed gets its own
/// row so no resonance peak falls between samples.
fn print_table(sweep: &ResponseSweep) {
    println!(
        "Unbalance response, 0 to {:.0} RPM (operating speed {:.0}):\n",
        sweep.max_rpm, sweep.operating_rpm
    );

    let max_amplitude = sweep
        .points
        .iter()
        .map(|p| p.amplitude)
        .fold(0.0_f64, f64::max)
        .max(1e-9);

    for point in sweep.points.iter().step_by(10) {
        let bar_len = (point.amplitude / max_amplitude * 40.0).round() as usize;
        let excluded = sweep
            .exclusion_zones
            .iter()
            .any(|zone| zone.contains(point.rpm));
        println!(
            "{:>7.0} {:>9.3}  {}{}",
            point.rpm,
            point.amplitude,
            "#".repeat(bar_len),
            if excluded { " !" } else { "" }
        );
    }

    println!("\n{}", "=".repeat(60));
    println!("Critical speeds (AF at resonance):");
    for &rpm in &sweep.critical_speeds {
        let amplitude = sweep
            .points
            .iter()
            .min_by(|a, b| {
                (a.rpm - rpm).abs().total_cmp(&(b.rpm - rpm).abs())
            })
            .map(|p| p.amplitude)
            .unwrap_or(0.0);
        let excluded = sweep.exclusion_zones.iter().any(|zone| zone.contains(rpm));
        println!(
            "  {:>7.0} RPM  {:>8.3}{}",
            rpm,
            amplitude,
            if excluded { "  ! inside exclusion zone" } else { "" }
        );
    }
    let [primary, harmonic] = sweep.exclusion_zones;
    println!(
        "Exclusion zones: {:.0}-{:.0} and {:.0}-{:.0} RPM",
        primary.low, primary.high, harmonic.low, harmonic.high
    );
}
