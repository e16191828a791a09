//! `rotorviz modes`: the mode table, optionally with bearing coefficients.

use rotorviz_core::response::SpeedBand;
use rotorviz_core::{SimulationData, sampler};

pub struct ModesCommandConfig<'a> {
    pub data_path: Option<&'a str>,
    pub machine: &'a str,
    pub grid: &'a str,
    pub include_bearings: bool,
}

pub fn run(cfg: ModesCommandConfig<'_>) {
    let data = super::load_data(cfg.data_path);
    let operating_rpm = super::resolve_operating_rpm(cfg.machine, cfg.grid);
    let primary = SpeedBand::around(operating_rpm);
    let harmonic = SpeedBand::around(operating_rpm * 2.0);

    println!(
        "Rotor train: {} segments, {} components, {} modes",
        data.segment_count(),
        data.rotors.len(),
        data.modes.len()
    );
    println!(
        "Operating speed: {operating_rpm:.0} RPM ({} on a {} Hz grid)\n",
        cfg.machine, cfg.grid
    );

    println!(
        "{:<6} {:>8} {:>8} {:>6} {:>8} {:>6}   {}",
        "Order", "RPM", "Hz", "Q", "zeta", "Peak", "Description"
    );
    println!("{}", "-".repeat(72));

    let mut conflicts = 0;
    for mode in &data.modes {
        let in_zone = primary.contains(mode.rpm) || harmonic.contains(mode.rpm);
        if in_zone {
            conflicts += 1;
        }
        println!(
            "  {:<4} {:>8.0} {:>8.2} {:>6.1} {:>8.4} {:>6.3} {} {}",
            mode.order,
            mode.rpm,
            mode.frequency_hz,
            mode.q_factor,
            mode.damping_ratio(),
            sampler::max_abs(mode),
            if in_zone { "!" } else { " " },
            mode.description
        );
    }

    println!();
    if conflicts > 0 {
        println!(
            "! = critical speed inside an exclusion zone ({:.0}-{:.0} or {:.0}-{:.0} RPM)",
            primary.low, primary.high, harmonic.low, harmonic.high
        );
    } else {
        println!(
            "No critical speed inside the exclusion zones ({:.0}-{:.0}, {:.0}-{:.0} RPM)",
            primary.low, primary.high, harmonic.low, harmonic.high
        );
    }

    if cfg.include_bearings {
        print_bearings(&data, operating_rpm);
    }
}

/// Evaluate each bearing's speed-dependent matrix at the operating point.
fn print_bearings(data: &SimulationData, operating_rpm: f64) {
    let bearings: Vec<_> = data
        .rotors
        .iter()
        .filter_map(|c| c.physics.as_ref().map(|p| (c, p)))
        .collect();

    if bearings.is_empty() {
        println!("\nNo bearing physics in this dataset.");
        return;
    }

    println!("\nBearing coefficients at {operating_rpm:.0} RPM (k in N/m, c in N s/m):\n");
    println!(
        "{:<16} {:>10} {:>10} {:>10} {:>10} {:>9} {:>9}",
        "Bearing", "kxx", "kxy", "kyx", "kyy", "cxx", "cyy"
    );
    println!("{}", "-".repeat(80));

    for (component, physics) in bearings {
        let c = physics.evaluate(operating_rpm);
        println!(
            "  {:<14} {:>10.3e} {:>10.3e} {:>10.3e} {:>10.3e} {:>9.2e} {:>9.2e}",
            component.name, c.kxx, c.kxy, c.kyx, c.kyy, c.cxx, c.cyy
        );
    }
}
