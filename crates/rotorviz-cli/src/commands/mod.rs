pub mod health;
pub mod init;
pub mod modes;
pub mod response;
pub mod view;
pub mod watch;

use std::path::Path;

use rotorviz_core::views::ViewMode;
use rotorviz_core::{GridFrequency, MachineClass, SimulationData};

/// Load the dataset behind `--data`, falling back to the built-in turbine
/// train when no path is given. A path that fails to load or validate is a
/// hard error; a silent fallback would hide a typo'd filename.
pub fn load_data(path: Option<&str>) -> SimulationData {
    match path {
        Some(p) => match rotorviz_core::store::load(Path::new(p)) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Failed to load {p}: {e}");
                std::process::exit(1);
            }
        },
        None => {
            log::info!("no --data given, using the built-in dataset");
            rotorviz_core::default_simulation()
        }
    }
}

/// Parse a machine class string into the enum.
pub fn parse_machine(s: &str) -> MachineClass {
    match s {
        "hydrogen" => MachineClass::Hydrogen,
        "nuclear" => MachineClass::Nuclear,
        _ => {
            eprintln!("Unknown machine class '{s}', using hydrogen");
            MachineClass::Hydrogen
        }
    }
}

/// Parse a grid frequency string into the enum.
pub fn parse_grid(s: &str) -> GridFrequency {
    match s {
        "50" => GridFrequency::Hz50,
        "60" => GridFrequency::Hz60,
        _ => {
            eprintln!("Unknown grid frequency '{s}', using 60 Hz");
            GridFrequency::Hz60
        }
    }
}

/// Parse a view name (including the short aliases) into the enum.
pub fn parse_view(s: &str) -> ViewMode {
    match ViewMode::from_name(s) {
        Some(view) => view,
        None => {
            eprintln!("Unknown view '{s}', using isometric");
            ViewMode::Isometric
        }
    }
}

/// Operating speed for the `--machine` / `--grid` pair, in RPM.
pub fn resolve_operating_rpm(machine: &str, grid: &str) -> f64 {
    rotorviz_core::operating_rpm(parse_machine(machine), parse_grid(grid))
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // parse_machine / parse_grid tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_machine_known_values() {
        assert_eq!(parse_machine("hydrogen"), MachineClass::Hydrogen);
        assert_eq!(parse_machine("nuclear"), MachineClass::Nuclear);
    }

    #[test]
    fn test_parse_machine_unknown_defaults_hydrogen() {
        assert_eq!(parse_machine("fusion"), MachineClass::Hydrogen);
        assert_eq!(parse_machine(""), MachineClass::Hydrogen);
    }

    #[test]
    fn test_parse_grid_known_values() {
        assert_eq!(parse_grid("50"), GridFrequency::Hz50);
        assert_eq!(parse_grid("60"), GridFrequency::Hz60);
    }

    #[test]
    fn test_parse_grid_unknown_defaults_60() {
        assert_eq!(parse_grid("400"), GridFrequency::Hz60);
    }

    // -----------------------------------------------------------------------
    // parse_view tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_view_accepts_aliases() {
        assert_eq!(parse_view("iso"), ViewMode::Isometric);
        assert_eq!(parse_view("long"), ViewMode::Longitudinal);
        assert_eq!(parse_view("radial"), ViewMode::Radial);
        assert_eq!(parse_view("all"), ViewMode::All);
    }

    #[test]
    fn test_parse_view_unknown_defaults_isometric() {
        assert_eq!(parse_view("sideways"), ViewMode::Isometric);
    }

    // -----------------------------------------------------------------------
    // Speed resolution and fallback dataset
    // -----------------------------------------------------------------------

    #[test]
    fn test_resolve_operating_rpm_all_combinations() {
        assert_eq!(resolve_operating_rpm("hydrogen", "60"), 3600.0);
        assert_eq!(resolve_operating_rpm("hydrogen", "50"), 3000.0);
        assert_eq!(resolve_operating_rpm("nuclear", "60"), 1800.0);
        assert_eq!(resolve_operating_rpm("nuclear", "50"), 1500.0);
    }

    #[test]
    fn test_load_data_without_path_uses_builtin() {
        let data = load_data(None);
        assert_eq!(data.segment_count(), rotorviz_core::SEGMENT_COUNT);
        assert!(data.validate().is_ok());
    }
}
