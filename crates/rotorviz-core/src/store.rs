//! Dataset persistence.
//!
//! Datasets travel as pretty-printed camelCase JSON so files hand-edited or
//! produced by other tooling stay diffable. Loading validates structural
//! invariants up front; a malformed file fails here, not three modules deep
//! in a render pass.

use std::fs;
use std::io;
use std::path::Path;

use crate::model::SimulationData;

fn invalid<E>(err: E) -> io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    io::Error::new(io::ErrorKind::InvalidData, err)
}

pub fn load(path: &Path) -> io::Result<SimulationData> {
    let raw = fs::read_to_string(path)?;
    let data: SimulationData = serde_json::from_str(&raw).map_err(invalid)?;
    data.validate().map_err(invalid)?;
    Ok(data)
}

pub fn save(path: &Path, data: &SimulationData) -> io::Result<()> {
    let raw = serde_json::to_string_pretty(data).map_err(invalid)?;
    fs::write(path, raw + "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::default_simulation;

    #[test]
    fn test_round_trip_preserves_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turbine.json");
        let data = default_simulation();
        save(&path, &data).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.shaft_segments.len(), data.shaft_segments.len());
        assert_eq!(loaded.modes.len(), data.modes.len());
        assert_eq!(loaded.rotors.len(), data.rotors.len());
        assert_eq!(loaded.modes[3].rpm, 3600.0);
        assert_eq!(loaded.modes[3].q_factor, 25.0);
        assert_eq!(
            loaded.shaft_segments[0].outer_diameter,
            data.shaft_segments[0].outer_diameter
        );
        let kxx = loaded.rotors[0].physics.as_ref().unwrap().kxx;
        assert_eq!(kxx.constant, data.rotors[0].physics.as_ref().unwrap().kxx.constant);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turbine.json");
        save(&path, &default_simulation()).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"shaftSegments\""));
        assert!(raw.contains("\"qFactor\""));
        assert!(raw.contains("\"outerDiameter\""));
        assert!(!raw.contains("\"shaft_segments\""));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_load_rejects_structurally_invalid_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty-modes.json");
        let mut data = default_simulation();
        data.modes.clear();
        // Saving does not validate; loading does.
        save(&path, &data).unwrap();
        let err = load(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("mode"), "message: {err}");
    }

    #[test]
    fn test_load_missing_file_reports_not_found() {
        let err = load(Path::new("/nonexistent/turbine.json")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
