//! `rotorviz init`: write the built-in dataset to disk.

use std::path::Path;

use rotorviz_core::{default_simulation, store};

pub fn run(path: &str, force: bool) {
    let target = Path::new(path);
    if target.exists() && !force {
        eprintln!("{path} already exists; pass --force to overwrite");
        std::process::exit(1);
    }

    let data = default_simulation();
    if let Err(e) = store::save(target, &data) {
        eprintln!("Failed to write {path}: {e}");
        std::process::exit(1);
    }

    println!(
        "Wrote the default turbine train to {path} ({} segments, {} components, {} modes)",
        data.segment_count(),
        data.rotors.len(),
        data.modes.len()
    );
    println!("Edit it and run: rotorviz view --data {path}");
}
