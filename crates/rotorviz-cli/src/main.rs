//! CLI for rotorviz: watch a turbine shaft bend, in your terminal.

mod commands;
mod tui;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rotorviz")]
#[command(about = "rotorviz: turbine mode shapes, critical speeds, and bearing orbits in the terminal")]
#[command(version = rotorviz_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive multi-view rotor dashboard (TUI)
    View {
        /// Dataset JSON; defaults to the built-in turbine train
        #[arg(long)]
        data: Option<String>,

        /// Starting view
        #[arg(long, default_value = "isometric", value_parser = ["isometric", "iso", "radial", "longitudinal", "long", "all"])]
        view: String,

        /// Starting mode shape index (0-based)
        #[arg(long, default_value = "0")]
        mode: usize,

        /// Machine class; sets the operating speed together with --grid
        #[arg(long, default_value = "hydrogen", value_parser = ["hydrogen", "nuclear"])]
        machine: String,

        /// Grid frequency in Hz
        #[arg(long, default_value = "60", value_parser = ["50", "60"])]
        grid: String,

        /// Animation frame rate
        #[arg(long, default_value = "30")]
        fps: u32,
    },

    /// Print the mode table: order, critical speed, Q, damping, peak deflection
    Modes {
        /// Dataset JSON; defaults to the built-in turbine train
        #[arg(long)]
        data: Option<String>,

        /// Machine class; sets the operating speed together with --grid
        #[arg(long, default_value = "hydrogen", value_parser = ["hydrogen", "nuclear"])]
        machine: String,

        /// Grid frequency in Hz
        #[arg(long, default_value = "60", value_parser = ["50", "60"])]
        grid: String,

        /// Also evaluate bearing stiffness and damping at operating speed
        #[arg(long)]
        bearings: bool,
    },

    /// Unbalance response sweep from rest to well past operating speed
    Response {
        /// Dataset JSON; defaults to the built-in turbine train
        #[arg(long)]
        data: Option<String>,

        /// Machine class; sets the operating speed together with --grid
        #[arg(long, default_value = "hydrogen", value_parser = ["hydrogen", "nuclear"])]
        machine: String,

        /// Grid frequency in Hz
        #[arg(long, default_value = "60", value_parser = ["50", "60"])]
        grid: String,

        /// Output format
        #[arg(long, default_value = "table", value_parser = ["table", "csv"])]
        format: String,
    },

    /// One-shot health classification; exit code 0 safe, 1 warning, 2 danger
    Health {
        /// Dataset JSON; defaults to the built-in turbine train
        #[arg(long)]
        data: Option<String>,

        /// Mode shape index to estimate vibration for
        #[arg(long, default_value = "0")]
        mode: usize,

        /// Deflection amplitude scale
        #[arg(long, default_value = "1.0")]
        amplitude: f64,

        /// Damping in [0, 1]
        #[arg(long, default_value = "0.05")]
        damping: f64,

        /// Machine class; sets the operating speed together with --grid
        #[arg(long, default_value = "hydrogen", value_parser = ["hydrogen", "nuclear"])]
        machine: String,

        /// Grid frequency in Hz
        #[arg(long, default_value = "60", value_parser = ["50", "60"])]
        grid: String,

        /// Print the full report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write the built-in dataset as JSON, a starting point for editing
    Init {
        /// Output path
        #[arg(default_value = "rotor.json")]
        path: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Continuous health watch, one status line per interval (Ctrl-C stops)
    Watch {
        /// Dataset JSON, re-read every interval; defaults to the built-in train
        #[arg(long)]
        data: Option<String>,

        /// Seconds between evaluations
        #[arg(long, default_value = "2.0")]
        interval: f64,

        /// Mode shape index to estimate vibration for
        #[arg(long, default_value = "0")]
        mode: usize,

        /// Deflection amplitude scale
        #[arg(long, default_value = "1.0")]
        amplitude: f64,

        /// Damping in [0, 1]
        #[arg(long, default_value = "0.05")]
        damping: f64,

        /// Machine class; sets the operating speed together with --grid
        #[arg(long, default_value = "hydrogen", value_parser = ["hydrogen", "nuclear"])]
        machine: String,

        /// Grid frequency in Hz
        #[arg(long, default_value = "60", value_parser = ["50", "60"])]
        grid: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::View {
            data,
            view,
            mode,
            machine,
            grid,
            fps,
        } => commands::view::run(commands::view::ViewCommandConfig {
            data_path: data.as_deref(),
            view: &view,
            mode,
            machine: &machine,
            grid: &grid,
            fps,
        }),
        Commands::Modes {
            data,
            machine,
            grid,
            bearings,
        } => commands::modes::run(commands::modes::ModesCommandConfig {
            data_path: data.as_deref(),
            machine: &machine,
            grid: &grid,
            include_bearings: bearings,
        }),
        Commands::Response {
            data,
            machine,
            grid,
            format,
        } => commands::response::run(commands::response::ResponseCommandConfig {
            data_path: data.as_deref(),
            machine: &machine,
            grid: &grid,
            format: &format,
        }),
        Commands::Health {
            data,
            mode,
            amplitude,
            damping,
            machine,
            grid,
            json,
        } => commands::health::run(commands::health::HealthCommandConfig {
            data_path: data.as_deref(),
            mode,
            amplitude,
            damping,
            machine: &machine,
            grid: &grid,
            json,
        }),
        Commands::Init { path, force } => commands::init::run(&path, force),
        Commands::Watch {
            data,
            interval,
            mode,
            amplitude,
            damping,
            machine,
            grid,
        } => commands::watch::run(commands::watch::WatchCommandConfig {
            data_path: data.as_deref(),
            interval,
            mode,
            amplitude,
            damping,
            machine: &machine,
            grid: &grid,
        }),
    }
}
