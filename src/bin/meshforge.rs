//! meshforge - command line front end for the viewer core
//!
//! # Commands
//!
//! - `meshforge list` - List the sample models
//! - `meshforge generate <name>` - Build a sample and print its statistics
//! - `meshforge load <path>` - Import a model file and print its statistics
//! - `meshforge scan <dir>` - List loadable model files under a directory
//! - `meshforge orbit` - Run the solar system and print planet positions
//!
//! Set `RUST_LOG=debug` for generation and import details.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meshforge::import::{format_file_size, scan_directory, ModelInfo};
use meshforge::{SampleModel, Viewer};

/// Procedural mesh generation and model viewer core
#[derive(Parser)]
#[command(name = "meshforge")]
#[command(about = "Procedural mesh generation and model viewer core")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sample models
    List,

    /// Build a sample model and print its statistics
    Generate {
        /// Sample name, e.g. "icosahedron" or "solar-system"
        name: SampleModel,
    },

    /// Import a model file and print its statistics
    Load { path: PathBuf },

    /// List loadable model files under a directory
    Scan { dir: PathBuf },

    /// Run the solar system animation and print planet positions
    Orbit {
        /// Number of ticks to simulate
        #[arg(long, default_value_t = 600)]
        ticks: u32,

        /// Time units per tick
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,

        /// Speed multiplier
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
    },
}

fn print_info(info: &ModelInfo) {
    println!("{}", info);
    println!("  meshes:     {}", info.mesh_count);
    println!("  faces:      {}", info.face_count);
    let d = info.dimensions();
    println!("  dimensions: {:.3} x {:.3} x {:.3}", d.x, d.y, d.z);
    let c = info.center();
    println!("  center:     ({:.3}, {:.3}, {:.3})", c.x, c.y, c.z);
    println!("  radius:     {:.3}", info.bounding_radius());
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut viewer = Viewer::new();

    match cli.command {
        Commands::List => {
            for sample in SampleModel::ALL {
                let marker = if sample.is_animated() { " (animated)" } else { "" };
                println!("{}{}", sample, marker);
            }
        }
        Commands::Generate { name } => {
            print_info(viewer.show_sample(name));
        }
        Commands::Load { path } => {
            let info = viewer
                .load_model(&path)
                .with_context(|| format!("Error loading 3D model '{}'", path.display()))?;
            print_info(info);
        }
        Commands::Scan { dir } => {
            let files = scan_directory(&dir, viewer.importer())
                .with_context(|| format!("Error scanning directory '{}'", dir.display()))?;
            for file in files {
                println!("{} ({})", file.path.display(), format_file_size(file.size));
            }
        }
        Commands::Orbit { ticks, dt, speed } => {
            viewer.show_sample(SampleModel::SolarSystem);
            viewer.simulation_manager_mut().set_time_scale(speed);
            for _ in 0..ticks {
                viewer.update(dt);
            }
            for (name, p) in viewer.planet_positions().unwrap_or_default() {
                println!("{:<8} ({:>7.3}, {:>7.3}, {:>7.3})", name, p.x, p.y, p.z);
            }
        }
    }

    Ok(())
}
