//! Heightgen CLI - multi-threaded 16-bit heightmap generator.
//!
//! Generate square height grids from layered procedural noise and write
//! them as raw or container files.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use heightgen::{GenerationParams, HeightGenerator, HeightProfile, SeedSource};

/// Multi-threaded 16-bit heightmap generator.
#[derive(Parser)]
#[command(name = "heightgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new height grid.
    Generate {
        /// Grid resolution in pixels (e.g., 512, 1024, 2048).
        #[arg(short, long, default_value = "1024")]
        resolution: u32,

        /// Seed for reproducible generation; drawn from entropy when omitted.
        #[arg(short, long)]
        seed: Option<u32>,

        /// Amplitude decay per octave.
        #[arg(long, default_value = "0.36")]
        gain: f32,

        /// Number of noise octaves.
        #[arg(long, default_value = "14")]
        octaves: u32,

        /// World-space size of one pixel.
        #[arg(long, default_value = "0.00055")]
        scale: f32,

        /// Noise composition profile.
        #[arg(long, default_value = "modulated")]
        profile: ProfileArg,

        /// Write the raw form to this path.
        #[arg(long)]
        raw_output: Option<PathBuf>,

        /// Write the container form to this path.
        #[arg(long)]
        container_output: Option<PathBuf>,
    },

    /// Display the parameters stored in a container file.
    Inspect {
        /// Container file to read.
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
    /// Three-term product: fbm x ridge x worley.
    Modulated,
    /// Worley term subtracted instead of multiplied.
    Subtractive,
}

impl From<ProfileArg> for HeightProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Modulated => HeightProfile::Modulated,
            ProfileArg::Subtractive => HeightProfile::Subtractive,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            resolution,
            seed,
            gain,
            octaves,
            scale,
            profile,
            raw_output,
            container_output,
        } => {
            run_generate(
                resolution,
                seed,
                gain,
                octaves,
                scale,
                profile.into(),
                raw_output,
                container_output,
            );
        }
        Commands::Inspect { path } => {
            run_inspect(path);
        }
    }
}

fn run_generate(
    resolution: u32,
    seed: Option<u32>,
    gain: f32,
    octaves: u32,
    scale: f32,
    profile: HeightProfile,
    raw_output: Option<PathBuf>,
    container_output: Option<PathBuf>,
) {
    // Validate parameters
    if resolution > 8192 {
        eprintln!("Error: Resolution must be at most 8192");
        std::process::exit(1);
    }

    if octaves > 32 {
        eprintln!("Error: Octaves must be at most 32");
        std::process::exit(1);
    }

    if gain <= 0.0 || gain >= 1.0 {
        eprintln!("Error: Gain must be between 0.0 and 1.0 exclusive");
        std::process::exit(1);
    }

    // Generate a seed if not provided
    let seed = seed.unwrap_or_else(|| SeedSource::from_entropy().next_seed());

    println!("Heightgen - 16-bit heightmap generator");
    println!("======================================");
    println!("Resolution: {}x{}", resolution, resolution);
    println!("Seed: {}", seed);
    println!("Gain: {}, octaves: {}, scale: {}", gain, octaves, scale);

    let params = GenerationParams::new(resolution, gain, octaves, scale);
    let mut generator = HeightGenerator::new();

    let start = Instant::now();
    generator
        .generate(
            profile,
            seed,
            params,
            raw_output.as_deref(),
            container_output.as_deref(),
        )
        .unwrap_or_else(|e| {
            eprintln!("Error during generation: {}", e);
            std::process::exit(1);
        });
    println!(
        "Generated {} pixels in {:.2?}",
        generator.pixel_count(),
        start.elapsed()
    );

    if let Some(path) = raw_output {
        println!("Raw output: {}", path.display());
    }
    if let Some(path) = container_output {
        println!("Container output: {}", path.display());
    }
}

fn run_inspect(path: PathBuf) {
    let mut generator = HeightGenerator::new();
    generator.load(&path).unwrap_or_else(|e| {
        eprintln!("Error loading {}: {}", path.display(), e);
        std::process::exit(1);
    });

    println!("File: {}", path.display());
    if let Some(params) = generator.params() {
        println!("Resolution: {}x{}", params.resolution, params.resolution);
        println!("Gain: {}", params.gain);
        println!("Octaves: {}", params.octaves);
    }
    if let Some(seed) = generator.seed() {
        println!("Seed: {}", seed);
    }
    println!("Pixels: {}", generator.pixel_count());
}
