use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use cave_generator::ascii::{self, AsciiOptions};
use cave_generator::{export, generate, CaveConfig};

#[derive(Parser, Debug)]
#[command(name = "cave_generator")]
#[command(about = "Generate procedural cave maps with cellular automata")]
struct Args {
    /// Load parameters from a JSON config file (flags below override it)
    #[arg(short, long)]
    config: Option<String>,

    /// Interior width in tiles
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Interior height in tiles
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Seed string
    #[arg(short, long)]
    seed: Option<String>,

    /// Use a time-derived seed (not reproducible)
    #[arg(long)]
    random_seed: bool,

    /// Chance (0-100) that a tile starts as wall
    #[arg(long)]
    fill: Option<u32>,

    /// Number of smoothing passes (0-10)
    #[arg(long)]
    smoothing: Option<u32>,

    /// Wall-neighbor count above which a tile becomes wall (0-10)
    #[arg(long)]
    tolerance: Option<u32>,

    /// Fill in floor regions of at most this many tiles (0-50)
    #[arg(long)]
    floor_denoise: Option<usize>,

    /// Open up wall regions of at most this many tiles (0-50)
    #[arg(long)]
    wall_denoise: Option<usize>,

    /// Permanent wall margin around the interior (0-10)
    #[arg(long)]
    border: Option<usize>,

    /// Square size passed to the mesh builder (0-10)
    #[arg(long)]
    square_size: Option<u32>,

    /// Write the effective config to a JSON file
    #[arg(long)]
    save_config: Option<String>,

    /// Export an ASCII report (map, rooms, passages)
    #[arg(long)]
    ascii: Option<String>,

    /// Export a PNG preview
    #[arg(long)]
    png: Option<String>,

    /// Pixels per tile in the PNG preview (1-64)
    #[arg(long, default_value = "4", value_parser = clap::value_parser!(u32).range(1..=64))]
    png_scale: u32,

    /// Export grid, rooms and passages as JSON
    #[arg(long)]
    json: Option<String>,

    /// Do not print the map to stdout
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    /// Start from the config file (or defaults) and apply explicit flags.
    fn to_config(&self) -> cave_generator::error::Result<CaveConfig> {
        let mut config = match &self.config {
            Some(path) => CaveConfig::load(path)?,
            None => CaveConfig::default(),
        };

        if let Some(v) = self.width {
            config.width = v;
        }
        if let Some(v) = self.height {
            config.height = v;
        }
        if let Some(v) = &self.seed {
            config.seed = v.clone();
            config.use_random_seed = false;
        }
        if self.random_seed {
            config.use_random_seed = true;
        }
        if let Some(v) = self.fill {
            config.random_fill_percent = v;
        }
        if let Some(v) = self.smoothing {
            config.smoothing_amount = v;
        }
        if let Some(v) = self.tolerance {
            config.smoothing_tolerance = v;
        }
        if let Some(v) = self.floor_denoise {
            config.floor_denoising_tolerance = v;
        }
        if let Some(v) = self.wall_denoise {
            config.wall_denoising_tolerance = v;
        }
        if let Some(v) = self.border {
            config.border_width = v;
        }
        if let Some(v) = self.square_size {
            config.square_size = v;
        }

        Ok(config)
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.to_config()?;
    if let Some(path) = &args.save_config {
        config.save(path)?;
        info!("Saved config to {}", path);
    }

    let cave = generate(&config)?;

    if !args.quiet {
        print!("{}", ascii::render_map(&cave, AsciiOptions::default()));
        println!(
            "Seed \"{}\"{}: {} room(s), {} passage(s), {:.1}% floor",
            cave.seed,
            if cave.reproducible { "" } else { " (time-derived)" },
            cave.rooms.len(),
            cave.rooms.passages().len(),
            100.0 * cave.floor_ratio()
        );
    }

    if let Some(path) = &args.ascii {
        ascii::export_ascii(&cave, path)?;
        info!("Exported ASCII report to {}", path);
    }
    if let Some(path) = &args.png {
        export::export_png(&cave, path, args.png_scale)?;
        info!("Exported PNG preview to {}", path);
    }
    if let Some(path) = &args.json {
        export::export_json(&cave, path)?;
        info!("Exported JSON to {}", path);
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
