//! Runs the world without any interactive interface.

use crate::args::Args;
use ca2d_lib::{Config, World};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use std::{error::Error, fs, path::Path};

/// Reads a configuration file.
///
/// The format is chosen by the extension: `.yaml` or `.yml` for YAML,
/// `.json` for JSON, and TOML for everything else.
fn read_config(path: &Path) -> Result<Config, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    parse_config(&text, ext)
}

fn parse_config(text: &str, ext: &str) -> Result<Config, Box<dyn Error>> {
    let config = match ext {
        "yaml" | "yml" => serde_yaml::from_str(text)?,
        "json" => serde_json::from_str(text)?,
        _ => toml::from_str(text)?,
    };
    Ok(config)
}

/// Builds the configuration from the configuration file and the
/// command-line options. The latter take precedence.
fn config(args: &Args) -> Result<Config, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => Config::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(rule) = &args.rule {
        config = config.set_rule_string(rule);
    }
    if let Some(name) = &args.name {
        config = config.set_name(name);
    }
    Ok(config)
}

fn print_world(world: &World) {
    println!(
        "x = {}, y = {}, rule = {}, generation = {}",
        world.width(),
        world.height(),
        world.rule().rule_string(),
        world.generation()
    );
    print!("{}", world.plaintext());
}

/// Builds the world, runs it, and prints the result.
pub(crate) fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = config(&args)?;
    let mut world = config.world()?;
    info!("Running {:?}", world);

    if let Some(path) = &args.load {
        world.load(path)?;
    }
    if args.random {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        world.randomize(&mut rng)?;
    }

    if args.all {
        print_world(&world);
    }
    for _ in 0..args.generations {
        world.advance()?;
        if args.all {
            print_world(&world);
        }
    }
    if !args.all {
        print_world(&world);
    }
    info!("Population: {}", world.population());

    if let Some(path) = &args.save {
        world.save(path)?;
    }
    Ok(())
}
