//! Smoke-test CLI: locate the registry, parse it, and print the signatures
//! of a few commands the way the generator would render them.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use xrgen::registry::{parse_registry, Command, ParseLimits, RegistryError, RegistryLocator};
use xrgen::LayerConfig;

/// Default lookups when no names are given on the command line.
const SMOKE_TEST_FUNCTIONS: [&str; 3] = [
    "xrCreateSession",
    "xrGetSystem",
    "xrEnumerateSwapchainFormats",
];

#[derive(Debug, Parser)]
#[command(name = "xrgen", about = "OpenXR registry front end for API layer generation")]
struct Cli {
    /// Path to the registry XML; skips the candidate search.
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Project root the candidate search is anchored at.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Layer selection file (TOML) to validate against the registry.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the matched commands as JSON instead of prototypes.
    #[arg(long)]
    json: bool,

    /// Command names to look up.
    names: Vec<String>,
}

fn main() -> Result<()> {
    xrgen::logging::init_logging()?;
    let cli = Cli::parse();

    let registry_path = match cli.registry {
        Some(path) => path,
        None => {
            let locator = RegistryLocator::new(&cli.root);
            locator.locate().ok_or(RegistryError::DocumentNotFound {
                attempted: locator.attempted(),
            })?
        }
    };

    println!("Parsing: {}", registry_path.display());
    let outcome = parse_registry(&registry_path, &ParseLimits::default())?;

    if let Some(config_path) = &cli.config {
        let config = LayerConfig::load(config_path)?;
        for name in config.implicit_overrides() {
            warn!("{name} is handled implicitly and must not be listed in override_functions");
        }
    }

    let names: Vec<String> = if cli.names.is_empty() {
        SMOKE_TEST_FUNCTIONS.iter().map(|s| s.to_string()).collect()
    } else {
        cli.names.clone()
    };

    if cli.json {
        let found: Vec<&Command> = names
            .iter()
            .filter_map(|name| outcome.index.get(name))
            .collect();
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    for name in &names {
        match outcome.index.get(name) {
            Some(command) => println!("{}", command.signature()),
            None => println!("{name}: Not found"),
        }
    }

    Ok(())
}
