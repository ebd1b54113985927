use clap::{Parser, ValueEnum};
use color_eyre::{Report, Result};
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use netdevmgr::config::Config;
use netdevmgr::topology::Topology;
use netdevmgr::{config_loader, orchestrator, report};

/// Output format for the topology listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Build a network topology from a scenario file and check its consistency
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the scenario YAML file
    #[arg(short, long)]
    config: PathBuf,

    /// Seed for address generation (overrides the scenario seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Print details for a single device (case-insensitive)
    #[arg(short, long)]
    device: Option<String>,

    /// Output format for the graph listing
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Do not print the graph listing
    #[arg(long)]
    skip_graph: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Scenario file: {:?}", args.config);

    let config = config_loader::load_config(&args.config)?;
    let mut allocator = orchestrator::allocator_for(&config, args.seed);
    let topology = orchestrator::build_topology(&config, &mut allocator)?;

    if let Some(name) = &args.device {
        print!("{}", report::device_info_by_name(&topology, name));
    }

    if !args.skip_graph {
        match args.format {
            Format::Text => println!("{}", report::render_graph(&topology)),
            Format::Json => println!("{}", report::render_json(&topology)?),
        }
    }

    check_topology(&config, &topology)
}

/// Validate the topology; success is logged by the validator, a violation
/// is returned once through color-eyre
fn check_topology(config: &Config, topology: &Topology) -> Result<()> {
    let validator = orchestrator::validator_for(config);
    info!("Validation options: {:?}", validator.options());
    validator
        .validate(topology)
        .map_err(|violation| Report::new(violation).wrap_err("Topology validation failed"))
}
