//! juju-nodes: list the machines of a Juju deployment matching filters

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::{Report, eyre};
use juju_nodes_core::constants::{CLUSTER_NAME, TRANSPORT};
use juju_nodes_core::{
    ClusterOptions, DiscoveryError, NodeDiscovery, option_help, render_discovery_error,
};
use juju_rs::{DEFAULT_JUJU_BIN, SystemExecutor};
use std::fs::File;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{EnvFilter, prelude::*};

/// juju-nodes: discover machines in Juju models
#[derive(Parser, Debug)]
#[command(name = "juju-nodes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Filter by application (comma separated regex)
    #[arg(long)]
    apps: Option<String>,

    /// Filter by unit (comma separated names)
    #[arg(long)]
    units: Option<String>,

    /// Models to query (comma separated, default: current model)
    #[arg(long)]
    models: Option<String>,

    /// Filter by machine id (comma separated)
    #[arg(long)]
    machines: Option<String>,

    /// Cluster option, e.g. -c juju.apps=nova-compute (repeatable)
    #[arg(short = 'c', long = "cluster-option", value_name = "OPTION=VALUE")]
    cluster_options: Vec<String>,

    /// Path to config file (default: ~/.config/juju-nodes/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// juju binary to run
    #[arg(long, default_value = DEFAULT_JUJU_BIN)]
    juju_bin: String,

    /// Print nodes as a JSON array
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Log file path (default: stderr)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List supported cluster options
    Options,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    color_eyre::install()?;
    init_logging(&cli)?;

    match cli.command {
        Some(Commands::Options) => {
            print_options();
            Ok(())
        }
        None => list_nodes(&cli),
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let log_level = if cli.debug { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(log_level.into());

    // stdout carries the node list, so logs never go there
    match &cli.log_file {
        Some(path) => {
            let log_file = File::create(path)?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(log_file)
                        .with_ansi(false)
                        .with_target(false),
                )
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false),
                )
                .with(filter)
                .init();
        }
    }
    Ok(())
}

fn print_options() {
    println!("{} (transport: {})", CLUSTER_NAME, TRANSPORT);
    for line in option_help() {
        println!("  {}", line);
    }
}

fn report(error: DiscoveryError) -> Report {
    eyre!(render_discovery_error(&error))
}

/// Merge config file, -c options and flags, in increasing precedence
fn load_options(cli: &Cli) -> Result<ClusterOptions> {
    let mut options = match &cli.config {
        Some(path) => ClusterOptions::load_from(path),
        None => ClusterOptions::load_default(),
    }
    .map_err(report)?;

    let flags = [
        ("apps", cli.apps.as_deref()),
        ("units", cli.units.as_deref()),
        ("models", cli.models.as_deref()),
        ("machines", cli.machines.as_deref()),
    ];
    options.merge(&cli.cluster_options, &flags).map_err(report)?;

    Ok(options)
}

fn list_nodes(cli: &Cli) -> Result<()> {
    let options = load_options(cli)?;
    let models = options.models();
    let criteria = options.criteria();

    tracing::info!("Discovering nodes in models {:?}", models);

    let discovery = NodeDiscovery::new(SystemExecutor).with_binary(cli.juju_bin.as_str());
    let nodes = discovery.discover(&models, &criteria).map_err(report)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&nodes)?);
    } else {
        for node in &nodes {
            println!("{}", node);
        }
    }

    tracing::info!("Found {} node(s)", nodes.len());
    Ok(())
}
