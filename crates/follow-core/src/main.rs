//! Follow Graph Simulator
//!
//! Usage:
//!   follow_sim run --personas personas.json --affinities affinities.json
//!   follow_sim run --personas p.json --affinities a.json --roster roster.json --seed 42
//!   follow_sim affinity-template --roster roster.json --out affinities.json
//!   follow_sim default-config > follow.toml

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use follow_core::components::affinity_template;
use follow_core::setup::{load_affinities, load_personas, load_roster, Roster};
use follow_core::{default_config_toml, Config, OutputError, OutputWriter, SimError, Simulation};

/// Command line arguments for the simulator
#[derive(Parser, Debug)]
#[command(name = "follow_sim")]
#[command(about = "Simulates a directed follow graph among faction personas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate every roster pair and write graph, cells and report
    Run {
        /// Persona details table (JSON array)
        #[arg(long)]
        personas: PathBuf,

        /// Faction affinity table (JSON array)
        #[arg(long)]
        affinities: PathBuf,

        /// Social graph roster (JSON array); defaults to every persona
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Random seed for reproducibility (overrides the config)
        #[arg(long)]
        seed: Option<u64>,

        /// Directory for output files
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },
    /// Write an editable affinity table for the factions on a roster
    AffinityTemplate {
        /// Social graph roster (JSON array)
        #[arg(long)]
        roster: PathBuf,

        /// Configuration file (TOML), for the default affinity
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file; prints to stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the default configuration
    DefaultConfig,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), SimError> {
    match command {
        Commands::Run {
            personas,
            affinities,
            roster,
            config,
            seed,
            output_dir,
        } => {
            let config = load_config(config.as_deref())?;
            let persona_rows = load_personas(&personas)?;
            let affinity_rows = load_affinities(&affinities)?;
            let roster_rows = roster.as_deref().map(load_roster).transpose()?;

            let simulation =
                Simulation::new(config, &persona_rows, &affinity_rows, roster_rows.as_deref())?;
            let result = simulation.run(seed);

            let writer = OutputWriter::new(&output_dir)?;
            writer.write_all(
                &result.outcome.graph,
                &result.outcome.cells,
                &result.report,
                simulation.config(),
            )?;

            println!(
                "Run {} (seed {}): {} nodes, {} edges, {} mutual pairs -> {}",
                result.report.run_id,
                result.report.seed,
                result.report.summary.nodes,
                result.report.summary.edges,
                result.report.summary.mutual_pairs,
                output_dir.display()
            );
        }
        Commands::AffinityTemplate {
            roster,
            config,
            out,
        } => {
            let config = load_config(config.as_deref())?;
            let factions = Roster::from_rows(&load_roster(&roster)?).factions();
            let template = affinity_template(&factions, config.follow.default_affinity);
            let json = serde_json::to_string_pretty(&template).map_err(OutputError::from)?;

            match out {
                Some(path) => {
                    fs::write(&path, json).map_err(OutputError::from)?;
                    tracing::info!(
                        "Wrote {} affinity rows to {}",
                        template.len(),
                        path.display()
                    );
                }
                None => println!("{}", json),
            }
        }
        Commands::DefaultConfig => {
            print!("{}", default_config_toml());
        }
    }
    Ok(())
}

/// An explicit path must load. Without one, `follow.toml` in the working
/// directory is used when present, and must be valid.
fn load_config(path: Option<&Path>) -> Result<Config, SimError> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default()?,
    };
    Ok(config)
}
