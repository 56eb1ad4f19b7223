//! PQA command-line entry point

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pqa_sim::script::Session;
use pqa_sim::{demo, Simulator, SimulatorConfig, StateSnapshot};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "pqa")]
#[command(version)]
#[command(about = "State-vector quantum circuit simulator", long_about = None)]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalOptions {
    /// Seed for reproducible measurement outcomes
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Largest register to allocate (1-30)
    #[arg(long, global = true, value_name = "N")]
    max_qubits: Option<usize>,

    /// JSON configuration file; flags override its values
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log every operation (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk one qubit through the standard gates, then entangle and measure a pair
    Demo,

    /// Interactive emulator
    Repl,

    /// Run a command script
    Run {
        /// Script file, one command per line
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Print the final state as JSON
        #[arg(long)]
        json: bool,

        /// Sample the final state this many times without collapsing it
        #[arg(long, value_name = "SHOTS")]
        shots: Option<usize>,
    },
}

impl GlobalOptions {
    fn simulator_config(&self) -> anyhow::Result<SimulatorConfig> {
        let mut config = match &self.config {
            Some(path) => SimulatorConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SimulatorConfig::default(),
        };
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(max_qubits) = self.max_qubits {
            config = config.with_max_qubits(max_qubits);
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = if verbose {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.options.verbose);

    let config = cli.options.simulator_config()?;
    let mut simulator = Simulator::new(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Demo => {
            demo::run_demo(&mut simulator, &mut out)?;
        }
        Commands::Repl => {
            let mut session = Session::new(simulator)?;
            session.repl(io::stdin().lock(), &mut out)?;
        }
        Commands::Run { script, json, shots } => {
            let source = std::fs::read_to_string(&script)
                .with_context(|| format!("reading {}", script.display()))?;
            let threshold = simulator.config().show_threshold;

            let mut session = Session::new(simulator)?;
            session
                .run_script(&source, &mut out)
                .with_context(|| format!("running {}", script.display()))?;

            if let Some(shots) = shots {
                let result = session.sample(shots);
                writeln!(out, "Counts ({} shots):", result.shots)?;
                for (index, count) in result.sorted_outcomes() {
                    writeln!(
                        out,
                        "  {}: {} ({:.3})",
                        session.register().basis_label(index),
                        count,
                        result.get_probability(index)
                    )?;
                }
            }
            if json {
                let snapshot = StateSnapshot::capture(session.register(), threshold);
                writeln!(out, "{}", snapshot.to_json()?)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
