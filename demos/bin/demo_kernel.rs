//! qkern kernel demo
//!
//! Builds one of the predefined circuits, runs it and prints what a UI
//! layer would read back: diagram, final state, probabilities, Bloch
//! coordinates and sampled counts.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::f64::consts::PI;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use console::style;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qkern_circuit::{AnalysisConfig, Circuit};
use qkern_core::Qubit;
use qkern_demos::{CircuitReport, print_header, print_result, print_section, print_success, print_warning};

/// qkern - single-qubit circuit simulation demo
#[derive(Parser)]
#[command(name = "demo-kernel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Number of measurement shots (0 disables sampling)
    #[arg(short, long, default_value = "1024", global = true)]
    shots: u64,

    /// Seed for sampling and random circuits
    #[arg(long, env = "QKERN_SEED", global = true)]
    seed: Option<u64>,

    /// Emit the report as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// |0⟩ followed by a Hadamard
    Bell,

    /// Single-qubit QFT
    Qft,

    /// H · RZ(π) · H, which always reads 1
    Interference,

    /// Random circuit from the fixed gate palette
    Random {
        /// Number of gates
        #[arg(short, long, default_value = "12")]
        depth: usize,
    },

    /// Prepare the state with the given Bloch angles
    Prepare {
        /// Polar angle θ in [0, π]
        #[arg(long)]
        theta: f64,

        /// Azimuthal angle φ
        #[arg(long, default_value = "0.0")]
        phi: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute(&cli) {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn execute(cli: &Cli) -> Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let config = AnalysisConfig::new().with_seed(cli.seed.unwrap_or(qkern_circuit::DEFAULT_SEED));

    let (circuit, target) = match &cli.command {
        Commands::Bell => (Circuit::bell(), None),
        Commands::Qft => (Circuit::qft(), None),
        Commands::Interference => {
            let mut circuit = Circuit::new("interference");
            circuit.h().rz(PI).h();
            (circuit, None)
        }
        Commands::Random { depth } => (Circuit::random_with_rng(*depth, &mut rng), None),
        Commands::Prepare { theta, phi } => {
            if !(0.0..=PI).contains(theta) {
                bail!("theta must lie in [0, π], got {theta}");
            }
            let target = Qubit::from_bloch_angles(*theta, *phi);
            (Circuit::state_preparation(&target), Some(target))
        }
    };
    let circuit = circuit.with_config(config);
    info!(circuit = circuit.name(), steps = circuit.len(), "built circuit");

    let report = CircuitReport::collect(&circuit, cli.shots, &mut rng);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_header("qkern single-qubit kernel");
    report.print();
    analyze(&circuit, target.as_ref())?;
    Ok(())
}

/// Print optimization, inversion and preparation checks.
fn analyze(circuit: &Circuit, target: Option<&Qubit>) -> Result<()> {
    print_section("Analysis");

    let optimized = circuit.optimized();
    print_result(
        "Optimized",
        format!("{} → {} steps", circuit.len(), optimized.len()),
    );
    print_result("Equivalent", optimized.is_equivalent(circuit));

    let round_trip = circuit.composed(&circuit.inverse()?);
    let fidelity = round_trip.fidelity(&Circuit::new("identity"), &[]);
    print_result("Inverse round trip fidelity", format!("{fidelity:.6}"));

    if circuit.is_unitary() {
        print_success("Every test state stays normalized");
    } else {
        print_warning("Normalization drift detected");
    }

    if let Some(target) = target {
        let prepared = circuit.execute();
        print_result("Preparation fidelity", format!("{:.6}", prepared.fidelity(target)));
    }
    Ok(())
}
