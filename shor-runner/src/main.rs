use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use qpe_sim::{IpeReport, OracleConfig, SampledOracle, iterative_phase_estimate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use shor_core::{Estimate, EstimateConfig, FactorEstimator};
use std::f64::consts::PI;
use std::fs;
use std::path::PathBuf;

/// Shor order-finding workbench: factor a small composite from
/// single-shot phase samples, or walk iterative phase estimation.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recover a non-trivial factor of a composite modulus.
    Factor {
        #[arg(short, long, default_value_t = 15)]
        modulus: u64,

        /// Base of the modular exponentiation; must be coprime to the modulus.
        #[arg(short, long, default_value_t = 7)]
        base: u64,

        /// Counting bits per phase sample.
        #[arg(short, long, default_value_t = 8)]
        precision_bits: u32,

        /// Retry budget before giving up.
        #[arg(long, default_value_t = 32)]
        max_attempts: u32,

        /// Fixed seed for a reproducible run.
        #[arg(long)]
        seed: Option<u64>,

        /// Write the JSON report here in addition to the summary.
        #[arg(short, long)]
        output_file: Option<PathBuf>,
    },
    /// Estimate the eigenphase of a phase gate one bit at a time.
    Ipe {
        /// Phase numerator: the gate angle is 2*pi * numerator / 2^bits.
        #[arg(short, long, default_value_t = 5)]
        numerator: u64,

        /// Number of phase bits to resolve.
        #[arg(short, long, default_value_t = 4)]
        bits: u32,

        /// Fixed seed for a reproducible run.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FactorReport {
    config: EstimateConfig,
    estimate: Estimate,
}

fn run_factor(config: EstimateConfig, seed: Option<u64>, output_file: Option<PathBuf>) -> Result<()> {
    println!(
        "factoring {} with base {} ({} phase bits, {} attempts max)",
        config.modulus, config.base, config.precision_bits, config.max_attempts
    );

    let oracle = SampledOracle::new(OracleConfig {
        seed,
        ..OracleConfig::default()
    });
    let mut estimator = FactorEstimator::new(oracle);
    let estimate = estimator
        .estimate_factor(&config)
        .context("factoring run failed")?;

    for record in &estimate.trace {
        println!(" attempt {}: {}", record.attempt, record.outcome);
    }
    println!(
        " -> factors {} x {} after {} attempt(s)",
        estimate.factors.0, estimate.factors.1, estimate.attempts_used
    );

    if let Some(path) = output_file {
        let report = FactorReport { config, estimate };
        let json = serde_json::to_string_pretty(&report)
            .context("failed to serialize the factor report")?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        println!(" -> report written to {}", path.display());
    }
    Ok(())
}

fn run_ipe(numerator: u64, bits: u32, seed: Option<u64>) -> Result<()> {
    if bits == 0 || bits > 63 {
        bail!("bits must be between 1 and 63, got {}", bits);
    }
    if numerator >= 1 << bits {
        bail!("numerator {} does not fit in {} bits", numerator, bits);
    }

    let theta = 2.0 * PI * numerator as f64 / (1u64 << bits) as f64;
    println!(
        "iteratively estimating phase {}/{} ({} rounds)",
        numerator,
        1u64 << bits,
        bits
    );

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let report: IpeReport = iterative_phase_estimate(theta, bits, &mut rng);

    for round in &report.rounds {
        println!(
            " round {}: controlled power {:>4} -> bit {}",
            round.round, round.controlled_power, round.measured_bit
        );
    }
    println!(
        " -> recovered phase {}/{}",
        report.numerator,
        1u64 << report.bits
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Factor {
            modulus,
            base,
            precision_bits,
            max_attempts,
            seed,
            output_file,
        } => run_factor(
            EstimateConfig {
                modulus,
                base,
                precision_bits,
                max_attempts,
            },
            seed,
            output_file,
        ),
        Command::Ipe {
            numerator,
            bits,
            seed,
        } => run_ipe(numerator, bits, seed),
    }
}
