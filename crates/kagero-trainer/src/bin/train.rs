//! Command-line front end for Kagero training.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use kagero_core::prob::{LidstoneEstimator, MleEstimator};
use kagero_trainer::demo::{market_model, sample_unlabelled};
use kagero_trainer::{
    AccuracyReport, BaumWelchConfig, HiddenMarkovModelTrainer, PriorPolicy, TaggedSequence,
    accuracy, load_tagged_sequences,
};
use serde::Serialize;
use tracing::info;

/// CLI arguments
#[derive(Parser)]
#[command(name = "kagero-train")]
#[command(about = "Train hidden Markov models from tagged or sampled sequences")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Supervised training from a tab-separated tagged file
    Supervised {
        /// Tagged sequences, one `symbol<TAB>state` per line
        #[arg(short, long)]
        data: PathBuf,

        /// Hold out the last N sequences for evaluation
        #[arg(long, default_value_t = 0)]
        holdout: usize,

        /// Lidstone smoothing parameter (unsmoothed MLE if absent)
        #[arg(long)]
        lidstone: Option<f64>,
    },
    /// Baum-Welch on sequences sampled from the market regime model
    Market {
        /// Number of training sequences
        #[arg(short = 'n', long, default_value_t = 10)]
        sequences: usize,

        /// Tokens per sequence
        #[arg(short, long, default_value_t = 5)]
        length: usize,

        /// Random seed
        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        /// Iteration cap
        #[arg(long, default_value_t = 1000)]
        max_iterations: usize,

        /// Convergence threshold on the change in log-probability
        #[arg(long, default_value_t = 1e-6)]
        threshold: f64,

        /// Re-estimate the initial state distribution
        #[arg(long)]
        reestimate_priors: bool,
    },
}

#[derive(Serialize)]
struct SupervisedSummary {
    states: usize,
    symbols: usize,
    #[serde(flatten)]
    evaluation: AccuracyReport,
}

fn run_supervised(data: PathBuf, holdout: usize, lidstone: Option<f64>) -> Result<()> {
    let mut sequences: Vec<TaggedSequence> = load_tagged_sequences(&data)
        .with_context(|| format!("failed to read {}", data.display()))?;
    if sequences.is_empty() {
        bail!("no tagged sequences in {}", data.display());
    }
    if holdout >= sequences.len() {
        bail!(
            "holdout of {holdout} leaves no training data ({} sequences)",
            sequences.len()
        );
    }

    let test = sequences.split_off(sequences.len() - holdout);
    info!(train = sequences.len(), test = test.len(), "loaded tagged sequences");

    let mut trainer = HiddenMarkovModelTrainer::default();
    let model = match lidstone {
        Some(gamma) => trainer.train_supervised(&sequences, &LidstoneEstimator::new(gamma))?,
        None => trainer.train_supervised(&sequences, &MleEstimator)?,
    };
    info!(%model, "trained");

    // Without a holdout, report training-set accuracy.
    let gold = if test.is_empty() { &sequences } else { &test };
    let summary = SupervisedSummary {
        states: model.states().len(),
        symbols: model.symbols().len(),
        evaluation: accuracy(&model, gold)?,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run_market(sequences: usize, length: usize, seed: u64, config: BaumWelchConfig) -> Result<()> {
    let model = market_model();
    let mut rng = oorandom::Rand64::new(u128::from(seed));
    let training = sample_unlabelled(&model, &mut rng, sequences, length)?;
    info!(sequences, length, seed, "sampled training data");

    let mut trainer = HiddenMarkovModelTrainer::default();
    let outcome = trainer.train_unsupervised(&training, Some(model), &config)?;
    info!(model = %outcome.model, converged = outcome.report.converged, "refined");

    println!("{}", serde_json::to_string_pretty(&outcome.report)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Supervised {
            data,
            holdout,
            lidstone,
        } => run_supervised(data, holdout, lidstone),
        Commands::Market {
            sequences,
            length,
            seed,
            max_iterations,
            threshold,
            reestimate_priors,
        } => {
            let policy = if reestimate_priors {
                PriorPolicy::Reestimate
            } else {
                PriorPolicy::Keep
            };
            let config = BaumWelchConfig::new()
                .with_max_iterations(max_iterations)
                .with_convergence_threshold(threshold)
                .with_prior_policy(policy);
            run_market(sequences, length, seed, config)
        }
    }
}
