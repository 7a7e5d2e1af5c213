//! # Kagero Trainer
//!
//! Builds hidden Markov models from data: supervised estimation from
//! labelled sequences and Baum–Welch refinement on unlabelled ones.
//! Also ships a tab-separated loader for tagged sequences and the
//! `kagero-train` command-line tool.

pub mod baum_welch;
pub mod config;
pub mod data;
pub mod demo;
pub mod evaluate;
mod supervised;
pub mod trainer;

pub use baum_welch::{TrainingOutcome, TrainingReport};
pub use config::{BaumWelchConfig, PriorPolicy};
pub use data::{TaggedSequence, load_tagged_sequences, parse_tagged_sequences};
pub use evaluate::{AccuracyReport, accuracy};
pub use trainer::HiddenMarkovModelTrainer;
