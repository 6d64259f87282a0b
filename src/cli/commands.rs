// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Two subcommands: `train` and `inspect`.
//
// Defaults reproduce the reference training run:
// 200 epochs, batch size 5, SGD lr 0.01, momentum 0.9,
// decay 1e-6, dropout 0.5.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the intent classifier on an intents JSON file
    Train(TrainArgs),

    /// Verify that a results directory holds consistent artifacts
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Intents dataset: {"intents": [{"tag": ..., "questions": [...]}]}
    #[arg(long, default_value = "data/intents.json")]
    pub intents: String,

    /// Directory for the model, words, classes and metrics
    #[arg(long, default_value = "results")]
    pub results_dir: String,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 200)]
    pub epochs: usize,

    /// Examples per optimiser step
    #[arg(long, default_value_t = 5)]
    pub batch_size: usize,

    /// Initial SGD learning rate
    #[arg(long, default_value_t = 0.01)]
    pub lr: f64,

    /// Nesterov momentum factor
    #[arg(long, default_value_t = 0.9)]
    pub momentum: f64,

    /// Per-step learning-rate decay: lr / (1 + decay * step)
    #[arg(long, default_value_t = 1e-6)]
    pub decay: f64,

    /// Drop probability of both dropout layers
    #[arg(long, default_value_t = 0.5)]
    pub dropout: f64,

    /// Seed for the example shuffle and batch order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Lexicon file replacing the built-in English lexicon
    #[arg(long)]
    pub lexicon: Option<String>,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            intents_path: a.intents,
            results_dir:  a.results_dir,
            epochs:       a.epochs,
            batch_size:   a.batch_size,
            lr:           a.lr,
            momentum:     a.momentum,
            decay:        a.decay,
            dropout:      a.dropout,
            seed:         a.seed,
            lexicon:      a.lexicon,
        }
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Directory written by a previous `train` run
    #[arg(long, default_value = "results")]
    pub results_dir: String,
}
