// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and delegates to Layer 2. This is
// the only layer that prints user-facing summaries.
//
//   1. `train`   - extract, encode and fit; writes results/
//   2. `inspect` - check a results/ directory for consistency
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InspectArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "intent-trainer",
    version,
    about = "Train a bag-of-words intent classifier for a rule-based chatbot."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)   => run_train(args),
            Commands::Inspect(args) => run_inspect(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Training on intents in: {}", args.intents);

    let use_case = TrainUseCase::new(args.into());
    let prepared = use_case.prepare()?;

    println!("{} documents", prepared.document_count);
    println!("{} classe(s) {:?}", prepared.index.label_width(), prepared.index.tags());
    println!("{} unique lemmatized words", prepared.index.feature_width());

    use_case.train(prepared)?;

    println!("Training complete. Artifacts saved.");
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    use crate::application::inspect_use_case::InspectUseCase;

    let summary = InspectUseCase::new(args.results_dir.clone()).execute()?;

    println!("Results directory: {}", args.results_dir);
    println!("{} unique lemmatized words", summary.vocabulary_size);
    println!("{} classe(s) {:?}", summary.tags.len(), summary.tags);
    println!("{} model parameters", summary.num_params);
    Ok(())
}
