// ============================================================
// Layer 6 - Metrics Logger
// ============================================================
// One CSV row per training epoch:
//
//   epoch,loss,accuracy,learning_rate
//   1,1.791200,0.166667,0.00999998
//   2,1.702800,0.250000,0.00999996
//   ...
//
// The file is recreated when a run starts, so it always describes
// the model saved next to it.
//
// Output file: <results>/metrics.csv

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

pub const METRICS_FILE: &str = "metrics.csv";

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Mean categorical cross-entropy over every example seen this epoch
    pub loss: f64,

    /// Fraction of examples whose most probable tag was correct
    pub accuracy: f64,

    /// Learning rate used by the epoch's last optimiser step
    pub learning_rate: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, loss: f64, accuracy: f64, learning_rate: f64) -> Self {
        Self { epoch, loss, accuracy, learning_rate }
    }
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;

        let csv_path = dir.join(METRICS_FILE);

        let mut f = fs::File::create(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writeln!(f, "epoch,loss,accuracy,learning_rate")?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot append to '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.8}",
            m.epoch, m.loss, m.accuracy, m.learning_rate,
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: loss={:.4}, accuracy={:.4}",
            m.epoch,
            m.loss,
            m.accuracy,
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
