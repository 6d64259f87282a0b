// ============================================================
// Layer 4 - Intents Loader
// ============================================================
// Reads the intents JSON file (UTF-8) into IntentRecords.
// A missing or malformed file is fatal: there is nothing to
// train on without it.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::intent::{IntentRecord, IntentsFile};
use crate::domain::traits::IntentSource;

pub struct IntentsLoader {
    path: PathBuf,
}

impl IntentsLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IntentSource for IntentsLoader {
    fn load_intents(&self) -> Result<Vec<IntentRecord>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read intents file '{}'", self.path.display()))?;

        let file: IntentsFile = serde_json::from_str(&text)
            .with_context(|| format!("Malformed intents file '{}'", self.path.display()))?;

        for intent in file.intents.iter().filter(|i| i.questions.is_empty()) {
            tracing::warn!(
                "Intent '{}' has no example questions and will not be trained",
                intent.tag
            );
        }

        tracing::info!(
            "Loaded {} intents from '{}'",
            file.intents.len(),
            self.path.display()
        );
        Ok(file.intents)
    }
}
