// ============================================================
// Layer 6 - Artifact Store
// ============================================================
// Everything a training run leaves behind, in one directory:
//
//   results/
//     words.json            ← vocabulary, feature column order
//     classes.json          ← tag list, label column order
//     chatbot_model.mpk.gz  ← model weights (gzipped MessagePack)
//     model_config.json     ← widths needed to rebuild the model
//     train_config.json     ← hyperparameters of the run
//
// words.json and classes.json are always written from a single
// FeatureIndex and read back into one, so the column order seen
// by the model and by the index is the same.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};
use burn::{
    prelude::*,
    record::{HalfPrecisionSettings, NamedMpkGzFileRecorder, Recorder},
};
use serde::{de::DeserializeOwned, Serialize};

use crate::application::train_use_case::TrainConfig;
use crate::domain::feature_index::FeatureIndex;
use crate::ml::model::{IntentClassifier, IntentClassifierConfig};

pub const WORDS_FILE: &str        = "words.json";
pub const CLASSES_FILE: &str      = "classes.json";
/// The recorder appends ".mpk.gz".
pub const MODEL_FILE: &str        = "chatbot_model";
pub const MODEL_CONFIG_FILE: &str = "model_config.json";
pub const TRAIN_CONFIG_FILE: &str = "train_config.json";

type ModelRecorder = NamedMpkGzFileRecorder<HalfPrecisionSettings>;

pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Store rooted at `dir`, created if it does not exist yet.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create results directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Store over an existing directory of artifacts.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        anyhow::ensure!(
            dir.is_dir(),
            "Results directory '{}' does not exist. Have you run 'train' first?",
            dir.display()
        );
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_feature_index(&self, index: &FeatureIndex) -> Result<()> {
        self.write_json(WORDS_FILE, &index.vocabulary())?;
        self.write_json(CLASSES_FILE, &index.tags())?;
        tracing::debug!(
            "Saved {} words and {} classes to '{}'",
            index.feature_width(),
            index.label_width(),
            self.dir.display()
        );
        Ok(())
    }

    /// Read both lists back; their order is validated, not repaired.
    pub fn load_feature_index(&self) -> Result<FeatureIndex> {
        let words: Vec<String>   = self.read_json(WORDS_FILE)?;
        let classes: Vec<String> = self.read_json(CLASSES_FILE)?;
        Ok(FeatureIndex::from_sorted(words, classes)?)
    }

    pub fn save_model_config(&self, cfg: &IntentClassifierConfig) -> Result<()> {
        self.write_json(MODEL_CONFIG_FILE, cfg)
    }

    pub fn load_model_config(&self) -> Result<IntentClassifierConfig> {
        self.read_json(MODEL_CONFIG_FILE)
    }

    pub fn save_train_config(&self, cfg: &TrainConfig) -> Result<()> {
        self.write_json(TRAIN_CONFIG_FILE, cfg)
    }

    /// Save model weights as half-precision MessagePack + gzip.
    pub fn save_model<B: Backend>(&self, model: &IntentClassifier<B>) -> Result<()> {
        let path = self.dir.join(MODEL_FILE);

        ModelRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save model to '{}'", path.display()))?;

        tracing::info!("Saved model weights to '{}.mpk.gz'", path.display());
        Ok(())
    }

    /// Restore weights into `model`, which must have been built
    /// from the saved model config.
    pub fn load_model<B: Backend>(
        &self,
        model:  IntentClassifier<B>,
        device: &B::Device,
    ) -> Result<IntentClassifier<B>> {
        let path = self.dir.join(MODEL_FILE);

        let record = ModelRecorder::new()
            .load(path.clone(), device)
            .with_context(|| format!("Cannot load model '{}.mpk.gz'", path.display()))?;

        Ok(model.load_record(record))
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Wrote '{}'", path.display());
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed '{}'", path.display()))
    }
}
