// ============================================================
// Layer 2 - TrainUseCase
// ============================================================
// Runs the training pipeline in two phases so the CLI can report
// the corpus before the (long) training loop starts:
//
//   prepare():
//     Step 1: Install the lemmatizer         (Layer 4 - data)
//     Step 2: Load intents JSON              (Layer 4 - data)
//     Step 3: Extract documents, vocabulary
//             and tag list                   (Layer 4 - data)
//     Step 4: Encode + shuffle examples      (Layer 4 - data)
//
//   train():
//     Step 5: Save words/classes + config    (Layer 6 - infra)
//     Step 6: Fit and save the model         (Layer 5 - ml)
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data::{
    encoder::FeatureEncoder,
    extractor::CorpusExtractor,
    lemmatizer,
    loader::IntentsLoader,
    normalizer::TextNormalizer,
    dataset::TrainingExample,
};
use crate::domain::{feature_index::FeatureIndex, traits::IntentSource};
use crate::infra::{checkpoint::ArtifactStore, metrics::MetricsLogger};
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// Saved next to the model as train_config.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub intents_path: String,
    pub results_dir:  String,
    pub epochs:       usize,
    pub batch_size:   usize,
    pub lr:           f64,
    pub momentum:     f64,
    pub decay:        f64,
    pub dropout:      f64,
    pub seed:         Option<u64>,
    pub lexicon:      Option<String>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            intents_path: "data/intents.json".to_string(),
            results_dir:  "results".to_string(),
            epochs:       200,
            batch_size:   5,
            lr:           0.01,
            momentum:     0.9,
            decay:        1e-6,
            dropout:      0.5,
            seed:         None,
            lexicon:      None,
        }
    }
}

/// Output of the preparation phase.
pub struct PreparedCorpus {
    pub document_count: usize,
    pub index:          FeatureIndex,
    pub examples:       Vec<TrainingExample>,
    rng:                StdRng,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Prepare from the configured intents file.
    pub fn prepare(&self) -> Result<PreparedCorpus> {
        self.prepare_from(&IntentsLoader::new(&self.config.intents_path))
    }

    pub fn prepare_from(&self, source: &dyn IntentSource) -> Result<PreparedCorpus> {
        let cfg = &self.config;

        // ── Step 1: Linguistic resources ─────────────────────────────────────
        let lemmatizer = lemmatizer::install(cfg.lexicon.as_deref().map(Path::new))?;
        let normalizer = TextNormalizer::new(lemmatizer);

        // ── Step 2: Load intents ─────────────────────────────────────────────
        let intents = source.load_intents()?;

        // ── Step 3: Extract ──────────────────────────────────────────────────
        let corpus = CorpusExtractor::new(&normalizer).extract(&intents)?;
        tracing::info!(
            "Extracted {} documents, {} tags, {} vocabulary words",
            corpus.documents.len(),
            corpus.index.label_width(),
            corpus.index.feature_width(),
        );

        // ── Step 4: Encode + shuffle ─────────────────────────────────────────
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let examples = FeatureEncoder::new(&normalizer, &corpus.index)
            .encode_all(&corpus.documents, &mut rng)?;

        Ok(PreparedCorpus {
            document_count: corpus.documents.len(),
            index:          corpus.index,
            examples,
            rng,
        })
    }

    pub fn train(&self, prepared: PreparedCorpus) -> Result<()> {
        let cfg = &self.config;
        let PreparedCorpus { index, examples, mut rng, .. } = prepared;

        // ── Step 5: Persist the column layout ────────────────────────────────
        let store = ArtifactStore::create(&cfg.results_dir)?;
        store.save_feature_index(&index)?;
        store.save_train_config(cfg)?;

        // ── Step 6: Fit ──────────────────────────────────────────────────────
        let metrics = MetricsLogger::new(store.dir())?;
        run_training(cfg, &index, examples, &store, &metrics, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intent::IntentRecord;
    use crate::infra::checkpoint::{CLASSES_FILE, MODEL_CONFIG_FILE, TRAIN_CONFIG_FILE, WORDS_FILE};
    use crate::infra::metrics::METRICS_FILE;

    fn intents() -> Vec<IntentRecord> {
        vec![
            IntentRecord::new("greeting", vec!["Hi", "Hello there"]),
            IntentRecord::new("bye", vec!["Goodbye"]),
            IntentRecord::new("unused", Vec::<String>::new()),
        ]
    }

    fn config(results_dir: &Path, epochs: usize) -> TrainConfig {
        TrainConfig {
            results_dir: results_dir.to_string_lossy().into_owned(),
            epochs,
            seed: Some(5),
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_prepare_reports_corpus() {
        let dir      = tempfile::tempdir().unwrap();
        let use_case = TrainUseCase::new(config(dir.path(), 1));
        let prepared = use_case.prepare_from(&intents()).unwrap();

        assert_eq!(prepared.document_count, 3);
        assert_eq!(prepared.index.tags(), ["bye", "greeting"]);
        assert_eq!(prepared.index.vocabulary(), ["goodbye", "hello", "hi", "there"]);
        assert_eq!(prepared.examples.len(), 3);
        for ex in &prepared.examples {
            assert_eq!(ex.features.len(), 4);
            assert_eq!(ex.label.len(), 2);
            assert_eq!(ex.label.iter().sum::<f32>(), 1.0);
        }
    }

    #[test]
    fn test_same_seed_gives_same_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = TrainUseCase::new(config(dir.path(), 1)).prepare_from(&intents()).unwrap();
        let b = TrainUseCase::new(config(dir.path(), 1)).prepare_from(&intents()).unwrap();
        assert_eq!(a.examples, b.examples);
    }

    #[test]
    fn test_empty_intents_fail_to_train() {
        let dir      = tempfile::tempdir().unwrap();
        let use_case = TrainUseCase::new(config(dir.path(), 1));
        let prepared = use_case
            .prepare_from(&vec![IntentRecord::new("silent", Vec::<String>::new())])
            .unwrap();

        assert!(prepared.examples.is_empty());
        assert!(use_case.train(prepared).is_err());
    }

    #[test]
    fn test_end_to_end_writes_artifacts() {
        let dir      = tempfile::tempdir().unwrap();
        let use_case = TrainUseCase::new(config(dir.path(), 2));
        let prepared = use_case.prepare_from(&intents()).unwrap();
        use_case.train(prepared).unwrap();

        for name in [WORDS_FILE, CLASSES_FILE, MODEL_CONFIG_FILE, TRAIN_CONFIG_FILE, METRICS_FILE] {
            assert!(dir.path().join(name).exists(), "missing {name}");
        }
        assert!(dir.path().join("chatbot_model.mpk.gz").exists());

        let metrics = std::fs::read_to_string(dir.path().join(METRICS_FILE)).unwrap();
        assert_eq!(metrics.lines().count(), 3);
    }
}
