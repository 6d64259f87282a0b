// ============================================================
// Layer 2 - InspectUseCase
// ============================================================
// Checks that a results directory is internally consistent:
//
//   words.json size   == model input width
//   classes.json size == model output width
//   weights load into a model built from model_config.json
//
// A later inference component depends on exactly this agreement.

use anyhow::Result;
use burn::{module::Module, prelude::Backend};

use crate::domain::error::PipelineError;
use crate::infra::checkpoint::ArtifactStore;
use crate::ml::{model::IntentClassifier, trainer::InnerBackend};

#[derive(Debug, Clone)]
pub struct ArtifactSummary {
    pub vocabulary_size: usize,
    pub tags:            Vec<String>,
    pub num_params:      usize,
}

pub struct InspectUseCase {
    results_dir: String,
}

impl InspectUseCase {
    pub fn new(results_dir: impl Into<String>) -> Self {
        Self { results_dir: results_dir.into() }
    }

    pub fn execute(&self) -> Result<ArtifactSummary> {
        let store     = ArtifactStore::open(&self.results_dir)?;
        let index     = store.load_feature_index()?;
        let model_cfg = store.load_model_config()?;

        if index.feature_width() != model_cfg.input_width {
            return Err(PipelineError::ArtifactMismatch(format!(
                "{} vocabulary words but the model expects {} inputs",
                index.feature_width(),
                model_cfg.input_width,
            ))
            .into());
        }
        if index.label_width() != model_cfg.num_tags {
            return Err(PipelineError::ArtifactMismatch(format!(
                "{} classes but the model predicts {} tags",
                index.label_width(),
                model_cfg.num_tags,
            ))
            .into());
        }

        let device: <InnerBackend as Backend>::Device = Default::default();
        let model: IntentClassifier<InnerBackend> = model_cfg.init(&device);
        let model = store.load_model(model, &device)?;
        tracing::info!("Artifacts in '{}' are consistent", self.results_dir);

        Ok(ArtifactSummary {
            vocabulary_size: index.feature_width(),
            tags:            index.tags().to_vec(),
            num_params:      model.num_params(),
        })
    }
}
