// ============================================================
// Layer 5 - Training Loop
// ============================================================
// Mini-batch SGD over the encoded intents.
//
//   optimiser:  SGD, momentum 0.9, Nesterov, no dampening
//   schedule:   lr_t = lr_0 / (1 + decay * t), t = optimiser steps taken
//   loss:       categorical cross-entropy on the softmax output
//   metric:     accuracy (argmax of prediction == argmax of label)
//
// Every epoch visits all examples once in a fresh random order.
// There is no validation split and no early stopping; the model
// from the last step is the one that gets saved.
//
// Reference: Burn Book §5, Sutskever et al. (2013) Nesterov momentum

use anyhow::{ensure, Result};
use burn::{
    backend::Autodiff,
    data::dataloader::{DataLoader, DataLoaderBuilder},
    optim::{momentum::MomentumConfig, GradientsParams, Optimizer, SgdConfig},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use rand::Rng;
use std::sync::Arc;

use crate::application::train_use_case::TrainConfig;
use crate::data::{
    batcher::{IntentBatch, IntentBatcher},
    dataset::{IntentDataset, TrainingExample},
};
use crate::domain::{error::PipelineError, feature_index::FeatureIndex};
use crate::infra::{
    checkpoint::ArtifactStore,
    metrics::{EpochMetrics, MetricsLogger},
};
use crate::ml::model::{
    correct_predictions, IntentClassifier, IntentClassifierConfig, HIDDEN_1, HIDDEN_2,
};

#[cfg(not(feature = "wgpu"))]
pub type InnerBackend = burn::backend::NdArray;
#[cfg(feature = "wgpu")]
pub type InnerBackend = burn::backend::Wgpu;

pub type TrainBackend = Autodiff<InnerBackend>;

/// Build the classifier for `index`, train it on `examples` and
/// write the model artifacts into `store`.
pub fn run_training<R: Rng + ?Sized>(
    cfg:      &TrainConfig,
    index:    &FeatureIndex,
    examples: Vec<TrainingExample>,
    store:    &ArtifactStore,
    metrics:  &MetricsLogger,
    rng:      &mut R,
) -> Result<()> {
    let device: <TrainBackend as Backend>::Device = Default::default();
    tracing::info!("Using device: {:?}", device);

    let model_cfg = IntentClassifierConfig::new(index.feature_width(), index.label_width())
        .with_dropout(cfg.dropout);
    store.save_model_config(&model_cfg)?;

    let model = train::<TrainBackend, R>(
        cfg,
        &model_cfg,
        IntentDataset::new(examples),
        rng,
        &device,
        |m| metrics.log(m),
    )?;

    store.save_model(&model)?;
    tracing::info!("Training complete!");
    Ok(())
}

/// Fit a freshly initialised classifier. `on_epoch` runs after
/// every epoch with that epoch's metrics.
pub fn train<B, R>(
    cfg:          &TrainConfig,
    model_cfg:    &IntentClassifierConfig,
    dataset:      IntentDataset,
    rng:          &mut R,
    device:       &B::Device,
    mut on_epoch: impl FnMut(&EpochMetrics) -> Result<()>,
) -> Result<IntentClassifier<B>>
where
    B: AutodiffBackend,
    R: Rng + ?Sized,
{
    ensure!(cfg.batch_size > 0, "batch size must be at least 1");
    validate_examples(dataset.examples(), model_cfg.input_width, model_cfg.num_tags)?;

    let mut model: IntentClassifier<B> = model_cfg.init(device);
    tracing::info!(
        "Model ready: {} → {} → {} → {}, dropout={}",
        model_cfg.input_width,
        HIDDEN_1,
        HIDDEN_2,
        model_cfg.num_tags,
        model_cfg.dropout,
    );

    let momentum = MomentumConfig::new()
        .with_momentum(cfg.momentum)
        .with_dampening(0.0)
        .with_nesterov(true);
    let mut optim = SgdConfig::new().with_momentum(Some(momentum)).init();

    // ── Training data loader ──────────────────────────────────────────────────
    // Seeded from `rng` so --seed also fixes the batch order; the
    // loader draws a new permutation on every iter().
    let loader   = batch_loader::<B>(dataset, cfg.batch_size, rng.gen::<u64>(), device);
    let mut step = 0usize;

    for epoch in 1..=cfg.epochs {
        let mut loss_sum = 0.0f64;
        let mut correct  = 0usize;
        let mut seen     = 0usize;
        let mut lr       = cfg.lr;

        for batch in loader.iter() {
            let rows = batch.features.dims()[0];
            let (loss, probs) = model.forward_loss(batch.features, batch.labels.clone());

            loss_sum += loss.clone().into_scalar().elem::<f64>() * rows as f64;
            correct  += correct_predictions(probs, batch.labels);
            seen     += rows;

            lr = learning_rate(cfg.lr, cfg.decay, step);
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(lr, model, grads);
            step += 1;
        }

        let metrics = EpochMetrics::new(
            epoch,
            loss_sum / seen as f64,
            correct as f64 / seen as f64,
            lr,
        );
        println!(
            "Epoch {:>3}/{} | loss={:.4} | accuracy={:.4} | lr={:.8}",
            epoch, cfg.epochs, metrics.loss, metrics.accuracy, metrics.learning_rate,
        );
        on_epoch(&metrics)?;
    }

    Ok(model)
}

/// Shuffled mini-batches of `dataset` on `device`. The final batch
/// of an epoch holds whatever is left over.
pub fn batch_loader<B: Backend>(
    dataset:    IntentDataset,
    batch_size: usize,
    seed:       u64,
    device:     &B::Device,
) -> Arc<dyn DataLoader<B, IntentBatch<B>>> {
    DataLoaderBuilder::new(IntentBatcher::new())
        .batch_size(batch_size)
        .shuffle(seed)
        .num_workers(1)
        .set_device(device.clone())
        .build(dataset)
}

/// Inverse-time decay: the rate used for optimiser step `step`.
pub fn learning_rate(initial: f64, decay: f64, step: usize) -> f64 {
    initial / (1.0 + decay * step as f64)
}

/// Check the examples against the network's declared widths.
pub fn validate_examples(
    examples:      &[TrainingExample],
    feature_width: usize,
    label_width:   usize,
) -> Result<(), PipelineError> {
    if examples.is_empty() {
        return Err(PipelineError::EmptyTrainingSet);
    }

    for (index, ex) in examples.iter().enumerate() {
        if ex.features.len() != feature_width {
            return Err(PipelineError::FeatureWidth {
                index,
                expected: feature_width,
                actual:   ex.features.len(),
            });
        }
        if ex.label.len() != label_width {
            return Err(PipelineError::LabelWidth {
                index,
                expected: label_width,
                actual:   ex.label.len(),
            });
        }
        if ex.tag_position().is_none() {
            return Err(PipelineError::NotOneHot { index, sum: ex.label.iter().sum() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{ndarray::NdArrayDevice, NdArray};
    use rand::{rngs::StdRng, SeedableRng};

    type TestBackend = Autodiff<NdArray>;

    fn example(features: &[f32], label: &[f32]) -> TrainingExample {
        TrainingExample { features: features.to_vec(), label: label.to_vec() }
    }

    /// Two tags, each announced by its own word.
    fn separable_examples() -> Vec<TrainingExample> {
        let mut out = Vec::new();
        for _ in 0..5 {
            out.push(example(&[1.0, 0.0, 1.0, 0.0], &[1.0, 0.0]));
            out.push(example(&[1.0, 0.0, 0.0, 0.0], &[1.0, 0.0]));
            out.push(example(&[0.0, 1.0, 0.0, 1.0], &[0.0, 1.0]));
            out.push(example(&[0.0, 1.0, 0.0, 0.0], &[0.0, 1.0]));
        }
        out
    }

    fn quick_config(epochs: usize) -> TrainConfig {
        TrainConfig { epochs, seed: Some(3), ..TrainConfig::default() }
    }

    #[test]
    fn test_learning_rate_decays_per_step() {
        assert_eq!(learning_rate(0.01, 1e-6, 0), 0.01);
        let later = learning_rate(0.01, 1e-6, 1_000_000);
        assert!((later - 0.005).abs() < 1e-12);
        assert!(learning_rate(0.01, 1e-6, 10) < learning_rate(0.01, 1e-6, 9));
    }

    #[test]
    fn test_validate_rejects_empty_set() {
        assert_eq!(validate_examples(&[], 4, 2), Err(PipelineError::EmptyTrainingSet));
    }

    #[test]
    fn test_validate_rejects_width_mismatches() {
        let wide = vec![example(&[1.0, 0.0, 0.0], &[1.0, 0.0])];
        assert!(matches!(
            validate_examples(&wide, 4, 2),
            Err(PipelineError::FeatureWidth { index: 0, expected: 4, actual: 3 })
        ));

        let narrow_label = vec![example(&[1.0, 0.0, 0.0, 0.0], &[1.0])];
        assert!(matches!(
            validate_examples(&narrow_label, 4, 2),
            Err(PipelineError::LabelWidth { index: 0, expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_validate_rejects_non_one_hot_label() {
        let examples = vec![
            example(&[1.0, 0.0, 0.0, 0.0], &[1.0, 0.0]),
            example(&[1.0, 0.0, 0.0, 0.0], &[1.0, 1.0]),
        ];
        assert!(matches!(
            validate_examples(&examples, 4, 2),
            Err(PipelineError::NotOneHot { index: 1, .. })
        ));
    }

    #[test]
    fn test_train_rejects_mismatched_model() {
        let device    = NdArrayDevice::default();
        let model_cfg = IntentClassifierConfig::new(5, 2);
        let mut rng   = StdRng::seed_from_u64(1);

        let result = train::<TestBackend, _>(
            &quick_config(1),
            &model_cfg,
            IntentDataset::new(separable_examples()),
            &mut rng,
            &device,
            |_| Ok(()),
        );
        assert!(result.is_err());
    }

    type TestLoader = Arc<dyn DataLoader<NdArray, IntentBatch<NdArray>>>;

    /// Batch sizes and the first feature of every row for one epoch.
    fn epoch_order(loader: &TestLoader) -> (Vec<usize>, Vec<f32>) {
        let mut sizes = Vec::new();
        let mut ids   = Vec::new();
        for batch in loader.iter() {
            sizes.push(batch.features.dims()[0]);
            let rows: Vec<f32> = batch.features.into_data().to_vec().unwrap();
            ids.extend(rows.chunks(2).map(|row| row[0]));
        }
        (sizes, ids)
    }

    #[test]
    fn test_loader_reshuffles_every_epoch() {
        let device   = NdArrayDevice::default();
        let examples = (0..10)
            .map(|i| example(&[i as f32, 1.0], &[1.0, 0.0]))
            .collect::<Vec<_>>();
        let loader = batch_loader::<NdArray>(IntentDataset::new(examples), 3, 17, &device);

        let (sizes, first) = epoch_order(&loader);
        let (_, second)    = epoch_order(&loader);
        let in_order: Vec<f32> = (0..10).map(|i| i as f32).collect();

        assert_eq!(sizes, [3, 3, 3, 1]);
        assert_ne!(first, second);
        assert_ne!(first, in_order);

        for mut epoch in [first, second] {
            epoch.sort_by(f32::total_cmp);
            assert_eq!(epoch, in_order);
        }
    }

    #[test]
    fn test_training_reduces_loss() {
        let device    = NdArrayDevice::default();
        let model_cfg = IntentClassifierConfig::new(4, 2);
        let mut rng   = StdRng::seed_from_u64(11);
        let mut history: Vec<EpochMetrics> = Vec::new();

        train::<TestBackend, _>(
            &quick_config(30),
            &model_cfg,
            IntentDataset::new(separable_examples()),
            &mut rng,
            &device,
            |m| {
                history.push(m.clone());
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(history.len(), 30);
        assert_eq!(history[0].epoch, 1);
        let first = history.first().unwrap().loss;
        let last  = history.last().unwrap().loss;
        assert!(last < first, "loss went from {first} to {last}");
        assert!(history.iter().all(|m| (0.0..=1.0).contains(&m.accuracy)));
        assert!(history.last().unwrap().learning_rate < 0.01);
    }
}
